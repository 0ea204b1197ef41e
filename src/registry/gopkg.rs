use super::{CheckError, CheckResult, Service};
use reqwest::Client;
use scraper::{ElementRef, Html};

const GOPKG_URL: &str = "https://pkg.go.dev";

/// Class carried by the "no results" gopher banner on the search page
const NO_RESULTS_CLASS: &str = "go-GopherMessage";

/// Check if a package name is taken on pkg.go.dev
///
/// There is no lookup API, so this fetches the search results page and
/// scans the markup: the no-results banner present means the name is free,
/// absent (including an empty or unparseable body) means something matched.
pub async fn check(client: &Client, name: &str) -> Result<CheckResult, CheckError> {
  check_at(client, GOPKG_URL, name).await
}

pub(crate) async fn check_at(
  client: &Client,
  base: &str,
  name: &str,
) -> Result<CheckResult, CheckError> {
  let url = format!("{}/search?q={}&m=package", base, name);

  let response = client.get(&url).send().await?;
  let body = response.text().await?;

  Ok(CheckResult {
    service: Service::GoPkg,
    taken: !has_marker_class(&body, NO_RESULTS_CLASS),
    url,
  })
}

/// Scan every element for a class attribute containing `class`
fn has_marker_class(html: &str, class: &str) -> bool {
  let document = Html::parse_document(html);
  document
    .root_element()
    .descendants()
    .filter_map(ElementRef::wrap)
    .any(|element| {
      element
        .value()
        .attr("class")
        .is_some_and(|classes| classes.contains(class))
    })
}

#[cfg(test)]
mod tests {
  use super::*;
  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  const NO_RESULTS_PAGE: &str = r#"<html><body>
    <div class="go-GopherMessage"><p>No results found.</p></div>
  </body></html>"#;

  const RESULTS_PAGE: &str = r#"<html><body>
    <div class="SearchSnippet"><a href="/left-pad">left-pad</a></div>
  </body></html>"#;

  #[test]
  fn marker_found_anywhere_in_markup() {
    assert!(has_marker_class(NO_RESULTS_PAGE, NO_RESULTS_CLASS));
    assert!(has_marker_class(
      r#"<p class="x go-GopherMessage y"></p>"#,
      NO_RESULTS_CLASS
    ));
  }

  #[test]
  fn marker_absent_in_results_or_empty_markup() {
    assert!(!has_marker_class(RESULTS_PAGE, NO_RESULTS_CLASS));
    assert!(!has_marker_class("", NO_RESULTS_CLASS));
  }

  #[tokio::test]
  async fn available_when_page_shows_no_results_banner() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/search"))
      .and(query_param("q", "surely-unclaimed"))
      .respond_with(ResponseTemplate::new(200).set_body_string(NO_RESULTS_PAGE))
      .mount(&server)
      .await;

    let result = check_at(&Client::new(), &server.uri(), "surely-unclaimed")
      .await
      .unwrap();
    assert_eq!(result.service, Service::GoPkg);
    assert!(!result.taken);
    assert!(result.url.contains("m=package"));
  }

  #[tokio::test]
  async fn taken_when_page_lists_matches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .respond_with(ResponseTemplate::new(200).set_body_string(RESULTS_PAGE))
      .mount(&server)
      .await;

    let result = check_at(&Client::new(), &server.uri(), "left-pad")
      .await
      .unwrap();
    assert!(result.taken);
  }
}
