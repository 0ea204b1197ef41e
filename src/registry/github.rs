use super::{CheckError, CheckResult, Service};
use reqwest::{header, Client};
use serde::Deserialize;

const GITHUB_API_URL: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct SearchResponse {
  items: Vec<Repo>,
}

#[derive(Debug, Deserialize)]
struct Repo {
  html_url: String,
}

/// Check if any GitHub repository already answers to this name
///
/// API: GET https://api.github.com/search/repositories?q={name}
/// At least one hit means the name is taken; the reference URL points at
/// the first hit's page.
pub async fn check(client: &Client, name: &str) -> Result<CheckResult, CheckError> {
  check_at(client, GITHUB_API_URL, name).await
}

pub(crate) async fn check_at(
  client: &Client,
  base: &str,
  name: &str,
) -> Result<CheckResult, CheckError> {
  let url = format!("{}/search/repositories?q={}", base, name);

  let response = client
    .get(&url)
    .header(header::ACCEPT, "application/vnd.github+json")
    .send()
    .await?;

  let status = response.status();
  if !status.is_success() {
    return Err(CheckError::UnexpectedStatus {
      service: Service::GitHub,
      status,
    });
  }

  let body = response.text().await?;
  let search: SearchResponse = serde_json::from_str(&body).map_err(|source| CheckError::Parse {
    service: Service::GitHub,
    source,
  })?;

  Ok(match search.items.first() {
    Some(repo) => CheckResult {
      service: Service::GitHub,
      taken: true,
      url: repo.html_url.clone(),
    },
    None => CheckResult {
      service: Service::GitHub,
      taken: false,
      url: String::new(),
    },
  })
}
