use super::{CheckError, CheckResult, Service};
use reqwest::Client;
use serde::Deserialize;

const PACKAGIST_URL: &str = "https://packagist.org";

/// Only emptiness of the results list matters; entry contents are opaque.
#[derive(Debug, Deserialize)]
struct SearchResponse {
  results: Vec<serde_json::Value>,
}

/// Check if a package name is taken on Packagist
///
/// API: GET https://packagist.org/search.json?q={name}
/// Empty results list means the name is free.
pub async fn check(client: &Client, name: &str) -> Result<CheckResult, CheckError> {
  check_at(client, PACKAGIST_URL, name).await
}

pub(crate) async fn check_at(
  client: &Client,
  base: &str,
  name: &str,
) -> Result<CheckResult, CheckError> {
  let url = format!("{}/search.json?q={}", base, name);

  let response = client.get(&url).send().await?;

  let status = response.status();
  if !status.is_success() {
    return Err(CheckError::UnexpectedStatus {
      service: Service::Packagist,
      status,
    });
  }

  let body = response.text().await?;
  let search: SearchResponse = serde_json::from_str(&body).map_err(|source| CheckError::Parse {
    service: Service::Packagist,
    source,
  })?;

  Ok(CheckResult {
    service: Service::Packagist,
    taken: !search.results.is_empty(),
    url,
  })
}
