use super::{check_by_status, CheckError, CheckResult, Service};
use reqwest::Client;

const BREW_API_URL: &str = "https://formulae.brew.sh/api/formula";

/// Check if a formula name is taken on Homebrew
///
/// API: GET https://formulae.brew.sh/api/formula/{name}.json
/// - 404: Formula not found (available)
/// - anything else: Formula exists (taken)
pub async fn check(client: &Client, name: &str) -> Result<CheckResult, CheckError> {
  check_at(client, BREW_API_URL, name).await
}

pub(crate) async fn check_at(
  client: &Client,
  base: &str,
  name: &str,
) -> Result<CheckResult, CheckError> {
  check_by_status(client, Service::Brew, format!("{}/{}.json", base, name)).await
}
