use super::{check_by_status, CheckError, CheckResult, Service};
use reqwest::Client;

const RUBYGEMS_API_URL: &str = "https://rubygems.org/api/v1/gems";

/// Check if a gem name is taken on RubyGems
///
/// API: GET https://rubygems.org/api/v1/gems/{name}.json
/// - 404: Gem not found (available)
/// - anything else: Gem exists (taken)
pub async fn check(client: &Client, name: &str) -> Result<CheckResult, CheckError> {
  check_at(client, RUBYGEMS_API_URL, name).await
}

pub(crate) async fn check_at(
  client: &Client,
  base: &str,
  name: &str,
) -> Result<CheckResult, CheckError> {
  check_by_status(client, Service::RubyGems, format!("{}/{}.json", base, name)).await
}
