use super::{check_by_status, CheckError, CheckResult, Service};
use reqwest::Client;

const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Check if a package name is taken on npm
///
/// API: GET https://registry.npmjs.org/{package}
/// - 404: Package not found (available)
/// - anything else: Package exists (taken)
pub async fn check(client: &Client, name: &str) -> Result<CheckResult, CheckError> {
  check_at(client, NPM_REGISTRY_URL, name).await
}

pub(crate) async fn check_at(
  client: &Client,
  base: &str,
  name: &str,
) -> Result<CheckResult, CheckError> {
  check_by_status(client, Service::Npm, format!("{}/{}", base, name)).await
}
