use super::{check_by_status, CheckError, CheckResult, Service};
use reqwest::Client;

const PYPI_SIMPLE_URL: &str = "https://pypi.org/simple";

/// Check if a package name is taken on PyPI
///
/// API: GET https://pypi.org/simple/{name}/
/// - 404: Package not found (available)
/// - anything else: Package exists (taken)
///
/// The /simple/ endpoint correctly returns 404 for names that are
/// registered but have no releases.
pub async fn check(client: &Client, name: &str) -> Result<CheckResult, CheckError> {
  check_at(client, PYPI_SIMPLE_URL, name).await
}

pub(crate) async fn check_at(
  client: &Client,
  base: &str,
  name: &str,
) -> Result<CheckResult, CheckError> {
  check_by_status(client, Service::PyPi, format!("{}/{}/", base, name)).await
}
