use super::{check_by_status, CheckError, CheckResult, Service};
use reqwest::Client;

const CRATES_API_URL: &str = "https://crates.io/api/v1/crates";

/// Check if a crate name is taken on crates.io
///
/// API: GET https://crates.io/api/v1/crates/{name}
/// - 404: Crate not found (available)
/// - anything else: Crate exists (taken)
///
/// Note: crates.io rejects requests without a User-Agent; the shared client
/// built in main carries one.
pub async fn check(client: &Client, name: &str) -> Result<CheckResult, CheckError> {
  check_at(client, CRATES_API_URL, name).await
}

pub(crate) async fn check_at(
  client: &Client,
  base: &str,
  name: &str,
) -> Result<CheckResult, CheckError> {
  check_by_status(client, Service::Crates, format!("{}/{}", base, name)).await
}
