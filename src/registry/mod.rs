pub mod brew;
pub mod crates;
pub mod github;
pub mod gopkg;
pub mod npm;
pub mod packagist;
pub mod pypi;
pub mod rubygems;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// Normalized outcome of probing one registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
  pub service: Service,
  pub taken: bool,
  /// Page of the existing resource when taken, or the query URL for
  /// checkers whose probe URL is itself the reference; empty otherwise.
  pub url: String,
}

/// The fixed set of registries a name is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
  GitHub,
  GoPkg,
  Brew,
  Npm,
  PyPi,
  RubyGems,
  Crates,
  Packagist,
}

impl Service {
  pub const ALL: [Service; 8] = [
    Service::GitHub,
    Service::GoPkg,
    Service::Brew,
    Service::Npm,
    Service::PyPi,
    Service::RubyGems,
    Service::Crates,
    Service::Packagist,
  ];

  /// Probe this registry for `name`. The name is passed through verbatim,
  /// no normalization. Exactly one result per successful call.
  pub async fn check(self, client: &Client, name: &str) -> Result<CheckResult, CheckError> {
    match self {
      Service::GitHub => github::check(client, name).await,
      Service::GoPkg => gopkg::check(client, name).await,
      Service::Brew => brew::check(client, name).await,
      Service::Npm => npm::check(client, name).await,
      Service::PyPi => pypi::check(client, name).await,
      Service::RubyGems => rubygems::check(client, name).await,
      Service::Crates => crates::check(client, name).await,
      Service::Packagist => packagist::check(client, name).await,
    }
  }
}

impl std::fmt::Display for Service {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Service::GitHub => write!(f, "github"),
      Service::GoPkg => write!(f, "gopkg"),
      Service::Brew => write!(f, "brew"),
      Service::Npm => write!(f, "npm"),
      Service::PyPi => write!(f, "pypi"),
      Service::RubyGems => write!(f, "rubygems"),
      Service::Crates => write!(f, "crates"),
      Service::Packagist => write!(f, "packagist"),
    }
  }
}

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
  #[error("network error: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("{service}: unexpected status {status}")]
  UnexpectedStatus { service: Service, status: StatusCode },

  #[error("{service}: malformed response: {source}")]
  Parse {
    service: Service,
    source: serde_json::Error,
  },
}

/// Shared probe for registries with a canonical per-name URL: 404 means the
/// name is free, any other answer means something already lives there.
pub(crate) async fn check_by_status(
  client: &Client,
  service: Service,
  url: String,
) -> Result<CheckResult, CheckError> {
  let response = client.get(&url).send().await?;
  let taken = response.status() != StatusCode::NOT_FOUND;
  Ok(CheckResult { service, taken, url })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn service_identifiers_are_stable() {
    let names: Vec<String> = Service::ALL.iter().map(|s| s.to_string()).collect();
    assert_eq!(
      names,
      [
        "github",
        "gopkg",
        "brew",
        "npm",
        "pypi",
        "rubygems",
        "crates",
        "packagist"
      ]
    );
  }

  #[test]
  fn result_serializes_with_lowercase_service() {
    let result = CheckResult {
      service: Service::RubyGems,
      taken: true,
      url: "https://rubygems.org/api/v1/gems/rails.json".to_string(),
    };
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"service\":\"rubygems\""));
    assert!(json.contains("\"taken\":true"));
  }
}
