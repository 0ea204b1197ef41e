//! Concurrent fan-out of registry checks and fan-in of their outcomes.

use crate::registry::{CheckError, CheckResult, Service};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

pub type SharedProgress = Arc<Mutex<ProgressState>>;

type Outcome = (Service, Result<CheckResult, CheckError>);

/// Progress of one run, shared between the outcome consumer (sole writer)
/// and the UI loop (reader). Count and results only ever change together
/// under the lock, so a reader never sees them diverge.
#[derive(Debug)]
pub struct ProgressState {
  total: usize,
  completed: usize,
  results: Vec<CheckResult>,
  failures: Vec<(Service, String)>,
}

impl ProgressState {
  pub fn new(total: usize) -> Self {
    Self {
      total,
      completed: 0,
      results: Vec::new(),
      failures: Vec::new(),
    }
  }

  pub fn shared(total: usize) -> SharedProgress {
    Arc::new(Mutex::new(Self::new(total)))
  }

  pub fn total(&self) -> usize {
    self.total
  }

  pub fn completed(&self) -> usize {
    self.completed
  }

  /// Fraction of launched checks that have finished, success or failure
  pub fn fraction(&self) -> f64 {
    if self.total == 0 {
      1.0
    } else {
      self.completed as f64 / self.total as f64
    }
  }

  pub fn is_done(&self) -> bool {
    self.completed >= self.total
  }

  /// Successful results in completion order
  pub fn results(&self) -> &[CheckResult] {
    &self.results
  }

  /// Diagnostics from checks that produced no result
  pub fn failures(&self) -> &[(Service, String)] {
    &self.failures
  }

  fn record_success(&mut self, result: CheckResult) {
    self.completed += 1;
    self.results.push(result);
  }

  fn record_failure(&mut self, service: Service, error: &CheckError) {
    self.completed += 1;
    self.failures.push((service, error.to_string()));
  }
}

/// Run every service check for `name` concurrently.
///
/// One task per service; outcomes funnel through a single channel into the
/// one consumer that mutates `state`. Returns once the channel closes, i.e.
/// after every task has reported, so `completed == total` holds afterwards
/// no matter how many individual checks failed. Callers that want a live
/// progress display spawn this and poll `state` on their own tick.
pub async fn run_all(client: Client, name: String, services: Vec<Service>, state: SharedProgress) {
  let (tx, rx) = mpsc::channel(services.len().max(1));

  for service in services {
    let tx = tx.clone();
    let client = client.clone();
    let name = name.clone();
    tokio::spawn(async move {
      let outcome = service.check(&client, &name).await;
      // send only fails when the consumer is gone, i.e. the run was abandoned
      let _ = tx.send((service, outcome)).await;
    });
  }
  drop(tx);

  drain(rx, state).await;
}

/// Sole writer of the shared state: applies each outcome as one atomic
/// increment-plus-append under the lock.
async fn drain(mut rx: mpsc::Receiver<Outcome>, state: SharedProgress) {
  while let Some((service, outcome)) = rx.recv().await {
    let mut progress = state.lock().await;
    match outcome {
      Ok(result) => progress.record_success(result),
      Err(error) => progress.record_failure(service, &error),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::registry::{github, npm, packagist};
  use serde_json::json;
  use std::collections::HashSet;
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn marker_result(i: usize) -> CheckResult {
    CheckResult {
      service: Service::Npm,
      taken: false,
      url: format!("marker-{}", i),
    }
  }

  fn failed_check() -> CheckError {
    CheckError::UnexpectedStatus {
      service: Service::GitHub,
      status: reqwest::StatusCode::FORBIDDEN,
    }
  }

  async fn drain_synthetic(outcomes: Vec<Outcome>) -> SharedProgress {
    let state = ProgressState::shared(outcomes.len());
    let (tx, rx) = mpsc::channel(outcomes.len().max(1));
    for outcome in outcomes {
      let tx = tx.clone();
      tokio::spawn(async move {
        let _ = tx.send(outcome).await;
      });
    }
    drop(tx);
    drain(rx, Arc::clone(&state)).await;
    state
  }

  #[tokio::test]
  async fn no_update_lost_under_concurrent_senders() {
    for n in [1usize, 8, 50] {
      let outcomes: Vec<Outcome> = (0..n).map(|i| (Service::Npm, Ok(marker_result(i)))).collect();
      let state = drain_synthetic(outcomes).await;

      let progress = state.lock().await;
      assert_eq!(progress.completed(), n);
      assert_eq!(progress.results().len(), n);
      assert!(progress.is_done());

      let markers: HashSet<&str> = progress.results().iter().map(|r| r.url.as_str()).collect();
      assert_eq!(markers.len(), n, "every appended marker must survive");
    }
  }

  #[tokio::test]
  async fn failures_count_toward_completion_without_a_result() {
    let mut outcomes: Vec<Outcome> = (0..5).map(|i| (Service::Npm, Ok(marker_result(i)))).collect();
    for _ in 0..3 {
      outcomes.push((Service::GitHub, Err(failed_check())));
    }

    let state = drain_synthetic(outcomes).await;
    let progress = state.lock().await;
    assert_eq!(progress.completed(), 8);
    assert_eq!(progress.results().len(), 5);
    assert_eq!(progress.failures().len(), 3);
    assert!(progress.is_done());
    assert_eq!(progress.fraction(), 1.0);
  }

  #[tokio::test]
  async fn identical_outcomes_yield_identical_result_multisets() {
    let canned = |taken: bool| -> Vec<Outcome> {
      vec![
        (
          Service::Npm,
          Ok(CheckResult {
            service: Service::Npm,
            taken,
            url: "https://registry.npmjs.org/x".into(),
          }),
        ),
        (
          Service::Crates,
          Ok(CheckResult {
            service: Service::Crates,
            taken: !taken,
            url: "https://crates.io/api/v1/crates/x".into(),
          }),
        ),
        (Service::GitHub, Err(failed_check())),
      ]
    };

    let first = drain_synthetic(canned(true)).await;
    let second = drain_synthetic(canned(true)).await;

    let mut a = first.lock().await.results().to_vec();
    let mut b = second.lock().await.results().to_vec();
    a.sort_by_key(|r| r.service.to_string());
    b.sort_by_key(|r| r.service.to_string());
    assert_eq!(a, b);
  }

  #[tokio::test]
  async fn empty_service_list_is_immediately_done() {
    let state = ProgressState::shared(0);
    run_all(
      Client::new(),
      "anything".into(),
      Vec::new(),
      Arc::clone(&state),
    )
    .await;

    let progress = state.lock().await;
    assert!(progress.is_done());
    assert_eq!(progress.fraction(), 1.0);
    assert!(progress.results().is_empty());
  }

  // A matching GitHub repo, an npm 200, and an empty Packagist search,
  // arriving in whatever order the network dictates.
  #[tokio::test]
  async fn left_pad_scenario_end_to_end() {
    let github_server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/search/repositories"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "total_count": 1,
        "items": [{ "html_url": "https://github.com/left-pad/left-pad" }]
      })))
      .mount(&github_server)
      .await;

    let npm_server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/left-pad"))
      .respond_with(ResponseTemplate::new(200))
      .mount(&npm_server)
      .await;

    let packagist_server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/search.json"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
      .mount(&packagist_server)
      .await;

    let client = Client::new();
    let state = ProgressState::shared(3);
    let (tx, rx) = mpsc::channel(3);

    for (service, base) in [
      (Service::GitHub, github_server.uri()),
      (Service::Npm, npm_server.uri()),
      (Service::Packagist, packagist_server.uri()),
    ] {
      let tx = tx.clone();
      let client = client.clone();
      tokio::spawn(async move {
        let outcome = match service {
          Service::GitHub => github::check_at(&client, &base, "left-pad").await,
          Service::Packagist => packagist::check_at(&client, &base, "left-pad").await,
          _ => npm::check_at(&client, &base, "left-pad").await,
        };
        let _ = tx.send((service, outcome)).await;
      });
    }
    drop(tx);
    drain(rx, Arc::clone(&state)).await;

    let progress = state.lock().await;
    assert_eq!(progress.completed(), 3);

    let mut results = progress.results().to_vec();
    results.sort_by_key(|r| r.service.to_string());
    assert_eq!(results.len(), 3);

    assert_eq!(results[0].service, Service::GitHub);
    assert!(results[0].taken);
    assert_eq!(results[0].url, "https://github.com/left-pad/left-pad");
    assert_eq!(results[1].service, Service::Npm);
    assert!(results[1].taken);
    assert_eq!(results[2].service, Service::Packagist);
    assert!(!results[2].taken);
  }
}
