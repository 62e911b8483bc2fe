use std::time::Duration;

use anyhow::Result;
use tracing::warn;

use crate::cache::ResultsSnapshot;

/// Client for the external tallying service.
///
/// The request timeout bounds every fetch so a hung backend cannot stall the
/// refresher past its tick interval.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// Fetches the current tally from the backend, or fails. Network errors,
    /// timeouts, non-success statuses and undecodable bodies are all errors.
    pub async fn fetch_results(&self) -> Result<ResultsSnapshot> {
        let url = format!("{}/api/v1/votes", self.base_url);
        let results = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<ResultsSnapshot>()
            .await?;
        Ok(results)
    }
}

/// Converts backend unavailability into "no update this cycle": any fetch
/// failure is logged at warning level and replaced by an empty snapshot.
pub async fn fetch_or_empty(client: &BackendClient) -> ResultsSnapshot {
    match client.fetch_results().await {
        Ok(results) => results,
        Err(err) => {
            warn!(%err, "failed to fetch poll results, keeping cached values");
            ResultsSnapshot::new()
        }
    }
}
