use crate::domain::ports::FeedFetcher;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::error;

/// Fetches iCal feeds over HTTP with a bounded per-request deadline. A hung
/// calendar host surfaces as a timeout error for that property instead of
/// stalling the whole reconciliation batch.
pub struct HttpFeedFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFeedFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
        }
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                error!("Feed fetch failed for {}: {}", url, e);
                if e.is_timeout() {
                    AppError::Upstream(format!(
                        "Feed fetch timed out after {}s: {}",
                        self.timeout.as_secs(),
                        url
                    ))
                } else {
                    AppError::Upstream(format!("Feed fetch failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "Feed host returned {} for {}",
                response.status(),
                url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to read feed body: {}", e)))
    }
}
