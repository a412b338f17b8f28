//! HTTP client for the usage-log store API.

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use oculog_core::UsageLog;

/// Errors that can occur when talking to the usage-log store.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("store returned {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Deserialize)]
struct ClearLogsResponse {
    cleared: u64,
}

/// Client for the usage-log store HTTP API.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client for the given base URL (the `/api` prefix
    /// included, e.g. `http://localhost:3000/api`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();

        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url,
            }),
        }
    }

    /// Upsert one log record, returning the stored row.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the store rejects it.
    pub async fn save_log(&self, log: &UsageLog) -> Result<UsageLog, ApiError> {
        let response = self
            .inner
            .client
            .post(format!("{}/logs", self.inner.base_url))
            .json(log)
            .send()
            .await?;

        Ok(check(response)?.json().await?)
    }

    /// All records for an owner, newest date first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the store rejects it.
    pub async fn get_logs(&self, token: &str) -> Result<Vec<UsageLog>, ApiError> {
        let response = self
            .inner
            .client
            .get(format!("{}/logs/{token}", self.inner.base_url))
            .send()
            .await?;

        Ok(check(response)?.json().await?)
    }

    /// The most recent record for an owner, or `None`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the store rejects it.
    pub async fn get_latest_log(&self, token: &str) -> Result<Option<UsageLog>, ApiError> {
        let response = self
            .inner
            .client
            .get(format!("{}/logs/{token}/latest", self.inner.base_url))
            .send()
            .await?;

        Ok(check(response)?.json().await?)
    }

    /// Wipe every record for every owner, returning the count removed.
    ///
    /// Administrative operation backing `oculog clear-logs`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the store rejects it.
    pub async fn clear_logs(&self) -> Result<u64, ApiError> {
        let response = self
            .inner
            .client
            .delete(format!("{}/logs", self.inner.base_url))
            .send()
            .await?;

        let body: ClearLogsResponse = check(response)?.json().await?;
        Ok(body.cleared)
    }
}

fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:3000/api/");
        assert_eq!(client.inner.base_url, "http://localhost:3000/api");
    }
}
