//! HTTP fetcher for the manager's REST endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{DashboardApi, DashboardSnapshot, FetchError, MetricsSnapshot};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches snapshots from `{endpoint}/api/dashboard` and
/// `{endpoint}/api/metrics` via HTTP GET.
///
/// # Example
///
/// ```rust,no_run
/// use replwatch::source::HttpApi;
///
/// let api = HttpApi::builder()
///     .endpoint("http://localhost:8080")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    endpoint: String,
    description: String,
}

impl HttpApi {
    /// Create a builder for configuring the fetcher.
    pub fn builder() -> HttpApiBuilder {
        HttpApiBuilder::default()
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}{}", self.endpoint, path);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let payload = response.json().await.map_err(|e| FetchError::Parse(e.to_string()))?;
        Ok(payload)
    }
}

#[async_trait]
impl DashboardApi for HttpApi {
    async fn fetch_dashboard(&self) -> Result<DashboardSnapshot, FetchError> {
        self.get_json("/api/dashboard").await
    }

    async fn fetch_metrics(&self) -> Result<MetricsSnapshot, FetchError> {
        self.get_json("/api/metrics").await
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Builder for [`HttpApi`].
#[derive(Debug, Default)]
pub struct HttpApiBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl HttpApiBuilder {
    /// Base URL of the manager service (e.g. `http://localhost:8080`).
    ///
    /// A trailing slash is stripped so paths concatenate cleanly.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Per-request timeout. Defaults to 10 seconds. A timeout is reported as
    /// [`FetchError::Timeout`] and counts as an ordinary failed cycle.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the fetcher.
    pub fn build(self) -> HttpApi {
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| "http://localhost:8080".to_string())
            .trim_end_matches('/')
            .to_string();
        let client = Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .unwrap_or_default();
        let description = format!("http: {}", endpoint);
        HttpApi {
            client,
            endpoint,
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_localhost() {
        let api = HttpApi::builder().build();
        assert_eq!(api.endpoint, "http://localhost:8080");
        assert_eq!(api.description(), "http: http://localhost:8080");
    }

    #[test]
    fn builder_strips_trailing_slash() {
        let api = HttpApi::builder().endpoint("http://db-manager:9000/").build();
        assert_eq!(api.endpoint, "http://db-manager:9000");
    }

    #[tokio::test]
    async fn unreachable_endpoint_reports_connection_error() {
        // Port 1 is essentially guaranteed to refuse connections.
        let api = HttpApi::builder()
            .endpoint("http://127.0.0.1:1")
            .timeout(Duration::from_millis(500))
            .build();

        let err = api.fetch_dashboard().await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Connection(_) | FetchError::Timeout | FetchError::Http(_)
        ));
    }
}
