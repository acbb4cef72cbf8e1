//! File-based fetcher.
//!
//! Reads the two payloads from local JSON files. Useful for demos, replaying
//! captured payloads, and tests that should not open sockets.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{DashboardApi, DashboardSnapshot, FetchError, MetricsSnapshot};

/// A fetcher that reads snapshots from a pair of JSON files.
///
/// Each fetch re-reads the file, so an external process may keep the files
/// updated while the pollers run.
#[derive(Debug, Clone)]
pub struct FileApi {
    dashboard_path: PathBuf,
    metrics_path: PathBuf,
    description: String,
}

impl FileApi {
    /// Create a fetcher reading the dashboard payload from `dashboard_path`
    /// and the metrics payload from `metrics_path`.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(dashboard_path: P, metrics_path: Q) -> Self {
        let dashboard_path = dashboard_path.as_ref().to_path_buf();
        let metrics_path = metrics_path.as_ref().to_path_buf();
        let description = format!(
            "file: {} + {}",
            dashboard_path.display(),
            metrics_path.display()
        );
        Self {
            dashboard_path,
            metrics_path,
            description,
        }
    }

    async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, FetchError> {
        let content = tokio::fs::read_to_string(path).await?;
        let payload = serde_json::from_str(&content)?;
        Ok(payload)
    }
}

#[async_trait]
impl DashboardApi for FileApi {
    async fn fetch_dashboard(&self) -> Result<DashboardSnapshot, FetchError> {
        Self::read_json(&self.dashboard_path).await
    }

    async fn fetch_metrics(&self) -> Result<MetricsSnapshot, FetchError> {
        Self::read_json(&self.metrics_path).await
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn reads_both_payloads() {
        let dashboard = write_file(r#"{"isConnected": true}"#);
        let metrics = write_file(r#"{"active": {"metrics": {"mysql_global_status_queries": 10}}}"#);

        let api = FileApi::new(dashboard.path(), metrics.path());

        let snap = api.fetch_dashboard().await.unwrap();
        assert!(snap.is_connected);

        let snap = api.fetch_metrics().await.unwrap();
        assert!(snap.active.is_some());
        assert!(snap.standby.is_none());
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let api = FileApi::new("/nonexistent/dashboard.json", "/nonexistent/metrics.json");
        let err = api.fetch_dashboard().await.unwrap_err();
        assert!(matches!(err, FetchError::Io(_)));
    }

    #[tokio::test]
    async fn invalid_json_is_a_parse_error() {
        let bad = write_file("not valid json");
        let api = FileApi::new(bad.path(), bad.path());
        let err = api.fetch_metrics().await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }
}
