use anyhow::{Context, Result};
use reqwest::Client;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::models::TodaySnapshot;

mod error;

pub use error::ApiError;

const TODAY_PATH: &str = "/api/v1/trainer/today";

/// Supplier of the trainer's "today" snapshot.
///
/// Each call is one request; refreshing re-runs the same fetch.
pub trait TodaySource {
    fn fetch_today(&self) -> impl Future<Output = Result<TodaySnapshot>>;
}

/// API client for the AI Coach backend
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.api.timeout_seconds);

        if !config.has_token() {
            tracing::warn!("No api.token configured, requests will be unauthenticated");
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            token: config.api.token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl TodaySource for ApiClient {
    async fn fetch_today(&self) -> Result<TodaySnapshot> {
        let url = format!("{}{}", self.base_url, TODAY_PATH);

        tracing::debug!("Fetching today's trainer data from {}", url);

        let mut request = self.client.get(&url);
        if !self.token.is_empty() {
            request = request.bearer_auth(&self.token);
        }

        let response = request
            .send()
            .await
            .context("Failed to send today request")?;

        let status = response.status();

        if status.is_success() {
            let snapshot: TodaySnapshot = response
                .json()
                .await
                .context("Failed to parse today response")?;

            tracing::info!(
                "Loaded {} sessions and {} clients",
                snapshot.training_sessions.len(),
                snapshot.clients.len()
            );
            Ok(snapshot)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, error_text).into())
        }
    }
}

/// Snapshot read from a JSON file, for offline use
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TodaySource for SnapshotFile {
    async fn fetch_today(&self) -> Result<TodaySnapshot> {
        tracing::debug!("Reading snapshot from {:?}", self.path);

        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read snapshot {}", self.path.display()))?;

        serde_json::from_str(&contents).context("Failed to parse snapshot file")
    }
}

/// The data source selected at startup
pub enum DataSource {
    Api(ApiClient),
    File(SnapshotFile),
}

impl DataSource {
    /// Use the snapshot file when given, the API otherwise
    pub fn from_config(config: &Config, snapshot: Option<PathBuf>) -> Result<Self> {
        match snapshot {
            Some(path) => Ok(DataSource::File(SnapshotFile::new(path))),
            None => Ok(DataSource::Api(ApiClient::new(config)?)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DataSource::Api(client) => client.base_url().to_string(),
            DataSource::File(file) => file.path.display().to_string(),
        }
    }
}

impl TodaySource for DataSource {
    async fn fetch_today(&self) -> Result<TodaySnapshot> {
        match self {
            DataSource::Api(client) => client.fetch_today().await,
            DataSource::File(file) => file.fetch_today().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_api_client_creation() {
        let config = Config::default();
        let client = ApiClient::new(&config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() -> Result<()> {
        let mut config = Config::default();
        config.api.base_url = "http://coach.local/".to_string();
        let client = ApiClient::new(&config)?;
        assert_eq!(client.base_url(), "http://coach.local");
        Ok(())
    }

    #[tokio::test]
    async fn test_snapshot_file_source() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(
            file,
            r#"{{"profile":{{"id":"p1","full_name":"Rui Costa"}},"trainingSessions":[],"clients":[]}}"#
        )?;

        let source = DataSource::from_config(&Config::default(), Some(file.path().to_path_buf()))?;
        let snapshot = source.fetch_today().await?;
        assert_eq!(snapshot.first_name(), "Rui");

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_snapshot_file_fails() {
        let source = SnapshotFile::new("/definitely/not/here.json");
        assert!(source.fetch_today().await.is_err());
    }
}
