//! Transport: fetching raw payloads over HTTP or from local files.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::url::ResolvedTarget;

/// Configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Retry attempts for connection failures and 5xx/429 responses.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds).
    pub max_delay_ms: u64,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(120), // SDMX data messages can be large
            connect_timeout: Duration::from_secs(10),
            max_retries: 0, // failures surface to the caller unless opted in
            base_delay_ms: 500,
            max_delay_ms: 30_000,
            user_agent: format!("sdmx-fetch/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors raised while fetching a payload.
#[derive(Error, Debug)]
pub enum TransportError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success status.
    #[error("{url} returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Final URL of the request.
        url: String,
    },

    /// Local source file could not be read.
    #[error("Failed to read '{path}': {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Neither a URL nor a source file was given.
    #[error("Nothing to fetch: no URL and no source file")]
    NoTarget,
}

/// Raw bytes of a message with their provenance.
#[derive(Debug, Clone)]
pub struct RawPayload {
    /// Message bytes, possibly a zip archive.
    pub body: Bytes,
    /// Final URL after redirects; empty for local files.
    pub url: String,
    /// Response headers; empty for local files.
    pub headers: HashMap<String, String>,
    /// HTTP status code; `None` for local files.
    pub status: Option<u16>,
}

impl RawPayload {
    /// Wraps bytes read from a local file.
    #[must_use]
    pub fn from_file(body: impl Into<Bytes>) -> Self {
        Self {
            body: body.into(),
            url: String::new(),
            headers: HashMap::new(),
            status: None,
        }
    }
}

/// Byte retrieval backend.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches `target`, or reads `source_file` when one is given.
    ///
    /// # Errors
    ///
    /// Returns an error on connectivity failure, a non-success status, or an
    /// unreadable file.
    async fn fetch(
        &self,
        target: &ResolvedTarget,
        source_file: Option<&Path>,
    ) -> Result<RawPayload, TransportError>;
}

/// Reads a local source file into a payload.
///
/// # Errors
///
/// Returns [`TransportError::ReadFile`] if the file cannot be read.
pub async fn read_source_file(path: &Path) -> Result<RawPayload, TransportError> {
    let body = tokio::fs::read(path)
        .await
        .map_err(|source| TransportError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(RawPayload::from_file(body))
}

/// HTTP transport with connection pooling and optional retries.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Creates a new transport with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a transport with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the transport configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn get(&self, target: &ResolvedTarget) -> Result<RawPayload, TransportError> {
        let mut attempts = 0;

        loop {
            let mut request = self.client.get(&target.url).query(&target.params);
            for (name, value) in &target.headers {
                request = request.header(name, value);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();

                    if (status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS)
                        && attempts < self.config.max_retries
                    {
                        attempts += 1;
                        tokio::time::sleep(self.calculate_backoff_delay(attempts)).await;
                        continue;
                    }

                    let url = response.url().to_string();
                    if !status.is_success() {
                        return Err(TransportError::Status {
                            status: status.as_u16(),
                            url,
                        });
                    }

                    let headers = response
                        .headers()
                        .iter()
                        .filter_map(|(name, value)| {
                            value
                                .to_str()
                                .ok()
                                .map(|v| (name.as_str().to_string(), v.to_string()))
                        })
                        .collect();

                    return Ok(RawPayload {
                        body: response.bytes().await?,
                        url,
                        headers,
                        status: Some(status.as_u16()),
                    });
                }
                Err(e) if Self::is_retryable_error(&e) && attempts < self.config.max_retries => {
                    attempts += 1;
                    tokio::time::sleep(self.calculate_backoff_delay(attempts)).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Calculates the backoff delay with exponential backoff and jitter.
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        let exp_delay = self
            .config
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(10));

        let capped_delay = exp_delay.min(self.config.max_delay_ms);

        // Deterministic jitter (±25%) derived from the attempt number
        let jitter_range = capped_delay / 4;
        let jitter = if jitter_range > 0 {
            let jitter_offset = (u64::from(attempt) * 17) % (jitter_range * 2);
            jitter_offset as i64 - jitter_range as i64
        } else {
            0
        };

        let final_delay = (capped_delay as i64 + jitter).max(100) as u64;
        Duration::from_millis(final_delay)
    }

    /// Determines if an error is retryable.
    fn is_retryable_error(error: &reqwest::Error) -> bool {
        if error.is_builder() {
            return false;
        }
        error.is_timeout() || error.is_connect() || error.is_request()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(
        &self,
        target: &ResolvedTarget,
        source_file: Option<&Path>,
    ) -> Result<RawPayload, TransportError> {
        if let Some(path) = source_file {
            return read_source_file(path).await;
        }
        if target.url.is_empty() {
            return Err(TransportError::NoTarget);
        }
        self.get(target).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.base_delay_ms, 500);
        assert_eq!(config.max_delay_ms, 30_000);
        assert!(config.user_agent.starts_with("sdmx-fetch/"));
    }

    #[tokio::test]
    async fn test_transport_creation() {
        let transport = HttpTransport::with_defaults();
        assert!(transport.is_ok());
    }

    #[test]
    fn test_backoff_delay_calculation() {
        let transport = HttpTransport::with_defaults().unwrap();

        // First attempt: base_delay * 2 = 1000ms (plus jitter)
        let delay1 = transport.calculate_backoff_delay(1);
        assert!(delay1.as_millis() >= 750 && delay1.as_millis() <= 1250);

        // Second attempt: base_delay * 4 = 2000ms (plus jitter)
        let delay2 = transport.calculate_backoff_delay(2);
        assert!(delay2.as_millis() >= 1500 && delay2.as_millis() <= 2500);

        let delay_high = transport.calculate_backoff_delay(20);
        assert!(delay_high.as_millis() <= 37500);
    }

    #[tokio::test]
    async fn test_fetch_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<message/>").unwrap();

        let transport = HttpTransport::with_defaults().unwrap();
        let payload = transport
            .fetch(&ResolvedTarget::default(), Some(file.path()))
            .await
            .unwrap();

        assert_eq!(&payload.body[..], b"<message/>");
        assert!(payload.url.is_empty());
        assert!(payload.headers.is_empty());
        assert_eq!(payload.status, None);
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.xml");

        let transport = HttpTransport::with_defaults().unwrap();
        let result = transport.fetch(&ResolvedTarget::default(), Some(&path)).await;
        assert!(matches!(result, Err(TransportError::ReadFile { .. })));
    }

    #[tokio::test]
    async fn test_fetch_without_target() {
        let transport = HttpTransport::with_defaults().unwrap();
        let result = transport.fetch(&ResolvedTarget::default(), None).await;
        assert!(matches!(result, Err(TransportError::NoTarget)));
    }
}
