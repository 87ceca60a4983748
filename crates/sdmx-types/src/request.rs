//! Request values.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::{Identifiable, Key, ResourceType, Writer};

/// Polling plan for footer redirects.
///
/// Some providers answer a large data request with a placeholder message
/// whose footer points at the URL where the dataset will appear. The client
/// waits `wait` before each of up to `attempts` fetches of that URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterRetry {
    /// Fixed delay before each attempt.
    pub wait: Duration,
    /// Maximum number of attempts. Zero disables footer handling.
    pub attempts: u32,
}

impl FooterRetry {
    /// Creates a polling plan.
    #[must_use]
    pub const fn new(wait: Duration, attempts: u32) -> Self {
        Self { wait, attempts }
    }

    /// A plan that never follows footers.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            wait: Duration::ZERO,
            attempts: 0,
        }
    }

    /// Returns true if footers should be followed.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.attempts > 0
    }
}

impl Default for FooterRetry {
    fn default() -> Self {
        Self::new(Duration::from_secs(30), 3)
    }
}

/// A single logical retrieval request.
///
/// Built with chained setters:
///
/// ```
/// use sdmx_types::{DimensionKey, Request, ResourceType};
///
/// let request = Request::new()
///     .resource_type(ResourceType::Data)
///     .resource_id("GDP")
///     .agency("ECB")
///     .key(DimensionKey::new().with("FREQ", ["A"]).with("REF_AREA", ["FR"]))
///     .param("startPeriod", "2000");
/// assert_eq!(request.resource_id, "GDP");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Kind of resource; may be absent when reading a local file or a full URL.
    pub resource_type: Option<ResourceType>,
    /// Resource identifier (dataflow id, structure id, ...).
    pub resource_id: String,
    /// Agency path segment. Empty means the client's service agency.
    pub agency: String,
    /// Series selection.
    pub key: Key,
    /// Query parameters.
    pub params: BTreeMap<String, String>,
    /// HTTP headers. When non-empty they replace any agency defaults.
    pub headers: BTreeMap<String, String>,
    /// Read the message from this file instead of the network.
    pub source_file: Option<PathBuf>,
    /// Also write the raw payload to this file.
    pub dest_file: Option<PathBuf>,
    /// Full URL, bypassing URL construction entirely.
    pub url: Option<String>,
    /// Footer redirect polling plan.
    pub footer_retry: FooterRetry,
    /// Memoize the response under this token.
    pub cache_token: Option<String>,
    /// Explicit writer, overriding the default selection.
    pub writer: Option<Writer>,
}

impl Request {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a request for a full URL.
    #[must_use]
    pub fn for_url(url: impl Into<String>) -> Self {
        Self::new().url(url)
    }

    /// Creates a request that reads a local file.
    #[must_use]
    pub fn for_file(path: impl Into<PathBuf>) -> Self {
        Self::new().source_file(path)
    }

    /// Sets the resource type.
    #[must_use]
    pub const fn resource_type(mut self, resource_type: ResourceType) -> Self {
        self.resource_type = Some(resource_type);
        self
    }

    /// Sets the resource id.
    #[must_use]
    pub fn resource_id(mut self, id: impl Into<String>) -> Self {
        self.resource_id = id.into();
        self
    }

    /// Sets the resource id from anything carrying an identifier.
    #[must_use]
    pub fn resource<I: Identifiable + ?Sized>(mut self, resource: &I) -> Self {
        self.resource_id = resource.id().to_string();
        self
    }

    /// Sets the agency path segment.
    #[must_use]
    pub fn agency(mut self, agency: impl Into<String>) -> Self {
        self.agency = agency.into();
        self
    }

    /// Sets the key.
    #[must_use]
    pub fn key(mut self, key: impl Into<Key>) -> Self {
        self.key = key.into();
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Adds an HTTP header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the source file.
    #[must_use]
    pub fn source_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_file = Some(path.into());
        self
    }

    /// Sets the destination file.
    #[must_use]
    pub fn dest_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.dest_file = Some(path.into());
        self
    }

    /// Sets an explicit full URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the footer redirect polling plan.
    #[must_use]
    pub const fn footer_retry(mut self, retry: FooterRetry) -> Self {
        self.footer_retry = retry;
        self
    }

    /// Sets the cache token.
    #[must_use]
    pub fn cache_token(mut self, token: impl Into<String>) -> Self {
        self.cache_token = Some(token.into());
        self
    }

    /// Sets an explicit writer.
    #[must_use]
    pub fn writer(mut self, writer: Writer) -> Self {
        self.writer = Some(writer);
        self
    }
}
