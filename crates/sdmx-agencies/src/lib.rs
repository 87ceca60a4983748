//! Agency registry for the sdmx retrieval client.
//!
//! Maps agency codes to their display name, service endpoint and
//! per-resource-type defaults. The registry is a plain value handed to the
//! client at construction, so alternate endpoint sets can be substituted
//! freely.
//!
//! # Example
//!
//! ```
//! use sdmx_agencies::AgencyRegistry;
//!
//! let registry = AgencyRegistry::new("http://localhost:8080/sdmx");
//!
//! let ecb = registry.lookup("ECB").unwrap();
//! assert_eq!(ecb.base_url(), Some("http://localhost:8080/sdmx"));
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use sdmx_types::{AgencyConfig, ResourceOverride, ResourceType, SdmxError};
use serde::Deserialize;

/// Endpoint used for agencies without a fixed URL when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://widukind-api.cepremap.org/api/v1/sdmx";

/// Environment variable overriding [`DEFAULT_ENDPOINT`] in [`AgencyRegistry::from_env`].
pub const ENDPOINT_ENV: &str = "SDMX_API_URL";

/// The agency table embedded at compile time.
const AGENCIES_JSON: &str = include_str!("../data/agencies.json");

/// Parsed form of the embedded table.
static BUILTIN: OnceLock<BTreeMap<String, AgencyEntry>> = OnceLock::new();

/// One row of the embedded table. A `null` URL means "use the default endpoint".
#[derive(Debug, Deserialize)]
struct AgencyEntry {
    name: String,
    url: Option<String>,
    #[serde(default)]
    resources: HashMap<ResourceType, ResourceOverride>,
}

fn builtin() -> &'static BTreeMap<String, AgencyEntry> {
    BUILTIN.get_or_init(|| serde_json::from_str(AGENCIES_JSON).expect("Invalid agencies.json"))
}

/// Registry of agencies known to a client.
#[derive(Debug, Clone)]
pub struct AgencyRegistry {
    agencies: HashMap<String, AgencyConfig>,
}

impl AgencyRegistry {
    /// Builds the built-in registry, serving endpoint-less agencies through `default_endpoint`.
    #[must_use]
    pub fn new(default_endpoint: impl Into<String>) -> Self {
        let default_endpoint = default_endpoint.into();
        let mut registry = Self::empty();

        for (code, entry) in builtin() {
            let url = entry.url.clone().unwrap_or_else(|| default_endpoint.clone());
            let mut config = AgencyConfig::new(code.as_str(), entry.name.as_str(), Some(url));
            for (resource_type, over) in &entry.resources {
                config = config.with_headers(*resource_type, over.headers.clone());
            }
            registry = registry.with_agency(config);
        }

        registry
    }

    /// Builds the built-in registry with the endpoint taken from [`ENDPOINT_ENV`].
    ///
    /// Falls back to [`DEFAULT_ENDPOINT`] when the variable is unset or empty.
    #[must_use]
    pub fn from_env() -> Self {
        let endpoint = std::env::var(ENDPOINT_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        tracing::debug!(%endpoint, "Default SDMX endpoint");
        Self::new(endpoint)
    }

    /// A registry holding only the empty-code sentinel.
    #[must_use]
    pub fn empty() -> Self {
        let mut agencies = HashMap::new();
        agencies.insert(String::new(), AgencyConfig::sentinel());
        Self { agencies }
    }

    /// Adds or replaces an agency.
    #[must_use]
    pub fn with_agency(mut self, config: AgencyConfig) -> Self {
        self.agencies.insert(config.code().to_uppercase(), config);
        self
    }

    /// Looks up an agency by code (case-insensitive).
    ///
    /// The empty code resolves to the sentinel, which has no endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SdmxError::UnknownAgency`] if the code is not registered.
    pub fn lookup(&self, code: &str) -> Result<&AgencyConfig, SdmxError> {
        self.agencies
            .get(&code.to_uppercase())
            .ok_or_else(|| SdmxError::UnknownAgency(code.to_string()))
    }

    /// Returns true if the code is registered.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.agencies.contains_key(&code.to_uppercase())
    }

    /// Returns all agencies as an iterator.
    pub fn all(&self) -> impl Iterator<Item = &AgencyConfig> {
        self.agencies.values()
    }

    /// Returns the total number of agencies, the sentinel included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.agencies.len()
    }

    /// Returns true if the registry holds nothing but the sentinel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agencies.len() <= 1
    }

    /// Returns all agency codes sorted alphabetically.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.agencies.values().map(AgencyConfig::code).collect();
        codes.sort_unstable();
        codes
    }
}

impl Default for AgencyRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}
