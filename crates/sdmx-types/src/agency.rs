//! Agency (data provider) definitions.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::ResourceType;

/// Per-resource-type settings an agency applies by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceOverride {
    /// Headers sent when the caller supplies none.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

/// A statistical agency and the service endpoint that publishes its resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgencyConfig {
    /// Agency code (e.g., "ECB", "ESTAT").
    code: String,
    /// Human-readable name.
    name: String,
    /// Service base URL. `None` only for the empty sentinel agency.
    base_url: Option<String>,
    /// Per-resource-type overrides.
    #[serde(default)]
    resources: HashMap<ResourceType, ResourceOverride>,
}

impl AgencyConfig {
    /// Creates a new agency config.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, base_url: Option<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            base_url,
            resources: HashMap::new(),
        }
    }

    /// The empty-code sentinel: no endpoint, a full URL or file must be given.
    #[must_use]
    pub fn sentinel() -> Self {
        Self::new("", "", None)
    }

    /// Adds default headers for one resource type.
    #[must_use]
    pub fn with_headers<I, K, V>(mut self, resource_type: ResourceType, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.resources.entry(resource_type).or_default().headers.extend(
            headers
                .into_iter()
                .map(|(k, v)| (k.into(), v.into())),
        );
        self
    }

    /// Returns the agency code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the service base URL.
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Returns the default headers for a resource type, if configured.
    #[must_use]
    pub fn headers_for(&self, resource_type: ResourceType) -> Option<&BTreeMap<String, String>> {
        self.resources
            .get(&resource_type)
            .map(|r| &r.headers)
            .filter(|h| !h.is_empty())
    }

    /// Returns true for the empty-code sentinel.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.code.is_empty()
    }
}

impl std::fmt::Display for AgencyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}
