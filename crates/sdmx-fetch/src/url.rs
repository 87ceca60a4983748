//! Request target construction.
//!
//! Path layout: `{base_url}/{resource_type}/{agency}/{resource_id}/{key}`,
//! with empty segments dropped.

use std::collections::BTreeMap;

use sdmx_agencies::AgencyRegistry;
use sdmx_types::{Request, ResourceType, Result, SdmxError};

/// Query parameter controlling which related artifacts a structure query returns.
pub const REFERENCES: &str = "references";

/// Where and how to fetch a request, resolved once per request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Full URL without query string. Empty means "read the source file".
    pub url: String,
    /// Query parameters.
    pub params: BTreeMap<String, String>,
    /// HTTP headers.
    pub headers: BTreeMap<String, String>,
}

/// Builds [`ResolvedTarget`]s for a client bound to one service agency.
#[derive(Debug, Clone, Copy)]
pub struct TargetBuilder<'a> {
    registry: &'a AgencyRegistry,
    service_agency: &'a str,
}

impl<'a> TargetBuilder<'a> {
    /// Creates a builder whose base URL comes from `service_agency`.
    #[must_use]
    pub const fn new(registry: &'a AgencyRegistry, service_agency: &'a str) -> Self {
        Self {
            registry,
            service_agency,
        }
    }

    /// Resolves `request` into a target. `key` is the key in wire form.
    ///
    /// An explicit URL is used verbatim; a source file yields an empty URL;
    /// otherwise the URL is assembled from the registry.
    ///
    /// # Errors
    ///
    /// - [`SdmxError::InvalidResourceType`] if no resource type is set
    /// - [`SdmxError::UnknownAgency`] if the request agency is not registered
    /// - [`SdmxError::AmbiguousTarget`] if the service agency has no endpoint
    pub fn build(&self, request: &Request, key: &str) -> Result<ResolvedTarget> {
        if let Some(url) = explicit_url(request) {
            return Ok(ResolvedTarget {
                url: url.to_string(),
                params: request.params.clone(),
                headers: request.headers.clone(),
            });
        }

        if request.source_file.is_some() {
            return Ok(ResolvedTarget {
                url: String::new(),
                params: request.params.clone(),
                headers: request.headers.clone(),
            });
        }

        let resource_type = request
            .resource_type
            .ok_or_else(|| SdmxError::InvalidResourceType(String::new()))?;

        let agency = if request.agency.is_empty() {
            self.service_agency
        } else {
            request.agency.as_str()
        };
        let agency_config = self.registry.lookup(agency)?;

        let base_url = self
            .registry
            .lookup(self.service_agency)?
            .base_url()
            .filter(|u| !u.is_empty())
            .ok_or(SdmxError::AmbiguousTarget)?;

        let headers = if request.headers.is_empty() {
            agency_config
                .headers_for(resource_type)
                .cloned()
                .unwrap_or_default()
        } else {
            request.headers.clone()
        };

        let url = [
            base_url.trim_end_matches('/'),
            resource_type.as_str(),
            agency,
            request.resource_id.as_str(),
            key,
        ]
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");

        let mut params = request.params.clone();
        apply_default_params(&mut params, resource_type, &request.resource_id);

        Ok(ResolvedTarget {
            url,
            params,
            headers,
        })
    }
}

/// Returns the request's explicit URL, ignoring an empty one.
pub(crate) fn explicit_url(request: &Request) -> Option<&str> {
    request.url.as_deref().filter(|u| !u.is_empty())
}

/// Sets `references` unless the caller already chose a value.
pub fn apply_default_params(
    params: &mut BTreeMap<String, String>,
    resource_type: ResourceType,
    resource_id: &str,
) {
    if params.contains_key(REFERENCES) {
        return;
    }
    if resource_type.is_structure_defining() && !resource_id.is_empty() {
        params.insert(REFERENCES.to_string(), "all".to_string());
    } else if resource_type == ResourceType::Categoryscheme {
        params.insert(REFERENCES.to_string(), "parentsandsiblings".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdmx_types::AgencyConfig;

    const ENDPOINT: &str = "http://sdmx.example.org/rest";

    fn registry() -> AgencyRegistry {
        AgencyRegistry::new(ENDPOINT)
    }

    #[test]
    fn test_data_url() {
        let registry = registry();
        let builder = TargetBuilder::new(&registry, "ECB");
        let request = Request::new()
            .resource_type(ResourceType::Data)
            .resource_id("GDP")
            .agency("ECB");

        let target = builder.build(&request, "A.FR").unwrap();
        assert_eq!(target.url, "http://sdmx.example.org/rest/data/ECB/GDP/A.FR");
        assert!(!target.params.contains_key(REFERENCES));
        assert_eq!(
            target.headers["Accept"],
            "application/vnd.sdmx.genericdata+xml;version=2.1"
        );
    }

    #[test]
    fn test_agency_defaults_to_service_agency() {
        let registry = registry();
        let builder = TargetBuilder::new(&registry, "ECB");
        let request = Request::new()
            .resource_type(ResourceType::Dataflow)
            .resource_id("EXR");

        let target = builder.build(&request, "").unwrap();
        assert_eq!(target.url, "http://sdmx.example.org/rest/dataflow/ECB/EXR");
        assert_eq!(target.params[REFERENCES], "all");
        assert!(target.headers.is_empty());
    }

    #[test]
    fn test_empty_segments_dropped() {
        let registry = registry();
        let builder = TargetBuilder::new(&registry, "ESTAT");
        let request = Request::new().resource_type(ResourceType::Dataflow);

        let target = builder.build(&request, "").unwrap();
        assert_eq!(
            target.url,
            "http://ec.europa.eu/eurostat/SDMX/diss-web/rest/dataflow/ESTAT"
        );
        // No resource id: references stays unset for structure queries.
        assert!(!target.params.contains_key(REFERENCES));
    }

    #[test]
    fn test_categoryscheme_references() {
        let registry = registry();
        let builder = TargetBuilder::new(&registry, "SGR");
        let request = Request::new().resource_type(ResourceType::Categoryscheme);

        let target = builder.build(&request, "").unwrap();
        assert_eq!(target.params[REFERENCES], "parentsandsiblings");
    }

    #[test]
    fn test_caller_references_preserved() {
        let registry = registry();
        let builder = TargetBuilder::new(&registry, "ECB");
        let request = Request::new()
            .resource_type(ResourceType::Datastructure)
            .resource_id("ECB_EXR1")
            .param(REFERENCES, "none");

        let target = builder.build(&request, "").unwrap();
        assert_eq!(target.params[REFERENCES], "none");

        // Building again from the same request is stable.
        assert_eq!(builder.build(&request, "").unwrap(), target);
    }

    #[test]
    fn test_explicit_headers_win() {
        let registry = registry();
        let builder = TargetBuilder::new(&registry, "ECB");
        let request = Request::new()
            .resource_type(ResourceType::Data)
            .resource_id("GDP")
            .header("Accept", "application/json");

        let target = builder.build(&request, "").unwrap();
        assert_eq!(target.headers.len(), 1);
        assert_eq!(target.headers["Accept"], "application/json");
    }

    #[test]
    fn test_explicit_url_verbatim() {
        let registry = AgencyRegistry::empty();
        let builder = TargetBuilder::new(&registry, "");
        let request = Request::for_url("http://other.org/data/X?format=xml")
            .resource_type(ResourceType::Data)
            .agency("UNKNOWN");

        let target = builder.build(&request, "ignored").unwrap();
        assert_eq!(target.url, "http://other.org/data/X?format=xml");
        assert!(target.params.is_empty());
    }

    #[test]
    fn test_source_file_empty_url() {
        let registry = AgencyRegistry::empty();
        let builder = TargetBuilder::new(&registry, "");
        let request = Request::for_file("/tmp/message.xml");

        let target = builder.build(&request, "").unwrap();
        assert!(target.url.is_empty());
    }

    #[test]
    fn test_missing_resource_type() {
        let registry = registry();
        let builder = TargetBuilder::new(&registry, "ECB");
        let result = builder.build(&Request::new().resource_id("GDP"), "");
        assert!(matches!(result, Err(SdmxError::InvalidResourceType(_))));
    }

    #[test]
    fn test_unknown_request_agency() {
        let registry = registry();
        let builder = TargetBuilder::new(&registry, "ECB");
        let request = Request::new()
            .resource_type(ResourceType::Data)
            .agency("NOPE");
        let result = builder.build(&request, "");
        assert!(matches!(result, Err(SdmxError::UnknownAgency(code)) if code == "NOPE"));
    }

    #[test]
    fn test_ambiguous_target() {
        let registry = registry();
        let builder = TargetBuilder::new(&registry, "");
        let request = Request::new()
            .resource_type(ResourceType::Data)
            .agency("ECB");
        let result = builder.build(&request, "");
        assert!(matches!(result, Err(SdmxError::AmbiguousTarget)));
    }

    #[test]
    fn test_trailing_slash_base() {
        let registry = AgencyRegistry::empty().with_agency(AgencyConfig::new(
            "TEST",
            "Test agency",
            Some("http://localhost/rest/".to_string()),
        ));
        let builder = TargetBuilder::new(&registry, "TEST");
        let request = Request::new()
            .resource_type(ResourceType::Codelist)
            .resource_id("CL_FREQ");

        let target = builder.build(&request, "").unwrap();
        assert_eq!(target.url, "http://localhost/rest/codelist/TEST/CL_FREQ");
        assert!(target.params.is_empty());
    }
}
