//! Error types for sdmx retrieval.

use thiserror::Error;

/// Result type alias for sdmx operations.
pub type Result<T> = std::result::Result<T, SdmxError>;

/// Errors that can occur while resolving, fetching or reading a resource.
#[derive(Error, Debug)]
pub enum SdmxError {
    /// Agency code is not present in the registry.
    #[error("Unknown agency: {0}")]
    UnknownAgency(String),

    /// Resource type is not one of the known SDMX resource kinds.
    #[error("Invalid resource type: {0:?} (expected one of {known})", known = crate::ResourceType::known())]
    InvalidResourceType(String),

    /// A structured key names a dimension or value the structure does not define.
    #[error("Invalid key for dimension {dimension}{}", value_suffix(.value))]
    InvalidKeyDimension {
        /// The offending dimension name.
        dimension: String,
        /// The offending value, if the dimension itself was recognized.
        value: Option<String>,
    },

    /// The structure definition needed to resolve a key could not be obtained.
    #[error("Structure definition unavailable for {resource_id}: {reason}")]
    StructureUnavailable {
        /// The resource whose structure was requested.
        resource_id: String,
        /// Why it could not be obtained.
        reason: String,
    },

    /// A structured key was supplied for a resource other than data.
    #[error("Structured keys are only supported for data requests, not {0}")]
    UnsupportedKey(String),

    /// Neither an explicit URL, a service agency nor a local file is available.
    #[error("If no URL is given, either a service agency or a source file is required")]
    AmbiguousTarget,

    /// Transport-level failure (connectivity, non-success status, unreadable file).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Archive container could not be opened.
    #[error("Container error: {0}")]
    Container(String),

    /// The message reader rejected the payload.
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn value_suffix(value: &Option<String>) -> String {
    value
        .as_ref()
        .map(|v| format!(": unknown value {v:?}"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimension_message() {
        let err = SdmxError::InvalidKeyDimension {
            dimension: "FREQ".to_string(),
            value: None,
        };
        assert_eq!(err.to_string(), "Invalid key for dimension FREQ");

        let err = SdmxError::InvalidKeyDimension {
            dimension: "FREQ".to_string(),
            value: Some("X".to_string()),
        };
        assert_eq!(err.to_string(), "Invalid key for dimension FREQ: unknown value \"X\"");
    }

    #[test]
    fn test_invalid_resource_type_lists_known() {
        let err = SdmxError::InvalidResourceType("foo".to_string());
        let msg = err.to_string();
        assert!(msg.contains("\"foo\""));
        assert!(msg.contains("categoryscheme"));
    }
}
