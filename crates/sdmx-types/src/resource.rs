//! SDMX resource kinds.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::SdmxError;

/// Kind of SDMX artifact a request targets.
///
/// The resource type only drives URL construction; it does not affect how
/// the returned message is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// Statistical data.
    Data,
    /// Dataflow definitions.
    Dataflow,
    /// Data structure definitions (DSDs).
    Datastructure,
    /// Category schemes.
    Categoryscheme,
    /// Code lists.
    Codelist,
    /// Concept schemes.
    Conceptscheme,
}

impl ResourceType {
    /// Returns the resource type as used in REST paths.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Dataflow => "dataflow",
            Self::Datastructure => "datastructure",
            Self::Categoryscheme => "categoryscheme",
            Self::Codelist => "codelist",
            Self::Conceptscheme => "conceptscheme",
        }
    }

    /// Returns all known resource types.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Data,
            Self::Dataflow,
            Self::Datastructure,
            Self::Categoryscheme,
            Self::Codelist,
            Self::Conceptscheme,
        ]
    }

    /// Comma-separated list of known resource types, for messages.
    #[must_use]
    pub const fn known() -> &'static str {
        "data, dataflow, datastructure, categoryscheme, codelist, conceptscheme"
    }

    /// Returns true for kinds that define structure and accept `references=all`.
    #[must_use]
    pub const fn is_structure_defining(&self) -> bool {
        matches!(self, Self::Dataflow | Self::Datastructure)
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = SdmxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SdmxError::InvalidResourceType(s.to_string()))
    }
}

/// Anything that carries an SDMX identifier, such as a dataflow or structure.
///
/// Requests accept these in place of a plain resource id and use only the id.
pub trait Identifiable {
    /// Returns the identifier.
    fn id(&self) -> &str;
}

impl Identifiable for str {
    fn id(&self) -> &str {
        self
    }
}

impl Identifiable for String {
    fn id(&self) -> &str {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known() {
        for kind in ResourceType::all() {
            assert_eq!(kind.as_str().parse::<ResourceType>().unwrap(), *kind);
        }
    }

    #[test]
    fn test_parse_unknown() {
        let result = "datasets".parse::<ResourceType>();
        assert!(matches!(result, Err(SdmxError::InvalidResourceType(s)) if s == "datasets"));

        let result = "".parse::<ResourceType>();
        assert!(matches!(result, Err(SdmxError::InvalidResourceType(_))));
    }

    #[test]
    fn test_structure_defining() {
        assert!(ResourceType::Dataflow.is_structure_defining());
        assert!(ResourceType::Datastructure.is_structure_defining());
        assert!(!ResourceType::Data.is_structure_defining());
        assert!(!ResourceType::Categoryscheme.is_structure_defining());
    }
}
