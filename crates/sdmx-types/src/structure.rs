//! Data structure summaries used to validate structured keys.

use serde::{Deserialize, Serialize};

use crate::Identifiable;

/// One dimension of a data structure definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    /// Dimension identifier (e.g., "FREQ", "REF_AREA").
    id: String,
    /// Allowed codes. Empty means the dimension is not code-list constrained.
    #[serde(default)]
    codes: Vec<String>,
}

impl Dimension {
    /// Creates a new dimension with the given allowed codes.
    #[must_use]
    pub fn new<I, S>(id: impl Into<String>, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the dimension identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the allowed codes.
    #[must_use]
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Returns true if `code` is allowed for this dimension.
    #[must_use]
    pub fn allows(&self, code: &str) -> bool {
        self.codes.is_empty() || self.codes.iter().any(|c| c == code)
    }
}

/// Ordered dimensions of a dataset, as declared by its structure definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStructure {
    id: String,
    dimensions: Vec<Dimension>,
}

impl DataStructure {
    /// Creates a new data structure summary.
    #[must_use]
    pub fn new(id: impl Into<String>, dimensions: Vec<Dimension>) -> Self {
        Self {
            id: id.into(),
            dimensions,
        }
    }

    /// Returns the dimensions in declared order.
    #[must_use]
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Looks up a dimension by identifier.
    #[must_use]
    pub fn dimension(&self, id: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.id == id)
    }
}

impl Identifiable for DataStructure {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_allows() {
        let freq = Dimension::new("FREQ", ["A", "Q", "M"]);
        assert!(freq.allows("A"));
        assert!(!freq.allows("D"));

        let open = Dimension::new("TIME", Vec::<String>::new());
        assert!(open.allows("anything"));
    }

    #[test]
    fn test_deserialize() {
        let json = r#"{"id": "GDP", "dimensions": [{"id": "FREQ", "codes": ["A"]}, {"id": "REF_AREA"}]}"#;
        let dsd: DataStructure = serde_json::from_str(json).unwrap();
        assert_eq!(dsd.id(), "GDP");
        assert_eq!(dsd.dimensions().len(), 2);
        assert!(dsd.dimension("REF_AREA").unwrap().codes().is_empty());
        assert!(dsd.dimension("OBS").is_none());
    }
}
