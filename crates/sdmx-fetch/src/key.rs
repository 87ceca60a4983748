//! Structured key resolution.

use async_trait::async_trait;
use std::collections::HashMap;

use sdmx_types::{DataStructure, DimensionKey, Result, SdmxError};

/// Source of data structure definitions.
#[async_trait]
pub trait StructureLookup: Send + Sync {
    /// Returns the structure of the dataset identified by `resource_id`.
    ///
    /// # Errors
    ///
    /// Returns [`SdmxError::StructureUnavailable`] if it cannot be obtained.
    async fn data_structure(&self, resource_id: &str) -> Result<DataStructure>;
}

/// In-memory structure definitions keyed by resource id.
#[derive(Debug, Clone, Default)]
pub struct StaticStructures {
    structures: HashMap<String, DataStructure>,
}

impl StaticStructures {
    /// Creates an empty lookup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the structure used for `resource_id`.
    #[must_use]
    pub fn with(mut self, resource_id: impl Into<String>, structure: DataStructure) -> Self {
        self.structures.insert(resource_id.into(), structure);
        self
    }
}

#[async_trait]
impl StructureLookup for StaticStructures {
    async fn data_structure(&self, resource_id: &str) -> Result<DataStructure> {
        self.structures
            .get(resource_id)
            .cloned()
            .ok_or_else(|| SdmxError::StructureUnavailable {
                resource_id: resource_id.to_string(),
                reason: "not registered".to_string(),
            })
    }
}

/// Renders `key` in wire form against `structure`.
///
/// Dimensions appear in declared order separated by `.`; several values for
/// one dimension are joined with `+`; unselected dimensions stay empty.
///
/// # Errors
///
/// Returns [`SdmxError::InvalidKeyDimension`] if the key names a dimension
/// the structure lacks, or a value outside that dimension's codes.
pub fn resolve_key(structure: &DataStructure, key: &DimensionKey) -> Result<String> {
    for name in key.dimensions() {
        let dimension =
            structure
                .dimension(name)
                .ok_or_else(|| SdmxError::InvalidKeyDimension {
                    dimension: name.to_string(),
                    value: None,
                })?;

        if let Some(value) = key.values(name).find(|v| !dimension.allows(v)) {
            return Err(SdmxError::InvalidKeyDimension {
                dimension: name.to_string(),
                value: Some(value.to_string()),
            });
        }
    }

    Ok(structure
        .dimensions()
        .iter()
        .map(|d| key.values(d.id()).collect::<Vec<_>>().join("+"))
        .collect::<Vec<_>>()
        .join("."))
}

/// Fetches the structure for `resource_id` and renders `key` against it.
///
/// # Errors
///
/// Returns [`SdmxError::StructureUnavailable`] if no lookup is configured or
/// the lookup fails, and [`SdmxError::InvalidKeyDimension`] as in [`resolve_key`].
pub async fn resolve(
    resource_id: &str,
    key: &DimensionKey,
    lookup: Option<&dyn StructureLookup>,
) -> Result<String> {
    let lookup = lookup.ok_or_else(|| SdmxError::StructureUnavailable {
        resource_id: resource_id.to_string(),
        reason: "no structure lookup configured".to_string(),
    })?;

    let structure = lookup.data_structure(resource_id).await?;
    tracing::debug!(
        resource_id,
        dimensions = structure.dimensions().len(),
        "Validating key against structure"
    );
    resolve_key(&structure, key)
}
