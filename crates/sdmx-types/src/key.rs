//! Series selection keys.

use std::collections::BTreeMap;

/// Selection of dimension values, keyed by dimension name.
///
/// Each dimension may list several values; a single value may also carry
/// `+`-joined alternatives (`"A+Q"`), as in the wire form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DimensionKey {
    values: BTreeMap<String, Vec<String>>,
}

impl DimensionKey {
    /// Creates an empty key.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds values for a dimension, replacing any previous selection for it.
    #[must_use]
    pub fn with<I, S>(mut self, dimension: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(dimension, values);
        self
    }

    /// Sets values for a dimension, replacing any previous selection for it.
    pub fn insert<I, S>(&mut self, dimension: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values
            .insert(dimension.into(), values.into_iter().map(Into::into).collect());
    }

    /// Returns the values selected for a dimension, with `+` alternatives split out.
    pub fn values(&self, dimension: &str) -> impl Iterator<Item = &str> {
        self.values
            .get(dimension)
            .into_iter()
            .flatten()
            .flat_map(|v| v.split('+'))
            .filter(|v| !v.is_empty())
    }

    /// Returns the selected dimension names.
    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Returns true if no dimension is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for DimensionKey
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut key = Self::new();
        for (dimension, value) in iter {
            key.values
                .entry(dimension.into())
                .or_default()
                .push(value.into());
        }
        key
    }
}

/// Key part of a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Already in wire form (`"A.FR+DE"`); passed through verbatim.
    Raw(String),
    /// Structured selection, validated against the data structure before use.
    Dimensions(DimensionKey),
}

impl Key {
    /// Returns true if the key selects nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Raw(s) => s.is_empty(),
            Self::Dimensions(d) => d.is_empty(),
        }
    }
}

impl Default for Key {
    fn default() -> Self {
        Self::Raw(String::new())
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Raw(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Raw(s)
    }
}

impl From<DimensionKey> for Key {
    fn from(key: DimensionKey) -> Self {
        Self::Dimensions(key)
    }
}
