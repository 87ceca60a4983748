//! In-process response memoization.

use std::collections::HashMap;
use std::sync::Arc;

use sdmx_types::Response;

/// Responses keyed by caller-supplied token.
///
/// Unbounded and without expiry; entries live as long as the owning client.
#[derive(Debug)]
pub struct ResponseCache<M> {
    entries: HashMap<String, Arc<Response<M>>>,
}

impl<M> ResponseCache<M> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Returns the response stored under `token`.
    #[must_use]
    pub fn get(&self, token: &str) -> Option<Arc<Response<M>>> {
        self.entries.get(token).cloned()
    }

    /// Stores `response` under `token`, replacing any previous entry.
    pub fn put(&mut self, token: impl Into<String>, response: Arc<Response<M>>) {
        self.entries.insert(token.into(), response);
    }

    /// Returns true if a response is stored under `token`.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    /// Returns the number of cached responses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<M> Default for ResponseCache<M> {
    fn default() -> Self {
        Self::new()
    }
}
