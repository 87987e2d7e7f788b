use super::{GraphResolver, VisibilityScope};
use crate::ddg::domain::{DdgModel, VisibleGraph};
use crate::shared::error::DdgError;
use dashmap::DashMap;
use std::sync::Arc;

/// GraphModel pairs one immutable DdgModel with a memo of resolved keys
///
/// Resolution itself is `GraphResolver::resolve`; this type only adds the cache.
/// Cache entries are never evicted, the number of distinct keys visited while a
/// model is on screen is small. Repeated lookups of one key return the same
/// `Arc`, so consumers can skip re-rendering with `Arc::ptr_eq`.
#[derive(Debug)]
pub struct GraphModel {
    model: Arc<DdgModel>,
    cache: DashMap<String, Arc<VisibleGraph>>,
}

impl GraphModel {
    pub fn new(model: Arc<DdgModel>) -> Self {
        Self {
            model,
            cache: DashMap::new(),
        }
    }

    pub fn model(&self) -> &DdgModel {
        &self.model
    }

    /// Resolves `key` into its visible subgraph, reusing a previous result when available
    ///
    /// # Errors
    /// Returns `DdgError::MalformedKey` when the key cannot be decoded; nothing is cached then.
    pub fn get_visible(&self, key: &str) -> Result<Arc<VisibleGraph>, DdgError> {
        if let Some(cached) = self.cache.get(key) {
            return Ok(Arc::clone(cached.value()));
        }

        let graph = Arc::new(GraphResolver::resolve(&self.model, key)?);

        // Another caller may have filled the slot meanwhile; keep whichever landed first.
        let entry = self.cache.entry(key.to_string()).or_insert(graph);
        Ok(Arc::clone(entry.value()))
    }

    /// Key for the default scope: the focal element and two hops either way
    pub fn compute_default_visible_key(&self) -> String {
        VisibilityScope::compute_default_visible_key(&self.model)
    }

    /// Number of memoized keys
    pub fn cached_key_count(&self) -> usize {
        self.cache.len()
    }
}
