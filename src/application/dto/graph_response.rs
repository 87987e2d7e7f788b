use crate::ddg::domain::VisibleGraph;
use crate::ddg::services::GraphModel;
use std::sync::Arc;

/// Where the visibility key of a response came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// The navigation state already carried a valid key
    Navigation,
    /// No key was present; the default key was adopted
    Default,
    /// The key was malformed and the default key replaced it
    FallbackToDefault,
    /// The key was malformed and an empty view was produced
    Empty,
}

/// GraphResponse - Result of resolving one view of a deep dependency graph
///
/// Carries the graph model (with its memo) so adapters can render the
/// resolved graph or resolve further keys against the same model.
#[derive(Debug)]
pub struct GraphResponse {
    /// The model and its memo of resolved keys
    pub graph_model: GraphModel,
    /// The visible graph for `visibility_key`
    pub graph: Arc<VisibleGraph>,
    /// The key the graph was resolved from
    pub visibility_key: String,
    /// Navigation state after resolution, as a query string
    pub navigation_query: String,
    pub key_source: KeySource,
}

impl GraphResponse {
    pub fn new(
        graph_model: GraphModel,
        graph: Arc<VisibleGraph>,
        visibility_key: String,
        navigation_query: String,
        key_source: KeySource,
    ) -> Self {
        Self {
            graph_model,
            graph,
            visibility_key,
            navigation_query,
            key_source,
        }
    }
}
