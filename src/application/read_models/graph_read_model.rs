//! Graph read model for query operations
//!
//! This module provides the main read model struct that aggregates
//! a resolved visible graph in a render-ready format.

use super::vertex_view::{EdgeView, VertexView};

/// Main read model for one rendered view of a deep dependency graph
#[derive(Debug, Clone)]
pub struct GraphReadModel {
    /// Provenance and navigation data for the view
    pub metadata: GraphMetadataView,
    /// Visible vertices, ordered by first visibility index
    pub vertices: Vec<VertexView>,
    /// Visible edges, in path traversal order
    pub edges: Vec<EdgeView>,
    /// Number of key indices that named no element of the model
    pub stale_index_count: usize,
}

/// View representation of the graph metadata
#[derive(Debug, Clone)]
pub struct GraphMetadataView {
    /// Timestamp when the view was rendered
    pub timestamp: String,
    /// Name of the tool that rendered the view
    pub tool_name: String,
    /// Version of the tool
    pub tool_version: String,
    /// Focal node, as `service::operation` (`*` for any operation)
    pub focal: String,
    /// Visibility key the view was resolved from
    pub visibility_key: String,
    /// Navigation query string that reproduces the view
    pub navigation_query: String,
    /// Number of paths in the model
    pub path_count: usize,
    /// Number of path elements in the model
    pub path_elem_count: usize,
}
