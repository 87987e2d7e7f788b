//! Vertex and edge view structs for the read model

/// View representation of one visible vertex
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexView {
    /// Identifier unique within the view (`v0`, `v1`, ...), in vertex order
    pub id: String,
    /// Display name, `service::operation`; not unique when names contain `::`
    pub label: String,
    pub service: String,
    pub operation: String,
    /// Whether this vertex is the focal operation
    pub is_focal: bool,
    /// Path elements naming this operation anywhere in the model
    pub occurrence_count: usize,
    /// Path elements naming this operation that are visible in this view
    pub visible_count: usize,
    /// Smallest hop count from the focal element among the visible elements
    pub min_distance: u32,
}

/// View representation of one caller -> callee edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeView {
    /// Identifier of the calling vertex
    pub from: String,
    /// Identifier of the called vertex
    pub to: String,
    /// Visible adjacencies aggregated into this edge
    pub count: usize,
}
