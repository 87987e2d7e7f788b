use super::OperationRef;

/// A vertex of the visible subgraph: one operation, however many times it occurs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    key: OperationRef,
    elems: Vec<usize>,
}

impl Vertex {
    pub fn new(key: OperationRef, elems: Vec<usize>) -> Self {
        Self { key, elems }
    }

    pub fn key(&self) -> &OperationRef {
        &self.key
    }

    pub fn service(&self) -> &str {
        self.key.service()
    }

    pub fn operation(&self) -> &str {
        self.key.operation()
    }

    /// Visibility indices of the visible elements collapsed into this vertex
    pub fn elems(&self) -> &[usize] {
        &self.elems
    }

    pub(crate) fn push_elem(&mut self, visibility_idx: usize) {
        self.elems.push(visibility_idx);
    }
}

/// A directed caller -> callee edge; `count` is the number of visible
/// adjacencies across all paths that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    from: OperationRef,
    to: OperationRef,
    count: usize,
}

impl Edge {
    pub fn new(from: OperationRef, to: OperationRef, count: usize) -> Self {
        Self { from, to, count }
    }

    pub fn from(&self) -> &OperationRef {
        &self.from
    }

    pub fn to(&self) -> &OperationRef {
        &self.to
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn increment(&mut self) {
        self.count += 1;
    }
}

/// Stale indices kept for reporting; the rest are only counted
pub const STALE_INDEX_SAMPLE: usize = 32;

/// VisibleGraph value object: the deduplicated vertices and aggregated edges
/// resolved from one visibility key
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisibleGraph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    stale_indices: Vec<usize>,
    stale_index_count: usize,
}

impl VisibleGraph {
    /// Keeps the first `STALE_INDEX_SAMPLE` of `stale_indices`
    pub fn new(vertices: Vec<Vertex>, edges: Vec<Edge>, mut stale_indices: Vec<usize>) -> Self {
        let stale_index_count = stale_indices.len();
        stale_indices.truncate(STALE_INDEX_SAMPLE);
        Self {
            vertices,
            edges,
            stale_indices,
            stale_index_count,
        }
    }

    /// Overrides the stale count when more indices were dropped than sampled
    pub fn with_stale_index_count(mut self, count: usize) -> Self {
        self.stale_index_count = count.max(self.stale_indices.len());
        self
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Vertices in order of first appearance
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Edges in order of first appearance
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The lowest decoded indices that had no element in the model and were
    /// dropped, at most `STALE_INDEX_SAMPLE` of them
    pub fn stale_indices(&self) -> &[usize] {
        &self.stale_indices
    }

    /// How many decoded indices were dropped in total
    pub fn stale_index_count(&self) -> usize {
        self.stale_index_count
    }

    pub fn vertex(&self, key: &OperationRef) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.key() == key)
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
