use super::VisibilityCodec;
use crate::ddg::domain::{DdgModel, Edge, Vertex, VisibleGraph, STALE_INDEX_SAMPLE};
use crate::shared::error::DdgError;
use std::collections::{BTreeSet, HashMap};

/// GraphResolver service: turns a visibility key into the vertices and edges to render
///
/// This is a pure function of `(model, key)`; memoization lives in `GraphModel`.
pub struct GraphResolver;

impl GraphResolver {
    /// Decodes `key` and resolves it against `model`
    ///
    /// # Errors
    /// Returns `DdgError::MalformedKey` when the key cannot be decoded.
    /// Indices without an element in `model` are never an error; they are
    /// dropped and counted in `VisibleGraph::stale_index_count`.
    ///
    /// Only indices inside the model are collected, so memory stays bounded by
    /// the model size however long the key is.
    pub fn resolve(model: &DdgModel, key: &str) -> Result<VisibleGraph, DdgError> {
        let elem_count = model.path_elem_count();
        let mut indices = BTreeSet::new();
        let mut stale_indices = Vec::new();
        let mut stale_count = 0;

        VisibilityCodec::decode_each(key, |idx| {
            if idx < elem_count {
                indices.insert(idx);
            } else {
                stale_count += 1;
                if stale_indices.len() < STALE_INDEX_SAMPLE {
                    stale_indices.push(idx);
                }
            }
        })?;

        let (vertices, edges) = Self::build(model, &indices);
        Ok(VisibleGraph::new(vertices, edges, stale_indices).with_stale_index_count(stale_count))
    }

    /// Resolves an already-decoded index set
    ///
    /// 1. Each index is looked up in the element arena; misses are dropped.
    /// 2. Elements sharing a service and operation collapse into one vertex,
    ///    ordered by the lowest visibility index that produced it.
    /// 3. Every path is scanned for adjacent members that are both visible;
    ///    each such pair yields a caller -> callee edge. Repeated vertex pairs
    ///    bump the existing edge's count instead of adding a new edge.
    pub fn resolve_indices(model: &DdgModel, indices: &BTreeSet<usize>) -> VisibleGraph {
        let stale_indices: Vec<usize> = indices
            .range(model.path_elem_count()..)
            .copied()
            .collect();
        let (vertices, edges) = Self::build(model, indices);
        VisibleGraph::new(vertices, edges, stale_indices)
    }

    fn build(model: &DdgModel, indices: &BTreeSet<usize>) -> (Vec<Vertex>, Vec<Edge>) {
        let mut vertices: Vec<Vertex> = Vec::new();
        let mut vertex_by_operation = HashMap::new();
        let mut vertex_of_elem: Vec<Option<usize>> = vec![None; model.path_elem_count()];

        for &idx in indices {
            let Some(elem) = model.path_elem(idx) else {
                continue;
            };

            let vertex_idx = *vertex_by_operation
                .entry(elem.operation_ref())
                .or_insert_with(|| {
                    vertices.push(Vertex::new(elem.operation_ref().clone(), Vec::new()));
                    vertices.len() - 1
                });
            vertices[vertex_idx].push_elem(idx);
            vertex_of_elem[idx] = Some(vertex_idx);
        }

        let mut edges: Vec<Edge> = Vec::new();
        let mut edge_by_vertices: HashMap<(usize, usize), usize> = HashMap::new();

        for path in model.paths() {
            for pair in path.members().windows(2) {
                let (Some(from), Some(to)) = (vertex_of_elem[pair[0]], vertex_of_elem[pair[1]])
                else {
                    continue;
                };

                match edge_by_vertices.get(&(from, to)) {
                    Some(&edge_idx) => edges[edge_idx].increment(),
                    None => {
                        edge_by_vertices.insert((from, to), edges.len());
                        edges.push(Edge::new(
                            vertices[from].key().clone(),
                            vertices[to].key().clone(),
                            1,
                        ));
                    }
                }
            }
        }

        (vertices, edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ddg::domain::{DdgPath, FocalNode, OperationRef, PathElem};

    /// Builds a model from `(focal_idx, members)` paths with visibility
    /// indices assigned in path order.
    fn model_from(paths: Vec<(usize, Vec<(&str, &str)>)>) -> DdgModel {
        let mut elems = Vec::new();
        let mut ddg_paths = Vec::new();
        for (path_idx, (focal_idx, members)) in paths.into_iter().enumerate() {
            let mut member_indices = Vec::new();
            for (member_idx, (service, op)) in members.into_iter().enumerate() {
                let vis = elems.len();
                let distance = member_idx as i32 - focal_idx as i32;
                elems.push(PathElem::new(
                    OperationRef::new(service, op),
                    distance,
                    vis,
                    path_idx,
                    member_idx,
                ));
                member_indices.push(vis);
            }
            ddg_paths.push(DdgPath::new(focal_idx, member_indices));
        }
        DdgModel::from_parts(FocalNode::new("A", None), ddg_paths, elems).unwrap()
    }

    fn all(model: &DdgModel) -> BTreeSet<usize> {
        (0..model.path_elem_count()).collect()
    }

    #[test]
    fn test_resolve_empty_key_gives_empty_graph() {
        let model = model_from(vec![(0, vec![("A", "op1"), ("B", "op2")])]);
        let graph = GraphResolver::resolve(&model, "A").unwrap();

        assert!(graph.vertices().is_empty());
        assert!(graph.edges().is_empty());
        assert!(graph.stale_indices().is_empty());
    }

    #[test]
    fn test_resolve_propagates_malformed_key() {
        let model = model_from(vec![(0, vec![("A", "op1")])]);
        let err = GraphResolver::resolve(&model, "not valid!").unwrap_err();
        assert!(err.is_malformed_key());
    }

    #[test]
    fn test_same_operation_at_different_distances_is_one_vertex() {
        // A -> B -> A: the focal op reappears two hops downstream
        let model = model_from(vec![(0, vec![("A", "op1"), ("B", "op2"), ("A", "op1")])]);
        let graph = GraphResolver::resolve_indices(&model, &all(&model));

        assert_eq!(graph.vertices().len(), 2);
        assert_eq!(graph.vertices()[0].key(), &OperationRef::new("A", "op1"));
        assert_eq!(graph.vertices()[0].elems(), &[0, 2]);
        assert_eq!(graph.vertices()[1].key(), &OperationRef::new("B", "op2"));

        assert_eq!(graph.edges().len(), 2);
        assert_eq!(graph.edges()[0].from(), &OperationRef::new("A", "op1"));
        assert_eq!(graph.edges()[0].to(), &OperationRef::new("B", "op2"));
        assert_eq!(graph.edges()[1].from(), &OperationRef::new("B", "op2"));
        assert_eq!(graph.edges()[1].to(), &OperationRef::new("A", "op1"));
    }

    #[test]
    fn test_same_adjacency_on_two_paths_aggregates_count() {
        let model = model_from(vec![
            (1, vec![("B", "op2"), ("A", "op1")]),
            (1, vec![("B", "op2"), ("A", "op1"), ("C", "op3")]),
        ]);
        let graph = GraphResolver::resolve_indices(&model, &all(&model));

        assert_eq!(graph.vertices().len(), 3);
        assert_eq!(graph.edges().len(), 2);
        let b_to_a = &graph.edges()[0];
        assert_eq!(b_to_a.from(), &OperationRef::new("B", "op2"));
        assert_eq!(b_to_a.to(), &OperationRef::new("A", "op1"));
        assert_eq!(b_to_a.count(), 2);
        assert_eq!(graph.edges()[1].count(), 1);
    }

    #[test]
    fn test_edges_need_both_endpoints_visible() {
        let model = model_from(vec![(0, vec![("A", "op1"), ("B", "op2"), ("C", "op3")])]);
        // A and C are visible, B (the middle hop) is not
        let graph = GraphResolver::resolve_indices(&model, &[0, 2].into_iter().collect());

        assert_eq!(graph.vertices().len(), 2);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_edges_follow_path_traversal_order() {
        let model = model_from(vec![(2, vec![("C", "op3"), ("B", "op2"), ("A", "op1")])]);
        let graph = GraphResolver::resolve_indices(&model, &all(&model));

        let edges: Vec<(String, String)> = graph
            .edges()
            .iter()
            .map(|e| (e.from().to_string(), e.to().to_string()))
            .collect();
        assert_eq!(
            edges,
            vec![
                ("C::op3".to_string(), "B::op2".to_string()),
                ("B::op2".to_string(), "A::op1".to_string()),
            ]
        );
    }

    #[test]
    fn test_stale_indices_are_dropped() {
        let model = model_from(vec![(0, vec![("A", "op1"), ("B", "op2")])]);
        let key = VisibilityCodec::encode([0, 1, 2, 40]);
        let graph = GraphResolver::resolve(&model, &key).unwrap();

        assert_eq!(graph.vertices().len(), 2);
        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.stale_indices(), &[2, 40]);
    }

    #[test]
    fn test_only_stale_indices_gives_empty_graph() {
        let model = model_from(vec![(0, vec![("A", "op1")])]);
        let graph = GraphResolver::resolve(&model, &VisibilityCodec::encode([7])).unwrap();

        assert!(graph.is_empty());
        assert_eq!(graph.stale_indices(), &[7]);
    }

    #[test]
    fn test_longest_key_on_small_model_keeps_stale_report_bounded() {
        use crate::ddg::domain::STALE_INDEX_SAMPLE;
        use crate::ddg::services::MAX_KEY_LENGTH;

        let model = model_from(vec![(0, vec![("A", "op1"), ("B", "op2")])]);
        let key = "_".repeat(MAX_KEY_LENGTH);
        let graph = GraphResolver::resolve(&model, &key).unwrap();

        assert_eq!(graph.vertices().len(), 2);
        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.stale_index_count(), MAX_KEY_LENGTH * 6 - 2);
        assert_eq!(graph.stale_indices().len(), STALE_INDEX_SAMPLE);
        assert_eq!(graph.stale_indices()[0], 2);
    }

    #[test]
    fn test_resolve_indices_reports_out_of_range_indices() {
        let model = model_from(vec![(0, vec![("A", "op1")])]);
        let graph = GraphResolver::resolve_indices(&model, &[0, 3, 9].into_iter().collect());

        assert_eq!(graph.vertices().len(), 1);
        assert_eq!(graph.stale_indices(), &[3, 9]);
        assert_eq!(graph.stale_index_count(), 2);
    }

    #[test]
    fn test_self_loop_adjacency() {
        let model = model_from(vec![(0, vec![("A", "op1"), ("A", "op1")])]);
        let graph = GraphResolver::resolve_indices(&model, &all(&model));

        assert_eq!(graph.vertices().len(), 1);
        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.edges()[0].from(), graph.edges()[0].to());
    }
}
