//! Builder for constructing GraphReadModel from domain objects
//!
//! This module provides the builder that transforms a model and one of its
//! resolved visible graphs into the render-ready read model.

use super::graph_read_model::{GraphMetadataView, GraphReadModel};
use super::vertex_view::{EdgeView, VertexView};
use crate::ddg::domain::{DdgModel, OperationRef, Vertex, VisibleGraph};
use chrono::Utc;
use std::collections::HashMap;

/// Tool name recorded in rendered documents
pub const TOOL_NAME: &str = "ddg-vis";

/// Builder for constructing GraphReadModel from domain objects
pub struct GraphReadModelBuilder;

impl GraphReadModelBuilder {
    /// Builds the read model for one view
    ///
    /// # Arguments
    /// * `model` - The model the graph was resolved against
    /// * `graph` - The resolved visible graph
    /// * `visibility_key` - Key the graph was resolved from
    /// * `navigation_query` - Navigation state that reproduces this view
    pub fn build(
        model: &DdgModel,
        graph: &VisibleGraph,
        visibility_key: &str,
        navigation_query: &str,
    ) -> GraphReadModel {
        // Service and operation names may both contain `::`, so ids are positional
        let ids: HashMap<&OperationRef, String> = graph
            .vertices()
            .iter()
            .enumerate()
            .map(|(position, vertex)| (vertex.key(), Self::vertex_id(position)))
            .collect();

        GraphReadModel {
            metadata: Self::build_metadata(
                model,
                visibility_key,
                navigation_query,
                Utc::now().to_rfc3339(),
            ),
            vertices: graph
                .vertices()
                .iter()
                .enumerate()
                .map(|(position, vertex)| Self::build_vertex(model, vertex, position))
                .collect(),
            edges: graph
                .edges()
                .iter()
                .filter_map(|edge| {
                    Some(EdgeView {
                        from: ids.get(edge.from())?.clone(),
                        to: ids.get(edge.to())?.clone(),
                        count: edge.count(),
                    })
                })
                .collect(),
            stale_index_count: graph.stale_index_count(),
        }
    }

    fn build_metadata(
        model: &DdgModel,
        visibility_key: &str,
        navigation_query: &str,
        timestamp: String,
    ) -> GraphMetadataView {
        GraphMetadataView {
            timestamp,
            tool_name: TOOL_NAME.to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            focal: model.focal().to_string(),
            visibility_key: visibility_key.to_string(),
            navigation_query: navigation_query.to_string(),
            path_count: model.path_count(),
            path_elem_count: model.path_elem_count(),
        }
    }

    fn vertex_id(position: usize) -> String {
        format!("v{}", position)
    }

    fn build_vertex(model: &DdgModel, vertex: &Vertex, position: usize) -> VertexView {
        let occurrence_count = model
            .service(vertex.service())
            .and_then(|service| service.operation(vertex.operation()))
            .map_or(0, |operation| operation.path_elems().len());

        let min_distance = vertex
            .elems()
            .iter()
            .filter_map(|&idx| model.path_elem(idx))
            .map(|elem| elem.distance().unsigned_abs())
            .min()
            .unwrap_or(0);

        VertexView {
            id: Self::vertex_id(position),
            label: vertex.key().to_string(),
            service: vertex.service().to_string(),
            operation: vertex.operation().to_string(),
            is_focal: model.focal().matches(vertex.service(), vertex.operation()),
            occurrence_count,
            visible_count: vertex.elems().len(),
            min_distance,
        }
    }
}
