use crate::application::read_models::{EdgeView, GraphMetadataView, GraphReadModel, VertexView};
use crate::ports::outbound::GraphFormatter;
use crate::shared::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct GraphDocument<'a> {
    metadata: Metadata<'a>,
    vertices: Vec<Vertex<'a>>,
    edges: Vec<Edge<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Metadata<'a> {
    timestamp: &'a str,
    tool: Tool<'a>,
    focal: &'a str,
    visibility_key: &'a str,
    navigation_query: &'a str,
    path_count: usize,
    path_elem_count: usize,
    #[serde(skip_serializing_if = "is_zero")]
    stale_index_count: usize,
}

#[derive(Debug, Serialize)]
struct Tool<'a> {
    name: &'a str,
    version: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Vertex<'a> {
    id: &'a str,
    label: &'a str,
    service: &'a str,
    operation: &'a str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    focal: bool,
    occurrences: usize,
    visible_occurrences: usize,
    min_distance: u32,
}

#[derive(Debug, Serialize)]
struct Edge<'a> {
    from: &'a str,
    to: &'a str,
    count: usize,
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}

/// JsonFormatter adapter for rendering the visible graph as a JSON document
///
/// The document carries the navigation query so a consumer can link back
/// to the exact view.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn build_metadata<'a>(metadata: &'a GraphMetadataView, stale: usize) -> Metadata<'a> {
        Metadata {
            timestamp: &metadata.timestamp,
            tool: Tool {
                name: &metadata.tool_name,
                version: &metadata.tool_version,
            },
            focal: &metadata.focal,
            visibility_key: &metadata.visibility_key,
            navigation_query: &metadata.navigation_query,
            path_count: metadata.path_count,
            path_elem_count: metadata.path_elem_count,
            stale_index_count: stale,
        }
    }

    fn build_vertex(vertex: &VertexView) -> Vertex<'_> {
        Vertex {
            id: &vertex.id,
            label: &vertex.label,
            service: &vertex.service,
            operation: &vertex.operation,
            focal: vertex.is_focal,
            occurrences: vertex.occurrence_count,
            visible_occurrences: vertex.visible_count,
            min_distance: vertex.min_distance,
        }
    }

    fn build_edge(edge: &EdgeView) -> Edge<'_> {
        Edge {
            from: &edge.from,
            to: &edge.to,
            count: edge.count,
        }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphFormatter for JsonFormatter {
    fn format(&self, model: &GraphReadModel) -> Result<String> {
        let document = GraphDocument {
            metadata: Self::build_metadata(&model.metadata, model.stale_index_count),
            vertices: model.vertices.iter().map(Self::build_vertex).collect(),
            edges: model.edges.iter().map(Self::build_edge).collect(),
        };

        Ok(serde_json::to_string_pretty(&document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::formatters::test_support::sample_read_model;

    #[test]
    fn test_json_document_shape() {
        let output = JsonFormatter::new().format(&sample_read_model()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["metadata"]["tool"]["name"], "ddg-vis");
        assert_eq!(json["metadata"]["focal"], "A::op1");
        assert_eq!(json["metadata"]["visibilityKey"], "H");
        assert_eq!(
            json["metadata"]["navigationQuery"],
            "service=A&operation=op1&visibilityKey=H"
        );
        assert!(json["metadata"].get("staleIndexCount").is_none());

        let vertices = json["vertices"].as_array().unwrap();
        assert_eq!(vertices.len(), 2);
        assert_eq!(vertices[0]["id"], "v0");
        assert_eq!(vertices[0]["label"], "A::op1");
        assert_eq!(vertices[0]["service"], "A");
        assert_eq!(vertices[0]["focal"], true);
        assert!(vertices[1].get("focal").is_none());
        assert_eq!(vertices[1]["minDistance"], 1);

        let edges = json["edges"].as_array().unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0]["from"], "v1");
        assert_eq!(edges[0]["to"], "v0");
        assert_eq!(edges[0]["count"], 1);
    }

    #[test]
    fn test_json_reports_stale_indices() {
        let mut model = sample_read_model();
        model.stale_index_count = 3;

        let output = JsonFormatter::new().format(&model).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["metadata"]["staleIndexCount"], 3);
    }

    #[test]
    fn test_json_empty_graph() {
        let mut model = sample_read_model();
        model.vertices.clear();
        model.edges.clear();

        let output = JsonFormatter::default().format(&model).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["vertices"], serde_json::json!([]));
        assert_eq!(json["edges"], serde_json::json!([]));
    }
}
