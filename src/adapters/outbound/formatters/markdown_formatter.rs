use crate::application::read_models::{EdgeView, GraphMetadataView, GraphReadModel, VertexView};
use crate::ports::outbound::GraphFormatter;
use crate::shared::Result;
use std::collections::HashMap;

/// Markdown table header for vertices
const VERTEX_TABLE_HEADER: &str = "| Id | Service | Operation | Hops | Visible | Occurrences |\n";

/// Markdown table separator line for vertices
const VERTEX_TABLE_SEPARATOR: &str = "|----|---------|-----------|------|---------|-------------|\n";

/// Markdown table header for edges
const EDGE_TABLE_HEADER: &str = "| Caller | Callee | Count |\n";

/// Markdown table separator line for edges
const EDGE_TABLE_SEPARATOR: &str = "|--------|--------|-------|\n";

/// MarkdownFormatter adapter for rendering the visible graph as Markdown tables
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, metadata: &GraphMetadataView) {
        output.push_str("# Deep Dependency Graph\n\n");
        output.push_str(&format!(
            "- **Focal operation:** `{}`\n",
            metadata.focal
        ));
        output.push_str(&format!(
            "- **Visibility key:** `{}`\n",
            metadata.visibility_key
        ));
        if !metadata.navigation_query.is_empty() {
            output.push_str(&format!(
                "- **Navigation query:** `?{}`\n",
                metadata.navigation_query
            ));
        }
        output.push_str(&format!(
            "- **Model:** {} path(s), {} path element(s)\n",
            metadata.path_count, metadata.path_elem_count
        ));
        output.push_str(&format!(
            "- **Generated:** {} by {} {}\n\n",
            metadata.timestamp, metadata.tool_name, metadata.tool_version
        ));
    }

    fn render_vertices(&self, output: &mut String, vertices: &[VertexView]) {
        output.push_str("## Operations\n\n");
        if vertices.is_empty() {
            output.push_str("*No visible operations*\n\n");
            return;
        }

        output.push_str(VERTEX_TABLE_HEADER);
        output.push_str(VERTEX_TABLE_SEPARATOR);
        for vertex in vertices {
            let operation = if vertex.is_focal {
                format!(
                    "**{}** (focal)",
                    Self::escape_markdown_table_cell(&vertex.operation)
                )
            } else {
                Self::escape_markdown_table_cell(&vertex.operation)
            };
            output.push_str(&format!(
                "| `{}` | {} | {} | {} | {} | {} |\n",
                vertex.id,
                Self::escape_markdown_table_cell(&vertex.service),
                operation,
                vertex.min_distance,
                vertex.visible_count,
                vertex.occurrence_count
            ));
        }
        output.push('\n');
    }

    /// Names an edge endpoint by id and label; labels alone can be ambiguous
    fn endpoint_cell(id: &str, labels: &HashMap<&str, &str>) -> String {
        match labels.get(id) {
            Some(label) => format!("`{}` {}", id, Self::escape_markdown_table_cell(label)),
            None => format!("`{}`", id),
        }
    }

    fn render_edges(&self, output: &mut String, edges: &[EdgeView], vertices: &[VertexView]) {
        output.push_str("## Calls\n\n");
        if edges.is_empty() {
            output.push_str("*No visible calls*\n\n");
            return;
        }

        let labels: HashMap<&str, &str> = vertices
            .iter()
            .map(|v| (v.id.as_str(), v.label.as_str()))
            .collect();

        output.push_str(EDGE_TABLE_HEADER);
        output.push_str(EDGE_TABLE_SEPARATOR);
        for edge in edges {
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                Self::endpoint_cell(&edge.from, &labels),
                Self::endpoint_cell(&edge.to, &labels),
                edge.count
            ));
        }
        output.push('\n');
    }

    fn render_stale_notice(&self, output: &mut String, stale_index_count: usize) {
        if stale_index_count > 0 {
            output.push_str(&format!(
                "> ⚠️ {} index(es) in the visibility key did not match this graph and were ignored.\n\n",
                stale_index_count
            ));
        }
    }
}

impl GraphFormatter for MarkdownFormatter {
    fn format(&self, model: &GraphReadModel) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output, &model.metadata);
        self.render_vertices(&mut output, &model.vertices);
        self.render_edges(&mut output, &model.edges, &model.vertices);
        self.render_stale_notice(&mut output, model.stale_index_count);

        Ok(output)
    }
}
