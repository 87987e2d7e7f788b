use crate::application::read_models::GraphReadModel;
use crate::ports::outbound::GraphFormatter;
use crate::shared::Result;

/// DotFormatter adapter for rendering the visible graph as Graphviz DOT
///
/// Only vertices and edges are emitted; layout is left to Graphviz.
pub struct DotFormatter;

impl DotFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes backslashes and double quotes for a DOT string
    fn escape(text: &str) -> String {
        text.replace('\\', "\\\\").replace('"', "\\\"")
    }

    fn quote(text: &str) -> String {
        format!("\"{}\"", Self::escape(text))
    }
}

impl Default for DotFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphFormatter for DotFormatter {
    fn format(&self, model: &GraphReadModel) -> Result<String> {
        let mut output = String::new();
        output.push_str("digraph ddg {\n");
        output.push_str(&format!(
            "  label={};\n",
            Self::quote(&format!(
                "{} [{}]",
                model.metadata.focal, model.metadata.visibility_key
            ))
        ));
        output.push_str("  node [shape=box];\n");

        for vertex in &model.vertices {
            let label = format!(
                "\"{}\\n{}\"",
                Self::escape(&vertex.service),
                Self::escape(&vertex.operation)
            );
            let style = if vertex.is_focal {
                ", style=bold"
            } else {
                ""
            };
            output.push_str(&format!(
                "  {} [label={}{}];\n",
                Self::quote(&vertex.id),
                label,
                style
            ));
        }

        for edge in &model.edges {
            let label = if edge.count > 1 {
                format!(" [label=\"{}\"]", edge.count)
            } else {
                String::new()
            };
            output.push_str(&format!(
                "  {} -> {}{};\n",
                Self::quote(&edge.from),
                Self::quote(&edge.to),
                label
            ));
        }

        output.push_str("}\n");
        Ok(output)
    }
}
