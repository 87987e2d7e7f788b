use crate::application::read_models::GraphReadModel;
use crate::shared::Result;

/// GraphFormatter port for rendering a resolved visible graph
///
/// Implementations turn the flattened read model into a document
/// (JSON, Markdown tables, Graphviz DOT). Layout is left to the consumer.
pub trait GraphFormatter {
    /// Formats the visible graph
    ///
    /// # Arguments
    /// * `model` - Read model holding metadata, vertex views and edge views
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, model: &GraphReadModel) -> Result<String>;
}
