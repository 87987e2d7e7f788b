use crate::adapters::outbound::formatters::{DotFormatter, JsonFormatter, MarkdownFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::GraphFormatter;

/// Factory for creating graph formatters
///
/// Selects the formatter adapter for an output format. It belongs in the
/// application layer as it picks infrastructure adapters on behalf of the CLI.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use ddg_vis::application::dto::OutputFormat;
    /// use ddg_vis::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Dot);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn GraphFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new()),
            OutputFormat::Dot => Box::new(DotFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use ddg_vis::application::dto::OutputFormat;
    /// use ddg_vis::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Json);
    /// assert_eq!(message, "📝 Generating JSON graph output...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Json => "📝 Generating JSON graph output...",
            OutputFormat::Markdown => "📝 Generating Markdown graph output...",
            OutputFormat::Dot => "📝 Generating Graphviz DOT output...",
        }
    }
}
