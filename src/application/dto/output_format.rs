/// Output format enumeration for rendering a visible graph
///
/// Both the CLI (inbound side) and the formatters (outbound adapters)
/// need to understand this, so it lives in the application layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON document with metadata, vertices and edges (default)
    #[default]
    Json,
    /// Human-readable Markdown tables
    Markdown,
    /// Graphviz DOT, vertices and edges only
    Dot,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "dot" | "graphviz" => Ok(OutputFormat::Dot),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'json', 'markdown' or 'dot'",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Dot => write!(f, "dot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_output_format_from_str_json() {
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_output_format_from_str_markdown() {
        assert_eq!(
            OutputFormat::from_str("markdown").unwrap(),
            OutputFormat::Markdown
        );
        assert_eq!(OutputFormat::from_str("MD").unwrap(), OutputFormat::Markdown);
    }

    #[test]
    fn test_output_format_from_str_dot() {
        assert_eq!(OutputFormat::from_str("dot").unwrap(), OutputFormat::Dot);
        assert_eq!(
            OutputFormat::from_str("Graphviz").unwrap(),
            OutputFormat::Dot
        );
    }

    #[test]
    fn test_output_format_from_str_invalid() {
        let error = OutputFormat::from_str("svg").unwrap_err();
        assert!(error.contains("Invalid format"));
        assert!(error.contains("svg"));
        assert!(error.contains("dot"));
        assert!(OutputFormat::from_str("").is_err());
    }

    #[test]
    fn test_output_format_display_round_trips() {
        for format in [OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Dot] {
            assert_eq!(OutputFormat::from_str(&format.to_string()).unwrap(), format);
        }
    }

    #[test]
    fn test_output_format_default_is_json() {
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
    }
}
