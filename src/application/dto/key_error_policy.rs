/// What to do when the navigation state carries a key that cannot be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyErrorPolicy {
    /// Show the default view and rewrite the navigation state to its key
    #[default]
    FallbackToDefault,
    /// Show an empty graph and leave the navigation state alone
    Empty,
    /// Fail with the malformed-key error
    Strict,
}

impl std::str::FromStr for KeyErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" | "fallback" => Ok(KeyErrorPolicy::FallbackToDefault),
            "empty" => Ok(KeyErrorPolicy::Empty),
            "strict" => Ok(KeyErrorPolicy::Strict),
            _ => Err(format!(
                "Invalid malformed-key policy: {}. Please specify 'default', 'empty' or 'strict'",
                s
            )),
        }
    }
}

impl std::fmt::Display for KeyErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyErrorPolicy::FallbackToDefault => write!(f, "default"),
            KeyErrorPolicy::Empty => write!(f, "empty"),
            KeyErrorPolicy::Strict => write!(f, "strict"),
        }
    }
}
