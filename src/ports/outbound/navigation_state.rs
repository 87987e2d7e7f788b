use crate::shared::error::DdgError;

/// NavigationState port: where the current visibility key lives between views
///
/// Typically a URL query string. Writing the key is explicit and always goes
/// through `replace_visibility_key`; nothing else in the core mutates it.
pub trait NavigationState {
    /// The visibility key currently recorded, if any
    fn visibility_key(&self) -> Option<String>;

    /// Replaces the recorded visibility key, leaving all other state untouched
    ///
    /// # Errors
    /// Returns an error if the key cannot be recorded
    fn replace_visibility_key(&mut self, key: &str) -> Result<(), DdgError>;

    /// Serialized form of the current state, suitable for sharing
    fn to_query_string(&self) -> String;
}
