/// Type alias for Result with anyhow::Error as the error type.
/// Resolution-core functions that callers must match on return `DdgError` directly.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
