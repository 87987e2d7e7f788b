use crate::ddg::domain::DdgPayload;
use crate::shared::Result;
use std::path::Path;

/// PayloadReader port for loading materialized DDG path data
///
/// Fetching and materializing the paths happens elsewhere; this port only
/// hands the already-materialized payload to the application core.
pub trait PayloadReader {
    /// Reads and parses the payload stored at `path`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or is not a regular file
    /// - The file cannot be read
    /// - The content is not a valid payload
    fn read_payload(&self, path: &Path) -> Result<DdgPayload>;
}
