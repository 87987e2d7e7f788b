use ddg_vis::prelude::*;
use std::path::Path;

/// Mock PayloadReader that serves an in-memory payload
pub struct MockPayloadReader {
    payload: DdgPayload,
}

impl MockPayloadReader {
    pub fn new(payload: DdgPayload) -> Self {
        Self { payload }
    }

    /// Builds the payload from `(service, operation)` chains
    pub fn from_paths(paths: &[&[(&str, &str)]]) -> Self {
        let payload = paths
            .iter()
            .map(|path| {
                path.iter()
                    .map(|(service, operation)| PayloadEntry::new(*service, *operation))
                    .collect()
            })
            .collect();
        Self::new(payload)
    }
}

impl PayloadReader for MockPayloadReader {
    fn read_payload(&self, _path: &Path) -> Result<DdgPayload> {
        Ok(self.payload.clone())
    }
}
