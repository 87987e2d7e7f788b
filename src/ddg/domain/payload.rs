use serde::{Deserialize, Serialize};

/// One hop of a materialized payload path
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PayloadEntry {
    pub service: String,
    pub operation: String,
}

impl PayloadEntry {
    pub fn new(service: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            operation: operation.into(),
        }
    }
}

/// Already-materialized path data: each path is an ordered caller -> callee chain
pub type DdgPayload = Vec<Vec<PayloadEntry>>;
