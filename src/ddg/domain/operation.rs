use std::collections::BTreeMap;
use std::fmt;

/// Separator used when a service/operation pair is written as a single token
pub const OPERATION_SEPARATOR: &str = "::";

/// Identity of an operation within a deep dependency graph
///
/// Two path elements naming the same service and operation collapse into one
/// vertex, so this pair is the vertex identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationRef {
    service: String,
    operation: String,
}

impl OperationRef {
    pub fn new(service: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            operation: operation.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }
}

impl fmt::Display for OperationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.service, OPERATION_SEPARATOR, self.operation)
    }
}

/// The focal node every path is anchored on
///
/// When `operation` is `None`, any operation of the focal service counts as focal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocalNode {
    service: String,
    operation: Option<String>,
}

impl FocalNode {
    pub fn new(service: impl Into<String>, operation: Option<String>) -> Self {
        Self {
            service: service.into(),
            operation,
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn operation(&self) -> Option<&str> {
        self.operation.as_deref()
    }

    pub fn matches(&self, service: &str, operation: &str) -> bool {
        self.service == service && self.operation.as_deref().map_or(true, |op| op == operation)
    }
}

impl fmt::Display for FocalNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.service,
            OPERATION_SEPARATOR,
            self.operation.as_deref().unwrap_or("*")
        )
    }
}

/// An operation and the path elements (by visibility index) that instantiate it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdgOperation {
    name: String,
    path_elems: Vec<usize>,
}

impl DdgOperation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path_elems: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Visibility indices of every element naming this operation, ascending
    pub fn path_elems(&self) -> &[usize] {
        &self.path_elems
    }

    pub(crate) fn push_path_elem(&mut self, visibility_idx: usize) {
        self.path_elems.push(visibility_idx);
    }
}

/// A service and its operations, keyed by operation name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdgService {
    name: String,
    operations: BTreeMap<String, DdgOperation>,
}

impl DdgService {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operations: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn operations(&self) -> &BTreeMap<String, DdgOperation> {
        &self.operations
    }

    pub fn operation(&self, name: &str) -> Option<&DdgOperation> {
        self.operations.get(name)
    }

    pub(crate) fn operation_mut(&mut self, name: &str) -> &mut DdgOperation {
        self.operations
            .entry(name.to_string())
            .or_insert_with(|| DdgOperation::new(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_ref_display() {
        let op = OperationRef::new("api", "GET /users");
        assert_eq!(op.to_string(), "api::GET /users");
        assert_eq!(op.service(), "api");
        assert_eq!(op.operation(), "GET /users");
    }

    #[test]
    fn test_operation_ref_ordering_is_service_first() {
        let a = OperationRef::new("a", "z");
        let b = OperationRef::new("b", "a");
        assert!(a < b);
    }

    #[test]
    fn test_focal_node_matches_specific_operation() {
        let focal = FocalNode::new("api", Some("GET".to_string()));
        assert!(focal.matches("api", "GET"));
        assert!(!focal.matches("api", "POST"));
        assert!(!focal.matches("db", "GET"));
    }

    #[test]
    fn test_focal_node_without_operation_matches_any() {
        let focal = FocalNode::new("api", None);
        assert!(focal.matches("api", "GET"));
        assert!(focal.matches("api", "POST"));
        assert!(!focal.matches("db", "GET"));
        assert_eq!(focal.to_string(), "api::*");
    }

    #[test]
    fn test_service_operation_mut_creates_once() {
        let mut service = DdgService::new("api");
        service.operation_mut("GET").push_path_elem(0);
        service.operation_mut("GET").push_path_elem(4);

        assert_eq!(service.operations().len(), 1);
        assert_eq!(service.operation("GET").unwrap().path_elems(), &[0, 4]);
        assert!(service.operation("POST").is_none());
    }
}
