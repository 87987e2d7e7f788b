use super::OperationRef;

/// PathElem value object: one occurrence of an operation within one path
///
/// Elements live in the model's arena (`DdgModel::path_elems`) at the position
/// equal to their `visibility_idx`; everything else refers to them by that index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathElem {
    operation: OperationRef,
    distance: i32,
    visibility_idx: usize,
    path_idx: usize,
    member_idx: usize,
}

impl PathElem {
    pub fn new(
        operation: OperationRef,
        distance: i32,
        visibility_idx: usize,
        path_idx: usize,
        member_idx: usize,
    ) -> Self {
        Self {
            operation,
            distance,
            visibility_idx,
            path_idx,
            member_idx,
        }
    }

    pub fn service(&self) -> &str {
        self.operation.service()
    }

    pub fn operation(&self) -> &str {
        self.operation.operation()
    }

    pub fn operation_ref(&self) -> &OperationRef {
        &self.operation
    }

    /// Signed hop count from the focal element (negative = upstream)
    pub fn distance(&self) -> i32 {
        self.distance
    }

    pub fn visibility_idx(&self) -> usize {
        self.visibility_idx
    }

    /// Index of the owning path in `DdgModel::paths`
    pub fn path_idx(&self) -> usize {
        self.path_idx
    }

    /// Position of this element within its owning path
    pub fn member_idx(&self) -> usize {
        self.member_idx
    }
}

/// An ordered caller -> callee chain anchored on the focal element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdgPath {
    focal_idx: usize,
    members: Vec<usize>,
}

impl DdgPath {
    pub fn new(focal_idx: usize, members: Vec<usize>) -> Self {
        Self { focal_idx, members }
    }

    /// Position of the focal element within `members`
    pub fn focal_idx(&self) -> usize {
        self.focal_idx
    }

    /// Visibility indices of the members, in traversal order
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_elem_accessors() {
        let elem = PathElem::new(OperationRef::new("db", "query"), -2, 7, 1, 0);

        assert_eq!(elem.service(), "db");
        assert_eq!(elem.operation(), "query");
        assert_eq!(elem.distance(), -2);
        assert_eq!(elem.visibility_idx(), 7);
        assert_eq!(elem.path_idx(), 1);
        assert_eq!(elem.member_idx(), 0);
        assert_eq!(elem.operation_ref(), &OperationRef::new("db", "query"));
    }

    #[test]
    fn test_ddg_path_accessors() {
        let path = DdgPath::new(1, vec![3, 0, 5]);
        assert_eq!(path.focal_idx(), 1);
        assert_eq!(path.members(), &[3, 0, 5]);
        assert_eq!(path.len(), 3);
        assert!(!path.is_empty());
    }
}
