use crate::ddg::domain::{
    DdgModel, DdgPath, DdgPayload, FocalNode, OperationRef, PathElem, PayloadEntry,
};
use crate::shared::error::DdgError;
use std::cmp::Ordering;

/// DdgModelBuilder service: turns materialized path data into a DdgModel
///
/// Pure business logic with no I/O. The same payload and focal node always
/// produce the same visibility indices, so keys stay valid across reloads.
pub struct DdgModelBuilder;

impl DdgModelBuilder {
    /// Builds a model from `payload`, anchoring every path on `focal`
    ///
    /// # Arguments
    /// * `payload` - Paths as ordered caller -> callee chains
    /// * `focal` - The focal service and optional operation
    ///
    /// # Errors
    /// * `DdgError::EmptyPayload` - the payload has no paths
    /// * `DdgError::FocalNodeMissing` - a path never passes through the focal node
    /// * `DdgError::InvalidModel` - a path is too long for signed 32-bit distances
    pub fn build(payload: &DdgPayload, focal: &FocalNode) -> Result<DdgModel, DdgError> {
        Self::build_with(payload, focal, |_, _| {})
    }

    /// Same as `build`, calling `on_path(current, total)` as each path is anchored
    pub fn build_with<F>(
        payload: &DdgPayload,
        focal: &FocalNode,
        mut on_path: F,
    ) -> Result<DdgModel, DdgError>
    where
        F: FnMut(usize, usize),
    {
        if payload.is_empty() {
            return Err(DdgError::EmptyPayload);
        }

        let total = payload.len();
        let mut anchored: Vec<(&[PayloadEntry], usize)> = Vec::with_capacity(total);
        for (path_index, path) in payload.iter().enumerate() {
            let focal_idx = path
                .iter()
                .position(|entry| focal.matches(&entry.service, &entry.operation))
                .ok_or_else(|| DdgError::FocalNodeMissing {
                    path_index,
                    service: focal.service().to_string(),
                    operation: focal.operation().unwrap_or("*").to_string(),
                })?;
            anchored.push((path.as_slice(), focal_idx));
            on_path(path_index + 1, total);
        }

        // Stable, so identical paths keep their payload order
        anchored.sort_by(|(a, _), (b, _)| compare_paths(a, b));

        let mut slots: Vec<Slot> = Vec::new();
        for (path_idx, (members, focal_idx)) in anchored.iter().enumerate() {
            for member_idx in 0..members.len() {
                let distance = member_idx as i64 - *focal_idx as i64;
                let distance = i32::try_from(distance).map_err(|_| DdgError::InvalidModel {
                    reason: format!(
                        "path {} is too long: member {} is {} hops from the focal node",
                        path_idx, member_idx, distance
                    ),
                })?;
                slots.push(Slot {
                    distance,
                    path_idx,
                    member_idx,
                });
            }
        }

        // |d| ascending, upstream before downstream, then path and member order.
        // The default ±2 scope is then a prefix of the index space.
        slots.sort_by_key(|slot| {
            (
                slot.distance.unsigned_abs(),
                slot.distance > 0,
                slot.path_idx,
                slot.member_idx,
            )
        });

        let mut members_by_path: Vec<Vec<usize>> = anchored
            .iter()
            .map(|(members, _)| vec![0; members.len()])
            .collect();
        let mut path_elems = Vec::with_capacity(slots.len());
        for (visibility_idx, slot) in slots.into_iter().enumerate() {
            let (members, _) = anchored[slot.path_idx];
            let entry = &members[slot.member_idx];
            members_by_path[slot.path_idx][slot.member_idx] = visibility_idx;
            path_elems.push(PathElem::new(
                OperationRef::new(entry.service.as_str(), entry.operation.as_str()),
                slot.distance,
                visibility_idx,
                slot.path_idx,
                slot.member_idx,
            ));
        }

        let paths = anchored
            .iter()
            .zip(members_by_path)
            .map(|((_, focal_idx), members)| DdgPath::new(*focal_idx, members))
            .collect();

        DdgModel::from_parts(focal.clone(), paths, path_elems)
    }
}

struct Slot {
    distance: i32,
    path_idx: usize,
    member_idx: usize,
}

fn compare_paths(a: &[PayloadEntry], b: &[PayloadEntry]) -> Ordering {
    a.iter()
        .map(|e| (e.service.as_str(), e.operation.as_str()))
        .cmp(b.iter().map(|e| (e.service.as_str(), e.operation.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ddg::services::{GraphResolver, VisibilityCodec, VisibilityScope};
    use std::collections::BTreeSet;

    fn entry(service: &str, operation: &str) -> PayloadEntry {
        PayloadEntry::new(service, operation)
    }

    fn focal_a() -> FocalNode {
        FocalNode::new("A", Some("op1".to_string()))
    }

    #[test]
    fn test_build_worked_example() {
        let payload = vec![
            vec![entry("A", "op1")],
            vec![entry("B", "op2"), entry("A", "op1")],
        ];
        let model = DdgModelBuilder::build(&payload, &focal_a()).unwrap();

        assert_eq!(model.path_count(), 2);
        assert_eq!(model.path_elem_count(), 3);
        assert_eq!(model.distance_to_path_elems()[&0], vec![0, 1]);
        assert_eq!(model.distance_to_path_elems()[&-1], vec![2]);

        let key = VisibilityScope::compute_default_visible_key(&model);
        assert_eq!(
            VisibilityCodec::decode(&key).unwrap(),
            (0..3).collect::<BTreeSet<usize>>()
        );

        let graph = GraphResolver::resolve(&model, &key).unwrap();
        assert_eq!(graph.vertices().len(), 2);
        assert_eq!(graph.vertices()[0].key(), &OperationRef::new("A", "op1"));
        assert_eq!(graph.vertices()[1].key(), &OperationRef::new("B", "op2"));
        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.edges()[0].from(), &OperationRef::new("B", "op2"));
        assert_eq!(graph.edges()[0].count(), 1);
    }

    #[test]
    fn test_distance_is_position_minus_focal() {
        let payload = vec![vec![
            entry("C", "op3"),
            entry("B", "op2"),
            entry("A", "op1"),
            entry("D", "op4"),
        ]];
        let model = DdgModelBuilder::build(&payload, &focal_a()).unwrap();

        let distances: Vec<(String, i32)> = model.paths()[0]
            .members()
            .iter()
            .map(|&idx| {
                let elem = model.path_elem(idx).unwrap();
                (elem.service().to_string(), elem.distance())
            })
            .collect();
        assert_eq!(
            distances,
            vec![
                ("C".to_string(), -2),
                ("B".to_string(), -1),
                ("A".to_string(), 0),
                ("D".to_string(), 1),
            ]
        );
        assert_eq!(model.min_distance(), -2);
        assert_eq!(model.max_distance(), 1);
    }

    #[test]
    fn test_indices_grow_with_distance_upstream_first() {
        let payload = vec![vec![
            entry("C", "op3"),
            entry("B", "op2"),
            entry("A", "op1"),
            entry("D", "op4"),
            entry("E", "op5"),
        ]];
        let model = DdgModelBuilder::build(&payload, &focal_a()).unwrap();

        let by_index: Vec<i32> = model.path_elems().iter().map(|e| e.distance()).collect();
        assert_eq!(by_index, vec![0, -1, 1, -2, 2]);
    }

    #[test]
    fn test_focal_is_first_match_in_path() {
        let payload = vec![vec![entry("A", "op1"), entry("B", "op2"), entry("A", "op1")]];
        let model = DdgModelBuilder::build(&payload, &focal_a()).unwrap();

        assert_eq!(model.paths()[0].focal_idx(), 0);
        assert_eq!(model.distance_to_path_elems()[&2].len(), 1);
    }

    #[test]
    fn test_focal_without_operation_matches_any_operation() {
        let payload = vec![vec![entry("B", "op2"), entry("A", "other")]];
        let focal = FocalNode::new("A", None);
        let model = DdgModelBuilder::build(&payload, &focal).unwrap();

        assert_eq!(model.paths()[0].focal_idx(), 1);
    }

    #[test]
    fn test_build_is_independent_of_payload_order() {
        let forward = vec![
            vec![entry("B", "op2"), entry("A", "op1")],
            vec![entry("A", "op1"), entry("C", "op3")],
        ];
        let backward: DdgPayload = forward.iter().rev().cloned().collect();

        let a = DdgModelBuilder::build(&forward, &focal_a()).unwrap();
        let b = DdgModelBuilder::build(&backward, &focal_a()).unwrap();

        assert_eq!(a.path_elems(), b.path_elems());
    }

    #[test]
    fn test_services_map_collects_operations() {
        let payload = vec![
            vec![entry("B", "op2"), entry("A", "op1")],
            vec![entry("B", "op9"), entry("A", "op1")],
        ];
        let model = DdgModelBuilder::build(&payload, &focal_a()).unwrap();

        let b = model.service("B").unwrap();
        assert_eq!(b.operations().len(), 2);
        assert_eq!(model.service("A").unwrap().operation("op1").unwrap().path_elems().len(), 2);
    }

    #[test]
    fn test_empty_payload_is_rejected() {
        let err = DdgModelBuilder::build(&vec![], &focal_a()).unwrap_err();
        assert_eq!(err, DdgError::EmptyPayload);
    }

    #[test]
    fn test_path_without_focal_is_rejected() {
        let payload = vec![
            vec![entry("A", "op1")],
            vec![entry("B", "op2"), entry("C", "op3")],
        ];
        let err = DdgModelBuilder::build(&payload, &focal_a()).unwrap_err();

        match err {
            DdgError::FocalNodeMissing {
                path_index,
                service,
                operation,
            } => {
                assert_eq!(path_index, 1);
                assert_eq!(service, "A");
                assert_eq!(operation, "op1");
            }
            other => panic!("Expected FocalNodeMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_path_is_rejected() {
        let payload = vec![vec![]];
        let err = DdgModelBuilder::build(&payload, &focal_a()).unwrap_err();
        assert!(matches!(err, DdgError::FocalNodeMissing { path_index: 0, .. }));
    }

    #[test]
    fn test_build_with_reports_each_path() {
        let payload = vec![vec![entry("A", "op1")], vec![entry("A", "op1")]];
        let mut seen = Vec::new();
        DdgModelBuilder::build_with(&payload, &focal_a(), |current, total| {
            seen.push((current, total))
        })
        .unwrap();

        assert_eq!(seen, vec![(1, 2), (2, 2)]);
    }
}
