use super::{DdgPath, DdgService, FocalNode, PathElem};
use crate::shared::error::DdgError;
use std::collections::BTreeMap;

/// DdgModel aggregate: every path element of a deep dependency graph,
/// organized by path, by distance bucket and by visibility index
///
/// The model is immutable once built. `path_elems` is the arena; position `i`
/// holds the element whose visibility index is `i`. Paths, distance buckets and
/// operations only store indices into it.
#[derive(Debug, Clone)]
pub struct DdgModel {
    focal: FocalNode,
    distance_to_path_elems: BTreeMap<i32, Vec<usize>>,
    paths: Vec<DdgPath>,
    services: BTreeMap<String, DdgService>,
    path_elems: Vec<PathElem>,
}

impl DdgModel {
    /// Assembles a model from its paths and element arena, deriving the
    /// distance buckets and the service map
    ///
    /// # Errors
    /// Returns `DdgError::InvalidModel` when:
    /// - an element is not stored at its own visibility index
    /// - a path member points outside the arena or at an element of another path
    /// - an element belongs to no path, or to more than one position
    /// - a path's focal member is out of range or not at distance 0
    /// - an element's distance disagrees with its position relative to the focal member
    pub fn from_parts(
        focal: FocalNode,
        paths: Vec<DdgPath>,
        path_elems: Vec<PathElem>,
    ) -> Result<Self, DdgError> {
        for (idx, elem) in path_elems.iter().enumerate() {
            if elem.visibility_idx() != idx {
                return Err(invalid(format!(
                    "element at arena position {} carries visibility index {}",
                    idx,
                    elem.visibility_idx()
                )));
            }
        }

        let mut owned = vec![false; path_elems.len()];
        for (path_idx, path) in paths.iter().enumerate() {
            if path.focal_idx() >= path.len() {
                return Err(invalid(format!(
                    "path {} has focal index {} but only {} member(s)",
                    path_idx,
                    path.focal_idx(),
                    path.len()
                )));
            }

            for (member_idx, &vis_idx) in path.members().iter().enumerate() {
                let elem = path_elems.get(vis_idx).ok_or_else(|| {
                    invalid(format!(
                        "path {} references visibility index {} outside the arena",
                        path_idx, vis_idx
                    ))
                })?;

                if owned[vis_idx] {
                    return Err(invalid(format!(
                        "element {} appears more than once across paths",
                        vis_idx
                    )));
                }
                owned[vis_idx] = true;

                if elem.path_idx() != path_idx || elem.member_idx() != member_idx {
                    return Err(invalid(format!(
                        "element {} claims position {}/{} but sits at {}/{}",
                        vis_idx,
                        elem.path_idx(),
                        elem.member_idx(),
                        path_idx,
                        member_idx
                    )));
                }

                let expected = member_idx as i64 - path.focal_idx() as i64;
                if i64::from(elem.distance()) != expected {
                    return Err(invalid(format!(
                        "element {} has distance {} but is {} hop(s) from its path's focal member",
                        vis_idx,
                        elem.distance(),
                        expected
                    )));
                }
            }
        }

        if let Some(orphan) = owned.iter().position(|is_owned| !is_owned) {
            return Err(invalid(format!("element {} belongs to no path", orphan)));
        }

        let mut distance_to_path_elems: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
        let mut services: BTreeMap<String, DdgService> = BTreeMap::new();
        for elem in &path_elems {
            distance_to_path_elems
                .entry(elem.distance())
                .or_default()
                .push(elem.visibility_idx());
            services
                .entry(elem.service().to_string())
                .or_insert_with(|| DdgService::new(elem.service()))
                .operation_mut(elem.operation())
                .push_path_elem(elem.visibility_idx());
        }

        Ok(Self {
            focal,
            distance_to_path_elems,
            paths,
            services,
            path_elems,
        })
    }

    pub fn focal(&self) -> &FocalNode {
        &self.focal
    }

    /// Distance bucket -> visibility indices of the elements at that distance
    pub fn distance_to_path_elems(&self) -> &BTreeMap<i32, Vec<usize>> {
        &self.distance_to_path_elems
    }

    pub fn paths(&self) -> &[DdgPath] {
        &self.paths
    }

    pub fn services(&self) -> &BTreeMap<String, DdgService> {
        &self.services
    }

    pub fn service(&self, name: &str) -> Option<&DdgService> {
        self.services.get(name)
    }

    /// The element arena, indexed by visibility index
    pub fn path_elems(&self) -> &[PathElem] {
        &self.path_elems
    }

    /// Looks up an element by visibility index; `None` for stale indices
    pub fn path_elem(&self, visibility_idx: usize) -> Option<&PathElem> {
        self.path_elems.get(visibility_idx)
    }

    pub fn path_elem_count(&self) -> usize {
        self.path_elems.len()
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn min_distance(&self) -> i32 {
        self.distance_to_path_elems
            .keys()
            .next()
            .copied()
            .unwrap_or(0)
    }

    pub fn max_distance(&self) -> i32 {
        self.distance_to_path_elems
            .keys()
            .next_back()
            .copied()
            .unwrap_or(0)
    }
}

fn invalid(reason: String) -> DdgError {
    DdgError::InvalidModel { reason }
}
