use super::VisibilityCodec;
use crate::ddg::domain::{DdgModel, OPERATION_SEPARATOR};
use crate::shared::error::DdgError;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Hops shown on each side of the focal element when no key is given
pub const DEFAULT_HOPS: u32 = 2;

/// Picks a service, or one operation of a service, out of a model
///
/// Parsed from `service` or `service::operation`, splitting at the first `::`.
/// Names may themselves contain `::`, so when matching against a model the
/// text is also tried as a bare service name and split at every other `::`;
/// `a::b::c` selects `a::b` + `c`, `a` + `b::c` and the service `a::b::c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationSelector {
    service: String,
    operation: Option<String>,
}

impl OperationSelector {
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

    /// Every `(service, operation)` reading of the selector text; the parsed
    /// split comes from the first `::`
    fn readings(&self) -> Vec<(String, Option<String>)> {
        if self.operation.is_none() {
            return vec![(self.service.clone(), None)];
        }

        let text = self.to_string();
        let mut readings = vec![(text.clone(), None)];
        for (at, _) in text.match_indices(OPERATION_SEPARATOR) {
            let service = text[..at].trim();
            let rest = text[at + OPERATION_SEPARATOR.len()..].trim();
            if !service.is_empty() && !rest.is_empty() {
                readings.push((service.to_string(), Some(rest.to_string())));
            }
        }
        readings
    }
}

impl FromStr for OperationSelector {
    type Err = DdgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (service, operation) = match trimmed.split_once(OPERATION_SEPARATOR) {
            Some((service, operation)) => (service.trim(), Some(operation.trim())),
            None => (trimmed, None),
        };

        if service.is_empty() {
            return Err(DdgError::Validation {
                message: format!("Selector '{}' has no service name", s),
            });
        }
        if operation.is_some_and(str::is_empty) {
            return Err(DdgError::Validation {
                message: format!(
                    "Selector '{}' has an empty operation after '{}'",
                    s, OPERATION_SEPARATOR
                ),
            });
        }

        Ok(Self::new(service, operation.map(str::to_string)))
    }
}

impl fmt::Display for OperationSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operation {
            Some(op) => write!(f, "{}{}{}", self.service, OPERATION_SEPARATOR, op),
            None => write!(f, "{}", self.service),
        }
    }
}

/// VisibilityScope service: builds and edits keys in terms of distances and operations
pub struct VisibilityScope;

impl VisibilityScope {
    /// Visibility indices of every element whose distance falls within `range`
    pub fn indices_for_distances(model: &DdgModel, range: RangeInclusive<i32>) -> BTreeSet<usize> {
        if range.is_empty() {
            return BTreeSet::new();
        }
        model
            .distance_to_path_elems()
            .range(range)
            .flat_map(|(_, elems)| elems.iter().copied())
            .collect()
    }

    pub fn key_for_distances(model: &DdgModel, range: RangeInclusive<i32>) -> String {
        VisibilityCodec::encode(Self::indices_for_distances(model, range))
    }

    /// Key selecting every element at most `hops` away from the focal element
    pub fn key_for_hops(model: &DdgModel, hops: u32) -> String {
        let hops = i32::try_from(hops).unwrap_or(i32::MAX);
        Self::key_for_distances(model, -hops..=hops)
    }

    /// Key for the default view: the focal element and `DEFAULT_HOPS` hops either way
    pub fn compute_default_visible_key(model: &DdgModel) -> String {
        Self::key_for_hops(model, DEFAULT_HOPS)
    }

    /// Adds every element of the selected operations to `key`
    ///
    /// # Errors
    /// * `DdgError::MalformedKey` - `key` cannot be decoded
    /// * `DdgError::Validation` - the selector matches nothing in the model
    pub fn show(
        model: &DdgModel,
        key: &str,
        selector: &OperationSelector,
    ) -> Result<String, DdgError> {
        let mut indices = VisibilityCodec::decode(key)?;
        indices.append(&mut Self::selected_indices(model, selector)?);
        Ok(VisibilityCodec::encode(indices))
    }

    /// Removes every element of the selected operations from `key`
    ///
    /// # Errors
    /// * `DdgError::MalformedKey` - `key` cannot be decoded
    /// * `DdgError::Validation` - the selector matches nothing in the model
    pub fn hide(
        model: &DdgModel,
        key: &str,
        selector: &OperationSelector,
    ) -> Result<String, DdgError> {
        let mut indices = VisibilityCodec::decode(key)?;
        for idx in Self::selected_indices(model, selector)? {
            indices.remove(&idx);
        }
        Ok(VisibilityCodec::encode(indices))
    }

    fn selected_indices(
        model: &DdgModel,
        selector: &OperationSelector,
    ) -> Result<BTreeSet<usize>, DdgError> {
        let mut indices = BTreeSet::new();
        let mut matched = false;
        for (service, operation) in selector.readings() {
            let Some(service) = model.service(&service) else {
                continue;
            };
            match operation {
                Some(name) => {
                    if let Some(op) = service.operation(&name) {
                        matched = true;
                        indices.extend(op.path_elems().iter().copied());
                    }
                }
                None => {
                    matched = true;
                    indices.extend(
                        service
                            .operations()
                            .values()
                            .flat_map(|op| op.path_elems().iter().copied()),
                    );
                }
            }
        }

        if !matched {
            return Err(DdgError::Validation {
                message: format!("'{}' does not match any operation in the graph", selector),
            });
        }
        Ok(indices)
    }
}
