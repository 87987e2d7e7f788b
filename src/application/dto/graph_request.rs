use super::KeyErrorPolicy;
use crate::ddg::domain::FocalNode;
use crate::ddg::services::OperationSelector;
use crate::shared::error::DdgError;
use crate::shared::Result;
use std::path::PathBuf;

/// GraphRequest - Internal request DTO for resolving a visible graph
///
/// The visibility key itself is not part of the request; it is read from
/// and written back to the navigation state passed alongside.
#[derive(Debug, Clone)]
pub struct GraphRequest {
    /// Path to the materialized payload file
    pub payload_path: PathBuf,
    /// Focal service and optional operation
    pub focal: FocalNode,
    /// Hop radius for the default key; `None` means `DEFAULT_HOPS`
    pub hops: Option<u32>,
    /// Operations to add to the resolved key
    pub show: Vec<OperationSelector>,
    /// Operations to remove from the resolved key
    pub hide: Vec<OperationSelector>,
    pub key_error_policy: KeyErrorPolicy,
}

impl GraphRequest {
    pub fn builder() -> GraphRequestBuilder {
        GraphRequestBuilder::default()
    }
}

/// Builder for GraphRequest
#[derive(Debug, Default)]
pub struct GraphRequestBuilder {
    payload_path: Option<PathBuf>,
    service: Option<String>,
    operation: Option<String>,
    hops: Option<u32>,
    show: Vec<OperationSelector>,
    hide: Vec<OperationSelector>,
    key_error_policy: KeyErrorPolicy,
}

impl GraphRequestBuilder {
    pub fn payload_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.payload_path = Some(path.into());
        self
    }

    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn operation(mut self, operation: Option<String>) -> Self {
        self.operation = operation;
        self
    }

    pub fn hops(mut self, hops: Option<u32>) -> Self {
        self.hops = hops;
        self
    }

    pub fn show(mut self, selectors: Vec<OperationSelector>) -> Self {
        self.show = selectors;
        self
    }

    pub fn hide(mut self, selectors: Vec<OperationSelector>) -> Self {
        self.hide = selectors;
        self
    }

    pub fn key_error_policy(mut self, policy: KeyErrorPolicy) -> Self {
        self.key_error_policy = policy;
        self
    }

    /// Builds the request
    ///
    /// # Errors
    /// Returns `DdgError::Validation` if the payload path or the focal
    /// service is missing or blank
    pub fn build(self) -> Result<GraphRequest> {
        let payload_path = self.payload_path.ok_or_else(|| DdgError::Validation {
            message: "A payload file is required (--payload)".to_string(),
        })?;

        let service = self
            .service
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DdgError::Validation {
                message: "A focal service is required (--service or service= in --query)"
                    .to_string(),
            })?;

        let operation = self
            .operation
            .map(|op| op.trim().to_string())
            .filter(|op| !op.is_empty());

        Ok(GraphRequest {
            payload_path,
            focal: FocalNode::new(service, operation),
            hops: self.hops,
            show: self.show,
            hide: self.hide,
            key_error_policy: self.key_error_policy,
        })
    }
}
