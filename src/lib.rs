//! ddg-vis - Deep dependency graph visibility tool
//!
//! This library turns a materialized deep dependency graph (every call path
//! through one focal service operation) into the deduplicated
//! service/operation graph selected by a compact, URL-safe visibility key.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`ddg`): Path model, visibility codec and graph resolution
//! - **Application Layer** (`application`): Use cases, DTOs and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use ddg_vis::prelude::*;
//!
//! # fn main() -> Result<()> {
//! // Create adapters
//! let payload_reader = FileSystemReader::new();
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = ResolveVisibleGraphUseCase::new(payload_reader, progress_reporter);
//!
//! // Execute against a navigation state without a key yet
//! let mut navigation = QueryStringNavigation::for_focal("api", Some("GET /users"));
//! let request = GraphRequest::builder()
//!     .payload_path("ddg.json")
//!     .service("api")
//!     .operation(Some("GET /users".to_string()))
//!     .build()?;
//! let response = use_case.execute(request, &mut navigation)?;
//!
//! // Format output
//! let read_model = GraphReadModelBuilder::build(
//!     response.graph_model.model(),
//!     &response.graph,
//!     &response.visibility_key,
//!     &response.navigation_query,
//! );
//! let output = DotFormatter::new().format(&read_model)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod ddg;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        DotFormatter, JsonFormatter, MarkdownFormatter,
    };
    pub use crate::adapters::outbound::navigation::QueryStringNavigation;
    pub use crate::application::dto::{
        GraphRequest, GraphResponse, KeyErrorPolicy, KeySource, OutputFormat,
    };
    pub use crate::application::read_models::{GraphReadModel, GraphReadModelBuilder};
    pub use crate::application::use_cases::ResolveVisibleGraphUseCase;
    pub use crate::ddg::domain::{
        DdgModel, DdgPayload, Edge, FocalNode, PayloadEntry, Vertex, VisibilityState,
        VisibleGraph,
    };
    pub use crate::ddg::services::{
        DdgModelBuilder, GraphModel, GraphResolver, OperationSelector, VisibilityCodec,
        VisibilityScope, EMPTY_KEY,
    };
    pub use crate::ports::outbound::{
        GraphFormatter, NavigationState, OutputPresenter, PayloadReader, ProgressReporter,
    };
    pub use crate::shared::error::DdgError;
    pub use crate::shared::Result;
}
