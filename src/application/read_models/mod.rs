//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that flatten a resolved
//! visible graph for the formatters.

pub mod graph_read_model;
pub mod graph_read_model_builder;
pub mod vertex_view;

pub use graph_read_model::{GraphMetadataView, GraphReadModel};
pub use graph_read_model_builder::GraphReadModelBuilder;
pub use vertex_view::{EdgeView, VertexView};
