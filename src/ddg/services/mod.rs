pub mod ddg_model_builder;
pub mod graph_model;
pub mod graph_resolver;
pub mod visibility_codec;
pub mod visibility_scope;

pub use ddg_model_builder::DdgModelBuilder;
pub use graph_model::GraphModel;
pub use graph_resolver::GraphResolver;
pub use visibility_codec::{VisibilityCodec, EMPTY_KEY, MAX_KEY_LENGTH};
pub use visibility_scope::{OperationSelector, VisibilityScope, DEFAULT_HOPS};
