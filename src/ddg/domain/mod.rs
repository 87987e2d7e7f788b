pub mod ddg_model;
pub mod operation;
pub mod path_elem;
pub mod payload;
pub mod visibility_state;
pub mod visible_graph;

pub use ddg_model::DdgModel;
pub use operation::{DdgOperation, DdgService, FocalNode, OperationRef, OPERATION_SEPARATOR};
pub use path_elem::{DdgPath, PathElem};
pub use payload::{DdgPayload, PayloadEntry};
pub use visibility_state::VisibilityState;
pub use visible_graph::{Edge, Vertex, VisibleGraph, STALE_INDEX_SAMPLE};
