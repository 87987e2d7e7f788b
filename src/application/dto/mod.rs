/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod graph_request;
mod graph_response;
mod key_error_policy;
mod output_format;

pub use graph_request::{GraphRequest, GraphRequestBuilder};
pub use graph_response::{GraphResponse, KeySource};
pub use key_error_policy::KeyErrorPolicy;
pub use output_format::OutputFormat;
