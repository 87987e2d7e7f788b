/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to reach the payload on disk, the navigation state, the console and
/// the output destination.
pub mod formatter;
pub mod navigation_state;
pub mod output_presenter;
pub mod payload_reader;
pub mod progress_reporter;

pub use formatter::GraphFormatter;
pub use navigation_state::NavigationState;
pub use output_presenter::OutputPresenter;
pub use payload_reader::PayloadReader;
pub use progress_reporter::ProgressReporter;
