/// Ports module defining interfaces for hexagonal architecture
///
/// Only outbound ports (driven ports - infrastructure interfaces) are
/// defined; the use case is called directly by the CLI.
pub mod outbound;
