/// Ports module defining interfaces for hexagonal architecture
///
/// Only driven ports exist: the use case is called directly by the CLI, and
/// everything it talks to (package managers, recordings, console, output) is
/// reached through the traits in `outbound`.
pub mod outbound;
