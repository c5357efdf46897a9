/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with package managers, the file system and the console.
pub mod output_presenter;
pub mod package_manager;
pub mod progress_reporter;
pub mod recording_reader;
pub mod result_formatter;

pub use output_presenter::OutputPresenter;
pub use package_manager::PackageManager;
pub use progress_reporter::ProgressReporter;
pub use recording_reader::{ManagerRecording, RecordingReader};
pub use result_formatter::ResultFormatter;
