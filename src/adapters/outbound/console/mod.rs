/// Console adapters writing user-facing progress to stderr
mod progress_reporter;

pub use progress_reporter::StderrProgressReporter;
