use crate::dependency_resolution::domain::PackageManagerResult;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The saved output of one package manager run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerRecording {
    pub manager: String,
    pub result: PackageManagerResult,
}

/// RecordingReader port for loading saved manager output
pub trait RecordingReader {
    /// Reads and parses a recording file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or fails the security checks
    /// - The content is not a valid recording
    fn read_recording(&self, path: &Path) -> Result<ManagerRecording>;
}
