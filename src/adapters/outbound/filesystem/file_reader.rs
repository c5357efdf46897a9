use crate::ports::outbound::{ManagerRecording, RecordingReader};
use crate::shared::error::DeptreeError;
use crate::shared::security::{validate_readable_file, MAX_RECORDING_SIZE};
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// FileSystemReader adapter for reading recordings from the file system
///
/// Every read goes through the shared security checks (no symlinks, regular
/// files only, size limit) before the content is parsed.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    fn safe_read_file(&self, path: &Path, file_type: &str) -> Result<String> {
        validate_readable_file(path, file_type, MAX_RECORDING_SIZE)?;
        fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file_type, e))
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingReader for FileSystemReader {
    fn read_recording(&self, path: &Path) -> Result<ManagerRecording> {
        if !path.exists() {
            return Err(DeptreeError::RecordingNotFound {
                path: path.to_path_buf(),
                suggestion: format!(
                    "\"{}\" does not exist. \
                     Pass the path of a recording produced by a package manager run.",
                    path.display()
                ),
            }
            .into());
        }

        let content = self.safe_read_file(path, "recording")?;

        let recording: ManagerRecording =
            serde_json::from_str(&content).map_err(|e| DeptreeError::RecordingParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;

        tracing::debug!(
            path = %path.display(),
            manager = %recording.manager,
            projects = recording.result.project_count(),
            "read recording"
        );

        Ok(recording)
    }
}
