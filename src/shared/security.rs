use crate::shared::error::DeptreeError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum recording size (64 MB)
/// Recorded manager results for large monorepos stay well below this
pub const MAX_RECORDING_SIZE: u64 = 64 * 1024 * 1024;

/// Validates that a path can be read safely and returns its size
///
/// # Security
/// Uses `symlink_metadata()` so the link itself is checked, not its target.
///
/// # Arguments
/// * `path` - The path to validate
/// * `file_description` - Description of the file for error messages (e.g., "recording")
/// * `max_size` - Maximum allowed size in bytes
///
/// # Errors
/// Returns an error if:
/// - The metadata cannot be read
/// - The path is a symbolic link
/// - The path is not a regular file
/// - The file exceeds `max_size`
pub fn validate_readable_file(path: &Path, file_description: &str, max_size: u64) -> Result<u64> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e)
    })?;

    if metadata.is_symlink() {
        return Err(DeptreeError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
            hint: "Pass the path of the regular file the link points to".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    let file_size = metadata.len();
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }

    Ok(file_size)
}

/// Validates that an existing output target is not a symbolic link
///
/// Missing targets are fine; they will be created.
pub fn validate_write_target(path: &Path) -> Result<()> {
    if let Ok(metadata) = fs::symlink_metadata(path) {
        if metadata.is_symlink() {
            return Err(DeptreeError::SecurityError {
                path: path.to_path_buf(),
                reason: "Output path is a symbolic link".to_string(),
                hint: "Write to a regular file path instead".to_string(),
            }
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_validate_readable_file_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("gradle.json");
        fs::write(&file_path, "{}").unwrap();

        let size = validate_readable_file(&file_path, "recording", MAX_RECORDING_SIZE).unwrap();
        assert_eq!(size, 2);
    }

    #[test]
    fn test_validate_readable_file_nonexistent() {
        let path = PathBuf::from("/nonexistent/recording.json");
        let result = validate_readable_file(&path, "recording", MAX_RECORDING_SIZE);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_readable_file_is_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = validate_readable_file(temp_dir.path(), "recording", MAX_RECORDING_SIZE);
        assert!(result.unwrap_err().to_string().contains("not a regular file"));
    }

    #[test]
    fn test_validate_readable_file_too_large() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("big.json");
        fs::write(&file_path, "0123456789").unwrap();

        let result = validate_readable_file(&file_path, "recording", 4);
        assert!(result.unwrap_err().to_string().contains("too large"));
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_readable_file_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target.json");
        let link = temp_dir.path().join("link.json");
        fs::write(&target, "{}").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let result = validate_readable_file(&link, "recording", MAX_RECORDING_SIZE);
        assert!(result.unwrap_err().to_string().contains("Security violation"));
    }

    #[test]
    fn test_validate_write_target_missing_file_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        assert!(validate_write_target(&temp_dir.path().join("out.json")).is_ok());
    }
}
