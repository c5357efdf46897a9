use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::dependency_resolution::domain::PackageId;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - dependencies resolved (issues may still be present)
    Success = 0,
    /// Error-severity issues were found and `--fail-on-issues` was given
    IssuesDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (unreadable recording, broken graph, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::IssuesDetected => write!(f, "Issues Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Structural violations inside a dependency fragment graph.
///
/// These always indicate a bug in the package manager that produced the
/// graph. They are never retried and abort that manager's contribution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphIntegrityError {
    #[error("Fragment index {index} does not exist (graph has {fragment_count} fragments)")]
    MissingFragment { index: usize, fragment_count: usize },

    #[error("Fragment {index} ({id}) is reachable from itself")]
    Cycle { index: usize, id: PackageId },

    #[error("Project {project} references a dependency graph, but no graph is available")]
    MissingGraph { project: PackageId },
}

/// Errors raised by the resolution core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error(transparent)]
    GraphIntegrity(#[from] GraphIntegrityError),

    /// A definition file that should describe exactly one project did not
    #[error("Definition file {definition_file} yielded {count} projects, expected exactly one")]
    AmbiguousProjectResult {
        definition_file: String,
        count: usize,
    },

    #[error("A dependency graph for package manager '{manager}' was already registered")]
    DuplicateGraph { manager: String },
}

/// Application-specific errors surfaced to the user.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum DeptreeError {
    #[error("Recording file not found: {path}\n\n💡 Hint: {suggestion}")]
    RecordingNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse recording file: {path}\nDetails: {details}\n\n💡 Hint: A recording must be a JSON object with \"manager\" and \"result\" fields")]
    RecordingParseError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid input path: {path}\nReason: {reason}\n\n💡 Hint: Please specify an existing recording file")]
    InvalidInputPath { path: PathBuf, reason: String },

    /// Validation error for builder patterns
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::IssuesDetected.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::IssuesDetected),
            "Issues Detected (1)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_missing_fragment_display() {
        let error = GraphIntegrityError::MissingFragment {
            index: 7,
            fragment_count: 3,
        };
        let display = error.to_string();
        assert!(display.contains("index 7"));
        assert!(display.contains("3 fragments"));
    }

    #[test]
    fn test_resolution_error_wraps_graph_error_transparently() {
        let inner = GraphIntegrityError::MissingFragment {
            index: 1,
            fragment_count: 0,
        };
        let error: ResolutionError = inner.clone().into();
        assert_eq!(error.to_string(), inner.to_string());
        assert_eq!(error, ResolutionError::GraphIntegrity(inner));
    }

    #[test]
    fn test_ambiguous_project_result_display() {
        let error = ResolutionError::AmbiguousProjectResult {
            definition_file: "app/build.gradle".to_string(),
            count: 2,
        };
        let display = error.to_string();
        assert!(display.contains("app/build.gradle"));
        assert!(display.contains("2 projects"));
    }

    #[test]
    fn test_recording_parse_error_display() {
        let error = DeptreeError::RecordingParseError {
            path: PathBuf::from("/test/gradle.json"),
            details: "expected value at line 1".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to parse recording file"));
        assert!(display.contains("/test/gradle.json"));
        assert!(display.contains("expected value"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_security_error_display() {
        let error = DeptreeError::SecurityError {
            path: PathBuf::from("/test/symlink"),
            reason: "Symbolic links are not allowed".to_string(),
            hint: "Use a regular file instead".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Security violation"));
        assert!(display.contains("/test/symlink"));
        assert!(display.contains("Use a regular file instead"));
    }
}
