use crate::dependency_resolution::domain::PackageManagerResult;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// PackageManager port for resolving the dependencies of definition files
///
/// One implementation exists per supported package manager. A manager gets
/// all definition files it claimed in one call and returns either explicit
/// project trees or graph-backed projects plus the shared graph.
///
/// # Async Support
/// Managers run concurrently, so implementations must be `Send + Sync`.
#[async_trait]
pub trait PackageManager: Send + Sync {
    /// Unique name of the manager, e.g. "Gradle"; also the key under which
    /// its dependency graph is retained
    fn name(&self) -> &str;

    /// Whether this manager handles the given definition file
    fn matches_definition_file(&self, path: &Path) -> bool;

    /// Resolves the dependencies of `definition_files`
    ///
    /// # Errors
    /// Returns an error if the manager cannot produce a result at all. Problems
    /// with single packages are reported as issues inside the result instead.
    async fn resolve_dependencies(
        &self,
        definition_files: &[PathBuf],
    ) -> Result<PackageManagerResult>;
}
