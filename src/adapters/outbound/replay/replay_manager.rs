use crate::dependency_resolution::domain::PackageManagerResult;
use crate::ports::outbound::{ManagerRecording, PackageManager};
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// ReplayManager adapter answering with a previously recorded result
///
/// Stands in for a real package manager integration. It claims exactly the
/// definition files present in its recording and returns the recorded
/// projects for the files it is asked about.
pub struct ReplayManager {
    name: String,
    result: PackageManagerResult,
}

impl ReplayManager {
    pub fn new(name: impl Into<String>, result: PackageManagerResult) -> Self {
        Self {
            name: name.into(),
            result,
        }
    }

    pub fn from_recording(recording: ManagerRecording) -> Self {
        Self::new(recording.manager, recording.result)
    }

    /// Definition files this recording knows about
    pub fn definition_files(&self) -> Vec<PathBuf> {
        self.result
            .project_results()
            .keys()
            .map(PathBuf::from)
            .collect()
    }
}

#[async_trait]
impl PackageManager for ReplayManager {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches_definition_file(&self, path: &Path) -> bool {
        self.result
            .project_results()
            .keys()
            .any(|file| Path::new(file) == path)
    }

    async fn resolve_dependencies(
        &self,
        definition_files: &[PathBuf],
    ) -> Result<PackageManagerResult> {
        let project_results: BTreeMap<_, _> = self
            .result
            .project_results()
            .iter()
            .filter(|(file, _)| definition_files.iter().any(|f| f == Path::new(file.as_str())))
            .map(|(file, results)| (file.clone(), results.clone()))
            .collect();

        if project_results.len() < definition_files.len() {
            anyhow::bail!(
                "Recording for '{}' has no result for {} of {} requested definition files",
                self.name,
                definition_files.len() - project_results.len(),
                definition_files.len()
            );
        }

        Ok(PackageManagerResult::new(
            project_results,
            self.result.record().clone(),
            self.result.shared_packages().to_vec(),
        ))
    }
}
