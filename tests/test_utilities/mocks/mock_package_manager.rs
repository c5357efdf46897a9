use async_trait::async_trait;
use deptree::prelude::*;
use std::path::{Path, PathBuf};

/// Mock PackageManager claiming every definition file with a given file name
pub struct MockPackageManager {
    name: String,
    file_name: String,
    result: PackageManagerResult,
}

impl MockPackageManager {
    pub fn new(name: &str, file_name: &str, result: PackageManagerResult) -> Self {
        Self {
            name: name.to_string(),
            file_name: file_name.to_string(),
            result,
        }
    }
}

#[async_trait]
impl PackageManager for MockPackageManager {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches_definition_file(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| name.to_string_lossy() == self.file_name)
    }

    async fn resolve_dependencies(
        &self,
        _definition_files: &[PathBuf],
    ) -> Result<PackageManagerResult> {
        Ok(self.result.clone())
    }
}
