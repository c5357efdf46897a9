use crate::dependency_resolution::domain::ScopeExclude;
use crate::shared::error::DeptreeError;
use crate::shared::Result;
use std::path::PathBuf;

/// Number of package managers invoked at the same time unless configured
pub const DEFAULT_MAX_CONCURRENT_MANAGERS: usize = 4;

/// AnalysisRequest - Internal request DTO for the analyze dependencies use case
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Definition files to hand to the package managers
    pub definition_files: Vec<PathBuf>,
    /// Scopes to drop from every project before packages are assigned
    pub excluded_scopes: Vec<ScopeExclude>,
    /// Upper bound for concurrently running package managers
    pub max_concurrent_managers: usize,
}

impl AnalysisRequest {
    pub fn builder() -> AnalysisRequestBuilder {
        AnalysisRequestBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct AnalysisRequestBuilder {
    definition_files: Vec<PathBuf>,
    excluded_scopes: Vec<ScopeExclude>,
    max_concurrent_managers: Option<usize>,
}

impl AnalysisRequestBuilder {
    pub fn definition_files(mut self, files: Vec<PathBuf>) -> Self {
        self.definition_files = files;
        self
    }

    pub fn excluded_scopes(mut self, excludes: Vec<ScopeExclude>) -> Self {
        self.excluded_scopes = excludes;
        self
    }

    pub fn max_concurrent_managers(mut self, max: usize) -> Self {
        self.max_concurrent_managers = Some(max);
        self
    }

    /// # Errors
    /// `DeptreeError::Validation` if no definition file is given or the
    /// concurrency limit is zero
    pub fn build(self) -> Result<AnalysisRequest> {
        if self.definition_files.is_empty() {
            return Err(DeptreeError::Validation {
                message: "No definition files to analyze".to_string(),
            }
            .into());
        }

        let max_concurrent_managers = self
            .max_concurrent_managers
            .unwrap_or(DEFAULT_MAX_CONCURRENT_MANAGERS);
        if max_concurrent_managers == 0 {
            return Err(DeptreeError::Validation {
                message: "max_concurrent_managers must be at least 1".to_string(),
            }
            .into());
        }

        Ok(AnalysisRequest {
            definition_files: self.definition_files,
            excluded_scopes: self.excluded_scopes,
            max_concurrent_managers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let request = AnalysisRequest::builder()
            .definition_files(vec![PathBuf::from("package.json")])
            .build()
            .unwrap();

        assert_eq!(request.max_concurrent_managers, DEFAULT_MAX_CONCURRENT_MANAGERS);
        assert!(request.excluded_scopes.is_empty());
    }

    #[test]
    fn test_builder_requires_definition_files() {
        let error = AnalysisRequest::builder().build().unwrap_err();
        assert!(error.to_string().contains("No definition files"));
    }

    #[test]
    fn test_builder_rejects_zero_concurrency() {
        let error = AnalysisRequest::builder()
            .definition_files(vec![PathBuf::from("pom.xml")])
            .max_concurrent_managers(0)
            .build()
            .unwrap_err();
        assert!(error.to_string().contains("at least 1"));
    }
}
