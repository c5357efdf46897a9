use crate::dependency_resolution::domain::AnalyzerResult;

/// A package manager whose contribution was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerFailure {
    pub manager: String,
    pub message: String,
}

/// AnalysisResponse - Internal response DTO from the analyze dependencies use case
#[derive(Debug, Clone)]
pub struct AnalysisResponse {
    /// The aggregated result of all successful managers
    pub analyzer_result: AnalyzerResult,
    /// Managers that failed, sorted by name
    pub failed_managers: Vec<ManagerFailure>,
    /// Scope exclusion patterns that matched no scope of any project
    pub unmatched_exclusions: Vec<String>,
}

impl AnalysisResponse {
    pub fn new(
        analyzer_result: AnalyzerResult,
        failed_managers: Vec<ManagerFailure>,
        unmatched_exclusions: Vec<String>,
    ) -> Self {
        Self {
            analyzer_result,
            failed_managers,
            unmatched_exclusions,
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failed_managers.is_empty()
    }
}
