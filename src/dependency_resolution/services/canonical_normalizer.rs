use crate::dependency_resolution::domain::{
    AnalyzerResult, Issue, PackageReference, ProjectAnalyzerResult,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// CanonicalNormalizer service producing comparison-stable copies of results
///
/// Two results are equivalent iff their canonical forms are equal. The
/// normalizer removes what is incidental to an analysis run:
/// - every issue timestamp becomes the UNIX epoch, at every tree level
/// - project-level issues are sorted by message
///
/// Scopes and dependency children keep their order, which resolution already
/// makes deterministic. Inputs are never modified.
pub struct CanonicalNormalizer;

impl CanonicalNormalizer {
    /// The fixed timestamp all canonical issues carry
    pub const EPOCH: DateTime<Utc> = DateTime::<Utc>::UNIX_EPOCH;

    pub fn normalize_issue(issue: &Issue) -> Issue {
        issue.clone().with_timestamp(Self::EPOCH)
    }

    pub fn normalize_reference(reference: &PackageReference) -> PackageReference {
        reference.map_issues(&Self::normalize_issue)
    }

    pub fn normalize_result(result: &ProjectAnalyzerResult) -> ProjectAnalyzerResult {
        ProjectAnalyzerResult::new(
            result.project().map_issues(&Self::normalize_issue),
            result.packages().to_vec(),
            Self::normalize_project_issues(result.issues()),
        )
    }

    /// Normalizes all projects, the project issue map and the fragments of
    /// retained graphs
    pub fn normalize_analyzer_result(result: &AnalyzerResult) -> AnalyzerResult {
        let projects = result
            .projects()
            .iter()
            .map(|project| project.map_issues(&Self::normalize_issue))
            .collect();

        let issues: BTreeMap<_, _> = result
            .issues()
            .iter()
            .map(|(id, issues)| (id.clone(), Self::normalize_project_issues(issues)))
            .collect();

        let dependency_graphs = result
            .dependency_graphs()
            .iter()
            .map(|(manager, graph)| (manager.clone(), graph.map_issues(&Self::normalize_issue)))
            .collect();

        AnalyzerResult::new(projects, result.packages().to_vec(), issues, dependency_graphs)
    }

    /// Zeroes timestamps and sorts by message; source, severity and affected
    /// path break ties so the order never depends on discovery order
    fn normalize_project_issues(issues: &[Issue]) -> Vec<Issue> {
        let mut normalized: Vec<Issue> = issues.iter().map(Self::normalize_issue).collect();
        normalized.sort_by(|a, b| {
            a.message()
                .cmp(b.message())
                .then_with(|| a.source().cmp(b.source()))
                .then_with(|| a.severity().cmp(&b.severity()))
                .then_with(|| a.affected_path().cmp(&b.affected_path()))
        });
        normalized
    }
}
