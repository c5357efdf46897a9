use super::{DependencyGraph, Issue, Package, PackageId, Project, Severity};
use crate::shared::error::ResolutionError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The analysis outcome for one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectAnalyzerResult {
    project: Project,
    /// Packages used by the project; empty until the manager or the
    /// package set reconciler assigns them
    #[serde(default)]
    packages: Vec<Package>,
    #[serde(default)]
    issues: Vec<Issue>,
}

impl ProjectAnalyzerResult {
    pub fn new(project: Project, packages: Vec<Package>, issues: Vec<Issue>) -> Self {
        Self {
            project,
            packages,
            issues,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Returns a copy with the project replaced, keeping packages and issues
    pub fn with_project(&self, project: Project) -> Self {
        Self {
            project,
            packages: self.packages.clone(),
            issues: self.issues.clone(),
        }
    }

    pub fn into_parts(self) -> (Project, Vec<Package>, Vec<Issue>) {
        (self.project, self.packages, self.issues)
    }
}

/// Tagged shape of the dependency information a manager run produced
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DependencyRecord {
    /// Every project carries its scope trees explicitly
    #[default]
    Classic,
    /// Projects are graph-backed and share this graph
    Graph { graph: DependencyGraph },
}

/// The raw output of one package manager invocation
///
/// Maps every definition file to the projects found in it. Normally each file
/// yields exactly one project; some managers find several per file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PackageManagerResult {
    project_results: BTreeMap<String, Vec<ProjectAnalyzerResult>>,
    #[serde(default)]
    record: DependencyRecord,
    /// Packages found by the manager but not yet assigned to a project
    #[serde(default)]
    shared_packages: Vec<Package>,
}

impl PackageManagerResult {
    pub fn new(
        project_results: BTreeMap<String, Vec<ProjectAnalyzerResult>>,
        record: DependencyRecord,
        shared_packages: Vec<Package>,
    ) -> Self {
        Self {
            project_results,
            record,
            shared_packages,
        }
    }

    pub fn project_results(&self) -> &BTreeMap<String, Vec<ProjectAnalyzerResult>> {
        &self.project_results
    }

    pub fn record(&self) -> &DependencyRecord {
        &self.record
    }

    pub fn dependency_graph(&self) -> Option<&DependencyGraph> {
        match &self.record {
            DependencyRecord::Graph { graph } => Some(graph),
            DependencyRecord::Classic => None,
        }
    }

    pub fn shared_packages(&self) -> &[Package] {
        &self.shared_packages
    }

    /// Total number of projects over all definition files
    pub fn project_count(&self) -> usize {
        self.project_results.values().map(Vec::len).sum()
    }

    /// Returns the only project found in `definition_file`
    ///
    /// # Errors
    /// `ResolutionError::AmbiguousProjectResult` if the file yielded no
    /// project or more than one. Callers decide whether that is fatal.
    pub fn single_project(
        &self,
        definition_file: &str,
    ) -> Result<&ProjectAnalyzerResult, ResolutionError> {
        let results = self
            .project_results
            .get(definition_file)
            .map(Vec::as_slice)
            .unwrap_or_default();

        match results {
            [single] => Ok(single),
            _ => Err(ResolutionError::AmbiguousProjectResult {
                definition_file: definition_file.to_string(),
                count: results.len(),
            }),
        }
    }

    pub fn into_parts(
        self,
    ) -> (
        BTreeMap<String, Vec<ProjectAnalyzerResult>>,
        DependencyRecord,
        Vec<Package>,
    ) {
        (self.project_results, self.record, self.shared_packages)
    }
}

/// The final, aggregated dependency record of an analysis run
///
/// Projects and packages are sorted by id. Graphs are retained per package
/// manager name; projects that are still graph-backed can be expanded with
/// [`GraphResolver::resolve_analyzer_result`](crate::dependency_resolution::services::GraphResolver::resolve_analyzer_result).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalyzerResult {
    projects: Vec<Project>,
    packages: Vec<Package>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    issues: BTreeMap<PackageId, Vec<Issue>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    dependency_graphs: BTreeMap<String, DependencyGraph>,
}

impl AnalyzerResult {
    pub fn new(
        projects: Vec<Project>,
        packages: Vec<Package>,
        issues: BTreeMap<PackageId, Vec<Issue>>,
        dependency_graphs: BTreeMap<String, DependencyGraph>,
    ) -> Self {
        Self {
            projects,
            packages,
            issues,
            dependency_graphs,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Project-level issues keyed by project id
    pub fn issues(&self) -> &BTreeMap<PackageId, Vec<Issue>> {
        &self.issues
    }

    pub fn dependency_graphs(&self) -> &BTreeMap<String, DependencyGraph> {
        &self.dependency_graphs
    }

    pub fn project(&self, id: &PackageId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id() == id)
    }

    pub fn package(&self, id: &PackageId) -> Option<&Package> {
        self.packages
            .binary_search_by(|p| p.id().cmp(id))
            .ok()
            .map(|index| &self.packages[index])
    }

    /// The retained graph that holds the scopes of `project`, if any
    pub fn graph_for_project(&self, project: &PackageId) -> Option<&DependencyGraph> {
        self.dependency_graphs
            .values()
            .find(|graph| graph.knows_project(project))
    }

    /// Project-level issues plus all issues attached to dependency edges of
    /// the project's explicit scopes, keyed by project id
    pub fn all_issues(&self) -> BTreeMap<PackageId, Vec<&Issue>> {
        let mut all: BTreeMap<PackageId, Vec<&Issue>> = BTreeMap::new();

        for (id, issues) in &self.issues {
            all.entry(id.clone()).or_default().extend(issues.iter());
        }

        for project in &self.projects {
            let mut edge_issues = Vec::new();
            for scope in project.scopes().unwrap_or_default() {
                for dependency in scope.dependencies() {
                    dependency.collect_issues(&mut edge_issues);
                }
            }
            if !edge_issues.is_empty() {
                all.entry(project.id().clone())
                    .or_default()
                    .extend(edge_issues);
            }
        }

        all
    }

    /// True if any project or dependency edge carries an `Error` issue
    pub fn has_errors(&self) -> bool {
        self.all_issues()
            .values()
            .flatten()
            .any(|issue| issue.severity() == Severity::Error)
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        Vec<Project>,
        Vec<Package>,
        BTreeMap<PackageId, Vec<Issue>>,
        BTreeMap<String, DependencyGraph>,
    ) {
        (
            self.projects,
            self.packages,
            self.issues,
            self.dependency_graphs,
        )
    }
}
