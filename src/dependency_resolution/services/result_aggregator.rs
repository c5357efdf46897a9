use crate::dependency_resolution::domain::{
    AnalyzerResult, DependencyGraph, Issue, Package, PackageId, Project, ProjectAnalyzerResult,
    Severity,
};
use crate::shared::error::ResolutionError;
use std::collections::BTreeMap;

/// Source name used for issues raised by the aggregator itself
const AGGREGATOR_ISSUE_SOURCE: &str = "deptree";

/// AnalyzerResultBuilder service folding manager contributions into one result
///
/// This is the only stateful piece of the pipeline. Additions take `&mut self`,
/// so there is exactly one writer at a time; `build` consumes the builder, so
/// the result can only be read once every contribution is in.
///
/// Packages are deduplicated by id. When two contributions carry the same id
/// the first one seen is kept, even if the metadata differs.
#[derive(Debug, Default)]
pub struct AnalyzerResultBuilder {
    projects: BTreeMap<PackageId, Project>,
    packages: BTreeMap<PackageId, Package>,
    issues: BTreeMap<PackageId, Vec<Issue>>,
    dependency_graphs: BTreeMap<String, DependencyGraph>,
}

impl AnalyzerResultBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one project result with its packages and issues
    ///
    /// A project whose id was already added is not added again; instead an
    /// error issue naming the dropped definition file is recorded for the id,
    /// followed by the dropped project's own issues. Its packages are ignored.
    pub fn add_result(&mut self, result: ProjectAnalyzerResult) -> &mut Self {
        let (project, packages, issues) = result.into_parts();
        let id = project.id().clone();

        if let Some(existing) = self.projects.get(&id) {
            tracing::warn!(
                project = %id,
                kept = existing.definition_file_path(),
                dropped = project.definition_file_path(),
                "duplicate project id"
            );
            let issue = Issue::new(
                AGGREGATOR_ISSUE_SOURCE,
                format!(
                    "Multiple projects with the same id '{}' found. \
                     Not adding the project defined in '{}' \
                     as it duplicates the project defined in '{}'.",
                    id,
                    project.definition_file_path(),
                    existing.definition_file_path()
                ),
                Severity::Error,
            )
            .with_affected_path(project.definition_file_path());
            let recorded = self.issues.entry(id).or_default();
            recorded.push(issue);
            recorded.extend(issues);
            return self;
        }

        self.add_packages(packages);
        if !issues.is_empty() {
            self.issues.entry(id.clone()).or_default().extend(issues);
        }
        self.projects.insert(id, project);
        self
    }

    /// Registers the graph of one package manager run and the packages it shared
    ///
    /// # Errors
    /// `ResolutionError::DuplicateGraph` if a graph is already registered for
    /// `manager`; the builder is left unchanged in that case.
    pub fn add_dependency_graph(
        &mut self,
        manager: &str,
        graph: DependencyGraph,
        shared_packages: Vec<Package>,
    ) -> Result<&mut Self, ResolutionError> {
        if self.dependency_graphs.contains_key(manager) {
            return Err(ResolutionError::DuplicateGraph {
                manager: manager.to_string(),
            });
        }

        self.dependency_graphs.insert(manager.to_string(), graph);
        self.add_packages(shared_packages);
        Ok(self)
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn build(self) -> AnalyzerResult {
        tracing::debug!(
            projects = self.projects.len(),
            packages = self.packages.len(),
            graphs = self.dependency_graphs.len(),
            "built analyzer result"
        );

        AnalyzerResult::new(
            self.projects.into_values().collect(),
            self.packages.into_values().collect(),
            self.issues,
            self.dependency_graphs,
        )
    }

    fn add_packages(&mut self, packages: Vec<Package>) {
        for package in packages {
            match self.packages.get(package.id()) {
                Some(existing) => {
                    if *existing != package {
                        tracing::warn!(
                            package = %package.id(),
                            "conflicting metadata for package, keeping the first one seen"
                        );
                    }
                }
                None => {
                    self.packages.insert(package.id().clone(), package);
                }
            }
        }
    }
}
