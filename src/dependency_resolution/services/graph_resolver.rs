use crate::dependency_resolution::domain::{
    AnalyzerResult, DependencyGraph, PackageReference, Project, ProjectAnalyzerResult,
    ProjectDependencies, Scope,
};
use crate::shared::error::GraphIntegrityError;
use std::collections::{HashMap, HashSet};

/// GraphResolver service expanding graph-backed projects into explicit trees
///
/// Expansion is a pure arena-to-tree materialization: every position in the
/// output owns its own copy of the subtree, so the result cannot be told apart
/// from a project that a manager emitted in explicit form.
pub struct GraphResolver;

impl GraphResolver {
    /// Returns `project` with explicit scopes
    ///
    /// Explicit projects are returned unchanged. For a graph-backed project,
    /// each declared scope that has root fragments for this project in `graph`
    /// becomes a scope, in scope-name order; declared scopes unknown to the
    /// graph are left out.
    ///
    /// # Errors
    /// - `MissingGraph` if the project is graph-backed and `graph` is `None`
    /// - `MissingFragment` if a root or child index does not exist
    /// - `Cycle` if a fragment is reachable from itself
    pub fn resolve_scopes(
        project: &Project,
        graph: Option<&DependencyGraph>,
    ) -> Result<Project, GraphIntegrityError> {
        let scope_names = match project.dependencies() {
            ProjectDependencies::Scopes { .. } => return Ok(project.clone()),
            ProjectDependencies::Graph { scope_names } => scope_names,
        };

        let graph = graph.ok_or_else(|| GraphIntegrityError::MissingGraph {
            project: project.id().clone(),
        })?;

        let mut expansion = Expansion::new(graph);
        let mut scopes = Vec::new();
        for scope_name in scope_names {
            let Some(roots) = graph.scope_roots(project.id(), scope_name) else {
                continue;
            };

            let dependencies = roots
                .iter()
                .map(|&root| expansion.expand(root))
                .collect::<Result<Vec<_>, _>>()?;
            scopes.push(Scope::new(scope_name.clone(), dependencies));
        }

        tracing::debug!(
            project = %project.id(),
            scopes = scopes.len(),
            fragments_expanded = expansion.expanded.len(),
            "resolved graph-backed project"
        );

        Ok(project.with_scopes(scopes))
    }

    /// Resolves the project of a single project result, keeping its packages and issues
    pub fn resolve_project_result(
        result: &ProjectAnalyzerResult,
        graph: Option<&DependencyGraph>,
    ) -> Result<ProjectAnalyzerResult, GraphIntegrityError> {
        let project = Self::resolve_scopes(result.project(), graph)?;
        Ok(result.with_project(project))
    }

    /// Expands every graph-backed project of an aggregated result using the
    /// retained graph that knows the project
    ///
    /// Retained graphs stay in the returned result.
    pub fn resolve_analyzer_result(
        result: &AnalyzerResult,
    ) -> Result<AnalyzerResult, GraphIntegrityError> {
        let projects = result
            .projects()
            .iter()
            .map(|project| Self::resolve_scopes(project, result.graph_for_project(project.id())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AnalyzerResult::new(
            projects,
            result.packages().to_vec(),
            result.issues().clone(),
            result.dependency_graphs().clone(),
        ))
    }
}

/// State of one resolution: memoized expansions and the current path
struct Expansion<'g> {
    graph: &'g DependencyGraph,
    expanded: HashMap<usize, PackageReference>,
    on_path: HashSet<usize>,
}

impl<'g> Expansion<'g> {
    fn new(graph: &'g DependencyGraph) -> Self {
        Self {
            graph,
            expanded: HashMap::new(),
            on_path: HashSet::new(),
        }
    }

    fn expand(&mut self, index: usize) -> Result<PackageReference, GraphIntegrityError> {
        if let Some(reference) = self.expanded.get(&index) {
            return Ok(reference.clone());
        }

        let graph = self.graph;
        let fragment = graph.fragment(index)?;
        if !self.on_path.insert(index) {
            return Err(GraphIntegrityError::Cycle {
                index,
                id: fragment.id().clone(),
            });
        }

        let dependencies = fragment
            .dependencies()
            .iter()
            .map(|&child| self.expand(child))
            .collect::<Result<Vec<_>, _>>()?;

        self.on_path.remove(&index);

        let reference = PackageReference::new(fragment.id().clone())
            .with_linkage(fragment.linkage())
            .with_issues(fragment.issues().to_vec())
            .with_dependencies(dependencies);
        self.expanded.insert(index, reference.clone());
        Ok(reference)
    }
}
