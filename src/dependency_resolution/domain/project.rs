use super::{Issue, PackageId, PackageReference};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A named group of top-level dependencies of a project, e.g. "compile" or "test"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    name: String,
    #[serde(default)]
    dependencies: Vec<PackageReference>,
}

impl Scope {
    pub fn new(name: impl Into<String>, dependencies: Vec<PackageReference>) -> Self {
        Self {
            name: name.into(),
            dependencies,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dependencies(&self) -> &[PackageReference] {
        &self.dependencies
    }

    pub fn collect_package_ids(&self, ids: &mut BTreeSet<PackageId>) {
        for dependency in &self.dependencies {
            dependency.collect_package_ids(ids);
        }
    }

    pub(crate) fn map_issues(&self, f: &impl Fn(&Issue) -> Issue) -> Self {
        Self {
            name: self.name.clone(),
            dependencies: self.dependencies.iter().map(|d| d.map_issues(f)).collect(),
        }
    }
}

/// The dependency record of a project
///
/// Either the classic explicit scope trees, or a pending reference into the
/// dependency graph of the manager that produced the project. Graph-backed
/// projects only name their scopes; the graph holds the root fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum ProjectDependencies {
    Scopes { scopes: Vec<Scope> },
    Graph { scope_names: BTreeSet<String> },
}

/// One analyzed unit, e.g. a Gradle module or an NPM workspace package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: PackageId,
    definition_file_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    homepage_url: Option<String>,
    dependencies: ProjectDependencies,
}

impl Project {
    /// Creates a project in explicit form
    pub fn new(id: PackageId, definition_file_path: impl Into<String>, scopes: Vec<Scope>) -> Self {
        Self {
            id,
            definition_file_path: definition_file_path.into(),
            homepage_url: None,
            dependencies: ProjectDependencies::Scopes { scopes },
        }
    }

    /// Creates a project whose scopes live in a dependency graph
    pub fn graph_backed(
        id: PackageId,
        definition_file_path: impl Into<String>,
        scope_names: BTreeSet<String>,
    ) -> Self {
        Self {
            id,
            definition_file_path: definition_file_path.into(),
            homepage_url: None,
            dependencies: ProjectDependencies::Graph { scope_names },
        }
    }

    pub fn with_homepage_url(mut self, url: impl Into<String>) -> Self {
        self.homepage_url = Some(url.into());
        self
    }

    /// Returns a copy of this project in explicit form with the given scopes
    pub fn with_scopes(&self, scopes: Vec<Scope>) -> Self {
        Self {
            id: self.id.clone(),
            definition_file_path: self.definition_file_path.clone(),
            homepage_url: self.homepage_url.clone(),
            dependencies: ProjectDependencies::Scopes { scopes },
        }
    }

    /// Returns a copy of this project still referring to a graph, with the given scope names
    pub fn with_scope_names(&self, scope_names: BTreeSet<String>) -> Self {
        Self {
            id: self.id.clone(),
            definition_file_path: self.definition_file_path.clone(),
            homepage_url: self.homepage_url.clone(),
            dependencies: ProjectDependencies::Graph { scope_names },
        }
    }

    pub fn id(&self) -> &PackageId {
        &self.id
    }

    pub fn definition_file_path(&self) -> &str {
        &self.definition_file_path
    }

    pub fn homepage_url(&self) -> Option<&str> {
        self.homepage_url.as_deref()
    }

    pub fn dependencies(&self) -> &ProjectDependencies {
        &self.dependencies
    }

    /// The explicit scopes, or `None` while the project is still graph-backed
    pub fn scopes(&self) -> Option<&[Scope]> {
        match &self.dependencies {
            ProjectDependencies::Scopes { scopes } => Some(scopes),
            ProjectDependencies::Graph { .. } => None,
        }
    }

    pub fn is_graph_backed(&self) -> bool {
        matches!(self.dependencies, ProjectDependencies::Graph { .. })
    }

    /// Names of all scopes, regardless of the form of the project
    pub fn scope_names(&self) -> BTreeSet<String> {
        match &self.dependencies {
            ProjectDependencies::Scopes { scopes } => {
                scopes.iter().map(|s| s.name().to_string()).collect()
            }
            ProjectDependencies::Graph { scope_names } => scope_names.clone(),
        }
    }

    /// Ids reachable from the scope roots of an explicit project
    ///
    /// A graph-backed project yields an empty set; resolve it first.
    pub fn collect_package_ids(&self) -> BTreeSet<PackageId> {
        let mut ids = BTreeSet::new();
        for scope in self.scopes().unwrap_or_default() {
            scope.collect_package_ids(&mut ids);
        }
        ids
    }

    pub(crate) fn map_issues(&self, f: &impl Fn(&Issue) -> Issue) -> Self {
        match &self.dependencies {
            ProjectDependencies::Scopes { scopes } => {
                self.with_scopes(scopes.iter().map(|s| s.map_issues(f)).collect())
            }
            ProjectDependencies::Graph { .. } => self.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> PackageId {
        PackageId::new("Gradle", "com.example", name, "1.0").unwrap()
    }

    #[test]
    fn test_explicit_project_scopes() {
        let project = Project::new(
            id("app"),
            "app/build.gradle",
            vec![Scope::new("runtime", vec![PackageReference::new(id("lib"))])],
        );

        assert!(!project.is_graph_backed());
        assert_eq!(project.scopes().unwrap().len(), 1);
        assert_eq!(project.scope_names(), BTreeSet::from(["runtime".to_string()]));
        assert_eq!(project.collect_package_ids(), BTreeSet::from([id("lib")]));
    }

    #[test]
    fn test_graph_backed_project_has_no_scopes_yet() {
        let project = Project::graph_backed(
            id("app"),
            "app/build.gradle",
            BTreeSet::from(["compile".to_string(), "test".to_string()]),
        );

        assert!(project.is_graph_backed());
        assert!(project.scopes().is_none());
        assert_eq!(project.scope_names().len(), 2);
        assert!(project.collect_package_ids().is_empty());
    }

    #[test]
    fn test_with_scopes_keeps_identity() {
        let project = Project::graph_backed(id("app"), "build.gradle", BTreeSet::new())
            .with_homepage_url("https://example.com");
        let resolved = project.with_scopes(vec![Scope::new("compile", vec![])]);

        assert_eq!(resolved.id(), project.id());
        assert_eq!(resolved.definition_file_path(), "build.gradle");
        assert_eq!(resolved.homepage_url(), Some("https://example.com"));
        assert!(!resolved.is_graph_backed());
    }

    #[test]
    fn test_project_dependencies_serde_tag() {
        let project = Project::graph_backed(
            id("app"),
            "build.gradle",
            BTreeSet::from(["compile".to_string()]),
        );
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["dependencies"]["form"], "graph");
        assert_eq!(json["dependencies"]["scope_names"][0], "compile");

        let parsed: Project = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, project);
    }
}
