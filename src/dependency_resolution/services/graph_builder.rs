use crate::dependency_resolution::domain::{
    DependencyGraph, Fragment, Issue, PackageId, PackageLinkage, PackageReference, Project,
    ScopeRoots,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Key under which structurally identical fragments are interned
type FragmentKey = (PackageId, PackageLinkage, Vec<Issue>, Vec<usize>);

/// DependencyGraphBuilder service for package managers that share one graph
/// between many projects
///
/// Every reference tree added is interned bottom-up: a subtree that is
/// structurally identical to one already stored (same id, linkage, issues and
/// children) reuses the existing fragment. Children are always stored before
/// their parent, so each fragment only points to smaller indices and the
/// resulting graph cannot contain a cycle.
#[derive(Debug, Default)]
pub struct DependencyGraphBuilder {
    fragments: Vec<Fragment>,
    interned: HashMap<FragmentKey, usize>,
    scopes: BTreeMap<PackageId, ScopeRoots>,
}

impl DependencyGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a scope of a project, even if it never gets a dependency
    pub fn add_scope(&mut self, project: &PackageId, scope_name: &str) -> &mut Self {
        self.scopes
            .entry(project.clone())
            .or_default()
            .entry(scope_name.to_string())
            .or_default();
        self
    }

    /// Adds `reference` with its whole subtree as a top-level dependency of
    /// `scope_name` in `project`
    ///
    /// Adding the same tree twice to one scope leaves the scope unchanged.
    pub fn add_dependency(
        &mut self,
        project: &PackageId,
        scope_name: &str,
        reference: &PackageReference,
    ) -> &mut Self {
        let index = self.intern(reference);
        let roots = self
            .scopes
            .entry(project.clone())
            .or_default()
            .entry(scope_name.to_string())
            .or_default();
        if !roots.contains(&index) {
            roots.push(index);
        }
        self
    }

    /// Scope names declared so far for `project`
    pub fn scope_names(&self, project: &PackageId) -> BTreeSet<String> {
        self.scopes
            .get(project)
            .map(|roots| roots.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// A graph-backed project referring to the scopes declared for `id`
    pub fn graph_project(&self, id: PackageId, definition_file_path: &str) -> Project {
        let scope_names = self.scope_names(&id);
        Project::graph_backed(id, definition_file_path, scope_names)
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    pub fn build(self) -> DependencyGraph {
        tracing::debug!(
            fragments = self.fragments.len(),
            projects = self.scopes.len(),
            "built dependency graph"
        );
        DependencyGraph::new(self.fragments, self.scopes)
    }

    fn intern(&mut self, reference: &PackageReference) -> usize {
        let dependencies: Vec<usize> = reference
            .dependencies()
            .iter()
            .map(|child| self.intern(child))
            .collect();

        let key: FragmentKey = (
            reference.id().clone(),
            reference.linkage(),
            reference.issues().to_vec(),
            dependencies,
        );

        if let Some(&index) = self.interned.get(&key) {
            return index;
        }

        let index = self.fragments.len();
        let (id, linkage, issues, dependencies) = key.clone();
        self.fragments
            .push(Fragment::new(id, linkage, issues, dependencies));
        self.interned.insert(key, index);
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency_resolution::domain::Severity;

    fn id(name: &str) -> PackageId {
        PackageId::new("Gradle", "org.example", name, "1.0").unwrap()
    }

    fn leaf(name: &str) -> PackageReference {
        PackageReference::new(id(name))
    }

    #[test]
    fn test_identical_subtrees_are_stored_once() {
        let shared = PackageReference::new(id("guava")).with_dependency(leaf("failureaccess"));

        let mut builder = DependencyGraphBuilder::new();
        builder
            .add_dependency(&id("app"), "runtime", &shared)
            .add_dependency(&id("lib"), "compile", &shared)
            .add_dependency(
                &id("lib"),
                "test",
                &PackageReference::new(id("junit")).with_dependency(leaf("failureaccess")),
            );

        // failureaccess, guava, junit
        assert_eq!(builder.fragment_count(), 3);

        let graph = builder.build();
        assert_eq!(
            graph.scope_roots(&id("app"), "runtime"),
            graph.scope_roots(&id("lib"), "compile")
        );
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn test_children_precede_parents() {
        let tree = PackageReference::new(id("a"))
            .with_dependency(PackageReference::new(id("b")).with_dependency(leaf("c")))
            .with_dependency(leaf("d"));

        let mut builder = DependencyGraphBuilder::new();
        builder.add_dependency(&id("app"), "runtime", &tree);
        let graph = builder.build();

        for (index, fragment) in graph.fragments().iter().enumerate() {
            assert!(fragment.dependencies().iter().all(|&child| child < index));
        }
    }

    #[test]
    fn test_different_issues_or_linkage_are_not_merged() {
        let plain = leaf("a");
        let with_issue =
            leaf("a").with_issues(vec![Issue::new("Gradle", "unresolved", Severity::Error)]);
        let static_linked = leaf("a").with_linkage(PackageLinkage::Static);

        let mut builder = DependencyGraphBuilder::new();
        builder
            .add_dependency(&id("app"), "runtime", &plain)
            .add_dependency(&id("app"), "runtime", &with_issue)
            .add_dependency(&id("app"), "runtime", &static_linked);

        assert_eq!(builder.fragment_count(), 3);
    }

    #[test]
    fn test_adding_same_root_twice_is_noop() {
        let mut builder = DependencyGraphBuilder::new();
        builder
            .add_dependency(&id("app"), "runtime", &leaf("a"))
            .add_dependency(&id("app"), "runtime", &leaf("a"));

        let graph = builder.build();
        assert_eq!(graph.scope_roots(&id("app"), "runtime"), Some(&[0][..]));
    }

    #[test]
    fn test_add_scope_without_dependencies() {
        let mut builder = DependencyGraphBuilder::new();
        builder.add_scope(&id("app"), "test");

        let project = builder.graph_project(id("app"), "app/build.gradle");
        assert!(project.is_graph_backed());
        assert_eq!(project.scope_names(), BTreeSet::from(["test".to_string()]));

        let graph = builder.build();
        assert_eq!(graph.scope_roots(&id("app"), "test"), Some(&[][..]));
    }
}
