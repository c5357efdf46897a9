use super::{Issue, PackageId, PackageLinkage};
use crate::shared::error::GraphIntegrityError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Root fragment indices per scope name
pub type ScopeRoots = BTreeMap<String, Vec<usize>>;

/// One deduplicated node of a dependency graph
///
/// A fragment stands for a package together with its immediate children,
/// which are addressed by their index in the graph's fragment arena.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    id: PackageId,
    #[serde(default)]
    linkage: PackageLinkage,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    issues: Vec<Issue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    dependencies: Vec<usize>,
}

impl Fragment {
    pub fn new(
        id: PackageId,
        linkage: PackageLinkage,
        issues: Vec<Issue>,
        dependencies: Vec<usize>,
    ) -> Self {
        Self {
            id,
            linkage,
            issues,
            dependencies,
        }
    }

    pub fn id(&self) -> &PackageId {
        &self.id
    }

    pub fn linkage(&self) -> PackageLinkage {
        self.linkage
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn dependencies(&self) -> &[usize] {
        &self.dependencies
    }

    pub(crate) fn map_issues(&self, f: &impl Fn(&Issue) -> Issue) -> Self {
        Self {
            id: self.id.clone(),
            linkage: self.linkage,
            issues: self.issues.iter().map(f).collect(),
            dependencies: self.dependencies.clone(),
        }
    }
}

/// DependencyGraph aggregate shared by all projects of one package manager run
///
/// Identical subtrees are stored once as fragments. Each project maps its
/// scope names to the indices of the fragments that form the scope's top
/// level. The fragment adjacency is acyclic; graphs built with
/// [`DependencyGraphBuilder`](crate::dependency_resolution::services::DependencyGraphBuilder)
/// only ever point from a fragment to fragments with smaller indices.
///
/// The graph is immutable once built and may be read by any number of
/// resolutions at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DependencyGraph {
    fragments: Vec<Fragment>,
    #[serde(default)]
    scopes: BTreeMap<PackageId, ScopeRoots>,
}

impl DependencyGraph {
    pub fn new(fragments: Vec<Fragment>, scopes: BTreeMap<PackageId, ScopeRoots>) -> Self {
        Self { fragments, scopes }
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Looks up a fragment, failing if the index is out of range
    pub fn fragment(&self, index: usize) -> Result<&Fragment, GraphIntegrityError> {
        self.fragments
            .get(index)
            .ok_or(GraphIntegrityError::MissingFragment {
                index,
                fragment_count: self.fragments.len(),
            })
    }

    pub fn scopes(&self) -> &BTreeMap<PackageId, ScopeRoots> {
        &self.scopes
    }

    /// Root fragment indices of one scope of one project
    pub fn scope_roots(&self, project: &PackageId, scope_name: &str) -> Option<&[usize]> {
        self.scopes
            .get(project)
            .and_then(|roots| roots.get(scope_name))
            .map(Vec::as_slice)
    }

    pub fn scope_names(&self, project: &PackageId) -> BTreeSet<String> {
        self.scopes
            .get(project)
            .map(|roots| roots.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn knows_project(&self, project: &PackageId) -> bool {
        self.scopes.contains_key(project)
    }

    pub(crate) fn map_issues(&self, f: &impl Fn(&Issue) -> Issue) -> Self {
        Self {
            fragments: self.fragments.iter().map(|fr| fr.map_issues(f)).collect(),
            scopes: self.scopes.clone(),
        }
    }

    /// Checks that every referenced index exists and that no fragment is
    /// reachable from itself
    pub fn validate(&self) -> Result<(), GraphIntegrityError> {
        for roots in self.scopes.values().flat_map(BTreeMap::values) {
            for &root in roots {
                self.fragment(root)?;
            }
        }

        // Iterative three-colour depth first search over the whole arena.
        const UNVISITED: u8 = 0;
        const IN_PROGRESS: u8 = 1;
        const DONE: u8 = 2;

        let mut state = vec![UNVISITED; self.fragments.len()];
        for start in 0..self.fragments.len() {
            if state[start] != UNVISITED {
                continue;
            }

            let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
            state[start] = IN_PROGRESS;

            while let Some((index, next_child)) = stack.pop() {
                let fragment = self.fragment(index)?;
                match fragment.dependencies.get(next_child) {
                    Some(&child) => {
                        stack.push((index, next_child + 1));
                        match state.get(child) {
                            None => {
                                return Err(GraphIntegrityError::MissingFragment {
                                    index: child,
                                    fragment_count: self.fragments.len(),
                                })
                            }
                            Some(&IN_PROGRESS) => {
                                return Err(GraphIntegrityError::Cycle {
                                    index: child,
                                    id: self.fragments[child].id.clone(),
                                })
                            }
                            Some(&UNVISITED) => {
                                state[child] = IN_PROGRESS;
                                stack.push((child, 0));
                            }
                            Some(_) => {}
                        }
                    }
                    None => state[index] = DONE,
                }
            }
        }

        Ok(())
    }
}
