use super::{Issue, PackageId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How a dependency is linked into its dependent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageLinkage {
    #[default]
    Dynamic,
    Static,
    /// A dynamic dependency on another project of the same analysis
    ProjectDynamic,
    /// A static dependency on another project of the same analysis
    ProjectStatic,
}

impl PackageLinkage {
    fn is_default(&self) -> bool {
        *self == PackageLinkage::Dynamic
    }
}

/// A node in a project's resolved dependency tree
///
/// Each reference owns its children: the same package appearing at two
/// positions of a tree yields two independent values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageReference {
    id: PackageId,
    #[serde(default, skip_serializing_if = "PackageLinkage::is_default")]
    linkage: PackageLinkage,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    dependencies: Vec<PackageReference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    issues: Vec<Issue>,
}

impl PackageReference {
    pub fn new(id: PackageId) -> Self {
        Self {
            id,
            linkage: PackageLinkage::default(),
            dependencies: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn with_linkage(mut self, linkage: PackageLinkage) -> Self {
        self.linkage = linkage;
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<PackageReference>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_dependency(mut self, dependency: PackageReference) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn with_issues(mut self, issues: Vec<Issue>) -> Self {
        self.issues = issues;
        self
    }

    pub fn id(&self) -> &PackageId {
        &self.id
    }

    pub fn linkage(&self) -> PackageLinkage {
        self.linkage
    }

    pub fn dependencies(&self) -> &[PackageReference] {
        &self.dependencies
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Adds this id and every id below it to `ids`
    pub fn collect_package_ids(&self, ids: &mut BTreeSet<PackageId>) {
        ids.insert(self.id.clone());
        for dependency in &self.dependencies {
            dependency.collect_package_ids(ids);
        }
    }

    /// Appends the issues of this reference and all of its descendants, depth first
    pub fn collect_issues<'a>(&'a self, issues: &mut Vec<&'a Issue>) {
        issues.extend(self.issues.iter());
        for dependency in &self.dependencies {
            dependency.collect_issues(issues);
        }
    }

    /// Returns a copy with `f` applied to every issue in the subtree
    pub fn map_issues(&self, f: &impl Fn(&Issue) -> Issue) -> Self {
        Self {
            id: self.id.clone(),
            linkage: self.linkage,
            dependencies: self.dependencies.iter().map(|d| d.map_issues(f)).collect(),
            issues: self.issues.iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency_resolution::domain::Severity;

    fn id(name: &str) -> PackageId {
        PackageId::new("Maven", "org.example", name, "1.0").unwrap()
    }

    #[test]
    fn test_collect_package_ids_includes_all_levels() {
        let tree = PackageReference::new(id("a")).with_dependency(
            PackageReference::new(id("b")).with_dependency(PackageReference::new(id("c"))),
        );

        let mut ids = BTreeSet::new();
        tree.collect_package_ids(&mut ids);
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&id("c")));
    }

    #[test]
    fn test_collect_issues_depth_first() {
        let tree = PackageReference::new(id("a"))
            .with_issues(vec![Issue::new("Maven", "top", Severity::Warning)])
            .with_dependency(
                PackageReference::new(id("b"))
                    .with_issues(vec![Issue::new("Maven", "nested", Severity::Error)]),
            );

        let mut issues = Vec::new();
        tree.collect_issues(&mut issues);
        let messages: Vec<&str> = issues.iter().map(|i| i.message()).collect();
        assert_eq!(messages, vec!["top", "nested"]);
    }

    #[test]
    fn test_map_issues_keeps_shape() {
        let tree = PackageReference::new(id("a"))
            .with_linkage(PackageLinkage::Static)
            .with_dependency(
                PackageReference::new(id("b"))
                    .with_issues(vec![Issue::new("Maven", "x", Severity::Hint)]),
            );

        let mapped = tree
            .map_issues(&|issue: &Issue| Issue::new("Other", issue.message(), issue.severity()));
        assert_eq!(mapped.linkage(), PackageLinkage::Static);
        assert_eq!(mapped.dependencies().len(), 1);
        assert_eq!(mapped.dependencies()[0].issues()[0].source(), "Other");
        assert_eq!(tree.dependencies()[0].issues()[0].source(), "Maven");
    }

    #[test]
    fn test_default_linkage_is_not_serialized() {
        let json = serde_json::to_string(&PackageReference::new(id("a"))).unwrap();
        assert_eq!(json, r#"{"id":"Maven:org.example:a:1.0"}"#);

        let json = serde_json::to_string(
            &PackageReference::new(id("a")).with_linkage(PackageLinkage::ProjectStatic),
        )
        .unwrap();
        assert!(json.contains("\"PROJECT_STATIC\""));
    }
}
