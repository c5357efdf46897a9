use crate::dependency_resolution::domain::{Package, PackageId, Project, ProjectAnalyzerResult};
use std::collections::{BTreeMap, BTreeSet};

/// PackageSetReconciler service assigning packages to resolved projects
///
/// Decides which of the packages a manager run discovered belong to one
/// project. Pure business logic; it never looks at the file system.
pub struct PackageSetReconciler;

impl PackageSetReconciler {
    /// Returns `result` with `resolved_project` and its package set
    ///
    /// Rules, first match wins:
    /// 1. a non-empty package set on `result` is kept as is
    /// 2. with more than one project in the manager run, the shared packages
    ///    are filtered to the ids reachable from the project's scopes
    /// 3. with a single project, all shared packages are attached, including
    ///    those no scope reaches
    ///
    /// Issues are passed through. Reconciling an already reconciled result
    /// again returns it unchanged.
    ///
    /// # Arguments
    /// * `result` - The project result as the manager produced it
    /// * `resolved_project` - The project with explicit scopes
    /// * `shared_packages` - Packages of the manager run not yet assigned
    /// * `project_count` - Number of projects the manager run produced
    pub fn reconcile(
        result: ProjectAnalyzerResult,
        resolved_project: Project,
        shared_packages: &[Package],
        project_count: usize,
    ) -> ProjectAnalyzerResult {
        let (_, packages, issues) = result.into_parts();

        if !packages.is_empty() {
            return ProjectAnalyzerResult::new(resolved_project, packages, issues);
        }

        let packages = if project_count > 1 {
            let closure = resolved_project.collect_package_ids();
            Self::filter_to_closure(shared_packages, &closure)
        } else {
            Self::dedup_by_id(shared_packages.iter())
        };

        tracing::debug!(
            project = %resolved_project.id(),
            packages = packages.len(),
            shared = shared_packages.len(),
            project_count,
            "reconciled package set"
        );

        ProjectAnalyzerResult::new(resolved_project, packages, issues)
    }

    /// Shared packages whose id is in `closure`, sorted by id
    fn filter_to_closure(
        shared_packages: &[Package],
        closure: &BTreeSet<PackageId>,
    ) -> Vec<Package> {
        Self::dedup_by_id(
            shared_packages
                .iter()
                .filter(|package| closure.contains(package.id())),
        )
    }

    /// Collapses packages with equal ids to the first one seen, sorted by id
    fn dedup_by_id<'a>(packages: impl Iterator<Item = &'a Package>) -> Vec<Package> {
        let mut by_id: BTreeMap<&PackageId, &Package> = BTreeMap::new();
        for package in packages {
            by_id.entry(package.id()).or_insert(package);
        }
        by_id.into_values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency_resolution::domain::{Issue, PackageReference, Scope, Severity};

    fn id(name: &str) -> PackageId {
        PackageId::new("NPM", "", name, "1.0.0").unwrap()
    }

    fn packages(names: &[&str]) -> Vec<Package> {
        names.iter().map(|name| Package::new(id(name))).collect()
    }

    fn ids(packages: &[Package]) -> Vec<String> {
        packages.iter().map(|p| p.id().name().to_string()).collect()
    }

    /// Project X with scope runtime: [A -> [B]]
    fn project_x() -> Project {
        Project::new(
            id("X"),
            "x/package.json",
            vec![Scope::new(
                "runtime",
                vec![PackageReference::new(id("A"))
                    .with_dependency(PackageReference::new(id("B")))],
            )],
        )
    }

    fn unreconciled(project: Project) -> ProjectAnalyzerResult {
        ProjectAnalyzerResult::new(project, vec![], vec![])
    }

    #[test]
    fn test_multi_project_filters_to_closure() {
        let shared = packages(&["A", "B", "C"]);
        let result =
            PackageSetReconciler::reconcile(unreconciled(project_x()), project_x(), &shared, 2);
        assert_eq!(ids(result.packages()), vec!["A", "B"]);
    }

    #[test]
    fn test_single_project_passthrough_keeps_unreachable() {
        let shared = packages(&["A", "B", "C"]);
        let result =
            PackageSetReconciler::reconcile(unreconciled(project_x()), project_x(), &shared, 1);
        assert_eq!(ids(result.packages()), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_existing_packages_are_kept() {
        let own = packages(&["Z"]);
        let result = PackageSetReconciler::reconcile(
            ProjectAnalyzerResult::new(project_x(), own.clone(), vec![]),
            project_x(),
            &packages(&["A", "B"]),
            2,
        );
        assert_eq!(result.packages(), own.as_slice());
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let shared = packages(&["A", "B", "C"]);
        let once =
            PackageSetReconciler::reconcile(unreconciled(project_x()), project_x(), &shared, 2);
        let twice = PackageSetReconciler::reconcile(once.clone(), project_x(), &shared, 2);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_issues_are_passed_through() {
        let issue = Issue::new("NPM", "peer dependency missing", Severity::Warning);
        let result = PackageSetReconciler::reconcile(
            ProjectAnalyzerResult::new(project_x(), vec![], vec![issue.clone()]),
            project_x(),
            &[],
            1,
        );
        assert_eq!(result.issues(), &[issue]);
    }

    #[test]
    fn test_duplicate_shared_packages_keep_first() {
        let first = Package::new(id("A")).with_description("first");
        let second = Package::new(id("A")).with_description("second");
        let result = PackageSetReconciler::reconcile(
            unreconciled(project_x()),
            project_x(),
            &[first.clone(), second],
            1,
        );
        assert_eq!(result.packages(), &[first]);
    }

    #[test]
    fn test_closure_ignores_packages_missing_from_shared_set() {
        // B is reachable but not discovered; it must not appear out of nowhere
        let shared = packages(&["A", "C"]);
        let result =
            PackageSetReconciler::reconcile(unreconciled(project_x()), project_x(), &shared, 3);
        assert_eq!(ids(result.packages()), vec!["A"]);
    }

    #[test]
    fn test_resolved_project_replaces_original() {
        let pending = Project::graph_backed(id("X"), "x/package.json", Default::default());
        let result = PackageSetReconciler::reconcile(unreconciled(pending), project_x(), &[], 2);
        assert_eq!(result.project(), &project_x());
        assert!(result.packages().is_empty());
    }
}
