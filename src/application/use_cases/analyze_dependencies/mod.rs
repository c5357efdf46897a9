use crate::application::dto::{AnalysisRequest, AnalysisResponse, ManagerFailure};
use crate::application::manager_registry::ManagerRegistry;
use crate::dependency_resolution::domain::{
    DependencyGraph, DependencyRecord, Package, PackageId, PackageManagerResult,
    ProjectAnalyzerResult,
};
use crate::dependency_resolution::services::{
    AnalyzerResultBuilder, GraphResolver, PackageSetReconciler, ScopeFilter,
};
use crate::ports::outbound::{PackageManager, ProgressReporter};
use crate::shared::error::{DeptreeError, ResolutionError};
use crate::shared::Result;
use futures::stream::{self, StreamExt};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// AnalyzeDependenciesUseCase - Core use case for a dependency analysis run
///
/// Orchestrates the run using generic dependency injection for progress
/// reporting and an explicitly built `ManagerRegistry`:
/// 1. assign definition files to the managers that claim them
/// 2. invoke the managers concurrently
/// 3. resolve, filter and reconcile each manager's projects
/// 4. fold every successful contribution into one `AnalyzerResult`
///
/// A manager that fails, or whose output is structurally broken, contributes
/// nothing; the run goes on with the others.
///
/// # Type Parameters
/// * `PR` - ProgressReporter implementation
pub struct AnalyzeDependenciesUseCase<PR> {
    registry: ManagerRegistry,
    progress_reporter: PR,
}

/// Everything one manager adds to the aggregate, computed before any of it is added
struct Contribution {
    graph: Option<(DependencyGraph, Vec<Package>)>,
    results: Vec<ProjectAnalyzerResult>,
}

impl<PR> AnalyzeDependenciesUseCase<PR>
where
    PR: ProgressReporter,
{
    /// Creates a new AnalyzeDependenciesUseCase with injected dependencies
    pub fn new(registry: ManagerRegistry, progress_reporter: PR) -> Self {
        Self {
            registry,
            progress_reporter,
        }
    }

    /// Executes the analysis
    ///
    /// # Errors
    /// Returns an error if the scope exclusions are invalid or no registered
    /// manager claims any of the definition files. Failures of single
    /// managers are reported in the response instead.
    pub async fn execute(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        // Step 1: Compile scope exclusions
        let scope_filter = ScopeFilter::new(request.excluded_scopes.clone())?;

        // Step 2: Assign definition files to managers
        let assignment = self.registry.assign(&request.definition_files);
        for file in &assignment.unassigned {
            tracing::warn!(file = %file.display(), "no package manager claims definition file");
            self.progress_reporter.report(&format!(
                "⚠️  Skipping {}: no enabled package manager handles it",
                file.display()
            ));
        }
        if assignment.assigned.is_empty() {
            return Err(DeptreeError::Validation {
                message: format!(
                    "None of the {} definition files is handled by an enabled package manager",
                    request.definition_files.len()
                ),
            }
            .into());
        }

        // Step 3: Run managers concurrently
        let outcomes = self
            .run_managers(assignment.assigned, request.max_concurrent_managers)
            .await;

        // Step 4: Fold contributions in manager name order
        let mut builder = AnalyzerResultBuilder::new();
        let mut failed_managers = Vec::new();
        for (manager, outcome) in outcomes {
            let folded = outcome.and_then(|result| {
                let contribution = Self::prepare_contribution(result, &scope_filter)?;
                Self::apply_contribution(&manager, contribution, &mut builder)?;
                Ok(())
            });

            if let Err(e) = folded {
                tracing::error!(
                    manager = %manager,
                    error = %e,
                    "package manager contribution dropped"
                );
                self.progress_reporter
                    .report_error(&format!("❌ {} failed: {}", manager, e));
                failed_managers.push(ManagerFailure {
                    manager,
                    message: e.to_string(),
                });
            }
        }

        // Step 5: Report exclusions without effect
        let unmatched_exclusions = scope_filter.get_unmatched_patterns();
        for pattern in &unmatched_exclusions {
            self.progress_reporter.report(&format!(
                "⚠️  Scope exclusion '{}' did not match any scope",
                pattern
            ));
        }

        let analyzer_result = builder.build();
        self.progress_reporter.report_completion(&format!(
            "✅ Analyzed {} projects with {} packages",
            analyzer_result.projects().len(),
            analyzer_result.packages().len()
        ));

        Ok(AnalysisResponse::new(
            analyzer_result,
            failed_managers,
            unmatched_exclusions,
        ))
    }

    /// Invokes the managers with at most `max_concurrent` running at once
    ///
    /// Outcomes are returned sorted by manager name, so folding them does not
    /// depend on which manager finished first.
    async fn run_managers(
        &self,
        assigned: Vec<(&dyn PackageManager, Vec<PathBuf>)>,
        max_concurrent: usize,
    ) -> Vec<(String, Result<PackageManagerResult>)> {
        let total = assigned.len();
        self.progress_reporter
            .report(&format!("🔍 Resolving dependencies with {} package managers...", total));

        let mut pending = stream::iter(assigned)
            .map(|(manager, files)| async move {
                tracing::debug!(
                    manager = manager.name(),
                    files = files.len(),
                    "invoking package manager"
                );
                let outcome = manager.resolve_dependencies(&files).await;
                (manager.name().to_string(), outcome)
            })
            .buffer_unordered(max_concurrent);

        let mut outcomes = Vec::with_capacity(total);
        while let Some((manager, outcome)) = pending.next().await {
            self.progress_reporter
                .report_progress(outcomes.len() + 1, total, Some(manager.as_str()));
            outcomes.push((manager, outcome));
        }

        outcomes.sort_by(|a, b| a.0.cmp(&b.0));
        outcomes
    }

    /// Resolves, filters and reconciles all projects of one manager run
    ///
    /// Pure; the aggregator is only touched once this succeeded.
    fn prepare_contribution(
        result: PackageManagerResult,
        scope_filter: &ScopeFilter,
    ) -> std::result::Result<Contribution, ResolutionError> {
        let project_count = result.project_count();
        let (project_results, record, shared_packages) = result.into_parts();

        let graph = match &record {
            DependencyRecord::Graph { graph } => {
                graph.validate()?;
                Some(graph)
            }
            DependencyRecord::Classic => None,
        };

        let mut results = Vec::with_capacity(project_count);
        for project_result in project_results.into_values().flatten() {
            let resolved = GraphResolver::resolve_scopes(project_result.project(), graph)?;
            let filtered = scope_filter.filter_project(&resolved);
            results.push(PackageSetReconciler::reconcile(
                project_result,
                filtered,
                &shared_packages,
                project_count,
            ));
        }

        let graph = match record {
            DependencyRecord::Graph { graph } => {
                let packages = if scope_filter.is_empty() {
                    shared_packages
                } else {
                    Self::packages_in_use(shared_packages, &results)
                };
                Some((graph, packages))
            }
            DependencyRecord::Classic => None,
        };

        Ok(Contribution { graph, results })
    }

    /// Shared packages that ended up in at least one project's package set
    fn packages_in_use(
        shared_packages: Vec<Package>,
        results: &[ProjectAnalyzerResult],
    ) -> Vec<Package> {
        let in_use: BTreeSet<&PackageId> = results
            .iter()
            .flat_map(|result| result.packages().iter().map(Package::id))
            .collect();
        shared_packages
            .into_iter()
            .filter(|package| in_use.contains(package.id()))
            .collect()
    }

    fn apply_contribution(
        manager: &str,
        contribution: Contribution,
        builder: &mut AnalyzerResultBuilder,
    ) -> std::result::Result<(), ResolutionError> {
        if let Some((graph, packages)) = contribution.graph {
            builder.add_dependency_graph(manager, graph, packages)?;
        }
        for result in contribution.results {
            builder.add_result(result);
        }
        Ok(())
    }
}
