mod canonical_normalizer;
mod graph_builder;
mod graph_resolver;
mod package_set_reconciler;
mod result_aggregator;
mod scope_filter;

pub use canonical_normalizer::CanonicalNormalizer;
pub use graph_builder::DependencyGraphBuilder;
pub use graph_resolver::GraphResolver;
pub use package_set_reconciler::PackageSetReconciler;
pub use result_aggregator::AnalyzerResultBuilder;
pub use scope_filter::ScopeFilter;
