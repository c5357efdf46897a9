pub mod dependency_graph;
pub mod issue;
pub mod package;
pub mod package_id;
pub mod package_reference;
pub mod project;
pub mod results;
pub mod scope_exclude;

pub use dependency_graph::{DependencyGraph, Fragment, ScopeRoots};
pub use issue::{Issue, Severity};
pub use package::Package;
pub use package_id::PackageId;
pub use package_reference::{PackageLinkage, PackageReference};
pub use project::{Project, ProjectDependencies, Scope};
pub use results::{AnalyzerResult, DependencyRecord, PackageManagerResult, ProjectAnalyzerResult};
pub use scope_exclude::{ScopeExclude, ScopeExcludeReason};
