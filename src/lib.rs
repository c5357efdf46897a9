//! deptree - dependency graph resolution for package manager results
//!
//! Package managers report dependencies either as explicit per-project trees
//! or as references into one dependency graph shared by many projects. This
//! library turns both forms into the same explicit trees, assigns packages to
//! the projects that actually reach them, and folds the output of many
//! managers into one deterministic `AnalyzerResult`.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`dependency_resolution`): Domain model and pure resolution services
//! - **Application Layer** (`application`): Use cases, DTOs and the manager registry
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use deptree::prelude::*;
//! use std::path::Path;
//!
//! # async fn example() -> Result<()> {
//! let recording = FileSystemReader::new().read_recording(Path::new("gradle.json"))?;
//! let manager = ReplayManager::from_recording(recording);
//! let definition_files = manager.definition_files();
//!
//! let mut registry = ManagerRegistry::new();
//! registry.register(Box::new(manager))?;
//!
//! let use_case = AnalyzeDependenciesUseCase::new(registry, StderrProgressReporter::new());
//! let request = AnalysisRequest::builder()
//!     .definition_files(definition_files)
//!     .build()?;
//! let response = use_case.execute(request).await?;
//!
//! let canonical = CanonicalNormalizer::normalize_analyzer_result(&response.analyzer_result);
//! println!("{}", JsonFormatter::new().format(&canonical)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod dependency_resolution;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, YamlFormatter};
    pub use crate::adapters::outbound::replay::ReplayManager;
    pub use crate::application::dto::{
        AnalysisRequest, AnalysisResponse, ManagerFailure, OutputFormat,
    };
    pub use crate::application::manager_registry::ManagerRegistry;
    pub use crate::application::use_cases::AnalyzeDependenciesUseCase;
    pub use crate::dependency_resolution::domain::{
        AnalyzerResult, DependencyGraph, DependencyRecord, Fragment, Issue, Package, PackageId,
        PackageLinkage, PackageManagerResult, PackageReference, Project, ProjectAnalyzerResult,
        ProjectDependencies, Scope, ScopeExclude, ScopeExcludeReason, Severity,
    };
    pub use crate::dependency_resolution::services::{
        AnalyzerResultBuilder, CanonicalNormalizer, DependencyGraphBuilder, GraphResolver,
        PackageSetReconciler, ScopeFilter,
    };
    pub use crate::ports::outbound::{
        ManagerRecording, OutputPresenter, PackageManager, ProgressReporter, RecordingReader,
        ResultFormatter,
    };
    pub use crate::shared::error::{GraphIntegrityError, ResolutionError};
    pub use crate::shared::Result;
}
