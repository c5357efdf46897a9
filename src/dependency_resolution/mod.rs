/// Dependency resolution core - domain model and pure services
///
/// Nothing in here performs I/O. All services take immutable inputs and
/// return new values, so they can run for many projects at once.
pub mod domain;
pub mod services;
