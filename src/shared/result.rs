/// Result alias used by the application, adapter and CLI layers.
/// The resolution services return their own typed errors, which convert into `anyhow::Error`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
