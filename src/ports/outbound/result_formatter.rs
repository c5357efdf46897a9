use crate::dependency_resolution::domain::AnalyzerResult;
use crate::shared::Result;

/// ResultFormatter port for serializing the aggregated result
pub trait ResultFormatter {
    /// Formats the analyzer result as a string
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, result: &AnalyzerResult) -> Result<String>;
}
