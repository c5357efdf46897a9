use crate::dependency_resolution::domain::AnalyzerResult;
use crate::ports::outbound::ResultFormatter;
use crate::shared::Result;
use anyhow::Context;

/// YamlFormatter adapter
pub struct YamlFormatter;

impl YamlFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YamlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for YamlFormatter {
    fn format(&self, result: &AnalyzerResult) -> Result<String> {
        serde_yaml_ng::to_string(result).context("Failed to serialize analyzer result to YAML")
    }
}
