use crate::dependency_resolution::domain::AnalyzerResult;
use crate::ports::outbound::ResultFormatter;
use crate::shared::Result;
use anyhow::Context;

/// JsonFormatter adapter producing pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for JsonFormatter {
    fn format(&self, result: &AnalyzerResult) -> Result<String> {
        serde_json::to_string_pretty(result).context("Failed to serialize analyzer result to JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency_resolution::domain::{Package, PackageId, Project};
    use std::collections::BTreeMap;

    #[test]
    fn test_format_round_trips() {
        let id = PackageId::new("Cargo", "", "app", "0.1.0").unwrap();
        let result = AnalyzerResult::new(
            vec![Project::new(id.clone(), "Cargo.toml", vec![])],
            vec![Package::new(PackageId::new("Cargo", "", "serde", "1.0.0").unwrap())],
            BTreeMap::new(),
            BTreeMap::new(),
        );

        let json = JsonFormatter::new().format(&result).unwrap();
        assert!(json.contains("\"Cargo::app:0.1.0\""));

        let parsed: AnalyzerResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }
}
