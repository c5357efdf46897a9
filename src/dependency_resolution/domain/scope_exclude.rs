use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Why the dependencies of a scope are left out of the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScopeExcludeReason {
    BuildDependencyOf,
    DevDependencyOf,
    DocumentationDependencyOf,
    ProvidedDependencyOf,
    TestDependencyOf,
    RuntimeDependencyOf,
}

impl ScopeExcludeReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeExcludeReason::BuildDependencyOf => "BUILD_DEPENDENCY_OF",
            ScopeExcludeReason::DevDependencyOf => "DEV_DEPENDENCY_OF",
            ScopeExcludeReason::DocumentationDependencyOf => "DOCUMENTATION_DEPENDENCY_OF",
            ScopeExcludeReason::ProvidedDependencyOf => "PROVIDED_DEPENDENCY_OF",
            ScopeExcludeReason::TestDependencyOf => "TEST_DEPENDENCY_OF",
            ScopeExcludeReason::RuntimeDependencyOf => "RUNTIME_DEPENDENCY_OF",
        }
    }
}

impl fmt::Display for ScopeExcludeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScopeExcludeReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BUILD_DEPENDENCY_OF" => Ok(ScopeExcludeReason::BuildDependencyOf),
            "DEV_DEPENDENCY_OF" => Ok(ScopeExcludeReason::DevDependencyOf),
            "DOCUMENTATION_DEPENDENCY_OF" => Ok(ScopeExcludeReason::DocumentationDependencyOf),
            "PROVIDED_DEPENDENCY_OF" => Ok(ScopeExcludeReason::ProvidedDependencyOf),
            "TEST_DEPENDENCY_OF" => Ok(ScopeExcludeReason::TestDependencyOf),
            "RUNTIME_DEPENDENCY_OF" => Ok(ScopeExcludeReason::RuntimeDependencyOf),
            _ => Err(format!("Invalid scope exclude reason: {}", s)),
        }
    }
}

/// A configured scope exclusion: a name pattern plus the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeExclude {
    pub pattern: String,
    pub reason: ScopeExcludeReason,
}

impl ScopeExclude {
    pub fn new(pattern: impl Into<String>, reason: ScopeExcludeReason) -> Self {
        Self {
            pattern: pattern.into(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_from_str_is_case_insensitive() {
        assert_eq!(
            "test_dependency_of".parse::<ScopeExcludeReason>().unwrap(),
            ScopeExcludeReason::TestDependencyOf
        );
        assert!("TEST".parse::<ScopeExcludeReason>().is_err());
    }

    #[test]
    fn test_reason_serde_matches_display() {
        let json = serde_json::to_string(&ScopeExcludeReason::DocumentationDependencyOf).unwrap();
        assert_eq!(json, "\"DOCUMENTATION_DEPENDENCY_OF\"");
        assert_eq!(
            ScopeExcludeReason::DocumentationDependencyOf.to_string(),
            "DOCUMENTATION_DEPENDENCY_OF"
        );
    }
}
