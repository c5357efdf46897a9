//! Configuration file support for deptree.
//!
//! Provides YAML-based configuration through `deptree.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::dependency_resolution::domain::ScopeExclude;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "deptree.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub excluded_scopes: Option<Vec<ScopeExclude>>,
    pub enabled_managers: Option<Vec<String>>,
    pub max_concurrent_managers: Option<usize>,
    pub canonical: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n\
             💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n\
             💡 Hint: Ensure the file contains valid YAML syntax \
             and scope exclusion reasons such as TEST_DEPENDENCY_OF.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref excludes) = config.excluded_scopes {
        for (i, entry) in excludes.iter().enumerate() {
            if entry.pattern.trim().is_empty() {
                bail!(
                    "Invalid config: excluded_scopes[{}].pattern must not be empty.\n\n\
                     💡 Hint: Each excluded_scopes entry needs a scope name pattern \
                     (e.g., \"test*\").",
                    i
                );
            }
        }
    }

    if let Some(ref managers) = config.enabled_managers {
        if let Some(i) = managers.iter().position(|m| m.trim().is_empty()) {
            bail!("Invalid config: enabled_managers[{}] must not be empty.", i);
        }
    }

    if config.max_concurrent_managers == Some(0) {
        bail!(
            "Invalid config: max_concurrent_managers must be at least 1.\n\n\
             💡 Hint: Remove the field to use the default of 4."
        );
    }

    Ok(())
}

fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!("⚠️  Warning: Unknown config field '{}' will be ignored.", key);
    }
}
