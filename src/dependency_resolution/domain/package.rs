use super::PackageId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Package value object: metadata about one resolved dependency
///
/// Packages are immutable once built. Everywhere outside this type they are
/// referred to by their [`PackageId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    id: PackageId,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    declared_licenses: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    homepage_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_artifact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    binary_artifact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vcs_url: Option<String>,
}

impl Package {
    pub fn new(id: PackageId) -> Self {
        Self {
            id,
            declared_licenses: BTreeSet::new(),
            description: String::new(),
            homepage_url: None,
            source_artifact: None,
            binary_artifact: None,
            vcs_url: None,
        }
    }

    pub fn with_declared_license(mut self, license: impl Into<String>) -> Self {
        self.declared_licenses.insert(license.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_homepage_url(mut self, url: impl Into<String>) -> Self {
        self.homepage_url = Some(url.into());
        self
    }

    pub fn with_source_artifact(mut self, url: impl Into<String>) -> Self {
        self.source_artifact = Some(url.into());
        self
    }

    pub fn with_binary_artifact(mut self, url: impl Into<String>) -> Self {
        self.binary_artifact = Some(url.into());
        self
    }

    pub fn with_vcs_url(mut self, url: impl Into<String>) -> Self {
        self.vcs_url = Some(url.into());
        self
    }

    pub fn id(&self) -> &PackageId {
        &self.id
    }

    pub fn declared_licenses(&self) -> &BTreeSet<String> {
        &self.declared_licenses
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn homepage_url(&self) -> Option<&str> {
        self.homepage_url.as_deref()
    }

    pub fn source_artifact(&self) -> Option<&str> {
        self.source_artifact.as_deref()
    }

    pub fn binary_artifact(&self) -> Option<&str> {
        self.binary_artifact.as_deref()
    }

    pub fn vcs_url(&self) -> Option<&str> {
        self.vcs_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_new_has_no_metadata() {
        let package = Package::new(PackageId::new("NPM", "", "lodash", "4.17.21").unwrap());
        assert_eq!(package.id().name(), "lodash");
        assert!(package.declared_licenses().is_empty());
        assert_eq!(package.description(), "");
        assert!(package.homepage_url().is_none());
        assert!(package.source_artifact().is_none());
        assert!(package.binary_artifact().is_none());
        assert!(package.vcs_url().is_none());
    }

    #[test]
    fn test_package_builder_methods() {
        let package = Package::new(PackageId::new("Maven", "junit", "junit", "4.13.2").unwrap())
            .with_declared_license("EPL-1.0")
            .with_declared_license("EPL-1.0")
            .with_description("JUnit")
            .with_homepage_url("https://junit.org")
            .with_source_artifact("https://repo1.maven.org/junit-4.13.2-sources.jar")
            .with_binary_artifact("https://repo1.maven.org/junit-4.13.2.jar")
            .with_vcs_url("https://github.com/junit-team/junit4.git");

        assert_eq!(package.declared_licenses().len(), 1);
        assert_eq!(package.description(), "JUnit");
        assert_eq!(package.homepage_url(), Some("https://junit.org"));
        assert!(package.source_artifact().unwrap().ends_with("sources.jar"));
        assert!(package.binary_artifact().unwrap().ends_with("4.13.2.jar"));
        assert!(package.vcs_url().is_some());
    }

    #[test]
    fn test_package_equality_is_structural() {
        let id = PackageId::new("Cargo", "", "serde", "1.0.0").unwrap();
        let plain = Package::new(id.clone());
        let described = Package::new(id).with_description("serialization");
        assert_ne!(plain, described);
        assert_eq!(plain.id(), described.id());
    }

    #[test]
    fn test_package_deserialize_minimal() {
        let package: Package = serde_json::from_str(r#"{"id":"Pip::requests:2.31.0"}"#).unwrap();
        assert_eq!(package.id().version(), "2.31.0");
        assert!(package.declared_licenses().is_empty());
    }
}
