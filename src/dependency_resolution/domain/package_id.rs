use crate::shared::Result;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Maximum length of a single identifier component (security limit)
const MAX_COMPONENT_LENGTH: usize = 255;

/// PackageId value object identifying a package or a project
///
/// Consists of the ecosystem type (e.g. "Maven", "NPM"), an optional
/// namespace, the name and the version. Equality and ordering are structural,
/// so the id is used as the join key between trees, graphs and package sets.
///
/// The string form is `type:namespace:name:version`, which is also the
/// serialized form so ids can key JSON maps. Only the version may contain
/// ':', so every id parses back from its string form unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageId {
    package_type: String,
    namespace: String,
    name: String,
    version: String,
}

impl PackageId {
    /// Creates a validated package id
    ///
    /// # Errors
    /// Returns an error if the type or name is empty, if the type, namespace
    /// or name contains ':', or if any component exceeds 255 bytes.
    pub fn new(
        package_type: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self> {
        let id = Self {
            package_type: package_type.into(),
            namespace: namespace.into(),
            name: name.into(),
            version: version.into(),
        };
        id.validate()?;
        Ok(id)
    }

    fn validate(&self) -> Result<()> {
        if self.package_type.is_empty() || self.name.is_empty() {
            anyhow::bail!("Invalid package id '{}': type and name must not be empty", self);
        }

        let prefix = [&self.package_type, &self.namespace, &self.name];
        if prefix.iter().any(|part| part.contains(':')) {
            anyhow::bail!(
                "Invalid package id '{}': only the version may contain ':'",
                self
            );
        }

        if prefix.iter().any(|part| part.len() > MAX_COMPONENT_LENGTH)
            || self.version.len() > MAX_COMPONENT_LENGTH
        {
            anyhow::bail!(
                "Invalid package id: a component exceeds {} bytes",
                MAX_COMPONENT_LENGTH
            );
        }

        Ok(())
    }

    pub fn package_type(&self) -> &str {
        &self.package_type
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.package_type, self.namespace, self.name, self.version
        )
    }
}

impl FromStr for PackageId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        // The version is the remainder, so it may contain ':' itself.
        let parts: Vec<&str> = s.splitn(4, ':').collect();
        let [package_type, namespace, name, version] = parts.as_slice() else {
            anyhow::bail!(
                "Invalid package id '{}': expected 'type:namespace:name:version'",
                s
            );
        };

        Self::new(*package_type, *namespace, *name, *version)
    }
}

impl Serialize for PackageId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PackageId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
