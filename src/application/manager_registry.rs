use crate::ports::outbound::PackageManager;
use crate::shared::error::DeptreeError;
use crate::shared::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// ManagerRegistry - the set of package managers taking part in one analysis
///
/// Built explicitly by the caller and handed to the use case. Names are
/// unique; iteration is always in name order.
#[derive(Default)]
pub struct ManagerRegistry {
    managers: BTreeMap<String, Box<dyn PackageManager>>,
}

/// Definition files grouped by the manager that claimed them
pub struct FileAssignment<'a> {
    /// Managers with at least one file, in name order
    pub assigned: Vec<(&'a dyn PackageManager, Vec<PathBuf>)>,
    /// Files no manager claimed
    pub unassigned: Vec<PathBuf>,
}

impl ManagerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a manager
    ///
    /// # Errors
    /// `DeptreeError::Validation` if a manager with the same name is registered
    pub fn register(&mut self, manager: Box<dyn PackageManager>) -> Result<()> {
        let name = manager.name().to_string();
        if self.managers.contains_key(&name) {
            return Err(DeptreeError::Validation {
                message: format!("Package manager '{}' is registered more than once", name),
            }
            .into());
        }
        self.managers.insert(name, manager);
        Ok(())
    }

    /// Keeps only the managers named in `enabled`, compared case-insensitively
    ///
    /// Returns the names in `enabled` that matched no registered manager.
    pub fn retain_enabled(&mut self, enabled: &[String]) -> Vec<String> {
        let unknown = enabled
            .iter()
            .filter(|name| !self.managers.keys().any(|k| k.eq_ignore_ascii_case(name)))
            .cloned()
            .collect();

        self.managers
            .retain(|name, _| enabled.iter().any(|e| e.eq_ignore_ascii_case(name)));
        unknown
    }

    pub fn names(&self) -> Vec<&str> {
        self.managers.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }

    /// Hands every file to each manager that claims it
    ///
    /// A file can be claimed by several managers; each of them gets it.
    pub fn assign(&self, definition_files: &[PathBuf]) -> FileAssignment<'_> {
        let assigned = self
            .managers
            .values()
            .filter_map(|manager| {
                let files: Vec<PathBuf> = definition_files
                    .iter()
                    .filter(|file| manager.matches_definition_file(file))
                    .cloned()
                    .collect();
                (!files.is_empty()).then_some((&**manager, files))
            })
            .collect();

        let unassigned = definition_files
            .iter()
            .filter(|file| {
                !self
                    .managers
                    .values()
                    .any(|manager| manager.matches_definition_file(file))
            })
            .cloned()
            .collect();

        FileAssignment {
            assigned,
            unassigned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency_resolution::domain::PackageManagerResult;
    use async_trait::async_trait;
    use std::path::Path;

    struct SuffixManager {
        name: &'static str,
        suffix: &'static str,
    }

    #[async_trait]
    impl PackageManager for SuffixManager {
        fn name(&self) -> &str {
            self.name
        }

        fn matches_definition_file(&self, path: &Path) -> bool {
            path.to_string_lossy().ends_with(self.suffix)
        }

        async fn resolve_dependencies(&self, _files: &[PathBuf]) -> Result<PackageManagerResult> {
            Ok(PackageManagerResult::default())
        }
    }

    fn registry() -> ManagerRegistry {
        let mut registry = ManagerRegistry::new();
        registry
            .register(Box::new(SuffixManager { name: "NPM", suffix: "package.json" }))
            .unwrap();
        registry
            .register(Box::new(SuffixManager { name: "Gradle", suffix: ".gradle" }))
            .unwrap();
        registry
            .register(Box::new(SuffixManager { name: "Yarn", suffix: "package.json" }))
            .unwrap();
        registry
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut registry = registry();
        let result = registry.register(Box::new(SuffixManager { name: "NPM", suffix: "x" }));
        assert!(result.unwrap_err().to_string().contains("more than once"));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_names_are_sorted() {
        assert_eq!(registry().names(), vec!["Gradle", "NPM", "Yarn"]);
    }

    #[test]
    fn test_assign_groups_files_per_manager() {
        let files = vec![
            PathBuf::from("web/package.json"),
            PathBuf::from("app/build.gradle"),
            PathBuf::from("README.md"),
        ];
        let registry = registry();
        let assignment = registry.assign(&files);

        let names: Vec<&str> = assignment.assigned.iter().map(|(m, _)| m.name()).collect();
        assert_eq!(names, vec!["Gradle", "NPM", "Yarn"]);
        assert_eq!(assignment.assigned[1].1, vec![PathBuf::from("web/package.json")]);
        assert_eq!(assignment.unassigned, vec![PathBuf::from("README.md")]);
    }

    #[test]
    fn test_retain_enabled() {
        let mut registry = registry();
        let unknown = registry.retain_enabled(&["npm".to_string(), "Maven".to_string()]);

        assert_eq!(registry.names(), vec!["NPM"]);
        assert_eq!(unknown, vec!["Maven".to_string()]);
    }
}
