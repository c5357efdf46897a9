use crate::dependency_resolution::domain::{
    Project, ProjectDependencies, ScopeExclude, ScopeExcludeReason,
};
use crate::shared::Result;
use std::cell::Cell;

/// Maximum number of scope exclusions to prevent DoS attacks
const MAX_EXCLUDE_PATTERNS: usize = 64;

/// Maximum length of a single exclusion pattern
const MAX_PATTERN_LENGTH: usize = 255;

/// ScopeFilter - Removes excluded scopes from projects
///
/// Supports wildcard patterns using '*' to match zero or more characters.
/// Patterns are case-sensitive. Matching happens on scope names only; the
/// packages of a removed scope are dropped later by the reconciler when they
/// are no longer reachable.
#[derive(Debug)]
pub struct ScopeFilter {
    patterns: Vec<ExcludePattern>,
}

impl ScopeFilter {
    /// Creates a new ScopeFilter from configured exclusions
    ///
    /// # Errors
    /// - Too many exclusions (> MAX_EXCLUDE_PATTERNS)
    /// - Invalid pattern format (empty, length, characters, only wildcards)
    pub fn new(excludes: Vec<ScopeExclude>) -> Result<Self> {
        if excludes.len() > MAX_EXCLUDE_PATTERNS {
            anyhow::bail!(
                "Too many scope exclusions: {} (maximum: {})",
                excludes.len(),
                MAX_EXCLUDE_PATTERNS
            );
        }

        let patterns = excludes
            .into_iter()
            .map(ExcludePattern::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// A filter that excludes nothing
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns `project` without the scopes matching any exclusion
    ///
    /// Works on both forms: explicit scopes are removed, and for a project
    /// that is still graph-backed the scope names are removed.
    pub fn filter_project(&self, project: &Project) -> Project {
        if self.is_empty() {
            return project.clone();
        }

        match project.dependencies() {
            ProjectDependencies::Scopes { scopes } => {
                let kept = scopes
                    .iter()
                    .filter(|scope| !self.is_excluded(project, scope.name()))
                    .cloned()
                    .collect();
                project.with_scopes(kept)
            }
            ProjectDependencies::Graph { scope_names } => {
                let kept = scope_names
                    .iter()
                    .filter(|name| !self.is_excluded(project, name))
                    .cloned()
                    .collect();
                project.with_scope_names(kept)
            }
        }
    }

    /// The reason of the first exclusion matching `scope_name`, if any
    ///
    /// Every matching pattern is marked as used, not only the first.
    pub fn exclusion_reason(&self, scope_name: &str) -> Option<ScopeExcludeReason> {
        let mut reason = None;
        for pattern in &self.patterns {
            if pattern.matches(scope_name) && reason.is_none() {
                reason = Some(pattern.reason);
            }
        }
        reason
    }

    /// Returns the patterns that did not match any scope so far
    ///
    /// Call after filtering to report exclusions that had no effect.
    pub fn get_unmatched_patterns(&self) -> Vec<String> {
        self.patterns
            .iter()
            .filter(|p| !p.matched.get())
            .map(|p| p.original.clone())
            .collect()
    }

    fn is_excluded(&self, project: &Project, scope_name: &str) -> bool {
        match self.exclusion_reason(scope_name) {
            Some(reason) => {
                tracing::debug!(
                    project = %project.id(),
                    scope = scope_name,
                    %reason,
                    "excluding scope"
                );
                true
            }
            None => false,
        }
    }
}

/// A single exclusion with its compiled matcher
#[derive(Debug)]
struct ExcludePattern {
    original: String,
    reason: ScopeExcludeReason,
    matcher: PatternMatcher,
    matched: Cell<bool>,
}

impl ExcludePattern {
    fn new(exclude: ScopeExclude) -> Result<Self> {
        validate_pattern(&exclude.pattern)?;
        let matcher = compile_pattern(&exclude.pattern);

        Ok(Self {
            original: exclude.pattern,
            reason: exclude.reason,
            matcher,
            matched: Cell::new(false),
        })
    }

    fn matches(&self, scope_name: &str) -> bool {
        let is_match = self.matcher.matches(scope_name);
        if is_match {
            self.matched.set(true);
        }
        is_match
    }
}

#[derive(Debug)]
enum PatternMatcher {
    /// "compile"
    Exact(String),
    /// "*Classpath"
    EndsWith(String),
    /// "test*"
    StartsWith(String),
    /// "*Test*"
    Contains(String),
    /// "test*Runtime*Classpath"; parts must appear in order and the first and
    /// last part anchor the ends unless the pattern starts or ends with '*'
    Multiple {
        parts: Vec<String>,
        anchored_start: bool,
        anchored_end: bool,
    },
}

impl PatternMatcher {
    fn matches(&self, scope_name: &str) -> bool {
        match self {
            PatternMatcher::Exact(s) => scope_name == s,
            PatternMatcher::EndsWith(suffix) => scope_name.ends_with(suffix),
            PatternMatcher::StartsWith(prefix) => scope_name.starts_with(prefix),
            PatternMatcher::Contains(middle) => scope_name.contains(middle),
            PatternMatcher::Multiple {
                parts,
                anchored_start,
                anchored_end,
            } => match_parts(scope_name, parts, *anchored_start, *anchored_end),
        }
    }
}

fn match_parts(
    scope_name: &str,
    parts: &[String],
    anchored_start: bool,
    anchored_end: bool,
) -> bool {
    let mut rest = scope_name;

    let mut middle = parts;
    if anchored_start {
        let Some((first, tail)) = middle.split_first() else {
            return true;
        };
        let Some(stripped) = rest.strip_prefix(first.as_str()) else {
            return false;
        };
        rest = stripped;
        middle = tail;
    }

    let mut last = None;
    if anchored_end {
        if let Some((end, init)) = middle.split_last() {
            last = Some(end);
            middle = init;
        }
    }

    for part in middle {
        match rest.find(part.as_str()) {
            Some(pos) => rest = &rest[pos + part.len()..],
            None => return false,
        }
    }

    match last {
        Some(end) => rest.ends_with(end.as_str()),
        None => true,
    }
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        anyhow::bail!("Scope exclusion pattern cannot be empty");
    }

    if pattern.len() > MAX_PATTERN_LENGTH {
        anyhow::bail!(
            "Scope exclusion pattern is too long: {} chars (maximum: {})",
            pattern.len(),
            MAX_PATTERN_LENGTH
        );
    }

    if let Some(ch) = pattern.chars().find(|&c| !is_valid_pattern_char(c)) {
        anyhow::bail!(
            "Scope exclusion pattern contains invalid character '{}' in pattern '{}'. \
             Only alphanumeric characters, hyphens, underscores, dots, colons \
             and asterisks (*) are allowed.",
            ch,
            pattern
        );
    }

    if pattern.chars().all(|c| c == '*') {
        anyhow::bail!(
            "Scope exclusion pattern cannot contain only wildcards: '{}'",
            pattern
        );
    }

    Ok(())
}

fn is_valid_pattern_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '*')
}

fn compile_pattern(pattern: &str) -> PatternMatcher {
    let parts: Vec<String> = pattern
        .split('*')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    let anchored_start = !pattern.starts_with('*');
    let anchored_end = !pattern.ends_with('*');

    match (parts.as_slice(), anchored_start, anchored_end) {
        ([single], true, true) if !pattern.contains('*') => PatternMatcher::Exact(single.clone()),
        ([single], false, true) => PatternMatcher::EndsWith(single.clone()),
        ([single], true, false) => PatternMatcher::StartsWith(single.clone()),
        ([single], false, false) => PatternMatcher::Contains(single.clone()),
        _ => PatternMatcher::Multiple {
            parts,
            anchored_start,
            anchored_end,
        },
    }
}
