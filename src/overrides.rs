use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default overrides file name, looked up in the working directory when no
/// `--overrides` path is given.
pub const DEFAULT_OVERRIDES_FILE: &str = "license-overrides.toml";

/// A single `pattern → license` mapping from the overrides file.
///
/// The pattern is either a literal identifier or a prefix wildcard ending in
/// `*` (e.g. `github.com/acme/*`).
#[derive(Debug, Clone, Deserialize)]
pub struct OverrideRule {
    pub pattern: String,
    pub license: String,
}

#[derive(Debug, Default, Deserialize)]
struct OverridesFile {
    #[serde(default)]
    rules: Vec<OverrideRule>,
}

/// Ordered override rule list.
///
/// Declaration order in the file is authoritative: [`OverrideList::find`]
/// returns the license of the *first* matching rule, and the list is never
/// re-sorted by specificity. This keeps behavior reproducible against
/// existing override files.
#[derive(Debug, Default)]
pub struct OverrideList {
    rules: Vec<OverrideRule>,
}

impl OverrideList {
    pub fn new(rules: Vec<OverrideRule>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Return the license of the first rule matching `identifier`, in file
    /// order. Pure lookup; no side effects.
    pub fn find(&self, identifier: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule_matches(&rule.pattern, identifier))
            .map(|rule| rule.license.as_str())
    }
}

/// A pattern matches if it equals the identifier exactly, or ends in `*` and
/// the identifier starts with the part before the `*`.
fn rule_matches(pattern: &str, identifier: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => identifier.starts_with(prefix),
        None => pattern == identifier,
    }
}

/// Load the override rule list.
///
/// An explicit path that cannot be read or parsed is a fatal configuration
/// error: override ordering is semantically meaningful, so the run must not
/// proceed with a partial rule set. A missing default file yields an empty
/// list.
pub fn load_overrides(path: Option<&Path>) -> Result<OverrideList> {
    let path = match path {
        Some(p) => p,
        None => {
            let default = Path::new(DEFAULT_OVERRIDES_FILE);
            if !default.exists() {
                return Ok(OverrideList::default());
            }
            default
        }
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read overrides file {}", path.display()))?;
    let file: OverridesFile = toml::from_str(&content)
        .with_context(|| format!("invalid overrides file {}", path.display()))?;

    Ok(OverrideList::new(file.rules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn rule(pattern: &str, license: &str) -> OverrideRule {
        OverrideRule {
            pattern: pattern.to_string(),
            license: license.to_string(),
        }
    }

    #[test]
    fn test_exact_match() {
        let list = OverrideList::new(vec![rule("github.com/acme/widget", "MIT")]);
        assert_eq!(list.find("github.com/acme/widget"), Some("MIT"));
        assert_eq!(list.find("github.com/acme/widgets"), None);
    }

    #[test]
    fn test_wildcard_prefix() {
        let list = OverrideList::new(vec![rule("github.com/org/*", "Apache-2.0")]);
        assert_eq!(list.find("github.com/org/sub/pkg"), Some("Apache-2.0"));
        assert_eq!(list.find("github.com/other/pkg"), None);
    }

    #[test]
    fn test_first_match_wins_in_file_order() {
        // A broader rule declared first shadows a more specific later rule.
        let list = OverrideList::new(vec![
            rule("github.com/acme/*", "MIT"),
            rule("github.com/acme/widget", "GPL-3.0"),
        ]);
        assert_eq!(list.find("github.com/acme/widget"), Some("MIT"));
    }

    #[test]
    fn test_bare_star_matches_everything() {
        let list = OverrideList::new(vec![rule("*", "MIT")]);
        assert_eq!(list.find("anything"), Some("MIT"));
    }

    #[test]
    fn test_load_preserves_file_order() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "[[rules]]").unwrap();
        writeln!(f, "pattern = \"github.com/acme/*\"").unwrap();
        writeln!(f, "license = \"MIT\"").unwrap();
        writeln!(f, "[[rules]]").unwrap();
        writeln!(f, "pattern = \"github.com/acme/widget\"").unwrap();
        writeln!(f, "license = \"GPL-3.0\"").unwrap();

        let list = load_overrides(Some(f.path())).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.find("github.com/acme/widget"), Some("MIT"));
    }

    #[test]
    fn test_invalid_file_is_fatal() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "not valid toml [[").unwrap();
        assert!(load_overrides(Some(f.path())).is_err());
    }

    #[test]
    fn test_missing_explicit_path_is_fatal() {
        assert!(load_overrides(Some(Path::new("/nonexistent/overrides.toml"))).is_err());
    }
}
