//! CycloneDX SBOM input parsing.
//!
//! This is an input collaborator for the resolution pipeline: it only has to
//! produce the fixed `{identifier, version, purl, is_vendor_or_replaced}`
//! component shape. Anything else in the document is ignored.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::Component;

#[derive(Debug, Deserialize)]
struct SbomDocument {
    #[serde(default)]
    components: Vec<SbomComponent>,
}

#[derive(Debug, Deserialize)]
struct SbomComponent {
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: String,
    purl: Option<String>,
}

/// Read a CycloneDX JSON document and return its component list in document
/// order.
pub fn load_components(path: &Path) -> Result<Vec<Component>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read SBOM file {}", path.display()))?;
    let doc: SbomDocument = serde_json::from_str(&content)
        .with_context(|| format!("invalid CycloneDX JSON in {}", path.display()))?;

    Ok(doc
        .components
        .into_iter()
        .map(|c| {
            let vendored = is_vendor_or_replaced(&c.name);
            Component {
                identifier: c.name,
                version: c.version,
                purl: c.purl,
                is_vendor_or_replaced: vendored,
            }
        })
        .collect())
}

/// Heuristic for internal, vendored, or locally replaced modules. These
/// carry manifest file names or vendor path fragments instead of real
/// package coordinates.
pub fn is_vendor_or_replaced(identifier: &str) -> bool {
    let id = identifier.trim();
    id.is_empty()
        || id.contains("modules/")
        || id.contains("vendor/")
        || id == "go.mod"
        || id.ends_with(".go.mod")
        || id.ends_with("requirements.txt")
        || id.ends_with("package-lock.json")
        || id.ends_with("bun.lock")
}

/// Derive the bare package name from a PURL:
/// `pkg:npm/hasown@2.0.2` → `hasown`.
///
/// Scoped npm packages arrive percent-encoded
/// (`pkg:npm/%40babel/core@7.0.0`); the scope marker and separator are
/// decoded back so the name matches what the registries expect.
pub fn purl_name(purl: &str) -> Option<String> {
    let body = match purl.split_once('/') {
        Some((_, rest)) => rest,
        None => purl,
    };
    let name = body.split('@').next().unwrap_or(body);
    let name = name
        .replace("%40", "@")
        .replace("%2F", "/")
        .replace("%2f", "/");
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_components() {
        let mut f = NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{
  "bomFormat": "CycloneDX",
  "components": [
    {{"name": "github.com/acme/widget", "version": "v1.2.0", "purl": "pkg:golang/github.com/acme/widget@v1.2.0"}},
    {{"name": "lodash", "version": "4.17.21"}},
    {{"name": "go.mod"}}
  ]
}}"#
        )
        .unwrap();

        let components = load_components(f.path()).unwrap();
        assert_eq!(components.len(), 3);
        assert_eq!(components[0].identifier, "github.com/acme/widget");
        assert_eq!(components[0].version, "v1.2.0");
        assert!(!components[0].is_vendor_or_replaced);
        assert_eq!(components[1].purl, None);
        assert_eq!(components[2].version, "");
        assert!(components[2].is_vendor_or_replaced);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "not json").unwrap();
        assert!(load_components(f.path()).is_err());
    }

    #[test]
    fn test_vendor_heuristic() {
        assert!(is_vendor_or_replaced("go.mod"));
        assert!(is_vendor_or_replaced("internal/vendor/foo"));
        assert!(is_vendor_or_replaced("ui/node_modules/package-lock.json"));
        assert!(is_vendor_or_replaced(""));
        assert!(!is_vendor_or_replaced("github.com/acme/widget"));
        assert!(!is_vendor_or_replaced("lodash"));
    }

    #[test]
    fn test_purl_name() {
        assert_eq!(purl_name("pkg:npm/hasown@2.0.2"), Some("hasown".to_string()));
        assert_eq!(
            purl_name("pkg:golang/github.com/acme/widget@v1.2.0"),
            Some("github.com/acme/widget".to_string())
        );
        assert_eq!(purl_name(""), None);
    }

    #[test]
    fn test_purl_name_decodes_scoped_packages() {
        assert_eq!(
            purl_name("pkg:npm/%40babel/core@7.0.0"),
            Some("@babel/core".to_string())
        );
        assert_eq!(
            purl_name("pkg:npm/%40scope%2Fpkg@1.0.0"),
            Some("@scope/pkg".to_string())
        );
    }
}
