//! License-string normalization.
//!
//! Registries return licenses in inconsistent shapes: lowercase SPDX ids,
//! placeholder strings like `SEE LICENSE IN LICENSE.md`, or GitHub's
//! `NOASSERTION`. Every string a source client extracts passes through
//! [`normalize`] before it can count as a resolution.

/// Normalize a raw license string to a canonical SPDX identifier.
///
/// Returns `None` when the string carries no usable license information
/// (empty, `UNKNOWN`, `NOASSERTION`, or a `SEE LICENSE ...` placeholder),
/// so a client can treat it as not-found.
pub fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let upper = trimmed.to_uppercase();
    if upper == "UNKNOWN" || upper == "NOASSERTION" || upper.contains("SEE LICENSE") {
        return None;
    }

    // Fix common lowercase variants of well-known SPDX ids.
    let canonical = match trimmed.to_lowercase().as_str() {
        "mit" => "MIT",
        "isc" => "ISC",
        "unlicense" => "Unlicense",
        "apache-2.0" => "Apache-2.0",
        "bsd-2-clause" => "BSD-2-Clause",
        "bsd-3-clause" => "BSD-3-Clause",
        "mpl-2.0" => "MPL-2.0",
        "gpl-2.0" => "GPL-2.0",
        "gpl-3.0" => "GPL-3.0",
        "lgpl-2.1" => "LGPL-2.1",
        "lgpl-3.0" => "LGPL-3.0",
        "agpl-3.0" => "AGPL-3.0",
        "cc0-1.0" => "CC0-1.0",
        "0bsd" => "0BSD",
        _ => return Some(trimmed.to_string()),
    };

    Some(canonical.to_string())
}
