use anyhow::Result;
use reqwest::Client;
use serde_json::Value;

use crate::config::HttpConfig;
use crate::license;

/// Fetch the license for an npm package from the public registry.
///
/// Uses the pinned-version endpoint when the SBOM carries a version,
/// otherwise resolves `dist-tags.latest`.
pub async fn fetch_license(
    client: &Client,
    name: &str,
    version: &str,
    http: &HttpConfig,
) -> Result<Option<String>> {
    // Scoped packages need URL encoding: @scope/pkg → %40scope%2Fpkg
    let encoded_name = name.replace('@', "%40").replace('/', "%2F");
    let pinned = !version.is_empty() && version != "*";
    let url = if pinned {
        format!("https://registry.npmjs.org/{}/{}", encoded_name, version)
    } else {
        format!("https://registry.npmjs.org/{}", encoded_name)
    };

    let request = client
        .get(&url)
        .header("User-Agent", super::USER_AGENT)
        .header("Accept", "application/json");

    let response = super::send_with_retry(request, http).await?;
    if !response.status().is_success() {
        return Ok(None);
    }

    let data: Value = response.json().await?;
    Ok(license_from_value(&data, pinned))
}

/// Extract and normalize the license from a registry payload.
///
/// For `/{name}/{version}` the license sits at the top level. For `/{name}`
/// it sits under `versions[dist-tags.latest]`, falling back to the top-level
/// field for old packuments.
fn license_from_value(data: &Value, pinned: bool) -> Option<String> {
    let raw = if pinned {
        data.get("license").and_then(license_field)
    } else {
        let latest = data
            .get("dist-tags")
            .and_then(|d| d.get("latest"))
            .and_then(|v| v.as_str());
        latest
            .and_then(|ver| {
                data.get("versions")
                    .and_then(|vs| vs.get(ver))
                    .and_then(|v| v.get("license"))
                    .and_then(license_field)
            })
            .or_else(|| data.get("license").and_then(license_field))
    };

    raw.and_then(|s| license::normalize(&s))
}

/// The `license` field may be a bare string or an object `{"type": ...}`.
fn license_field(value: &Value) -> Option<String> {
    value
        .as_str()
        .or_else(|| value.get("type").and_then(|t| t.as_str()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinned_version_payload() {
        let data: Value = serde_json::from_str(r#"{"name": "lodash", "license": "MIT"}"#).unwrap();
        assert_eq!(license_from_value(&data, true), Some("MIT".to_string()));
    }

    #[test]
    fn test_latest_tag_walk() {
        let data: Value = serde_json::from_str(
            r#"{
                "dist-tags": {"latest": "4.17.21"},
                "versions": {"4.17.21": {"license": "MIT"}},
                "license": "ISC"
            }"#,
        )
        .unwrap();
        assert_eq!(license_from_value(&data, false), Some("MIT".to_string()));
    }

    #[test]
    fn test_top_level_fallback() {
        let data: Value = serde_json::from_str(r#"{"license": "ISC"}"#).unwrap();
        assert_eq!(license_from_value(&data, false), Some("ISC".to_string()));
    }

    #[test]
    fn test_object_license_field() {
        let data: Value = serde_json::from_str(
            r#"{"license": {"type": "mit", "url": "https://example.com/LICENSE"}}"#,
        )
        .unwrap();
        assert_eq!(license_from_value(&data, true), Some("MIT".to_string()));
    }

    #[test]
    fn test_see_license_placeholder() {
        let data: Value =
            serde_json::from_str(r#"{"license": "SEE LICENSE IN LICENSE.md"}"#).unwrap();
        assert_eq!(license_from_value(&data, true), None);
    }

    #[test]
    fn test_missing_license() {
        let data: Value = serde_json::from_str(r#"{"name": "no-license"}"#).unwrap();
        assert_eq!(license_from_value(&data, true), None);
    }
}
