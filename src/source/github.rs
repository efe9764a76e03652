use anyhow::Result;
use reqwest::Client;
use serde_json::Value;

use crate::config::HttpConfig;
use crate::license;

/// Go vanity import prefixes and the GitHub organizations they redirect to.
const VANITY_PREFIXES: &[(&str, &str)] = &[
    ("golang.org/x/", "github.com/golang/"),
    ("go.uber.org/", "github.com/uber-go/"),
    ("go.etcd.io/", "github.com/etcd-io/"),
];

/// Rewrite a Go vanity import path to its GitHub home, if it has one.
fn map_vanity(identifier: &str) -> String {
    for (vanity, github) in VANITY_PREFIXES {
        if let Some(rest) = identifier.strip_prefix(vanity) {
            return format!("{}{}", github, rest);
        }
    }
    identifier.to_string()
}

/// Extract `(owner, repo)` when the identifier (after vanity mapping) is a
/// GitHub-hosted path. Deeper path segments are ignored — the license lives
/// on the repository.
pub fn hosted_repo(identifier: &str) -> Option<(String, String)> {
    let mapped = map_vanity(identifier);
    let rest = mapped.strip_prefix("github.com/")?;
    let mut parts = rest.split('/');
    let owner = parts.next().filter(|s| !s.is_empty())?;
    let repo = parts.next().filter(|s| !s.is_empty())?;
    Some((owner.to_string(), repo.to_string()))
}

/// Fetch the declared license for a GitHub-hosted component from the
/// repository metadata API.
///
/// The bearer token is optional; without it lookups run against the lower
/// anonymous rate limit.
pub async fn fetch_license(
    client: &Client,
    identifier: &str,
    token: Option<&str>,
    http: &HttpConfig,
) -> Result<Option<String>> {
    let Some((owner, repo)) = hosted_repo(identifier) else {
        return Ok(None);
    };

    let url = format!("https://api.github.com/repos/{}/{}", owner, repo);
    let mut request = client
        .get(&url)
        .header("User-Agent", super::USER_AGENT)
        .header("Accept", "application/vnd.github.v3+json");
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    let response = super::send_with_retry(request, http).await?;
    if !response.status().is_success() {
        return Ok(None);
    }

    let data: Value = response.json().await?;
    Ok(spdx_from_value(&data))
}

/// Extract and normalize `license.spdx_id` from a repository payload.
/// GitHub reports `NOASSERTION` for unrecognized license texts; that is not
/// a resolution.
fn spdx_from_value(data: &Value) -> Option<String> {
    data.get("license")
        .and_then(|l| l.get("spdx_id"))
        .and_then(|id| id.as_str())
        .and_then(license::normalize)
}
