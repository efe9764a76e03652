//! Async HTTP clients for fetching license data from upstream sources.
//!
//! Each client module exposes a single `fetch_license` function that returns
//! `Ok(Some(license))` on success, `Ok(None)` when the component is not found
//! or carries no usable license field, and `Err` on network failures. The
//! resolution engine treats `Err` the same as `Ok(None)` — source trouble is
//! never fatal to a run.

pub mod github;
pub mod goindex;
pub mod npm;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};

use crate::config::HttpConfig;
use crate::models::{Component, SourceKind};

pub(crate) const USER_AGENT: &str = "sbom-enrichr/0.1.0";

/// The single capability a license source exposes.
///
/// Implemented by [`HttpSources`] in production and by in-memory stubs in
/// resolver tests.
pub trait SourceLookup {
    /// Look up the declared license for `component` in one source.
    async fn lookup(&self, kind: SourceKind, component: &Component) -> Result<Option<String>>;
}

/// Production source set: one shared HTTP client (per-lookup timeout baked
/// in), the retry policy, and the optional GitHub bearer token. Read-only
/// after construction.
pub struct HttpSources {
    client: Client,
    http: HttpConfig,
    github_token: Option<String>,
}

impl HttpSources {
    pub fn new(http: HttpConfig, github_token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(http.timeout())
            .build()
            .context("failed to build HTTP client")?;
        Ok(HttpSources {
            client,
            http,
            github_token,
        })
    }
}

impl SourceLookup for HttpSources {
    async fn lookup(&self, kind: SourceKind, component: &Component) -> Result<Option<String>> {
        match kind {
            SourceKind::Github => {
                github::fetch_license(
                    &self.client,
                    &component.identifier,
                    self.github_token.as_deref(),
                    &self.http,
                )
                .await
            }
            SourceKind::Npm => {
                npm::fetch_license(
                    &self.client,
                    &component.identifier,
                    &component.version,
                    &self.http,
                )
                .await
            }
            SourceKind::GoIndex => {
                goindex::fetch_license(&self.client, &component.identifier, &self.http).await
            }
            // The override list is not a network source.
            SourceKind::Override => Ok(None),
        }
    }
}

/// Return the source clients applicable to `identifier`, preserving
/// `priority` order. Clients whose identifier-shape test fails are skipped.
pub fn applicable_sources(identifier: &str, priority: &[SourceKind]) -> Vec<SourceKind> {
    priority
        .iter()
        .copied()
        .filter(|kind| applicable(*kind, identifier))
        .collect()
}

fn applicable(kind: SourceKind, identifier: &str) -> bool {
    match kind {
        SourceKind::Github => github::hosted_repo(identifier).is_some(),
        SourceKind::Npm => is_npm_name(identifier),
        SourceKind::GoIndex => is_go_module_path(identifier),
        SourceKind::Override => false,
    }
}

/// npm package-name shape: optionally scoped, lowercase, URL-safe
/// punctuation, no path separators outside the scope.
fn is_npm_name(identifier: &str) -> bool {
    fn valid_part(part: &str) -> bool {
        !part.is_empty()
            && !part.starts_with('.')
            && !part.starts_with('_')
            && part
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "-_.~".contains(c))
    }

    match identifier.strip_prefix('@') {
        Some(rest) => match rest.split_once('/') {
            Some((scope, name)) => valid_part(scope) && valid_part(name),
            None => false,
        },
        None => valid_part(identifier),
    }
}

/// Go module-path shape: a host-like first segment (contains a dot) followed
/// by at least one path segment.
fn is_go_module_path(identifier: &str) -> bool {
    let Some((host, rest)) = identifier.split_once('/') else {
        return false;
    };
    host.contains('.')
        && !host.starts_with('.')
        && !host.ends_with('.')
        && !rest.is_empty()
        && identifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "./-_~".contains(c))
}

/// Send a request, retrying on HTTP 429 within the configured budget.
///
/// The final response (including a 429 that exhausted the budget) is handed
/// back for the caller to collapse to not-found; only transport errors
/// surface as `Err`.
pub(crate) async fn send_with_retry(
    request: reqwest::RequestBuilder,
    http: &HttpConfig,
) -> Result<reqwest::Response> {
    let mut attempts = 0u32;
    loop {
        let attempt = request
            .try_clone()
            .context("request is not retryable")?;
        let response = attempt.send().await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS && attempts < http.retry_budget {
            attempts += 1;
            tokio::time::sleep(http.retry_backoff()).await;
            continue;
        }
        return Ok(response);
    }
}
