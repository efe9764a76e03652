use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::SourceKind;

/// Root configuration structure, deserialized from `.sbom-enrichr/config.toml`.
///
/// Built once at startup and passed down read-only; there is no process-wide
/// mutable configuration state.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Resolution engine tunables.
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// HTTP client tunables shared by all source clients.
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolverConfig {
    /// Maximum in-flight component resolutions. Kept small by default to
    /// avoid tripping upstream rate limits.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Source consultation order for ecosystem-ambiguous identifiers. Only
    /// clients whose shape test passes are actually queried.
    #[serde(default = "default_priority")]
    pub priority: Vec<SourceKind>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Per-lookup request timeout in seconds. Timeouts are per-lookup, never
    /// per-run.
    #[serde(default = "default_timeout_secs", rename = "timeout-secs")]
    pub timeout_secs: u64,
    /// How many times a rate-limited (HTTP 429) request is retried before
    /// the lookup collapses to not-found.
    #[serde(default = "default_retry_budget", rename = "retry-budget")]
    pub retry_budget: u32,
    /// Backoff between rate-limit retries, in milliseconds.
    #[serde(default = "default_retry_backoff_ms", rename = "retry-backoff-ms")]
    pub retry_backoff_ms: u64,
}

fn default_concurrency() -> usize {
    8
}

fn default_priority() -> Vec<SourceKind> {
    vec![SourceKind::Github, SourceKind::GoIndex, SourceKind::Npm]
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_retry_budget() -> u32 {
    1
}

fn default_retry_backoff_ms() -> u64 {
    500
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            concurrency: default_concurrency(),
            priority: default_priority(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            timeout_secs: default_timeout_secs(),
            retry_budget: default_retry_budget(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            resolver: ResolverConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `./.sbom-enrichr/config.toml`
/// 3. `~/.config/sbom-enrichr/config.toml`
/// 4. Built-in [`Config::default`]
///
/// An unreadable or invalid file is a fatal startup error.
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = Path::new(".sbom-enrichr").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("sbom-enrichr").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config file {}", path.display()))
}

/// Optional bearer credential for the GitHub client. Absence is not an
/// error; lookups just run against the lower anonymous rate limit.
pub fn github_token() -> Option<String> {
    std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.resolver.concurrency, 8);
        assert_eq!(
            config.resolver.priority,
            vec![SourceKind::Github, SourceKind::GoIndex, SourceKind::Npm]
        );
        assert_eq!(config.http.timeout(), Duration::from_secs(10));
        assert_eq!(config.http.retry_budget, 1);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "[resolver]").unwrap();
        writeln!(f, "concurrency = 3").unwrap();

        let config = load_config(Some(f.path())).unwrap();
        assert_eq!(config.resolver.concurrency, 3);
        assert_eq!(config.http.timeout_secs, 10);
    }

    #[test]
    fn test_priority_from_file() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "[resolver]").unwrap();
        writeln!(f, "priority = [\"npm\", \"github\"]").unwrap();

        let config = load_config(Some(f.path())).unwrap();
        assert_eq!(
            config.resolver.priority,
            vec![SourceKind::Npm, SourceKind::Github]
        );
    }

    #[test]
    fn test_invalid_file_is_fatal() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "resolver = \"not a table\"").unwrap();
        assert!(load_config(Some(f.path())).is_err());
    }
}
