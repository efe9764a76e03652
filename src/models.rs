use serde::{Deserialize, Serialize};

/// A single component record read from the SBOM. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub identifier: String,
    pub version: String,
    /// Package URL carried from the SBOM, if present; used as a fallback
    /// lookup key when the identifier itself resolves nowhere.
    pub purl: Option<String>,
    /// Vendored or locally replaced modules are typically not independently
    /// licensed; they classify as Proprietary when nothing else matches.
    pub is_vendor_or_replaced: bool,
}

/// Where a resolved license came from: the override list or one of the
/// network source clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    Override,
    Github,
    Npm,
    GoIndex,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Override => write!(f, "override"),
            SourceKind::Github => write!(f, "github"),
            SourceKind::Npm => write!(f, "npm"),
            SourceKind::GoIndex => write!(f, "go-index"),
        }
    }
}

/// Classification bucket of a [`LicenseOutcome`], used for summary tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    Resolved,
    Proprietary,
    Unknown,
}

impl std::fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutcomeKind::Resolved => write!(f, "resolved"),
            OutcomeKind::Proprietary => write!(f, "proprietary"),
            OutcomeKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// The result of running one component through the resolution ladder.
/// Produced exactly once per component per run; never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum LicenseOutcome {
    Resolved { license: String, source: SourceKind },
    Proprietary,
    Unknown { note: Option<String> },
}

impl LicenseOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            LicenseOutcome::Resolved { .. } => OutcomeKind::Resolved,
            LicenseOutcome::Proprietary => OutcomeKind::Proprietary,
            LicenseOutcome::Unknown { .. } => OutcomeKind::Unknown,
        }
    }
}

/// One output row: the original component fields plus resolution results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub identifier: String,
    pub version: String,
    pub license: Option<String>,
    pub source: Option<SourceKind>,
    pub outcome: OutcomeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Per-run outcome tallies. Derived from the outcome set, recomputed each run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub resolved: usize,
    pub unknown: usize,
    pub proprietary: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.resolved + self.unknown + self.proprietary
    }
}
