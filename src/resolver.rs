//! Per-component license resolution.
//!
//! Each component runs through a fixed decision ladder: override list, then
//! applicable source clients in priority order, then the PURL fallback, then
//! the vendored-module heuristic, then Unknown. Ladders are independent —
//! the only shared state is the read-only override list and client
//! configuration — so all components are driven concurrently with a bounded
//! in-flight count.

use colored::Colorize;
use futures::stream::{self, StreamExt};
use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use crate::config::ResolverConfig;
use crate::models::{Component, LicenseOutcome, SourceKind};
use crate::overrides::OverrideList;
use crate::sbom;
use crate::source::{self, SourceLookup};

/// Drives the resolution ladder over a component set.
pub struct Resolver<'a, S> {
    overrides: &'a OverrideList,
    sources: &'a S,
    config: &'a ResolverConfig,
    quiet: bool,
}

impl<'a, S: SourceLookup> Resolver<'a, S> {
    pub fn new(
        overrides: &'a OverrideList,
        sources: &'a S,
        config: &'a ResolverConfig,
        quiet: bool,
    ) -> Self {
        Resolver {
            overrides,
            sources,
            config,
            quiet,
        }
    }

    /// Resolve a single component to exactly one outcome.
    ///
    /// Source-client failures are logged and treated as not-found; nothing
    /// in the ladder can abort a sibling resolution.
    pub async fn resolve(&self, component: &Component) -> LicenseOutcome {
        let identifier = component.identifier.trim();

        if !identifier.is_empty() {
            // 1. Override list, first match in file order.
            if let Some(license) = self.overrides.find(identifier) {
                return LicenseOutcome::Resolved {
                    license: license.to_string(),
                    source: SourceKind::Override,
                };
            }

            // 2. Applicable source clients in configured priority order.
            if let Some(outcome) = self.consult_sources(identifier, &component.version).await {
                return outcome;
            }

            // 3. Retry the sources under the PURL-derived name, which often
            // differs from the manifest identifier.
            if let Some(name) = component.purl.as_deref().and_then(sbom::purl_name) {
                if name != identifier {
                    if let Some(outcome) = self.consult_sources(&name, &component.version).await {
                        return outcome;
                    }
                }
            }
        }

        // 4. Vendored or replaced modules are not independently licensed.
        if component.is_vendor_or_replaced {
            return LicenseOutcome::Proprietary;
        }

        // 5. Nothing matched.
        let note = identifier
            .is_empty()
            .then(|| "blank component identifier".to_string());
        LicenseOutcome::Unknown { note }
    }

    async fn consult_sources(&self, identifier: &str, version: &str) -> Option<LicenseOutcome> {
        let probe = Component {
            identifier: identifier.to_string(),
            version: version.to_string(),
            purl: None,
            is_vendor_or_replaced: false,
        };

        for kind in source::applicable_sources(identifier, &self.config.priority) {
            match self.sources.lookup(kind, &probe).await {
                Ok(Some(license)) => {
                    return Some(LicenseOutcome::Resolved {
                        license,
                        source: kind,
                    })
                }
                Ok(None) => {}
                Err(err) => {
                    if !self.quiet {
                        eprintln!(
                            "  {} {} lookup failed for {}: {}",
                            "⚠".yellow(),
                            kind,
                            identifier,
                            err
                        );
                    }
                }
            }
        }
        None
    }

    /// Resolve every component concurrently, bounded by the configured
    /// in-flight limit. `on_done` fires once per completed component.
    ///
    /// Returns one slot per input component, in input order regardless of
    /// completion order. On cancellation in-flight lookups are abandoned,
    /// but outcomes already completed — including ones sitting ready in the
    /// queue — are kept; only unfinished slots stay `None`.
    pub async fn resolve_all(
        &self,
        components: &[Component],
        cancel: &CancellationToken,
        mut on_done: impl FnMut(),
    ) -> Vec<Option<LicenseOutcome>> {
        let limit = self.config.concurrency.max(1);
        let mut slots: Vec<Option<LicenseOutcome>> = vec![None; components.len()];

        let mut outcomes = stream::iter(components.iter().enumerate())
            .map(|(index, component)| async move { (index, self.resolve(component).await) })
            .buffer_unordered(limit);

        loop {
            // Biased so a tripped token always wins over ready outcomes.
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    // Drain outcomes that already finished; anything still
                    // pending is abandoned with the stream.
                    while let Some(Some((index, outcome))) = outcomes.next().now_or_never() {
                        slots[index] = Some(outcome);
                        on_done();
                    }
                    break;
                }
                next = outcomes.next() => match next {
                    Some((index, outcome)) => {
                        slots[index] = Some(outcome);
                        on_done();
                    }
                    None => break,
                },
            }
        }

        slots
    }
}
