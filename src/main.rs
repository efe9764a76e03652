//! `sbom-enrichr` — resolve SBOM component licenses from overrides and
//! package registries.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]) and override rules
//!    ([`overrides::load_overrides`]) — invalid files abort the run.
//! 3. Read the CycloneDX component list ([`sbom`]).
//! 4. Resolve every component concurrently ([`resolver`], [`source`]).
//! 5. Aggregate outcomes into enriched records and a summary ([`aggregate`]).
//! 6. Render the requested report ([`report`]).
//! 7. Exit `0` (fully resolved) or `1` (unknown licenses remain).

mod aggregate;
mod cli;
mod config;
mod license;
mod models;
mod overrides;
mod report;
mod resolver;
mod sbom;
mod source;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;

use cli::{Cli, ReportFormat};
use resolver::Resolver;
use source::HttpSources;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configuration problems are fatal: override ordering is semantically
    // meaningful, so the run never proceeds on a partial rule set.
    let mut config = config::load_config(cli.config.as_deref())?;
    if let Some(n) = cli.concurrency {
        config.resolver.concurrency = n;
    }
    let override_rules = overrides::load_overrides(cli.overrides.as_deref())?;

    let components = sbom::load_components(&cli.sbom)?;
    if components.is_empty() {
        eprintln!("No components found in {}", cli.sbom.display());
        return Ok(());
    }

    if !cli.quiet {
        if override_rules.is_empty() {
            eprintln!("  {} {} components", "→".cyan(), components.len());
        } else {
            eprintln!(
                "  {} {} components, {} override rules",
                "→".cyan(),
                components.len(),
                override_rules.len()
            );
        }
    }

    let sources = HttpSources::new(config.http.clone(), config::github_token())?;

    // Ctrl-C abandons in-flight lookups; completed outcomes are still emitted.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let pb = if !cli.quiet {
        let pb = ProgressBar::new(components.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let engine = Resolver::new(&override_rules, &sources, &config.resolver, cli.quiet);
    let slots = engine
        .resolve_all(&components, &cancel, || {
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        })
        .await;

    if let Some(pb) = &pb {
        pb.finish_with_message("Done");
    }

    if cancel.is_cancelled() && !cli.quiet {
        eprintln!(
            "  {} interrupted; emitting the outcomes completed so far",
            "⚠".yellow()
        );
    }

    let (records, summary) = aggregate::aggregate(&components, &slots);

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(&records, &summary, cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            let output = serde_json::json!({
                "components": records,
                "summary": summary,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        ReportFormat::Csv => {
            print!("{}", report::csv::render(&records));
        }
    }

    // Exit codes: 130 for an interrupted run (partial results were still
    // emitted), 1 if any component is still unlicensed.
    if cancel.is_cancelled() {
        std::process::exit(130);
    }
    if summary.unknown > 0 {
        std::process::exit(1);
    }

    Ok(())
}
