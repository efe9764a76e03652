use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{EnrichedRecord, OutcomeKind, Summary};

/// Render a colored terminal report.
pub fn render(
    records: &[EnrichedRecord],
    summary: &Summary,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    if quiet {
        println!(
            "Total: {}  Resolved: {}  Unknown: {}  Proprietary: {}",
            summary.total(),
            summary.resolved.to_string().green(),
            summary.unknown.to_string().yellow(),
            summary.proprietary.to_string().magenta(),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}",
        "sbom-enrichr".bold(),
        env!("CARGO_PKG_VERSION")
    );

    let resolved_licenses = summarize_licenses(records, OutcomeKind::Resolved);

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(
        " │  {:<48} │",
        format!("Total components   : {}", summary.total())
    );
    println!(
        " │  {:<48} │",
        format!(
            "{}  Resolved        : {:>4}  {}",
            "✓".green(),
            summary.resolved,
            resolved_licenses
        )
    );
    println!(
        " │  {:<48} │",
        format!("{}  Unknown         : {:>4}", "?".yellow(), summary.unknown)
    );
    println!(
        " │  {:<48} │",
        format!(
            "{}  Proprietary     : {:>4}",
            "◼".magenta(),
            summary.proprietary
        )
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if summary.unknown > 0 {
        println!(
            " {} Components needing manual review:\n",
            "[UNKNOWN]".yellow().bold()
        );
        render_table(records, OutcomeKind::Unknown);
        println!();
    }

    if summary.proprietary > 0 {
        println!(
            " {} Vendored / replaced components:\n",
            "[PROPRIETARY]".magenta().bold()
        );
        render_table(records, OutcomeKind::Proprietary);
        println!();
    }

    // Verbose: show everything that resolved cleanly too.
    if verbose && summary.resolved > 0 {
        println!(" {} Resolved components:\n", "[RESOLVED]".green().bold());
        render_table(records, OutcomeKind::Resolved);
        println!();
    }

    Ok(())
}

fn render_table(records: &[EnrichedRecord], kind: OutcomeKind) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Identifier").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Source").add_attribute(Attribute::Bold),
            Cell::new("Outcome").add_attribute(Attribute::Bold),
        ]);

    for record in records.iter().filter(|r| r.outcome == kind) {
        let license = record.license.as_deref().unwrap_or("UNKNOWN");
        let source = record
            .source
            .map(|s| s.to_string())
            .unwrap_or_else(|| "—".to_string());

        let (outcome_str, outcome_color) = match record.outcome {
            OutcomeKind::Resolved => ("✓ resolved", Color::Green),
            OutcomeKind::Unknown => ("? unknown", Color::Yellow),
            OutcomeKind::Proprietary => ("◼ proprietary", Color::Magenta),
        };

        table.add_row(vec![
            Cell::new(&record.identifier),
            Cell::new(&record.version),
            Cell::new(license),
            Cell::new(source),
            Cell::new(outcome_str)
                .fg(outcome_color)
                .set_alignment(CellAlignment::Center),
        ]);
    }

    println!("{}", table);
}

/// Top three licenses among records of the given kind, e.g. `[MIT (12), Apache-2.0 (4)]`.
fn summarize_licenses(records: &[EnrichedRecord], kind: OutcomeKind) -> String {
    let mut counts: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    for record in records.iter().filter(|r| r.outcome == kind) {
        let license = record.license.as_deref().unwrap_or("UNKNOWN").to_string();
        *counts.entry(license).or_insert(0) += 1;
    }

    let mut pairs: Vec<(String, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let summary: Vec<String> = pairs
        .iter()
        .take(3)
        .map(|(license, count)| format!("{} ({})", license, count))
        .collect();

    if summary.is_empty() {
        String::new()
    } else {
        format!("[{}]", summary.join(", "))
    }
}
