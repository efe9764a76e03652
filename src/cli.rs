use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "sbom-enrichr",
    about = "Resolve and enrich SBOM component licenses from overrides and package registries",
    version
)]
pub struct Cli {
    /// CycloneDX SBOM file to enrich
    #[arg(default_value = "sbom-cyclonedx.json")]
    pub sbom: PathBuf,

    /// License overrides file [default: ./license-overrides.toml when present]
    #[arg(long, value_name = "FILE")]
    pub overrides: Option<PathBuf>,

    /// Config file [default: ./.sbom-enrichr/config.toml, fallback ~/.config/sbom-enrichr/config.toml]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Maximum concurrent lookups (overrides the config file)
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Show all components (not just unknown/proprietary)
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Csv,
}
