//! # Keyword Compass CLI (`kwc`)
//!
//! The `kwc` binary turns keyword research exports into ranked
//! opportunities and content-idea seeds.
//!
//! ## Usage
//!
//! ```bash
//! kwc --config ./kwc.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `kwc analyze <file>` | Score, cluster, and synthesize ideas from a TSV export |
//! | `kwc similar <keyword> <file>` | Rank export keywords by similarity to a target |
//!
//! ## Examples
//!
//! ```bash
//! # Full analysis, human-readable
//! kwc analyze keywords.tsv
//!
//! # Full analysis as JSON for downstream tooling
//! kwc analyze keywords.tsv --format json
//!
//! # Ten nearest neighbours of a seed keyword
//! kwc similar "coffee grinder" keywords.tsv --top 10
//! ```

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use keyword_compass::{config, ingest, report};
use keyword_compass_core::{cluster, pipeline};

/// Keyword Compass — keyword opportunity scoring, topic clustering, and
/// content-idea synthesis for content planning.
#[derive(Parser)]
#[command(
    name = "kwc",
    about = "Keyword Compass — turn keyword research exports into ranked opportunities and content ideas",
    version
)]
struct Cli {
    /// Path to configuration file (TOML). A missing file falls back to
    /// built-in defaults.
    #[arg(long, global = true, default_value = "./kwc.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Analyze a keyword export.
    ///
    /// Scores every keyword with the configured weights, groups the batch
    /// into topic clusters, synthesizes content ideas, and prints
    /// population insights.
    Analyze {
        /// TSV export file (`keyword<TAB>volume<TAB>difficulty<TAB>cpc<TAB>intents`).
        file: PathBuf,

        /// Output format: `text` or `json`.
        #[arg(long, default_value = "text")]
        format: String,

        /// Maximum scored keywords to show in text output.
        #[arg(long, default_value_t = 25)]
        top: usize,
    },

    /// Rank export keywords by similarity to a target keyword.
    ///
    /// Uses the same TF-IDF vectors as clustering; the target itself is
    /// excluded from the ranking.
    Similar {
        /// The target keyword.
        keyword: String,

        /// TSV export file providing the candidate population.
        file: PathBuf,

        /// Number of neighbours to return.
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { file, format, top } => {
            let cfg = config::load_or_default(&cli.config)?;
            let records = ingest::load_tsv(&file)?;
            let result = pipeline::analyze(&records, &cfg.params())?;
            match format.as_str() {
                "text" => print!("{}", report::render_text(&result, top)),
                "json" => println!("{}", report::render_json(&result)?),
                other => bail!("Unknown output format: {other}. Use text or json."),
            }
        }
        Commands::Similar { keyword, file, top } => {
            let records = ingest::load_tsv(&file)?;
            let population: Vec<String> =
                records.into_iter().map(|r| r.keyword).collect();
            let similar = cluster::find_similar(&keyword, &population, top);
            print!("{}", report::render_similar(&keyword, &similar));
        }
    }

    Ok(())
}
