//! mra CLI — Markdown Report Archive maintenance.
//!
//! Commands: run (process a classified topic batch and regenerate the
//! aggregation views), nav (rebuild NAVIGATION.md only), digest (refresh
//! the README today section only).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tokio::sync::Mutex;

use mra_core::category::classify;
use mra_core::TopicRecord;
use mra_pipeline::{run_batch, RunOptions, TemplateGenerator};
use mra_vault::{Archive, Ledger};

#[derive(Parser)]
#[command(name = "mra")]
#[command(version)]
#[command(about = "Markdown Report Archive — idempotent daily report persistence")]
struct Cli {
    /// Archive root directory
    #[arg(long, global = true, env = "MRA_ARCHIVE_ROOT", default_value = "archive")]
    archive_root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a topic batch, then regenerate navigation and digest
    Run {
        /// JSON file with the day's topics
        #[arg(long)]
        topics: PathBuf,
        /// Batch date (YYYY-MM-DD); defaults to today, UTC
        #[arg(long)]
        date: Option<String>,
        /// Directory holding the history ledger
        #[arg(long, env = "MRA_STATE_DIR", default_value = "state")]
        state_dir: PathBuf,
        /// Concurrency cap for topic processing
        #[arg(long, env = "MRA_CONCURRENCY", default_value_t = 4)]
        concurrency: usize,
        /// Maximum entries in the today digest
        #[arg(long, env = "MRA_DIGEST_MAX", default_value_t = 20)]
        digest_max: usize,
    },
    /// Rebuild NAVIGATION.md from the archive on disk
    Nav,
    /// Refresh the README today section for a date
    Digest {
        /// Target date (YYYY-MM-DD); defaults to today, UTC
        #[arg(long)]
        date: Option<String>,
        #[arg(long, env = "MRA_DIGEST_MAX", default_value_t = 20)]
        digest_max: usize,
    },
}

/// One topic as supplied in the input file. Category fields are
/// optional; unclassified topics go through the rule table.
#[derive(Debug, Deserialize)]
struct TopicInput {
    title: String,
    #[serde(default = "default_edition")]
    edition: String,
    #[serde(default)]
    source_url: Option<String>,
    #[serde(default)]
    category_slug: Option<String>,
    #[serde(default)]
    category_display: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
}

fn default_edition() -> String {
    "v1".to_string()
}

impl TopicInput {
    fn into_record(self, date: &str) -> TopicRecord {
        let class = classify(&self.title);
        TopicRecord {
            category_slug: self.category_slug.unwrap_or(class.slug),
            category_display: self.category_display.unwrap_or(class.display),
            confidence: self.confidence.unwrap_or(class.confidence),
            title: self.title,
            source_url: self.source_url,
            edition: self.edition,
            date: date.to_string(),
        }
    }
}

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let archive = Archive::new(&cli.archive_root);

    match cli.command {
        Commands::Run {
            topics,
            date,
            state_dir,
            concurrency,
            digest_max,
        } => {
            let date = date.unwrap_or_else(today);
            let raw = std::fs::read_to_string(&topics)
                .with_context(|| format!("reading topics file {}", topics.display()))?;
            let inputs: Vec<TopicInput> =
                serde_json::from_str(&raw).context("parsing topics file")?;
            let records: Vec<TopicRecord> = inputs
                .into_iter()
                .map(|input| input.into_record(&date))
                .collect();

            let ledger = Arc::new(Mutex::new(Ledger::open(&state_dir, archive.root())));
            let mut opts = RunOptions::new(date);
            opts.concurrency = concurrency;
            opts.digest_max = digest_max;

            let summary = run_batch(
                &archive,
                ledger,
                Arc::new(TemplateGenerator),
                records,
                &opts,
            )
            .await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Nav => {
            archive.ensure_layout()?;
            let path = archive.update_navigation()?;
            println!("updated {}", path.display());
        }
        Commands::Digest { date, digest_max } => {
            archive.ensure_layout()?;
            let path = archive.update_digest(&date.unwrap_or_else(today), digest_max)?;
            println!("updated {}", path.display());
        }
    }

    Ok(())
}
