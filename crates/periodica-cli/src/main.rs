//! Periodica CLI
//!
//! Unified command-line interface for:
//! - Ingesting saved source payloads into `records.json` batches
//! - Building the table straight from the live sources (fetch + pipeline)
//! - Generating the table offline from saved batches
//!
//! The pipeline itself is pure; everything here is plumbing around it:
//! fetching, artifact files, rendering, and diagnostic reporting.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use periodica_core::pipeline::{self, PipelineOptions};
use periodica_core::record::SourceBatch;
use periodica_core::report::RunReport;
use std::fs;
use std::path::{Path, PathBuf};

mod fetch;
mod render;

#[derive(Parser)]
#[command(name = "periodica")]
#[command(
    author,
    version,
    about = "Periodica: periodic-table layout for service catalogs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a saved source payload into a `records.json` batch.
    Ingest {
        #[command(subcommand)]
        command: IngestCommands,
    },

    /// Fetch the configured sources, run the pipeline, render the table.
    Build {
        /// Data source: `scrape`, `directory` or `merged`.
        #[arg(long, default_value = "scrape")]
        source: String,

        /// Output HTML file.
        #[arg(short, long, default_value = "index.html")]
        out: PathBuf,

        /// Also write the finished table as JSON.
        #[arg(long)]
        json: Option<PathBuf>,

        /// Directory API page size.
        #[arg(long, default_value_t = 300)]
        size: usize,

        /// Per-request timeout in seconds.
        #[arg(long, default_value_t = 20)]
        timeout_secs: u64,

        /// HTTP User-Agent.
        #[arg(long, default_value = fetch::DEFAULT_USER_AGENT)]
        user_agent: String,

        /// Page title.
        #[arg(long, default_value = pipeline::DEFAULT_TITLE)]
        title: String,
    },

    /// Run the pipeline offline over saved `records.json` batches.
    Generate {
        /// Batch file (repeatable; order decides merge precedence).
        #[arg(long, required = true)]
        records: Vec<PathBuf>,

        /// Output HTML file.
        #[arg(short, long, default_value = "index.html")]
        out: PathBuf,

        /// Also write the finished table as JSON.
        #[arg(long)]
        json: Option<PathBuf>,

        /// Page title.
        #[arg(long, default_value = pipeline::DEFAULT_TITLE)]
        title: String,
    },
}

#[derive(Subcommand)]
enum IngestCommands {
    /// Saved products page HTML → `records.json`.
    Nav {
        /// Input HTML file.
        input: PathBuf,
        /// Output batch JSON.
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Saved directory API response → `records.json`.
    Directory {
        /// Input JSON file.
        input: PathBuf,
        /// Output batch JSON.
        #[arg(short, long)]
        out: PathBuf,
    },
}

/// Which upstream sources a `build` run consumes, in merge order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DataSource {
    Scrape,
    Directory,
    Merged,
}

impl DataSource {
    fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scrape" | "nav" => Ok(Self::Scrape),
            "directory" | "dir" => Ok(Self::Directory),
            "merged" | "both" => Ok(Self::Merged),
            other => Err(anyhow!(
                "unknown data source `{other}` (expected scrape|directory|merged)"
            )),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest { command } => match command {
            IngestCommands::Nav { input, out } => cmd_ingest_nav(&input, &out),
            IngestCommands::Directory { input, out } => cmd_ingest_directory(&input, &out),
        },
        Commands::Build {
            source,
            out,
            json,
            size,
            timeout_secs,
            user_agent,
            title,
        } => cmd_build(
            DataSource::parse(&source)?,
            &out,
            json.as_deref(),
            size,
            timeout_secs,
            &user_agent,
            &title,
        ),
        Commands::Generate {
            records,
            out,
            json,
            title,
        } => cmd_generate(&records, &out, json.as_deref(), &title),
    }
}

fn cmd_ingest_nav(input: &Path, out: &Path) -> Result<()> {
    let html = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let batch = periodica_ingest_nav::parse_products_page(&html)?;
    write_batch(&batch, out)
}

fn cmd_ingest_directory(input: &Path, out: &Path) -> Result<()> {
    let json = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let batch = periodica_ingest_directory::parse_directory_response(&json)?;
    write_batch(&batch, out)
}

fn write_batch(batch: &SourceBatch, out: &Path) -> Result<()> {
    let text = serde_json::to_string_pretty(batch)?;
    fs::write(out, text).with_context(|| format!("failed to write {}", out.display()))?;
    println!(
        "{} source={} records={}",
        "Ingest".green().bold(),
        batch.source_id,
        batch.records.len()
    );
    println!("  {} {}", "→".cyan(), out.display());
    Ok(())
}

fn cmd_build(
    source: DataSource,
    out: &Path,
    json: Option<&Path>,
    size: usize,
    timeout_secs: u64,
    user_agent: &str,
    title: &str,
) -> Result<()> {
    let client = fetch::build_http_client(user_agent, timeout_secs)?;

    // Merge order is fixed: the directory feed is richer (codes, badges),
    // so it goes first and the scrape only fills gaps.
    let mut batches = Vec::new();
    if matches!(source, DataSource::Directory | DataSource::Merged) {
        let url = fetch::directory_api_url(size)?;
        let body = fetch::fetch_text(&client, &url)?;
        batches.push(periodica_ingest_directory::parse_directory_response(&body)?);
    }
    if matches!(source, DataSource::Scrape | DataSource::Merged) {
        let url = url::Url::parse(fetch::PRODUCTS_PAGE_URL)?;
        let body = fetch::fetch_text(&client, &url)?;
        batches.push(periodica_ingest_nav::parse_products_page(&body)?);
    }

    run_and_write(&batches, out, json, title)
}

fn cmd_generate(records: &[PathBuf], out: &Path, json: Option<&Path>, title: &str) -> Result<()> {
    let mut batches = Vec::new();
    for path in records {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let batch: SourceBatch = serde_json::from_str(&text)
            .with_context(|| format!("invalid batch file {}", path.display()))?;
        batches.push(batch);
    }

    run_and_write(&batches, out, json, title)
}

fn run_and_write(
    batches: &[SourceBatch],
    out: &Path,
    json: Option<&Path>,
    title: &str,
) -> Result<()> {
    let options = PipelineOptions {
        title: title.to_string(),
        description: title.to_string(),
    };
    let report = pipeline::run(batches, &options);
    print_report(batches, &report);

    let html = render::render_html(&report.table);
    fs::write(out, html).with_context(|| format!("failed to write {}", out.display()))?;
    println!("  {} {}", "→".cyan(), out.display());

    if let Some(json_path) = json {
        let text = serde_json::to_string_pretty(&report.table)?;
        fs::write(json_path, text)
            .with_context(|| format!("failed to write {}", json_path.display()))?;
        println!("  {} {}", "→".cyan(), json_path.display());
    }
    Ok(())
}

fn print_report(batches: &[SourceBatch], report: &RunReport) {
    let sources: Vec<&str> = batches.iter().map(|b| b.source_id.as_str()).collect();
    println!(
        "{} sources={} entities={} categories={} grid_rows={}",
        "Build".green().bold(),
        sources.join(","),
        report.table.entity_count(),
        report.table.categories.len(),
        report.table.grid_rows
    );

    for diagnostic in &report.diagnostics {
        println!("  {} {diagnostic}", "warning:".yellow().bold());
    }
    let (skipped, exhausted, collisions, badges) =
        pipeline::diagnostic_counts(&report.diagnostics);
    if skipped + exhausted + collisions + badges > 0 {
        println!(
            "  {} skipped={skipped} symbol_exhausted={exhausted} reserved_collisions={collisions} bad_badges={badges}",
            "→".yellow()
        );
    }
}
