use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tabled::{settings::Style, Table, Tabled};
use tracing::info;
use tracing_subscriber::EnvFilter;

use docstamp::{
    load_manifest, OverlayStamper, RunContext, RunLayout, RunReport, StandardConverter,
    ToolCommand, WorkDispatcher,
};

#[derive(Parser)]
#[command(name = "docstamp")]
#[command(about = "Manifest-driven document reconciliation, stamping, and archive filing")]
#[command(version)]
struct Cli {
    /// Base directory for run outputs (originals/, archive/, quarantine/, reports/)
    #[arg(short, long, env = "DOCSTAMP_BASE")]
    base: PathBuf,

    /// Directory holding the source document pool
    #[arg(short, long, env = "DOCSTAMP_SOURCE")]
    source: PathBuf,

    /// Manifest file, one comma-separated record per line
    #[arg(short, long, env = "DOCSTAMP_MANIFEST")]
    manifest: PathBuf,

    /// Worker pool size
    #[arg(short, long, default_value = "4", env = "DOCSTAMP_WORKERS")]
    workers: usize,

    /// External tool template for rendering tiff input to pdf
    #[arg(long, default_value = "tiff2pdf -o {dest} {source}")]
    render_cmd: String,

    /// External tool template for the watermark overlay; {text}, {opacity},
    /// {font}, {font_size} and {rotation} are filled from the fixed overlay
    #[arg(
        long,
        default_value = "cpdf -add-text {text} -font {font} -font-size {font_size} -opacity {opacity} -midline {source} -o {dest}"
    )]
    stamp_cmd: String,

    /// Summary output format
    #[arg(short, long, default_value = "table")]
    output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Yaml,
    Json,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Bucket")]
    bucket: &'static str,
    #[tabled(rename = "Count")]
    count: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("docstamp=debug,info")
    } else {
        EnvFilter::new("docstamp=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31m✗ Error:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let records = load_manifest(&cli.manifest)?;
    info!(records = records.len(), manifest = %cli.manifest.display(), "manifest loaded");

    let renderer = ToolCommand::parse(&cli.render_cmd)?;
    let stamper = OverlayStamper::new(&cli.stamp_cmd)?;
    let ctx = Arc::new(RunContext::new(
        RunLayout::new(cli.base.clone()),
        cli.source.clone(),
        Box::new(StandardConverter::with_renderer(renderer)),
        Box::new(stamper),
        records.len(),
    )?);

    let report = WorkDispatcher::new(cli.workers)
        .dispatch(Arc::clone(&ctx), records)
        .await?;

    match cli.output {
        OutputFormat::Table => print_summary(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&report)?),
    }

    Ok(())
}

fn print_summary(report: &RunReport) {
    let rows = vec![
        SummaryRow {
            bucket: "archived",
            count: report.archived_count(),
        },
        SummaryRow {
            bucket: "quarantined",
            count: report.quarantined_count(),
        },
        SummaryRow {
            bucket: "missing",
            count: report.missing_count(),
        },
        SummaryRow {
            bucket: "unknown file type",
            count: report.unknown_file_type_count(),
        },
        SummaryRow {
            bucket: "password locked",
            count: report.password_locked_count(),
        },
        SummaryRow {
            bucket: "failed",
            count: report.failure_count(),
        },
    ];

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    println!(
        "{} records in {}ms",
        report.total,
        report.duration_ms()
    );

    if !report.failures.is_empty() {
        eprintln!("\n\x1b[33m⚠ {} record(s) failed:\x1b[0m", report.failures.len());
        for failure in &report.failures {
            eprintln!("  {}: {}", failure.key, failure.error);
        }
    }
}
