//! CLI entry point for the sales data cleaning pipeline.

use anyhow::{anyhow, Result};
use clap::Parser;
use sales_cleaner::{io, CleaningError, Pipeline, PipelineConfig, PipelineResult};
use serde::Serialize;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Batch cleaner for messy sales CSV exports",
    long_about = "Cleans a raw sales CSV export into an analysis-ready dataset:\n\
                  normalizes headers and text fields, repairs price and qty,\n\
                  resolves dates, merges duplicate sales, and prints a\n\
                  validation report.\n\n\
                  EXAMPLES:\n  \
                  # Default paths (data/sales_raw.csv -> outputs/sales_clean.csv)\n  \
                  sales-cleaner\n\n  \
                  # Explicit paths\n  \
                  sales-cleaner -i exports/march.csv -o clean/march.csv\n\n  \
                  # Machine-readable output\n  \
                  sales-cleaner --json | jq .summary.duplicates_merged"
)]
struct Args {
    /// Path to the raw sales CSV
    #[arg(short, long, default_value = "data/sales_raw.csv")]
    input: String,

    /// Path for the cleaned CSV (parent directories are created)
    #[arg(short, long, default_value = "outputs/sales_clean.csv")]
    output: String,

    /// Number of cleaned rows to echo for inspection
    #[arg(long, default_value = "5")]
    sample_rows: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and the final report)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of the human-readable report
    ///
    /// Disables all progress logs; only outputs the final JSON document.
    #[arg(long)]
    json: bool,
}

/// Everything a `--json` caller needs from one run.
#[derive(Serialize)]
struct JsonOutput<'a> {
    report: &'a sales_cleaner::ValidationReport,
    summary: &'a sales_cleaner::CleaningSummary,
    output_path: &'a str,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled so stdout
/// carries nothing but the JSON document.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = PipelineConfig::builder()
        .input_path(&args.input)
        .output_path(&args.output)
        .sample_rows(args.sample_rows)
        .build()?;

    info!("Loading dataset from: {}", config.input_path.display());
    let data = match io::load(&config.input_path) {
        Ok(df) => df,
        Err(e) => {
            error!("Failed to load input: {}", e);
            return Err(e.into());
        }
    };

    if data.height() == 0 {
        return Err(CleaningError::EmptyDataset.into());
    }

    let pipeline = build_pipeline(&args);

    let result = match pipeline.process(data) {
        Ok(result) => result,
        Err(e) => {
            error!("Pipeline failed: {}", e);
            return Err(anyhow!("Pipeline failed: {}", e));
        }
    };

    let mut cleaned = result.data.clone();
    io::write(&mut cleaned, &config.output_path)?;
    info!("Cleaned dataset written to: {}", config.output_path.display());

    if args.json {
        let output = JsonOutput {
            report: &result.report,
            summary: &result.summary,
            output_path: &args.output,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_summary(&result, &config);
    Ok(())
}

fn build_pipeline(args: &Args) -> Pipeline {
    let mut builder = Pipeline::builder();

    if !args.quiet && !args.json {
        builder = builder.on_progress(|update| {
            info!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }

    builder.build()
}

/// Print the validation report and a sample of the cleaned rows.
///
/// Uses `println!` rather than logging: this output is the primary product
/// of the run and should be visible regardless of log level.
fn print_summary(result: &PipelineResult, config: &PipelineConfig) {
    let summary = &result.summary;

    println!();
    print!("{}", result.report.render());
    println!();

    println!("Cleaning Summary:");
    println!("  Duration: {}ms", summary.duration_ms);
    println!(
        "  Rows: {} -> {} ({} dropped for missing dates, {} merged as duplicates)",
        summary.rows_before,
        summary.rows_after,
        summary.rows_dropped_missing_date,
        summary.duplicates_merged
    );
    println!();
    println!("Steps:");
    for step in &summary.steps {
        println!("  - {}", step);
    }
    println!();

    if config.sample_rows > 0 {
        println!("First {} cleaned rows:", config.sample_rows);
        println!("{}", result.data.head(Some(config.sample_rows)));
        println!();
    }

    println!("Output written to: {}", config.output_path.display());
    println!("Use --json for machine-readable output");
}
