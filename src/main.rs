use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rainbow_scan::models::{DetectConfig, DetectionReport, CONFIG_ENV};
use rainbow_scan::services::{write_debug_files, ScanPipeline};

#[derive(Parser)]
#[command(name = "rainbow-scan")]
#[command(about = "Find pages that use rainbow colormaps in figures and scans")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect rainbow colormaps in page images
    Detect {
        /// Image files, glob patterns or http(s) URLs
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Maximum perceptual distance for a color match
        #[arg(long)]
        max_diff: Option<f64>,

        /// Rainbow coverage above which a page is flagged
        #[arg(long)]
        cm_thresh: Option<f64>,

        /// Samples taken along each reference colormap
        #[arg(long)]
        samples: Option<usize>,

        /// Write NAME_colors.csv and NAME_cm.csv
        #[arg(long, value_name = "NAME")]
        debug: Option<String>,

        /// YAML config file (defaults to $RAINBOW_SCAN_CONFIG)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the reference colormaps by category
    Colormaps,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Detect {
            inputs,
            max_diff,
            cm_thresh,
            samples,
            debug,
            config,
            json,
        }) => {
            init_logging();
            let config = DetectConfig::load(config.as_deref())?
                .with_overrides(max_diff, cm_thresh, samples)?;
            run_detect_command(config, &inputs, debug.as_deref(), json)
        }
        Some(Commands::Colormaps) => {
            run_colormaps_command();
            Ok(())
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Filter used when `RUST_LOG` is not set
const DEFAULT_LOG_FILTER: &str = "rainbow_scan=info,colormap_match=warn";

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Classify every input and print the flagged pages
fn run_detect_command(
    config: DetectConfig,
    inputs: &[String],
    debug: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let pipeline = ScanPipeline::new(config)?;
    let report = pipeline.run(inputs)?;

    if json {
        println!("{}", report.to_json()?);
    } else {
        print_report(&report);
    }

    if let Some(name) = debug {
        let files = write_debug_files(&report, name)?;
        if !json {
            println!(
                "\nDebug tables: {}, {}",
                files.colors.display(),
                files.coverage.display()
            );
        }
    }

    Ok(())
}

fn print_report(report: &DetectionReport) {
    if report.flagged.is_empty() {
        println!("No rainbow colormaps found in {} page(s)", report.page_count());
    } else {
        println!("Pages using rainbow colormaps:");
        for page in &report.flagged {
            match page.page_number {
                Some(number) => println!("  {} (page {number})", page.page_id),
                None => println!("  {}", page.page_id),
            }
        }
    }

    if !report.failures.is_empty() {
        println!("\nFailed to load {} input(s):", report.failures.len());
        for failure in &report.failures {
            println!("  {}", failure.reason);
        }
    }
}

/// Print the reference library grouped by category
fn run_colormaps_command() {
    let catalog = colormap_match::Catalog::matplotlib();

    for (category, names) in catalog.categories() {
        println!("{category}:");
        for name in names {
            let mark = if catalog.is_excluded(name) {
                "  (excluded)"
            } else if catalog.is_rainbow(name) {
                "  (rainbow)"
            } else {
                ""
            };
            println!("  {name}{mark}");
        }
        println!();
    }

    println!("Rainbow family: {}", catalog.rainbow().join(", "));
    println!("Excluded: {}", catalog.excluded().join(", "));
}

/// Show version, configuration sources and usage
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var(CONFIG_ENV).ok();
    let rust_log = std::env::var("RUST_LOG").ok();
    let defaults = DetectConfig::default();

    println!("Rainbow-scan v{VERSION}");
    println!("Find pages that use rainbow colormaps\n");

    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV} = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    match rust_log {
        Some(filter) => println!("  RUST_LOG            = {filter}"),
        None => println!("  RUST_LOG            = {DEFAULT_LOG_FILTER} (default)"),
    }

    println!("\nDefaults:");
    println!("  max_diff  = {}", defaults.max_diff);
    println!("  cm_thresh = {}", defaults.cm_thresh);
    println!("  samples   = {}", defaults.samples);

    println!("\nCommands:");
    println!("  rainbow-scan detect <INPUT>...  Classify page images");
    println!("  rainbow-scan colormaps          List reference colormaps");
    println!("  rainbow-scan --help             Show all options");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_filter_parses() {
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
        assert!(DEFAULT_LOG_FILTER.starts_with("rainbow_scan=info"));
    }
}
