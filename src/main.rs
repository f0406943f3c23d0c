//! satviz - 3-SAT benchmark visualizer
//!
//! Reads the JSONL records produced by a 3-SAT benchmark run, groups the
//! trials by clause-to-variable ratio, and charts the average solve time
//! and the empirical probability of satisfiability against that ratio.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any fatal error (unreadable input, malformed or invalid record,
//!       empty dataset, chart rendering failure)

mod analysis;
mod cli;
mod config;
mod error;
mod loader;
mod models;
mod report;

use anyhow::{bail, Context, Result};
use cli::Args;
use config::{Config, CONFIG_FILE_NAME};
use models::RatioSeries;
use report::chart::ChartHandle;
use report::{ChartOptions, ChartRenderer, SeriesRanges};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("satviz v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run_viz(&args) {
        error!("Run failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .satviz.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize chart size, format and output path.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load, aggregate, summarize and chart one benchmark file.
///
/// Returns the written chart, or `None` for a dry run.
fn run_viz(args: &Args) -> Result<Option<ChartHandle>> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(args)?;
    config.merge_with_args(args);

    let input = args.input_path();

    // Step 1: Parse records
    println!("📥 Reading data from {}...", input.display());
    let records = loader::load_records(input)?;
    println!("   Loaded {} records", records.len());

    // Step 2: Group and reduce
    let summaries = analysis::aggregate(&records)?;
    println!("   Found {} unique L/N ratios", summaries.len());

    if config.general.verbose {
        println!("\n{}", report::generate_ratio_table(&summaries));
    }

    // Step 3: Summary statistics
    let series = RatioSeries::from_summaries(&summaries);
    if let Some(ranges) = SeriesRanges::from_series(&series) {
        println!("\n📊 Summary:");
        for line in report::generate_range_summary(&ranges).lines() {
            println!("   {}", line);
        }
    }

    // Handle --dry-run: stop before drawing anything
    if args.dry_run {
        println!("\n✅ Dry run complete. No chart was rendered.");
        return Ok(None);
    }

    // Step 4: Render
    let options = ChartOptions::from_config(&config.chart, input);
    if cli::same_file(&options.output, input) {
        bail!(
            "Chart output {} would overwrite the input file; pass --output or --format",
            options.output.display()
        );
    }

    println!("\n📈 Rendering charts...");
    let handle = ChartRenderer::new(options).render(&series)?;

    println!(
        "\n✅ Done in {:.2}s! {} points per chart saved as {} to: {}",
        start_time.elapsed().as_secs_f64(),
        handle.points,
        handle.format.extension().to_uppercase(),
        handle.path.display()
    );

    Ok(Some(handle))
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
