//! regplot - grouped linear regression scatter plots
//!
//! A CLI tool that reads a CSV file, fits an ordinary least squares line
//! between two columns for every value of a category column, and saves a
//! scatter plot with the regression lines overlaid.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any error (missing input, parse failure, fit failure, write failure)

mod analysis;
mod cli;
mod config;
mod dataset;
mod error;
mod models;
mod plot;
mod report;

use anyhow::{Context, Result};
use cli::{Args, SummaryFormat};
use config::Config;
use dataset::Dataset;
use models::FitReport;
use plot::{PlotModel, PlotRequest};
use std::path::Path;
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    if let Err(e) = args.validate() {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }

    init_logging(&args);

    info!("regplot v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!("Plotting failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .regplot.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(config::CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            config::CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", config::CONFIG_FILE_NAME);
    println!("   Edit it to change the default columns, figure size and palette.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// `RUST_LOG`, when set, takes precedence over `--verbose` / `--quiet`.
fn init_logging(args: &Args) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(args.log_level(), directives.as_deref());

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
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

fn log_filter(level: Level, directives: Option<&str>) -> EnvFilter {
    match directives {
        Some(d) if !d.trim().is_empty() => EnvFilter::new(d),
        _ => EnvFilter::new(level.as_str()),
    }
}

/// Load the data, fit every group, then write the plot and optional summary.
fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let input = args.input_path();
    let dataset = match Dataset::from_path(input) {
        Ok(ds) => ds,
        Err(e) => {
            error!("Problem reading {}", input.display());
            return Err(e.into());
        }
    };
    info!("Loaded {} rows from {}", dataset.len(), input.display());
    debug!("Columns: {:?}", dataset.columns());

    let category = config.category_column();
    let mut request = PlotRequest::new(&config.columns.x, &config.columns.y, category);
    if let Some(ref output) = args.output_plot_path {
        request = request.with_output(output);
    }

    let palette = config.plot.palette();
    debug!("Using a {}-color palette", palette.len());

    if args.dry_run {
        println!("🔍 Dry run: fitting without writing a plot...\n");
        let model = plot::build_model(
            &dataset,
            &request.x_column,
            &request.y_column,
            &request.grouping,
            &palette,
        )?;
        print_fits(&model);

        let report = FitReport::from_model(&model, input, category, None);
        write_summary(&args, &report)?;

        println!("\n✅ Dry run complete. No plot was written.");
        return Ok(());
    }

    println!(
        "📈 Plotting {} vs {}{}",
        request.y_column,
        request.x_column,
        category.map(|c| format!(" by {}", c)).unwrap_or_default()
    );

    let outcome = plot::plot(&dataset, &request, &config.plot.style(), &palette)?;
    print_fits(&outcome.model);

    let report = FitReport::from_model(&outcome.model, input, category, Some(outcome.path.as_path()));
    write_summary(&args, &report)?;

    println!(
        "\n✅ Plot saved to: {} ({:?}, {} bytes)",
        outcome.path.display(),
        outcome.format,
        outcome.bytes_written
    );

    Ok(())
}

/// Print one line per fitted group.
fn print_fits(model: &PlotModel) {
    println!("\n📊 Regression lines:");
    for series in &model.series {
        println!(
            "   {:<16} n={:<4} y = {:.4}·x + {:.4}   r² = {:.4}",
            series.label,
            series.fit.n,
            series.fit.slope,
            series.fit.intercept,
            series.fit.r_squared()
        );
    }
}

/// Write the fit summary if --summary was given.
fn write_summary(args: &Args, report: &FitReport) -> Result<()> {
    let Some(ref path) = args.summary else {
        return Ok(());
    };

    let output = match args.summary_format {
        SummaryFormat::Json => report::generate_json_report(report)?,
        SummaryFormat::Markdown => report::generate_markdown_report(report),
    };

    std::fs::write(path, &output)
        .with_context(|| format!("Failed to write summary to {}", path.display()))?;
    info!("Summary written to {}", path.display());
    Ok(())
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
            info!("Loaded default config from {}", config::CONFIG_FILE_NAME);
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
