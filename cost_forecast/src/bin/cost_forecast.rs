//! Cost forecast CLI
//!
//! Reads billing records from CSV, selects the historical window, runs the
//! forecast engine and prints the report JSON to stdout.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use cost_forecast::utils::parse_date;
use cost_forecast::{
    parse_cloud_list, CloudDirectory, ForecastConfig, ForecastEngine, ForecastReport,
    HistoryLoader, TrendWindowKind,
};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Project per-cloud daily spend from billing history
#[derive(Parser, Debug)]
#[command(name = "cost_forecast", author, version, about)]
struct Args {
    /// Billing records CSV with a date,cloud_id,cloud_name,cost header
    #[arg(short, long)]
    input: PathBuf,

    /// JSON configuration file; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of future days to project
    #[arg(long, allow_negative_numbers = true)]
    horizon: Option<i64>,

    /// Days of history to read
    #[arg(long, allow_negative_numbers = true)]
    history_days: Option<i64>,

    /// Comma-separated cloud-name allowlist
    #[arg(long)]
    clouds: Option<String>,

    /// Day the forecast starts after (YYYY-MM-DD), defaults to today in UTC
    #[arg(long)]
    reference_date: Option<String>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Keep negative predictions instead of flooring them at zero
    #[arg(long)]
    no_clamp: bool,

    /// Trend window strategy (records, dates)
    #[arg(long)]
    trend_window: Option<TrendWindowKind>,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn resolve_config(&self) -> Result<ForecastConfig> {
        let mut config = match &self.config {
            Some(path) => ForecastConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => ForecastConfig::default(),
        };

        if let Some(horizon) = self.horizon {
            config.horizon_days = horizon;
        }
        if let Some(history_days) = self.history_days {
            config.history_days = history_days;
        }
        if let Some(clouds) = &self.clouds {
            config.clouds = parse_cloud_list(clouds);
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.no_clamp {
            config.clamp_negative = false;
        }
        if let Some(trend_window) = self.trend_window {
            config.trend_window = trend_window;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // RUST_LOG takes precedence over --log-level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    // Logs go to stderr so stdout stays valid JSON
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = args.resolve_config()?;
    let reference_date = match &args.reference_date {
        Some(raw) => parse_date(raw)?,
        None => Utc::now().date_naive(),
    };

    let records = HistoryLoader::from_csv(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let directory = CloudDirectory::from_records(&records);
    let history = config
        .history_query(reference_date)?
        .apply(&records, &directory);
    info!(
        records = records.len(),
        points = history.len(),
        clouds = directory.len(),
        "prepared history"
    );

    let engine = ForecastEngine::from_config(&config)?;
    let output = engine.compute(
        &history,
        config.horizon_days,
        reference_date,
        &mut config.noise_source(),
    )?;

    let report = ForecastReport::build(&history, &output, &directory);
    let json = if args.pretty {
        report.to_json_pretty()?
    } else {
        report.to_json()?
    };
    println!("{}", json);

    Ok(())
}
