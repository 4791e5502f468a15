use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use seasonal_weather::{EstimatorConfig, Location, PowerClient, SeasonalEstimator};
use serde::Serialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Seasonal weather estimates from historic NASA POWER observations.
#[derive(Debug, Parser)]
#[command(name = "seasonal-weather", version, about)]
pub struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict the weather on a calendar day.
    Predict(PredictArgs),
    /// Serve the HTTP API.
    Serve(ServeArgs),
    /// Report how complete the provider's series are.
    Completeness(CompletenessArgs),
}

#[derive(Debug, clap::Args)]
pub struct PointArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub latitude: f64,

    /// Parameter codes; defaults to every catalog parameter.
    #[arg(short, long, num_args = 1.., value_delimiter = ',')]
    pub parameters: Option<Vec<String>>,

    /// Override the configured first year.
    #[arg(long)]
    pub start_year: Option<i32>,

    /// Override the configured last year.
    #[arg(long)]
    pub end_year: Option<i32>,
}

#[derive(Debug, clap::Args)]
pub struct PredictArgs {
    #[command(flatten)]
    pub point: PointArgs,

    /// Target day as YYYY/MM/DD, MM/DD or YYYYMMDD.
    #[arg(short, long)]
    pub date: String,

    #[arg(short, long)]
    pub tolerance_days: Option<u32>,

    /// Write the JSON result here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, clap::Args)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1:5000")]
    pub addr: SocketAddr,
}

#[derive(Debug, clap::Args)]
pub struct CompletenessArgs {
    #[command(flatten)]
    pub point: PointArgs,

    /// Write the JSON report here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Pretty-prints `value` as JSON to `output`, or to stdout.
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn estimator(config_path: Option<&Path>) -> Result<SeasonalEstimator<PowerClient>> {
    let config = EstimatorConfig::load(config_path)?;
    Ok(SeasonalEstimator::from_config(config)?)
}

pub async fn run(cli: Cli) -> Result<()> {
    let estimator = estimator(cli.config.as_deref())?;
    let defaults = estimator.config().default_years;

    match cli.command {
        Command::Predict(args) => {
            let point = args.point;
            let result = estimator
                .predict()
                .location(Location::new(point.longitude, point.latitude)?)
                .date(&args.date)
                .maybe_parameters(point.parameters)
                .maybe_tolerance_days(args.tolerance_days)
                .years(defaults.with_bounds(point.start_year, point.end_year))
                .call()
                .await?;
            write_json(&result, args.output.as_deref())
        }
        Command::Serve(args) => {
            seasonal_weather::server::serve(estimator, args.addr).await?;
            Ok(())
        }
        Command::Completeness(args) => {
            let point = args.point;
            let report = estimator
                .completeness()
                .location(Location::new(point.longitude, point.latitude)?)
                .maybe_parameters(point.parameters)
                .years(defaults.with_bounds(point.start_year, point.end_year))
                .call()
                .await?;
            write_json(&report, args.output.as_deref())
        }
    }
}
