//! # pedcast
//!
//! Command-line interface for offline forecasts and snapshot preparation.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use clap::{Parser, Subcommand};
use data_facade::{
    floor_hour, load_snapshot, parse_timestamp, read_snapshot, recent_snapshot, write_snapshot,
    SensorReading, SnapshotConfig, DEFAULT_SNAPSHOT_DEPTH,
};
use forecast_facade::{
    BufferStore, FeatureEncoder, ForecastConfig, Forecaster, ModelBundle, Prediction, Scorer,
};
use serde::Serialize;

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "pedcast")]
#[command(about = "Pedestrian count forecasting CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recursive forecast for one sensor from a snapshot
    Forecast {
        /// Snapshot CSV seeding the history buffers
        #[arg(long)]
        snapshot: PathBuf,

        /// Model bundle JSON
        #[arg(short, long)]
        model: PathBuf,

        /// Sensor name
        #[arg(short, long)]
        sensor: String,

        /// Number of hours to forecast
        #[arg(long, default_value = "24")]
        hours: usize,

        /// First forecast hour (ISO-8601; naive values are AEST).
        /// Defaults to the hour after the sensor's last reading.
        #[arg(long)]
        start: Option<String>,

        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Reduce a raw counts extract to the most recent week per sensor
    Snapshot {
        /// Raw counts CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Snapshot CSV to write
        #[arg(short, long)]
        output: PathBuf,

        /// Drop readings before this date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<NaiveDate>,

        /// Readings kept per sensor
        #[arg(long, default_value_t = DEFAULT_SNAPSHOT_DEPTH)]
        depth: usize,
    },
}

#[derive(Debug, Serialize)]
struct HourlyCount {
    timestamp: DateTime<FixedOffset>,
    count: u64,
}

impl From<&Prediction> for HourlyCount {
    fn from(p: &Prediction) -> Self {
        Self {
            timestamp: p.timestamp,
            count: p.count(),
        }
    }
}

/// Parse an ISO-8601 start, floored to the whole hour in AEST.
fn parse_start(value: &str) -> CliResult<DateTime<FixedOffset>> {
    parse_timestamp(value)
        .and_then(floor_hour)
        .map_err(|e| format!("Invalid start timestamp: {}", e))
}

/// Hour after the sensor's most recent reading.
fn next_hour_after(readings: &[SensorReading], sensor: &str) -> CliResult<DateTime<FixedOffset>> {
    readings
        .iter()
        .filter(|r| r.sensor == sensor)
        .map(|r| r.timestamp)
        .max()
        .ok_or_else(|| format!("Unknown sensor: {}", sensor))?
        .checked_add_signed(Duration::hours(1))
        .ok_or_else(|| format!("No hour follows the last reading for {}", sensor))
}

/// Run forecast command
fn run_forecast(
    snapshot: PathBuf,
    model: PathBuf,
    sensor: String,
    hours: usize,
    start: Option<String>,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let config = ForecastConfig::default();
    let hours = config.resolve_hours(Some(hours)).map_err(|e| e.to_string())?;

    let readings = load_snapshot(&snapshot).map_err(|e| e.to_string())?;
    println!(
        "Loaded {} readings from {:?}",
        readings.len(),
        snapshot.file_name().unwrap_or_default()
    );

    let start = match start {
        Some(value) => parse_start(&value)?,
        None => next_hour_after(&readings, &sensor)?,
    };

    let store = BufferStore::from_snapshot(config.buffer_capacity, &readings);
    let buffer = store.clone_for(&sensor).map_err(|e| e.to_string())?;

    let bundle = ModelBundle::load(&model).map_err(|e| e.to_string())?;
    let model_name = bundle.name().to_string();
    let forecaster = Forecaster::new(FeatureEncoder::victoria(), Arc::new(bundle));

    let predictions = forecaster
        .forecast(&sensor, &start, hours, buffer)
        .map_err(|e| e.to_string())?;

    println!("Model: {}", model_name);
    println!("Sensor: {}", sensor);
    println!("Forecast {} hours from {}:", hours, start.to_rfc3339());
    for p in &predictions {
        println!("  {}  {:>6}", p.timestamp.format("%Y-%m-%d %H:%M"), p.count());
    }

    if let Some(path) = output {
        let rows: Vec<HourlyCount> = predictions.iter().map(HourlyCount::from).collect();
        let file = File::create(&path).map_err(|e| format!("Failed to create output: {}", e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &rows)
            .map_err(|e| format!("Failed to write JSON: {}", e))?;
        println!("Forecasts written to {:?}", path);
    }

    Ok(())
}

/// Run snapshot command
fn run_snapshot(config: &SnapshotConfig, output: PathBuf) -> CliResult<()> {
    if config.depth == 0 {
        return Err("depth must be at least 1".to_string());
    }

    let file = File::open(&config.path).map_err(|e| format!("Failed to open file: {}", e))?;
    let raw = read_snapshot(BufReader::new(file)).map_err(|e| e.to_string())?;
    let total = raw.len();

    let recent = recent_snapshot(raw, config.since, config.depth);
    let out = File::create(&output).map_err(|e| format!("Failed to create output: {}", e))?;
    write_snapshot(BufWriter::new(out), &recent).map_err(|e| e.to_string())?;

    println!(
        "Kept {} of {} readings (depth {}) in {:?}",
        recent.len(),
        total,
        config.depth,
        output
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Forecast {
            snapshot,
            model,
            sensor,
            hours,
            start,
            output,
        } => run_forecast(snapshot, model, sensor, hours, start, output),

        Commands::Snapshot {
            input,
            output,
            since,
            depth,
        } => {
            let mut config = SnapshotConfig::new(input).with_depth(depth);
            config.since = since;
            run_snapshot(&config, output)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
