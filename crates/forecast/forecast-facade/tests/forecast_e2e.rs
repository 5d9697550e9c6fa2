//! End-to-end tests for the forecast crate
//!
//! Drives a snapshot-seeded store and a bundled model through multi-day
//! recursive forecasts using only the facade API.

use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use data_spi::{aest, SensorReading};
use forecast_facade::{BufferStore, FeatureEncoder, ForecastConfig, Forecaster, ModelBundle};

const MODEL: &str = include_str!("fixtures/model.json");
const BOURKE: &str = "Bourke Street Mall (North)";
const FLINDERS: &str = "Flinders Street Station Underpass";

fn start() -> DateTime<FixedOffset> {
    aest().with_ymd_and_hms(2025, 4, 10, 0, 0, 0).unwrap()
}

fn snapshot() -> Vec<SensorReading> {
    let mut rows = Vec::new();
    for h in 1..=200 {
        let ts = start() - Duration::hours(h);
        rows.push(SensorReading::new(FLINDERS, ts, 600));
        rows.push(SensorReading::new(BOURKE, ts, 100));
    }
    rows
}

fn forecaster() -> Forecaster {
    let bundle = ModelBundle::from_json(MODEL).unwrap();
    Forecaster::new(FeatureEncoder::victoria(), Arc::new(bundle))
}

#[test]
fn e2e_multi_sensor_store() {
    let config = ForecastConfig::default();
    let store = BufferStore::from_snapshot(config.buffer_capacity, &snapshot());

    assert_eq!(store.sensors(), vec![BOURKE, FLINDERS]);
    assert_eq!(store.depth(FLINDERS), Some(168));
    assert_eq!(store.depth(BOURKE), Some(168));

    let f = forecaster();
    let busy = f
        .forecast(FLINDERS, &start(), 24, store.clone_for(FLINDERS).unwrap())
        .unwrap();
    let quiet = f
        .forecast(BOURKE, &start(), 24, store.clone_for(BOURKE).unwrap())
        .unwrap();

    for (b, q) in busy.iter().zip(&quiet) {
        assert_eq!(b.timestamp, q.timestamp);
        assert!(b.value > q.value);
    }
}

#[test]
fn e2e_predictions_feed_the_weekly_lag() {
    let store = BufferStore::from_snapshot(168, &snapshot());
    let out = forecaster()
        .forecast(FLINDERS, &start(), 169, store.clone_for(FLINDERS).unwrap())
        .unwrap();

    // Thursday 00:00 from a busy week: 450 + 20 - 100 + 0.5
    assert_eq!(out[0].value, 370.5);
    // Thursday 06:00 with lag_24h = 600: 450 + 20 + 90 + 0.5
    assert_eq!(out[6].value, 560.5);
    // One week on, lag_168h is the first prediction (370.5 < 400)
    assert_eq!(out[168].timestamp, start() + Duration::hours(168));
    assert_eq!(out[168].value, 70.5);
}

#[test]
fn e2e_maximum_horizon() {
    let config = ForecastConfig::default();
    let hours = config.resolve_hours(Some(config.max_hours)).unwrap();
    let store = BufferStore::from_snapshot(config.buffer_capacity, &snapshot());

    let out = forecaster()
        .forecast(BOURKE, &start(), hours, store.clone_for(BOURKE).unwrap())
        .unwrap();

    assert_eq!(out.len(), 720);
    for (i, p) in out.iter().enumerate() {
        assert_eq!(p.timestamp, start() + Duration::hours(i as i64));
        assert!(p.value >= 0.0);
        assert!(p.value.is_finite());
    }
}

#[test]
fn e2e_reload_replaces_history() {
    let mut store = BufferStore::from_snapshot(168, &snapshot());
    let f = forecaster();
    let before = f
        .forecast(BOURKE, &start(), 1, store.clone_for(BOURKE).unwrap())
        .unwrap();

    let busier: Vec<SensorReading> = snapshot()
        .into_iter()
        .filter(|r| r.sensor == BOURKE)
        .map(|r| SensorReading::new(BOURKE, r.timestamp, 900))
        .collect();
    store.init(&busier);

    assert!(!store.contains(FLINDERS));
    let after = f
        .forecast(BOURKE, &start(), 1, store.clone_for(BOURKE).unwrap())
        .unwrap();
    assert!(after[0].value > before[0].value);
}
