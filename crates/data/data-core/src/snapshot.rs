//! Historical snapshot reader and writer
//!
//! A snapshot is a CSV extract of hourly counts with the City of Melbourne
//! column names:
//!
//! ```text
//! Sensor_Name,Sensing_Date,HourDay,Total_of_Directions
//! Bourke Street Mall (North),2025-04-10,0,112
//! ```
//!
//! Extra columns (as found in the raw monthly export) are ignored.

use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Timelike};
use data_spi::{localize, DataError, Result, SensorReading};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
struct SnapshotRow {
    #[serde(rename = "Sensor_Name")]
    sensor_name: String,
    #[serde(rename = "Sensing_Date")]
    sensing_date: String,
    #[serde(rename = "HourDay")]
    hour_day: u32,
    #[serde(rename = "Total_of_Directions")]
    total_of_directions: u64,
}

impl SnapshotRow {
    fn into_reading(self, line: u64) -> Result<SensorReading> {
        let date = parse_sensing_date(&self.sensing_date)
            .map_err(|e| DataError::SnapshotError(format!("line {}: {}", line, e)))?;
        let timestamp = hour_start(date, self.hour_day)
            .map_err(|e| DataError::SnapshotError(format!("line {}: {}", line, e)))?;
        if self.sensor_name.trim().is_empty() {
            return Err(DataError::SnapshotError(format!(
                "line {}: empty Sensor_Name",
                line
            )));
        }

        Ok(SensorReading {
            sensor: self.sensor_name,
            timestamp,
            count: self.total_of_directions,
        })
    }

    fn from_reading(reading: &SensorReading) -> Self {
        let local = reading.timestamp.naive_local();
        Self {
            sensor_name: reading.sensor.clone(),
            sensing_date: local.date().format("%Y-%m-%d").to_string(),
            hour_day: local.hour(),
            total_of_directions: reading.count,
        }
    }
}

/// Parse a `Sensing_Date` cell. Anything after the `YYYY-MM-DD` prefix is ignored.
pub(crate) fn parse_sensing_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    let prefix = value
        .get(..10)
        .ok_or_else(|| DataError::InvalidDate(format!("Expected YYYY-MM-DD, got: {}", value)))?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
        .map_err(|_| DataError::InvalidDate(format!("Expected YYYY-MM-DD, got: {}", value)))
}

/// Start of `hour` on `date`, in AEST.
pub(crate) fn hour_start(date: NaiveDate, hour: u32) -> Result<DateTime<FixedOffset>> {
    let time = NaiveTime::from_hms_opt(hour, 0, 0)
        .ok_or_else(|| DataError::InvalidDate(format!("HourDay out of range: {}", hour)))?;
    localize(date.and_time(time))
}

/// Read snapshot readings from any CSV source.
pub fn read_snapshot<R: Read>(reader: R) -> Result<Vec<SensorReading>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut readings = Vec::new();

    for (idx, result) in reader.deserialize::<SnapshotRow>().enumerate() {
        // Header occupies line 1.
        let line = idx as u64 + 2;
        let row = result.map_err(|e| DataError::SnapshotError(format!("line {}: {}", line, e)))?;
        readings.push(row.into_reading(line)?);
    }

    Ok(readings)
}

/// Load a snapshot CSV file.
pub fn load_snapshot(path: &Path) -> Result<Vec<SensorReading>> {
    let file = File::open(path).map_err(|e| {
        DataError::SnapshotError(format!("cannot open {}: {}", path.display(), e))
    })?;
    let readings = read_snapshot(BufReader::new(file))?;
    tracing::info!(
        path = %path.display(),
        rows = readings.len(),
        "loaded snapshot"
    );
    Ok(readings)
}

/// Write readings as a snapshot CSV.
pub fn write_snapshot<W: Write>(writer: W, readings: &[SensorReading]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for reading in readings {
        writer
            .serialize(SnapshotRow::from_reading(reading))
            .map_err(|e| DataError::SnapshotError(e.to_string()))?;
    }
    writer
        .flush()
        .map_err(|e| DataError::SnapshotError(e.to_string()))
}

/// Reduce a raw extract to the most recent `depth` readings per sensor.
///
/// Readings dated before `since` are dropped, duplicate (sensor, timestamp)
/// pairs keep their first occurrence, and the result is ordered by sensor
/// name then ascending time.
pub fn recent_snapshot(
    readings: Vec<SensorReading>,
    since: Option<NaiveDate>,
    depth: usize,
) -> Vec<SensorReading> {
    let mut seen = HashSet::new();
    let mut by_sensor: BTreeMap<String, Vec<SensorReading>> = BTreeMap::new();

    for reading in readings {
        if let Some(since) = since {
            if reading.timestamp.date_naive() < since {
                continue;
            }
        }
        if !seen.insert((reading.sensor.clone(), reading.timestamp)) {
            continue;
        }
        by_sensor
            .entry(reading.sensor.clone())
            .or_default()
            .push(reading);
    }

    let mut out = Vec::new();
    for (_, mut rows) in by_sensor {
        rows.sort_by_key(|r| r.timestamp);
        let skip = rows.len().saturating_sub(depth);
        out.extend(rows.into_iter().skip(skip));
    }
    out
}
