//! Per-sensor history buffers seeded from a snapshot.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use data_spi::SensorReading;
use forecast_api::DEFAULT_BUFFER_CAPACITY;
use forecast_spi::{ForecastError, Result};

use crate::buffer::TemporalBuffer;

/// Read-only map from sensor name to its seeded history.
///
/// Requests never mutate the store: [`BufferStore::clone_for`] hands out an
/// independent copy that a forecast may extend with synthetic values.
#[derive(Debug, Clone)]
pub struct BufferStore {
    buffers: HashMap<String, TemporalBuffer>,
    capacity: usize,
}

impl BufferStore {
    /// Empty store whose buffers hold `capacity` hours.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffers: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Store seeded from snapshot readings.
    pub fn from_snapshot(capacity: usize, readings: &[SensorReading]) -> Self {
        let mut store = Self::new(capacity);
        store.init(readings);
        store
    }

    /// Replace all buffers with the last `capacity` readings per sensor,
    /// in ascending time order.
    pub fn init(&mut self, readings: &[SensorReading]) {
        let mut grouped: HashMap<&str, Vec<(DateTime<FixedOffset>, u64)>> = HashMap::new();
        for reading in readings {
            grouped
                .entry(reading.sensor.as_str())
                .or_default()
                .push((reading.timestamp, reading.count));
        }

        self.buffers.clear();
        for (sensor, mut rows) in grouped {
            rows.sort_by_key(|(ts, _)| *ts);
            let buffer = TemporalBuffer::from_history(
                self.capacity,
                rows.into_iter().map(|(_, count)| count as f64),
            );
            self.buffers.insert(sensor.to_string(), buffer);
        }

        tracing::debug!(
            sensors = self.buffers.len(),
            short = self.buffers.values().filter(|b| !b.is_full()).count(),
            "buffer store initialised"
        );
    }

    /// Independent copy of one sensor's buffer.
    pub fn clone_for(&self, sensor: &str) -> Result<TemporalBuffer> {
        self.buffers
            .get(sensor)
            .cloned()
            .ok_or_else(|| ForecastError::UnknownSensor(sensor.to_string()))
    }

    pub fn contains(&self, sensor: &str) -> bool {
        self.buffers.contains_key(sensor)
    }

    /// Sensor names in sorted order.
    pub fn sensors(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.buffers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Hours of history held for `sensor`.
    pub fn depth(&self, sensor: &str) -> Option<usize> {
        self.buffers.get(sensor).map(TemporalBuffer::len)
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for BufferStore {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_CAPACITY)
    }
}
