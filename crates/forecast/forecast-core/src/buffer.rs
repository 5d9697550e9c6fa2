//! Fixed-capacity hourly history for one sensor.

use std::collections::VecDeque;

use forecast_api::DEFAULT_BUFFER_CAPACITY;
use forecast_spi::{ForecastError, Result};

/// Rolling window of hourly counts, oldest first.
///
/// Appending to a full buffer evicts the oldest entry. `lag_at(k)` reads the
/// value `k` hours before the hour about to be predicted, so `lag_at(1)` is
/// the most recent entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalBuffer {
    history: VecDeque<f64>,
    capacity: usize,
}

impl TemporalBuffer {
    /// Empty buffer holding one week of hours.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY)
    }

    /// Empty buffer with a custom capacity (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Buffer seeded from values in chronological order. Only the last
    /// `capacity` values are kept.
    pub fn from_history<I>(capacity: usize, values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut buffer = Self::with_capacity(capacity);
        for value in values {
            buffer.append(value);
        }
        buffer
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.history.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent value.
    pub fn latest(&self) -> Option<f64> {
        self.history.back().copied()
    }

    /// Value `offset` hours back.
    pub fn lag_at(&self, offset: usize) -> Result<f64> {
        if offset == 0 {
            return Err(ForecastError::InvalidInput(
                "lag offset must be at least 1".to_string(),
            ));
        }
        let len = self.history.len();
        if offset > len {
            return Err(ForecastError::InsufficientHistory {
                required: offset,
                actual: len,
            });
        }
        Ok(self.history[len - offset])
    }

    /// Mean of the last `window` values.
    pub fn rolling_mean(&self, window: usize) -> Result<f64> {
        if window == 0 {
            return Err(ForecastError::InvalidInput(
                "rolling window must be at least 1".to_string(),
            ));
        }
        let len = self.history.len();
        if window > len {
            return Err(ForecastError::InsufficientHistory {
                required: window,
                actual: len,
            });
        }
        let sum: f64 = self.history.iter().skip(len - window).sum();
        Ok(sum / window as f64)
    }

    /// Push a new most-recent value, evicting the oldest when full.
    pub fn append(&mut self, value: f64) {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(value);
    }

    /// Values oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.history.iter()
    }
}

impl Default for TemporalBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week() -> TemporalBuffer {
        TemporalBuffer::from_history(168, (0..168).map(|v| v as f64))
    }

    #[test]
    fn test_lag_at_reads_from_end() {
        let buffer = week();
        assert_eq!(buffer.lag_at(1).unwrap(), 167.0);
        assert_eq!(buffer.lag_at(24).unwrap(), 144.0);
        assert_eq!(buffer.lag_at(168).unwrap(), 0.0);
    }

    #[test]
    fn test_lag_at_zero_is_invalid() {
        assert!(matches!(
            week().lag_at(0),
            Err(ForecastError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_lag_at_beyond_history() {
        let buffer = TemporalBuffer::from_history(168, vec![1.0; 100]);
        assert!(matches!(
            buffer.lag_at(168),
            Err(ForecastError::InsufficientHistory {
                required: 168,
                actual: 100
            })
        ));
        assert_eq!(buffer.lag_at(100).unwrap(), 1.0);
    }

    #[test]
    fn test_append_evicts_oldest_when_full() {
        let mut buffer = week();
        assert!(buffer.is_full());
        buffer.append(500.0);
        assert_eq!(buffer.len(), 168);
        assert_eq!(buffer.lag_at(1).unwrap(), 500.0);
        assert_eq!(buffer.lag_at(168).unwrap(), 1.0);
        assert_eq!(buffer.iter().next(), Some(&1.0));
    }

    #[test]
    fn test_append_grows_until_capacity() {
        let mut buffer = TemporalBuffer::with_capacity(3);
        buffer.append(1.0);
        buffer.append(2.0);
        assert_eq!(buffer.len(), 2);
        buffer.append(3.0);
        buffer.append(4.0);
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_from_history_keeps_tail() {
        let buffer = TemporalBuffer::from_history(168, (0..200).map(|v| v as f64));
        assert_eq!(buffer.len(), 168);
        assert_eq!(buffer.lag_at(168).unwrap(), 32.0);
        assert_eq!(buffer.latest(), Some(199.0));
    }

    #[test]
    fn test_rolling_mean() {
        let buffer = TemporalBuffer::from_history(168, vec![1.0, 2.0, 6.0, 7.0]);
        assert_eq!(buffer.rolling_mean(3).unwrap(), 5.0);
        assert!(matches!(
            buffer.rolling_mean(5),
            Err(ForecastError::InsufficientHistory { .. })
        ));
        assert!(buffer.rolling_mean(0).is_err());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = week();
        let mut copy = original.clone();
        copy.append(-1.0);
        assert_eq!(original.lag_at(1).unwrap(), 167.0);
        assert_eq!(copy.lag_at(1).unwrap(), -1.0);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut buffer = TemporalBuffer::with_capacity(0);
        buffer.append(4.0);
        buffer.append(5.0);
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.latest(), Some(5.0));
    }
}
