//! OHLC bar data and the validated bar sequence.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time::{Interval, TimeValue};

/// One OHLC bar as delivered by the data layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub time: TimeValue,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl Bar {
    pub fn new(time: TimeValue, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    /// Whether the bar closed at or above its open.
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// Validation failures for an incoming bar sequence.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("bar at index {index} is out of time order")]
    OutOfOrder { index: usize },

    #[error("duplicate bar time at index {index}")]
    DuplicateTime { index: usize },
}

/// An ordered bar sequence with its granularity.
///
/// Construction validates that times are strictly increasing, which is what
/// makes logical indices a stable coordinate: index `i` always refers to
/// the same bar until the dataset itself is replaced.
#[derive(Debug, Clone, Default)]
pub struct BarSeries {
    bars: Vec<Bar>,
    interval: Interval,
}

impl BarSeries {
    /// Build a series from raw bars, rejecting out-of-order or duplicate
    /// times.
    pub fn new(bars: Vec<Bar>, interval: Interval) -> Result<Self, DataError> {
        for (i, pair) in bars.windows(2).enumerate() {
            if pair[1].time < pair[0].time {
                return Err(DataError::OutOfOrder { index: i + 1 });
            }
            if pair[1].time == pair[0].time {
                return Err(DataError::DuplicateTime { index: i + 1 });
            }
        }
        Ok(Self { bars, interval })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Logical index of the bar at exactly `time`, if present.
    pub fn index_of(&self, time: TimeValue) -> Option<usize> {
        self.bars.binary_search_by_key(&time, |b| b.time).ok()
    }

    /// Time of the bar at `index`, if in range.
    pub fn time_at(&self, index: usize) -> Option<TimeValue> {
        self.bars.get(index).map(|b| b.time)
    }
}
