//! Indicator identity, classification, and pre-computed series data.
//!
//! The engine never computes indicator values. The data layer supplies
//! them time-aligned to the bar sequence, and the only thing the engine
//! decides is placement: overlay indicators share the main price pane,
//! sub-chart indicators each get their own pane.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::time::TimeValue;

/// Identifier for one indicator configuration, e.g. `sma_20`, `rsi`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorId(String);

impl IndicatorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Placement class for this indicator.
    pub fn class(&self) -> IndicatorClass {
        IndicatorClass::of(self)
    }

    /// Human-readable name for pane titles and legends.
    pub fn display_name(&self) -> String {
        match self.0.as_str() {
            "rsi" => "RSI".to_string(),
            "macd" => "MACD".to_string(),
            "stoch" => "Stochastic".to_string(),
            "vwap" => "VWAP".to_string(),
            "bbands" => "Bollinger Bands".to_string(),
            other => match other.split_once('_') {
                Some((family, period)) => format!("{} {}", family.to_uppercase(), period),
                None => other.to_uppercase(),
            },
        }
    }
}

impl fmt::Display for IndicatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IndicatorId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Where an indicator is plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorClass {
    /// Drawn on the main price pane, sharing its price axis.
    Overlay,
    /// Needs its own price axis, so gets a dedicated pane.
    SubChart,
}

impl IndicatorClass {
    /// Fixed classification table: `rsi`, `macd` and `stoch` live in
    /// sub-panes, everything else overlays the price pane.
    pub fn of(id: &IndicatorId) -> Self {
        match id.as_str() {
            "rsi" | "macd" | "stoch" => IndicatorClass::SubChart,
            _ => IndicatorClass::Overlay,
        }
    }
}

/// Single-line indicator sample (moving averages, RSI, VWAP).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub time: TimeValue,
    pub value: f64,
}

/// Bollinger-band style sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandPoint {
    pub time: TimeValue,
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// MACD sample: two lines plus a histogram column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdPoint {
    pub time: TimeValue,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Stochastic oscillator sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StochPoint {
    pub time: TimeValue,
    pub k: f64,
    pub d: f64,
}

/// Pre-computed point sequence for one indicator.
///
/// The wire shape is a bare array of objects; `untagged` matches the
/// variant by field set. An empty array parses as `Line`, which is
/// indistinguishable from any other empty series and treated the same.
/// Sequences may be shorter than the bar range when lookback requirements
/// trim the head, or empty when the range is too short altogether.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndicatorSeries {
    Line(Vec<LinePoint>),
    Bands(Vec<BandPoint>),
    Macd(Vec<MacdPoint>),
    Stoch(Vec<StochPoint>),
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        match self {
            IndicatorSeries::Line(points) => points.len(),
            IndicatorSeries::Bands(points) => points.len(),
            IndicatorSeries::Macd(points) => points.len(),
            IndicatorSeries::Stoch(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
