//! Core types for the panechart engine.
//!
//! This crate provides the data model shared by every other crate:
//! - `TimeValue` / `Interval` - bar timestamps and granularity
//! - `Bar` / `BarSeries` - OHLC data with ordering validation
//! - `IndicatorId` / `IndicatorSeries` - pre-computed indicator data
//! - `ChartKind` - price series presentation

pub mod bar;
pub mod chart;
pub mod indicator;
pub mod time;

pub use bar::{Bar, BarSeries, DataError};
pub use chart::ChartKind;
pub use indicator::{
    BandPoint, IndicatorClass, IndicatorId, IndicatorSeries, LinePoint, MacdPoint, StochPoint,
};
pub use time::{Interval, TimeValue};
