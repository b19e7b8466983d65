//! Series slots: the plotted form of bars and indicator data.
//!
//! A pane never sees raw indicator points. Everything it plots is a
//! [`SeriesSlot`] holding index-aligned values, so auto-scaling and
//! rendering work the same way for the price series, an overlay moving
//! average, or a MACD histogram. Expansion is shape-driven: a bands
//! series becomes three line slots, a MACD series two lines plus a
//! histogram, regardless of which pane the slots land in.

use log::debug;
use panechart_core::{Bar, BarSeries, ChartKind, IndicatorId, IndicatorSeries, TimeValue};

// Palette from the hosting UI theme. Histogram and oscillator line pairs
// reuse the MACD convention: blue main line, orange signal.
pub const PRICE_LINE_COLOR: [f32; 4] = [0.231, 0.510, 0.965, 1.0]; // #3b82f6
pub const CANDLE_UP_COLOR: [f32; 4] = [0.133, 0.773, 0.369, 1.0]; // #22c55e
pub const CANDLE_DOWN_COLOR: [f32; 4] = [0.937, 0.267, 0.267, 1.0]; // #ef4444
pub const AREA_FILL_COLOR: [f32; 4] = [0.231, 0.510, 0.965, 0.15];
pub const MAIN_LINE_COLOR: [f32; 4] = [0.2, 0.6, 1.0, 1.0];
pub const SIGNAL_LINE_COLOR: [f32; 4] = [1.0, 0.5, 0.2, 1.0];
pub const HISTOGRAM_POS_COLOR: [f32; 4] = [0.2, 0.8, 0.4, 1.0];
pub const HISTOGRAM_NEG_COLOR: [f32; 4] = [0.8, 0.2, 0.2, 1.0];

const OVERLAY_PALETTE: &[[f32; 4]] = &[
    [0.961, 0.620, 0.043, 1.0], // #f59e0b amber
    [0.545, 0.361, 0.965, 1.0], // #8b5cf6 violet
    [0.024, 0.714, 0.831, 1.0], // #06b6d4 cyan
    [0.925, 0.282, 0.600, 1.0], // #ec4899 pink
    [0.063, 0.725, 0.506, 1.0], // #10b981 emerald
];

/// One index-aligned sample inside a slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub index: usize,
    pub value: f64,
}

/// One bar of the price series; its position in the vector is its logical
/// index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OhlcPoint {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl From<&Bar> for OhlcPoint {
    fn from(bar: &Bar) -> Self {
        Self {
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
        }
    }
}

/// Plotted values of one slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotData {
    Ohlc(Vec<OhlcPoint>),
    Line(Vec<SeriesPoint>),
    Histogram(Vec<SeriesPoint>),
}

/// How a slot is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotPaint {
    Candles,
    Line { color: [f32; 4] },
    Area { color: [f32; 4], fill: [f32; 4] },
    Histogram { pos: [f32; 4], neg: [f32; 4] },
}

/// One plottable series inside a pane.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSlot {
    pub label: String,
    pub paint: SlotPaint,
    pub data: SlotData,
}

/// Build the main pane's price slot for the selected chart kind.
///
/// The slot always carries full OHLC data; only the paint changes with
/// the chart kind. Keeping the data identical keeps the main pane's
/// auto-scale identical across chart-kind switches, so a priced
/// annotation stays on the same pixel row through the rebuild.
pub fn price_slot(bars: &BarSeries, kind: ChartKind) -> SeriesSlot {
    let paint = match kind {
        ChartKind::Candlestick => SlotPaint::Candles,
        ChartKind::Line => SlotPaint::Line {
            color: PRICE_LINE_COLOR,
        },
        ChartKind::Area => SlotPaint::Area {
            color: PRICE_LINE_COLOR,
            fill: AREA_FILL_COLOR,
        },
    };

    SeriesSlot {
        label: "Price".to_string(),
        paint,
        data: SlotData::Ohlc(bars.bars().iter().map(OhlcPoint::from).collect()),
    }
}

/// Expand one indicator's point sequence into slots, aligning each point's
/// time to its logical bar index. Points whose time is not in the bar
/// sequence are dropped.
pub fn expand_series(
    id: &IndicatorId,
    series: &IndicatorSeries,
    bars: &BarSeries,
) -> Vec<SeriesSlot> {
    let name = id.display_name();
    let line = |label: String, color, points| SeriesSlot {
        label,
        paint: SlotPaint::Line { color },
        data: SlotData::Line(points),
    };

    match series {
        IndicatorSeries::Line(points) => {
            let aligned = align(id, bars, points.iter().map(|p| (p.time, p.value)));
            vec![line(name, line_color(id), aligned)]
        }
        IndicatorSeries::Bands(points) => {
            let color = line_color(id);
            vec![
                line(
                    format!("{name} Upper"),
                    color,
                    align(id, bars, points.iter().map(|p| (p.time, p.upper))),
                ),
                line(
                    format!("{name} Middle"),
                    color,
                    align(id, bars, points.iter().map(|p| (p.time, p.middle))),
                ),
                line(
                    format!("{name} Lower"),
                    color,
                    align(id, bars, points.iter().map(|p| (p.time, p.lower))),
                ),
            ]
        }
        IndicatorSeries::Macd(points) => {
            vec![
                line(
                    name.clone(),
                    MAIN_LINE_COLOR,
                    align(id, bars, points.iter().map(|p| (p.time, p.macd))),
                ),
                line(
                    format!("{name} Signal"),
                    SIGNAL_LINE_COLOR,
                    align(id, bars, points.iter().map(|p| (p.time, p.signal))),
                ),
                SeriesSlot {
                    label: format!("{name} Histogram"),
                    paint: SlotPaint::Histogram {
                        pos: HISTOGRAM_POS_COLOR,
                        neg: HISTOGRAM_NEG_COLOR,
                    },
                    data: SlotData::Histogram(align(
                        id,
                        bars,
                        points.iter().map(|p| (p.time, p.histogram)),
                    )),
                },
            ]
        }
        IndicatorSeries::Stoch(points) => {
            vec![
                line(
                    format!("{name} %K"),
                    MAIN_LINE_COLOR,
                    align(id, bars, points.iter().map(|p| (p.time, p.k))),
                ),
                line(
                    format!("{name} %D"),
                    SIGNAL_LINE_COLOR,
                    align(id, bars, points.iter().map(|p| (p.time, p.d))),
                ),
            ]
        }
    }
}

fn align(
    id: &IndicatorId,
    bars: &BarSeries,
    points: impl Iterator<Item = (TimeValue, f64)>,
) -> Vec<SeriesPoint> {
    let mut dropped = 0usize;
    let mut aligned = Vec::new();

    for (time, value) in points {
        match bars.index_of(time) {
            Some(index) if value.is_finite() => aligned.push(SeriesPoint { index, value }),
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!("indicator {id}: dropped {dropped} points with no matching bar");
    }

    aligned
}

fn line_color(id: &IndicatorId) -> [f32; 4] {
    let family = id.as_str().split('_').next().unwrap_or(id.as_str());
    let slot = match family {
        "sma" => 0,
        "ema" => 1,
        "vwap" => 2,
        "bbands" => 1,
        "rsi" => 1,
        _ => family.len() % OVERLAY_PALETTE.len(),
    };
    OVERLAY_PALETTE[slot]
}
