//! Per-frame CPU geometry.
//!
//! The engine does not rasterize. Each redraw it assembles flat shape
//! buffers per pane - lines, rectangles, labels, markers - and the host
//! view layer draws them with whatever canvas it has. Shapes are pixel
//! positions inside the pane's rectangle, derived from domain data
//! through the pane's mapper on every frame and never cached.

use std::ops::Range;

use crate::coords::PaneMapper;
use crate::pane::{Pane, PaneRole};
use crate::series::{SeriesPoint, SlotData, SlotPaint};

#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub color: [f32; 4],
    pub width: f32,
    pub dashed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub color: [f32; 4],
}

/// Text anchored at a pixel position. `axis_anchored` labels belong in
/// the price-axis gutter at the given row instead of inside the plot.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelShape {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub color: [f32; 4],
    pub background: Option<[f32; 4]>,
    pub axis_anchored: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerShape {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: [f32; 4],
}

/// Everything one pane draws this frame.
#[derive(Debug, Clone)]
pub struct PaneScene {
    pub role: PaneRole,
    pub width: f32,
    pub height: f32,
    pub lines: Vec<LineShape>,
    pub rects: Vec<RectShape>,
    pub labels: Vec<LabelShape>,
    pub markers: Vec<MarkerShape>,
}

impl PaneScene {
    #[must_use]
    pub fn new(role: PaneRole, width: f32, height: f32) -> Self {
        Self {
            role,
            width,
            height,
            lines: Vec::new(),
            rects: Vec::new(),
            labels: Vec::new(),
            markers: Vec::new(),
        }
    }

    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.lines.len() + self.rects.len() + self.labels.len() + self.markers.len()
    }
}

// Body fraction of one bar slot, leaving a gap between candles.
const CANDLE_BODY_FRAC: f32 = 0.7;
const HISTOGRAM_BODY_FRAC: f32 = 0.6;
const SERIES_LINE_WIDTH: f32 = 2.0;

/// Render a pane's series slots into a fresh scene.
///
/// Drawing primitives are appended afterwards by their own renderers;
/// this covers only the data series. A pane without a usable mapper
/// yields an empty scene of the right size.
pub fn pane_scene(pane: &Pane) -> PaneScene {
    let mut scene = PaneScene::new(pane.role().clone(), pane.width(), pane.height());
    let mapper = pane.mapper();

    let Some(ppi) = mapper.pixels_per_index() else {
        return scene;
    };

    let range = pane.visible_range();
    let lo = range.from.floor().max(0.0) as usize;
    let hi = range.to.ceil().max(0.0) as usize;
    let center_x = |index: usize| mapper.x_at_index(index as f64 + 0.5);

    for slot in pane.slots() {
        match (&slot.data, slot.paint) {
            (SlotData::Ohlc(points), SlotPaint::Candles) => {
                let body_w = (ppi * CANDLE_BODY_FRAC).max(1.0);
                for (index, point) in points.iter().enumerate().take(hi).skip(lo) {
                    let (Some(x), Some(y_open), Some(y_close), Some(y_high), Some(y_low)) = (
                        center_x(index),
                        mapper.y_at_price(point.open),
                        mapper.y_at_price(point.close),
                        mapper.y_at_price(point.high),
                        mapper.y_at_price(point.low),
                    ) else {
                        continue;
                    };

                    let color = if point.close >= point.open {
                        crate::series::CANDLE_UP_COLOR
                    } else {
                        crate::series::CANDLE_DOWN_COLOR
                    };

                    scene.lines.push(LineShape {
                        x1: x,
                        y1: y_high,
                        x2: x,
                        y2: y_low,
                        color,
                        width: 1.0,
                        dashed: false,
                    });
                    scene.rects.push(RectShape {
                        x: x - body_w / 2.0,
                        y: y_open.min(y_close),
                        w: body_w,
                        h: (y_open - y_close).abs().max(1.0),
                        color,
                    });
                }
            }
            // Line and area paints over bar data plot the closes.
            (SlotData::Ohlc(points), paint) => {
                let (color, fill) = match paint {
                    SlotPaint::Line { color } => (color, None),
                    SlotPaint::Area { color, fill } => (color, Some(fill)),
                    _ => continue,
                };
                let closes: Vec<SeriesPoint> = points
                    .iter()
                    .enumerate()
                    .map(|(index, point)| SeriesPoint {
                        index,
                        value: point.close,
                    })
                    .collect();
                push_value_run(&mut scene, &mapper, lo..hi, &closes, color, fill);
            }
            (SlotData::Line(points), paint) => {
                let (color, fill) = match paint {
                    SlotPaint::Line { color } => (color, None),
                    SlotPaint::Area { color, fill } => (color, Some(fill)),
                    _ => continue,
                };
                push_value_run(&mut scene, &mapper, lo..hi, points, color, fill);
            }
            (SlotData::Histogram(points), SlotPaint::Histogram { pos, neg }) => {
                let Some(y_zero) = mapper.y_at_price(0.0) else {
                    continue;
                };
                let body_w = (ppi * HISTOGRAM_BODY_FRAC).max(1.0);
                for point in points {
                    if point.index < lo || point.index >= hi {
                        continue;
                    }
                    let (Some(x), Some(y)) =
                        (center_x(point.index), mapper.y_at_price(point.value))
                    else {
                        continue;
                    };
                    scene.rects.push(RectShape {
                        x: x - body_w / 2.0,
                        y: y.min(y_zero),
                        w: body_w,
                        h: (y - y_zero).abs().max(1.0),
                        color: if point.value >= 0.0 { pos } else { neg },
                    });
                }
            }
            _ => {}
        }
    }

    scene
}

/// Polyline over index-aligned values, plus optional fill columns down to
/// the pane bottom. Segments fully outside `clip` are dropped.
fn push_value_run(
    scene: &mut PaneScene,
    mapper: &PaneMapper,
    clip: Range<usize>,
    points: &[SeriesPoint],
    color: [f32; 4],
    fill: Option<[f32; 4]>,
) {
    let Some(ppi) = mapper.pixels_per_index() else {
        return;
    };
    let center_x = |index: usize| mapper.x_at_index(index as f64 + 0.5);

    for pair in points.windows(2) {
        if pair[1].index < clip.start || pair[0].index >= clip.end {
            continue;
        }
        let (Some(x1), Some(y1), Some(x2), Some(y2)) = (
            center_x(pair[0].index),
            mapper.y_at_price(pair[0].value),
            center_x(pair[1].index),
            mapper.y_at_price(pair[1].value),
        ) else {
            continue;
        };
        scene.lines.push(LineShape {
            x1,
            y1,
            x2,
            y2,
            color,
            width: SERIES_LINE_WIDTH,
            dashed: false,
        });
    }

    let Some(fill) = fill else {
        return;
    };
    for point in points {
        if !clip.contains(&point.index) {
            continue;
        }
        let (Some(x), Some(y)) = (center_x(point.index), mapper.y_at_price(point.value)) else {
            continue;
        };
        scene.rects.push(RectShape {
            x: x - ppi / 2.0,
            y,
            w: ppi,
            h: (scene.height - y).max(0.0),
            color: fill,
        });
    }
}
