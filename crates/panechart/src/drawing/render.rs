//! Converts drawings into pane scene shapes.
//!
//! Each renderer resolves the drawing's domain coordinates through the
//! pane mapper on every call. A coordinate that cannot be resolved this
//! frame (endpoint time absent from the bar sequence, collapsed scale)
//! skips the whole drawing; nothing is drawn at a guessed position.

use panechart_core::BarSeries;

use crate::coords::{DomainPoint, PaneMapper};
use crate::scene::{LabelShape, LineShape, MarkerShape, PaneScene, RectShape};

use super::types::{Drawing, FibRetracement, HorizontalLine, TrendLine};

/// Retracement ratios, from the 0% row at the high anchor down to the
/// 100% row at the low anchor.
pub const FIB_RATIOS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

const FIB_LEVEL_COLORS: [[f32; 4]; 7] = [
    [0.937, 0.267, 0.267, 1.0],
    [0.976, 0.451, 0.086, 1.0],
    [0.961, 0.620, 0.043, 1.0],
    [0.133, 0.773, 0.369, 1.0],
    [0.231, 0.510, 0.965, 1.0],
    [0.545, 0.361, 0.965, 1.0],
    [0.937, 0.267, 0.267, 1.0],
];
const FIB_FILL_COLOR: [f32; 4] = [0.961, 0.620, 0.043, 0.05];
const FIB_LINE_WIDTH: f32 = 1.0;

const HLINE_COLOR: [f32; 4] = [0.231, 0.510, 0.965, 1.0];
const HLINE_WIDTH: f32 = 1.5;

const TREND_COLOR: [f32; 4] = [0.961, 0.620, 0.043, 1.0];
const TREND_WIDTH: f32 = 2.0;
const ENDPOINT_RADIUS: f32 = 4.0;

const LABEL_TEXT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Everything a drawing needs to resolve domain coordinates against one
/// pane: the pane's mapper and the bar sequence for time lookups.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub mapper: PaneMapper,
    pub bars: &'a BarSeries,
}

impl<'a> RenderContext<'a> {
    #[must_use]
    pub fn new(mapper: PaneMapper, bars: &'a BarSeries) -> Self {
        Self { mapper, bars }
    }

    /// Pixel position of a domain point, anchored at the bar's center.
    fn point_to_pixels(&self, point: &DomainPoint) -> Option<(f32, f32)> {
        let index = self.bars.index_of(point.time)?;
        let x = self.mapper.x_at_index(index as f64 + 0.5)?;
        let y = self.mapper.y_at_price(point.price)?;
        Some((x, y))
    }
}

/// Price levels of a retracement spanning two anchor prices, one
/// `(ratio, price)` pair per ratio. The 0% level sits at the higher of
/// the two anchors regardless of click order.
#[must_use]
pub fn fib_levels(p1: f64, p2: f64) -> [(f64, f64); 7] {
    let high = p1.max(p2);
    let diff = high - p1.min(p2);
    FIB_RATIOS.map(|ratio| (ratio, high - diff * ratio))
}

/// Append one drawing's shapes to a pane scene.
pub fn render_drawing(drawing: &Drawing, ctx: &RenderContext, scene: &mut PaneScene) {
    match drawing {
        Drawing::HorizontalLine(h) => render_horizontal_line(h, ctx, scene),
        Drawing::TrendLine(t) => render_trend_line(t, ctx, scene),
        Drawing::FibRetracement(f) => render_fib_retracement(f, ctx, scene),
    }
}

fn render_horizontal_line(line: &HorizontalLine, ctx: &RenderContext, scene: &mut PaneScene) {
    let Some(y) = ctx.mapper.y_at_price(line.price) else {
        return;
    };
    scene.lines.push(LineShape {
        x1: 0.0,
        y1: y,
        x2: ctx.mapper.width(),
        y2: y,
        color: HLINE_COLOR,
        width: HLINE_WIDTH,
        dashed: true,
    });
    scene.labels.push(LabelShape {
        x: ctx.mapper.width(),
        y,
        text: format!("{:.2}", line.price),
        color: LABEL_TEXT_COLOR,
        background: Some(HLINE_COLOR),
        axis_anchored: true,
    });
}

fn render_trend_line(line: &TrendLine, ctx: &RenderContext, scene: &mut PaneScene) {
    let Some((x1, y1)) = ctx.point_to_pixels(&line.p1) else {
        return;
    };
    let Some((x2, y2)) = ctx.point_to_pixels(&line.p2) else {
        return;
    };
    scene.lines.push(LineShape {
        x1,
        y1,
        x2,
        y2,
        color: TREND_COLOR,
        width: TREND_WIDTH,
        dashed: false,
    });
    for (x, y) in [(x1, y1), (x2, y2)] {
        scene.markers.push(MarkerShape {
            x,
            y,
            radius: ENDPOINT_RADIUS,
            color: TREND_COLOR,
        });
    }
}

fn render_fib_retracement(fib: &FibRetracement, ctx: &RenderContext, scene: &mut PaneScene) {
    let Some((x1, _)) = ctx.point_to_pixels(&fib.p1) else {
        return;
    };
    let Some((x2, _)) = ctx.point_to_pixels(&fib.p2) else {
        return;
    };
    let left = x1.min(x2);
    let right = x1.max(x2);
    let levels = fib_levels(fib.p1.price, fib.p2.price);

    // Shaded band between the 0% and 100% rows, drawn under the lines.
    let top = ctx.mapper.y_at_price(levels[0].1);
    let bottom = ctx.mapper.y_at_price(levels[levels.len() - 1].1);
    if let (Some(top), Some(bottom)) = (top, bottom) {
        scene.rects.push(RectShape {
            x: left,
            y: top.min(bottom),
            w: right - left,
            h: (bottom - top).abs(),
            color: FIB_FILL_COLOR,
        });
    }

    for (slot, (ratio, price)) in levels.iter().enumerate() {
        let Some(y) = ctx.mapper.y_at_price(*price) else {
            continue;
        };
        scene.lines.push(LineShape {
            x1: left,
            y1: y,
            x2: right,
            y2: y,
            color: FIB_LEVEL_COLORS[slot],
            width: FIB_LINE_WIDTH,
            dashed: false,
        });
        scene.labels.push(LabelShape {
            x: left + 4.0,
            y: y - 2.0,
            text: format!("{:.1}% (${:.2})", ratio * 100.0, price),
            color: FIB_LEVEL_COLORS[slot],
            background: None,
            axis_anchored: false,
        });
    }
}
