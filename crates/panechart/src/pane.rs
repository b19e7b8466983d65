//! Panes: independently price-scaled plotting surfaces.
//!
//! One main pane carries the price series and overlay indicators; each
//! sub-chart indicator gets its own pane. All panes share the logical
//! index axis (kept identical by the synchronizer) but scale their price
//! axis independently from whatever they plot.

use std::fmt;

use panechart_core::IndicatorId;

use crate::coords::{PaneMapper, PriceScale, VisibleRange};
use crate::series::{SeriesSlot, SlotData};

/// Stable identity of a pane across rebuilds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PaneRole {
    Main,
    Sub(IndicatorId),
}

impl PaneRole {
    #[must_use]
    pub fn is_main(&self) -> bool {
        matches!(self, PaneRole::Main)
    }
}

impl fmt::Display for PaneRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaneRole::Main => f.write_str("main"),
            PaneRole::Sub(id) => write!(f, "sub:{id}"),
        }
    }
}

/// One plotting surface.
///
/// The visible range is expressed in logical bar indices and always
/// clamped to the current bar sequence length, so a pane can never look
/// at bars that do not exist. The price scale is recomputed from the
/// visible portion of every slot whenever the range, the size, or the
/// data changes.
#[derive(Debug, Clone)]
pub struct Pane {
    role: PaneRole,
    width: f32,
    height: f32,
    visible: VisibleRange,
    slots: Vec<SeriesSlot>,
    sequence_len: usize,
    scale: Option<PriceScale>,
    price_padding: f64,
}

impl Pane {
    pub fn new(role: PaneRole, width: f32, height: f32, price_padding: f64) -> Self {
        Self {
            role,
            width,
            height,
            visible: VisibleRange::full(0),
            slots: Vec::new(),
            sequence_len: 0,
            scale: None,
            price_padding,
        }
    }

    /// Replace the plotted slots. `sequence_len` is the bar sequence
    /// length, which bounds the visible range for every pane regardless
    /// of how many aligned points its own slots contain.
    pub fn set_slots(&mut self, slots: Vec<SeriesSlot>, sequence_len: usize) {
        self.slots = slots;
        self.sequence_len = sequence_len;
        self.visible = self.visible.clamp_to(sequence_len);
        self.rescale();
    }

    pub fn set_visible_range(&mut self, range: VisibleRange) {
        self.visible = range.clamp_to(self.sequence_len);
        self.rescale();
    }

    /// Show the full bar sequence.
    pub fn fit_to_content(&mut self) {
        self.visible = VisibleRange::full(self.sequence_len);
        self.rescale();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Mapper for the pane's current state. Cheap; build per query or per
    /// frame.
    #[must_use]
    pub fn mapper(&self) -> PaneMapper {
        PaneMapper::new(self.visible, self.scale, self.width, self.height)
    }

    #[must_use]
    pub fn price_at_pixel(&self, y: f32) -> Option<f64> {
        self.mapper().price_at_y(y)
    }

    #[must_use]
    pub fn pixel_at_price(&self, price: f64) -> Option<f32> {
        self.mapper().y_at_price(price)
    }

    #[must_use]
    pub fn x_at_index(&self, index: f64) -> Option<f32> {
        self.mapper().x_at_index(index)
    }

    #[must_use]
    pub fn role(&self) -> &PaneRole {
        &self.role
    }

    #[must_use]
    pub fn visible_range(&self) -> VisibleRange {
        self.visible
    }

    #[must_use]
    pub fn scale(&self) -> Option<PriceScale> {
        self.scale
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[must_use]
    pub fn slots(&self) -> &[SeriesSlot] {
        &self.slots
    }

    #[must_use]
    pub fn sequence_len(&self) -> usize {
        self.sequence_len
    }

    /// Recompute the price scale from the visible portion of every slot.
    ///
    /// Histogram slots anchor the scale to their zero baseline. A flat
    /// span is bumped to a small band around the value so a constant
    /// series still renders; with no visible values at all the pane has
    /// no scale and the mapper reports everything unresolvable.
    fn rescale(&mut self) {
        let lo = self.visible.from.floor().max(0.0) as usize;
        let hi = self.visible.to.ceil().max(0.0) as usize;

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut cover = |value: f64| {
            if value.is_finite() {
                min = min.min(value);
                max = max.max(value);
            }
        };

        for slot in &self.slots {
            match &slot.data {
                SlotData::Ohlc(points) => {
                    for point in points.iter().take(hi).skip(lo) {
                        cover(point.low);
                        cover(point.high);
                    }
                }
                SlotData::Line(points) => {
                    for point in points {
                        if point.index >= lo && point.index < hi {
                            cover(point.value);
                        }
                    }
                }
                SlotData::Histogram(points) => {
                    let mut any = false;
                    for point in points {
                        if point.index >= lo && point.index < hi {
                            cover(point.value);
                            any = true;
                        }
                    }
                    if any {
                        cover(0.0);
                    }
                }
            }
        }

        if !min.is_finite() || !max.is_finite() {
            self.scale = None;
            return;
        }

        if max - min <= 0.0 {
            let bump = min.abs().max(1.0) * 0.001;
            min -= bump;
            max += bump;
        }

        let pad = (max - min) * self.price_padding;
        self.scale = Some(PriceScale::new(min - pad, max + pad));
    }
}
