//! Coordinate mapping between the chart domain and pane pixels.
//!
//! This module is the single source of truth for coordinate conversions.
//! It defines two coordinate spaces:
//!
//! - **Pixel coordinates** ([`PixelPos`]): positions inside one pane's
//!   plotting rectangle, origin top-left, y growing downward
//! - **Domain coordinates** ([`DomainPoint`]): a bar time plus a price,
//!   independent of any pixel geometry
//!
//! Between them sits the logical index axis: the horizontal position of a
//! bar is its index in the bar sequence (fractional between bars), which
//! survives dataset-preserving operations where raw timestamps would not.
//!
//! Every conversion on [`PaneMapper`] returns an `Option`: a collapsed
//! axis, a zero-sized pane, or a non-finite result yields `None`, and the
//! caller skips whatever it was drawing for that frame.
//!
//! # Example
//!
//! ```ignore
//! use panechart::coords::{PaneMapper, PriceScale, VisibleRange};
//!
//! let mapper = PaneMapper::new(
//!     VisibleRange::new(10.0, 60.0),
//!     Some(PriceScale::new(95.0, 105.0)),
//!     800.0,
//!     400.0,
//! );
//!
//! // Where does bar 25 land, and what price sits under the cursor?
//! let x = mapper.x_at_index(25.5);
//! let price = mapper.price_at_y(120.0);
//! ```

use panechart_core::TimeValue;

/// Comparison tolerance for visible ranges, used to stop propagation of
/// range updates that would not move anything.
pub const RANGE_EPS: f64 = 1e-9;

/// Pixel position inside a pane's plotting rectangle.
///
/// The origin (0, 0) is the pane's top-left corner. X increases to the
/// right, Y increases downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPos {
    pub x: f32,
    pub y: f32,
}

impl PixelPos {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn to_tuple(self) -> (f32, f32) {
        (self.x, self.y)
    }
}

impl From<(f32, f32)> for PixelPos {
    fn from(pos: (f32, f32)) -> Self {
        Self::new(pos.0, pos.1)
    }
}

/// A chart-domain position: bar time plus price.
///
/// This is the only persistent representation of an annotation's position.
/// Pixel geometry is always derived from it on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainPoint {
    pub time: TimeValue,
    pub price: f64,
}

impl DomainPoint {
    #[must_use]
    pub const fn new(time: TimeValue, price: f64) -> Self {
        Self { time, price }
    }
}

/// Visible logical index range `[from, to)` over the bar sequence.
///
/// Endpoints are fractional so partial bars at the edges pan smoothly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRange {
    pub from: f64,
    pub to: f64,
}

impl VisibleRange {
    /// Create a range, swapping endpoints if given in reverse.
    #[must_use]
    pub fn new(from: f64, to: f64) -> Self {
        if to < from {
            Self { from: to, to: from }
        } else {
            Self { from, to }
        }
    }

    /// Full extent of a bar sequence of `len` bars.
    #[must_use]
    pub fn full(len: usize) -> Self {
        Self {
            from: 0.0,
            to: len as f64,
        }
    }

    #[must_use]
    pub fn span(&self) -> f64 {
        self.to - self.from
    }

    /// Whether the range can be mapped at all.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.from.is_finite() && self.to.is_finite() && self.span() > 0.0
    }

    /// Slide the range into `[0, len]`, preserving its span where
    /// possible. A span wider than the sequence collapses to the full
    /// extent.
    #[must_use]
    pub fn clamp_to(&self, len: usize) -> Self {
        let len = len as f64;
        let span = self.span();
        if !self.is_valid() || span >= len {
            return Self { from: 0.0, to: len };
        }
        let from = self.from.clamp(0.0, len - span);
        Self {
            from,
            to: from + span,
        }
    }

    #[must_use]
    pub fn contains(&self, index: f64) -> bool {
        index >= self.from && index < self.to
    }

    /// Whether two ranges are close enough that propagating one onto the
    /// other would be a no-op.
    #[must_use]
    pub fn approx_eq(&self, other: &VisibleRange) -> bool {
        let tol = RANGE_EPS * self.span().abs().max(1.0);
        (self.from - other.from).abs() <= tol && (self.to - other.to).abs() <= tol
    }
}

/// Price axis extent after auto-scaling, already padded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceScale {
    pub min: f64,
    pub max: f64,
}

impl PriceScale {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// A scale that cannot place any price at a distinct pixel row.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !self.min.is_finite() || !self.max.is_finite() || self.span() <= 0.0
    }
}

/// Per-pane converter between domain values and pane pixels.
///
/// Constructed from a pane's current state whenever geometry is needed;
/// it is a value type, cheap to build and copy, never stored across
/// frames.
///
/// Horizontal: logical index `i` maps linearly over `[from, to)` to
/// `[0, width)`. Vertical: price maps linearly over `[min, max]` to
/// `[height, 0)` - inverted, because a higher price draws higher on
/// screen.
#[derive(Debug, Clone, Copy)]
pub struct PaneMapper {
    range: VisibleRange,
    scale: Option<PriceScale>,
    width: f32,
    height: f32,
}

impl PaneMapper {
    #[must_use]
    pub fn new(range: VisibleRange, scale: Option<PriceScale>, width: f32, height: f32) -> Self {
        Self {
            range,
            scale,
            width,
            height,
        }
    }

    fn x_axis_usable(&self) -> bool {
        self.width > 0.0 && self.range.is_valid()
    }

    fn y_axis_usable(&self) -> Option<PriceScale> {
        if self.height <= 0.0 {
            return None;
        }
        self.scale.filter(|s| !s.is_degenerate())
    }

    /// Pixel x of logical index `i`. `None` when the horizontal axis is
    /// degenerate or the result is not finite.
    #[must_use]
    pub fn x_at_index(&self, index: f64) -> Option<f32> {
        if !self.x_axis_usable() {
            return None;
        }
        let x = (index - self.range.from) * f64::from(self.width) / self.range.span();
        x.is_finite().then(|| x as f32)
    }

    /// Exact inverse of [`x_at_index`](Self::x_at_index), clamped into the
    /// visible range. Fractional: 10.5 is the middle of bar 10's slot.
    #[must_use]
    pub fn index_at_x(&self, x: f32) -> Option<f64> {
        if !self.x_axis_usable() {
            return None;
        }
        let raw = self.range.from + f64::from(x) * self.range.span() / f64::from(self.width);
        raw.is_finite()
            .then(|| raw.clamp(self.range.from, self.range.to))
    }

    /// Whole bar index under pixel x, or `None` when the pixel does not
    /// cover any bar of a sequence of `len` bars.
    #[must_use]
    pub fn bar_index_at_x(&self, x: f32, len: usize) -> Option<usize> {
        let raw = self.index_at_x(x)?.floor();
        if raw < 0.0 || raw >= len as f64 {
            return None;
        }
        Some(raw as usize)
    }

    /// Pixel y of a price. `None` when the price axis is degenerate.
    #[must_use]
    pub fn y_at_price(&self, price: f64) -> Option<f32> {
        let scale = self.y_axis_usable()?;
        let y = (scale.max - price) * f64::from(self.height) / scale.span();
        y.is_finite().then(|| y as f32)
    }

    /// Exact inverse of [`y_at_price`](Self::y_at_price).
    #[must_use]
    pub fn price_at_y(&self, y: f32) -> Option<f64> {
        let scale = self.y_axis_usable()?;
        let price = scale.max - f64::from(y) * scale.span() / f64::from(self.height);
        price.is_finite().then_some(price)
    }

    /// Width of one bar slot in pixels at the current zoom.
    #[must_use]
    pub fn pixels_per_index(&self) -> Option<f32> {
        if !self.x_axis_usable() {
            return None;
        }
        let w = f64::from(self.width) / self.range.span();
        w.is_finite().then(|| w as f32)
    }

    #[must_use]
    pub fn range(&self) -> VisibleRange {
        self.range
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
}
