//! Annotation types.
//!
//! Drawings hold domain coordinates only. Pixel geometry is recomputed
//! from the owning pane's mapper on every frame, which is what lets a
//! drawing survive a full pane teardown with zero coordinate drift. The
//! coordinates are fixed at creation; editing a drawing is modeled as
//! delete plus recreate.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::coords::DomainPoint;

static NEXT_DRAWING_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawingId(u64);

impl DrawingId {
    /// Generate the next unique ID.
    pub fn next() -> Self {
        Self(NEXT_DRAWING_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Horizontal level across the full pane width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalLine {
    pub id: DrawingId,
    pub price: f64,
}

/// Straight segment between two domain points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendLine {
    pub id: DrawingId,
    pub p1: DomainPoint,
    pub p2: DomainPoint,
}

/// Fibonacci retracement between two domain points. Levels are derived
/// from the endpoint prices at render time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FibRetracement {
    pub id: DrawingId,
    pub p1: DomainPoint,
    pub p2: DomainPoint,
}

/// All drawing kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drawing {
    HorizontalLine(HorizontalLine),
    TrendLine(TrendLine),
    FibRetracement(FibRetracement),
}

impl Drawing {
    /// Create a horizontal line at a price with a fresh ID.
    pub fn horizontal_line(price: f64) -> Self {
        Drawing::HorizontalLine(HorizontalLine {
            id: DrawingId::next(),
            price,
        })
    }

    /// Create a trend line between two points with a fresh ID.
    pub fn trend_line(p1: DomainPoint, p2: DomainPoint) -> Self {
        Drawing::TrendLine(TrendLine {
            id: DrawingId::next(),
            p1,
            p2,
        })
    }

    /// Create a Fibonacci retracement between two points with a fresh ID.
    pub fn fib_retracement(p1: DomainPoint, p2: DomainPoint) -> Self {
        Drawing::FibRetracement(FibRetracement {
            id: DrawingId::next(),
            p1,
            p2,
        })
    }

    /// Get the drawing's ID.
    pub fn id(&self) -> DrawingId {
        match self {
            Drawing::HorizontalLine(h) => h.id,
            Drawing::TrendLine(t) => t.id,
            Drawing::FibRetracement(f) => f.id,
        }
    }

    /// Short kind name for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Drawing::HorizontalLine(_) => "hline",
            Drawing::TrendLine(_) => "trendline",
            Drawing::FibRetracement(_) => "fib",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panechart_core::TimeValue;

    #[test]
    fn test_unique_ids() {
        let a = Drawing::horizontal_line(100.0);
        let b = Drawing::horizontal_line(100.0);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_kind_names() {
        let p = DomainPoint::new(TimeValue::from_timestamp(0), 10.0);
        assert_eq!(Drawing::horizontal_line(1.0).kind_name(), "hline");
        assert_eq!(Drawing::trend_line(p, p).kind_name(), "trendline");
        assert_eq!(Drawing::fib_retracement(p, p).kind_name(), "fib");
    }
}
