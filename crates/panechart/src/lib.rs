//! Headless multi-pane charting engine.
//!
//! The engine owns chart semantics and hands the host flat per-pane
//! shape buffers to draw. One [`session::ChartSession`] manages:
//!
//! - a main price pane plus one pane per sub-chart indicator, stacked
//!   vertically and sharing a synchronized logical index range
//! - price-anchored drawings that survive pane rebuilds with zero
//!   coordinate drift
//! - a click-gesture state machine for placing drawings
//!
//! The host supplies bar data, indicator points, viewport size, and
//! input events; it never talks to a pane directly.

pub mod coords;
pub mod drawing;
pub mod events;
pub mod layout;
pub mod pane;
pub mod scene;
pub mod series;
pub mod session;
pub mod sync;

pub use coords::{DomainPoint, PaneMapper, PixelPos, PriceScale, VisibleRange};
pub use drawing::{Drawing, DrawingId, DrawingTool, GestureState};
pub use events::WindowEvent;
pub use pane::{Pane, PaneRole};
pub use scene::PaneScene;
pub use session::{Advisory, ChartSession, RebuildCause};
