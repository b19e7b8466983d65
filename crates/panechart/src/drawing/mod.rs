//! User drawings: types, gesture capture, and rendering.
//!
//! Drawings live outside the pane arena. A [`DrawingSet`] owns every
//! drawing for the whole session and tracks, per drawing, which price
//! series instance it is currently attached to. A rebuild detaches
//! everything, tears the panes down, then re-attaches against the new
//! series instance; because positions are domain coordinates, the
//! re-attached drawing lands on the same prices and times as before.

pub mod gesture;
pub mod render;
pub mod types;

use std::sync::atomic::{AtomicU64, Ordering};

use log::trace;

pub use gesture::{DrawingTool, GestureMachine, GestureState};
pub use render::{FIB_RATIOS, RenderContext, fib_levels, render_drawing};
pub use types::{Drawing, DrawingId, FibRetracement, HorizontalLine, TrendLine};

static NEXT_SERIES_KEY: AtomicU64 = AtomicU64::new(1);

/// Identity of one live price-series instance.
///
/// A new key is minted every time the main pane's series is created, so
/// a drawing attached under an old key can never be rendered against a
/// pane that no longer exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesKey(u64);

impl SeriesKey {
    /// Mint a key for a freshly created price series.
    pub fn next() -> Self {
        Self(NEXT_SERIES_KEY.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone)]
struct DrawingEntry {
    drawing: Drawing,
    attached: Option<SeriesKey>,
}

/// Owning collection of all drawings in a session.
#[derive(Debug, Clone, Default)]
pub struct DrawingSet {
    entries: Vec<DrawingEntry>,
}

impl DrawingSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of drawings, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of drawings currently attached to a series.
    #[must_use]
    pub fn attached_count(&self) -> usize {
        self.entries.iter().filter(|e| e.attached.is_some()).count()
    }

    /// Add a drawing in the detached state and return its ID.
    pub fn push(&mut self, drawing: Drawing) -> DrawingId {
        let id = drawing.id();
        trace!("drawing {:?} added ({})", id, drawing.kind_name());
        self.entries.push(DrawingEntry {
            drawing,
            attached: None,
        });
        id
    }

    /// Attach one drawing to a series instance.
    pub fn attach(&mut self, id: DrawingId, key: SeriesKey) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.drawing.id() == id) {
            entry.attached = Some(key);
        }
    }

    /// Attach every drawing to a series instance.
    pub fn attach_all(&mut self, key: SeriesKey) {
        for entry in &mut self.entries {
            entry.attached = Some(key);
        }
    }

    /// Detach one drawing. Detaching a drawing that is already detached
    /// or unknown is a no-op.
    pub fn detach(&mut self, id: DrawingId) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.drawing.id() == id) {
            entry.attached = None;
        }
    }

    /// Detach every drawing, keeping the drawings themselves.
    pub fn detach_all(&mut self) {
        for entry in &mut self.entries {
            entry.attached = None;
        }
    }

    /// Remove one drawing, returning it if it existed.
    pub fn remove(&mut self, id: DrawingId) -> Option<Drawing> {
        let pos = self.entries.iter().position(|e| e.drawing.id() == id)?;
        Some(self.entries.remove(pos).drawing)
    }

    /// Drop every drawing.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether a drawing is attached to any series.
    #[must_use]
    pub fn is_attached(&self, id: DrawingId) -> bool {
        self.entries
            .iter()
            .any(|e| e.drawing.id() == id && e.attached.is_some())
    }

    /// Iterate over all drawings.
    pub fn iter(&self) -> impl Iterator<Item = &Drawing> {
        self.entries.iter().map(|e| &e.drawing)
    }

    /// Iterate over drawings attached to the given series instance.
    pub fn iter_attached(&self, key: SeriesKey) -> impl Iterator<Item = &Drawing> {
        self.entries
            .iter()
            .filter(move |e| e.attached == Some(key))
            .map(|e| &e.drawing)
    }
}
