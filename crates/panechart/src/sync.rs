//! Cross-pane visible-range synchronization.
//!
//! Panning or zooming any pane must move every other live pane to the
//! identical logical range. Propagation is cycle-safe twice over: a
//! re-entrancy guard refuses nested broadcasts, and a member whose range
//! already matches the incoming one is skipped, so an echo notification
//! from a freshly updated pane dies immediately instead of ping-ponging.

use log::trace;

use crate::coords::VisibleRange;
use crate::pane::{Pane, PaneRole};

/// Membership list for range propagation.
///
/// A pane must be unlinked before it is disposed; a stale member would
/// mean broadcasting into a pane that no longer exists.
#[derive(Debug, Default)]
pub struct RangeLinks {
    members: Vec<PaneRole>,
    propagating: bool,
}

impl RangeLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pane to the link group. Linking twice is a no-op.
    pub fn link(&mut self, role: PaneRole) {
        if !self.members.contains(&role) {
            self.members.push(role);
        }
    }

    /// Remove a pane from the link group ahead of its disposal.
    pub fn unlink(&mut self, role: &PaneRole) {
        self.members.retain(|member| member != role);
    }

    /// Drop all memberships (teardown, or ahead of a pane-set rebuild).
    pub fn clear(&mut self) {
        self.members.clear();
    }

    #[must_use]
    pub fn is_linked(&self, role: &PaneRole) -> bool {
        self.members.contains(role)
    }

    #[must_use]
    pub fn members(&self) -> &[PaneRole] {
        &self.members
    }

    /// Push `range` from `source` onto every other linked pane.
    ///
    /// Returns the number of panes actually updated. Members already at
    /// the range (within tolerance) are left alone, which is what breaks
    /// the A -> B -> A notification cycle.
    pub fn broadcast(
        &mut self,
        panes: &mut [Pane],
        source: &PaneRole,
        range: VisibleRange,
    ) -> usize {
        if self.propagating || !self.is_linked(source) {
            return 0;
        }

        self.propagating = true;
        let mut updated = 0;

        for pane in panes.iter_mut() {
            if pane.role() == source || !self.members.contains(pane.role()) {
                continue;
            }
            if pane.visible_range().approx_eq(&range) {
                continue;
            }
            pane.set_visible_range(range);
            updated += 1;
        }

        self.propagating = false;

        if updated > 0 {
            trace!("range {:.2}..{:.2} propagated from {source} to {updated} panes",
                range.from, range.to);
        }
        updated
    }
}
