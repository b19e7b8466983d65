//! Pane arena rebuilds.
//!
//! Structural changes funnel through one rebuild pass that diffs the
//! pane arena by role: panes whose role disappeared are unlinked and
//! disposed, new roles are created, surviving panes resize in place.
//! Every pane then gets fresh series slots, drawings re-attach against
//! the new series instance, and range links are re-installed. Rebuilds
//! never interleave: a request issued while a pass is running is queued,
//! coalesced by cause, and served when the current pass finishes.

use std::collections::VecDeque;

use log::{debug, info};

use crate::drawing::SeriesKey;
use crate::layout::split_heights;
use crate::pane::{Pane, PaneRole};

use super::ChartSession;

/// What made the pane arena stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildCause {
    /// New bar dataset; the visible range resets to fit.
    Bars,
    /// Chart kind changed; geometry and range carry over.
    ChartType,
    /// The set of sub-chart indicators changed.
    PaneSet,
    /// The viewport crossed the usability threshold.
    Viewport,
}

/// Pending rebuild requests, coalesced by cause.
#[derive(Debug, Default)]
pub(crate) struct RebuildQueue {
    in_progress: bool,
    pending: VecDeque<RebuildCause>,
}

impl RebuildQueue {
    pub(crate) fn push(&mut self, cause: RebuildCause) {
        if !self.pending.contains(&cause) {
            self.pending.push_back(cause);
        }
    }

    pub(crate) fn pop(&mut self) -> Option<RebuildCause> {
        self.pending.pop_front()
    }
}

impl ChartSession {
    /// Queue a rebuild and drain the queue. A request arriving while a
    /// pass is executing stays queued and is served right after it, so
    /// two passes can never interleave.
    pub(crate) fn request_rebuild(&mut self, cause: RebuildCause) {
        self.queue.push(cause);
        if self.queue.in_progress {
            debug!("rebuild running, queued {cause:?}");
            return;
        }

        self.queue.in_progress = true;
        while let Some(next) = self.queue.pop() {
            self.rebuild_panes(next);
        }
        self.queue.in_progress = false;
    }

    fn rebuild_panes(&mut self, cause: RebuildCause) {
        let preserve = match cause {
            RebuildCause::Bars => None,
            _ => self.visible_range().or(self.last_range),
        };

        // 1. Drawings let go of the series that is about to be replaced.
        self.drawings.detach_all();

        // 2. Diff the arena by role against the desired layout. Below
        //    the usable viewport threshold the desired set is empty and
        //    every pane hibernates away.
        let desired = if self.viewport_usable() {
            split_heights(
                self.height,
                self.config.layout.main_ratio_clamped(),
                &self.sub_ids(),
            )
        } else {
            Vec::new()
        };

        let mut old = std::mem::take(&mut self.panes);
        let mut next: Vec<Pane> = Vec::with_capacity(desired.len());
        for slot in &desired {
            let pane = match old.iter().position(|p| p.role() == &slot.role) {
                Some(at) => {
                    let mut pane = old.swap_remove(at);
                    pane.resize(self.width, slot.height);
                    pane
                }
                None => Pane::new(
                    slot.role.clone(),
                    self.width,
                    slot.height,
                    self.config.scale.price_padding,
                ),
            };
            next.push(pane);
        }
        for stale in &old {
            // Unlink before the pane goes away so no broadcast can ever
            // address a dead member.
            self.links.unlink(stale.role());
            debug!("pane {} disposed", stale.role());
        }

        // 3. Fresh series slots everywhere, then the carried-over range
        //    (clamped to the sequence) or a fit when there is none.
        let len = self.bars.len();
        for pane in &mut next {
            let slots = match pane.role() {
                PaneRole::Main => self.main_slots(),
                PaneRole::Sub(id) => self.sub_slots(id),
            };
            pane.set_slots(slots, len);
            match preserve {
                Some(range) => pane.set_visible_range(range),
                None => pane.fit_to_content(),
            }
        }

        // 4. Re-attach drawings to the new series instance. While
        //    hibernated there is no series, so they stay detached.
        if next.iter().any(|p| p.role().is_main()) {
            self.series_key = SeriesKey::next();
            self.drawings.attach_all(self.series_key);
        }

        // 5. Re-install range links over the new arena.
        self.links.clear();
        for pane in &next {
            self.links.link(pane.role().clone());
        }

        self.panes = next;
        if let Some(range) = self.visible_range() {
            self.last_range = Some(range);
        }
        self.refresh_advisories();

        info!(
            "rebuilt {} panes after {cause:?}, {} drawings re-attached",
            self.panes.len(),
            self.drawings.attached_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_coalesces_duplicate_causes() {
        let mut queue = RebuildQueue::default();
        queue.push(RebuildCause::Bars);
        queue.push(RebuildCause::Bars);
        queue.push(RebuildCause::ChartType);

        assert_eq!(queue.pop(), Some(RebuildCause::Bars));
        assert_eq!(queue.pop(), Some(RebuildCause::ChartType));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_queue_keeps_distinct_causes_in_order() {
        let mut queue = RebuildQueue::default();
        queue.push(RebuildCause::PaneSet);
        queue.push(RebuildCause::Viewport);
        queue.push(RebuildCause::PaneSet);

        assert_eq!(queue.pop(), Some(RebuildCause::PaneSet));
        assert_eq!(queue.pop(), Some(RebuildCause::Viewport));
        assert_eq!(queue.pop(), None);
    }
}
