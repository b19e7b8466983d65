//! The session: one chart, all of its panes, and their shared state.
//!
//! [`ChartSession`] is the engine facade the host embeds. It owns the
//! pane arena, the drawing set, the gesture machine, and the range
//! links, and routes every mutation through them in a fixed order so
//! the parts can stay simple:
//!
//! - structural changes (dataset, chart kind, sub-chart set, viewport
//!   threshold) go through the rebuild pass in [`rebuild`]
//! - appearance-only changes restyle the affected pane in place
//! - navigation updates one pane and broadcasts to the rest
//!
//! Everything is single-threaded; methods take `&mut self` and finish
//! before returning, so a rebuild can never observe a half-applied
//! update.

mod rebuild;

pub use rebuild::RebuildCause;

use std::collections::HashMap;

use log::{info, warn};

use panechart_config::Config;
use panechart_core::{
    Bar, BarSeries, ChartKind, DataError, IndicatorClass, IndicatorId, IndicatorSeries, Interval,
    TimeValue,
};

use crate::coords::{DomainPoint, PixelPos, VisibleRange};
use crate::drawing::{
    DrawingSet, DrawingTool, GestureMachine, GestureState, RenderContext, SeriesKey,
    render_drawing,
};
use crate::events::WindowEvent;
use crate::layout::split_heights;
use crate::pane::{Pane, PaneRole};
use crate::scene::{PaneScene, pane_scene};
use crate::series::{SeriesSlot, expand_series, price_slot};
use crate::sync::RangeLinks;

use rebuild::RebuildQueue;

/// Non-fatal condition surfaced to the host UI instead of a log dig.
#[derive(Debug, Clone, PartialEq)]
pub struct Advisory {
    pub indicator: IndicatorId,
    pub message: String,
}

/// One chart with its panes, drawings, and interaction state.
pub struct ChartSession {
    config: Config,
    bars: BarSeries,
    chart_kind: ChartKind,
    active: Vec<IndicatorId>,
    indicator_data: HashMap<IndicatorId, IndicatorSeries>,
    panes: Vec<Pane>,
    drawings: DrawingSet,
    gesture: GestureMachine,
    links: RangeLinks,
    series_key: SeriesKey,
    width: f32,
    height: f32,
    last_range: Option<VisibleRange>,
    queue: RebuildQueue,
    advisories: Vec<Advisory>,
    disposed: bool,
}

impl ChartSession {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            bars: BarSeries::default(),
            chart_kind: ChartKind::default(),
            active: Vec::new(),
            indicator_data: HashMap::new(),
            panes: Vec::new(),
            drawings: DrawingSet::new(),
            gesture: GestureMachine::new(),
            links: RangeLinks::new(),
            series_key: SeriesKey::next(),
            width: 0.0,
            height: 0.0,
            last_range: None,
            queue: RebuildQueue::default(),
            advisories: Vec::new(),
            disposed: false,
        }
    }

    // --- Dataset and appearance ---

    /// Replace the bar dataset. The visible range resets to show all of
    /// it, and drawings carry over by their domain coordinates.
    pub fn set_bars(&mut self, bars: Vec<Bar>, interval: Interval) -> Result<(), DataError> {
        if self.disposed {
            return Ok(());
        }
        self.bars = BarSeries::new(bars, interval)?;
        info!(
            "dataset replaced: {} bars at {}",
            self.bars.len(),
            self.bars.interval().label()
        );
        self.request_rebuild(RebuildCause::Bars);
        Ok(())
    }

    /// Switch the price series presentation.
    pub fn set_chart_type(&mut self, kind: ChartKind) {
        if self.disposed || self.chart_kind == kind {
            return;
        }
        self.chart_kind = kind;
        self.request_rebuild(RebuildCause::ChartType);
    }

    /// Replace the set of active indicators. A change in the sub-chart
    /// subset restructures the pane arena; overlay-only changes restyle
    /// the main pane in place.
    pub fn set_active_indicators(&mut self, ids: Vec<IndicatorId>) {
        if self.disposed {
            return;
        }
        let old_subs = self.sub_ids();
        self.active = ids;
        if self.sub_ids() == old_subs {
            self.restyle_main();
        } else {
            self.request_rebuild(RebuildCause::PaneSet);
        }
    }

    /// Store computed points for one indicator and restyle the pane that
    /// plots it. Data may arrive before or after the indicator becomes
    /// active; inactive data is kept for later.
    pub fn set_indicator_data(&mut self, id: IndicatorId, series: IndicatorSeries) {
        if self.disposed {
            return;
        }
        let class = id.class();
        self.indicator_data.insert(id.clone(), series);
        if self.active.contains(&id) {
            match class {
                IndicatorClass::Overlay => self.restyle_main(),
                IndicatorClass::SubChart => self.restyle_sub(&id),
            }
        }
    }

    /// Bulk form of [`ChartSession::set_indicator_data`] for a whole
    /// fetch response.
    pub fn set_indicator_data_bulk(
        &mut self,
        data: impl IntoIterator<Item = (IndicatorId, IndicatorSeries)>,
    ) {
        for (id, series) in data {
            self.set_indicator_data(id, series);
        }
    }

    // --- Navigation ---

    /// Set one pane's visible range and propagate it to the others.
    pub fn set_visible_range(&mut self, source: &PaneRole, range: VisibleRange) {
        if self.disposed {
            return;
        }
        let Some(at) = self.panes.iter().position(|p| p.role() == source) else {
            return;
        };
        self.panes[at].set_visible_range(range);
        let adopted = self.panes[at].visible_range();
        self.last_range = Some(adopted);
        self.links.broadcast(&mut self.panes, source, adopted);
    }

    /// Zoom every pane out to the full bar sequence.
    pub fn fit_to_content(&mut self) {
        if self.disposed {
            return;
        }
        for pane in &mut self.panes {
            pane.fit_to_content();
        }
        self.last_range = self.visible_range();
    }

    /// The main pane's visible range, if any pane is live.
    #[must_use]
    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.panes.first().map(Pane::visible_range)
    }

    /// Pixel column of a bar time on the shared index axis. The axis is
    /// identical across panes, so one answer serves all of them.
    #[must_use]
    pub fn pixel_at_time(&self, time: TimeValue) -> Option<f32> {
        let index = self.bars.index_of(time)?;
        self.panes.first()?.x_at_index(index as f64 + 0.5)
    }

    /// Resize the viewport. Crossing the minimum usable size tears the
    /// panes down (or revives them); otherwise geometry updates in
    /// place.
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.disposed {
            return;
        }
        let was_usable = self.viewport_usable();
        self.width = width;
        self.height = height;

        if self.viewport_usable() != was_usable {
            self.request_rebuild(RebuildCause::Viewport);
            return;
        }
        if !self.viewport_usable() {
            return;
        }

        let slots = split_heights(
            height,
            self.config.layout.main_ratio_clamped(),
            &self.sub_ids(),
        );
        for slot in &slots {
            if let Some(pane) = self.panes.iter_mut().find(|p| p.role() == &slot.role) {
                pane.resize(width, slot.height);
            }
        }
    }

    // --- Drawings ---

    /// Arm a drawing tool, or disarm with [`DrawingTool::None`].
    pub fn set_drawing_tool(&mut self, tool: DrawingTool) {
        if self.disposed {
            return;
        }
        self.gesture.set_tool(tool);
    }

    /// Feed a click on one pane into the gesture machine. Only the main
    /// pane accepts annotation clicks; clicks elsewhere are ignored.
    pub fn handle_click(&mut self, role: &PaneRole, pos: PixelPos) {
        if self.disposed || !role.is_main() {
            return;
        }
        let point = self.resolve_click(pos);
        if let Some(drawing) = self.gesture.handle_click(point) {
            info!("{} drawing committed", drawing.kind_name());
            let id = self.drawings.push(drawing);
            self.drawings.attach(id, self.series_key);
        }
    }

    /// Abort the gesture in progress and disarm the tool.
    pub fn cancel_gesture(&mut self) {
        self.gesture.cancel();
    }

    /// Detach and discard every drawing and reset the gesture machine.
    pub fn clear_drawings(&mut self) {
        if self.disposed {
            return;
        }
        let count = self.drawings.len();
        self.drawings.detach_all();
        self.drawings.clear();
        self.gesture.cancel();
        if count > 0 {
            info!("cleared {count} drawings");
        }
    }

    #[must_use]
    pub fn drawing_count(&self) -> usize {
        self.drawings.len()
    }

    // --- Output ---

    /// Build this frame's scene, one entry per pane in layout order.
    /// Drawings render into the main pane only, and only while attached
    /// to the current series instance.
    #[must_use]
    pub fn scene(&self) -> Vec<PaneScene> {
        self.panes
            .iter()
            .map(|pane| {
                let mut scene = pane_scene(pane);
                if pane.role().is_main() {
                    let ctx = RenderContext::new(pane.mapper(), &self.bars);
                    for drawing in self.drawings.iter_attached(self.series_key) {
                        render_drawing(drawing, &ctx, &mut scene);
                    }
                }
                scene
            })
            .collect()
    }

    // --- Events and lifecycle ---

    /// Route a host window event to the right handler.
    pub fn on_window_event(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::Resized { width, height } => self.resize(width, height),
            WindowEvent::PointerClick { role, pos } => self.handle_click(&role, pos),
            WindowEvent::EscapePressed => self.cancel_gesture(),
        }
    }

    /// Dispose everything synchronously. Panes are dropped, links and
    /// listeners removed, and every later call is a no-op.
    pub fn teardown(&mut self) {
        if self.disposed {
            return;
        }
        self.drawings.detach_all();
        self.links.clear();
        self.panes.clear();
        self.gesture.cancel();
        self.disposed = true;
        info!("session torn down");
    }

    // --- Accessors ---

    #[must_use]
    pub fn chart_kind(&self) -> ChartKind {
        self.chart_kind
    }

    #[must_use]
    pub fn bars(&self) -> &BarSeries {
        &self.bars
    }

    #[must_use]
    pub fn active_indicators(&self) -> &[IndicatorId] {
        &self.active
    }

    #[must_use]
    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    #[must_use]
    pub fn pane(&self, role: &PaneRole) -> Option<&Pane> {
        self.panes.iter().find(|p| p.role() == role)
    }

    #[must_use]
    pub fn drawing_tool(&self) -> DrawingTool {
        self.gesture.tool()
    }

    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    #[must_use]
    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // --- Internals shared with the rebuild pass ---

    fn viewport_usable(&self) -> bool {
        let min = self.config.layout.min_viewport;
        self.width >= min && self.height >= min
    }

    /// Active indicators that get their own pane, in activation order.
    fn sub_ids(&self) -> Vec<IndicatorId> {
        self.active
            .iter()
            .filter(|id| id.class() == IndicatorClass::SubChart)
            .cloned()
            .collect()
    }

    /// Price slot plus every active overlay that has data.
    fn main_slots(&self) -> Vec<SeriesSlot> {
        let mut slots = vec![price_slot(&self.bars, self.chart_kind)];
        for id in &self.active {
            if id.class() != IndicatorClass::Overlay {
                continue;
            }
            if let Some(series) = self.indicator_data.get(id) {
                slots.extend(expand_series(id, series, &self.bars));
            }
        }
        slots
    }

    fn sub_slots(&self, id: &IndicatorId) -> Vec<SeriesSlot> {
        match self.indicator_data.get(id) {
            Some(series) => expand_series(id, series, &self.bars),
            None => Vec::new(),
        }
    }

    fn restyle_main(&mut self) {
        let slots = self.main_slots();
        let len = self.bars.len();
        if let Some(pane) = self.panes.iter_mut().find(|p| p.role().is_main()) {
            pane.set_slots(slots, len);
        }
        self.refresh_advisories();
    }

    fn restyle_sub(&mut self, id: &IndicatorId) {
        let slots = self.sub_slots(id);
        let len = self.bars.len();
        let role = PaneRole::Sub(id.clone());
        if let Some(pane) = self.panes.iter_mut().find(|p| p.role() == &role) {
            pane.set_slots(slots, len);
        }
        self.refresh_advisories();
    }

    /// An active indicator whose computed series came back empty renders
    /// nothing; surface that instead of failing the whole chart.
    fn refresh_advisories(&mut self) {
        self.advisories = self
            .active
            .iter()
            .filter(|id| {
                self.indicator_data
                    .get(id)
                    .is_some_and(IndicatorSeries::is_empty)
            })
            .map(|id| Advisory {
                indicator: id.clone(),
                message: format!(
                    "{} produced no points for this dataset; more bars may be needed",
                    id.display_name()
                ),
            })
            .collect();
        for advisory in &self.advisories {
            warn!("{}", advisory.message);
        }
    }

    fn resolve_click(&self, pos: PixelPos) -> Option<DomainPoint> {
        let pane = self.pane(&PaneRole::Main)?;
        let mapper = pane.mapper();
        let index = mapper.bar_index_at_x(pos.x, self.bars.len())?;
        let time = self.bars.time_at(index)?;
        let price = mapper.price_at_y(pos.y)?;
        Some(DomainPoint::new(time, price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panechart_core::{LinePoint, TimeValue};

    fn make_bars(count: usize) -> Vec<Bar> {
        (0..count)
            .map(|i| {
                let close = 100.0 + (i as f64).sin() * 5.0;
                Bar::new(
                    TimeValue::from_timestamp(86_400 * i as i64),
                    close - 0.5,
                    close + 1.0,
                    close - 1.0,
                    close,
                )
            })
            .collect()
    }

    fn make_session(count: usize) -> ChartSession {
        let mut session = ChartSession::new(Config::default());
        session.resize(800.0, 600.0);
        session.set_bars(make_bars(count), Interval::Day).unwrap();
        session
    }

    fn make_line_data(count: usize, value: f64) -> IndicatorSeries {
        IndicatorSeries::Line(
            (0..count)
                .map(|i| LinePoint {
                    time: TimeValue::from_timestamp(86_400 * i as i64),
                    value,
                })
                .collect(),
        )
    }

    /// Row of the single dashed line in the main scene, which only a
    /// horizontal-line drawing produces.
    fn hline_row(session: &ChartSession) -> Option<f32> {
        session.scene().first().and_then(|scene| {
            scene
                .lines
                .iter()
                .find(|line| line.dashed)
                .map(|line| line.y1)
        })
    }

    #[test]
    fn test_main_pane_alone_by_default() {
        let session = make_session(50);
        assert_eq!(session.panes().len(), 1);
        assert!(session.panes()[0].role().is_main());
        assert_eq!(session.panes()[0].height(), 600.0);
    }

    #[test]
    fn test_sub_pane_per_active_oscillator() {
        let mut session = make_session(50);
        session.set_active_indicators(vec![
            IndicatorId::from("rsi"),
            IndicatorId::from("macd"),
            IndicatorId::from("sma_20"),
        ]);

        // sma_20 is an overlay, so two sub-panes join the main pane.
        assert_eq!(session.panes().len(), 3);
        let main = session.pane(&PaneRole::Main).unwrap();
        assert!((main.height() - 360.0).abs() < 0.001);
        let rsi = session.pane(&PaneRole::Sub(IndicatorId::from("rsi"))).unwrap();
        assert!((rsi.height() - 120.0).abs() < 0.001);
    }

    #[test]
    fn test_overlay_toggle_keeps_pane_set() {
        let mut session = make_session(50);
        session.set_active_indicators(vec![IndicatorId::from("sma_20")]);
        assert_eq!(session.panes().len(), 1);

        session.set_active_indicators(vec![]);
        assert_eq!(session.panes().len(), 1);
    }

    #[test]
    fn test_removing_sub_indicator_disposes_its_pane() {
        let mut session = make_session(50);
        session.set_active_indicators(vec![IndicatorId::from("rsi"), IndicatorId::from("stoch")]);
        assert_eq!(session.panes().len(), 3);

        session.set_active_indicators(vec![IndicatorId::from("stoch")]);
        assert_eq!(session.panes().len(), 2);
        assert!(session.pane(&PaneRole::Sub(IndicatorId::from("rsi"))).is_none());
        assert!(session.pane(&PaneRole::Sub(IndicatorId::from("stoch"))).is_some());
    }

    #[test]
    fn test_hline_row_survives_chart_type_change() {
        let mut session = make_session(50);
        session.set_drawing_tool(DrawingTool::HorizontalLine);
        session.handle_click(&PaneRole::Main, PixelPos::new(400.0, 200.0));
        assert_eq!(session.drawing_count(), 1);

        let before = hline_row(&session).expect("hline rendered");
        assert!((before - 200.0).abs() < 0.5);

        session.set_chart_type(ChartKind::Line);
        let after = hline_row(&session).expect("hline still rendered after rebuild");
        assert!((before - after).abs() < 0.01);

        session.set_chart_type(ChartKind::Area);
        let after_area = hline_row(&session).expect("hline survives further switches");
        assert!((before - after_area).abs() < 0.01);
    }

    #[test]
    fn test_chart_type_change_preserves_zoom() {
        let mut session = make_session(50);
        let range = VisibleRange::new(10.0, 30.0);
        session.set_visible_range(&PaneRole::Main, range);

        session.set_chart_type(ChartKind::Area);
        assert!(session.visible_range().unwrap().approx_eq(&range));
    }

    #[test]
    fn test_dataset_swap_refits_range() {
        let mut session = make_session(50);
        session.set_visible_range(&PaneRole::Main, VisibleRange::new(10.0, 20.0));

        session.set_bars(make_bars(80), Interval::Day).unwrap();
        let range = session.visible_range().unwrap();
        assert!(range.approx_eq(&VisibleRange::full(80)));
    }

    #[test]
    fn test_pan_syncs_all_panes() {
        let mut session = make_session(100);
        session.set_active_indicators(vec![IndicatorId::from("rsi"), IndicatorId::from("macd")]);

        let range = VisibleRange::new(20.0, 60.0);
        session.set_visible_range(&PaneRole::Main, range);

        for pane in session.panes() {
            assert!(
                pane.visible_range().approx_eq(&range),
                "{} not synced",
                pane.role()
            );
        }
    }

    #[test]
    fn test_sub_pane_pan_reaches_main() {
        let mut session = make_session(100);
        session.set_active_indicators(vec![IndicatorId::from("rsi")]);

        let range = VisibleRange::new(5.0, 45.0);
        let rsi = PaneRole::Sub(IndicatorId::from("rsi"));
        session.set_visible_range(&rsi, range);

        assert!(session.visible_range().unwrap().approx_eq(&range));
    }

    #[test]
    fn test_trend_line_commits_after_two_clicks() {
        let mut session = make_session(50);
        session.set_drawing_tool(DrawingTool::TrendLine);

        session.handle_click(&PaneRole::Main, PixelPos::new(100.0, 100.0));
        assert_eq!(session.drawing_count(), 0);

        session.handle_click(&PaneRole::Main, PixelPos::new(300.0, 150.0));
        assert_eq!(session.drawing_count(), 1);

        let scene = session.scene();
        assert_eq!(scene[0].markers.len(), 2);
    }

    #[test]
    fn test_fib_renders_level_labels() {
        let mut session = make_session(50);
        session.set_drawing_tool(DrawingTool::FibRetracement);
        session.handle_click(&PaneRole::Main, PixelPos::new(100.0, 100.0));
        session.handle_click(&PaneRole::Main, PixelPos::new(600.0, 300.0));
        assert_eq!(session.drawing_count(), 1);

        let scene = session.scene();
        let fib_labels = scene[0]
            .labels
            .iter()
            .filter(|l| l.text.contains("% ($"))
            .count();
        assert_eq!(fib_labels, 7);
    }

    #[test]
    fn test_sub_pane_clicks_do_not_draw() {
        let mut session = make_session(50);
        session.set_active_indicators(vec![IndicatorId::from("rsi")]);
        session.set_drawing_tool(DrawingTool::HorizontalLine);

        let rsi = PaneRole::Sub(IndicatorId::from("rsi"));
        session.handle_click(&rsi, PixelPos::new(100.0, 50.0));
        assert_eq!(session.drawing_count(), 0);
    }

    #[test]
    fn test_unresolvable_click_keeps_gesture_progress() {
        let mut session = make_session(50);
        session.set_drawing_tool(DrawingTool::TrendLine);
        session.handle_click(&PaneRole::Main, PixelPos::new(100.0, 100.0));

        // Far outside the plotted bars: no bar resolves there.
        session.handle_click(&PaneRole::Main, PixelPos::new(9_999.0, 100.0));
        assert_eq!(session.drawing_count(), 0);
        assert!(matches!(
            session.gesture_state(),
            GestureState::AwaitingSecondPoint { .. }
        ));

        session.handle_click(&PaneRole::Main, PixelPos::new(300.0, 150.0));
        assert_eq!(session.drawing_count(), 1);
    }

    #[test]
    fn test_escape_aborts_gesture() {
        let mut session = make_session(50);
        session.set_drawing_tool(DrawingTool::TrendLine);
        session.on_window_event(WindowEvent::click_main(100.0, 100.0));

        session.on_window_event(WindowEvent::EscapePressed);
        assert!(matches!(session.gesture_state(), GestureState::Idle));

        session.handle_click(&PaneRole::Main, PixelPos::new(300.0, 150.0));
        assert_eq!(session.drawing_count(), 0);
    }

    #[test]
    fn test_clear_drawings_resets_everything() {
        let mut session = make_session(50);
        session.set_drawing_tool(DrawingTool::HorizontalLine);
        session.handle_click(&PaneRole::Main, PixelPos::new(200.0, 100.0));
        session.handle_click(&PaneRole::Main, PixelPos::new(200.0, 200.0));
        session.set_drawing_tool(DrawingTool::TrendLine);
        session.handle_click(&PaneRole::Main, PixelPos::new(100.0, 100.0));
        session.handle_click(&PaneRole::Main, PixelPos::new(300.0, 150.0));
        assert_eq!(session.drawing_count(), 3);

        session.clear_drawings();
        assert_eq!(session.drawing_count(), 0);
        assert!(matches!(session.gesture_state(), GestureState::Idle));

        let scene = session.scene();
        assert!(scene[0].lines.iter().all(|line| !line.dashed));
        assert!(scene[0].markers.is_empty());
    }

    #[test]
    fn test_drawings_survive_pane_set_change() {
        let mut session = make_session(50);
        session.set_drawing_tool(DrawingTool::HorizontalLine);
        session.handle_click(&PaneRole::Main, PixelPos::new(400.0, 200.0));
        let row = hline_row(&session).unwrap();
        let price = session
            .pane(&PaneRole::Main)
            .unwrap()
            .price_at_pixel(row)
            .unwrap();

        session.set_active_indicators(vec![IndicatorId::from("rsi")]);
        assert_eq!(session.drawing_count(), 1);

        // The main pane shrank, so the row moved, but it still maps to
        // the same price.
        let moved = hline_row(&session).unwrap();
        assert!(moved < row);
        let expected = session
            .pane(&PaneRole::Main)
            .unwrap()
            .pixel_at_price(price)
            .unwrap();
        assert!((moved - expected).abs() < 0.01);
    }

    #[test]
    fn test_indicator_data_restyles_sub_pane() {
        let mut session = make_session(50);
        session.set_active_indicators(vec![IndicatorId::from("rsi")]);

        let rsi = PaneRole::Sub(IndicatorId::from("rsi"));
        assert!(session.pane(&rsi).unwrap().slots().is_empty());

        session.set_indicator_data(IndicatorId::from("rsi"), make_line_data(50, 55.0));
        assert_eq!(session.pane(&rsi).unwrap().slots().len(), 1);
        assert_eq!(session.panes().len(), 2);
    }

    #[test]
    fn test_overlay_data_lands_in_main_pane() {
        let mut session = make_session(50);
        session.set_active_indicators(vec![IndicatorId::from("sma_20")]);
        session.set_indicator_data(IndicatorId::from("sma_20"), make_line_data(50, 101.0));

        let main = session.pane(&PaneRole::Main).unwrap();
        assert_eq!(main.slots().len(), 2);
        assert_eq!(session.panes().len(), 1);
    }

    #[test]
    fn test_pixel_at_time_hits_bar_center() {
        let session = make_session(50);
        let x = session
            .pixel_at_time(TimeValue::from_timestamp(86_400 * 25))
            .unwrap();
        assert!((x - 408.0).abs() < 0.01);

        assert!(session.pixel_at_time(TimeValue::from_timestamp(123)).is_none());
    }

    #[test]
    fn test_bulk_indicator_data() {
        let mut session = make_session(50);
        session.set_active_indicators(vec![IndicatorId::from("rsi"), IndicatorId::from("sma_20")]);
        session.set_indicator_data_bulk(vec![
            (IndicatorId::from("rsi"), make_line_data(50, 55.0)),
            (IndicatorId::from("sma_20"), make_line_data(50, 101.0)),
        ]);

        let rsi = PaneRole::Sub(IndicatorId::from("rsi"));
        assert_eq!(session.pane(&rsi).unwrap().slots().len(), 1);
        assert_eq!(session.pane(&PaneRole::Main).unwrap().slots().len(), 2);
    }

    #[test]
    fn test_advisory_for_empty_indicator_series() {
        let mut session = make_session(50);
        session.set_active_indicators(vec![IndicatorId::from("rsi")]);
        session.set_indicator_data(IndicatorId::from("rsi"), IndicatorSeries::Line(Vec::new()));

        assert_eq!(session.advisories().len(), 1);
        assert_eq!(session.advisories()[0].indicator, IndicatorId::from("rsi"));

        session.set_indicator_data(IndicatorId::from("rsi"), make_line_data(50, 55.0));
        assert!(session.advisories().is_empty());
    }

    #[test]
    fn test_hibernation_below_minimum_viewport() {
        let mut session = make_session(50);
        session.set_drawing_tool(DrawingTool::HorizontalLine);
        session.handle_click(&PaneRole::Main, PixelPos::new(400.0, 200.0));
        let before = hline_row(&session).unwrap();

        session.resize(10.0, 10.0);
        assert!(session.panes().is_empty());
        assert!(session.scene().is_empty());
        assert_eq!(session.drawing_count(), 1);

        session.resize(800.0, 600.0);
        assert_eq!(session.panes().len(), 1);
        let after = hline_row(&session).expect("drawing re-attached after revival");
        assert!((before - after).abs() < 0.01);
    }

    #[test]
    fn test_teardown_makes_session_inert() {
        let mut session = make_session(50);
        session.set_drawing_tool(DrawingTool::HorizontalLine);
        session.handle_click(&PaneRole::Main, PixelPos::new(400.0, 200.0));

        session.teardown();
        assert!(session.is_disposed());
        assert!(session.panes().is_empty());
        assert!(session.scene().is_empty());

        session.set_chart_type(ChartKind::Line);
        session.resize(1000.0, 700.0);
        session.handle_click(&PaneRole::Main, PixelPos::new(100.0, 100.0));
        session.set_active_indicators(vec![IndicatorId::from("rsi")]);
        assert!(session.panes().is_empty());
        assert_eq!(session.drawing_count(), 1);

        // Idempotent.
        session.teardown();
        assert!(session.is_disposed());
    }

    #[test]
    fn test_empty_dataset_yields_blank_scene() {
        let mut session = ChartSession::new(Config::default());
        session.resize(800.0, 600.0);

        let scene = session.scene();
        assert_eq!(scene.len(), 1);
        assert_eq!(scene[0].shape_count(), 0);
    }

    #[test]
    fn test_rejects_unsorted_bars() {
        let mut session = ChartSession::new(Config::default());
        session.resize(800.0, 600.0);

        let mut bars = make_bars(10);
        bars.swap(2, 7);
        assert!(session.set_bars(bars, Interval::Day).is_err());
    }
}
