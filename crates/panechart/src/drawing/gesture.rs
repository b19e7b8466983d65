//! Click-gesture capture for drawing tools.
//!
//! A small state machine turns resolved clicks into committed drawings:
//!
//! ```text
//! Idle --set_tool--> Armed --click--> AwaitingSecondPoint --click--> Armed
//!                      |                    |
//!                      +--click (hline)-----+--> commits immediately
//! ```
//!
//! The tool stays armed after a commit so the user can place several
//! drawings in a row. Clicks that could not be resolved to a domain
//! point are ignored and leave the state untouched.

use log::{debug, trace};

use crate::coords::DomainPoint;

use super::types::Drawing;

/// Available drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawingTool {
    #[default]
    None,
    TrendLine,
    HorizontalLine,
    FibRetracement,
}

impl DrawingTool {
    /// Get the display name for this tool.
    pub fn name(&self) -> &'static str {
        match self {
            DrawingTool::None => "None",
            DrawingTool::TrendLine => "Trend Line",
            DrawingTool::HorizontalLine => "Horizontal Line",
            DrawingTool::FibRetracement => "Fib Retracement",
        }
    }

    /// Check if this tool creates drawings.
    pub fn is_drawing_tool(&self) -> bool {
        !matches!(self, DrawingTool::None)
    }

    /// Whether the tool needs a second anchor point before it commits.
    pub fn requires_second_point(&self) -> bool {
        matches!(self, DrawingTool::TrendLine | DrawingTool::FibRetracement)
    }

    /// Get all available tools.
    pub fn all() -> &'static [DrawingTool] {
        &[
            DrawingTool::TrendLine,
            DrawingTool::HorizontalLine,
            DrawingTool::FibRetracement,
        ]
    }
}

/// Current gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No tool selected; clicks fall through to navigation.
    #[default]
    Idle,
    /// A tool is selected and waiting for its first click.
    Armed { tool: DrawingTool },
    /// First anchor placed; waiting for the closing click.
    AwaitingSecondPoint { tool: DrawingTool, first: DomainPoint },
}

/// Turns tool selection and clicks into committed drawings.
#[derive(Debug, Clone, Default)]
pub struct GestureMachine {
    state: GestureState,
}

impl GestureMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// The currently selected tool, `DrawingTool::None` when idle.
    #[must_use]
    pub fn tool(&self) -> DrawingTool {
        match self.state {
            GestureState::Idle => DrawingTool::None,
            GestureState::Armed { tool } => tool,
            GestureState::AwaitingSecondPoint { tool, .. } => tool,
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.state, GestureState::Idle)
    }

    /// First anchor of an in-progress two-point gesture.
    #[must_use]
    pub fn pending_point(&self) -> Option<DomainPoint> {
        match self.state {
            GestureState::AwaitingSecondPoint { first, .. } => Some(first),
            _ => None,
        }
    }

    /// Select a tool, discarding any half-placed gesture. Selecting
    /// `DrawingTool::None` returns to idle.
    pub fn set_tool(&mut self, tool: DrawingTool) {
        self.state = if tool.is_drawing_tool() {
            GestureState::Armed { tool }
        } else {
            GestureState::Idle
        };
        trace!("drawing tool set to {}", tool.name());
    }

    /// Abort the current gesture and deselect the tool.
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }

    /// Feed one click into the machine. `point` is `None` when the click
    /// could not be resolved to a domain position; such clicks are
    /// ignored without losing gesture progress. Returns a drawing when
    /// the click completes one.
    pub fn handle_click(&mut self, point: Option<DomainPoint>) -> Option<Drawing> {
        let Some(point) = point else {
            if !self.is_idle() {
                debug!("ignoring click outside the plotted data");
            }
            return None;
        };

        match self.state {
            GestureState::Idle => None,

            GestureState::Armed { tool } => {
                if tool.requires_second_point() {
                    self.state = GestureState::AwaitingSecondPoint { tool, first: point };
                    None
                } else if tool == DrawingTool::HorizontalLine {
                    Some(Drawing::horizontal_line(point.price))
                } else {
                    None
                }
            }

            GestureState::AwaitingSecondPoint { tool, first } => {
                self.state = GestureState::Armed { tool };
                match tool {
                    DrawingTool::TrendLine => Some(Drawing::trend_line(first, point)),
                    DrawingTool::FibRetracement => Some(Drawing::fib_retracement(first, point)),
                    _ => None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panechart_core::TimeValue;

    fn make_point(ts: i64, price: f64) -> Option<DomainPoint> {
        Some(DomainPoint::new(TimeValue::from_timestamp(ts), price))
    }

    #[test]
    fn test_idle_click_does_nothing() {
        let mut machine = GestureMachine::new();
        assert!(machine.handle_click(make_point(0, 10.0)).is_none());
        assert!(machine.is_idle());
    }

    #[test]
    fn test_horizontal_line_commits_on_single_click() {
        let mut machine = GestureMachine::new();
        machine.set_tool(DrawingTool::HorizontalLine);

        let drawing = machine.handle_click(make_point(0, 42.5));
        match drawing {
            Some(Drawing::HorizontalLine(h)) => assert!((h.price - 42.5).abs() < 1e-9),
            other => panic!("expected horizontal line, got {other:?}"),
        }
        // Tool stays armed for repeated placement.
        assert_eq!(machine.tool(), DrawingTool::HorizontalLine);
        assert!(machine.handle_click(make_point(5, 50.0)).is_some());
    }

    #[test]
    fn test_trend_line_needs_two_clicks() {
        let mut machine = GestureMachine::new();
        machine.set_tool(DrawingTool::TrendLine);

        assert!(machine.handle_click(make_point(0, 10.0)).is_none());
        assert!(machine.pending_point().is_some());

        let drawing = machine.handle_click(make_point(10, 20.0));
        match drawing {
            Some(Drawing::TrendLine(t)) => {
                assert!((t.p1.price - 10.0).abs() < 1e-9);
                assert!((t.p2.price - 20.0).abs() < 1e-9);
            }
            other => panic!("expected trend line, got {other:?}"),
        }
        assert_eq!(machine.state(), GestureState::Armed { tool: DrawingTool::TrendLine });
    }

    #[test]
    fn test_fib_needs_two_clicks() {
        let mut machine = GestureMachine::new();
        machine.set_tool(DrawingTool::FibRetracement);

        assert!(machine.handle_click(make_point(0, 100.0)).is_none());
        let drawing = machine.handle_click(make_point(10, 50.0));
        assert!(matches!(drawing, Some(Drawing::FibRetracement(_))));
    }

    #[test]
    fn test_unresolved_click_keeps_progress() {
        let mut machine = GestureMachine::new();
        machine.set_tool(DrawingTool::TrendLine);
        machine.handle_click(make_point(0, 10.0));

        assert!(machine.handle_click(None).is_none());
        assert!(machine.pending_point().is_some());

        assert!(machine.handle_click(make_point(5, 15.0)).is_some());
    }

    #[test]
    fn test_cancel_discards_pending_point() {
        let mut machine = GestureMachine::new();
        machine.set_tool(DrawingTool::TrendLine);
        machine.handle_click(make_point(0, 10.0));

        machine.cancel();
        assert!(machine.is_idle());
        assert!(machine.pending_point().is_none());
        assert!(machine.handle_click(make_point(5, 15.0)).is_none());
    }

    #[test]
    fn test_switching_tools_discards_pending_point() {
        let mut machine = GestureMachine::new();
        machine.set_tool(DrawingTool::TrendLine);
        machine.handle_click(make_point(0, 10.0));

        machine.set_tool(DrawingTool::HorizontalLine);
        assert!(machine.pending_point().is_none());

        let drawing = machine.handle_click(make_point(5, 33.0));
        assert!(matches!(drawing, Some(Drawing::HorizontalLine(_))));
    }

    #[test]
    fn test_set_tool_none_returns_to_idle() {
        let mut machine = GestureMachine::new();
        machine.set_tool(DrawingTool::FibRetracement);
        machine.set_tool(DrawingTool::None);
        assert!(machine.is_idle());
    }
}
