//! Host window events routed into a session.
//!
//! The host view layer owns the real event loop; it translates whatever
//! its toolkit produces into these variants, already positioned in pane
//! pixel coordinates.

use crate::coords::PixelPos;
use crate::pane::PaneRole;

/// Events a session consumes from the host window.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    /// The viewport was resized to a new pixel size.
    Resized { width: f32, height: f32 },
    /// A click inside one pane's plotting rectangle.
    PointerClick { role: PaneRole, pos: PixelPos },
    /// Escape key, aborts the gesture in progress.
    EscapePressed,
}

impl WindowEvent {
    /// Click on the main pane at the given pixel position.
    #[must_use]
    pub fn click_main(x: f32, y: f32) -> Self {
        WindowEvent::PointerClick {
            role: PaneRole::Main,
            pos: PixelPos::new(x, y),
        }
    }
}
