//! Price series presentation kinds.

use serde::{Deserialize, Serialize};

/// How the main price series is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Candlestick,
    Line,
    Area,
}

impl ChartKind {
    /// Display label for toolbars.
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Candlestick => "Candlestick",
            ChartKind::Line => "Line",
            ChartKind::Area => "Area",
        }
    }

    /// All kinds in toolbar order.
    pub fn all() -> &'static [ChartKind] {
        &[ChartKind::Candlestick, ChartKind::Line, ChartKind::Area]
    }
}
