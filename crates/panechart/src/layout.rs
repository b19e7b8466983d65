//! Vertical layout of panes inside the viewport.

use panechart_core::IndicatorId;

use crate::pane::PaneRole;

/// One pane's slot in the viewport. Panes are stacked top to bottom and
/// all span the full width.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneSlot {
    pub role: PaneRole,
    pub height: f32,
}

/// Split the viewport height between the main pane and sub-panes.
///
/// With sub-panes present the main pane takes `main_ratio` of the total
/// and the sub-panes split the remainder evenly, in the given order. With
/// none, the main pane takes everything. The 60/40 default ratio comes
/// from [`panechart_config::LayoutConfig`].
pub fn split_heights(total: f32, main_ratio: f32, subs: &[IndicatorId]) -> Vec<PaneSlot> {
    let mut slots = Vec::with_capacity(1 + subs.len());

    if subs.is_empty() {
        slots.push(PaneSlot {
            role: PaneRole::Main,
            height: total,
        });
        return slots;
    }

    slots.push(PaneSlot {
        role: PaneRole::Main,
        height: total * main_ratio,
    });

    let sub_height = total * (1.0 - main_ratio) / subs.len() as f32;
    for id in subs {
        slots.push(PaneSlot {
            role: PaneRole::Sub(id.clone()),
            height: sub_height,
        });
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_alone_takes_full_height() {
        let slots = split_heights(600.0, 0.6, &[]);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].role, PaneRole::Main);
        assert_eq!(slots[0].height, 600.0);
    }

    #[test]
    fn test_sixty_forty_split() {
        let subs = vec![IndicatorId::from("rsi"), IndicatorId::from("macd")];
        let slots = split_heights(1000.0, 0.6, &subs);

        assert_eq!(slots.len(), 3);
        assert!((slots[0].height - 600.0).abs() < 0.001);
        assert!((slots[1].height - 200.0).abs() < 0.001);
        assert!((slots[2].height - 200.0).abs() < 0.001);
        assert_eq!(slots[1].role, PaneRole::Sub(IndicatorId::from("rsi")));
        assert_eq!(slots[2].role, PaneRole::Sub(IndicatorId::from("macd")));
    }

    #[test]
    fn test_sub_order_follows_input() {
        let subs = vec![IndicatorId::from("stoch"), IndicatorId::from("rsi")];
        let slots = split_heights(500.0, 0.6, &subs);
        assert_eq!(slots[1].role, PaneRole::Sub(IndicatorId::from("stoch")));
        assert_eq!(slots[2].role, PaneRole::Sub(IndicatorId::from("rsi")));
    }
}
