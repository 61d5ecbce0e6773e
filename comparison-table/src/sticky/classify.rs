/// Measurements the sticky header is classified from.
///
/// All values are viewport coordinates in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StickySignals {
    /// Top of the sentinel placed just before the block.
    pub header_top: f64,
    /// Line the header pins to: the global nav height on desktop, else 0.
    pub sticky_trigger_offset: f64,
    /// Bottom of the last table container, or of the block.
    pub content_bottom: f64,
    /// Current height of the sticky header.
    pub sticky_header_height: f64,
    /// Whether the enclosing section is hidden.
    pub section_hidden: bool,
}

/// Where the header is in its pin/retract cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StickyState {
    /// In the document flow.
    #[default]
    Normal,
    /// Pinned to the trigger line.
    Stuck,
    /// Pinned but hidden, because the table content has scrolled away.
    StuckRetracted,
}

impl StickyState {
    /// Stuck or retracted.
    pub fn is_pinned(self) -> bool {
        self != StickyState::Normal
    }
}

/// Classify the header from one snapshot of signals.
///
/// ```
/// use comparison_table::{StickySignals, StickyState, classify};
///
/// let signals = StickySignals {
///     header_top: -5.0,
///     content_bottom: 600.0,
///     sticky_header_height: 100.0,
///     ..Default::default()
/// };
/// assert_eq!(classify(&signals), StickyState::Stuck);
/// ```
pub fn classify(signals: &StickySignals) -> StickyState {
    if signals.section_hidden || signals.header_top >= signals.sticky_trigger_offset {
        StickyState::Normal
    } else if signals.content_bottom <= signals.sticky_header_height {
        StickyState::StuckRetracted
    } else {
        StickyState::Stuck
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(header_top: f64, content_bottom: f64) -> StickySignals {
        StickySignals {
            header_top,
            sticky_trigger_offset: 0.0,
            content_bottom,
            sticky_header_height: 100.0,
            section_hidden: false,
        }
    }

    #[test]
    fn header_below_trigger_line_is_normal() {
        assert_eq!(classify(&signals(10.0, 900.0)), StickyState::Normal);
        assert_eq!(classify(&signals(0.0, 900.0)), StickyState::Normal);
    }

    #[test]
    fn header_above_trigger_line_is_stuck() {
        assert_eq!(classify(&signals(-5.0, 900.0)), StickyState::Stuck);
    }

    #[test]
    fn content_scrolled_away_retracts() {
        assert_eq!(classify(&signals(-800.0, 40.0)), StickyState::StuckRetracted);
        assert_eq!(classify(&signals(-800.0, 100.0)), StickyState::StuckRetracted);
        assert_eq!(classify(&signals(-800.0, 101.0)), StickyState::Stuck);
    }

    #[test]
    fn hidden_section_wins() {
        let mut s = signals(-800.0, 40.0);
        s.section_hidden = true;
        assert_eq!(classify(&s), StickyState::Normal);
    }

    #[test]
    fn trigger_offset_moves_the_line() {
        let mut s = signals(50.0, 900.0);
        s.sticky_trigger_offset = 64.0;
        assert_eq!(classify(&s), StickyState::Stuck);

        s.header_top = 64.0;
        assert_eq!(classify(&s), StickyState::Normal);
    }
}
