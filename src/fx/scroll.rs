//! Scroll- and pointer-derived state
//!
//! Pure decisions behind the nav highlighter, hero parallax, scroll-reveal
//! flags and card glow. The glue layer feeds in scroll offsets, section
//! geometry and intersection events and applies the answers to the DOM.

use crate::consts::{NAV_SCROLLED_PX, PARALLAX_FACTOR, PARALLAX_FADE_FRACTION, SECTION_BIAS_PX};

/// Whether the nav bar should carry its "scrolled" background state
#[inline]
pub fn nav_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAV_SCROLLED_PX
}

/// Pick the active section for the current scroll offset.
///
/// Sections are scanned in document order; the last one whose biased top
/// (top - 120) sits at or above the scroll offset wins. Before the page has
/// scrolled into the first section (including rubber-band negative offsets)
/// no section is active.
pub fn active_section(section_tops: &[f64], scroll_y: f64) -> Option<usize> {
    if scroll_y < 0.0 {
        return None;
    }
    let mut current = None;
    for (i, top) in section_tops.iter().enumerate() {
        if scroll_y >= top - SECTION_BIAS_PX {
            current = Some(i);
        }
    }
    current
}

/// Hero transform for one scroll position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroShift {
    /// Vertical translation (px)
    pub translate_y: f64,
    /// Content opacity in [0, 1]
    pub opacity: f64,
}

/// Parallax shift for the hero content, or `None` once the hero has scrolled
/// a full viewport height off screen (no further writes needed).
pub fn hero_parallax(scroll_y: f64, viewport_h: f64) -> Option<HeroShift> {
    if scroll_y >= viewport_h || viewport_h <= 0.0 {
        return None;
    }
    let opacity = 1.0 - scroll_y / (viewport_h * PARALLAX_FADE_FRACTION);
    Some(HeroShift {
        translate_y: scroll_y * PARALLAX_FACTOR,
        opacity: opacity.clamp(0.0, 1.0),
    })
}

/// One-way reveal latch for a scroll-animated element. Once an intersection
/// marks it visible it stays visible; repeated events are no-ops.
#[derive(Debug, Clone, Copy, Default)]
pub struct RevealFlag {
    revealed: bool,
}

impl RevealFlag {
    /// Feed one intersection event. Returns true only on the transition
    /// into the revealed state.
    pub fn on_intersection(&mut self, intersecting: bool) -> bool {
        if intersecting && !self.revealed {
            self.revealed = true;
            return true;
        }
        false
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }
}

/// At-most-once trigger for a skill-bar fill. The glue also unobserves the
/// element after the first fire; the latch keeps the invariant even if a
/// queued callback lands after that.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkillFill {
    fired: bool,
}

impl SkillFill {
    /// Returns true exactly once, on the first intersecting event
    pub fn on_intersection(&mut self, intersecting: bool) -> bool {
        if intersecting && !self.fired {
            self.fired = true;
            return true;
        }
        false
    }
}

/// Pointer position relative to a card's bounding box, for the glow origin
#[inline]
pub fn glow_offset(client_x: f64, client_y: f64, rect_left: f64, rect_top: f64) -> (f64, f64) {
    (client_x - rect_left, client_y - rect_top)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_scrolled_threshold() {
        assert!(!nav_scrolled(0.0));
        assert!(!nav_scrolled(80.0));
        assert!(nav_scrolled(80.5));
    }

    #[test]
    fn test_active_section_last_match_wins() {
        let tops = [0.0, 500.0, 1200.0];
        assert_eq!(active_section(&tops, 50.0), Some(0));
        assert_eq!(active_section(&tops, 600.0), Some(1));
        assert_eq!(active_section(&tops, 1300.0), Some(2));
    }

    #[test]
    fn test_active_section_none_above_page() {
        let tops = [0.0, 500.0, 1200.0];
        assert_eq!(active_section(&tops, -10.0), None);
        assert_eq!(active_section(&[], 600.0), None);
    }

    #[test]
    fn test_active_section_bias() {
        // Section at 500 activates 120px early
        let tops = [0.0, 500.0];
        assert_eq!(active_section(&tops, 379.9), Some(0));
        assert_eq!(active_section(&tops, 380.0), Some(1));
    }

    #[test]
    fn test_parallax_within_viewport() {
        let shift = hero_parallax(200.0, 1000.0).unwrap();
        assert_eq!(shift.translate_y, 50.0);
        assert!((shift.opacity - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_parallax_fades_out_by_80_percent() {
        let shift = hero_parallax(800.0, 1000.0).unwrap();
        assert_eq!(shift.opacity, 0.0);
        // Past the fade point but still inside the viewport: clamped, not
        // negative
        let shift = hero_parallax(900.0, 1000.0).unwrap();
        assert_eq!(shift.opacity, 0.0);
    }

    #[test]
    fn test_parallax_stops_past_viewport() {
        assert_eq!(hero_parallax(1000.0, 1000.0), None);
        assert_eq!(hero_parallax(5000.0, 1000.0), None);
    }

    #[test]
    fn test_reveal_is_monotone() {
        let mut flag = RevealFlag::default();
        assert!(!flag.is_revealed());
        assert!(flag.on_intersection(true));
        // Leaving the viewport does not un-reveal
        assert!(!flag.on_intersection(false));
        assert!(flag.is_revealed());
        // Re-entering is a no-op
        assert!(!flag.on_intersection(true));
        assert!(flag.is_revealed());
    }

    #[test]
    fn test_skill_fill_fires_at_most_once() {
        let mut fill = SkillFill::default();
        assert!(!fill.on_intersection(false));
        assert!(fill.on_intersection(true));
        // A second queued callback must not re-apply the fill
        assert!(!fill.on_intersection(true));
    }

    #[test]
    fn test_glow_offset_relative_to_rect() {
        assert_eq!(glow_offset(320.0, 480.0, 300.0, 450.0), (20.0, 30.0));
    }
}
