pub const CHAR_STAGGER_MS: f64 = 30.0;
pub const NAV_STAGGER_MS: f64 = 100.0;
pub const CHAR_REVEAL_MS: f64 = 500.0;

/// CSS cubic bezier timing curve anchored at (0,0) and (1,1). The browser
/// evaluates it; this side only formats the control points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// easeOutCubic, used for the per-character heading reveal.
pub const EASE_OUT_CUBIC: CubicBezier = CubicBezier::new(0.215, 0.61, 0.355, 1.0);

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn css(&self) -> String {
        format!(
            "cubic-bezier({}, {}, {}, {})",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}

pub fn stagger_delay_ms(index: usize, step_ms: f64) -> f64 {
    index as f64 * step_ms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_lists_control_points() {
        assert_eq!(EASE_OUT_CUBIC.css(), "cubic-bezier(0.215, 0.61, 0.355, 1)");
        assert_eq!(
            CubicBezier::new(0.0, 0.0, 1.0, 1.0).css(),
            "cubic-bezier(0, 0, 1, 1)"
        );
    }

    #[test]
    fn stagger_grows_with_index() {
        assert_eq!(stagger_delay_ms(3, NAV_STAGGER_MS), 300.0);
        assert_eq!(stagger_delay_ms(0, CHAR_STAGGER_MS), 0.0);
        assert_eq!(stagger_delay_ms(4, CHAR_STAGGER_MS), 120.0);
    }
}
