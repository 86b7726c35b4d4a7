pub const HEADER_SCROLLED_THRESHOLD: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSample {
    pub scroll_y: f64,
    pub viewport_height: f64,
}

impl ScrollSample {
    /// Negative scroll (overscroll bounce) reads as the top of the page and a
    /// collapsed viewport reads as one pixel tall.
    pub fn new(scroll_y: f64, viewport_height: f64) -> Self {
        let scroll_y = if scroll_y.is_finite() { scroll_y.max(0.0) } else { 0.0 };
        let viewport_height = if viewport_height.is_finite() && viewport_height > 0.0 {
            viewport_height
        } else {
            1.0
        };
        Self {
            scroll_y,
            viewport_height,
        }
    }

    pub fn header_scrolled(&self, threshold: f64) -> bool {
        self.scroll_y > threshold
    }
}

impl Default for ScrollSample {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionGeometry {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionGeometry {
    /// Returns `None` for geometry that cannot be a navigation target.
    pub fn measured(id: &str, top: f64, height: f64) -> Option<Self> {
        let id = id.trim();
        if id.is_empty() || !top.is_finite() || !height.is_finite() || height <= 0.0 {
            return None;
        }
        Some(Self {
            id: id.to_string(),
            top,
            height,
        })
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn contains(&self, y: f64) -> bool {
        self.top <= y && y < self.bottom()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameSample {
    pub scroll: ScrollSample,
    pub sections: Vec<SectionGeometry>,
}

impl FrameSample {
    /// Bit pattern of every section's top and height. Changes whenever layout
    /// moves, even if the section count stays the same.
    pub fn layout_signature(&self) -> Vec<u64> {
        self.sections
            .iter()
            .flat_map(|section| [section.top.to_bits(), section.height.to_bits()])
            .collect()
    }
}

/// Progress of an element through the viewport, from its top edge entering at
/// the bottom (0.0) to its bottom edge leaving at the top (1.0).
pub fn element_progress(sample: &ScrollSample, element_top: f64, element_height: f64) -> f64 {
    let span = element_height.max(0.0) + sample.viewport_height;
    if span <= 0.0 {
        return 0.0;
    }
    let travelled = sample.scroll_y + sample.viewport_height - element_top;
    (travelled / span).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_clamps_overscroll() {
        let sample = ScrollSample::new(-24.0, 0.0);
        assert_eq!(sample.scroll_y, 0.0);
        assert_eq!(sample.viewport_height, 1.0);
    }

    #[test]
    fn header_threshold_is_exclusive() {
        assert!(!ScrollSample::new(50.0, 900.0).header_scrolled(HEADER_SCROLLED_THRESHOLD));
        assert!(ScrollSample::new(51.0, 900.0).header_scrolled(HEADER_SCROLLED_THRESHOLD));
    }

    #[test]
    fn measured_skips_empty_sections() {
        assert!(SectionGeometry::measured("", 0.0, 10.0).is_none());
        assert!(SectionGeometry::measured("about", 0.0, 0.0).is_none());
        assert!(SectionGeometry::measured("about", f64::NAN, 10.0).is_none());
        let section = SectionGeometry::measured(" about ", 800.0, 400.0).unwrap();
        assert_eq!(section.id, "about");
        assert!(section.contains(800.0));
        assert!(!section.contains(1200.0));
    }

    #[test]
    fn layout_signature_tracks_reflow() {
        let section = |id: &str, top: f64| SectionGeometry::measured(id, top, 400.0).unwrap();
        let before = FrameSample {
            scroll: ScrollSample::new(120.0, 800.0),
            sections: vec![section("about", 800.0), section("skills", 1200.0)],
        };
        let scrolled = FrameSample {
            scroll: ScrollSample::new(600.0, 800.0),
            ..before.clone()
        };
        assert_eq!(before.layout_signature(), scrolled.layout_signature());

        let reflowed = FrameSample {
            sections: vec![section("about", 860.0), section("skills", 1260.0)],
            ..before.clone()
        };
        assert_eq!(reflowed.sections.len(), before.sections.len());
        assert_ne!(before.layout_signature(), reflowed.layout_signature());
        assert!(FrameSample::default().layout_signature().is_empty());
    }

    #[test]
    fn progress_spans_enter_to_exit() {
        // element occupies [1000, 1200), viewport is 800 tall
        let entering = ScrollSample::new(200.0, 800.0);
        assert_eq!(element_progress(&entering, 1000.0, 200.0), 0.0);
        let leaving = ScrollSample::new(1200.0, 800.0);
        assert_eq!(element_progress(&leaving, 1000.0, 200.0), 1.0);
        let middle = ScrollSample::new(700.0, 800.0);
        assert!((element_progress(&middle, 1000.0, 200.0) - 0.5).abs() < 1e-9);
        let before = ScrollSample::new(0.0, 800.0);
        assert_eq!(element_progress(&before, 1000.0, 200.0), 0.0);
    }
}
