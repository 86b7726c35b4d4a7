use crate::viewport::{ScrollSample, SectionGeometry};

pub const ACTIVE_SECTION_ANCHOR_OFFSET: f64 = 100.0;

/// Picks the section under `scroll_y + anchor_offset`. Sections are expected
/// in document order; when ranges overlap the last match wins.
pub fn resolve_with_offset<'a>(
    sample: &ScrollSample,
    sections: &'a [SectionGeometry],
    anchor_offset: f64,
) -> Option<&'a str> {
    let anchor = sample.scroll_y + anchor_offset;
    sections
        .iter()
        .rev()
        .find(|section| section.contains(anchor))
        .map(|section| section.id.as_str())
}

pub fn resolve<'a>(sample: &ScrollSample, sections: &'a [SectionGeometry]) -> Option<&'a str> {
    resolve_with_offset(sample, sections, ACTIVE_SECTION_ANCHOR_OFFSET)
}

/// `"#about"` -> `"about"`.
pub fn nav_target_id(href: &str) -> &str {
    href.strip_prefix('#').unwrap_or(href)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
}

impl NavItem {
    pub fn target_id(&self) -> &'static str {
        nav_target_id(self.href)
    }

    pub fn is_active(&self, active: Option<&str>) -> bool {
        active == Some(self.target_id())
    }
}

pub const NAV_ITEMS: [NavItem; 4] = [
    NavItem {
        label: "About",
        href: "#about",
    },
    NavItem {
        label: "Skills",
        href: "#skills",
    },
    NavItem {
        label: "Projects",
        href: "#projects",
    },
    NavItem {
        label: "Contact",
        href: "#contact",
    },
];
