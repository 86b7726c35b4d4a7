pub mod active_section;
pub mod config;
pub mod easing;
pub mod gesture;
pub mod transform;
pub mod viewport;

pub use active_section::{
    nav_target_id, resolve, resolve_with_offset, NavItem, ACTIVE_SECTION_ANCHOR_OFFSET, NAV_ITEMS,
};
pub use config::{ConfigError, ScrollConfig};
pub use easing::{stagger_delay_ms, CubicBezier, EASE_OUT_CUBIC};
pub use gesture::{
    ExplosionGesture, GestureState, GestureTimings, GestureTransition, ScrollStyleHost,
    PRIMARY_BUTTON,
};
pub use transform::{TransformError, TransformMap};
pub use viewport::{element_progress, FrameSample, ScrollSample, SectionGeometry};
