//! Drag-to-explode easter egg: holding the primary button and scrolling shakes
//! the page for a while, then flashes an explosion overlay.
//!
//! The machine never reads a clock. Callers pass `now_ms` into every
//! time-sensitive call and arm a timer for [`ExplosionGesture::next_deadline_ms`].

use crate::config::ScrollConfig;

pub const SHAKE_DURATION_MS: f64 = 5000.0;
pub const EXPLODE_DURATION_MS: f64 = 500.0;
pub const SHAKE_SCROLL_BEHAVIOR: &str = "smooth";
pub const PRIMARY_BUTTON: i16 = 0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureState {
    #[default]
    Idle,
    Holding,
    Shaking,
    Exploding,
}

impl GestureState {
    pub fn label(self) -> &'static str {
        match self {
            GestureState::Idle => "idle",
            GestureState::Holding => "holding",
            GestureState::Shaking => "shaking",
            GestureState::Exploding => "exploding",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestureTransition {
    pub from: GestureState,
    pub to: GestureState,
}

/// Page-level `scroll-behavior` style, the only document state the gesture
/// writes to.
pub trait ScrollStyleHost {
    fn scroll_behavior(&self) -> String;
    fn set_scroll_behavior(&mut self, value: &str);
}

#[derive(Clone, Debug, PartialEq)]
pub struct GestureTimings {
    pub shake_ms: f64,
    pub explode_ms: f64,
    pub shake_behavior: String,
}

impl Default for GestureTimings {
    fn default() -> Self {
        Self {
            shake_ms: SHAKE_DURATION_MS,
            explode_ms: EXPLODE_DURATION_MS,
            shake_behavior: SHAKE_SCROLL_BEHAVIOR.to_string(),
        }
    }
}

impl From<&ScrollConfig> for GestureTimings {
    fn from(config: &ScrollConfig) -> Self {
        Self {
            shake_ms: config.shake_ms,
            explode_ms: config.explode_ms,
            shake_behavior: config.shake_behavior.clone(),
        }
    }
}

#[derive(Debug)]
pub struct ExplosionGesture {
    state: GestureState,
    timings: GestureTimings,
    deadline_ms: Option<f64>,
    saved_behavior: Option<String>,
}

impl ExplosionGesture {
    pub fn new(timings: GestureTimings) -> Self {
        Self {
            state: GestureState::Idle,
            timings,
            deadline_ms: None,
            saved_behavior: None,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_shaking(&self) -> bool {
        self.state == GestureState::Shaking
    }

    pub fn is_exploding(&self) -> bool {
        self.state == GestureState::Exploding
    }

    pub fn next_deadline_ms(&self) -> Option<f64> {
        self.deadline_ms
    }

    pub fn pointer_down(&mut self, button: i16, scroll_y: f64) -> Option<GestureTransition> {
        if self.state != GestureState::Idle || button != PRIMARY_BUTTON || scroll_y <= 0.0 {
            return None;
        }
        Some(self.enter(GestureState::Holding))
    }

    /// Releasing only matters before the sequence starts; once shaking, the
    /// timers run to completion.
    pub fn pointer_up(&mut self) -> Option<GestureTransition> {
        if self.state != GestureState::Holding {
            return None;
        }
        Some(self.enter(GestureState::Idle))
    }

    pub fn scroll(
        &mut self,
        now_ms: f64,
        host: &mut dyn ScrollStyleHost,
    ) -> Option<GestureTransition> {
        if self.state != GestureState::Holding {
            return None;
        }
        self.saved_behavior = Some(host.scroll_behavior());
        host.set_scroll_behavior(&self.timings.shake_behavior);
        self.deadline_ms = Some(now_ms + self.timings.shake_ms);
        Some(self.enter(GestureState::Shaking))
    }

    /// Applies at most one due transition. Late timers still give the
    /// explosion its full duration, measured from when it actually started.
    pub fn advance(
        &mut self,
        now_ms: f64,
        host: &mut dyn ScrollStyleHost,
    ) -> Option<GestureTransition> {
        let deadline = self.deadline_ms?;
        if now_ms < deadline {
            return None;
        }
        match self.state {
            GestureState::Shaking => {
                self.deadline_ms = Some(now_ms + self.timings.explode_ms);
                Some(self.enter(GestureState::Exploding))
            }
            GestureState::Exploding => {
                self.deadline_ms = None;
                self.restore(host);
                Some(self.enter(GestureState::Idle))
            }
            GestureState::Idle | GestureState::Holding => {
                self.deadline_ms = None;
                None
            }
        }
    }

    /// Unmount path: drops pending deadlines and puts back any style override.
    pub fn cancel(&mut self, host: &mut dyn ScrollStyleHost) -> Option<GestureTransition> {
        self.deadline_ms = None;
        self.restore(host);
        if self.state == GestureState::Idle {
            return None;
        }
        Some(self.enter(GestureState::Idle))
    }

    fn restore(&mut self, host: &mut dyn ScrollStyleHost) {
        if let Some(original) = self.saved_behavior.take() {
            host.set_scroll_behavior(&original);
        }
    }

    fn enter(&mut self, next: GestureState) -> GestureTransition {
        let from = self.state;
        self.state = next;
        GestureTransition { from, to: next }
    }
}

impl Default for ExplosionGesture {
    fn default() -> Self {
        Self::new(GestureTimings::default())
    }
}
