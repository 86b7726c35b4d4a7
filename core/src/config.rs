use serde::Deserialize;

use crate::active_section::ACTIVE_SECTION_ANCHOR_OFFSET;
use crate::gesture::{EXPLODE_DURATION_MS, SHAKE_DURATION_MS, SHAKE_SCROLL_BEHAVIOR};
use crate::transform::PARALLAX_OFFSET_DEFAULT;
use crate::viewport::HEADER_SCROLLED_THRESHOLD;

const SCROLL_BEHAVIORS: [&str; 2] = ["auto", "smooth"];

/// Longest delay a browser timer accepts; larger values wrap and fire at once.
pub const MAX_DURATION_MS: f64 = i32::MAX as f64;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown config key: {0}")]
    UnknownKey(String),
    #[error("invalid number for {key}: {value:?}")]
    InvalidNumber { key: String, value: String },
    #[error("{key} must be {bound}, got {value}")]
    OutOfRange {
        key: String,
        bound: &'static str,
        value: f64,
    },
    #[error("unsupported scroll behavior: {0:?}")]
    InvalidBehavior(String),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub anchor_offset: f64,
    pub scrolled_threshold: f64,
    pub shake_ms: f64,
    pub explode_ms: f64,
    pub parallax_offset: f64,
    pub shake_behavior: String,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            anchor_offset: ACTIVE_SECTION_ANCHOR_OFFSET,
            scrolled_threshold: HEADER_SCROLLED_THRESHOLD,
            shake_ms: SHAKE_DURATION_MS,
            explode_ms: EXPLODE_DURATION_MS,
            parallax_offset: PARALLAX_OFFSET_DEFAULT,
            shake_behavior: SHAKE_SCROLL_BEHAVIOR.to_string(),
        }
    }
}

fn parse_number(key: &str, value: &str) -> Result<f64, ConfigError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| ConfigError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        })
}

fn non_negative(key: &str, value: f64) -> Result<f64, ConfigError> {
    if value < 0.0 {
        return Err(ConfigError::OutOfRange {
            key: key.to_string(),
            bound: ">= 0",
            value,
        });
    }
    Ok(value)
}

fn duration(key: &str, value: f64) -> Result<f64, ConfigError> {
    let value = non_negative(key, value)?;
    if value > MAX_DURATION_MS {
        return Err(ConfigError::OutOfRange {
            key: key.to_string(),
            bound: "<= 2147483647",
            value,
        });
    }
    Ok(value)
}

impl ScrollConfig {
    /// Applies one `key=value` override. On error the config is untouched.
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "anchor_offset" => self.anchor_offset = parse_number(key, value)?,
            "scrolled_threshold" => self.scrolled_threshold = parse_number(key, value)?,
            "shake_ms" => self.shake_ms = duration(key, parse_number(key, value)?)?,
            "explode_ms" => self.explode_ms = duration(key, parse_number(key, value)?)?,
            "parallax_offset" => {
                self.parallax_offset = non_negative(key, parse_number(key, value)?)?
            }
            "shake_behavior" => {
                let behavior = value.trim();
                if !SCROLL_BEHAVIORS.contains(&behavior) {
                    return Err(ConfigError::InvalidBehavior(value.to_string()));
                }
                self.shake_behavior = behavior.to_string();
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Checks values that arrived through deserialization, which bypasses
    /// [`ScrollConfig::apply_override`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("anchor_offset", self.anchor_offset),
            ("scrolled_threshold", self.scrolled_threshold),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidNumber {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }
        duration("shake_ms", self.shake_ms)?;
        duration("explode_ms", self.explode_ms)?;
        non_negative("parallax_offset", self.parallax_offset)?;
        if !SCROLL_BEHAVIORS.contains(&self.shake_behavior.as_str()) {
            return Err(ConfigError::InvalidBehavior(self.shake_behavior.clone()));
        }
        Ok(())
    }
}
