use std::cell::RefCell;
use std::rc::Rc;

use folio_scroll_core::{ConfigError, ScrollConfig};
use wasm_bindgen::JsCast;
use web_sys::UrlSearchParams;

const QUERY_PREFIX: &str = "scroll.";

thread_local! {
    static SCROLL_CONFIG: RefCell<Option<Rc<ScrollConfig>>> = RefCell::new(None);
}

pub(crate) fn scroll_config() -> Rc<ScrollConfig> {
    if let Some(config) = SCROLL_CONFIG.with(|slot| slot.borrow().clone()) {
        return config;
    }
    let config = Rc::new(load_scroll_config());
    SCROLL_CONFIG.with(|slot| {
        *slot.borrow_mut() = Some(config.clone());
    });
    config
}

fn load_scroll_config() -> ScrollConfig {
    let mut config = build_time_config().unwrap_or_default();
    for (key, value) in query_overrides() {
        if let Err(err) = config.apply_override(&key, &value) {
            gloo::console::warn!("scroll config: override rejected", err.to_string());
        }
    }
    gloo::console::log!(
        "scroll config",
        format!(
            "anchor={} shake={}ms explode={}ms",
            config.anchor_offset, config.shake_ms, config.explode_ms
        )
    );
    config
}

fn build_time_config() -> Option<ScrollConfig> {
    let raw = option_env!("FOLIO_SCROLL_CONFIG")?.trim();
    if raw.is_empty() {
        return None;
    }
    match parse_config_json(raw) {
        Ok(config) => Some(config),
        Err(err) => {
            gloo::console::warn!("scroll config: build config ignored", err);
            None
        }
    }
}

pub(crate) fn parse_config_json(raw: &str) -> Result<ScrollConfig, String> {
    let config: ScrollConfig = serde_json::from_str(raw).map_err(|err| err.to_string())?;
    config.validate().map_err(|err: ConfigError| err.to_string())?;
    Ok(config)
}

fn query_overrides() -> Vec<(String, String)> {
    let Some(window) = web_sys::window() else {
        return Vec::new();
    };
    let Ok(search) = window.location().search() else {
        return Vec::new();
    };
    parse_query_overrides(&search)
}

/// `?scroll.shake_ms=1200` style pairs, prefix stripped. Keys without the
/// prefix belong to the page and are logged and skipped.
pub(crate) fn parse_query_overrides(search: &str) -> Vec<(String, String)> {
    let Ok(params) = UrlSearchParams::new_with_str(search) else {
        return Vec::new();
    };
    let Ok(Some(entries)) = js_sys::try_iter(params.as_ref()) else {
        return Vec::new();
    };
    let mut overrides = Vec::new();
    for entry in entries.flatten() {
        let Ok(pair) = entry.dyn_into::<js_sys::Array>() else {
            continue;
        };
        let (Some(key), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) else {
            continue;
        };
        match key.strip_prefix(QUERY_PREFIX) {
            Some(key) => overrides.push((key.to_string(), value)),
            None => gloo::console::log!("scroll config: query key ignored", key),
        }
    }
    overrides
}
