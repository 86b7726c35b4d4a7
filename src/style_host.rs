use folio_scroll_core::ScrollStyleHost;
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, HtmlElement};

const SCROLL_BEHAVIOR_PROPERTY: &str = "scroll-behavior";

/// Inline style of `<html>`, where the page-wide scroll behavior lives.
pub(crate) struct DocumentScrollStyle {
    style: Option<CssStyleDeclaration>,
}

impl DocumentScrollStyle {
    pub(crate) fn new() -> Self {
        let style = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.document_element())
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .map(|element| element.style());
        if style.is_none() {
            gloo::console::warn!("scroll style: document element unavailable");
        }
        Self { style }
    }
}

impl ScrollStyleHost for DocumentScrollStyle {
    fn scroll_behavior(&self) -> String {
        self.style
            .as_ref()
            .and_then(|style| style.get_property_value(SCROLL_BEHAVIOR_PROPERTY).ok())
            .unwrap_or_default()
    }

    fn set_scroll_behavior(&mut self, value: &str) {
        let Some(style) = self.style.as_ref() else {
            return;
        };
        let result = if value.is_empty() {
            style.remove_property(SCROLL_BEHAVIOR_PROPERTY).map(|_| ())
        } else {
            style.set_property(SCROLL_BEHAVIOR_PROPERTY, value)
        };
        if result.is_err() {
            gloo::console::warn!("scroll style: write rejected", value.to_string());
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use folio_scroll_core::{ExplosionGesture, GestureState, PRIMARY_BUTTON};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn scroll_behavior_round_trips_through_inline_style() {
        let mut host = DocumentScrollStyle::new();
        host.set_scroll_behavior("smooth");
        assert_eq!(host.scroll_behavior(), "smooth");
        host.set_scroll_behavior("");
        assert_eq!(host.scroll_behavior(), "");
    }

    #[wasm_bindgen_test]
    fn gesture_sequence_restores_document_style() {
        let mut host = DocumentScrollStyle::new();
        host.set_scroll_behavior("auto");
        let mut gesture = ExplosionGesture::default();
        gesture.pointer_down(PRIMARY_BUTTON, 120.0);
        gesture.scroll(0.0, &mut host);
        assert_eq!(host.scroll_behavior(), "smooth");
        gesture.advance(5000.0, &mut host);
        assert_eq!(gesture.state(), GestureState::Exploding);
        gesture.advance(5500.0, &mut host);
        assert_eq!(gesture.state(), GestureState::Idle);
        assert_eq!(host.scroll_behavior(), "auto");
        host.set_scroll_behavior("");
    }
}
