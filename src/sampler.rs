use std::cell::RefCell;
use std::rc::{Rc, Weak};

use folio_scroll_core::{FrameSample, ScrollSample, SectionGeometry};
use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

const TRACKED_SECTIONS: &str = "section[id]";

/// Coalesces scroll and resize events into at most one layout read per
/// animation frame and hands the result to `on_frame`.
struct ViewportSampler {
    on_frame: Rc<dyn Fn(FrameSample)>,
    listeners: RefCell<Vec<EventListener>>,
    frame_handle: RefCell<Option<AnimationFrame>>,
}

pub(crate) struct SamplerHandle {
    sampler: Rc<ViewportSampler>,
}

impl Drop for SamplerHandle {
    fn drop(&mut self) {
        self.sampler.listeners.borrow_mut().clear();
        self.sampler.frame_handle.borrow_mut().take();
    }
}

pub(crate) fn install_sampler(on_frame: Rc<dyn Fn(FrameSample)>) -> SamplerHandle {
    let sampler = Rc::new(ViewportSampler {
        on_frame,
        listeners: RefCell::new(Vec::new()),
        frame_handle: RefCell::new(None),
    });
    sampler.install_listeners();
    sampler.emit();
    SamplerHandle { sampler }
}

impl ViewportSampler {
    fn install_listeners(self: &Rc<Self>) {
        let Some(window) = web_sys::window() else {
            gloo::console::warn!("sampler: window unavailable");
            return;
        };
        let mut listeners = self.listeners.borrow_mut();
        for event in ["scroll", "resize"] {
            let sampler = Rc::downgrade(self);
            listeners.push(EventListener::new(&window, event, move |_| {
                queue_measure(&sampler);
            }));
        }
    }

    fn emit(&self) {
        if let Some(sample) = measure_frame() {
            (self.on_frame)(sample);
        }
    }
}

fn queue_measure(sampler: &Weak<ViewportSampler>) {
    let Some(view) = sampler.upgrade() else {
        return;
    };
    if view.frame_handle.borrow().is_some() {
        return;
    }
    let pending = Rc::downgrade(&view);
    let handle = request_animation_frame(move |_| {
        let Some(view) = pending.upgrade() else {
            return;
        };
        view.frame_handle.borrow_mut().take();
        view.emit();
    });
    *view.frame_handle.borrow_mut() = Some(handle);
}

pub(crate) fn measure_scroll() -> Option<ScrollSample> {
    let window = web_sys::window()?;
    let scroll_y = window.scroll_y().ok()?;
    let viewport_height = window.inner_height().ok()?.as_f64()?;
    Some(ScrollSample::new(scroll_y, viewport_height))
}

pub(crate) fn measure_sections() -> Vec<SectionGeometry> {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return Vec::new();
    };
    let Ok(nodes) = document.query_selector_all(TRACKED_SECTIONS) else {
        return Vec::new();
    };
    let mut sections = Vec::with_capacity(nodes.length() as usize);
    for index in 0..nodes.length() {
        let Some(element) = nodes
            .get(index)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        if let Some(section) = SectionGeometry::measured(
            &element.id(),
            element.offset_top() as f64,
            element.client_height() as f64,
        ) {
            sections.push(section);
        }
    }
    sections
}

fn measure_frame() -> Option<FrameSample> {
    let scroll = measure_scroll()?;
    Some(FrameSample {
        scroll,
        sections: measure_sections(),
    })
}
