use std::cell::RefCell;
use std::rc::{Rc, Weak};

use folio_scroll_core::config::MAX_DURATION_MS;
use folio_scroll_core::{ExplosionGesture, GestureState, GestureTimings, GestureTransition};
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use js_sys::Date;
use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent};

use crate::style_host::DocumentScrollStyle;

struct GestureRuntime {
    machine: RefCell<ExplosionGesture>,
    style: RefCell<DocumentScrollStyle>,
    timer: RefCell<Option<Timeout>>,
    listeners: RefCell<Vec<EventListener>>,
    on_change: Rc<dyn Fn(GestureState)>,
}

/// Owns the window listeners and the pending timer. Dropping it ends any
/// sequence in flight and restores the page scroll behavior.
pub(crate) struct GestureHandle {
    runtime: Rc<GestureRuntime>,
}

impl Drop for GestureHandle {
    fn drop(&mut self) {
        self.runtime.listeners.borrow_mut().clear();
        self.runtime.timer.borrow_mut().take();
        let transition = {
            let mut style = self.runtime.style.borrow_mut();
            self.runtime.machine.borrow_mut().cancel(&mut *style)
        };
        if let Some(transition) = transition {
            log_transition(transition, "unmount");
        }
    }
}

pub(crate) fn install_gesture(
    timings: GestureTimings,
    on_change: Rc<dyn Fn(GestureState)>,
) -> GestureHandle {
    let runtime = Rc::new(GestureRuntime {
        machine: RefCell::new(ExplosionGesture::new(timings)),
        style: RefCell::new(DocumentScrollStyle::new()),
        timer: RefCell::new(None),
        listeners: RefCell::new(Vec::new()),
        on_change,
    });
    runtime.install_listeners();
    GestureHandle { runtime }
}

/// `setTimeout` takes a signed 32-bit delay; anything longer is re-armed
/// from the callback once the clamp elapses.
fn timer_delay_ms(deadline_ms: f64, now_ms: f64) -> u32 {
    (deadline_ms - now_ms).ceil().clamp(0.0, MAX_DURATION_MS) as u32
}

fn log_transition(transition: GestureTransition, cause: &str) {
    gloo::console::log!(
        "gesture",
        format!("{} -> {}", transition.from.label(), transition.to.label()),
        cause
    );
}

impl GestureRuntime {
    fn install_listeners(self: &Rc<Self>) {
        let Some(window) = web_sys::window() else {
            gloo::console::warn!("gesture: window unavailable");
            return;
        };
        let mut listeners = self.listeners.borrow_mut();

        let runtime = Rc::downgrade(self);
        listeners.push(EventListener::new(&window, "mousedown", move |event: &Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let Some(runtime) = runtime.upgrade() else {
                return;
            };
            let scroll_y = web_sys::window()
                .and_then(|window| window.scroll_y().ok())
                .unwrap_or(0.0);
            let transition = runtime
                .machine
                .borrow_mut()
                .pointer_down(event.button(), scroll_y);
            runtime.settle(transition, "mousedown");
        }));

        let runtime = Rc::downgrade(self);
        listeners.push(EventListener::new(&window, "mouseup", move |_| {
            let Some(runtime) = runtime.upgrade() else {
                return;
            };
            let transition = runtime.machine.borrow_mut().pointer_up();
            runtime.settle(transition, "mouseup");
        }));

        let runtime = Rc::downgrade(self);
        listeners.push(EventListener::new(&window, "scroll", move |_| {
            let Some(runtime) = runtime.upgrade() else {
                return;
            };
            let transition = {
                let mut style = runtime.style.borrow_mut();
                runtime.machine.borrow_mut().scroll(Date::now(), &mut *style)
            };
            runtime.settle(transition, "scroll");
        }));
    }

    fn settle(self: &Rc<Self>, transition: Option<GestureTransition>, cause: &str) {
        let Some(transition) = transition else {
            return;
        };
        log_transition(transition, cause);
        self.arm_timer();
        (self.on_change)(transition.to);
    }

    fn arm_timer(self: &Rc<Self>) {
        let deadline = self.machine.borrow().next_deadline_ms();
        let Some(deadline) = deadline else {
            self.timer.borrow_mut().take();
            return;
        };
        let delay = timer_delay_ms(deadline, Date::now());
        let runtime: Weak<GestureRuntime> = Rc::downgrade(self);
        let timeout = Timeout::new(delay, move || {
            let Some(runtime) = runtime.upgrade() else {
                return;
            };
            let transition = {
                let mut style = runtime.style.borrow_mut();
                runtime.machine.borrow_mut().advance(Date::now(), &mut *style)
            };
            if transition.is_some() {
                runtime.settle(transition, "timer");
            } else {
                runtime.arm_timer();
            }
        });
        *self.timer.borrow_mut() = Some(timeout);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use folio_scroll_core::ScrollStyleHost;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn timer_delay_stays_in_set_timeout_range() {
        assert_eq!(timer_delay_ms(3_000_000_000.0, 0.0), i32::MAX as u32);
        assert_eq!(timer_delay_ms(100.5, 0.0), 101);
        assert_eq!(timer_delay_ms(10.0, 50.0), 0);
    }

    #[wasm_bindgen_test(async)]
    async fn dropping_handle_restores_style_and_detaches() {
        let window = web_sys::window().expect("window available");
        let document = window.document().expect("document available");
        let body = document.body().expect("body available");
        let spacer = document.create_element("div").expect("create spacer");
        spacer
            .set_attribute("style", "display:block;height:5000px")
            .expect("size spacer");
        body.append_child(&spacer).expect("append spacer");

        let mut style = DocumentScrollStyle::new();
        style.set_scroll_behavior("auto");
        window.scroll_to_with_x_and_y(0.0, 200.0);
        // let the native scroll event from scroll_to land before listening
        TimeoutFuture::new(50).await;
        assert!(window.scroll_y().unwrap_or(0.0) > 0.0);

        let states = Rc::new(RefCell::new(Vec::new()));
        let recorder = states.clone();
        let timings = GestureTimings {
            shake_ms: 30.0,
            explode_ms: 30.0,
            ..GestureTimings::default()
        };
        let handle = install_gesture(
            timings,
            Rc::new(move |state: GestureState| recorder.borrow_mut().push(state)),
        );

        let press = MouseEvent::new("mousedown").expect("mousedown event");
        window.dispatch_event(&press).expect("dispatch mousedown");
        let scroll = Event::new("scroll").expect("scroll event");
        window.dispatch_event(&scroll).expect("dispatch scroll");
        assert_eq!(
            *states.borrow(),
            vec![GestureState::Holding, GestureState::Shaking]
        );
        assert_eq!(style.scroll_behavior(), "smooth");

        drop(handle);
        assert_eq!(style.scroll_behavior(), "auto");

        let press = MouseEvent::new("mousedown").expect("mousedown event");
        window.dispatch_event(&press).expect("dispatch mousedown");
        let scroll = Event::new("scroll").expect("scroll event");
        window.dispatch_event(&scroll).expect("dispatch scroll");
        // past both deadlines: a surviving timer would have reported Exploding
        TimeoutFuture::new(120).await;
        assert_eq!(states.borrow().len(), 2);
        assert_eq!(style.scroll_behavior(), "auto");

        window.scroll_to_with_x_and_y(0.0, 0.0);
        body.remove_child(&spacer).expect("remove spacer");
        style.set_scroll_behavior("");
    }
}
