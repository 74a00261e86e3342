use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

use crate::wheel::PointerSample;

#[cfg(target_arch = "wasm32")]
struct PointerListeners {
    on_move: Rc<wasm_bindgen::closure::Closure<dyn FnMut(web_sys::Event)>>,
    on_release: Rc<wasm_bindgen::closure::Closure<dyn FnMut(web_sys::Event)>>,
}

#[cfg(target_arch = "wasm32")]
const MOVE_EVENTS: [&str; 2] = ["mousemove", "touchmove"];
#[cfg(target_arch = "wasm32")]
const RELEASE_EVENTS: [&str; 2] = ["mouseup", "touchend"];

// Handlers fire for every move or release on the page; callers ignore
// samples while they are not dragging.
pub fn use_window_pointer(
    on_move: EventHandler<PointerSample>,
    on_release: EventHandler<PointerSample>,
) {
    #[cfg(target_arch = "wasm32")]
    {
        let mut listeners = use_signal(|| None::<PointerListeners>);

        use_effect(move || {
            if listeners.peek().is_some() {
                return;
            }
            let Some(window) = web_sys::window() else {
                return;
            };
            use wasm_bindgen::closure::Closure;
            use wasm_bindgen::JsCast;

            let move_closure = Rc::new(Closure::wrap(Box::new(move |event: web_sys::Event| {
                if let Some(sample) = pointer_sample(&event, false) {
                    on_move.call(sample);
                }
            }) as Box<dyn FnMut(_)>));
            let release_closure = Rc::new(Closure::wrap(Box::new(move |event: web_sys::Event| {
                if let Some(sample) = pointer_sample(&event, true) {
                    on_release.call(sample);
                }
            }) as Box<dyn FnMut(_)>));

            for name in MOVE_EVENTS {
                if let Err(err) = window.add_event_listener_with_callback(
                    name,
                    move_closure.as_ref().as_ref().unchecked_ref(),
                ) {
                    tracing::warn!("pointer: failed to attach {name}: {err:?}");
                }
            }
            for name in RELEASE_EVENTS {
                if let Err(err) = window.add_event_listener_with_callback(
                    name,
                    release_closure.as_ref().as_ref().unchecked_ref(),
                ) {
                    tracing::warn!("pointer: failed to attach {name}: {err:?}");
                }
            }
            listeners.set(Some(PointerListeners {
                on_move: move_closure,
                on_release: release_closure,
            }));
        });

        use_drop(move || {
            use wasm_bindgen::JsCast;

            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(attached) = listeners.peek().as_ref() {
                for name in MOVE_EVENTS {
                    let _ = window.remove_event_listener_with_callback(
                        name,
                        attached.on_move.as_ref().as_ref().unchecked_ref(),
                    );
                }
                for name in RELEASE_EVENTS {
                    let _ = window.remove_event_listener_with_callback(
                        name,
                        attached.on_release.as_ref().as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (on_move, on_release);
    }
}

// Touch releases only carry the lifted finger in `changedTouches`.
#[cfg(target_arch = "wasm32")]
fn pointer_sample(event: &web_sys::Event, released: bool) -> Option<PointerSample> {
    use wasm_bindgen::JsCast;

    let time_ms = crate::clock::now_ms();
    if let Some(mouse) = event.dyn_ref::<web_sys::MouseEvent>() {
        return Some(PointerSample {
            x: f64::from(mouse.client_x()),
            y: f64::from(mouse.client_y()),
            time_ms,
        });
    }
    let touch_event = event.dyn_ref::<web_sys::TouchEvent>()?;
    let list = if released {
        touch_event.changed_touches()
    } else {
        touch_event.touches()
    };
    let touch = list.get(0)?;
    Some(PointerSample {
        x: f64::from(touch.client_x()),
        y: f64::from(touch.client_y()),
        time_ms,
    })
}

pub fn sample_from_mouse(event: &MouseEvent) -> PointerSample {
    let point = event.client_coordinates();
    PointerSample {
        x: point.x,
        y: point.y,
        time_ms: crate::clock::now_ms(),
    }
}

pub fn sample_from_touch(event: &TouchEvent) -> Option<PointerSample> {
    let touch = event.touches().into_iter().next()?;
    let point = touch.client_coordinates();
    Some(PointerSample {
        x: point.x,
        y: point.y,
        time_ms: crate::clock::now_ms(),
    })
}
