use dioxus::prelude::*;
use dioxus::core::Task;
#[cfg(target_arch = "wasm32")]
use dioxus::web::WebEventExt;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use crate::clock::next_frame;
use crate::hooks::{sample_from_mouse, sample_from_touch, use_window_pointer};
use crate::nav::{index_of, NavItem, ViewId};
use crate::theme::ThemeMode;
use crate::wheel::{item_angle, item_opacity, Point, PointerSample, Release, Wheel, SELECTION_ANGLE};

struct Slot {
    index: usize,
    key: &'static str,
    angle: f64,
    counter_angle: f64,
    opacity: f64,
    is_active: bool,
    item: NavItem,
}

#[derive(Props, Clone, PartialEq)]
pub struct CircularNavProps {
    items: Vec<NavItem>,
    active: ViewId,
    on_select: EventHandler<ViewId>,
    on_rotation: EventHandler<(f64, bool)>,
    on_center_click: EventHandler<()>,
    theme: ThemeMode,
}

#[component]
pub fn CircularNav(props: CircularNavProps) -> Element {
    let CircularNavProps {
        items,
        active,
        on_select,
        on_rotation,
        on_center_click,
        theme,
    } = props;

    let mut wheel = use_signal(|| Wheel::new(items.len()));
    let mut current_items = use_signal(|| items.clone());
    let mut current_active = use_signal(|| active);
    let mut animation = use_signal(|| None::<Task>);
    let mut center_pressed = use_signal(|| false);
    #[allow(unused_mut)]
    let mut disc = use_signal(|| None::<web_sys::Element>);

    let mut emit_selection = move |index: usize| {
        let Some(id) = current_items.peek().get(index).map(|item| item.id) else {
            return;
        };
        if id != *current_active.peek() {
            current_active.set(id);
            on_select.call(id);
        }
    };

    let mut stop_animation = move || {
        if let Some(task) = animation.write().take() {
            task.cancel();
        }
    };

    let mut start_animation = move || {
        stop_animation();
        let task = spawn(async move {
            loop {
                next_frame().await;
                let step = wheel.write().step();
                if let Some(index) = step.selection {
                    emit_selection(index);
                }
                on_rotation.call((step.rotation, false));
                if step.finished {
                    break;
                }
            }
            animation.set(None);
        });
        animation.set(Some(task));
    };

    use_effect(use_reactive((&items, &active), move |(items, active)| {
        wheel.write().set_item_count(items.len());
        let index = index_of(&items, active);
        current_items.set(items);
        current_active.set(active);
        if let Some(index) = index {
            if wheel.write().sync_to(index) {
                tracing::debug!("wheel: follow external selection {index}");
                start_animation();
            }
        }
    }));

    let disc_center = move || -> Point {
        #[cfg(target_arch = "wasm32")]
        if let Some(element) = disc.peek().as_ref() {
            let rect = element.get_bounding_client_rect();
            return Point {
                x: rect.left() + rect.width() / 2.0,
                y: rect.top() + rect.height() / 2.0,
            };
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = disc;
        Point::default()
    };

    let mut begin_drag = move |sample: PointerSample| {
        stop_animation();
        let center = disc_center();
        wheel.write().begin_drag(center, sample);
        tracing::debug!("wheel: drag start");
        on_rotation.call((wheel.peek().rotation(), true));
    };

    let on_pointer_move = use_callback(move |sample: PointerSample| {
        if !wheel.peek().is_dragging() {
            return;
        }
        let update = wheel.write().drag_to(sample);
        if let Some(update) = update {
            on_rotation.call((update.rotation, true));
            if let Some(index) = update.closest {
                emit_selection(index);
            }
        }
    });
    let on_pointer_release = use_callback(move |sample: PointerSample| {
        if !wheel.peek().is_dragging() {
            return;
        }
        let release = wheel.write().release(sample);
        tracing::debug!("wheel: release {release:?}");
        match release {
            Release::Tap(index) | Release::Snap(index) => {
                emit_selection(index);
                start_animation();
            }
            Release::Inertia => start_animation(),
            Release::Ignored => on_rotation.call((wheel.peek().rotation(), false)),
        }
    });
    use_window_pointer(on_pointer_move, on_pointer_release);

    let rotation = wheel.read().rotation();
    let dragging = wheel.read().is_dragging();
    let count = items.len();
    let slots: Vec<Slot> = items
        .iter()
        .cloned()
        .enumerate()
        .map(|(index, item)| {
            let angle = item_angle(index, count);
            Slot {
                index,
                key: item.id.key(),
                angle,
                counter_angle: -rotation - angle,
                opacity: item_opacity(index, count, rotation),
                is_active: item.id == active,
                item,
            }
        })
        .collect();
    let theme_key = theme.as_str().to_lowercase();
    let disc_class = if dragging {
        format!("wheel-disc wheel-disc-{theme_key} is-dragging")
    } else {
        format!("wheel-disc wheel-disc-{theme_key}")
    };
    let hub_class = if center_pressed() {
        format!("wheel-hub wheel-hub-{theme_key} is-pressed")
    } else {
        format!("wheel-hub wheel-hub-{theme_key}")
    };

    rsx! {
        div { class: "wheel-anchor",
            div { class: "wheel-frame",
                div {
                    class: "wheel-selector",
                    style: "transform: rotate({SELECTION_ANGLE}deg);",
                    div { class: "wheel-selector-dot" }
                }
                div {
                    class: "{disc_class}",
                    style: "transform: rotate({rotation}deg);",
                    onmounted: move |_event| {
                        #[cfg(target_arch = "wasm32")]
                        {
                            let element = _event.data.as_ref().as_web_event();
                            if let Ok(node) = element.dyn_into::<web_sys::Element>() {
                                disc.set(Some(node));
                            }
                        }
                    },
                    onmousedown: move |event| begin_drag(sample_from_mouse(&event)),
                    ontouchstart: move |event| {
                        if let Some(sample) = sample_from_touch(&event) {
                            begin_drag(sample);
                        }
                    },
                    div { class: "wheel-rings" }
                    for slot in slots {
                        div {
                            key: "{slot.key}",
                            class: "wheel-slot",
                            style: "transform: rotate({slot.angle}deg); opacity: {slot.opacity};",
                            div {
                                class: "wheel-item",
                                onclick: move |event| {
                                    event.stop_propagation();
                                    emit_selection(slot.index);
                                    wheel.write().rotate_to_index(slot.index);
                                    start_animation();
                                },
                                div {
                                    class: if slot.is_active { "wheel-icon is-active" } else { "wheel-icon" },
                                    style: "transform: rotate({slot.counter_angle}deg);",
                                    "{slot.item.icon}"
                                }
                                span {
                                    class: if slot.is_active { "wheel-label is-active" } else { "wheel-label" },
                                    "{slot.item.label}"
                                }
                            }
                        }
                    }
                }
                div {
                    class: "{hub_class}",
                    onmousedown: move |event| {
                        event.stop_propagation();
                        center_pressed.set(true);
                    },
                    onmouseup: move |event| {
                        event.stop_propagation();
                        center_pressed.set(false);
                    },
                    onclick: move |event| {
                        event.stop_propagation();
                        on_center_click.call(());
                    },
                    ontouchstart: move |event| {
                        event.stop_propagation();
                        center_pressed.set(true);
                    },
                    ontouchend: move |event| {
                        event.stop_propagation();
                        event.prevent_default();
                        center_pressed.set(false);
                        on_center_click.call(());
                    },
                    span { class: "wheel-hub-text", "KRACKED\nDEV\nOS" }
                }
            }
        }
    }
}
