use dioxus::prelude::*;

use crate::drag::Draggable;
use crate::hooks::{sample_from_mouse, sample_from_touch};
use crate::nav::ViewId;
use crate::theme::ThemeMode;
use crate::ui::variant;

// The shell owns the position so it survives a minimize and restore.
#[component]
pub fn SchematicSidebar(
    active: ViewId,
    theme: ThemeMode,
    window: Draggable,
    on_minimize: EventHandler<()>,
) -> Element {
    let mut window = window;
    let variant = variant(theme);
    let style = window.style();
    let class = if window.is_dragging() {
        format!("schematic schematic-{variant} is-dragging")
    } else {
        format!("schematic schematic-{variant}")
    };

    rsx! {
        div { class: "{class}", style: "{style}",
            div {
                class: "schematic-head",
                onmousedown: move |event| window.begin(sample_from_mouse(&event)),
                ontouchstart: move |event| {
                    if let Some(sample) = sample_from_touch(&event) {
                        window.begin(sample);
                    }
                },
                div { class: "schematic-tag", "✥ // SYSTEM_STATUS" }
                button {
                    class: "schematic-minimize",
                    title: "Minimize",
                    onmousedown: move |event| event.stop_propagation(),
                    onclick: move |event| {
                        event.stop_propagation();
                        on_minimize.call(());
                    },
                    "−"
                }
            }
            div { class: "schematic-module", "MODULE: {active.key()}" }
            div { class: "schematic-text", "{active.description()}" }
            div { class: "schematic-rule",
                div { class: "rule-long" }
                div { class: "rule-short" }
            }
            div { class: "schematic-meta",
                span { "LAT: 12ms" }
                span { "SYNC: OK" }
            }
        }
    }
}
