use dioxus::prelude::*;

use crate::clock::random_unit;
use crate::theme::ThemeMode;
use crate::ui::{variant, Card};

const NODE_COUNT: usize = 5;

#[derive(Clone, Copy, PartialEq)]
struct Blip {
    top: f64,
    left: f64,
    delay: f64,
}

#[component]
pub fn MapView(theme: ThemeMode) -> Element {
    let variant = variant(theme);
    // Placed once per mount so re-renders do not scatter the nodes.
    let blips = use_hook(|| {
        (0..NODE_COUNT)
            .map(|_| Blip {
                top: random_unit() * 80.0 + 10.0,
                left: random_unit() * 80.0 + 10.0,
                delay: random_unit() * 2.0,
            })
            .collect::<Vec<_>>()
    });

    rsx! {
        div { class: "view-full slide-up",
            Card {
                title: theme.pick("Global Map", "World Map", "Network Topology"),
                theme,
                div { class: "map map-{variant}",
                    div { class: "map-dots" }
                    div { class: "map-message",
                        div { class: "map-pin", "📍" }
                        h3 { class: "strong", "Map Unavailable" }
                        p { class: "muted small", "Geospatial data module is currently offline." }
                    }
                    for (index, blip) in blips.iter().enumerate() {
                        div {
                            key: "{index}",
                            class: "map-node pulse",
                            style: "top: {blip.top}%; left: {blip.left}%; animation-delay: {blip.delay}s;",
                        }
                    }
                }
            }
        }
    }
}
