use dioxus::prelude::*;

use crate::theme::ThemeMode;

pub fn variant(theme: ThemeMode) -> &'static str {
    theme.pick("default", "doodle", "console")
}

#[component]
pub fn Card(
    #[props(into)] title: String,
    theme: ThemeMode,
    #[props(default, into)] class: String,
    children: Element,
) -> Element {
    let variant = variant(theme);
    rsx! {
        div { class: "card card-{variant} {class}",
            h3 { class: "card-title", "{title}" }
            div { class: "card-body", {children} }
        }
    }
}

#[component]
pub fn Badge(theme: ThemeMode, children: Element) -> Element {
    let variant = variant(theme);
    rsx! {
        span { class: "badge badge-{variant}", {children} }
    }
}

/// `progress` is a percentage; values above 100 render as full.
#[component]
pub fn ProgressBar(progress: u8, #[props(into)] color: String, theme: ThemeMode) -> Element {
    let variant = variant(theme);
    let width = progress.min(100);
    rsx! {
        div { class: "progress progress-{variant}",
            div {
                class: "progress-fill",
                style: "width: {width}%; background: {color};",
            }
        }
    }
}
