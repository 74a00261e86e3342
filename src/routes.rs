use dioxus::prelude::*;
use dioxus_router::{Link, Routable, Router};

use crate::config::{use_runtime_config, RuntimeConfig};
use crate::emulator::EmulatorView;
use crate::shell::MainSystem;
use crate::theme::{load_theme, ThemeMode};
use crate::welcome::Welcome;
use crate::whiteboard::CaliDraw;

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

#[component]
pub fn App() -> Element {
    let theme = use_context_provider(|| Signal::new(load_theme()));
    let mut authenticated = use_signal(|| false);
    let config_resource = use_runtime_config();
    let Some(config) = config_resource() else {
        return rsx! {
            document::Title { "KRACKED DEV OS" }
            div { class: "boot",
                h1 { class: "pulse", "BOOTING KRACKEDDEV_OS..." }
            }
        };
    };
    let soundcloud_api = config.soundcloud_api_url.clone();
    let theme_color = theme().pick("#0a0f1d", "#2b2b2b", "#ffffff");
    use_context_provider(|| config);

    rsx! {
        document::Title { "KRACKED DEV OS" }
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Meta { name: "theme-color", content: "{theme_color}" }
        script { src: "{soundcloud_api}", defer: true }
        if authenticated() {
            Router::<Route> {}
        } else {
            Welcome {
                on_success: move |_| {
                    tracing::info!("gate: session unlocked");
                    authenticated.set(true);
                },
            }
        }
    }
}

#[derive(Clone, PartialEq, Routable)]
pub enum Route {
    #[route("/")]
    Home {},
    #[route("/whiteboard")]
    Whiteboard {},
    #[route("/arcade")]
    Arcade {},
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

#[component]
fn Home() -> Element {
    rsx! {
        MainSystem {}
    }
}

#[component]
fn Whiteboard() -> Element {
    rsx! {
        CaliDraw {}
    }
}

#[component]
fn Arcade() -> Element {
    let theme = use_context::<Signal<ThemeMode>>();
    let mode = theme();
    rsx! {
        div { class: "screen arcade {mode.class()}",
            div { class: "arcade-bar",
                Link { to: Route::Home {}, class: "arcade-exit", "⏻ EXIT" }
                span { class: "arcade-title", "KRACKED ARCADE" }
            }
            EmulatorView { theme: mode }
        }
    }
}

#[component]
fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));
    let community = use_context::<RuntimeConfig>().community_url;
    rsx! {
        div { class: "screen not-found",
            h1 { "404 :: MODULE NOT FOUND" }
            p { class: "muted", "No module is mounted at {path}." }
            Link { to: Route::Home {}, "[ RETURN TO OS ]" }
            a { href: "{community}", target: "_blank", rel: "noopener noreferrer", "[ ASK THE COMMUNITY ]" }
        }
    }
}
