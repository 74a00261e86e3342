use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::circular_nav::CircularNav;
use crate::clock::{local_time_label, random_unit};
use crate::drag::use_draggable;
use crate::hooks::use_window_pointer;
use crate::mini_player::MiniPlayer;
use crate::music::{dispatch, parse_volume, track_for, use_soundcloud_widget, PlayerState, WIDGET_IFRAME_ID};
use crate::nav::{active_color, nav_items, ViewId};
use crate::routes::Route;
use crate::sidebar::SchematicSidebar;
use crate::theme::{save_theme, ThemeMode};
use crate::views::ContentView;
use crate::wheel::{Point, PointerSample};

const TILT_DAMPING: f64 = 0.3;
#[cfg(target_arch = "wasm32")]
const CLOCK_TICK_MS: u32 = 1000;
const GLOW_BARS: usize = 20;
const DOODLE_BARS: usize = 10;
const SIDEBAR_START: Point = Point { x: 20.0, y: 260.0 };

pub fn page_tilt(rotation: f64, dragging: bool) -> f64 {
    if !dragging {
        return 0.0;
    }
    let mut wrapped = rotation % 360.0;
    if wrapped > 180.0 {
        wrapped -= 360.0;
    } else if wrapped <= -180.0 {
        wrapped += 360.0;
    }
    wrapped * TILT_DAMPING
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorEffects {
    pub blur: f64,
    pub scale: f64,
    pub opacity: f64,
}

pub fn door_effects(tilt: f64) -> DoorEffects {
    let tilt = tilt.abs();
    DoorEffects {
        blur: (tilt / 4.0).min(8.0),
        scale: (1.0 - tilt / 500.0).max(0.9),
        opacity: (1.0 - tilt / 90.0).max(0.4),
    }
}

fn door_style(tilt: f64, dragging: bool) -> String {
    let effects = door_effects(tilt);
    let transition = if dragging {
        "none"
    } else {
        "all 0.6s cubic-bezier(0.34, 1.56, 0.64, 1)"
    };
    format!(
        "transform: rotateY({tilt}deg) scale({}); filter: blur({}px); opacity: {}; transition: {transition};",
        effects.scale, effects.blur, effects.opacity
    )
}

#[cfg(target_arch = "wasm32")]
async fn tick_clock(mut clock: Signal<String>) {
    loop {
        crate::clock::sleep_ms(CLOCK_TICK_MS).await;
        clock.set(local_time_label());
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn tick_clock(_clock: Signal<String>) {}

#[derive(Clone, Copy, PartialEq)]
struct BarTiming {
    delay: f64,
    duration: f64,
}

fn bar_timings(count: usize, base_duration: f64) -> Vec<BarTiming> {
    (0..count)
        .map(|_| BarTiming {
            delay: random_unit() * 0.5,
            duration: base_duration + random_unit() * 0.4,
        })
        .collect()
}

#[component]
pub fn MainSystem() -> Element {
    let mut theme = use_context::<Signal<ThemeMode>>();
    let navigator = use_navigator();
    let mut active = use_signal(|| ViewId::Dashboard);
    let mut tilt = use_signal(|| 0.0f64);
    let mut dragging = use_signal(|| false);
    let mut pointer = use_signal(Point::default);
    let clock = use_signal(local_time_label);
    let mut player = use_signal(PlayerState::default);
    let mut sidebar_minimized = use_signal(|| false);
    let sidebar = use_draggable(SIDEBAR_START, None);
    let glow_bars = use_hook(|| bar_timings(GLOW_BARS, 0.3));
    let doodle_bars = use_hook(|| bar_timings(DOODLE_BARS, 0.4));

    use_soundcloud_widget(theme, player);

    use_future(move || tick_clock(clock));

    let spotlight = use_callback(move |sample: PointerSample| {
        if theme.peek().is_console() {
            pointer.set(Point {
                x: sample.x,
                y: sample.y,
            });
        }
    });
    let ignore_release = use_callback(|_sample: PointerSample| {});
    use_window_pointer(spotlight, ignore_release);

    let mut cycle_theme = move || {
        let next = theme.peek().next();
        tracing::info!("shell: theme {}", next.as_str());
        theme.set(next);
        save_theme(next);
    };

    let mode = theme();
    let styles = mode.styles();
    let items = nav_items(mode);
    let color = active_color(&items, active());
    let label = items
        .iter()
        .find(|item| item.id == active())
        .map(|item| item.label)
        .unwrap_or(active().key());
    let track = track_for(mode);
    let state = player();
    let slider = state.slider_value();
    let page_style = door_style(tilt(), dragging());
    let spot = pointer();
    let status_class = mode.pick("os-status", "os-status", "os-status is-inverted");
    let title_prefix = if mode.is_console() { ">> " } else { "" };
    let title_style = if mode == ThemeMode::Default {
        format!("background-image: linear-gradient(to right, {color}, white);")
    } else {
        String::new()
    };
    let bolt_color = if mode.is_console() { "#000" } else { color };
    let play_class = if state.playing {
        format!("{} is-active", styles.key_cap)
    } else {
        styles.key_cap.to_string()
    };

    rsx! {
        div { class: "screen {mode.class()}",
            div { class: "os {styles.os_border} {styles.background}",
                div { class: "{status_class}",
                    div { class: "os-status-left",
                        span { class: "desktop-only", "KRACKEDDEV_OS v3.0" }
                        span { class: "mobile-only", "OS v3" }
                        span { "MEM: 64TB" }
                    }
                    div { "{clock}" }
                }
                div { class: "os-viewport",
                    match mode {
                        ThemeMode::Default => rsx! {
                            div { class: "layer",
                                if state.playing {
                                    div { class: "glow-bars",
                                        for (index, bar) in glow_bars.iter().enumerate() {
                                            div {
                                                key: "{index}",
                                                class: "glow-bar bounce-visualizer",
                                                style: "animation-delay: {bar.delay}s; animation-duration: {bar.duration}s;",
                                            }
                                        }
                                    }
                                }
                                div { class: "glow", style: "background-color: {color};" }
                                div { class: "grid-lines" }
                            }
                        },
                        ThemeMode::Doodle => rsx! {
                            div { class: "layer",
                                if state.playing {
                                    div { class: "doodle-bars",
                                        for (index, bar) in doodle_bars.iter().enumerate() {
                                            div {
                                                key: "{index}",
                                                class: "doodle-bar bounce-visualizer",
                                                style: "animation-delay: {bar.delay}s; animation-duration: {bar.duration}s;",
                                            }
                                        }
                                    }
                                }
                            }
                        },
                        ThemeMode::Console => rsx! {
                            div { class: "layer",
                                div { class: "scanlines-white" }
                                div {
                                    class: "spotlight",
                                    style: "left: {spot.x}px; top: {spot.y}px;",
                                }
                            }
                        },
                    }
                    CircularNav {
                        items: items.clone(),
                        active: active(),
                        on_select: move |id: ViewId| {
                            tracing::debug!("shell: view {}", id.key());
                            active.set(id);
                        },
                        on_rotation: move |(rotation, is_dragging): (f64, bool)| {
                            tilt.set(page_tilt(rotation, is_dragging));
                            dragging.set(is_dragging);
                        },
                        on_center_click: move |_| cycle_theme(),
                        theme: mode,
                    }
                    if !sidebar_minimized() {
                        SchematicSidebar {
                            active: active(),
                            theme: mode,
                            window: sidebar,
                            on_minimize: move |_| sidebar_minimized.set(true),
                        }
                    }
                    div { class: "key-caps",
                        button {
                            class: "{play_class}",
                            title: if state.playing { "Pause" } else { "Play" },
                            onclick: move |_| dispatch(player.write().toggle_play()),
                            if state.playing { "❚❚" } else { "▶" }
                        }
                        a {
                            class: "{styles.key_cap}",
                            href: "{track.url}",
                            target: "_blank",
                            rel: "noopener noreferrer",
                            title: "Open track",
                            "♫"
                        }
                        button {
                            class: "{styles.key_cap}",
                            title: "Skip",
                            onclick: move |_| cycle_theme(),
                            "⏭"
                        }
                        button {
                            class: "{styles.key_cap}",
                            title: "Whiteboard",
                            onclick: move |_| {
                                navigator.push(Route::Whiteboard {});
                            },
                            "✎"
                        }
                        button {
                            class: "{styles.key_cap}",
                            title: "Arcade",
                            onclick: move |_| {
                                navigator.push(Route::Arcade {});
                            },
                            "🎮"
                        }
                    }
                    div { class: "stage",
                        main {
                            class: "page {styles.text} {styles.content_border}",
                            style: "{page_style}",
                            header { class: "page-header",
                                div {
                                    h1 { class: "page-title", style: "{title_style}",
                                        "{title_prefix}{label}"
                                        if mode.is_console() {
                                            span { class: "pulse", "_" }
                                        }
                                    }
                                    p { class: "muted small", "Level 12 Junior Developer • 2,450 XP" }
                                }
                                div { class: "streak",
                                    span { style: "color: {bolt_color};", "⚡" }
                                    span { class: "mono", "12 Streak" }
                                }
                            }
                            ContentView { view: active(), theme: mode }
                            div { class: "page-spacer" }
                        }
                    }
                }
                div { class: "os-footer {styles.footer}",
                    if sidebar_minimized() {
                        button {
                            class: "footer-tab",
                            onclick: move |_| sidebar_minimized.set(false),
                            "▴ "
                            span { class: "desktop-only", "System" }
                        }
                    }
                    iframe {
                        id: WIDGET_IFRAME_ID,
                        src: "{track.src}",
                        width: "100%",
                        height: "166",
                        allow: "autoplay",
                        class: "is-hidden",
                        title: "soundcloud-player",
                    }
                    div { class: "footer-visualizer",
                        if state.playing {
                            div { class: "mini-bars",
                                div { class: "mini-bar bounce-visualizer", style: "animation-duration: 0.4s;" }
                                div { class: "mini-bar bounce-visualizer", style: "animation-duration: 0.6s;" }
                                div { class: "mini-bar bounce-visualizer", style: "animation-duration: 0.5s;" }
                            }
                        } else {
                            "▶"
                        }
                    }
                    div { class: "footer-track",
                        span { class: "strong truncate", "{track.title}" }
                        span { class: "muted small truncate", "{track.artist}" }
                    }
                    div { class: "footer-controls",
                        input {
                            class: "volume",
                            r#type: "range",
                            min: "0",
                            max: "100",
                            value: "{slider}",
                            oninput: move |event| {
                                if let Some(volume) = parse_volume(&event.value()) {
                                    dispatch(player.write().set_volume(volume));
                                }
                            },
                        }
                        button {
                            class: "mute",
                            title: if state.muted { "Unmute" } else { "Mute" },
                            onclick: move |_| dispatch(player.write().toggle_mute()),
                            if state.muted { "🔇" } else { "🔊" }
                        }
                        div { class: "footer-state", if state.playing { "PLAYING" } else { "PAUSED" } }
                    }
                }
            }
            MiniPlayer {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tilt_is_flat_when_released() {
        assert_eq!(page_tilt(123.0, false), 0.0);
    }

    #[test]
    fn tilt_wraps_rotation_into_half_turns() {
        assert!((page_tilt(90.0, true) - 27.0).abs() < 1e-9);
        assert!((page_tilt(270.0, true) + 27.0).abs() < 1e-9);
        assert!((page_tilt(-270.0, true) - 27.0).abs() < 1e-9);
        assert!((page_tilt(540.0, true) - 54.0).abs() < 1e-9);
        assert!((page_tilt(-180.0, true) - 54.0).abs() < 1e-9);
    }

    #[test]
    fn door_effects_are_bounded() {
        assert_eq!(
            door_effects(0.0),
            DoorEffects {
                blur: 0.0,
                scale: 1.0,
                opacity: 1.0
            }
        );
        assert_eq!(
            door_effects(-80.0),
            DoorEffects {
                blur: 8.0,
                scale: 0.9,
                opacity: 0.4
            }
        );
        let mid = door_effects(20.0);
        assert_eq!(mid.blur, 5.0);
        assert!((mid.scale - 0.96).abs() < 1e-9);
        assert!((mid.opacity - (1.0 - 20.0 / 90.0)).abs() < 1e-9);
    }
}
