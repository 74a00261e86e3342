use dioxus::prelude::*;

use crate::config::RuntimeConfig;
use crate::theme::ThemeMode;
use crate::ui::Card;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cartridge {
    pub id: &'static str,
    pub title: &'static str,
    pub system: &'static str,
    pub rom_url: &'static str,
}

pub const SAMPLE_GAMES: [Cartridge; 3] = [
    Cartridge {
        id: "1",
        title: "Super Mario Bros",
        system: "NES",
        rom_url: "https://archive.org/download/super-mario-bros-nes/Super%20Mario%20Bros%20%28E%29.nes",
    },
    Cartridge {
        id: "2",
        title: "Sonic the Hedgehog",
        system: "SEGA GENESIS",
        rom_url: "games/sonic.md",
    },
    Cartridge {
        id: "3",
        title: "Doom",
        system: "DOS",
        rom_url: "games/doom.zip",
    },
];

pub fn emulator_src(emulator_url: &str, rom_url: &str) -> String {
    let separator = if emulator_url.contains('?') { '&' } else { '?' };
    format!(
        "{emulator_url}{separator}rom={}",
        urlencoding::encode(rom_url)
    )
}

#[component]
pub fn EmulatorFrame(#[props(into)] rom_url: String, game_name: Option<String>) -> Element {
    let config = use_context::<RuntimeConfig>();
    let src = emulator_src(&config.emulator_url, &rom_url);
    let name = game_name.unwrap_or_else(|| "Unknown Game".to_string());

    rsx! {
        div { class: "emu-frame",
            div { class: "emu-titlebar",
                span { "{name}" }
                span { class: "muted", "EMULATORJS v4.3" }
            }
            iframe {
                src: "{src}",
                allow: "autoplay; fullscreen; gamepad; microphone",
                title: "Emulator",
            }
        }
    }
}

#[component]
pub fn EmulatorView(theme: ThemeMode) -> Element {
    let mut selected = use_signal(|| None::<Cartridge>);
    let mut library_open = use_signal(|| false);

    let selected_id = selected().map(|game| game.id);
    let library_class = if library_open() {
        "emu-library is-open"
    } else {
        "emu-library"
    };

    rsx! {
        div { class: "emu-view",
            div { class: "emu-screen",
                match selected() {
                    Some(game) => rsx! {
                        div { class: "emu-running",
                            EmulatorFrame {
                                key: "{game.id}",
                                rom_url: game.rom_url,
                                game_name: game.title.to_string(),
                            }
                            div { class: "emu-mobile-info",
                                div {
                                    div { class: "strong small", "{game.title}" }
                                    div { class: "muted small", "{game.system}" }
                                }
                                button {
                                    class: "emu-stop",
                                    aria_label: "Stop Game",
                                    onclick: move |_| {
                                        tracing::debug!("arcade: stopped");
                                        selected.set(None);
                                    },
                                    "✕"
                                }
                            }
                        }
                    },
                    None => rsx! {
                        div { class: "emu-empty",
                            div { class: "emu-empty-icon pulse", "🎮" }
                            h2 { "No Cartridge Inserted" }
                            p { class: "muted",
                                span { class: "mobile-only", "Tap a game below to start playing." }
                                span { class: "desktop-only", "Select a game from the playlist to boot up the system." }
                            }
                            div { class: "emu-core-info",
                                h3 { "💿 CORE SYSTEM INFO" }
                                ul {
                                    li { "Engine: EmulatorJS v4.3" }
                                    li { "Cores: Libretro (RetroArch)" }
                                    li { "Render: WebGL 2.0" }
                                }
                            }
                        }
                    },
                }
            }
            button {
                class: "emu-library-toggle",
                aria_label: "Toggle Game Library",
                onclick: move |_| library_open.toggle(),
                if library_open() { "▾" } else { "🎮" }
            }
            div { class: "{library_class}",
                if library_open() {
                    div { class: "emu-backdrop", onclick: move |_| library_open.set(false) }
                }
                Card { title: "Cartridges", theme, class: "emu-cartridges",
                    div { class: "emu-list",
                        for game in SAMPLE_GAMES {
                            button {
                                key: "{game.id}",
                                class: if selected_id == Some(game.id) { "emu-cartridge is-selected" } else { "emu-cartridge" },
                                onclick: move |_| {
                                    tracing::info!("arcade: booting {}", game.title);
                                    selected.set(Some(game));
                                    library_open.set(false);
                                },
                                div { class: "strong", "{game.title}" }
                                div { class: "mono small", "{game.system}" }
                                if selected_id == Some(game.id) {
                                    div { class: "emu-led pulse" }
                                }
                            }
                        }
                    }
                    div { class: "emu-actions",
                        button { "⟳ SCAN" }
                        button { "🖥 CONFIG" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rom_url_is_percent_encoded() {
        assert_eq!(
            emulator_src("/emulator/index.html", "games/sonic.md"),
            "/emulator/index.html?rom=games%2Fsonic.md"
        );
        assert_eq!(
            emulator_src("https://emu.example/play?core=nes", "a b.nes"),
            "https://emu.example/play?core=nes&rom=a%20b.nes"
        );
    }

    #[test]
    fn library_lists_three_systems() {
        let systems: Vec<&str> = SAMPLE_GAMES.iter().map(|game| game.system).collect();
        assert_eq!(systems, vec!["NES", "SEGA GENESIS", "DOS"]);
    }
}
