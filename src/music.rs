use dioxus::prelude::*;
use dioxus::core::Task;

use crate::theme::ThemeMode;

pub const WIDGET_IFRAME_ID: &str = "sc-widget";
const WIDGET_BIND_ATTEMPTS: u32 = 10;
const WIDGET_RETRY_MS: u32 = 500;
const UNMUTE_FALLBACK_VOLUME: u8 = 50;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Track {
    pub src: &'static str,
    pub title: &'static str,
    pub artist: &'static str,
    pub url: &'static str,
}

pub fn track_for(theme: ThemeMode) -> Track {
    match theme {
        ThemeMode::Default => Track {
            src: "https://w.soundcloud.com/player/?url=https%3A//api.soundcloud.com/tracks/1253288662&color=%23443424&auto_play=false&hide_related=false&show_comments=true&show_user=true&show_reposts=false&show_teaser=true&visual=true",
            title: "What if The Strokes covered As It Was",
            artist: "ojc",
            url: "https://soundcloud.com/oscar-cannon-147192226/what-if-the-strokes-covered-as",
        },
        ThemeMode::Doodle => Track {
            src: "https://w.soundcloud.com/player/?url=https%3A//api.soundcloud.com/tracks/2184250927&color=%23443424&auto_play=false&hide_related=false&show_comments=true&show_user=true&show_reposts=false&show_teaser=true&visual=true",
            title: "The Good News, ft. Packed Rich",
            artist: "Chillhop Music",
            url: "https://soundcloud.com/chillhopdotcom/the-good-news-ft-packed-rich",
        },
        ThemeMode::Console => Track {
            src: "https://w.soundcloud.com/player/?url=https%3A//api.soundcloud.com/tracks/194878233&color=%23443424&auto_play=false&hide_related=false&show_comments=true&show_user=true&show_reposts=false&show_teaser=true&visual=true",
            title: "Whiplash | John Wasson - Caravan",
            artist: "GoodDay Motion & Waves",
            url: "https://soundcloud.com/goodday-3/whiplash-john-wasson-caravan-1",
        },
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetCommand {
    Toggle,
    SetVolume(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerState {
    pub playing: bool,
    pub muted: bool,
    pub volume: u8,
    pub widget_ready: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            playing: false,
            muted: false,
            volume: 100,
            widget_ready: false,
        }
    }
}

impl PlayerState {
    pub fn toggle_play(&mut self) -> Option<WidgetCommand> {
        if !self.widget_ready {
            return None;
        }
        self.playing = !self.playing;
        Some(WidgetCommand::Toggle)
    }

    pub fn toggle_mute(&mut self) -> Option<WidgetCommand> {
        if !self.widget_ready {
            return None;
        }
        if self.muted {
            if self.volume == 0 {
                self.volume = UNMUTE_FALLBACK_VOLUME;
            }
            self.muted = false;
            Some(WidgetCommand::SetVolume(self.volume))
        } else {
            self.muted = true;
            Some(WidgetCommand::SetVolume(0))
        }
    }

    pub fn set_volume(&mut self, volume: u8) -> Option<WidgetCommand> {
        let volume = volume.min(100);
        self.volume = volume;
        if volume == 0 {
            self.muted = true;
        } else if self.muted {
            self.muted = false;
        }
        self.widget_ready.then_some(WidgetCommand::SetVolume(volume))
    }

    pub fn slider_value(&self) -> u8 {
        if self.muted {
            0
        } else {
            self.volume
        }
    }

    pub fn finished(&mut self) {
        self.playing = false;
    }

    /// The iframe reloads on a theme change, so the old binding is stale.
    pub fn track_changed(&mut self) {
        self.playing = false;
        self.widget_ready = false;
    }
}

pub fn parse_volume(raw: &str) -> Option<u8> {
    raw.trim().parse::<u8>().ok().map(|value| value.min(100))
}

pub fn use_soundcloud_widget(theme: Signal<ThemeMode>, mut player: Signal<PlayerState>) {
    let mut listener = use_signal(|| None::<Task>);

    use_effect(move || {
        let theme = theme();
        player.write().track_changed();
        if let Some(task) = listener.write().take() {
            task.cancel();
        }
        tracing::debug!("music: bind widget for {}", theme.as_str());
        let task = spawn(async move {
            if let Err(err) = watch_widget(player).await {
                tracing::warn!("music: {err}");
            }
        });
        listener.set(Some(task));
    });
}

async fn watch_widget(mut player: Signal<PlayerState>) -> Result<(), String> {
    let id = serde_json::to_string(WIDGET_IFRAME_ID).map_err(|err| err.to_string())?;
    for _ in 0..WIDGET_BIND_ATTEMPTS {
        crate::clock::sleep_ms(WIDGET_RETRY_MS).await;
        let script = format!(
            r#"
            const frame = document.getElementById({id});
            if (!frame || !window.SC || !window.SC.Widget) {{
                dioxus.send("missing");
            }} else {{
                const widget = window.SC.Widget(frame);
                window.__kracked_sc = widget;
                widget.bind(window.SC.Widget.Events.READY, () => dioxus.send("ready"));
                widget.bind(window.SC.Widget.Events.FINISH, () => dioxus.send("finish"));
                dioxus.send("bound");
            }}
            "#
        );
        let mut eval = document::eval(&script);
        let first = eval
            .recv::<String>()
            .await
            .map_err(|err| format!("widget bridge failed: {err:?}"))?;
        if first == "missing" {
            continue;
        }
        player.write().widget_ready = true;
        while let Ok(message) = eval.recv::<String>().await {
            match message.as_str() {
                "finish" => player.write().finished(),
                "ready" => tracing::debug!("music: widget ready"),
                other => tracing::debug!("music: widget sent {other}"),
            }
        }
        return Ok(());
    }
    Err("soundcloud widget unavailable".to_string())
}

pub async fn send_command(command: WidgetCommand) -> Result<(), String> {
    let call = match command {
        WidgetCommand::Toggle => "widget.toggle();".to_string(),
        WidgetCommand::SetVolume(volume) => format!("widget.setVolume({volume});"),
    };
    let script = format!(
        r#"
        const widget = window.__kracked_sc;
        if (widget) {{ {call} }}
        "#
    );
    document::eval(&script)
        .await
        .map_err(|err| format!("eval failed: {err:?}"))?;
    Ok(())
}

pub fn dispatch(command: Option<WidgetCommand>) {
    if let Some(command) = command {
        spawn(async move {
            if let Err(err) = send_command(command).await {
                tracing::warn!("music: {err}");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bound() -> PlayerState {
        PlayerState {
            widget_ready: true,
            ..PlayerState::default()
        }
    }

    #[test]
    fn toggle_requires_widget() {
        let mut state = PlayerState::default();
        assert_eq!(state.toggle_play(), None);
        assert!(!state.playing);

        let mut state = bound();
        assert_eq!(state.toggle_play(), Some(WidgetCommand::Toggle));
        assert!(state.playing);
        state.finished();
        assert!(!state.playing);
    }

    #[test]
    fn unmute_restores_fallback_when_volume_was_zero() {
        let mut state = bound();
        state.set_volume(0);
        assert!(state.muted);
        assert_eq!(state.toggle_mute(), Some(WidgetCommand::SetVolume(50)));
        assert_eq!(state.volume, 50);
        assert!(!state.muted);
    }

    #[test]
    fn mute_keeps_stored_volume() {
        let mut state = bound();
        state.set_volume(70);
        assert_eq!(state.toggle_mute(), Some(WidgetCommand::SetVolume(0)));
        assert_eq!(state.slider_value(), 0);
        assert_eq!(state.toggle_mute(), Some(WidgetCommand::SetVolume(70)));
        assert_eq!(state.slider_value(), 70);
    }

    #[test]
    fn slider_unmutes_and_records_without_widget() {
        let mut state = PlayerState {
            muted: true,
            ..PlayerState::default()
        };
        assert_eq!(state.set_volume(30), None);
        assert!(!state.muted);
        assert_eq!(state.volume, 30);
        assert_eq!(parse_volume(" 140 "), Some(100));
        assert_eq!(parse_volume("loud"), None);
    }

    #[test]
    fn track_change_pauses() {
        let mut state = bound();
        state.toggle_play();
        state.track_changed();
        assert!(!state.playing);
        assert!(!state.widget_ready);
        assert_eq!(track_for(ThemeMode::Doodle).artist, "Chillhop Music");
    }
}
