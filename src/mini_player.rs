use std::sync::LazyLock;

use dioxus::prelude::*;
use regex::Regex;

use crate::config::RuntimeConfig;
use crate::drag::use_draggable;
use crate::hooks::{sample_from_mouse, sample_from_touch};
use crate::wheel::Point;

pub const WINDOW_SIZE: (f64, f64) = (320.0, 200.0);
const YOUTUBE_ID_LEN: usize = 11;

static YOUTUBE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(youtu.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*")
        .expect("youtube link regex should compile")
});
static VIDFAST_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"vidfast\.[a-z]+/(movie/\d+|tv/\d+(?:/\d+/\d+)?)")
        .expect("vidfast link regex should compile")
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaSource {
    YouTube(String),
    /// `movie/<id>` or `tv/<id>[/<season>/<episode>]`.
    VidFast(String),
}

impl MediaSource {
    pub fn embed_url(&self, vidfast_base: &str) -> String {
        match self {
            MediaSource::YouTube(id) => format!("https://www.youtube.com/embed/{id}?autoplay=1"),
            MediaSource::VidFast(path) => {
                format!("{}/{path}?autoPlay=true", vidfast_base.trim_end_matches('/'))
            }
        }
    }
}

pub fn parse_media_link(input: &str) -> Option<MediaSource> {
    let input = input.trim();
    if let Some(path) = VIDFAST_LINK
        .captures(input)
        .and_then(|captures| captures.get(1))
    {
        return Some(MediaSource::VidFast(path.as_str().to_string()));
    }
    let captures = YOUTUBE_LINK.captures(input)?;
    let id = captures.get(2)?.as_str();
    (id.len() == YOUTUBE_ID_LEN).then(|| MediaSource::YouTube(id.to_string()))
}

#[component]
pub fn MiniPlayer() -> Element {
    let config = use_context::<RuntimeConfig>();
    let mut link = use_signal(String::new);
    let mut source = use_signal(|| None::<MediaSource>);
    let mut minimized = use_signal(|| false);
    let mut window = use_draggable(Point { x: 20.0, y: 20.0 }, Some(WINDOW_SIZE));

    let mut load = move || match parse_media_link(&link()) {
        Some(media) => {
            tracing::debug!("mini player: loading {media:?}");
            source.set(Some(media));
            minimized.set(false);
        }
        None => tracing::debug!("mini player: ignored link"),
    };

    let Some(media) = source() else {
        return rsx! {
            div { class: "mini-dock",
                span { class: "mini-logo", "▶" }
                input {
                    r#type: "text",
                    placeholder: "Paste YouTube Link...",
                    value: "{link}",
                    oninput: move |event| link.set(event.value()),
                    onkeydown: move |event| {
                        if event.key() == Key::Enter {
                            load();
                        }
                    },
                }
                button { onclick: move |_| load(), "[PLAY]" }
            }
        };
    };

    let style = window.style();
    if minimized() {
        return rsx! {
            div {
                class: "mini-bubble",
                style: "{style}",
                onmousedown: move |event| window.begin(sample_from_mouse(&event)),
                ontouchstart: move |event| {
                    if let Some(sample) = sample_from_touch(&event) {
                        window.begin(sample);
                    }
                },
                onclick: move |_| minimized.set(false),
                "▶"
            }
        };
    }

    let src = media.embed_url(&config.vidfast_base_url);
    let window_class = if window.is_dragging() {
        "mini-window is-dragging"
    } else {
        "mini-window"
    };
    rsx! {
        div { class: "{window_class}", style: "{style}",
            div {
                class: "mini-handle",
                onmousedown: move |event| window.begin(sample_from_mouse(&event)),
                ontouchstart: move |event| {
                    if let Some(sample) = sample_from_touch(&event) {
                        window.begin(sample);
                    }
                },
                span { "✥ MINI PLAYER" }
                div { class: "mini-actions",
                    button { onclick: move |_| minimized.set(true), "−" }
                    button {
                        onclick: move |_| {
                            source.set(None);
                            link.set(String::new());
                        },
                        "✕"
                    }
                }
            }
            div { class: "mini-video",
                iframe {
                    src: "{src}",
                    allow: "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture",
                    allowfullscreen: true,
                }
            }
            div { class: "mini-corner" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn youtube_links_need_an_eleven_character_id() {
        let id = "dQw4w9WgXcQ";
        for link in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?t=42",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
        ] {
            assert_eq!(parse_media_link(link), Some(MediaSource::YouTube(id.to_string())));
        }
        assert_eq!(parse_media_link("https://youtu.be/short"), None);
        assert_eq!(parse_media_link("not a link"), None);
        assert_eq!(parse_media_link(""), None);
    }

    #[test]
    fn link_patterns_compile() {
        assert!(YOUTUBE_LINK.is_match("https://youtu.be/dQw4w9WgXcQ"));
        assert!(VIDFAST_LINK.is_match("https://vidfast.pro/movie/1"));
    }

    #[test]
    fn legacy_youtube_path_forms_are_recognized() {
        let expected = Some(MediaSource::YouTube("dQw4w9WgXcQ".to_string()));
        assert_eq!(
            parse_media_link("https://www.youtube.com/v/dQw4w9WgXcQ?version=3"),
            expected
        );
        assert_eq!(
            parse_media_link("https://www.youtube.com/user/KrackedDev#p/u/1/dQw4w9WgXcQ"),
            expected
        );
        assert_eq!(parse_media_link("https://www.youtube.com/v/dQw4w9WgXc"), None);
    }

    #[test]
    fn other_media_links_are_ignored() {
        assert_eq!(
            parse_media_link(
                "https://soundcloud.com/leandros/kracked-anthem?si=4f2a9c1d&utm_source=clipboard"
            ),
            None
        );
        assert_eq!(parse_media_link("https://vidfast.pro/anime/12"), None);
    }

    #[test]
    fn vidfast_links_keep_their_path() {
        assert_eq!(
            parse_media_link("https://vidfast.pro/movie/533535"),
            Some(MediaSource::VidFast("movie/533535".to_string()))
        );
        let episode = parse_media_link("https://vidfast.pro/tv/1399/1/2?autoPlay=false");
        assert_eq!(episode, Some(MediaSource::VidFast("tv/1399/1/2".to_string())));
        assert_eq!(
            episode.map(|media| media.embed_url("https://vidfast.pro/")),
            Some("https://vidfast.pro/tv/1399/1/2?autoPlay=true".to_string())
        );
    }

    #[test]
    fn youtube_embed_autoplays() {
        assert_eq!(
            MediaSource::YouTube("dQw4w9WgXcQ".to_string()).embed_url("https://vidfast.pro"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1"
        );
    }
}
