use dioxus::prelude::*;
use dioxus::core::Task;

use crate::avatar::LeandrosAvatar;
use crate::clock::{random_unit, sleep_ms};
use crate::config::RuntimeConfig;
use crate::gate::{
    bar_height, downsample_bars, is_power_key_valid, typing_delay, GateSession, GateStep,
    Speaker, GREETING, WAVEFORM_BARS,
};
use crate::voice::{self, RecognitionEvent};

const CALIBRATION_MS: u32 = 2000;

#[component]
pub fn Welcome(on_success: EventHandler<()>) -> Element {
    let config = use_context::<RuntimeConfig>();
    let mut step = use_signal(|| GateStep::PowerKey);
    let mut power_key = use_signal(String::new);
    let mut session = use_signal(GateSession::default);
    let mut input = use_signal(String::new);
    let mut displayed = use_signal(String::new);
    let mut typing = use_signal(|| false);
    let mut speaking = use_signal(|| false);
    let mut listening = use_signal(|| false);
    let mut audio_enabled = use_signal(|| false);
    let mut waveform = use_signal(|| vec![0.0f64; WAVEFORM_BARS]);
    let mut output_task = use_signal(|| None::<Task>);
    let mut microphone_task = use_signal(|| None::<Task>);
    let mut speech_task = use_signal(|| None::<Task>);
    let mut listen_task = use_signal(|| None::<Task>);

    use_drop(|| {
        voice::cancel_speech();
        voice::stop_listening();
    });

    let mut speak_and_type = move |text: String| {
        if let Some(task) = output_task.write().take() {
            task.cancel();
        }
        // A new utterance cancels the old one, whose `end` must not finish this reply.
        if let Some(task) = speech_task.write().take() {
            task.cancel();
        }
        typing.set(true);
        displayed.set(String::new());
        let voiced = *audio_enabled.peek();
        if voiced {
            speaking.set(true);
            let spoken = text.clone();
            let task = spawn(async move {
                if let Err(err) = voice::speak(&spoken).await {
                    tracing::debug!("gate: {err}");
                }
                speaking.set(false);
                displayed.set(spoken);
                typing.set(false);
                speech_task.set(None);
            });
            speech_task.set(Some(task));
        }
        let task = spawn(async move {
            for ch in text.chars() {
                displayed.write().push(ch);
                sleep_ms(typing_delay(ch, random_unit()) as u32).await;
            }
            if !voiced {
                typing.set(false);
            }
        });
        output_task.set(Some(task));
    };

    use_effect(move || {
        match step() {
            GateStep::Calibrating => {
                spawn(async move {
                    sleep_ms(CALIBRATION_MS).await;
                    tracing::debug!("gate: calibration done");
                    step.set(GateStep::Chat);
                });
            }
            GateStep::Chat if session.peek().history.is_empty() => {
                session.write().push_reply(GREETING);
                speak_and_type(GREETING.to_string());
            }
            _ => {}
        }
    });

    let mut send_message = move || {
        let value = input();
        let Some(reply) = session.write().submit(&value, random_unit()) else {
            return;
        };
        input.set(String::new());
        if reply.granted {
            tracing::info!("gate: access granted");
        } else {
            tracing::info!("gate: heresy level {}", session.peek().heresy);
        }
        speak_and_type(reply.text);
        if reply.granted {
            on_success.call(());
        }
    };

    let mut toggle_listening = move || {
        if let Some(task) = listen_task.write().take() {
            task.cancel();
        }
        if listening() {
            listening.set(false);
            voice::stop_listening();
            return;
        }
        listening.set(true);
        let task = spawn(async move {
            let result = voice::listen(move |event| match event {
                RecognitionEvent::Final { text } => {
                    let next = format!("{} {}", input.peek(), text);
                    input.set(next);
                }
                RecognitionEvent::Interrupt => {
                    if let Some(task) = output_task.write().take() {
                        task.cancel();
                    }
                    speaking.set(false);
                    typing.set(false);
                }
                RecognitionEvent::Error { message } => {
                    tracing::debug!("gate: recognition stopped: {message}");
                }
                RecognitionEvent::Unsupported => {
                    tracing::warn!("gate: speech recognition unavailable");
                }
            })
            .await;
            if let Err(err) = result {
                tracing::warn!("gate: {err}");
            }
            listening.set(false);
            listen_task.set(None);
        });
        listen_task.set(Some(task));
        if audio_enabled() && microphone_task.peek().is_none() {
            let task = spawn(async move {
                let result = voice::stream_microphone(move |bins| {
                    waveform.set(downsample_bars(&bins, WAVEFORM_BARS));
                })
                .await;
                if let Err(err) = result {
                    tracing::warn!("gate: {err}");
                }
            });
            microphone_task.set(Some(task));
        }
    };

    let key_valid = is_power_key_valid(&power_key());
    let state = session.read();
    let heresy = state.heresy;
    let screen_class = if state.screen_tinted() {
        "gate-screen is-tinted"
    } else {
        "gate-screen"
    };
    let frame_class = if state.frame_alarmed() {
        "gate-window is-alarmed"
    } else {
        "gate-window"
    };
    let led_class = if key_valid { "gate-led is-online" } else { "gate-led" };
    let skulls = state.skulls();
    let show_redemption = state.show_redemption();
    let angry = state.avatar_angry();
    let last_index = state.history.len().saturating_sub(1);
    let messages: Vec<(usize, Speaker, String, bool)> = state
        .history
        .iter()
        .enumerate()
        .map(|(index, message)| {
            let live = index == last_index && message.speaker == Speaker::Magos && typing();
            let text = if live {
                displayed()
            } else {
                message.text.clone()
            };
            (index, message.speaker, text, live)
        })
        .collect();
    drop(state);
    let bars: Vec<f64> = waveform().into_iter().map(bar_height).collect();
    let community_url = config.community_url.clone();

    rsx! {
        div { class: "{screen_class}",
            if heresy > 0 {
                div { class: "gate-heresy-overlay" }
            }
            div { class: "{frame_class}",
                div { class: "gate-header",
                    span { "KRACKED DEV :: AUTH SYSTEM v1.0" }
                    div {
                        class: "{led_class}",
                        title: if key_valid { "API Online" } else { "API Offline" },
                    }
                }
                div { class: "gate-body",
                    match step() {
                        GateStep::PowerKey => rsx! {
                            div { class: "gate-step",
                                div { class: "gate-glyph pulse", "⚙" }
                                h2 { "INITIALIZING COGITATOR..." }
                                p { class: "muted", "Machine Spirit requires authentication key." }
                                div { class: "gate-key-box",
                                    label { "Put Power key here" }
                                    div { class: "gate-key-row",
                                        input {
                                            r#type: "password",
                                            placeholder: "AIzaSy...",
                                            value: "{power_key}",
                                            oninput: move |event| power_key.set(event.value()),
                                        }
                                        div { class: if key_valid { "gate-dot is-online" } else { "gate-dot" } }
                                    }
                                }
                                button {
                                    class: "gate-button",
                                    disabled: !key_valid,
                                    onclick: move |_| step.set(GateStep::AudioPermission),
                                    "[ INITIATE RITE ]"
                                }
                            }
                        },
                        GateStep::AudioPermission => rsx! {
                            div { class: "gate-step",
                                div { class: "gate-glyph bounce", "🔊" }
                                h2 { "VOX MODULE REQUIRED" }
                                p { class: "muted", "Enable audio sensors for optimal interrogation?" }
                                div { class: "gate-choice",
                                    button {
                                        class: "gate-button is-go",
                                        onclick: move |_| {
                                            audio_enabled.set(true);
                                            step.set(GateStep::Calibrating);
                                        },
                                        "[ ENABLE VOX ]"
                                    }
                                    button {
                                        class: "gate-button is-stop",
                                        onclick: move |_| {
                                            audio_enabled.set(false);
                                            step.set(GateStep::Calibrating);
                                        },
                                        "[ SILENCE ]"
                                    }
                                }
                            }
                        },
                        GateStep::Calibrating => rsx! {
                            div { class: "gate-step",
                                div { class: "gate-progress",
                                    div { class: "gate-progress-fill" }
                                }
                                p { class: "pulse", "CALIBRATING SENSORS..." }
                            }
                        },
                        GateStep::Chat => rsx! {
                            div { class: "gate-chat",
                                div { class: "gate-chat-top",
                                    LeandrosAvatar { speaking: speaking(), angry }
                                }
                                div { class: "gate-log",
                                    for (index, speaker, text, live) in messages {
                                        div {
                                            key: "{index}",
                                            class: if speaker == Speaker::Aspirant { "gate-message is-aspirant" } else { "gate-message" },
                                            span { class: "gate-speaker", "{speaker.label()}" }
                                            "{text}"
                                            if live {
                                                span { class: "pulse", "█" }
                                            }
                                        }
                                    }
                                }
                                div { class: "gate-waveform",
                                    for (index, height) in bars.into_iter().enumerate() {
                                        div {
                                            key: "{index}",
                                            class: if heresy > 0 { "gate-bar is-heretic" } else { "gate-bar" },
                                            style: "height: {height}px;",
                                        }
                                    }
                                }
                                div { class: "gate-input-row",
                                    button {
                                        class: if listening() { "gate-mic is-listening" } else { "gate-mic" },
                                        title: if listening() { "Stop Listening" } else { "Start Listening" },
                                        onclick: move |_| toggle_listening(),
                                        "🎙"
                                    }
                                    input {
                                        class: "gate-input",
                                        r#type: "text",
                                        placeholder: "Type your response...",
                                        value: "{input}",
                                        oninput: move |event| input.set(event.value()),
                                        onkeydown: move |event| {
                                            if event.key() == Key::Enter {
                                                event.prevent_default();
                                                send_message();
                                            }
                                        },
                                    }
                                    button {
                                        class: "gate-send",
                                        disabled: input().trim().is_empty() && !listening(),
                                        onclick: move |_| send_message(),
                                        "➤"
                                    }
                                }
                                if heresy > 0 {
                                    div { class: "gate-heresy",
                                        span { "HERESY LEVEL: {skulls}" }
                                        if show_redemption {
                                            a {
                                                href: "{community_url}",
                                                target: "_blank",
                                                rel: "noopener noreferrer",
                                                "[ SEEK REDEMPTION ]"
                                            }
                                        }
                                    }
                                }
                            }
                        },
                    }
                }
            }
        }
    }
}
