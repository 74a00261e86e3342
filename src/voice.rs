use dioxus::prelude::*;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RecognitionEvent {
    Final { text: String },
    Interrupt,
    Error { message: String },
    Unsupported,
}

pub async fn speak(text: &str) -> Result<(), String> {
    let text = serde_json::to_string(text).map_err(|err| err.to_string())?;
    let script = format!(
        r#"
        const synth = window.speechSynthesis;
        if (!synth || typeof SpeechSynthesisUtterance === "undefined") {{
            dioxus.send("unsupported");
        }} else {{
            synth.cancel();
            const utterance = new SpeechSynthesisUtterance({text});
            utterance.rate = 0.9;
            utterance.pitch = 0.8;
            const voices = synth.getVoices();
            const voice = voices.find(v => v.name.includes("Google UK English Male")
                    || (v.lang === "en-GB" && v.name.toLowerCase().includes("male")))
                || voices.find(v => v.lang === "en-GB")
                || voices[0];
            if (voice) {{
                utterance.voice = voice;
            }}
            utterance.onend = () => dioxus.send("end");
            utterance.onerror = () => dioxus.send("end");
            synth.speak(utterance);
        }}
        "#
    );
    let mut eval = document::eval(&script);
    let outcome = eval
        .recv::<String>()
        .await
        .map_err(|err| format!("speech bridge failed: {err:?}"))?;
    if outcome == "unsupported" {
        return Err("speech synthesis unavailable".to_string());
    }
    Ok(())
}

pub fn cancel_speech() {
    let _ = document::eval("if (window.speechSynthesis) { window.speechSynthesis.cancel(); }");
}

pub async fn listen(mut on_event: impl FnMut(RecognitionEvent)) -> Result<(), String> {
    let script = r#"
        const Recognition = window.SpeechRecognition || window.webkitSpeechRecognition;
        if (!Recognition) {
            dioxus.send({ kind: "unsupported" });
        } else {
            const recognition = new Recognition();
            window.__kracked_recognition = recognition;
            recognition.continuous = true;
            recognition.interimResults = true;
            const interrupt = () => {
                if (window.speechSynthesis && window.speechSynthesis.speaking) {
                    window.speechSynthesis.cancel();
                    dioxus.send({ kind: "interrupt" });
                }
            };
            recognition.onstart = interrupt;
            recognition.onresult = (event) => {
                interrupt();
                let text = "";
                for (let i = event.resultIndex; i < event.results.length; ++i) {
                    if (event.results[i].isFinal) {
                        text += event.results[i][0].transcript;
                    }
                }
                if (text) {
                    dioxus.send({ kind: "final", text });
                }
            };
            recognition.onerror = (event) => dioxus.send({ kind: "error", message: String(event.error) });
            recognition.onend = () => dioxus.send({ kind: "error", message: "ended" });
            recognition.start();
        }
    "#;
    let mut eval = document::eval(script);
    loop {
        let event = eval
            .recv::<RecognitionEvent>()
            .await
            .map_err(|err| format!("recognition bridge failed: {err:?}"))?;
        let done = matches!(
            event,
            RecognitionEvent::Error { .. } | RecognitionEvent::Unsupported
        );
        on_event(event);
        if done {
            return Ok(());
        }
    }
}

pub fn stop_listening() {
    let _ = document::eval("if (window.__kracked_recognition) { window.__kracked_recognition.stop(); }");
}

pub async fn stream_microphone(mut on_frame: impl FnMut(Vec<u8>)) -> Result<(), String> {
    let script = r#"
        (async () => {
            try {
                const Context = window.AudioContext || window.webkitAudioContext;
                window.__kracked_audio = window.__kracked_audio || new Context();
                const stream = await navigator.mediaDevices.getUserMedia({ audio: true });
                const analyser = window.__kracked_audio.createAnalyser();
                analyser.fftSize = 64;
                window.__kracked_audio.createMediaStreamSource(stream).connect(analyser);
                const data = new Uint8Array(analyser.frequencyBinCount);
                const tick = () => {
                    analyser.getByteFrequencyData(data);
                    dioxus.send(Array.from(data));
                    requestAnimationFrame(tick);
                };
                tick();
            } catch (err) {
                dioxus.send(null);
            }
        })();
    "#;
    let mut eval = document::eval(script);
    loop {
        let frame = eval
            .recv::<Option<Vec<u8>>>()
            .await
            .map_err(|err| format!("microphone bridge failed: {err:?}"))?;
        match frame {
            Some(bins) => on_frame(bins),
            None => return Err("microphone unavailable".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn recognition_events_decode_from_bridge_json() {
        let event: RecognitionEvent =
            serde_json::from_str(r#"{"kind":"final","text":"cracked dev"}"#).unwrap();
        assert_eq!(
            event,
            RecognitionEvent::Final {
                text: "cracked dev".to_string()
            }
        );
        let event: RecognitionEvent = serde_json::from_str(r#"{"kind":"interrupt"}"#).unwrap();
        assert_eq!(event, RecognitionEvent::Interrupt);
    }
}
