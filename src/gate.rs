pub const GREETING: &str = "Greetings, aspirant. Identify yourself. What is the password?";
pub const HERESY_PREFIX: &str = "I sense heresy...";
pub const COMMUNITY_HINT: &str =
    "How about you join the community? Then tell me what the community name is.";
pub const MAX_HERESY: u8 = 6;
pub const REDEMPTION_THRESHOLD: u32 = 4;
pub const WAVEFORM_BARS: usize = 20;

const BASE_TYPING_MS: f64 = 50.0;
const TYPING_JITTER_MS: f64 = 10.0;
const PUNCTUATION_PAUSE_MS: f64 = 300.0;

pub const VALID_PASSWORDS: [&str; 14] = [
    "crack dev",
    "crack developer",
    "cracked dev",
    "cracked developer",
    "what password?",
    "what password",
    "what?",
    "what",
    "wut?",
    "wut",
    "i don't know",
    "i dont know",
    "i dunno",
    "idk",
];

const SUCCESS_MESSAGES: [&str; 7] = [
    "Welcome to KRACKED Dev.",
    "One mistake doesn't make you a failure.",
    "Two mistakes? Really? Welcome then.",
    "Three mistakes? As long you got in.",
    "At last! Phew! The Emperor protects!",
    "Oh my god! Really? Are you being welcomed here?",
    "You can just ask! Don't be afraid!",
];

const HERESY_ROASTS: [&str; 6] = [
    "Did you compile your brain with no optimization?",
    "Even a corrupted kernel boots faster than your thinking.",
    "The Machine Spirit rejects your input.",
    "sudo apt-get install brain-cells --fix-missing",
    "Your password file got corrupted by Chaos.",
    "Error 404: Intelligence not found.",
];

pub fn is_valid_password(input: &str) -> bool {
    let normalized = input.trim().to_lowercase();
    VALID_PASSWORDS.contains(&normalized.as_str())
}

pub fn success_message(mistakes: u32) -> &'static str {
    let index = (mistakes as usize).min(SUCCESS_MESSAGES.len() - 1);
    SUCCESS_MESSAGES[index]
}

pub fn heresy_roast(seed: f64) -> &'static str {
    let index = (seed.clamp(0.0, 0.999_999) * HERESY_ROASTS.len() as f64) as usize;
    HERESY_ROASTS[index.min(HERESY_ROASTS.len() - 1)]
}

pub fn is_power_key_valid(key: &str) -> bool {
    key.chars().count() > 10 && key.starts_with("AI")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateStep {
    PowerKey,
    AudioPermission,
    Calibrating,
    Chat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speaker {
    Aspirant,
    Magos,
}

impl Speaker {
    pub fn label(self) -> &'static str {
        match self {
            Speaker::Aspirant => ">> ASPIRANT",
            Speaker::Magos => ">> MAGOS LEANDROS",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GateReply {
    pub text: String,
    pub granted: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GateSession {
    pub mistakes: u32,
    pub heresy: u8,
    pub history: Vec<ChatMessage>,
}

impl GateSession {
    /// Judges one answer. Blank input yields no reply and leaves the
    /// session untouched. `seed` picks the roast for a wrong answer.
    pub fn submit(&mut self, input: &str, seed: f64) -> Option<GateReply> {
        if input.trim().is_empty() {
            return None;
        }
        self.history.push(ChatMessage {
            speaker: Speaker::Aspirant,
            text: input.to_string(),
        });

        let reply = if is_valid_password(input) {
            GateReply {
                text: success_message(self.mistakes).to_string(),
                granted: true,
            }
        } else {
            self.mistakes += 1;
            self.heresy = (self.heresy + 1).min(MAX_HERESY);
            let mut text = format!("{HERESY_PREFIX} {}", heresy_roast(seed));
            if self.mistakes >= REDEMPTION_THRESHOLD {
                text.push(' ');
                text.push_str(COMMUNITY_HINT);
            }
            GateReply {
                text,
                granted: false,
            }
        };

        self.push_reply(&reply.text);
        Some(reply)
    }

    pub fn push_reply(&mut self, text: &str) {
        self.history.push(ChatMessage {
            speaker: Speaker::Magos,
            text: text.to_string(),
        });
    }

    pub fn show_redemption(&self) -> bool {
        self.mistakes >= REDEMPTION_THRESHOLD
    }

    pub fn skulls(&self) -> String {
        "☠".repeat(self.heresy as usize)
    }

    pub fn screen_tinted(&self) -> bool {
        self.heresy > 0
    }

    pub fn frame_alarmed(&self) -> bool {
        self.heresy > 2
    }

    pub fn avatar_angry(&self) -> bool {
        self.heresy > 3
    }
}

pub fn typing_delay(ch: char, jitter: f64) -> f64 {
    let base = BASE_TYPING_MS + (jitter * 2.0 - 1.0) * TYPING_JITTER_MS;
    if matches!(ch, '.' | ',' | '!' | '?') {
        base + PUNCTUATION_PAUSE_MS
    } else {
        base
    }
}

pub fn downsample_bars(bins: &[u8], bars: usize) -> Vec<f64> {
    if bins.is_empty() {
        return vec![0.0; bars];
    }
    (0..bars)
        .map(|bar| {
            let index = (bar as f64 * (bins.len() as f64 / bars as f64)).floor() as usize;
            bins.get(index).copied().map_or(0.0, |value| f64::from(value) / 255.0)
        })
        .collect()
}

pub fn bar_height(level: f64) -> f64 {
    (level * 60.0).max(4.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn passwords_ignore_case_and_padding() {
        assert!(is_valid_password("  Cracked Developer "));
        assert!(is_valid_password("IDK"));
        assert!(is_valid_password("what?"));
        assert!(!is_valid_password("kracked dev"));
        assert!(!is_valid_password(""));
    }

    #[test]
    fn success_message_clamps() {
        assert_eq!(success_message(0), "Welcome to KRACKED Dev.");
        assert_eq!(success_message(2), "Two mistakes? Really? Welcome then.");
        assert_eq!(success_message(40), "You can just ask! Don't be afraid!");
    }

    #[test]
    fn power_key_needs_prefix_and_length() {
        assert!(is_power_key_valid("AIzaSy12345"));
        assert!(!is_power_key_valid("AIzaSy1234"));
        assert!(!is_power_key_valid("zaAISy123456"));
    }

    #[test]
    fn wrong_answers_raise_heresy_and_hint() {
        let mut session = GateSession::default();
        for _ in 0..3 {
            let reply = session.submit("open sesame", 0.0).unwrap();
            assert!(!reply.granted);
            assert_eq!(
                reply.text,
                "I sense heresy... Did you compile your brain with no optimization?"
            );
        }
        assert!(!session.show_redemption());
        let reply = session.submit("hunter2", 0.99).unwrap();
        assert_eq!(
            reply.text,
            format!("I sense heresy... Error 404: Intelligence not found. {COMMUNITY_HINT}")
        );
        assert!(session.show_redemption());
        assert!(session.avatar_angry());
        for _ in 0..5 {
            session.submit("nope", 0.5);
        }
        assert_eq!(session.heresy, MAX_HERESY);
        assert_eq!(session.mistakes, 9);
        assert_eq!(session.skulls(), "☠☠☠☠☠☠");
    }

    #[test]
    fn correct_answer_after_mistakes() {
        let mut session = GateSession::default();
        session.submit("guess", 0.2);
        let reply = session.submit("what password", 0.2).unwrap();
        assert_eq!(
            reply,
            GateReply {
                text: "One mistake doesn't make you a failure.".to_string(),
                granted: true
            }
        );
        assert_eq!(session.history.len(), 4);
        assert_eq!(session.history[2].speaker, Speaker::Aspirant);
        assert_eq!(session.heresy, 1);
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut session = GateSession::default();
        assert_eq!(session.submit("   ", 0.1), None);
        assert_eq!(session, GateSession::default());
    }

    #[test]
    fn typing_pauses_after_punctuation() {
        assert_eq!(typing_delay('a', 0.5), 50.0);
        assert_eq!(typing_delay('a', 0.0), 40.0);
        assert_eq!(typing_delay('?', 1.0), 360.0);
    }

    #[test]
    fn waveform_samples_evenly() {
        let bins: Vec<u8> = (0..32).map(|value| (value * 8) as u8).collect();
        let bars = downsample_bars(&bins, 4);
        assert_eq!(bars, vec![0.0, 64.0 / 255.0, 128.0 / 255.0, 192.0 / 255.0]);
        assert_eq!(downsample_bars(&[], 3), vec![0.0, 0.0, 0.0]);
        assert_eq!(bar_height(0.0), 4.0);
    }
}
