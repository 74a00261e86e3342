use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};

const THEME_STORAGE_KEY: &str = "kracked.theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThemeMode {
    #[default]
    Default,
    Doodle,
    Console,
}

impl ThemeMode {
    pub fn next(self) -> Self {
        match self {
            ThemeMode::Default => ThemeMode::Doodle,
            ThemeMode::Doodle => ThemeMode::Console,
            ThemeMode::Console => ThemeMode::Default,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Default => "DEFAULT",
            ThemeMode::Doodle => "DOODLE",
            ThemeMode::Console => "CONSOLE",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            ThemeMode::Default => "theme-default",
            ThemeMode::Doodle => "theme-doodle",
            ThemeMode::Console => "theme-console",
        }
    }

    pub fn is_console(self) -> bool {
        self == ThemeMode::Console
    }

    pub fn styles(self) -> ThemeStyles {
        match self {
            ThemeMode::Doodle => ThemeStyles {
                background: "bg-doodle pencil-grid",
                text: "text-white font-doodle",
                os_border: "os-border-doodle",
                key_cap: "key-cap key-cap-white",
                footer: "footer-doodle",
                content_border: "content-border-doodle",
            },
            ThemeMode::Console => ThemeStyles {
                background: "bg-console",
                text: "text-black font-console",
                os_border: "os-border-console",
                key_cap: "key-cap key-cap-white key-cap-outlined",
                footer: "footer-console",
                content_border: "content-border-console",
            },
            ThemeMode::Default => ThemeStyles {
                background: "bg-kraken-dark",
                text: "text-white font-sans",
                os_border: "os-border-default",
                key_cap: "key-cap key-cap-dark",
                footer: "footer-default",
                content_border: "content-border-default",
            },
        }
    }

    pub fn pick<T>(self, default: T, doodle: T, console: T) -> T {
        match self {
            ThemeMode::Default => default,
            ThemeMode::Doodle => doodle,
            ThemeMode::Console => console,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeStyles {
    pub background: &'static str,
    pub text: &'static str,
    pub os_border: &'static str,
    pub key_cap: &'static str,
    pub footer: &'static str,
    pub content_border: &'static str,
}

pub fn load_theme() -> ThemeMode {
    LocalStorage::get(THEME_STORAGE_KEY).unwrap_or_default()
}

pub fn save_theme(theme: ThemeMode) {
    if let Err(err) = LocalStorage::set(THEME_STORAGE_KEY, theme) {
        tracing::debug!("theme not persisted: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cycles_through_all_three_skins() {
        let mut theme = ThemeMode::Default;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(theme);
            theme = theme.next();
        }
        assert_eq!(
            seen,
            vec![
                ThemeMode::Default,
                ThemeMode::Doodle,
                ThemeMode::Console,
                ThemeMode::Default
            ]
        );
    }

    #[test]
    fn stored_value_uses_uppercase_names() {
        assert_eq!(serde_json::to_string(&ThemeMode::Doodle).unwrap(), "\"DOODLE\"");
        let parsed: ThemeMode = serde_json::from_str("\"CONSOLE\"").unwrap();
        assert_eq!(parsed, ThemeMode::Console);
        assert!(serde_json::from_str::<ThemeMode>("\"RETRO\"").is_err());
    }

    #[test]
    fn pick_follows_theme() {
        assert_eq!(ThemeMode::Doodle.pick("a", "b", "c"), "b");
        assert_eq!(ThemeMode::Console.pick(1, 2, 3), 3);
    }
}
