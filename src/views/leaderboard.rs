use dioxus::prelude::*;

use crate::theme::ThemeMode;
use crate::ui::{variant, Card};

const PODIUM: u32 = 3;

struct Contender {
    rank: u32,
    name: &'static str,
    xp: u64,
    role: &'static str,
}

const CONTENDERS: [Contender; 5] = [
    Contender { rank: 1, name: "Sarah Connor", xp: 15420, role: "Senior Dev" },
    Contender { rank: 2, name: "John Doe", xp: 12350, role: "Full Stack" },
    Contender { rank: 3, name: "Jane Smith", xp: 11200, role: "Frontend" },
    Contender { rank: 4, name: "Alex Murphy", xp: 9800, role: "Backend" },
    Contender { rank: 5, name: "You", xp: 2450, role: "Junior Dev" },
];

pub fn format_xp(xp: u64) -> String {
    let digits = xp.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

struct RankRow {
    rank: u32,
    class: String,
    badge_class: &'static str,
    badge: String,
    name: &'static str,
    role: &'static str,
    xp: String,
}

#[component]
pub fn LeaderboardView(theme: ThemeMode) -> Element {
    let variant = variant(theme);
    let rows: Vec<RankRow> = CONTENDERS
        .iter()
        .map(|contender| {
            let podium = contender.rank <= PODIUM;
            RankRow {
                rank: contender.rank,
                class: if contender.name == "You" {
                    format!("rank-row rank-{variant} is-you")
                } else {
                    format!("rank-row rank-{variant}")
                },
                badge_class: if podium { "rank-badge is-podium" } else { "rank-badge" },
                badge: if podium {
                    "🏆".to_string()
                } else {
                    format!("#{}", contender.rank)
                },
                name: contender.name,
                role: contender.role,
                xp: format_xp(contender.xp),
            }
        })
        .collect();
    rsx! {
        div { class: "view-full slide-up",
            Card {
                title: theme.pick("Global Leaderboard", "Hall of Fame", "Top Contributors"),
                theme,
                div { class: "rank-list",
                    for row in rows {
                        div { key: "{row.rank}", class: "{row.class}",
                            div { class: "rank-who",
                                div { class: row.badge_class, "{row.badge}" }
                                div {
                                    div { class: "strong", "{row.name}" }
                                    div { class: "small muted", "{row.role}" }
                                }
                            }
                            div { class: "rank-xp", "{row.xp} XP" }
                        }
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
    fn xp_uses_thousands_separators() {
        assert_eq!(format_xp(0), "0");
        assert_eq!(format_xp(980), "980");
        assert_eq!(format_xp(2450), "2,450");
        assert_eq!(format_xp(15420), "15,420");
        assert_eq!(format_xp(1234567), "1,234,567");
    }

    #[test]
    fn only_one_row_is_the_viewer() {
        let viewers: Vec<u32> = CONTENDERS
            .iter()
            .filter(|contender| contender.name == "You")
            .map(|contender| contender.rank)
            .collect();
        assert_eq!(viewers, vec![5]);
    }
}
