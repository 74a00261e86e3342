use dioxus::prelude::*;

use crate::theme::ThemeMode;
use crate::ui::{variant, Card, ProgressBar};

const REWARD_DAYS: [&str; 4] = ["M", "T", "W", "T"];
const TODAY: usize = 1;
const RECENT_ACTIVITY: [(&str, &str); 2] = [("Applied to Netflix", "+50 XP"), ("Updated Profile", "+20 XP")];

#[component]
pub fn DashboardView(theme: ThemeMode) -> Element {
    let variant = variant(theme);
    let bar_color = theme.pick("#a855f7", "#a855f7", "#000000");
    let days: Vec<(usize, &str, String, &str)> = REWARD_DAYS
        .iter()
        .enumerate()
        .map(|(index, day)| {
            let today = index == TODAY;
            let class = if today {
                format!("reward-dot reward-{variant} is-today")
            } else {
                format!("reward-dot reward-{variant}")
            };
            (index, *day, class, if today { "Today" } else { "Wed" })
        })
        .collect();

    rsx! {
        div { class: "view-grid view-grid-3 slide-up",
            Card {
                title: theme.pick("Active Quest", "Current Bounty", "Primary Directive"),
                theme,
                div { class: "quest-row",
                    div { class: "quest-icon quest-icon-{variant}", "⚔" }
                    div { class: "quest-text",
                        h3 { class: "strong truncate", "Deploy to Production" }
                        p { class: "muted small", "Complete 3 CI/CD pipeline deployments." }
                        ProgressBar { progress: 66, color: bar_color, theme }
                        p { class: "accent-text small align-right", "2/3 Completed" }
                    }
                }
            }
            Card {
                title: theme.pick("Daily Rewards", "Loot", "System Logs"),
                theme,
                div { class: "reward-row",
                    for (index, day, class, caption) in days {
                        div { key: "{index}", class: "reward-day",
                            div { class: "{class}", "{day}" }
                            div { class: "small muted", "{caption}" }
                        }
                    }
                }
            }
            Card {
                title: theme.pick("Recent Activity", "Chronicles", "Output Stream"),
                theme,
                ul { class: "activity-list",
                    for (text, xp) in RECENT_ACTIVITY {
                        li { key: "{text}",
                            span { "{text}" }
                            span { class: "xp-gain", "{xp}" }
                        }
                    }
                    li {
                        span { "Skill Badge: React" }
                        span { class: "badge-gain", "Badge" }
                    }
                }
            }
        }
    }
}
