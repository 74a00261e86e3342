use dioxus::prelude::*;

use crate::theme::ThemeMode;
use crate::ui::{variant, Badge, Card};

const SKILLS: [&str; 4] = ["React", "TypeScript", "Node.js", "Design"];
const SOCIALS: [(&str, &str); 3] = [("GitHub", "⌥"), ("LinkedIn", "in"), ("Mail", "✉")];
const STATS: [(&str, &str); 4] = [
    ("Total XP", "24,500"),
    ("Quests", "42"),
    ("Streak", "12 Days"),
    ("Rank", "#5"),
];
const BADGE_SLOTS: usize = 6;

#[component]
pub fn ProfileView(theme: ThemeMode) -> Element {
    let variant = variant(theme);
    rsx! {
        div { class: "view-grid view-grid-3 slide-up",
            div { class: "span-3",
                Card {
                    title: theme.pick("Profile Overview", "My Sketchbook", "User Configuration"),
                    theme,
                    div { class: "profile-head",
                        div { class: "profile-avatar profile-avatar-{variant}", "👤" }
                        div { class: "profile-info",
                            h2 { class: "strong", "Alex Developer" }
                            p { class: "muted", "Full Stack Engineer • Level 12" }
                            div { class: "badge-row",
                                for skill in SKILLS {
                                    Badge { key: "{skill}", theme, "{skill}" }
                                }
                            }
                        }
                        div { class: "social-row",
                            for (index, (name, glyph)) in SOCIALS.into_iter().enumerate() {
                                button {
                                    key: "{name}",
                                    class: "social social-{variant}",
                                    aria_label: "Social Link {index}",
                                    title: "{name}",
                                    "{glyph}"
                                }
                            }
                        }
                    }
                }
            }
            div { class: "span-2",
                Card { title: "Statistics", theme,
                    div { class: "stat-grid",
                        for (label, value) in STATS {
                            div { key: "{label}", class: "stat stat-{variant}",
                                div { class: "stat-label", "{label}" }
                                div { class: "stat-value", "{value}" }
                            }
                        }
                    }
                }
            }
            Card { title: "Badges", theme,
                div { class: "badge-grid",
                    for index in 0..BADGE_SLOTS {
                        div { key: "{index}", class: "badge-slot badge-slot-{variant}",
                            div { class: "badge-coin" }
                        }
                    }
                }
            }
        }
    }
}
