use dioxus::prelude::*;

use crate::theme::ThemeMode;
use crate::ui::{Card, ProgressBar};

struct Quest {
    title: &'static str,
    description: &'static str,
    progress: u8,
    xp: u32,
}

const QUESTS: [Quest; 3] = [
    Quest {
        title: "First Deployment",
        description: "Deploy your first app to production",
        progress: 100,
        xp: 500,
    },
    Quest {
        title: "Bug Hunter",
        description: "Resolve 5 critical issues",
        progress: 60,
        xp: 300,
    },
    Quest {
        title: "Code Reviewer",
        description: "Review 10 pull requests",
        progress: 20,
        xp: 1000,
    },
];

#[component]
pub fn QuestsView(theme: ThemeMode) -> Element {
    let bar_color = theme.pick("#10b981", "#10b981", "#000000");
    rsx! {
        div { class: "view-grid slide-up",
            Card {
                title: theme.pick("Active Quests", "Adventures", "Active Processes"),
                theme,
                div { class: "quest-list",
                    for quest in QUESTS.iter() {
                        div { key: "{quest.title}", class: "quest",
                            div { class: "quest-head",
                                div { class: "quest-row",
                                    div { class: "quest-scroll", "📜" }
                                    div {
                                        h4 { class: "strong", "{quest.title}" }
                                        p { class: "muted small", "{quest.description}" }
                                    }
                                }
                                span { class: "xp-reward", "+{quest.xp} XP" }
                            }
                            div { class: "quest-progress",
                                div { class: "grow",
                                    ProgressBar { progress: quest.progress, color: bar_color, theme }
                                }
                                span { class: "small muted", "{quest.progress}%" }
                            }
                        }
                    }
                }
            }
        }
    }
}
