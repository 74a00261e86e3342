use dioxus::prelude::*;

use crate::theme::ThemeMode;
use crate::ui::{variant, Badge};

const LISTINGS: usize = 3;
const SKILLS: [&str; 3] = ["React", "TS", "Tailwind"];

#[component]
pub fn JobsView(theme: ThemeMode) -> Element {
    let variant = variant(theme);
    rsx! {
        div { class: "view-stack slide-left",
            for index in 0..LISTINGS {
                div { key: "{index}", class: "job job-{variant}",
                    div { class: "job-row",
                        div {
                            h3 { class: "job-title", "Senior Frontend Engineer" }
                            p { class: "muted", "TechCorp Inc. • Remote" }
                            div { class: "badge-row",
                                for skill in SKILLS {
                                    Badge { key: "{skill}", theme, "{skill}" }
                                }
                            }
                        }
                        button { class: "job-apply job-apply-{variant}", "Apply" }
                    }
                }
            }
        }
    }
}
