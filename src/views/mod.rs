mod dashboard;
mod jobs;
mod leaderboard;
mod map;
mod profile;
mod quests;

use dioxus::prelude::*;

use crate::nav::ViewId;
use crate::theme::ThemeMode;

#[component]
pub fn ContentView(view: ViewId, theme: ThemeMode) -> Element {
    match view {
        ViewId::Dashboard => rsx! { dashboard::DashboardView { theme } },
        ViewId::Jobs => rsx! { jobs::JobsView { theme } },
        ViewId::Quests => rsx! { quests::QuestsView { theme } },
        ViewId::Leaderboard => rsx! { leaderboard::LeaderboardView { theme } },
        ViewId::Profile => rsx! { profile::ProfileView { theme } },
        ViewId::Map => rsx! { map::MapView { theme } },
    }
}
