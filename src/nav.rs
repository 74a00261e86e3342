use crate::theme::ThemeMode;

pub const FALLBACK_COLOR: &str = "#3b82f6";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewId {
    Dashboard,
    Jobs,
    Quests,
    Leaderboard,
    Profile,
    Map,
}

impl ViewId {
    pub const ALL: [ViewId; 6] = [
        ViewId::Dashboard,
        ViewId::Jobs,
        ViewId::Quests,
        ViewId::Leaderboard,
        ViewId::Profile,
        ViewId::Map,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ViewId::Dashboard => "DASHBOARD",
            ViewId::Jobs => "JOBS",
            ViewId::Quests => "QUESTS",
            ViewId::Leaderboard => "LEADERBOARD",
            ViewId::Profile => "PROFILE",
            ViewId::Map => "MAP",
        }
    }

    pub fn base_color(self) -> &'static str {
        match self {
            ViewId::Dashboard => "#3b82f6",
            ViewId::Jobs => "#22c55e",
            ViewId::Quests => "#eab308",
            ViewId::Leaderboard => "#a855f7",
            ViewId::Profile => "#f43f5e",
            ViewId::Map => "#06b6d4",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ViewId::Dashboard => {
                "Overview of system status, active objectives, and recent log entries."
            }
            ViewId::Jobs => "Marketplace for available contracts and technical bounties.",
            ViewId::Quests => "Daily and weekly challenges to increment user experience.",
            ViewId::Leaderboard => "Global rankings and competitive metrics analysis.",
            ViewId::Profile => {
                "User configuration, skill tree management, and visual customization."
            }
            ViewId::Map => "Geospatial visualization of local and remote nodes.",
        }
    }

    fn label(self, theme: ThemeMode) -> &'static str {
        match (theme, self) {
            (ThemeMode::Default, ViewId::Dashboard) => "Home",
            (ThemeMode::Default, ViewId::Jobs) => "Jobs",
            (ThemeMode::Default, ViewId::Quests) => "Quests",
            (ThemeMode::Default, ViewId::Leaderboard) => "Ranks",
            (ThemeMode::Default, ViewId::Profile) => "Profile",
            (ThemeMode::Default, ViewId::Map) => "Map",
            (ThemeMode::Doodle, ViewId::Dashboard) => "Feed",
            (ThemeMode::Doodle, ViewId::Jobs) => "Discuss",
            (ThemeMode::Doodle, ViewId::Quests) => "Events",
            (ThemeMode::Doodle, ViewId::Leaderboard) => "Mentors",
            (ThemeMode::Doodle, ViewId::Profile) => "Blog",
            (ThemeMode::Doodle, ViewId::Map) => "Gallery",
            (ThemeMode::Console, ViewId::Dashboard) => "Overview",
            (ThemeMode::Console, ViewId::Jobs) => "Teams",
            (ThemeMode::Console, ViewId::Quests) => "Submit",
            (ThemeMode::Console, ViewId::Leaderboard) => "Judges",
            (ThemeMode::Console, ViewId::Profile) => "Prizes",
            (ThemeMode::Console, ViewId::Map) => "Schedule",
        }
    }

    fn icon(self, theme: ThemeMode) -> &'static str {
        match (theme, self) {
            (ThemeMode::Default, ViewId::Dashboard) => "⌂",
            (ThemeMode::Default, ViewId::Jobs) => "💼",
            (ThemeMode::Default, ViewId::Quests) => "⚔",
            (ThemeMode::Default, ViewId::Leaderboard) => "🏆",
            (ThemeMode::Default, ViewId::Profile) => "👤",
            (ThemeMode::Default, ViewId::Map) => "🗺",
            (ThemeMode::Doodle, ViewId::Dashboard) => "▦",
            (ThemeMode::Doodle, ViewId::Jobs) => "💬",
            (ThemeMode::Doodle, ViewId::Quests) => "📅",
            (ThemeMode::Doodle, ViewId::Leaderboard) => "🎓",
            (ThemeMode::Doodle, ViewId::Profile) => "✎",
            (ThemeMode::Doodle, ViewId::Map) => "🖼",
            (ThemeMode::Console, ViewId::Dashboard) => "▤",
            (ThemeMode::Console, ViewId::Jobs) => "👥",
            (ThemeMode::Console, ViewId::Quests) => "⇪",
            (ThemeMode::Console, ViewId::Leaderboard) => "⚖",
            (ThemeMode::Console, ViewId::Profile) => "🎁",
            (ThemeMode::Console, ViewId::Map) => "🕑",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NavItem {
    pub id: ViewId,
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

pub fn nav_items(theme: ThemeMode) -> Vec<NavItem> {
    ViewId::ALL
        .iter()
        .map(|&id| NavItem {
            id,
            label: id.label(theme),
            icon: id.icon(theme),
            color: if theme.is_console() {
                "#000000"
            } else {
                id.base_color()
            },
        })
        .collect()
}

pub fn active_color(items: &[NavItem], active: ViewId) -> &'static str {
    items
        .iter()
        .find(|item| item.id == active)
        .map(|item| item.color)
        .unwrap_or(FALLBACK_COLOR)
}

pub fn index_of(items: &[NavItem], id: ViewId) -> Option<usize> {
    items.iter().position(|item| item.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn labels_follow_theme() {
        let labels = |theme| {
            nav_items(theme)
                .into_iter()
                .map(|item| item.label)
                .collect::<Vec<_>>()
        };
        assert_eq!(
            labels(ThemeMode::Default),
            vec!["Home", "Jobs", "Quests", "Ranks", "Profile", "Map"]
        );
        assert_eq!(
            labels(ThemeMode::Doodle),
            vec!["Feed", "Discuss", "Events", "Mentors", "Blog", "Gallery"]
        );
        assert_eq!(
            labels(ThemeMode::Console),
            vec!["Overview", "Teams", "Submit", "Judges", "Prizes", "Schedule"]
        );
    }

    #[test]
    fn console_items_are_black() {
        assert!(nav_items(ThemeMode::Console)
            .iter()
            .all(|item| item.color == "#000000"));
        let items = nav_items(ThemeMode::Default);
        assert_eq!(active_color(&items, ViewId::Quests), "#eab308");
    }

    #[test]
    fn active_color_falls_back_when_missing() {
        assert_eq!(active_color(&[], ViewId::Map), FALLBACK_COLOR);
        let items = nav_items(ThemeMode::Doodle);
        assert_eq!(index_of(&items, ViewId::Profile), Some(4));
    }
}
