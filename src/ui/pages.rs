//! Built-in site content.
//!
//! Each page declares which interactive elements it carries; features whose
//! element is missing are skipped when the page loads.

use crate::controller::navigator::Page;

#[derive(Debug, Clone, PartialEq)]
pub enum StatusValue {
    Text(&'static str),
    /// Filled with the career uptime at load.
    Uptime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub label: &'static str,
    pub value: StatusValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub name: &'static str,
    /// Target fill width, 0..=100.
    pub percent: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub date: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineItem {
    pub period: &'static str,
    pub title: &'static str,
    pub detail: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Text { title: &'static str, body: &'static str },
    Status(Vec<StatusLine>),
    Skills(Vec<Skill>),
    Log { title: &'static str, entries: Vec<LogEntry> },
    Timeline(Vec<TimelineItem>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    /// `None` for paths outside the site.
    pub page: Option<Page>,
    pub title: &'static str,
    pub social_title: Option<&'static str>,
    pub heading: Option<&'static str>,
    pub has_theme_menu: bool,
    pub has_help_trigger: bool,
    pub has_social_badge: bool,
    pub sections: Vec<Section>,
}

impl PageContent {
    pub fn skills(&self) -> impl Iterator<Item = &Skill> {
        self.sections.iter().flat_map(|s| match s {
            Section::Skills(skills) => skills.as_slice(),
            _ => &[],
        })
    }

    #[cfg(test)]
    pub fn timeline(&self) -> Option<&[TimelineItem]> {
        self.sections.iter().find_map(|s| match s {
            Section::Timeline(items) => Some(items.as_slice()),
            _ => None,
        })
    }

    pub fn log_entry_count(&self) -> usize {
        self.sections
            .iter()
            .map(|s| match s {
                Section::Log { entries, .. } => entries.len(),
                _ => 0,
            })
            .sum()
    }
}

pub const SOCIAL_LINKS: &[(&str, &str)] = &[
    ("github", "github.com/yo"),
    ("mail", "yo@website.dev"),
    ("scholar", "scholar.example.org/yo"),
];

pub fn content_for(path: &str) -> PageContent {
    match Page::from_path(path) {
        Some(Page::Index) => index(),
        Some(Page::Projects) => projects(),
        Some(Page::Papers) => papers(),
        None => not_found(),
    }
}

fn index() -> PageContent {
    PageContent {
        page: Some(Page::Index),
        title: "User@Website | Home",
        social_title: Some("User@Website - terminal"),
        heading: Some("Hello, World. Welcome aboard."),
        has_theme_menu: true,
        has_help_trigger: true,
        has_social_badge: true,
        sections: vec![
            Section::Status(vec![
                StatusLine { label: "STATUS", value: StatusValue::Text("Online") },
                StatusLine { label: "ROLE", value: StatusValue::Text("Systems engineer") },
                StatusLine { label: "LOCATION", value: StatusValue::Text("Somewhere with coffee") },
                StatusLine { label: "CAREER_UPTIME", value: StatusValue::Uptime },
            ]),
            Section::Text {
                title: "ABOUT",
                body: "I build small, sharp tools: parsers, storage engines and the \
                       occasional terminal toy. This site is one of them. Use Ctrl+K \
                       to change its colors and Ctrl+Left/Right to move between pages.",
            },
            Section::Skills(vec![
                Skill { name: "Rust", percent: 90 },
                Skill { name: "Distributed systems", percent: 75 },
                Skill { name: "Databases", percent: 70 },
                Skill { name: "Frontend", percent: 45 },
            ]),
            Section::Log {
                title: "RECENT_ACTIVITY",
                entries: vec![
                    LogEntry { date: "2024-09", text: "Shipped a log-structured cache to production" },
                    LogEntry { date: "2024-05", text: "Talk: zero-copy parsing in practice" },
                    LogEntry { date: "2023-11", text: "Open-sourced a tiny terminal multiplexer" },
                    LogEntry { date: "2023-06", text: "Joined the storage team" },
                    LogEntry { date: "2022-12", text: "Rewrote the build pipeline, halved CI time" },
                ],
            },
        ],
    }
}

fn projects() -> PageContent {
    PageContent {
        page: Some(Page::Projects),
        title: "Projects | User@Website",
        social_title: Some("Projects by User@Website"),
        heading: Some("Projects"),
        has_theme_menu: true,
        has_help_trigger: true,
        has_social_badge: true,
        sections: vec![
            Section::Text {
                title: "OVERVIEW",
                body: "A timeline of things built along the way. Scroll down and the \
                       progress line follows you.",
            },
            Section::Timeline(vec![
                TimelineItem {
                    period: "2018",
                    title: "First commit",
                    detail: "A command-line todo manager that nobody else used.",
                },
                TimelineItem {
                    period: "2019",
                    title: "Packet inspector",
                    detail: "Live protocol decoder with a curses front end.",
                },
                TimelineItem {
                    period: "2020",
                    title: "Key-value store",
                    detail: "LSM tree with leveled compaction and a write-ahead log.",
                },
                TimelineItem {
                    period: "2021",
                    title: "Query planner",
                    detail: "Cost-based join ordering for a columnar engine.",
                },
                TimelineItem {
                    period: "2022",
                    title: "Build cache",
                    detail: "Content-addressed artifact cache shared across CI runners.",
                },
                TimelineItem {
                    period: "2023",
                    title: "Terminal multiplexer",
                    detail: "Tiny tmux alternative with session persistence.",
                },
                TimelineItem {
                    period: "2024",
                    title: "Log-structured cache",
                    detail: "Tiered cache serving millions of reads per second.",
                },
            ]),
        ],
    }
}

fn papers() -> PageContent {
    PageContent {
        page: Some(Page::Papers),
        title: "Papers | User@Website",
        social_title: Some("Papers by User@Website"),
        heading: Some("Papers"),
        has_theme_menu: true,
        has_help_trigger: true,
        has_social_badge: true,
        sections: vec![
            Section::Log {
                title: "PUBLICATIONS",
                entries: vec![
                    LogEntry { date: "2024", text: "Compaction without stalls: scheduling merges under load" },
                    LogEntry { date: "2023", text: "Measuring tail latency in tiered caches" },
                    LogEntry { date: "2022", text: "Incremental builds as a caching problem" },
                    LogEntry { date: "2021", text: "Join ordering with learned cardinalities" },
                ],
            },
            Section::Text {
                title: "NOTES",
                body: "Preprints are linked from the social badge. Ask for anything missing.",
            },
        ],
    }
}

fn not_found() -> PageContent {
    PageContent {
        page: None,
        title: "404 | User@Website",
        social_title: None,
        heading: None,
        has_theme_menu: false,
        has_help_trigger: false,
        has_social_badge: false,
        sections: vec![Section::Text {
            title: "404",
            body: "No such page. Ctrl+Left/Right still takes you back into the site.",
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_for_site_pages() {
        assert_eq!(content_for("/").page, Some(Page::Index));
        assert_eq!(content_for("/projects.html").page, Some(Page::Projects));
        assert_eq!(content_for("/papers.html").page, Some(Page::Papers));
    }

    #[test]
    fn test_unknown_path_has_no_interactive_elements() {
        let content = content_for("/missing.html");
        assert_eq!(content.page, None);
        assert!(!content.has_theme_menu);
        assert!(!content.has_help_trigger);
        assert!(content.heading.is_none());
    }

    #[test]
    fn test_section_queries() {
        let index = content_for("/index.html");
        assert_eq!(index.skills().count(), 4);
        assert_eq!(index.log_entry_count(), 5);
        assert!(index.timeline().is_none());
        assert_eq!(content_for("/projects.html").timeline().map(|t| t.len()), Some(7));
    }
}
