//! Lays out page content as scrollable lines and records the row geometry
//! that scroll effects need.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use super::effects::is_item_active;
use super::pages::{PageContent, Section, StatusValue};
use super::theme::Theme;

const INDENT: &str = "  ";
const MAX_BAR_WIDTH: usize = 30;

/// Rows `[top, top + height)` in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    pub top: u16,
    pub height: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineLayout {
    pub top: u16,
    pub height: u16,
    /// Relative to `top`.
    pub item_tops: Vec<u16>,
}

/// Dynamic values the layout depends on.
pub struct DocumentState<'a> {
    pub heading: Option<&'a str>,
    pub typing: bool,
    pub uptime: &'a str,
    pub skills_filled: bool,
    pub revealed_logs: &'a [bool],
    pub timeline_progress: f32,
}

#[derive(Debug, Default)]
pub struct Document {
    pub lines: Vec<Line<'static>>,
    pub logs: Vec<RowSpan>,
    pub timeline: Option<TimelineLayout>,
}

impl Document {
    pub fn height(&self) -> u16 {
        self.lines.len().min(u16::MAX as usize) as u16
    }
}

pub fn build(content: &PageContent, state: &DocumentState, theme: &Theme, width: u16) -> Document {
    let mut doc = Document::default();
    let text_width = (width as usize).saturating_sub(INDENT.len() * 2).max(10);

    doc.lines.push(Line::default());
    if let Some(heading) = state.heading {
        let mut spans = vec![
            Span::styled(format!("{}> ", INDENT), theme.dim_style()),
            Span::styled(heading.to_string(), theme.heading_style()),
        ];
        if state.typing {
            spans.push(Span::styled("█", Style::default().fg(theme.palette.accent)));
        }
        doc.lines.push(Line::from(spans));
        doc.lines.push(Line::default());
    }

    let mut log_index = 0;
    for section in &content.sections {
        match section {
            Section::Text { title, body } => {
                push_title(&mut doc, title, theme);
                for row in textwrap::wrap(body, text_width) {
                    doc.lines.push(Line::from(Span::styled(
                        format!("{}{}", INDENT, row),
                        Style::default().fg(theme.page.text),
                    )));
                }
            }
            Section::Status(lines) => {
                push_title(&mut doc, "SYSTEM_STATUS", theme);
                let label_width = lines.iter().map(|l| l.label.width()).max().unwrap_or(0);
                for line in lines {
                    let value = match &line.value {
                        StatusValue::Text(text) => text.to_string(),
                        StatusValue::Uptime => state.uptime.to_string(),
                    };
                    doc.lines.push(Line::from(vec![
                        Span::styled(
                            format!("{}{:<w$} : ", INDENT, line.label, w = label_width),
                            Style::default().fg(theme.page.text_dim),
                        ),
                        Span::styled(value, Style::default().fg(theme.page.text)),
                    ]));
                }
            }
            Section::Skills(skills) => {
                push_title(&mut doc, "SKILLS", theme);
                let name_width = skills.iter().map(|s| s.name.width()).max().unwrap_or(0);
                let bar_width = text_width
                    .saturating_sub(name_width + 8)
                    .clamp(4, MAX_BAR_WIDTH);
                for skill in skills {
                    let filled = if state.skills_filled {
                        bar_width * usize::from(skill.percent.min(100)) / 100
                    } else {
                        0
                    };
                    let pad = name_width.saturating_sub(skill.name.width());
                    doc.lines.push(Line::from(vec![
                        Span::styled(
                            format!("{}{}{} ", INDENT, skill.name, " ".repeat(pad)),
                            Style::default().fg(theme.page.text),
                        ),
                        Span::styled("█".repeat(filled), Style::default().fg(theme.page.bar_fill)),
                        Span::styled(
                            "░".repeat(bar_width - filled),
                            Style::default().fg(theme.page.bar_empty),
                        ),
                        Span::styled(
                            format!(" {:>3}%", skill.percent),
                            Style::default().fg(theme.page.text_dim),
                        ),
                    ]));
                }
            }
            Section::Log { title, entries } => {
                push_title(&mut doc, title, theme);
                for entry in entries {
                    let revealed = state.revealed_logs.get(log_index).copied().unwrap_or(false);
                    log_index += 1;
                    let style = if revealed {
                        Style::default().fg(theme.page.text)
                    } else {
                        Style::default()
                            .fg(theme.page.text_dim)
                            .add_modifier(Modifier::DIM)
                    };
                    let prefix = format!("[{}] ", entry.date);
                    let wrap_width = text_width.saturating_sub(prefix.width()).max(10);
                    let top = doc.height();
                    for (i, row) in textwrap::wrap(entry.text, wrap_width).into_iter().enumerate() {
                        let lead = if i == 0 {
                            Span::styled(
                                format!("{}{}", INDENT, prefix),
                                style.fg(theme.page.section_title),
                            )
                        } else {
                            Span::raw(format!("{}{}", INDENT, " ".repeat(prefix.width())))
                        };
                        doc.lines.push(Line::from(vec![lead, Span::styled(row.into_owned(), style)]));
                    }
                    doc.logs.push(RowSpan { top, height: doc.height() - top });
                }
            }
            Section::Timeline(items) => {
                push_title(&mut doc, "TIMELINE", theme);
                let top = doc.height();
                let mut item_tops = Vec::with_capacity(items.len());
                let detail_width = text_width.saturating_sub(6).max(10);
                for item in items {
                    let item_top = doc.height() - top;
                    item_tops.push(item_top);
                    let active = is_item_active(f32::from(item_top), state.timeline_progress);
                    let dot_style = if active {
                        Style::default()
                            .fg(theme.page.timeline_active)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(theme.page.timeline_line)
                    };
                    let title_style = if active {
                        theme.heading_style()
                    } else {
                        Style::default().fg(theme.page.text)
                    };
                    doc.lines.push(Line::from(vec![
                        Span::raw(INDENT),
                        Span::styled(if active { "●" } else { "○" }, dot_style),
                        Span::styled(
                            format!(" {} ", item.period),
                            Style::default().fg(theme.page.section_title),
                        ),
                        Span::styled(item.title.to_string(), title_style),
                    ]));
                    for row in textwrap::wrap(item.detail, detail_width) {
                        let offset = doc.height() - top;
                        doc.lines.push(Line::from(vec![
                            Span::raw(INDENT),
                            gutter(offset, state.timeline_progress, theme),
                            Span::styled(
                                format!("   {}", row),
                                Style::default().fg(theme.page.text_dim),
                            ),
                        ]));
                    }
                    let offset = doc.height() - top;
                    doc.lines.push(Line::from(vec![
                        Span::raw(INDENT),
                        gutter(offset, state.timeline_progress, theme),
                    ]));
                }
                doc.timeline = Some(TimelineLayout {
                    top,
                    height: doc.height() - top,
                    item_tops,
                });
            }
        }
        doc.lines.push(Line::default());
    }
    doc
}

fn push_title(doc: &mut Document, title: &str, theme: &Theme) {
    doc.lines.push(Line::from(Span::styled(
        format!("{}## {}", INDENT, title),
        theme.section_title_style(),
    )));
}

/// Timeline rail segment; rows above the progress point are lit.
fn gutter(offset: u16, progress: f32, theme: &Theme) -> Span<'static> {
    let color = if f32::from(offset) < progress {
        theme.page.timeline_progress
    } else {
        theme.page.timeline_line
    };
    Span::styled("│", Style::default().fg(color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::pages::content_for;

    fn state<'a>(revealed: &'a [bool], progress: f32) -> DocumentState<'a> {
        DocumentState {
            heading: Some("Projects"),
            typing: false,
            uptime: "5 Years, 2 Months",
            skills_filled: true,
            revealed_logs: revealed,
            timeline_progress: progress,
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_timeline_geometry_recorded() {
        let content = content_for("/projects.html");
        let doc = build(&content, &state(&[], 0.0), &Theme::default(), 80);
        let timeline = doc.timeline.as_ref().unwrap();
        assert_eq!(timeline.item_tops.len(), 7);
        assert_eq!(timeline.item_tops[0], 0);
        assert!(timeline.item_tops.windows(2).all(|w| w[0] < w[1]));
        assert!(timeline.top + timeline.height <= doc.height());
        assert!(text(&doc.lines[timeline.top as usize]).contains("First commit"));
    }

    #[test]
    fn test_log_rows_recorded_per_entry() {
        let content = content_for("/index.html");
        let doc = build(&content, &state(&[true; 5], 0.0), &Theme::default(), 80);
        assert_eq!(doc.logs.len(), 5);
        for span in &doc.logs {
            assert!(span.height >= 1);
            assert!(text(&doc.lines[span.top as usize]).contains('['));
        }
    }

    #[test]
    fn test_uptime_and_skill_bars_rendered() {
        let content = content_for("/");
        let doc = build(&content, &state(&[], 0.0), &Theme::default(), 80);
        let all: Vec<String> = doc.lines.iter().map(text).collect();
        assert!(all.iter().any(|l| l.contains("CAREER_UPTIME") && l.contains("5 Years, 2 Months")));
        assert!(all.iter().any(|l| l.contains("Rust") && l.contains('█')));

        let empty = DocumentState { skills_filled: false, ..state(&[], 0.0) };
        let doc = build(&content, &empty, &Theme::default(), 80);
        assert!(!doc.lines.iter().map(text).any(|l| l.contains('█')));
    }
}
