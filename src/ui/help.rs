//! Keyboard shortcuts modal
//!
//! Lists every shortcut from [`SHORTCUT_HELP`]. While the modal is
//! transitioning in or out it is drawn in faded colors.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::keys::SHORTCUT_HELP;

use super::{app::HitMap, theme::Theme};

const CLOSE_LABEL: &str = "[x]";

/// Draw the shortcuts modal centered in `area`
pub fn draw(frame: &mut Frame, area: Rect, theme: &Theme, faded: bool, hits: &mut HitMap) {
    let colors = &theme.modal;
    let (key_color, text_color, title_color, border_color) = if faded {
        (colors.faded, colors.faded, colors.faded, colors.faded)
    } else {
        (colors.key, colors.description, colors.title, colors.border)
    };

    let rows: Vec<(String, &str)> = SHORTCUT_HELP
        .iter()
        .map(|s| (s.display(), s.description))
        .collect();
    let key_width = rows.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    let desc_width = rows.iter().map(|(_, d)| d.width()).max().unwrap_or(0);

    let lines: Vec<Line> = rows
        .iter()
        .map(|(keys, description)| {
            Line::from(vec![
                Span::styled(
                    format!(" {:<w$}", keys, w = key_width),
                    Style::default().fg(key_color).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(description.to_string(), Style::default().fg(text_color)),
            ])
        })
        .collect();

    // Borders plus one column of padding each side
    let width = ((key_width + desc_width + 5) as u16 + 2).min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    if width < 12 || height < 3 {
        return;
    }
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    let modal_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, modal_area);
    let mut style = Style::default().bg(colors.bg);
    if faded {
        style = style.add_modifier(Modifier::DIM);
    }
    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .title_style(Style::default().fg(title_color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(style);
    frame.render_widget(Paragraph::new(lines).block(block), modal_area);

    let close_width = CLOSE_LABEL.width() as u16;
    let close_area = Rect::new(modal_area.right() - close_width - 1, modal_area.y, close_width, 1);
    frame.render_widget(
        Paragraph::new(CLOSE_LABEL).style(Style::default().fg(key_color).bg(colors.bg)),
        close_area,
    );

    hits.modal = Some(modal_area);
    hits.modal_close = Some(close_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_modal_lists_shortcuts_and_records_hits() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut hits = HitMap::default();
        terminal
            .draw(|f| draw(f, f.area(), &Theme::default(), false, &mut hits))
            .unwrap();

        let modal = hits.modal.unwrap();
        let close = hits.modal_close.unwrap();
        assert!(modal.contains(close.as_position()));
        assert_eq!(close.y, modal.y);

        let buffer = terminal.backend().buffer();
        let text: String = (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        assert!(text.contains("Keyboard Shortcuts"));
        assert!(text.contains("Ctrl/Cmd+Shift+B"));
        assert!(text.contains("Reboot"));
    }
}
