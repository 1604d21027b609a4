use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::controller::navigator::Page;

use super::{
    app::{App, Focus, HitMap, PageView},
    boot,
    document::{self, Document, DocumentState},
    effects::{is_nav_active, split_user_string},
    help,
    pages::SOCIAL_LINKS,
    theme::Theme,
};

const HELP_LABEL: &str = "[ ? ]";
const REBOOT_LABEL: &str = "[reboot]";
const SOCIAL_LABEL: &str = "[ @ links ]";
const SCROLL_TOP_LABEL: &str = " ↑ TOP ";
const FOOTER_HINTS: &str = " ^K themes  ^←/→ pages  ^L top  ^⇧B reboot  Tab focus  q quit";

pub fn draw(frame: &mut Frame, app: &mut App) {
    let theme = app.page.theme.clone();
    let area = frame.area();
    let now = app.now_ms();
    let mut hits = HitMap::default();

    // Fill entire screen with background color first
    frame.render_widget(Block::default().style(theme.base_style()), area);
    if area.width < 20 || area.height < 4 {
        let msg = Paragraph::new("Terminal too small").style(theme.dim_style());
        frame.render_widget(msg, area);
        app.page.hits = hits;
        return;
    }

    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    draw_body(frame, app, body, &theme);
    draw_header(frame, app, header, &theme, &mut hits);
    draw_footer(frame, &app.page, footer, &theme, &mut hits);

    if app.page.content.has_social_badge {
        draw_social_badge(frame, &app.page, footer, &theme, &mut hits);
    }
    if app.page.scroll_top_visible {
        draw_scroll_top(frame, &app.page, body, &theme, &mut hits);
    }
    if app.controller.dropdown.is_open() {
        if let Some(trigger) = hits.theme_trigger {
            draw_dropdown(frame, app, trigger, area, &theme, &mut hits);
        }
    }
    if app.controller.modal.in_layout() {
        help::draw(frame, area, &theme, app.modal_faded(now), &mut hits);
    }
    if let Some(screen) = &app.page.loading {
        boot::draw(frame, screen, area, &theme, now);
    }

    app.page.hits = hits;
}

// ─── Body ──────────────────────────────────────────────────────────────

fn build_document(page: &PageView, theme: &Theme, width: u16) -> Document {
    let state = DocumentState {
        heading: page.heading(),
        typing: page.is_typing(),
        uptime: &page.uptime,
        skills_filled: page.skills_filled,
        revealed_logs: &page.revealed_logs,
        timeline_progress: page.timeline_progress,
    };
    document::build(&page.content, &state, theme, width)
}

fn draw_body(frame: &mut Frame, app: &mut App, area: Rect, theme: &Theme) {
    let threshold = app.settings.scroll_top_threshold;
    let mut doc = build_document(&app.page, theme, area.width);
    if app.page.update_layout(&doc, area.height, threshold) {
        // Scroll effects changed styling; lay out again with the new state
        doc = build_document(&app.page, theme, area.width);
    }
    let paragraph = Paragraph::new(doc.lines)
        .style(theme.base_style())
        .scroll((app.page.scroll, 0));
    frame.render_widget(paragraph, area);
}

// ─── Header ────────────────────────────────────────────────────────────

fn draw_header(frame: &mut Frame, app: &App, area: Rect, theme: &Theme, hits: &mut HitMap) {
    let colors = &theme.header;
    frame.render_widget(Block::default().style(Style::default().bg(colors.bg)), area);

    let (name, host) = split_user_string(&app.settings.user_string);
    let user_style = Style::default().fg(colors.user).add_modifier(Modifier::BOLD);
    let mut spans = vec![Span::raw(" "), Span::styled(name.to_string(), user_style)];
    if let Some(host) = host {
        spans.push(Span::styled("@", Style::default().fg(colors.at_symbol).add_modifier(Modifier::BOLD)));
        spans.push(Span::styled(host.to_string(), user_style));
    }
    spans.push(Span::raw("   "));

    let mut x = area.x + spans.iter().map(|s| s.content.width() as u16).sum::<u16>();
    for page in Page::ALL {
        let label = format!(" {} ", page.file().trim_end_matches(".html"));
        let width = label.width() as u16;
        let style = if is_nav_active(&app.page.path, page.file()) {
            Style::default()
                .fg(colors.link_active)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(colors.link)
        };
        if x + width <= area.right() {
            hits.nav_links.push((Rect::new(x, area.y, width, 1), page));
        }
        x += width;
        spans.push(Span::styled(label, style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    // Right-aligned controls
    let mut right = area.right().saturating_sub(1);
    if app.page.content.has_help_trigger {
        let rect = place_right(&mut right, HELP_LABEL, area);
        render_control(frame, HELP_LABEL, rect, app.page.focus == Focus::HelpTrigger, theme);
        hits.help_trigger = Some(rect);
    }
    if app.controller.dropdown.is_attached() {
        let label = format!("[ {} ▾ ]", theme.id.label());
        let rect = place_right(&mut right, &label, area);
        render_control(frame, &label, rect, app.page.focus == Focus::ThemeTrigger, theme);
        hits.theme_trigger = Some(rect);
    }
}

/// Reserves `label` immediately left of column `right`, plus a gap.
fn place_right(right: &mut u16, label: &str, row: Rect) -> Rect {
    let width = (label.width() as u16).min(*right - row.x);
    let x = *right - width;
    *right = x.saturating_sub(1).max(row.x);
    Rect::new(x, row.y, width, 1)
}

fn render_control(frame: &mut Frame, label: &str, rect: Rect, focused: bool, theme: &Theme) {
    let style = if focused {
        theme.focused_control_style()
    } else {
        Style::default().fg(theme.header.control)
    };
    frame.render_widget(Paragraph::new(label.to_string()).style(style), rect);
}

// ─── Theme dropdown ────────────────────────────────────────────────────

fn draw_dropdown(frame: &mut Frame, app: &App, trigger: Rect, screen: Rect, theme: &Theme, hits: &mut HitMap) {
    let colors = &theme.dropdown;
    let catalog = app.controller.themes.catalog();
    let active = theme.id.index();
    let label_width = catalog.iter().map(|t| t.label().width()).max().unwrap_or(0) as u16;
    let width = (label_width + 6).min(screen.width);
    let height = (catalog.len() as u16 + 2).min(screen.height.saturating_sub(1));
    let x = trigger.right().saturating_sub(width).max(screen.x);
    let menu = Rect::new(x, trigger.bottom(), width, height);

    frame.render_widget(Clear, menu);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.bg));
    let inner = block.inner(menu);
    frame.render_widget(block, menu);

    for (i, id) in catalog.iter().enumerate() {
        let row = inner.y + i as u16;
        if row >= inner.bottom() {
            break;
        }
        let marker = if i == active { "● " } else { "  " };
        let style = if app.controller.dropdown.is_previewed(i) {
            theme.preview_style()
        } else {
            Style::default().fg(colors.option)
        };
        let rect = Rect::new(inner.x, row, inner.width, 1);
        let line = Line::from(vec![
            Span::styled(marker, style.fg(colors.active_marker)),
            Span::styled(id.label(), style),
        ]);
        frame.render_widget(Paragraph::new(line).style(style), rect);
        hits.theme_options.push((rect, i));
    }
}

// ─── Footer, social badge, scroll-to-top ───────────────────────────────

fn draw_footer(frame: &mut Frame, page: &PageView, area: Rect, theme: &Theme, hits: &mut HitMap) {
    frame.render_widget(
        Paragraph::new(FOOTER_HINTS).style(Style::default().fg(theme.palette.fg_dim).bg(theme.palette.bg_alt)),
        area,
    );

    let mut right = area.right().saturating_sub(1);
    if page.content.has_social_badge {
        let rect = place_right(&mut right, SOCIAL_LABEL, area);
        render_control(frame, SOCIAL_LABEL, rect, page.focus == Focus::SocialToggle, theme);
        hits.social_toggle = Some(rect);
        hits.social_badge = Some(rect);
    }
    let rect = place_right(&mut right, REBOOT_LABEL, area);
    render_control(frame, REBOOT_LABEL, rect, false, theme);
    hits.reboot = Some(rect);
}

fn draw_social_badge(frame: &mut Frame, page: &PageView, footer: Rect, theme: &Theme, hits: &mut HitMap) {
    let (Some(toggle), true) = (hits.social_toggle, page.social_expanded) else {
        return;
    };
    let mut lines = Vec::new();
    if let Some(title) = &page.social_title {
        lines.push(Line::from(Span::styled(title.clone(), theme.heading_style())));
    }
    for (name, target) in SOCIAL_LINKS {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<8}", name), Style::default().fg(theme.palette.accent)),
            Span::styled(target.to_string(), Style::default().fg(theme.palette.fg)),
        ]));
    }
    let content_width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
    let width = (content_width + 4).min(footer.width);
    let height = (lines.len() as u16 + 2).min(footer.y);
    let x = toggle.right().saturating_sub(width).max(footer.x);
    let panel = Rect::new(x, footer.y - height, width, height);

    frame.render_widget(Clear, panel);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.palette.border))
        .style(Style::default().bg(theme.palette.bg_alt));
    frame.render_widget(Paragraph::new(lines).block(block), panel);
    hits.social_badge = Some(panel.union(toggle));
}

fn draw_scroll_top(frame: &mut Frame, page: &PageView, body: Rect, theme: &Theme, hits: &mut HitMap) {
    let width = SCROLL_TOP_LABEL.width() as u16;
    let rect = Rect::new(
        body.right().saturating_sub(width + 1),
        body.bottom().saturating_sub(1),
        width,
        1,
    );
    let style = if page.focus == Focus::ScrollTop {
        theme.focused_control_style()
    } else {
        Style::default().fg(theme.palette.bg).bg(theme.palette.accent)
    };
    frame.render_widget(Paragraph::new(SCROLL_TOP_LABEL).style(style), rect);
    hits.scroll_top = Some(rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::controller::modal::ModalState;
    use crate::controller::theme_store::ThemeId;
    use crate::storage::MemoryStore;
    use crate::timer::ManualClock;
    use crate::ui::boot::{BOOT_DISPLAY_MS, BOOT_FADE_MS};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use ratatui::{backend::TestBackend, Terminal};
    use std::rc::Rc;

    struct Harness {
        app: App,
        clock: Rc<ManualClock>,
        terminal: Terminal<TestBackend>,
    }

    impl Harness {
        fn new(path: &str) -> Self {
            Self::with_size(path, 100, 30)
        }

        /// Page loaded with the boot screen already gone.
        fn with_size(path: &str, width: u16, height: u16) -> Self {
            let clock = Rc::new(ManualClock::new(0));
            let mut app = App::new(
                Settings::default(),
                Box::new(MemoryStore::new()),
                Box::new(Rc::clone(&clock)),
                path,
            );
            clock.advance(BOOT_DISPLAY_MS);
            app.on_tick();
            clock.advance(BOOT_FADE_MS);
            app.on_tick();
            let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
            let mut h = Self { app, clock, terminal };
            h.render();
            h
        }

        fn render(&mut self) {
            let app = &mut self.app;
            self.terminal.draw(|f| draw(f, app)).unwrap();
        }

        fn click(&mut self, rect: Rect) {
            self.app.handle_mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: rect.x,
                row: rect.y,
                modifiers: KeyModifiers::NONE,
            });
            self.render();
        }

        fn screen(&self) -> String {
            let buffer = self.terminal.backend().buffer();
            (0..buffer.area.height)
                .map(|y| {
                    (0..buffer.area.width)
                        .map(|x| buffer[(x, y)].symbol().to_string())
                        .collect::<String>()
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
    }

    #[test]
    fn test_header_shows_user_and_nav() {
        let h = Harness::new("/projects.html");
        let screen = h.screen();
        let first_row = screen.lines().next().unwrap();
        assert!(first_row.contains("yo@website"));
        assert!(first_row.contains("projects"));
        assert!(first_row.contains("Homebrew"));
        assert_eq!(h.app.page.hits.nav_links.len(), 3);
    }

    #[test]
    fn test_click_trigger_then_option() {
        let mut h = Harness::new("/");
        let trigger = h.app.page.hits.theme_trigger.unwrap();
        h.click(trigger);
        assert!(h.app.controller.dropdown.is_open());
        assert_eq!(h.app.controller.dropdown.focused(), None);
        assert_eq!(h.app.page.hits.theme_options.len(), 5);

        let (rect, _) = h.app.page.hits.theme_options[2];
        h.click(rect);
        assert!(!h.app.controller.dropdown.is_open());
        assert_eq!(h.app.controller.themes.get_active(), ThemeId::RedSands);
    }

    #[test]
    fn test_click_elsewhere_closes_dropdown_without_refocus() {
        let mut h = Harness::new("/");
        h.app.handle_key(KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL));
        h.render();
        h.app.page.focus = Focus::None;
        h.click(Rect::new(2, 10, 1, 1));
        assert!(!h.app.controller.dropdown.is_open());
        assert_eq!(h.app.page.focus, Focus::None);
    }

    #[test]
    fn test_help_modal_close_button_and_backdrop() {
        let mut h = Harness::new("/");
        let help = h.app.page.hits.help_trigger.unwrap();
        h.click(help);
        assert_eq!(h.app.controller.modal.state(), ModalState::Visible);
        assert!(h.screen().contains("Keyboard Shortcuts"));

        let close = h.app.page.hits.modal_close.unwrap();
        h.click(close);
        assert!(!h.app.controller.modal.is_open());

        // Reopen, then click the backdrop
        h.clock.advance(1_000);
        h.app.on_tick();
        h.click(help);
        assert!(h.app.controller.modal.is_open());
        h.click(Rect::new(0, 28, 1, 1));
        assert!(!h.app.controller.modal.is_open());
    }

    #[test]
    fn test_social_badge_toggle_and_outside_click() {
        let mut h = Harness::new("/");
        let toggle = h.app.page.hits.social_toggle.unwrap();
        h.click(toggle);
        assert!(h.app.page.social_expanded);
        assert!(h.screen().contains("github.com/yo"));

        let badge = h.app.page.hits.social_badge.unwrap();
        h.click(badge);
        assert!(h.app.page.social_expanded);

        h.click(Rect::new(2, 10, 1, 1));
        assert!(!h.app.page.social_expanded);
    }

    #[test]
    fn test_nav_link_click_loads_page() {
        let mut h = Harness::new("/");
        let (rect, _) = h
            .app
            .page
            .hits
            .nav_links
            .iter()
            .copied()
            .find(|(_, p)| *p == Page::Papers)
            .unwrap();
        h.click(rect);
        assert_eq!(h.app.page.path, "/papers.html");
        assert!(h.screen().contains("PUBLICATIONS"));
    }

    #[test]
    fn test_timeline_fills_at_document_bottom() {
        let mut h = Harness::with_size("/projects.html", 100, 16);
        assert!(h.app.page.timeline_progress < 1.0);

        h.app.handle_key(KeyEvent::new(KeyCode::End, KeyModifiers::NONE));
        h.render();
        assert!(h.app.page.scroll > 0);
        assert!(h.app.page.timeline_progress > 10.0);
    }

    #[test]
    fn test_scroll_top_button_scrolls_smoothly() {
        let mut h = Harness::with_size("/projects.html", 100, 12);
        h.app.settings.scroll_top_threshold = 5;
        h.app.handle_key(KeyEvent::new(KeyCode::End, KeyModifiers::NONE));
        h.render();
        assert!(h.app.page.scroll_top_visible);
        let button = h.app.page.hits.scroll_top.unwrap();
        h.click(button);
        assert_eq!(h.app.page.scroll_target, Some(0));

        for _ in 0..40 {
            h.clock.advance(16);
            h.app.on_tick();
        }
        assert_eq!(h.app.page.scroll, 0);
        assert!(!h.app.page.scroll_top_visible);
    }

    fn press(h: &mut Harness, code: KeyCode, modifiers: KeyModifiers) {
        h.app.handle_key(KeyEvent::new(code, modifiers));
        h.render();
    }

    #[test]
    fn test_dropdown_lists_catalog_and_marks_applied_theme() {
        let mut h = Harness::new("/");
        press(&mut h, KeyCode::Char('k'), KeyModifiers::CONTROL);
        press(&mut h, KeyCode::Down, KeyModifiers::NONE);
        press(&mut h, KeyCode::Enter, KeyModifiers::NONE);
        assert!(!h.app.controller.dropdown.is_open());

        press(&mut h, KeyCode::Char('k'), KeyModifiers::CONTROL);
        let screen = h.screen();
        assert!(screen.contains("● Ocean"));
        assert!(!screen.contains("● Homebrew"));
        assert!(screen.lines().next().unwrap().contains("[ Ocean ▾ ]"));
        assert_eq!(
            h.app.page.hits.theme_options.len(),
            h.app.controller.themes.catalog().len()
        );
    }

    #[test]
    fn test_arrows_move_menu_focus_instead_of_scrolling() {
        let mut h = Harness::with_size("/", 100, 12);
        press(&mut h, KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(h.app.page.scroll, 1);

        press(&mut h, KeyCode::Char('k'), KeyModifiers::CONTROL);
        press(&mut h, KeyCode::Down, KeyModifiers::NONE);
        press(&mut h, KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(h.app.controller.dropdown.focused(), Some(2));
        press(&mut h, KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(h.app.controller.dropdown.focused(), Some(1));
        assert_eq!(h.app.page.scroll, 1);

        press(&mut h, KeyCode::Esc, KeyModifiers::NONE);
        press(&mut h, KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(h.app.page.scroll, 2);
    }

    #[test]
    fn test_log_entries_stay_revealed_after_scrolling_away() {
        let mut h = Harness::with_size("/", 100, 12);
        assert_eq!(h.app.page.revealed_logs.last(), Some(&false));

        press(&mut h, KeyCode::End, KeyModifiers::NONE);
        assert_eq!(h.app.page.revealed_logs.last(), Some(&true));

        press(&mut h, KeyCode::Home, KeyModifiers::NONE);
        assert_eq!(h.app.page.scroll, 0);
        assert_eq!(h.app.page.revealed_logs.last(), Some(&true));
    }

    #[test]
    fn test_reboot_control_shows_loading_screen() {
        let mut h = Harness::new("/");
        let reboot = h.app.page.hits.reboot.unwrap();
        h.click(reboot);
        assert!(h.app.page.loading.is_some());
        assert!(h.screen().contains("[SYSTEM] Initializing terminal interface..."));
    }
}
