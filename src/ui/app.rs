use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use std::time::Duration;

use crate::config::Settings;
use crate::controller::modal::MODAL_TRANSITION_MS;
use crate::controller::navigator::{Page, PageNavigator};
use crate::controller::reboot;
use crate::controller::shortcuts::KeyOutcome;
use crate::controller::theme_store::{ThemeId, ThemeStore};
use crate::controller::{Controller, Host, Location, Scheduler, ScreenEffects};
use crate::keys;
use crate::storage::{MemoryStore, Storage};
use crate::timer::{Clock, Task, TimerId, TimerQueue};

use super::boot::LoadingScreen;
use super::document::Document;
use super::effects::{
    self, format_uptime, intersection_ratio, is_revealed, rewrite_title, smooth_scroll_step,
    FrameGate, TimelineGeometry, Typewriter, TYPING_CHAR_INTERVAL_MS, TYPING_START_DELAY_MS,
};
use super::pages::{self, PageContent};
use super::theme::Theme;

/// Skill bars start growing this long after load.
pub const SKILL_FILL_DELAY_MS: u64 = 300;
/// Event-loop tick while something is animating.
pub const FRAME_MS: u64 = 16;
/// Event-loop tick when idle.
pub const IDLE_TICK_MS: u64 = 250;

const WHEEL_ROWS: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    None,
    ThemeTrigger,
    HelpTrigger,
    SocialToggle,
    ScrollTop,
}

/// Screen rectangles of clickable elements, recorded while drawing.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    pub nav_links: Vec<(Rect, Page)>,
    pub theme_trigger: Option<Rect>,
    pub theme_options: Vec<(Rect, usize)>,
    pub help_trigger: Option<Rect>,
    pub reboot: Option<Rect>,
    pub social_badge: Option<Rect>,
    pub social_toggle: Option<Rect>,
    pub scroll_top: Option<Rect>,
    pub modal: Option<Rect>,
    pub modal_close: Option<Rect>,
}

fn hit(rect: Option<Rect>, pos: Position) -> bool {
    rect.is_some_and(|r| r.contains(pos))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Page view: everything that lives and dies with one loaded page
// ═══════════════════════════════════════════════════════════════════════════════

pub struct PageView {
    pub path: String,
    pub content: PageContent,
    pub theme: Theme,
    pub title: String,
    pub social_title: Option<String>,
    pub uptime: String,
    pub scroll: u16,
    pub scroll_target: Option<u16>,
    pub max_scroll: u16,
    pub viewport_height: u16,
    pub focus: Focus,
    pub loading: Option<LoadingScreen>,
    pub typing: Option<Typewriter>,
    pub skills_filled: bool,
    pub social_expanded: bool,
    pub frame_gate: FrameGate,
    pub timeline_progress: f32,
    pub revealed_logs: Vec<bool>,
    pub scroll_top_visible: bool,
    /// When the modal was last laid out for its opening transition.
    pub modal_shown_ms: Option<u64>,
    /// Set by `Location::assign`; loaded once the current handler returns.
    pub pending_navigation: Option<Page>,
    pub hits: HitMap,
}

impl PageView {
    fn new(path: &str, content: PageContent, settings: &Settings) -> Self {
        let user = settings.user_string.as_str();
        let today = chrono::Local::now().date_naive();
        Self {
            path: path.to_string(),
            title: rewrite_title(content.title, user),
            social_title: content.social_title.map(|t| rewrite_title(t, user)),
            uptime: format_uptime(settings.start_date(), today),
            revealed_logs: vec![false; content.log_entry_count()],
            content,
            theme: Theme::default(),
            scroll: 0,
            scroll_target: None,
            max_scroll: 0,
            viewport_height: 0,
            focus: Focus::None,
            loading: None,
            typing: None,
            skills_filled: false,
            social_expanded: false,
            frame_gate: FrameGate::default(),
            timeline_progress: 0.0,
            scroll_top_visible: false,
            modal_shown_ms: None,
            pending_navigation: None,
            hits: HitMap::default(),
        }
    }

    /// Heading as currently shown; `None` when the page has none.
    pub fn heading(&self) -> Option<&str> {
        match &self.typing {
            Some(tw) => Some(tw.visible()),
            None => self.content.heading,
        }
    }

    pub fn is_typing(&self) -> bool {
        self.typing.as_ref().is_some_and(|tw| !tw.is_done())
    }

    /// Controls reachable with Tab, in visual order.
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order = Vec::new();
        if self.content.has_theme_menu {
            order.push(Focus::ThemeTrigger);
        }
        if self.content.has_help_trigger {
            order.push(Focus::HelpTrigger);
        }
        if self.content.has_social_badge {
            order.push(Focus::SocialToggle);
        }
        if self.scroll_top_visible {
            order.push(Focus::ScrollTop);
        }
        order
    }

    fn cycle_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        if order.is_empty() {
            self.focus = Focus::None;
            return;
        }
        let current = order.iter().position(|f| *f == self.focus);
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => order.len() - 1,
            (Some(i), true) => (i + 1) % order.len(),
            (Some(i), false) => (i + order.len() - 1) % order.len(),
        };
        self.focus = order[next];
    }

    fn set_scroll(&mut self, rows: u16, threshold: u16) {
        let rows = rows.min(self.max_scroll);
        if rows != self.scroll {
            self.scroll = rows;
            self.frame_gate.request();
        }
        self.scroll_top_visible = self.scroll > threshold;
        if !self.scroll_top_visible && self.focus == Focus::ScrollTop {
            self.focus = Focus::None;
        }
    }

    /// Records the laid-out document and, at most once per frame, runs
    /// the scroll-linked effects. Returns whether anything visible changed.
    pub fn update_layout(&mut self, doc: &Document, viewport_height: u16, threshold: u16) -> bool {
        if viewport_height != self.viewport_height {
            self.viewport_height = viewport_height;
            self.frame_gate.request();
        }
        self.max_scroll = doc.height().saturating_sub(viewport_height);
        if self.scroll > self.max_scroll {
            self.set_scroll(self.max_scroll, threshold);
        }
        if !self.frame_gate.take() {
            return false;
        }

        let mut changed = false;
        for (i, span) in doc.logs.iter().enumerate() {
            let ratio = intersection_ratio(span.top, span.height, self.scroll, viewport_height);
            // Once seen, an entry stays revealed
            if let Some(slot) = self.revealed_logs.get_mut(i) {
                if !*slot && is_revealed(ratio) {
                    *slot = true;
                    changed = true;
                }
            }
        }

        if let Some(timeline) = &doc.timeline {
            let geometry = TimelineGeometry {
                viewport_height: f32::from(viewport_height),
                scroll_offset: f32::from(self.scroll),
                document_height: f32::from(doc.height()),
                container_top: f32::from(timeline.top) - f32::from(self.scroll),
                container_height: f32::from(timeline.height),
            };
            let progress = effects::timeline_progress(&geometry);
            changed |= progress != self.timeline_progress;
            self.timeline_progress = progress;
        }
        changed
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Host bridge: gives the controller access to the page, timers and session
// ═══════════════════════════════════════════════════════════════════════════════

pub struct PageHost<'a> {
    pub page: &'a mut PageView,
    pub timers: &'a mut TimerQueue,
    pub session: &'a mut MemoryStore,
    pub user: &'a str,
    pub now_ms: u64,
}

impl ScreenEffects for PageHost<'_> {
    fn apply_theme(&mut self, theme: ThemeId) {
        self.page.theme = Theme::load(theme);
    }

    fn force_layout(&mut self) {
        self.page.modal_shown_ms = Some(self.now_ms);
    }

    fn focus_theme_trigger(&mut self) {
        self.page.focus = Focus::ThemeTrigger;
    }

    fn scroll_to_top(&mut self) {
        self.page.scroll_target = Some(0);
    }

    fn show_loading_screen(&mut self) {
        if let Some(old) = self.page.loading.take() {
            old.cancel(self.timers);
        }
        self.page.loading = Some(LoadingScreen::start(self.user, self.now_ms, self.timers));
    }
}

impl Location for PageHost<'_> {
    fn pathname(&self) -> &str {
        &self.page.path
    }

    fn assign(&mut self, page: Page) {
        self.page.pending_navigation = Some(page);
    }
}

impl Scheduler for PageHost<'_> {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn set_timeout(&mut self, delay_ms: u64, task: Task) -> TimerId {
        self.timers.schedule(self.now_ms, delay_ms, task)
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.cancel(id);
    }
}

impl Host for PageHost<'_> {
    fn session(&mut self) -> &mut dyn Storage {
        &mut *self.session
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// App: one browsing tab
// ═══════════════════════════════════════════════════════════════════════════════

pub struct App {
    pub controller: Controller,
    pub page: PageView,
    pub settings: Settings,
    timers: TimerQueue,
    session: MemoryStore,
    clock: Box<dyn Clock>,
    pub should_quit: bool,
}

impl App {
    pub fn new(settings: Settings, durable: Box<dyn Storage>, clock: Box<dyn Clock>, path: &str) -> Self {
        let content = pages::content_for(path);
        let page = PageView::new(path, content, &settings);
        let mut app = Self {
            controller: Controller::new(ThemeStore::new(durable)),
            page,
            settings,
            timers: TimerQueue::new(),
            session: MemoryStore::new(),
            clock,
            should_quit: false,
        };
        app.load_page(path);
        app
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn window_title(&self) -> &str {
        &self.page.title
    }

    #[cfg(test)]
    pub fn session(&self) -> &MemoryStore {
        &self.session
    }

    #[cfg(test)]
    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    fn with_host<R>(&mut self, f: impl FnOnce(&mut Controller, &mut PageHost<'_>) -> R) -> R {
        let now_ms = self.clock.now_ms();
        let mut host = PageHost {
            page: &mut self.page,
            timers: &mut self.timers,
            session: &mut self.session,
            user: &self.settings.user_string,
            now_ms,
        };
        f(&mut self.controller, &mut host)
    }

    /// Replaces the current page. Page-scoped state and timers are dropped;
    /// the navigation throttle and session storage survive.
    pub fn load_page(&mut self, path: &str) {
        self.timers.clear();
        let content = pages::content_for(path);
        self.controller.reset_page_state(content.has_theme_menu);
        self.page = PageView::new(path, content, &self.settings);

        self.with_host(|controller, host| {
            controller.themes.apply(host);

            let plan = reboot::plan_boot(host.session());
            if plan.shows_loading_screen() {
                host.show_loading_screen();
            }
            if plan.first_visit {
                if let Some(heading) = host.page.content.heading {
                    host.page.typing = Some(Typewriter::new(heading));
                    host.set_timeout(TYPING_START_DELAY_MS, Task::StartTyping);
                }
            }
            if host.page.content.skills().next().is_some() {
                host.set_timeout(SKILL_FILL_DELAY_MS, Task::FillSkillBars);
            }
        });
        self.page.frame_gate.request();
        tracing::info!("Loaded {} ({})", path, self.page.title);
    }

    /// F5: reload the current page as a fresh document.
    pub fn reload(&mut self) {
        self.controller.navigator = PageNavigator::new();
        let path = self.page.path.clone();
        self.load_page(&path);
    }

    /// Runs a page transition requested during the last event.
    fn finish_event(&mut self) {
        if let Some(page) = self.page.pending_navigation.take() {
            self.load_page(&page.path());
        }
    }

    // ─── Keyboard ───────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent) {
        if !keys::is_press(&key) {
            return;
        }
        let outcome = self.with_host(|controller, host| controller.handle_key(key.code, key.modifiers, host));
        if outcome == KeyOutcome::PassThrough {
            self.handle_page_key(key.code, key.modifiers);
        }
        self.finish_event();
    }

    /// Default handling for keys the shortcut layer did not consume.
    fn handle_page_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let page_rows = self.page.viewport_height.saturating_sub(1).max(1) as i32;
        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => self.should_quit = true,
            KeyCode::Char('q') | KeyCode::Char('Q') if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT => {
                self.should_quit = true
            }
            KeyCode::F(5) => self.reload(),
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-page_rows),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(page_rows),
            KeyCode::Home => self.scroll_to(0),
            KeyCode::End => self.scroll_to(u16::MAX),
            KeyCode::Tab => self.page.cycle_focus(true),
            KeyCode::BackTab => self.page.cycle_focus(false),
            KeyCode::Enter => self.activate_focused(),
            _ => {}
        }
    }

    /// Enter on a focused control behaves like clicking it.
    fn activate_focused(&mut self) {
        match self.page.focus {
            Focus::None => {}
            Focus::ThemeTrigger => self.controller.dropdown.toggle_with_pointer(),
            Focus::HelpTrigger => {
                self.with_host(|controller, host| controller.modal.open(host));
                self.close_on_document_click(None);
            }
            Focus::SocialToggle => {
                self.page.social_expanded = !self.page.social_expanded;
                self.controller.dropdown.close();
            }
            Focus::ScrollTop => {
                self.page.scroll_target = Some(0);
                self.close_on_document_click(None);
            }
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        let target = (i32::from(self.page.scroll) + delta).clamp(0, i32::from(u16::MAX)) as u16;
        self.scroll_to(target);
    }

    /// Immediate scroll; cancels any smooth scroll in progress.
    fn scroll_to(&mut self, rows: u16) {
        self.page.scroll_target = None;
        self.page.set_scroll(rows, self.settings.scroll_top_threshold);
    }

    // ─── Mouse ──────────────────────────────────────────────────────────

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        match event.kind {
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_ROWS),
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_ROWS),
            MouseEventKind::Down(MouseButton::Left) => {
                self.click(Position::new(event.column, event.row));
            }
            _ => {}
        }
        self.finish_event();
    }

    fn click(&mut self, pos: Position) {
        // The boot screen covers the page
        if self.page.loading.is_some() {
            return;
        }

        let hits = self.page.hits.clone();
        if self.controller.modal.in_layout() {
            let inside = hit(hits.modal, pos);
            if hit(hits.modal_close, pos) || !inside {
                self.with_host(|controller, host| controller.modal.close(host));
            }
            return;
        }

        // The trigger handles its own clicks; document handlers do not see them
        if hit(hits.theme_trigger, pos) {
            self.page.focus = Focus::ThemeTrigger;
            self.controller.dropdown.toggle_with_pointer();
            return;
        }

        let mut focus = Focus::None;
        if let Some((_, index)) = hits.theme_options.iter().find(|(r, _)| r.contains(pos)) {
            let index = *index;
            self.with_host(|controller, host| {
                controller.dropdown.select(index, &mut controller.themes, host);
            });
        } else if hit(hits.help_trigger, pos) {
            focus = Focus::HelpTrigger;
            self.with_host(|controller, host| controller.modal.open(host));
        } else if hit(hits.social_toggle, pos) {
            focus = Focus::SocialToggle;
            self.page.social_expanded = !self.page.social_expanded;
        } else if hit(hits.scroll_top, pos) {
            focus = Focus::ScrollTop;
            self.page.scroll_target = Some(0);
        } else if hit(hits.reboot, pos) {
            self.with_host(|_, host| {
                reboot::reboot(host);
            });
        } else if let Some((_, page)) = hits.nav_links.iter().find(|(r, _)| r.contains(pos)) {
            self.page.pending_navigation = Some(*page);
        }
        self.page.focus = focus;
        self.close_on_document_click(Some(pos));
    }

    /// Document-level click handlers: any click closes the theme menu, and
    /// a click outside the social badge collapses it.
    fn close_on_document_click(&mut self, pos: Option<Position>) {
        self.controller.dropdown.close();
        let inside_badge = pos.is_some_and(|p| hit(self.page.hits.social_badge, p));
        if !inside_badge {
            self.page.social_expanded = false;
        }
    }

    pub fn handle_resize(&mut self) {
        self.page.frame_gate.request();
    }

    // ─── Timers and animation ───────────────────────────────────────────

    /// Fires due timers and advances animations.
    pub fn on_tick(&mut self) {
        let now = self.clock.now_ms();
        for (id, task) in self.timers.take_due(now) {
            self.run_task(id, task, now);
        }

        if let Some(target) = self.page.scroll_target {
            let target = target.min(self.page.max_scroll);
            let next = smooth_scroll_step(self.page.scroll, target);
            self.page.set_scroll(next, self.settings.scroll_top_threshold);
            if next == target {
                self.page.scroll_target = None;
            }
        }
        self.finish_event();
    }

    fn run_task(&mut self, id: TimerId, task: Task, now: u64) {
        match task {
            Task::HideModal => {
                if self.controller.modal.on_hide_timer(id) {
                    self.page.modal_shown_ms = None;
                }
            }
            Task::FadeLoadingScreen => {
                if let Some(screen) = self.page.loading.as_mut() {
                    screen.on_fade(id, now, &mut self.timers);
                }
            }
            Task::RemoveLoadingScreen => {
                if self.page.loading.as_ref().is_some_and(|s| s.on_remove(id)) {
                    self.page.loading = None;
                }
            }
            Task::StartTyping => {
                self.timers.schedule(now, TYPING_CHAR_INTERVAL_MS, Task::TypeNextChar);
            }
            Task::TypeNextChar => {
                if let Some(tw) = self.page.typing.as_mut() {
                    if tw.advance() {
                        self.timers.schedule(now, TYPING_CHAR_INTERVAL_MS, Task::TypeNextChar);
                    }
                }
            }
            Task::FillSkillBars => self.page.skills_filled = true,
        }
    }

    /// Whether the modal is mid-transition and should be drawn faded.
    pub fn modal_faded(&self, now_ms: u64) -> bool {
        if !self.controller.modal.is_open() {
            return self.controller.modal.in_layout();
        }
        self.page
            .modal_shown_ms
            .is_some_and(|shown| now_ms.saturating_sub(shown) < MODAL_TRANSITION_MS)
    }

    fn is_animating(&self, now_ms: u64) -> bool {
        self.page.scroll_target.is_some()
            || self.modal_faded(now_ms)
            || self.page.loading.as_ref().is_some_and(|s| s.is_animating(now_ms))
    }

    /// How long the event loop may block waiting for input.
    pub fn poll_timeout(&self) -> Duration {
        let now = self.clock.now_ms();
        if self.is_animating(now) {
            return Duration::from_millis(FRAME_MS);
        }
        let until_timer = self
            .timers
            .next_deadline()
            .map(|due| due.saturating_sub(now))
            .unwrap_or(IDLE_TICK_MS);
        Duration::from_millis(until_timer.min(IDLE_TICK_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::modal::ModalState;
    use crate::storage::{HAS_VISITED_KEY, PENDING_REBOOT_KEY};
    use crate::timer::ManualClock;
    use crate::ui::boot::{BOOT_DISPLAY_MS, BOOT_FADE_MS};
    use std::rc::Rc;

    const CTRL: KeyModifiers = KeyModifiers::CONTROL;

    fn app_at(path: &str) -> (App, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::new(10_000));
        let app = App::new(
            Settings::default(),
            Box::new(MemoryStore::new()),
            Box::new(Rc::clone(&clock)),
            path,
        );
        (app, clock)
    }

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        app.handle_key(KeyEvent::new(code, modifiers));
    }

    fn tick_after(app: &mut App, clock: &ManualClock, ms: u64) {
        clock.advance(ms);
        app.on_tick();
    }

    #[test]
    fn test_first_visit_boots_and_types_heading() {
        let (mut app, clock) = app_at("/");
        assert!(app.page.loading.is_some());
        assert_eq!(app.session().get(HAS_VISITED_KEY).as_deref(), Some("true"));
        assert_eq!(app.page.heading(), Some(""));

        tick_after(&mut app, &clock, TYPING_START_DELAY_MS);
        assert_eq!(app.page.heading(), Some(""));
        tick_after(&mut app, &clock, TYPING_CHAR_INTERVAL_MS);
        assert_eq!(app.page.heading(), Some("H"));
        assert!(app.page.is_typing());

        for _ in 0..40 {
            tick_after(&mut app, &clock, TYPING_CHAR_INTERVAL_MS);
        }
        assert_eq!(app.page.heading(), Some("Hello, World. Welcome aboard."));
        assert!(!app.page.is_typing());
    }

    #[test]
    fn test_loading_screen_fades_then_goes_away() {
        let (mut app, clock) = app_at("/");
        tick_after(&mut app, &clock, BOOT_DISPLAY_MS);
        assert!(app.page.loading.as_ref().is_some_and(|s| s.is_fading()));
        tick_after(&mut app, &clock, BOOT_FADE_MS);
        assert!(app.page.loading.is_none());
    }

    #[test]
    fn test_later_pages_skip_boot_and_typing() {
        let (mut app, clock) = app_at("/");
        clock.advance(5_000);
        press(&mut app, KeyCode::Right, CTRL);

        assert_eq!(app.page.path, "/projects.html");
        assert!(app.page.loading.is_none());
        assert!(app.page.typing.is_none());
        assert_eq!(app.page.heading(), Some("Projects"));
    }

    #[test]
    fn test_navigation_throttle_survives_page_loads() {
        let (mut app, clock) = app_at("/projects.html");
        press(&mut app, KeyCode::Right, CTRL);
        assert_eq!(app.page.path, "/papers.html");

        clock.advance(400);
        press(&mut app, KeyCode::Right, CTRL);
        assert_eq!(app.page.path, "/papers.html");

        clock.advance(400);
        press(&mut app, KeyCode::Right, CTRL);
        assert_eq!(app.page.path, "/index.html");
    }

    #[test]
    fn test_reload_resets_throttle() {
        let (mut app, clock) = app_at("/projects.html");
        press(&mut app, KeyCode::Left, CTRL);
        assert_eq!(app.page.path, "/index.html");

        clock.advance(100);
        press(&mut app, KeyCode::F(5), KeyModifiers::NONE);
        press(&mut app, KeyCode::Left, CTRL);
        assert_eq!(app.page.path, "/papers.html");
    }

    #[test]
    fn test_reboot_from_other_page_replays_on_home() {
        let (mut app, clock) = app_at("/papers.html");
        tick_after(&mut app, &clock, BOOT_DISPLAY_MS);
        tick_after(&mut app, &clock, BOOT_FADE_MS);
        assert!(app.page.loading.is_none());

        press(&mut app, KeyCode::Char('B'), CTRL | KeyModifiers::SHIFT);
        assert_eq!(app.page.path, "/index.html");
        assert!(app.page.loading.is_some());
        assert_eq!(app.session().get(PENDING_REBOOT_KEY), None);
        // Not a first visit: heading shown in full
        assert!(app.page.typing.is_none());
    }

    #[test]
    fn test_reboot_on_home_replaces_loading_screen() {
        let (mut app, clock) = app_at("/");
        clock.advance(3_000);
        press(&mut app, KeyCode::Char('b'), CTRL | KeyModifiers::SHIFT);

        // Old fade timer cancelled: still showing after the first deadline
        tick_after(&mut app, &clock, 600);
        assert!(app.page.loading.as_ref().is_some_and(|s| !s.is_fading()));
        tick_after(&mut app, &clock, BOOT_DISPLAY_MS);
        assert!(app.page.loading.as_ref().is_some_and(|s| s.is_fading()));
    }

    #[test]
    fn test_keyboard_theme_selection() {
        let (mut app, _clock) = app_at("/");
        press(&mut app, KeyCode::Char('k'), CTRL);
        press(&mut app, KeyCode::Down, KeyModifiers::NONE);
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.controller.themes.get_active(), ThemeId::Ocean);
        assert_eq!(app.page.theme.id, ThemeId::Ocean);
        assert!(!app.controller.dropdown.is_open());
    }

    #[test]
    fn test_theme_persists_across_page_loads() {
        let (mut app, clock) = app_at("/");
        press(&mut app, KeyCode::Char('k'), CTRL);
        press(&mut app, KeyCode::Up, KeyModifiers::NONE);
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        clock.advance(1_000);
        press(&mut app, KeyCode::Right, CTRL);
        assert_eq!(app.page.theme.id, ThemeId::Basic);
    }

    #[test]
    fn test_help_modal_via_focus_and_escape() {
        let (mut app, clock) = app_at("/");
        press(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        press(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.page.focus, Focus::HelpTrigger);

        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.controller.modal.state(), ModalState::Visible);
        assert!(app.modal_faded(app.now_ms()));

        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(!app.controller.modal.is_open());
        assert!(app.controller.modal.in_layout());
        tick_after(&mut app, &clock, MODAL_TRANSITION_MS);
        assert_eq!(app.controller.modal.state(), ModalState::Hidden);
    }

    #[test]
    fn test_reopening_help_cancels_pending_hide() {
        let (mut app, clock) = app_at("/");
        app.page.focus = Focus::HelpTrigger;
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        tick_after(&mut app, &clock, MODAL_TRANSITION_MS - 100);

        app.page.focus = Focus::HelpTrigger;
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        tick_after(&mut app, &clock, 5_000);
        assert_eq!(app.controller.modal.state(), ModalState::Visible);
        assert!(app.controller.modal.in_layout());
    }

    #[test]
    fn test_missing_page_skips_theme_menu() {
        let (mut app, _clock) = app_at("/nowhere.html");
        press(&mut app, KeyCode::Char('k'), CTRL);
        assert!(!app.controller.dropdown.is_open());
        assert!(!app.controller.dropdown.is_attached());
        assert!(app.page.focus_order().is_empty());
        assert_eq!(app.window_title(), "404 | yo@website");
    }

    #[test]
    fn test_skill_bars_fill_after_delay() {
        let (mut app, clock) = app_at("/");
        assert!(!app.page.skills_filled);
        tick_after(&mut app, &clock, SKILL_FILL_DELAY_MS - 1);
        assert!(!app.page.skills_filled);
        tick_after(&mut app, &clock, 1);
        assert!(app.page.skills_filled);
    }

    #[test]
    fn test_poll_timeout_tracks_next_timer() {
        let (mut app, clock) = app_at("/projects.html");
        for _ in 0..20 {
            tick_after(&mut app, &clock, 1_000);
        }
        assert!(app.timers().is_empty());
        assert_eq!(app.poll_timeout(), Duration::from_millis(IDLE_TICK_MS));

        app.page.scroll_target = Some(0);
        assert_eq!(app.poll_timeout(), Duration::from_millis(FRAME_MS));
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _clock) = app_at("/");
        press(&mut app, KeyCode::Char('x'), KeyModifiers::NONE);
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(app.should_quit);

        let (mut app, _clock) = app_at("/");
        press(&mut app, KeyCode::Char('c'), CTRL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_title_rewritten_with_user_string() {
        let (app, _clock) = app_at("/projects.html");
        assert_eq!(app.window_title(), "Projects | yo@website");
        assert_eq!(app.page.social_title.as_deref(), Some("Projects by yo@website"));
    }
}
