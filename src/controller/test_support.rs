use crate::storage::{MemoryStore, Storage};
use crate::timer::{Task, TimerId, TimerQueue};

use super::modal::Modal;
use super::navigator::Page;
use super::theme_store::ThemeId;
use super::{Host, Location, Scheduler, ScreenEffects};

/// Host double that records every effect.
pub struct FakeHost {
    pub path: String,
    pub now: u64,
    pub timers: TimerQueue,
    pub session: MemoryStore,
    pub applied: Vec<ThemeId>,
    pub assigned: Vec<Page>,
    pub layout_reads: u32,
    pub trigger_focus_count: u32,
    pub scroll_to_top_count: u32,
    pub loading_screens: u32,
}

impl FakeHost {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            now: 0,
            timers: TimerQueue::new(),
            session: MemoryStore::new(),
            applied: Vec::new(),
            assigned: Vec::new(),
            layout_reads: 0,
            trigger_focus_count: 0,
            scroll_to_top_count: 0,
            loading_screens: 0,
        }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }

    /// Fires due timers, routing modal hides to `modal`.
    pub fn fire_due(&mut self, modal: &mut Modal) -> Vec<TimerId> {
        let mut fired = Vec::new();
        for (id, task) in self.timers.take_due(self.now) {
            if task == Task::HideModal {
                modal.on_hide_timer(id);
            }
            fired.push(id);
        }
        fired
    }
}

impl ScreenEffects for FakeHost {
    fn apply_theme(&mut self, theme: ThemeId) {
        self.applied.push(theme);
    }

    fn force_layout(&mut self) {
        self.layout_reads += 1;
    }

    fn focus_theme_trigger(&mut self) {
        self.trigger_focus_count += 1;
    }

    fn scroll_to_top(&mut self) {
        self.scroll_to_top_count += 1;
    }

    fn show_loading_screen(&mut self) {
        self.loading_screens += 1;
    }
}

impl Location for FakeHost {
    fn pathname(&self) -> &str {
        &self.path
    }

    fn assign(&mut self, page: Page) {
        self.assigned.push(page);
    }
}

impl Scheduler for FakeHost {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn set_timeout(&mut self, delay_ms: u64, task: Task) -> TimerId {
        self.timers.schedule(self.now, delay_ms, task)
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.cancel(id);
    }
}

impl Host for FakeHost {
    fn session(&mut self) -> &mut dyn Storage {
        &mut self.session
    }
}
