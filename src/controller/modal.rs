use crate::timer::{Task, TimerId};

use super::{Scheduler, ScreenEffects};

/// Exit transition length; the modal leaves layout once it elapses.
pub const MODAL_TRANSITION_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Hidden,
    /// In layout, visible style not applied yet.
    Opening,
    Visible,
    /// Visible style removed; `hide_timer` takes it out of layout.
    Closing { hide_timer: TimerId },
}

#[derive(Debug, Default)]
pub struct Modal {
    state: ModalState,
}

impl Modal {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Opening | ModalState::Visible)
    }

    /// Still occupies layout (includes the closing transition).
    pub fn in_layout(&self) -> bool {
        !matches!(self.state, ModalState::Hidden)
    }

    pub fn open<H: ScreenEffects + Scheduler + ?Sized>(&mut self, host: &mut H) {
        if let ModalState::Closing { hide_timer } = self.state {
            host.clear_timeout(hide_timer);
        }
        if self.state == ModalState::Visible {
            return;
        }
        self.state = ModalState::Opening;
        host.force_layout();
        self.state = ModalState::Visible;
    }

    pub fn close<H: Scheduler + ?Sized>(&mut self, host: &mut H) {
        if !self.is_open() {
            return;
        }
        let hide_timer = host.set_timeout(MODAL_TRANSITION_MS, Task::HideModal);
        self.state = ModalState::Closing { hide_timer };
    }

    /// Handles a fired hide timer. Timers superseded by a reopen are
    /// ignored; returns whether the modal left layout.
    pub fn on_hide_timer(&mut self, id: TimerId) -> bool {
        match self.state {
            ModalState::Closing { hide_timer } if hide_timer == id => {
                self.state = ModalState::Hidden;
                true
            }
            _ => false,
        }
    }

    /// Page unload: drop straight to hidden. Pending timers die with the page.
    pub fn reset(&mut self) {
        self.state = ModalState::Hidden;
    }
}
