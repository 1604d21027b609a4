//! Keyboard command and navigation controller.
//!
//! Components own their state and expose imperative methods; the host (the
//! terminal front end) supplies effects, location, timers and session
//! storage through the traits below.

pub mod dropdown;
pub mod modal;
pub mod navigator;
pub mod reboot;
pub mod shortcuts;
pub mod theme_store;

#[cfg(test)]
pub(crate) mod test_support;

use crate::storage::Storage;
use crate::timer::{Task, TimerId};

use self::dropdown::ThemeDropdown;
use self::modal::Modal;
use self::navigator::{Page, PageNavigator};
use self::theme_store::{ThemeId, ThemeStore};

/// Visual side effects the controller asks of the page.
pub trait ScreenEffects {
    /// Make `theme` the document's active theme.
    fn apply_theme(&mut self, theme: ThemeId);
    /// Read layout so a following visual change animates.
    fn force_layout(&mut self);
    fn focus_theme_trigger(&mut self);
    fn scroll_to_top(&mut self);
    /// Replace any loading screen with a fresh boot sequence.
    fn show_loading_screen(&mut self);
}

pub trait Location {
    fn pathname(&self) -> &str;
    /// Request a page transition; the load happens after the current
    /// event handler returns.
    fn assign(&mut self, page: Page);
}

pub trait Scheduler {
    fn now_ms(&self) -> u64;
    fn set_timeout(&mut self, delay_ms: u64, task: Task) -> TimerId;
    fn clear_timeout(&mut self, id: TimerId);
}

pub trait Host: ScreenEffects + Location + Scheduler {
    fn session(&mut self) -> &mut dyn Storage;
}

/// State owned by one browsing tab.
pub struct Controller {
    pub themes: ThemeStore,
    pub dropdown: ThemeDropdown,
    pub navigator: PageNavigator,
    pub modal: Modal,
}

impl Controller {
    pub fn new(themes: ThemeStore) -> Self {
        Self {
            themes,
            dropdown: ThemeDropdown::new(),
            navigator: PageNavigator::new(),
            modal: Modal::new(),
        }
    }

    /// Resets page-scoped UI for a freshly loaded page. The navigation
    /// throttle belongs to the tab and is kept.
    pub fn reset_page_state(&mut self, has_theme_menu: bool) {
        self.dropdown.close();
        self.dropdown.set_attached(has_theme_menu);
        self.modal.reset();
    }
}
