use super::theme_store::{ThemeId, ThemeStore};
use super::ScreenEffects;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropdownState {
    #[default]
    Closed,
    /// `focused` is always a valid catalog index.
    Open { focused: Option<usize> },
}

/// Theme menu open/close and keyboard focus.
#[derive(Debug)]
pub struct ThemeDropdown {
    state: DropdownState,
    len: usize,
    /// False when the page has no theme menu; opening is then a no-op.
    attached: bool,
}

impl Default for ThemeDropdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeDropdown {
    pub fn new() -> Self {
        Self {
            state: DropdownState::Closed,
            len: ThemeId::CATALOG.len(),
            attached: true,
        }
    }

    pub fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
        if !attached {
            self.state = DropdownState::Closed;
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    #[cfg(test)]
    pub fn state(&self) -> DropdownState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, DropdownState::Open { .. })
    }

    pub fn focused(&self) -> Option<usize> {
        match self.state {
            DropdownState::Open { focused } => focused,
            DropdownState::Closed => None,
        }
    }

    /// The preview marker follows keyboard focus, so at most one option
    /// carries it.
    pub fn is_previewed(&self, index: usize) -> bool {
        self.focused() == Some(index)
    }

    /// Opening with the mouse focuses nothing. No-op while open.
    pub fn open_with_pointer(&mut self) -> bool {
        if self.is_open() || !self.attached {
            return false;
        }
        self.state = DropdownState::Open { focused: None };
        true
    }

    /// Opening from the keyboard focuses and previews the first option.
    /// No-op while open.
    pub fn open_with_keyboard(&mut self) -> bool {
        if self.is_open() || !self.attached {
            return false;
        }
        self.state = DropdownState::Open { focused: Some(0) };
        true
    }

    pub fn toggle_with_pointer(&mut self) {
        if !self.close() {
            self.open_with_pointer();
        }
    }

    pub fn toggle_with_keyboard(&mut self) {
        if !self.close() {
            self.open_with_keyboard();
        }
    }

    /// Returns whether the dropdown was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        self.state = DropdownState::Closed;
        was_open
    }

    /// Escape close: focus goes back to the trigger.
    pub fn close_with_escape<E: ScreenEffects + ?Sized>(&mut self, effects: &mut E) -> bool {
        if !self.close() {
            return false;
        }
        effects.focus_theme_trigger();
        true
    }

    /// Moves focus one option down, wrapping. `None` while closed.
    pub fn focus_next(&mut self) -> Option<usize> {
        let DropdownState::Open { focused } = self.state else {
            return None;
        };
        let next = match focused {
            Some(i) => (i + 1) % self.len,
            None => 0,
        };
        self.state = DropdownState::Open { focused: Some(next) };
        Some(next)
    }

    /// Moves focus one option up, wrapping. `None` while closed.
    pub fn focus_previous(&mut self) -> Option<usize> {
        let DropdownState::Open { focused } = self.state else {
            return None;
        };
        let prev = match focused {
            Some(0) | None => self.len - 1,
            Some(i) => i - 1,
        };
        self.state = DropdownState::Open { focused: Some(prev) };
        Some(prev)
    }

    /// Confirms the focused option exactly like clicking it.
    pub fn select_focused<E: ScreenEffects + ?Sized>(
        &mut self,
        store: &mut ThemeStore,
        effects: &mut E,
    ) -> Option<ThemeId> {
        let index = self.focused()?;
        self.select(index, store, effects)
    }

    /// Selects the option at `index`, then closes.
    pub fn select<E: ScreenEffects + ?Sized>(
        &mut self,
        index: usize,
        store: &mut ThemeStore,
        effects: &mut E,
    ) -> Option<ThemeId> {
        if !self.is_open() {
            return None;
        }
        let theme = ThemeId::CATALOG.get(index)?;
        let selected = store.set_active(theme.id(), effects);
        self.close();
        selected
    }
}
