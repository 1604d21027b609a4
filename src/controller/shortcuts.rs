//! Single keyboard entry point: classify a key event, then route it.

use crossterm::event::{KeyCode, KeyModifiers};

use super::navigator::Direction;
use super::reboot;
use super::{Controller, Host};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CloseModal,
    CloseDropdown,
    ToggleDropdown,
    ScrollToTop,
    Reboot,
    NavigateNext,
    NavigatePrevious,
    FocusNextTheme,
    FocusPreviousTheme,
    SelectFocusedTheme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Recognized; default handling suppressed.
    Handled(Command),
    /// Not a shortcut; the page's default handling applies.
    PassThrough,
}

/// UI state the classifier depends on.
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchState {
    pub modal_open: bool,
    pub dropdown_open: bool,
    pub option_focused: bool,
}

/// Ctrl or Cmd, so shortcuts behave the same on every platform.
pub fn has_platform_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER)
}

/// Maps a key event to at most one command. Branches are checked in
/// priority order and the first match wins.
pub fn classify(code: KeyCode, modifiers: KeyModifiers, state: DispatchState) -> Option<Command> {
    let platform = has_platform_modifier(modifiers);
    let shift = modifiers.contains(KeyModifiers::SHIFT);

    match code {
        KeyCode::Esc if state.modal_open => return Some(Command::CloseModal),
        KeyCode::Esc if state.dropdown_open => return Some(Command::CloseDropdown),
        KeyCode::Char(c) if platform && !shift && c == 'k' => return Some(Command::ToggleDropdown),
        KeyCode::Char(c) if platform && !shift && c == 'l' => return Some(Command::ScrollToTop),
        KeyCode::Char(c) if platform && shift && c.eq_ignore_ascii_case(&'b') => {
            return Some(Command::Reboot)
        }
        KeyCode::Right if platform => return Some(Command::NavigateNext),
        KeyCode::Left if platform => return Some(Command::NavigatePrevious),
        _ => {}
    }

    if !state.dropdown_open {
        return None;
    }
    match code {
        KeyCode::Down => Some(Command::FocusNextTheme),
        KeyCode::Up => Some(Command::FocusPreviousTheme),
        KeyCode::Enter if state.option_focused => Some(Command::SelectFocusedTheme),
        _ => None,
    }
}

impl Controller {
    pub fn dispatch_state(&self) -> DispatchState {
        DispatchState {
            modal_open: self.modal.is_open(),
            dropdown_open: self.dropdown.is_open(),
            option_focused: self.dropdown.focused().is_some(),
        }
    }

    pub fn handle_key<H: Host + ?Sized>(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        host: &mut H,
    ) -> KeyOutcome {
        let Some(command) = classify(code, modifiers, self.dispatch_state()) else {
            return KeyOutcome::PassThrough;
        };
        tracing::debug!("Shortcut {:?} -> {:?}", code, command);
        self.run(command, host);
        KeyOutcome::Handled(command)
    }

    pub fn run<H: Host + ?Sized>(&mut self, command: Command, host: &mut H) {
        match command {
            Command::CloseModal => self.modal.close(host),
            Command::CloseDropdown => {
                self.dropdown.close_with_escape(host);
            }
            Command::ToggleDropdown => self.dropdown.toggle_with_keyboard(),
            Command::ScrollToTop => host.scroll_to_top(),
            Command::Reboot => {
                reboot::reboot(host);
            }
            Command::NavigateNext | Command::NavigatePrevious => {
                let direction = if command == Command::NavigateNext {
                    Direction::Next
                } else {
                    Direction::Previous
                };
                let now = host.now_ms();
                self.navigator.navigate(host, direction, now);
            }
            Command::FocusNextTheme => {
                self.dropdown.focus_next();
            }
            Command::FocusPreviousTheme => {
                self.dropdown.focus_previous();
            }
            Command::SelectFocusedTheme => {
                self.dropdown.select_focused(&mut self.themes, host);
            }
        }
    }
}
