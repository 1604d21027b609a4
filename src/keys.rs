use crossterm::event::{KeyEvent, KeyEventKind};

// ─── Shortcut reference (shown in the help modal) ──────────────────────

/// Key strings use `mod` for the platform modifier (Ctrl or Cmd).
pub struct ShortcutHelp {
    pub keys: &'static [&'static str],
    pub description: &'static str,
}

pub const SHORTCUT_HELP: &[ShortcutHelp] = &[
    ShortcutHelp { keys: &["mod+k"], description: "Toggle theme menu" },
    ShortcutHelp { keys: &["up", "down"], description: "Navigate theme menu" },
    ShortcutHelp { keys: &["enter"], description: "Apply focused theme" },
    ShortcutHelp { keys: &["mod+left", "mod+right"], description: "Navigate pages" },
    ShortcutHelp { keys: &["mod+l"], description: "Scroll to top" },
    ShortcutHelp { keys: &["mod+shift+b"], description: "Reboot" },
    ShortcutHelp { keys: &["esc"], description: "Close menu or dialog" },
];

impl ShortcutHelp {
    /// e.g. `"Ctrl/Cmd+← / Ctrl/Cmd+→"`
    pub fn display(&self) -> String {
        self.keys
            .iter()
            .map(|k| format_key_display(k))
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

// ─── Key string formatting ─────────────────────────────────────────────

/// Format a key string for user-facing display.
///
/// `"mod+shift+b"` → `"Ctrl/Cmd+Shift+B"`, `"left"` → `"←"`, `"esc"` → `"Esc"`.
pub fn format_key_display(s: &str) -> String {
    let s = s.trim().to_lowercase();
    let parts: Vec<&str> = s.split('+').collect();

    let mut result = Vec::new();

    for (i, part) in parts.iter().enumerate() {
        let is_last = i == parts.len() - 1;
        let formatted: String = if !is_last {
            // Modifier
            match *part {
                "mod" => "Ctrl/Cmd".into(),
                "ctrl" | "control" => "Ctrl".into(),
                "cmd" | "super" => "Cmd".into(),
                "shift" => "Shift".into(),
                "alt" => "Alt".into(),
                other => other.to_string(),
            }
        } else {
            // Key name
            match *part {
                "up" => "↑".into(),
                "down" => "↓".into(),
                "left" => "←".into(),
                "right" => "→".into(),
                "enter" | "return" => "Enter".into(),
                "esc" | "escape" => "Esc".into(),
                "tab" => "Tab".into(),
                "space" => "Space".into(),
                "pageup" => "PgUp".into(),
                "pagedown" => "PgDn".into(),
                s if s.chars().count() == 1 => s.to_uppercase(),
                other => other.to_string(),
            }
        };
        result.push(formatted);
    }

    result.join("+")
}

/// Terminals with enhanced keyboard reporting also send release and
/// repeat events; only presses reach the dispatcher.
pub fn is_press(event: &KeyEvent) -> bool {
    event.kind == KeyEventKind::Press
}

// ─── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn test_format_key_display() {
        assert_eq!(format_key_display("mod+k"), "Ctrl/Cmd+K");
        assert_eq!(format_key_display("mod+shift+b"), "Ctrl/Cmd+Shift+B");
        assert_eq!(format_key_display("ctrl+l"), "Ctrl+L");
        assert_eq!(format_key_display("cmd+left"), "Cmd+←");
        assert_eq!(format_key_display("up"), "↑");
        assert_eq!(format_key_display("esc"), "Esc");
        assert_eq!(format_key_display("enter"), "Enter");
        assert_eq!(format_key_display("pagedown"), "PgDn");
        assert_eq!(format_key_display("?"), "?");
    }

    #[test]
    fn test_shortcut_help_display() {
        let nav = SHORTCUT_HELP
            .iter()
            .find(|s| s.description == "Navigate pages")
            .unwrap();
        assert_eq!(nav.display(), "Ctrl/Cmd+← / Ctrl/Cmd+→");
    }

    #[test]
    fn test_only_presses_are_dispatched() {
        let mut event = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL);
        assert!(is_press(&event));
        event.kind = KeyEventKind::Release;
        event.state = KeyEventState::NONE;
        assert!(!is_press(&event));
    }
}
