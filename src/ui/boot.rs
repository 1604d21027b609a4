//! Boot-sequence loading screen.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use crate::timer::{Task, TimerId, TimerQueue};

use super::theme::Theme;

/// How long the boot lines stay before fading.
pub const BOOT_DISPLAY_MS: u64 = 3500;
/// Fade-out length; the screen is removed when it ends.
pub const BOOT_FADE_MS: u64 = 500;
/// Delay between two boot lines appearing.
pub const BOOT_LINE_STAGGER_MS: u64 = 400;

pub fn boot_lines(user: &str) -> Vec<String> {
    vec![
        "[SYSTEM] Initializing terminal interface...".to_string(),
        "[SYSTEM] Loading user profile...".to_string(),
        "[SYSTEM] Mounting file systems...".to_string(),
        "[SYSTEM] Starting network services...".to_string(),
        "[OK] All systems operational".to_string(),
        format!("[SYSTEM] Welcome to {}", user),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootPhase {
    Showing { fade_timer: TimerId },
    Fading { remove_timer: TimerId },
}

#[derive(Debug)]
pub struct LoadingScreen {
    lines: Vec<String>,
    started_ms: u64,
    phase: BootPhase,
}

impl LoadingScreen {
    /// Shows the screen and schedules its fade.
    pub fn start(user: &str, now_ms: u64, timers: &mut TimerQueue) -> Self {
        let fade_timer = timers.schedule(now_ms, BOOT_DISPLAY_MS, Task::FadeLoadingScreen);
        Self {
            lines: boot_lines(user),
            started_ms: now_ms,
            phase: BootPhase::Showing { fade_timer },
        }
    }

    /// Drops the pending timer of a screen being replaced.
    pub fn cancel(&self, timers: &mut TimerQueue) {
        match self.phase {
            BootPhase::Showing { fade_timer } => timers.cancel(fade_timer),
            BootPhase::Fading { remove_timer } => timers.cancel(remove_timer),
        };
    }

    #[cfg(test)]
    pub fn phase(&self) -> BootPhase {
        self.phase
    }

    pub fn is_fading(&self) -> bool {
        matches!(self.phase, BootPhase::Fading { .. })
    }

    /// Handles a fired fade timer; ids from a replaced screen are ignored.
    pub fn on_fade(&mut self, id: TimerId, now_ms: u64, timers: &mut TimerQueue) -> bool {
        match self.phase {
            BootPhase::Showing { fade_timer } if fade_timer == id => {
                let remove_timer = timers.schedule(now_ms, BOOT_FADE_MS, Task::RemoveLoadingScreen);
                self.phase = BootPhase::Fading { remove_timer };
                true
            }
            _ => false,
        }
    }

    /// True when `id` is this screen's removal timer.
    pub fn on_remove(&self, id: TimerId) -> bool {
        matches!(self.phase, BootPhase::Fading { remove_timer } if remove_timer == id)
    }

    /// Lines revealed so far; one more every stagger interval.
    pub fn visible_lines(&self, now_ms: u64) -> &[String] {
        let elapsed = now_ms.saturating_sub(self.started_ms);
        let count = (elapsed / BOOT_LINE_STAGGER_MS + 1) as usize;
        &self.lines[..count.min(self.lines.len())]
    }

    /// Still revealing lines, so the event loop keeps redrawing.
    pub fn is_animating(&self, now_ms: u64) -> bool {
        self.visible_lines(now_ms).len() < self.lines.len()
    }
}

pub fn draw(frame: &mut Frame, screen: &LoadingScreen, area: Rect, theme: &Theme, now_ms: u64) {
    let colors = &theme.boot;
    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(colors.bg)), area);

    let lines: Vec<Line> = screen
        .visible_lines(now_ms)
        .iter()
        .map(|text| {
            let fg = if screen.is_fading() {
                colors.faded
            } else if text.starts_with("[OK]") {
                colors.ok
            } else {
                colors.system
            };
            let mut style = Style::default().fg(fg);
            if screen.is_fading() {
                style = style.add_modifier(Modifier::DIM);
            }
            Line::from(Span::styled(text.clone(), style))
        })
        .collect();

    let height = (lines.len() as u16).min(area.height);
    let width = screen
        .lines
        .iter()
        .map(|l| l.chars().count() as u16)
        .max()
        .unwrap_or(0)
        .min(area.width);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(screen.lines.len() as u16) / 2;
    frame.render_widget(Paragraph::new(lines), Rect::new(x, y, width, height));
}
