//! Page effects that do not depend on the terminal: title rewriting, career
//! uptime, nav highlighting, timeline geometry and the frame gate.

use chrono::NaiveDate;
use regex::{NoExpand, Regex};

// ═══════════════════════════════════════════════════════════════════════════════
// User string and titles
// ═══════════════════════════════════════════════════════════════════════════════

/// Placeholder replaced in page titles, matched case-insensitively.
pub const TITLE_PLACEHOLDER: &str = "User@Website";

/// Replaces every case-insensitive `User@Website` in `title` with `user`.
pub fn rewrite_title(title: &str, user: &str) -> String {
    match Regex::new(&format!("(?i){}", regex::escape(TITLE_PLACEHOLDER))) {
        Ok(re) => re.replace_all(title, NoExpand(user)).into_owned(),
        Err(e) => {
            tracing::warn!("Title pattern rejected: {}", e);
            title.to_string()
        }
    }
}

/// Splits `yo@website` into `("yo", Some("website"))` so the `@` can be
/// highlighted. Without an `@` the whole string is the name.
pub fn split_user_string(user: &str) -> (&str, Option<&str>) {
    match user.split_once('@') {
        Some((name, host)) => (name, Some(host)),
        None => (user, None),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Career uptime
// ═══════════════════════════════════════════════════════════════════════════════

const DAYS_PER_YEAR: i64 = 365;
const DAYS_PER_MONTH: i64 = 30;

/// `"<years> Years, <months> Months"` between `start` and `today`, counting
/// 365-day years and 30-day months. A start in the future reads as zero.
pub fn format_uptime(start: NaiveDate, today: NaiveDate) -> String {
    let days = (today - start).num_days().max(0);
    let years = days / DAYS_PER_YEAR;
    let months = (days % DAYS_PER_YEAR) / DAYS_PER_MONTH;
    format!("{} Years, {} Months", years, months)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Header navigation
// ═══════════════════════════════════════════════════════════════════════════════

pub fn is_nav_active(path: &str, href: &str) -> bool {
    path.ends_with(href) || (path.ends_with('/') && href == "index.html")
}

// ═══════════════════════════════════════════════════════════════════════════════
// Timeline
// All lengths are in terminal rows.
// ═══════════════════════════════════════════════════════════════════════════════

/// Fraction of the viewport height where the reading line sits.
pub const TRIGGER_RATIO: f32 = 0.4;
/// Within this distance of the document bottom the progress line is full.
pub const BOTTOM_SLACK: f32 = 2.0;
/// Items light up slightly before the progress line reaches them.
pub const ACTIVATION_BUFFER: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineGeometry {
    pub viewport_height: f32,
    pub scroll_offset: f32,
    pub document_height: f32,
    /// Container top relative to the top of the viewport.
    pub container_top: f32,
    pub container_height: f32,
}

/// Length of the progress line inside the container.
pub fn timeline_progress(g: &TimelineGeometry) -> f32 {
    if g.viewport_height + g.scroll_offset >= g.document_height - BOTTOM_SLACK {
        return g.container_height;
    }
    let trigger = g.viewport_height * TRIGGER_RATIO;
    (trigger - g.container_top).clamp(0.0, g.container_height.max(0.0))
}

/// `item_top` is relative to the container.
pub fn is_item_active(item_top: f32, progress: f32) -> bool {
    item_top < progress + ACTIVATION_BUFFER
}

/// Coalesces recomputation requests to at most one per frame.
#[derive(Debug, Default)]
pub struct FrameGate {
    in_flight: bool,
}

impl FrameGate {
    /// Returns true when this call scheduled the recomputation.
    pub fn request(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Called once per frame; true if a recomputation is due now.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.in_flight)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Log entry reveal
// ═══════════════════════════════════════════════════════════════════════════════

/// Share of an element that must be on screen for it to be revealed.
pub const REVEAL_THRESHOLD: f32 = 0.1;

/// Fraction of the rows `[top, top + height)` inside `[view_top, view_top + view_height)`.
pub fn intersection_ratio(top: u16, height: u16, view_top: u16, view_height: u16) -> f32 {
    if height == 0 {
        return 0.0;
    }
    let start = top.max(view_top);
    let end = top.saturating_add(height).min(view_top.saturating_add(view_height));
    if end <= start {
        return 0.0;
    }
    f32::from(end - start) / f32::from(height)
}

pub fn is_revealed(ratio: f32) -> bool {
    ratio >= REVEAL_THRESHOLD
}

// ═══════════════════════════════════════════════════════════════════════════════
// Heading typing effect
// ═══════════════════════════════════════════════════════════════════════════════

/// Delay before the first character appears.
pub const TYPING_START_DELAY_MS: u64 = 2000;
pub const TYPING_CHAR_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    typed: usize,
}

impl Typewriter {
    /// Starts with the heading cleared.
    pub fn new(text: &str) -> Self {
        Self { text: text.to_string(), typed: 0 }
    }

    pub fn visible(&self) -> &str {
        match self.text.char_indices().nth(self.typed) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }

    /// Types one character; returns whether more remain.
    pub fn advance(&mut self) -> bool {
        let total = self.text.chars().count();
        if self.typed < total {
            self.typed += 1;
        }
        self.typed < total
    }

    pub fn is_done(&self) -> bool {
        self.typed >= self.text.chars().count()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Smooth scrolling
// ═══════════════════════════════════════════════════════════════════════════════

/// One animation step from `current` toward `target`; covers a quarter of
/// the remaining distance, at least one row.
pub fn smooth_scroll_step(current: u16, target: u16) -> u16 {
    if current == target {
        return current;
    }
    let distance = current.abs_diff(target);
    let step = distance.div_ceil(4).max(1);
    if current > target {
        current - step
    } else {
        current + step
    }
}
