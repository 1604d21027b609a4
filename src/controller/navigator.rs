use super::Location;

/// Minimum time between two accepted page navigations.
pub const NAVIGATION_COOLDOWN_MS: u64 = 800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Index,
    Projects,
    Papers,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Index, Page::Projects, Page::Papers];

    pub fn file(self) -> &'static str {
        match self {
            Page::Index => "index.html",
            Page::Projects => "projects.html",
            Page::Papers => "papers.html",
        }
    }

    /// Location path the page is served at.
    pub fn path(self) -> String {
        format!("/{}", self.file())
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    /// Exact page for `path`, if it names one.
    pub fn from_path(path: &str) -> Option<Page> {
        if path.is_empty() || path == "/" {
            return Some(Page::Index);
        }
        Self::ALL.iter().copied().find(|p| path.ends_with(p.file()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Index of the page at `path`. Unrecognized paths resolve to the first
/// page so navigation is never blocked.
pub fn resolve_current_index(path: &str) -> usize {
    Page::from_path(path).map(Page::index).unwrap_or(0)
}

/// Circular step through `len` pages.
pub fn compute_target(current: usize, direction: Direction, len: usize) -> usize {
    match direction {
        Direction::Next => (current + 1) % len,
        Direction::Previous => (current + len - 1) % len,
    }
}

/// Circular page navigation behind a cooldown.
#[derive(Debug)]
pub struct PageNavigator {
    last_accepted_ms: Option<u64>,
    cooldown_ms: u64,
}

impl Default for PageNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl PageNavigator {
    pub fn new() -> Self {
        Self {
            last_accepted_ms: None,
            cooldown_ms: NAVIGATION_COOLDOWN_MS,
        }
    }

    #[cfg(test)]
    pub fn last_accepted_ms(&self) -> Option<u64> {
        self.last_accepted_ms
    }

    /// Compare-and-set on the cooldown timestamp.
    fn try_accept(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last_accepted_ms {
            if now_ms.saturating_sub(last) < self.cooldown_ms {
                return false;
            }
        }
        self.last_accepted_ms = Some(now_ms);
        true
    }

    /// Steps to the neighbouring page and assigns it to `location`.
    /// Calls inside the cooldown are dropped and return `None`.
    pub fn navigate<L: Location + ?Sized>(
        &mut self,
        location: &mut L,
        direction: Direction,
        now_ms: u64,
    ) -> Option<Page> {
        let current = resolve_current_index(location.pathname());
        let target = Page::ALL[compute_target(current, direction, Page::ALL.len())];

        if !self.try_accept(now_ms) {
            tracing::debug!("Navigation {:?} dropped by cooldown", direction);
            return None;
        }
        // Timestamp is already committed when the transition is issued
        location.assign(target);
        tracing::info!("Navigating {:?} to {}", direction, target.file());
        Some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::test_support::FakeHost;

    #[test]
    fn test_resolve_current_index() {
        assert_eq!(resolve_current_index(""), 0);
        assert_eq!(resolve_current_index("/"), 0);
        assert_eq!(resolve_current_index("/index.html"), 0);
        assert_eq!(resolve_current_index("/projects.html"), 1);
        assert_eq!(resolve_current_index("/site/papers.html"), 2);
    }

    #[test]
    fn test_unrecognized_path_defaults_to_first_page() {
        assert_eq!(resolve_current_index("/about.html"), 0);
        assert_eq!(resolve_current_index("/papers"), 0);
    }

    #[test]
    fn test_compute_target_wraps_both_ways() {
        assert_eq!(compute_target(2, Direction::Next, 3), 0);
        assert_eq!(compute_target(0, Direction::Previous, 3), 2);
        assert_eq!(compute_target(1, Direction::Next, 3), 2);
    }

    #[test]
    fn test_compute_target_is_bijection_and_invertible() {
        for direction in [Direction::Next, Direction::Previous] {
            let mut targets: Vec<usize> = (0..3).map(|i| compute_target(i, direction, 3)).collect();
            targets.sort_unstable();
            assert_eq!(targets, vec![0, 1, 2]);
        }
        for i in 0..3 {
            let there = compute_target(i, Direction::Next, 3);
            assert_eq!(compute_target(there, Direction::Previous, 3), i);
            let back = compute_target(i, Direction::Previous, 3);
            assert_eq!(compute_target(back, Direction::Next, 3), i);
        }
    }

    #[test]
    fn test_navigate_from_projects_goes_to_papers() {
        let mut nav = PageNavigator::new();
        let mut host = FakeHost::new("/projects.html");
        assert_eq!(nav.navigate(&mut host, Direction::Next, 10_000), Some(Page::Papers));
        assert_eq!(host.assigned, vec![Page::Papers]);
    }

    #[test]
    fn test_second_navigation_inside_cooldown_is_dropped() {
        let mut nav = PageNavigator::new();
        let mut host = FakeHost::new("/projects.html");
        assert!(nav.navigate(&mut host, Direction::Next, 10_000).is_some());
        assert_eq!(nav.navigate(&mut host, Direction::Next, 10_799), None);
        assert_eq!(nav.last_accepted_ms(), Some(10_000));
        assert_eq!(host.assigned.len(), 1);
    }

    #[test]
    fn test_navigation_at_cooldown_boundary_is_accepted() {
        let mut nav = PageNavigator::new();
        let mut host = FakeHost::new("/index.html");
        assert!(nav.navigate(&mut host, Direction::Previous, 0).is_some());
        assert!(nav.navigate(&mut host, Direction::Previous, 800).is_some());
        assert_eq!(nav.last_accepted_ms(), Some(800));
        assert_eq!(host.assigned, vec![Page::Papers, Page::Papers]);
    }

    #[test]
    fn test_first_navigation_right_after_start_is_accepted() {
        let mut nav = PageNavigator::new();
        let mut host = FakeHost::new("/");
        assert_eq!(nav.navigate(&mut host, Direction::Next, 5), Some(Page::Projects));
    }
}
