//! Boot-screen replay and the cross-page reboot handoff.

use crate::storage::{Storage, HAS_VISITED_KEY, PENDING_REBOOT_KEY};

use super::navigator::Page;
use super::Host;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebootOutcome {
    /// Boot sequence replayed on the current page.
    InPlace,
    /// Handoff written, navigating home to replay there.
    Redirected,
}

pub fn is_home_path(path: &str) -> bool {
    path.is_empty() || path == "/" || path.ends_with(Page::Index.file())
}

/// Replays the boot sequence, going home first if needed.
pub fn reboot<H: Host + ?Sized>(host: &mut H) -> RebootOutcome {
    if is_home_path(host.pathname()) {
        host.show_loading_screen();
        return RebootOutcome::InPlace;
    }
    // Written before navigating so the next load sees it
    host.session().set(PENDING_REBOOT_KEY, "true");
    host.assign(Page::Index);
    tracing::info!("Reboot requested, redirecting home");
    RebootOutcome::Redirected
}

/// What a page load should play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BootPlan {
    /// First page of the session: boot screen and heading typing effect.
    pub first_visit: bool,
    /// A reboot on another page handed off to this load.
    pub replay: bool,
}

impl BootPlan {
    pub fn shows_loading_screen(&self) -> bool {
        self.first_visit || self.replay
    }
}

/// Reads the session flags for a page load. The reboot handoff is removed
/// here unconditionally, so it is consumed exactly once.
pub fn plan_boot(session: &mut dyn Storage) -> BootPlan {
    let first_visit = session.get(HAS_VISITED_KEY).is_none();
    if first_visit {
        session.set(HAS_VISITED_KEY, "true");
    }
    let replay = session.remove(PENDING_REBOOT_KEY).as_deref() == Some("true");
    BootPlan { first_visit, replay }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::test_support::FakeHost;
    use crate::storage::MemoryStore;

    #[test]
    fn test_home_paths() {
        assert!(is_home_path(""));
        assert!(is_home_path("/"));
        assert!(is_home_path("/index.html"));
        assert!(!is_home_path("/projects.html"));
    }

    #[test]
    fn test_reboot_on_home_replays_in_place() {
        let mut host = FakeHost::new("/index.html");
        assert_eq!(reboot(&mut host), RebootOutcome::InPlace);
        assert_eq!(host.loading_screens, 1);
        assert!(host.assigned.is_empty());
        assert_eq!(host.session.get(PENDING_REBOOT_KEY), None);
    }

    #[test]
    fn test_reboot_elsewhere_hands_off_and_goes_home() {
        let mut host = FakeHost::new("/papers.html");
        assert_eq!(reboot(&mut host), RebootOutcome::Redirected);
        assert_eq!(host.loading_screens, 0);
        assert_eq!(host.assigned, vec![Page::Index]);
        assert_eq!(host.session.get(PENDING_REBOOT_KEY).as_deref(), Some("true"));
    }

    #[test]
    fn test_handoff_consumed_exactly_once() {
        let mut session = MemoryStore::new();
        session.set(HAS_VISITED_KEY, "true");
        session.set(PENDING_REBOOT_KEY, "true");

        let plan = plan_boot(&mut session);
        assert!(plan.replay);
        assert!(!plan.first_visit);
        assert!(plan.shows_loading_screen());

        let again = plan_boot(&mut session);
        assert_eq!(again, BootPlan::default());
    }

    #[test]
    fn test_malformed_handoff_is_still_removed() {
        let mut session = MemoryStore::new();
        session.set(PENDING_REBOOT_KEY, "yes");
        let plan = plan_boot(&mut session);
        assert!(!plan.replay);
        assert_eq!(session.get(PENDING_REBOOT_KEY), None);
    }

    #[test]
    fn test_first_visit_marks_session() {
        let mut session = MemoryStore::new();
        assert!(plan_boot(&mut session).first_visit);
        assert!(!plan_boot(&mut session).first_visit);
    }
}
