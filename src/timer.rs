//! Millisecond clock and cancellable one-shot timers.
//!
//! The event loop owns a single [`TimerQueue`]; components keep the
//! [`TimerId`] of whatever they scheduled and cancel it when superseded.

#[cfg(test)]
use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Work a timer performs when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Remove the help modal from layout after its exit transition.
    HideModal,
    /// Start fading out the loading screen.
    FadeLoadingScreen,
    /// Remove the faded loading screen.
    RemoveLoadingScreen,
    /// Begin typing the page heading.
    StartTyping,
    /// Type the next heading character.
    TypeNextChar,
    /// Grow skill bars to their target width.
    FillSkillBars,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> u64;
}

/// Monotonic clock anchored at construction.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Clock that only moves when told to.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self { now: Cell::new(start_ms) }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Lets a test keep a handle on the clock it gave away.
impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    due_ms: u64,
    task: Task,
}

/// Pending one-shot timers ordered by deadline.
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    pending: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, task: Task) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let due_ms = now_ms.saturating_add(delay_ms);
        // Keep FIFO order among timers sharing a deadline
        let pos = self.pending.partition_point(|t| t.due_ms <= due_ms);
        self.pending.insert(pos, Timer { id, due_ms, task });
        id
    }

    /// Returns false if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        self.pending.len() != before
    }

    #[cfg(test)]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|t| t.id == id)
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.first().map(|t| t.due_ms)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Removes and returns every timer due at `now_ms`, earliest first.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<(TimerId, Task)> {
        let split = self.pending.partition_point(|t| t.due_ms <= now_ms);
        self.pending
            .drain(..split)
            .map(|t| (t.id, t.task))
            .collect()
    }

    /// Drops every pending timer (page unload).
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
