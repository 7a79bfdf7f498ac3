//! Deferred continuations on a logical clock.
//!
//! The controller runs on a single event loop and never spawns threads. Work
//! that has to happen later (debounced search, auto-close after selection) is
//! registered here with a delay and fired when the host advances the clock.
//! Handles let the owner cancel or supersede a pending timer, and
//! [`Scheduler::cancel_all`] invalidates everything on teardown.

/// Continuation a timer stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Apply the most recent search input.
    SearchDebounce,
    /// Close the panel after a selection.
    AutoClose,
}

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct PendingTimer {
    handle: TimerHandle,
    kind: TimerKind,
    due_ms: u64,
}

/// Single-threaded timer queue driven by [`Scheduler::advance_to`].
///
/// # Example
///
/// ```
/// use selectree::infrastructure::scheduler::{Scheduler, TimerKind};
///
/// let mut scheduler = Scheduler::default();
/// let first = scheduler.schedule(TimerKind::SearchDebounce, 300);
/// scheduler.cancel(first);
/// scheduler.schedule(TimerKind::SearchDebounce, 300);
///
/// assert!(scheduler.advance_to(299).is_empty());
/// assert_eq!(scheduler.advance_to(300), vec![TimerKind::SearchDebounce]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_handle: u64,
    pending: Vec<PendingTimer>,
}

impl Scheduler {
    /// Current logical time in milliseconds.
    #[must_use]
    pub const fn now(&self) -> u64 {
        self.now_ms
    }

    /// Registers `kind` to fire `delay_ms` after the current time.
    pub fn schedule(&mut self, kind: TimerKind, delay_ms: u64) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        let due_ms = self.now_ms.saturating_add(delay_ms);
        tracing::trace!(?kind, due_ms, "timer scheduled");
        self.pending.push(PendingTimer { handle, kind, due_ms });
        handle
    }

    /// Drops a pending timer. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.handle != handle);
        before != self.pending.len()
    }

    /// Drops every pending timer.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Whether `handle` is still waiting to fire.
    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|t| t.handle == handle)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Moves the clock forward and returns the timers that came due, ordered
    /// by due time and then by scheduling order. Time never moves backwards.
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<TimerKind> {
        self.now_ms = self.now_ms.max(now_ms);
        let now = self.now_ms;

        let (mut due, rest): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|t| t.due_ms <= now);
        self.pending = rest;

        due.sort_by_key(|t| (t.due_ms, t.handle));
        due.into_iter().map(|t| t.kind).collect()
    }
}
