//! Deferred callbacks on a virtual clock.
//!
//! The host event loop is modelled as a single-threaded timer queue:
//! callers schedule a [`Task`] after a delay and the page drains due tasks
//! as time advances. Tasks due at the same instant run in the order they
//! were scheduled.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::time::Duration;

use tracing::trace;

use crate::banner::BannerKind;
use crate::dom::NodeId;

/// Handle for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Work deferred until a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Remove `banner` if it is still the current banner of `kind`.
    DismissBanner {
        /// Kind of the banner.
        kind: BannerKind,
        /// The banner this timer was scheduled for.
        banner: NodeId,
    },
    /// Play the entrance transition of a form container.
    RevealEntrance {
        /// The container element.
        container: NodeId,
    },
}

#[derive(Debug)]
struct Scheduled {
    due: Duration,
    id: TimerId,
    task: Task,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // Reversed so the max-heap yields the earliest (due, id) first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.id.0.cmp(&self.id.0))
    }
}

/// Timer queue driven by an explicit clock.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_id: u64,
    queue: BinaryHeap<Scheduled>,
    cancelled: HashSet<TimerId>,
}

impl Scheduler {
    /// Creates an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current virtual time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Schedules `task` to run `delay` from now.
    pub fn schedule(&mut self, delay: Duration, task: Task) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.now.saturating_add(delay);
        trace!(?id, ?due, ?task, "scheduled task");
        self.queue.push(Scheduled { due, id, task });
        id
    }

    /// Cancels a pending task. Returns whether it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let pending = self.queue.iter().any(|s| s.id == id) && !self.cancelled.contains(&id);
        if pending {
            self.cancelled.insert(id);
        }
        pending
    }

    /// Returns the number of pending tasks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len() - self.cancelled.len()
    }

    /// Pops the next task due at or before `until`, moving the clock to its
    /// due time. Returns `None` once nothing else is due, leaving the clock
    /// at `until`.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, Task)> {
        while self.queue.peek().is_some_and(|s| s.due <= until) {
            let Some(next) = self.queue.pop() else {
                break;
            };
            if self.cancelled.remove(&next.id) {
                continue;
            }
            self.now = self.now.max(next.due);
            return Some((next.id, next.task));
        }
        self.now = self.now.max(until);
        None
    }
}
