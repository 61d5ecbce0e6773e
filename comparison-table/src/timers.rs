//! Deferred cleanup work.
//!
//! Announcements and fade classes are removed a short while after they are
//! added. The host owns the clock: it calls [`Timers::due`] with the current
//! time (usually from the table's `tick`) and can sleep until
//! [`Timers::next_deadline`].

use std::time::{Duration, Instant};

use blockdom::NodeId;

/// Work to run once a deadline passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerTask {
    /// Clear the live region if it still shows announcement `generation`.
    ClearAnnouncement { generation: u64 },
    /// Remove a transient class from a node.
    RemoveClass { node: NodeId, class: &'static str },
}

#[derive(Debug, Default)]
pub struct Timers {
    pending: Vec<(Instant, TimerTask)>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once `delay` has passed since `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, task: TimerTask) {
        log::trace!("[timers] Scheduled {:?} in {:?}", task, delay);
        self.pending.push((now + delay, task));
    }

    /// Remove and return every task whose deadline is at or before `now`,
    /// earliest first.
    pub fn due(&mut self, now: Instant) -> Vec<TimerTask> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|(deadline, _)| *deadline <= now);
        self.pending = pending;
        due.sort_by_key(|(deadline, _)| *deadline);
        due.into_iter().map(|(_, task)| task).collect()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|(deadline, _)| *deadline).min()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every pending task regardless of deadline.
    pub fn take_all(&mut self) -> Vec<TimerTask> {
        let mut pending = std::mem::take(&mut self.pending);
        pending.sort_by_key(|(deadline, _)| *deadline);
        pending.into_iter().map(|(_, task)| task).collect()
    }
}
