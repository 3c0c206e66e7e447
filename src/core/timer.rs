//! Cancellable scheduled tasks.
//!
//! The controller never spawns anything itself.  A task is just a deadline
//! that the host event loop polls; scheduling again replaces the previous
//! deadline, so at most one instance of a given task is ever pending.

use std::time::{Duration, Instant};

/// A single-slot delayed callback, identified by its owner.
#[derive(Debug, Clone, Default)]
pub struct ScheduledTask {
    due: Option<Instant>,
}

impl ScheduledTask {
    pub fn new() -> Self {
        Self { due: None }
    }

    /// (Re)schedule the task `delay` after `now`.  Any pending deadline is
    /// dropped. Tasks are reset, never stacked.
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.due = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.due
    }

    /// Consume the task if its deadline has passed.  Returns `true` exactly
    /// once per schedule.
    pub fn take_if_due(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

/// Earliest of two optional deadlines.
pub fn earliest(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reschedule_replaces_pending_deadline() {
        let t0 = Instant::now();
        let mut task = ScheduledTask::new();
        task.schedule(t0, Duration::from_millis(260));
        task.schedule(t0 + Duration::from_millis(100), Duration::from_millis(260));

        assert!(!task.take_if_due(t0 + Duration::from_millis(300)));
        assert!(task.take_if_due(t0 + Duration::from_millis(360)));
        // Fires once.
        assert!(!task.take_if_due(t0 + Duration::from_millis(999)));
    }

    #[test]
    fn cancelled_task_never_fires() {
        let t0 = Instant::now();
        let mut task = ScheduledTask::new();
        task.schedule(t0, Duration::from_millis(10));
        task.cancel();
        assert_eq!(task.deadline(), None);
        assert!(!task.take_if_due(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn earliest_picks_the_sooner_deadline() {
        let t0 = Instant::now();
        let later = t0 + Duration::from_millis(5);
        assert_eq!(earliest(Some(later), Some(t0)), Some(t0));
        assert_eq!(earliest(None, Some(later)), Some(later));
        assert_eq!(earliest(None, None), None);
    }
}
