//! Delayed escalation tasks keyed by incident epoch.
//!
//! A critical reading schedules an escalation instead of opening the
//! emergency modal at once. The schedule never consults controller state: it
//! only counts down and hands back the epochs whose delay elapsed. The
//! controller then compares each epoch against the current incident and
//! drops the stale ones.

use std::time::Duration;

use crate::incident::Epoch;

/// A pending escalation for one incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledEscalation {
    pub epoch: Epoch,
    pub remaining: Duration,
}

/// Countdown queue of escalation tasks.
#[derive(Debug, Clone, Default)]
pub struct EscalationSchedule {
    pending: Vec<ScheduledEscalation>,
}

impl EscalationSchedule {
    pub fn schedule(&mut self, epoch: Epoch, delay: Duration) {
        self.pending.push(ScheduledEscalation {
            epoch,
            remaining: delay,
        });
    }

    /// Remove every task for `epoch`. Returns how many were removed.
    pub fn cancel(&mut self, epoch: Epoch) -> usize {
        let before = self.pending.len();
        self.pending.retain(|task| task.epoch != epoch);
        before - self.pending.len()
    }

    /// Advance all tasks by `delta` and return the epochs that came due,
    /// in scheduling order.
    pub fn advance(&mut self, delta: Duration) -> Vec<Epoch> {
        let mut due = Vec::new();
        self.pending.retain_mut(|task| {
            task.remaining = task.remaining.saturating_sub(delta);
            if task.remaining.is_zero() {
                due.push(task.epoch);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn is_pending(&self, epoch: Epoch) -> bool {
        self.pending.iter().any(|task| task.epoch == epoch)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledEscalation> {
        self.pending.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_exactly_at_delay() {
        let mut schedule = EscalationSchedule::default();
        schedule.schedule(Epoch(1), ms(1500));
        assert!(schedule.advance(ms(1499)).is_empty());
        assert_eq!(schedule.advance(ms(1)), vec![Epoch(1)]);
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_overshoot_fires_once() {
        let mut schedule = EscalationSchedule::default();
        schedule.schedule(Epoch(1), ms(100));
        assert_eq!(schedule.advance(ms(5_000)), vec![Epoch(1)]);
        assert!(schedule.advance(ms(5_000)).is_empty());
    }

    #[test]
    fn test_independent_countdowns() {
        let mut schedule = EscalationSchedule::default();
        schedule.schedule(Epoch(1), ms(1500));
        schedule.advance(ms(1000));
        schedule.schedule(Epoch(2), ms(1500));
        assert_eq!(schedule.advance(ms(500)), vec![Epoch(1)]);
        assert!(schedule.is_pending(Epoch(2)));
        assert_eq!(schedule.advance(ms(1000)), vec![Epoch(2)]);
    }

    #[test]
    fn test_cancel_removes_only_that_epoch() {
        let mut schedule = EscalationSchedule::default();
        schedule.schedule(Epoch(1), ms(10));
        schedule.schedule(Epoch(2), ms(10));
        assert_eq!(schedule.cancel(Epoch(1)), 1);
        assert_eq!(schedule.cancel(Epoch(1)), 0);
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.advance(ms(10)), vec![Epoch(2)]);
    }

    #[test]
    fn test_zero_delay_fires_on_next_advance() {
        let mut schedule = EscalationSchedule::default();
        schedule.schedule(Epoch(9), Duration::ZERO);
        assert_eq!(schedule.iter().count(), 1);
        assert_eq!(schedule.advance(Duration::ZERO), vec![Epoch(9)]);
    }
}
