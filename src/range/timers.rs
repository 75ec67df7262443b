//! One-shot deferred actions
//!
//! Entries cannot be cancelled. Each carries the session epoch it was
//! scheduled in and is dropped without effect if the epoch has moved on by
//! the time it comes due.

/// Work to perform when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Stand a knocked-down target back up
    Respawn { target: usize },
    /// Refill the magazine
    ReloadDone,
}

#[derive(Debug, Clone, PartialEq)]
struct Pending {
    due_ms: f64,
    epoch: u64,
    action: Deferred,
}

#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    /// Sorted by `due_ms`, ties in scheduling order
    pending: Vec<Pending>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, epoch: u64, action: Deferred) {
        let due_ms = now_ms + delay_ms;
        let at = self.pending.partition_point(|p| p.due_ms <= due_ms);
        self.pending.insert(
            at,
            Pending {
                due_ms,
                epoch,
                action,
            },
        );
    }

    /// Remove every entry due at `now_ms`, returning the still-current ones in due order
    pub fn drain_due(&mut self, now_ms: f64, epoch: u64) -> Vec<Deferred> {
        let due = self.pending.partition_point(|p| p.due_ms <= now_ms);
        self.pending
            .drain(..due)
            .filter_map(|p| {
                if p.epoch == epoch {
                    Some(p.action)
                } else {
                    log::debug!("Dropping stale {:?} from epoch {}", p.action, p.epoch);
                    None
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut q = TimerQueue::new();
        q.schedule(0.0, 300.0, 0, Deferred::Respawn { target: 1 });
        q.schedule(0.0, 100.0, 0, Deferred::ReloadDone);
        q.schedule(0.0, 300.0, 0, Deferred::Respawn { target: 2 });

        assert!(q.drain_due(50.0, 0).is_empty());
        assert_eq!(q.drain_due(100.0, 0), vec![Deferred::ReloadDone]);
        assert_eq!(
            q.drain_due(1000.0, 0),
            vec![Deferred::Respawn { target: 1 }, Deferred::Respawn { target: 2 }]
        );
        assert!(q.is_empty());
    }

    #[test]
    fn test_stale_epoch_is_dropped() {
        let mut q = TimerQueue::new();
        q.schedule(0.0, 100.0, 0, Deferred::Respawn { target: 0 });
        q.schedule(50.0, 100.0, 1, Deferred::Respawn { target: 3 });
        assert_eq!(q.drain_due(200.0, 1), vec![Deferred::Respawn { target: 3 }]);
        assert_eq!(q.len(), 0);
    }
}
