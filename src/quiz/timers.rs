//! Cancellable deferrals on a virtual millisecond clock
//!
//! The orchestrator advances the clock; nothing here reads wall time. Entries
//! fire in due-time order, ties broken by scheduling order.

/// Handle for a scheduled deferral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Work the session machine defers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferral {
    /// Finish an answer after the feedback window
    ResolveAnswer { correct: bool },
    /// One second of level clock
    TimerTick,
    /// Hand focus back to the answer field
    Refocus,
    /// Show the victory screen's "play again" control
    RevealPlayAgain,
}

#[derive(Debug, Clone)]
struct Scheduled {
    id: TimerId,
    due_ms: u64,
    period_ms: Option<u64>,
    deferral: Deferral,
    /// Session epoch the entry belongs to
    epoch: u64,
}

/// A fired deferral, tagged with the epoch it was armed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub deferral: Deferral,
    pub epoch: u64,
}

/// Deferral queue
#[derive(Debug, Clone, Default)]
pub struct Timers {
    now_ms: u64,
    next_id: u64,
    /// Kept in firing order
    pending: Vec<Scheduled>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Arm a one-shot deferral `delay_ms` from now
    pub fn schedule_once(&mut self, delay_ms: u64, deferral: Deferral, epoch: u64) -> TimerId {
        self.insert(self.now_ms.saturating_add(delay_ms), None, deferral, epoch)
    }

    /// Arm a repeating deferral, first firing one period from now
    pub fn schedule_every(&mut self, period_ms: u64, deferral: Deferral, epoch: u64) -> TimerId {
        let period_ms = period_ms.max(1);
        self.insert(self.now_ms.saturating_add(period_ms), Some(period_ms), deferral, epoch)
    }

    /// Disarm a deferral. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.id != id);
        self.pending.len() != before
    }

    /// Disarm everything
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Pop the next deferral due at or before `until_ms`, moving the clock to
    /// its due time. Repeating entries re-arm one period later. When nothing is
    /// due the clock moves to `until_ms` and `None` is returned.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired> {
        match self.pending.first() {
            Some(first) if first.due_ms <= until_ms => {}
            _ => {
                self.now_ms = self.now_ms.max(until_ms);
                return None;
            }
        }

        let entry = self.pending.remove(0);
        self.now_ms = self.now_ms.max(entry.due_ms);
        if let Some(period) = entry.period_ms {
            self.reinsert(Scheduled {
                due_ms: entry.due_ms.saturating_add(period),
                ..entry.clone()
            });
        }
        Some(Fired {
            deferral: entry.deferral,
            epoch: entry.epoch,
        })
    }

    fn insert(
        &mut self,
        due_ms: u64,
        period_ms: Option<u64>,
        deferral: Deferral,
        epoch: u64,
    ) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.reinsert(Scheduled {
            id,
            due_ms,
            period_ms,
            deferral,
            epoch,
        });
        id
    }

    fn reinsert(&mut self, entry: Scheduled) {
        // After every entry due no later, so equal due times keep arming order
        let pos = self.pending.partition_point(|s| s.due_ms <= entry.due_ms);
        self.pending.insert(pos, entry);
    }
}
