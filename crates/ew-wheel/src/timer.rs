//! Pending timer set
//!
//! One-shot delayed actions on the sequencer clock. The whole set belongs
//! to the sequencer and is cancelled as a group. Every cancel bumps the
//! generation; a timer armed under an older generation never fires.

use serde::{Deserialize, Serialize};

/// At most one timer per kind is ever armed
pub const MAX_PENDING_TIMERS: usize = 3;

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// Spin finished, reveal the chosen name
    Reveal,
    /// Reveal finished, notify the host of the elimination
    Eliminate,
    /// Ask the host to close the widget
    Close,
}

/// A scheduled action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    pub kind: TimerKind,
    /// Absolute clock time at which to fire (ms)
    pub deadline_ms: u64,
    /// Generation the timer was armed under
    pub generation: u64,
    /// Arm order, breaks ties between equal deadlines
    seq: u64,
}

impl PendingTimer {
    #[inline]
    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms >= self.deadline_ms
    }
}

/// Outstanding timers, owned by one sequencer
#[derive(Debug, Clone, Default)]
pub struct PendingTimers {
    timers: Vec<PendingTimer>,
    generation: u64,
    next_seq: u64,
}

impl PendingTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.timers.iter().any(|t| t.kind == kind)
    }

    /// Arm `kind` to fire at `deadline_ms`, replacing any timer of the same kind
    pub fn arm(&mut self, kind: TimerKind, deadline_ms: u64) -> PendingTimer {
        self.timers.retain(|t| t.kind != kind);
        debug_assert!(self.timers.len() < MAX_PENDING_TIMERS);

        let timer = PendingTimer {
            kind,
            deadline_ms,
            generation: self.generation,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.timers.push(timer);

        log::trace!("Armed {:?} at {}ms (gen {})", kind, deadline_ms, self.generation);
        timer
    }

    /// Cancel every outstanding timer and invalidate the generation
    ///
    /// Safe to call any number of times. Returns how many timers were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.timers.len();
        self.timers.clear();
        self.generation += 1;
        if cancelled > 0 {
            log::trace!("Cancelled {} timer(s), now gen {}", cancelled, self.generation);
        }
        cancelled
    }

    /// Earliest deadline still armed
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.deadline_ms).min()
    }

    /// Remove and return the earliest due timer of the current generation
    pub fn pop_due(&mut self, now_ms: u64) -> Option<PendingTimer> {
        loop {
            let pos = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, t)| t.is_due(now_ms))
                .min_by_key(|(_, t)| (t.deadline_ms, t.seq))
                .map(|(i, _)| i)?;

            let timer = self.timers.swap_remove(pos);
            if timer.generation == self.generation {
                return Some(timer);
            }
            log::debug!("Dropped stale {:?} from gen {}", timer.kind, timer.generation);
        }
    }
}
