//! SessionTrace — the ordered record of stage events

use std::collections::{VecDeque, vec_deque};

use serde::{Deserialize, Serialize};

use crate::event::WheelEvent;
use crate::stage::WheelStage;

/// Default cap on buffered events before the oldest are dropped
pub const DEFAULT_TRACE_CAPACITY: usize = 256;

/// Ordered buffer of stage events awaiting collection by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionTrace {
    events: VecDeque<WheelEvent>,
    capacity: usize,
}

impl Default for SessionTrace {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_TRACE_CAPACITY)
    }
}

impl SessionTrace {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record an event, evicting the oldest when full
    pub fn push(&mut self, event: WheelEvent) {
        if self.events.len() >= self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Take all buffered events
    pub fn drain(&mut self) -> Vec<WheelEvent> {
        self.events.drain(..).collect()
    }

    /// Buffered events, oldest first
    pub fn events(&self) -> vec_deque::Iter<'_, WheelEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events by stage type name
    pub fn events_by_type(&self, type_name: &str) -> Vec<&WheelEvent> {
        self.events
            .iter()
            .filter(|e| e.type_name() == type_name)
            .collect()
    }

    /// Check if trace contains a specific stage type
    pub fn has_stage(&self, type_name: &str) -> bool {
        self.events.iter().any(|e| e.type_name() == type_name)
    }

    /// Last recorded stage
    pub fn last_stage(&self) -> Option<&WheelStage> {
        self.events.back().map(|e| &e.stage)
    }

    /// Get total duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        match (self.events.front(), self.events.back()) {
            (Some(first), Some(last)) => last.timestamp_ms.saturating_sub(first.timestamp_ms),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(stage: WheelStage, at: u64) -> WheelEvent {
        WheelEvent::new(stage, at, 1)
    }

    #[test]
    fn test_push_and_drain() {
        let mut trace = SessionTrace::default();
        trace.push(event(WheelStage::Opened { participant_count: 3 }, 0));
        trace.push(event(WheelStage::Closed, 12_700));

        assert!(trace.has_stage("closed"));
        assert_eq!(trace.duration_ms(), 12_700);

        let drained = trace.drain();
        assert_eq!(drained.len(), 2);
        assert!(trace.is_empty());
        assert_eq!(trace.duration_ms(), 0);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut trace = SessionTrace::with_capacity(2);
        trace.push(event(WheelStage::Opened { participant_count: 1 }, 0));
        trace.push(event(WheelStage::RevealStart { name: "a".into() }, 10));
        trace.push(event(WheelStage::Closed, 20));

        assert_eq!(trace.len(), 2);
        assert!(!trace.has_stage("opened"));
        assert_eq!(trace.last_stage(), Some(&WheelStage::Closed));

        let stamps: Vec<u64> = trace.events().map(|e| e.timestamp_ms).collect();
        assert_eq!(stamps, vec![10, 20]);
    }
}
