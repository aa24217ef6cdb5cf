//! WheelEvent — a stage occurrence with timing and session metadata

use serde::{Deserialize, Serialize};

use crate::stage::WheelStage;

/// A stage event stamped on the sequencer clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    /// The canonical stage
    pub stage: WheelStage,

    /// Sequencer clock time in milliseconds
    pub timestamp_ms: u64,

    /// Timer generation the event belongs to
    pub generation: u64,
}

impl WheelEvent {
    pub fn new(stage: WheelStage, timestamp_ms: u64, generation: u64) -> Self {
        Self {
            stage,
            timestamp_ms,
            generation,
        }
    }

    /// Get stage type name
    pub fn type_name(&self) -> &'static str {
        self.stage.type_name()
    }
}
