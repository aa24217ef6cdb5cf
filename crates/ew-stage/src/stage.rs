//! WheelStage — the semantic moments of a wheel session
//!
//! A stage is not an animation. It is the meaning of a moment in the
//! session flow that hosts (renderers, audio, analytics) can react to.

use serde::{Deserialize, Serialize};

use crate::state::SequenceState;

/// Why a trigger was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Refusal {
    /// Widget is not visible
    Hidden,
    /// Participant list is empty
    NoParticipants,
    /// A spin cycle is already in flight
    Busy,
    /// Dismissal attempted mid-spin
    Spinning,
}

impl Refusal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::NoParticipants => "no_participants",
            Self::Busy => "busy",
            Self::Spinning => "spinning",
        }
    }
}

/// Canonical wheel stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WheelStage {
    // ═══════════════════════════════════════════════════════════════════════
    // LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════
    /// Host made the widget visible
    Opened {
        participant_count: usize,
    },

    /// Host hid the widget; everything pending was cancelled
    Hidden {
        /// State the session was in when hidden
        from: SequenceState,
        /// Number of timers that were still armed
        cancelled_timers: usize,
    },

    /// User dismissed the widget
    Dismissed {
        from: SequenceState,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // SPIN CYCLE
    // ═══════════════════════════════════════════════════════════════════════
    /// Outcome drawn, wheel starts rotating
    SpinStart {
        chosen_index: usize,
        target_rotation: f64,
    },

    /// Wheel stopped, chosen name revealed
    RevealStart {
        name: String,
    },

    /// Host notified of the elimination
    Eliminated {
        name: String,
    },

    /// Session finished on its own; host asked to close
    Closed,

    // ═══════════════════════════════════════════════════════════════════════
    // REFUSALS
    // ═══════════════════════════════════════════════════════════════════════
    /// Start trigger ignored
    StartRefused {
        reason: Refusal,
    },

    /// Dismiss trigger ignored
    DismissRefused {
        reason: Refusal,
    },
}

impl WheelStage {
    /// Stable type name for filtering
    pub fn type_name(&self) -> &'static str {
        match self {
            WheelStage::Opened { .. } => "opened",
            WheelStage::Hidden { .. } => "hidden",
            WheelStage::Dismissed { .. } => "dismissed",
            WheelStage::SpinStart { .. } => "spin_start",
            WheelStage::RevealStart { .. } => "reveal_start",
            WheelStage::Eliminated { .. } => "eliminated",
            WheelStage::Closed => "closed",
            WheelStage::StartRefused { .. } => "start_refused",
            WheelStage::DismissRefused { .. } => "dismiss_refused",
        }
    }

    /// Stage ends the session
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WheelStage::Hidden { .. } | WheelStage::Dismissed { .. } | WheelStage::Closed
        )
    }
}
