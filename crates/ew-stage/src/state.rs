//! Sequence state — where a wheel session currently is

use serde::{Deserialize, Serialize};

/// State of the wheel sequencer
///
/// `Closed` is the hidden rest state. Reopening moves it back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SequenceState {
    /// Visible, waiting for a start trigger
    Idle = 0,
    /// Wheel is rotating toward its target
    Spinning = 1,
    /// Chosen name is being revealed (elimination or close still pending)
    Revealing = 2,
    /// Widget hidden; nothing pending
    #[default]
    Closed = 3,
}

impl SequenceState {
    /// A spin cycle is in flight
    #[inline]
    pub fn is_busy(&self) -> bool {
        matches!(self, SequenceState::Spinning | SequenceState::Revealing)
    }

    /// Start may be accepted from this state
    #[inline]
    pub fn can_start(&self) -> bool {
        *self == SequenceState::Idle
    }

    /// User dismissal may be accepted from this state
    #[inline]
    pub fn can_dismiss(&self) -> bool {
        matches!(self, SequenceState::Idle | SequenceState::Revealing)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Spinning => "Spinning",
            Self::Revealing => "Revealing",
            Self::Closed => "Closed",
        }
    }
}
