//! ew-wheel: Elimination wheel
//!
//! Picks one participant uniformly at random, spins the wheel so the pointer
//! lands inside that participant's segment, types out the name and then
//! tells the host who was eliminated.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                        Sequencer                          │
//! │  ┌──────────┐   ┌──────────────┐   ┌───────────────────┐  │
//! │  │ Selector │──▶│ PendingTimers│──▶│ WheelHost         │  │
//! │  │ (draws)  │   │ (gen-tagged) │   │ on_eliminated     │  │
//! │  └──────────┘   └──────────────┘   │ on_close/announce │  │
//! │        ▲               │           └───────────────────┘  │
//! │  RandomSource     SessionTrace (WheelEvent stream)        │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use ew_wheel::{RecordingHost, RngSource, Sequencer, WheelConfig};
//! use ew_core::ParticipantList;
//!
//! let mut wheel = Sequencer::new(
//!     WheelConfig::default(),
//!     ParticipantList::new(["Ada", "Grace", "Linus"]),
//!     RecordingHost::new(),
//!     Box::new(RngSource::seeded(7)),
//! )?;
//! wheel.set_visible(true);
//! wheel.start();
//! wheel.advance(20_000);
//! ```

mod config;
mod host;
mod keyboard;
mod random;
mod reveal;
mod selector;
mod sequencer;
mod timer;

pub use config::*;
pub use host::*;
pub use keyboard::*;
pub use random::*;
pub use reveal::*;
pub use selector::*;
pub use sequencer::*;
pub use timer::*;

pub use ew_stage::{
    Refusal, RevealTiming, SequenceState, SessionTrace, TimingProfile, WheelEvent, WheelStage,
};
