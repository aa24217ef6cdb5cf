//! # ew-stage — EjectWheel Stage System
//!
//! Defines the phases a wheel session moves through and the timing that
//! separates them. The sequencer never talks to a renderer directly. It
//! emits STAGES, and hosts react to them.
//!
//! ## Flow
//!
//! ```text
//! Opened → SpinStart → RevealStart → Eliminated → Closed
//!            │              │             │
//!            └──────── Hidden / Dismissed ┘  (teardown from any point)
//! ```

pub mod event;
pub mod stage;
pub mod state;
pub mod timing;
pub mod trace;

pub use event::*;
pub use stage::*;
pub use state::*;
pub use timing::*;
pub use trace::*;
