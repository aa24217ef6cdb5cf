//! ew-core: Shared types and errors for EjectWheel
//!
//! This crate provides the foundational types used across all EjectWheel crates.

mod error;
mod participants;

pub use error::*;
pub use participants::*;

/// Full turn of the wheel in degrees
pub const FULL_TURN_DEG: f64 = 360.0;
