//! Outcome selection — index draw and target rotation
//!
//! The wheel is drawn with segment `i` spanning `[i * a, (i + 1) * a)` degrees
//! clockwise from the top, where `a = 360 / n`. A fixed pointer sits at 0°.
//! Rotating the wheel clockwise by `r` degrees puts wheel angle `-r mod 360`
//! under the pointer.

use serde::{Deserialize, Serialize};

use ew_core::{FULL_TURN_DEG, segment_angle};

use crate::random::{RandomSource, unit_draw};

/// Jitter magnitude as a fraction of one segment (applied symmetrically)
pub const JITTER_FRACTION: f64 = 0.1;

/// Result of one draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinOutcome {
    /// Position in the participant list
    pub chosen_index: usize,
    /// Absolute clockwise rotation the wheel animates to (degrees)
    pub target_rotation: f64,
    /// Offset from the segment midpoint that was folded into the rotation
    pub jitter: f64,
    /// Segment width used for the draw
    pub segment_angle: f64,
}

impl SpinOutcome {
    /// Whole revolutions contained in the target rotation
    pub fn full_turns(&self) -> u32 {
        (self.target_rotation / FULL_TURN_DEG).floor() as u32
    }
}

/// Draw an outcome for `n` participants
///
/// Returns `None` when there is nobody to choose. `rounds` below 1 is
/// treated as 1. Consumes exactly two draws: index, then jitter.
pub fn select_outcome(
    n: usize,
    rounds: u32,
    random: &mut dyn RandomSource,
) -> Option<SpinOutcome> {
    if n == 0 {
        return None;
    }

    let angle = segment_angle(n);
    let chosen_index = ((unit_draw(random) * n as f64).floor() as usize).min(n - 1);

    let midpoint = chosen_index as f64 * angle + angle / 2.0;
    let needed = (FULL_TURN_DEG - midpoint).rem_euclid(FULL_TURN_DEG);

    let span = angle * JITTER_FRACTION;
    let jitter = unit_draw(random) * (2.0 * span) - span;

    let target_rotation = rounds.max(1) as f64 * FULL_TURN_DEG + needed + jitter;

    log::trace!(
        "Selected index {} of {} (rotation {:.2}°, jitter {:+.2}°)",
        chosen_index,
        n,
        target_rotation,
        jitter
    );

    Some(SpinOutcome {
        chosen_index,
        target_rotation,
        jitter,
        segment_angle: angle,
    })
}

/// Segment under the pointer after rotating the wheel by `rotation` degrees
pub fn segment_under_pointer(rotation: f64, n: usize) -> Option<usize> {
    if n == 0 || !rotation.is_finite() {
        return None;
    }
    let wheel_angle = (-rotation).rem_euclid(FULL_TURN_DEG);
    let index = (wheel_angle / segment_angle(n)).floor() as usize;
    Some(index.min(n - 1))
}

/// Signed distance from the pointer to the midpoint of segment `index`
pub fn pointer_offset(rotation: f64, n: usize, index: usize) -> f64 {
    let angle = segment_angle(n);
    let wheel_angle = (-rotation).rem_euclid(FULL_TURN_DEG);
    let midpoint = index as f64 * angle + angle / 2.0;
    wheel_angle - midpoint
}
