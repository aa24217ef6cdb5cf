//! Timing profiles for the reveal sequence
//!
//! The spin length comes from the wheel config; everything after the wheel
//! stops is governed by a `RevealTiming`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Timing profile identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingProfile {
    /// Full-length reveal
    #[default]
    Normal,
    /// Shortened reveal
    Turbo,
    /// No delays after the wheel stops (tests, batch runs)
    Instant,
    /// Hand-tuned values
    Custom,
}

impl TimingProfile {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Turbo => "Turbo",
            Self::Instant => "Instant",
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for TimingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown timing profile '{0}' (expected normal, turbo or instant)")]
pub struct ParseProfileError(pub String);

impl FromStr for TimingProfile {
    type Err = ParseProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "turbo" => Ok(Self::Turbo),
            "instant" => Ok(Self::Instant),
            "custom" => Ok(Self::Custom),
            _ => Err(ParseProfileError(s.to_string())),
        }
    }
}

/// Delays that follow the spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealTiming {
    /// Profile type
    pub profile: TimingProfile,

    /// Extra time after the visual spin before the result is taken (ms)
    pub settle_padding_ms: u64,

    /// Time from reveal start to the elimination callback (ms)
    pub reveal_duration_ms: u64,

    /// Per-character pacing of the name reveal (ms, 0 = whole name at once)
    pub typing_interval_ms: u64,

    /// Time from elimination to the close callback (ms)
    pub auto_close_delay_ms: u64,
}

impl RevealTiming {
    /// Normal timing
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            settle_padding_ms: 200,
            reveal_duration_ms: 6000,
            typing_interval_ms: 100,
            auto_close_delay_ms: 500,
        }
    }

    /// Turbo mode
    pub fn turbo() -> Self {
        let mut timing = Self::normal().scaled(0.4);
        timing.profile = TimingProfile::Turbo;
        timing
    }

    /// Instant (no delays after the spin)
    pub fn instant() -> Self {
        Self {
            profile: TimingProfile::Instant,
            settle_padding_ms: 0,
            reveal_duration_ms: 0,
            typing_interval_ms: 0,
            auto_close_delay_ms: 0,
        }
    }

    /// Get config for profile
    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Instant => Self::instant(),
            TimingProfile::Custom => Self::normal(),
        }
    }

    /// Scale timing by factor (< 1.0 = faster)
    pub fn scaled(&self, factor: f64) -> Self {
        let scale = |ms: u64| (ms as f64 * factor.max(0.0)).round() as u64;
        Self {
            profile: TimingProfile::Custom,
            settle_padding_ms: scale(self.settle_padding_ms),
            reveal_duration_ms: scale(self.reveal_duration_ms),
            typing_interval_ms: scale(self.typing_interval_ms),
            auto_close_delay_ms: scale(self.auto_close_delay_ms),
        }
    }

    /// Delay of the spin timer for a visual spin of `spin_duration_secs`
    pub fn spin_timer_ms(&self, spin_duration_secs: f64) -> u64 {
        (spin_duration_secs * 1000.0 + self.settle_padding_ms as f64)
            .round()
            .max(0.0) as u64
    }

    /// Time needed to type out `char_count` characters
    pub fn typing_duration_ms(&self, char_count: usize) -> u64 {
        self.typing_interval_ms.saturating_mul(char_count as u64)
    }

    /// Characters visible `elapsed_ms` into the reveal
    pub fn chars_revealed(&self, elapsed_ms: u64, char_count: usize) -> usize {
        if self.typing_interval_ms == 0 {
            return char_count;
        }
        let typed = elapsed_ms / self.typing_interval_ms;
        usize::try_from(typed).map_or(char_count, |t| t.min(char_count))
    }

    /// Total time from reveal start to close callback
    pub fn post_spin_duration_ms(&self) -> u64 {
        self.reveal_duration_ms.saturating_add(self.auto_close_delay_ms)
    }
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self::normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_profiles() {
        let normal = RevealTiming::normal();
        let turbo = RevealTiming::turbo();
        let instant = RevealTiming::instant();

        assert!(turbo.reveal_duration_ms < normal.reveal_duration_ms);
        assert_eq!(turbo.profile, TimingProfile::Turbo);
        assert_eq!(turbo.reveal_duration_ms, 2400);
        assert_eq!(instant.post_spin_duration_ms(), 0);
    }

    #[test]
    fn test_post_spin_duration_saturates() {
        let timing = RevealTiming {
            reveal_duration_ms: u64::MAX,
            ..RevealTiming::normal()
        };
        assert_eq!(timing.post_spin_duration_ms(), u64::MAX);
    }

    #[test]
    fn test_spin_timer_includes_padding() {
        let normal = RevealTiming::normal();
        assert_eq!(normal.spin_timer_ms(6.0), 6200);
        assert_eq!(normal.spin_timer_ms(0.0015), 202);
        assert_eq!(RevealTiming::instant().spin_timer_ms(6.0), 6000);
    }

    #[test]
    fn test_chars_revealed() {
        let timing = RevealTiming::normal();
        assert_eq!(timing.chars_revealed(0, 5), 0);
        assert_eq!(timing.chars_revealed(99, 5), 0);
        assert_eq!(timing.chars_revealed(100, 5), 1);
        assert_eq!(timing.chars_revealed(450, 5), 4);
        assert_eq!(timing.chars_revealed(10_000, 5), 5);
        assert_eq!(RevealTiming::instant().chars_revealed(0, 5), 5);
    }

    #[test]
    fn test_typical_name_finishes_before_elimination() {
        let timing = RevealTiming::normal();
        assert!(timing.typing_duration_ms(12) <= timing.reveal_duration_ms);
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!("Turbo".parse::<TimingProfile>(), Ok(TimingProfile::Turbo));
        assert!("warp".parse::<TimingProfile>().is_err());
    }
}
