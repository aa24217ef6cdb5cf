//! Wheel configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use ew_core::{EwError, EwResult};
use ew_stage::{DEFAULT_TRACE_CAPACITY, RevealTiming, TimingProfile};

/// Default full revolutions before the wheel settles
pub const DEFAULT_ROTATIONS: u32 = 8;

/// Default visual spin length (seconds)
pub const DEFAULT_SPIN_DURATION_SECS: f64 = 6.0;

/// Longest accepted visual spin (seconds)
pub const MAX_SPIN_DURATION_SECS: f64 = 600.0;

/// Longest accepted reveal delay of any kind (ms)
pub const MAX_TIMING_DELAY_MS: u64 = 600_000;

/// Wheel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Full revolutions added to every spin (>= 1)
    pub rotations: u32,

    /// Length of the visual spin (seconds, > 0)
    pub spin_duration_secs: f64,

    /// Delays after the wheel stops
    pub timing: RevealTiming,

    /// Stage events buffered before the oldest are dropped
    pub trace_capacity: usize,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            rotations: DEFAULT_ROTATIONS,
            spin_duration_secs: DEFAULT_SPIN_DURATION_SECS,
            timing: RevealTiming::normal(),
            trace_capacity: DEFAULT_TRACE_CAPACITY,
        }
    }
}

impl WheelConfig {
    /// Default wheel with a reveal timing profile
    pub fn with_profile(profile: TimingProfile) -> Self {
        Self {
            timing: RevealTiming::from_profile(profile),
            ..Default::default()
        }
    }

    /// Builder: set rotations
    pub fn rotations(mut self, rotations: u32) -> Self {
        self.rotations = rotations;
        self
    }

    /// Builder: set spin duration
    pub fn spin_duration_secs(mut self, secs: f64) -> Self {
        self.spin_duration_secs = secs;
        self
    }

    /// Delay of the spin timer (visual spin plus settle padding)
    pub fn spin_timer_ms(&self) -> u64 {
        self.timing.spin_timer_ms(self.spin_duration_secs)
    }

    /// Check values the sequencer relies on
    pub fn validate(&self) -> EwResult<()> {
        if self.rotations == 0 {
            return Err(EwError::InvalidConfig(
                "rotations must be at least 1".into(),
            ));
        }

        if !self.spin_duration_secs.is_finite() || self.spin_duration_secs <= 0.0 {
            return Err(EwError::InvalidConfig(format!(
                "spin_duration_secs must be a positive number, got {}",
                self.spin_duration_secs
            )));
        }

        if self.spin_duration_secs > MAX_SPIN_DURATION_SECS {
            return Err(EwError::InvalidConfig(format!(
                "spin_duration_secs must be at most {}, got {}",
                MAX_SPIN_DURATION_SECS, self.spin_duration_secs
            )));
        }

        let timing = &self.timing;
        for (field, value) in [
            ("settle_padding_ms", timing.settle_padding_ms),
            ("reveal_duration_ms", timing.reveal_duration_ms),
            ("typing_interval_ms", timing.typing_interval_ms),
            ("auto_close_delay_ms", timing.auto_close_delay_ms),
        ] {
            if value > MAX_TIMING_DELAY_MS {
                return Err(EwError::InvalidConfig(format!(
                    "timing.{} must be at most {}ms, got {}",
                    field, MAX_TIMING_DELAY_MS, value
                )));
            }
        }

        if self.trace_capacity == 0 {
            return Err(EwError::InvalidConfig(
                "trace_capacity must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Parse and validate JSON
    pub fn from_json_str(json: &str) -> EwResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| EwError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate YAML
    pub fn from_yaml_str(yaml: &str) -> EwResult<Self> {
        let config: Self =
            serde_yml::from_str(yaml).map_err(|e| EwError::Yaml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: impl AsRef<Path>) -> EwResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let config = match ext.as_str() {
            "json" => Self::from_json_str(&text)?,
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            other => return Err(EwError::UnsupportedFormat(other.to_string())),
        };

        log::info!(
            "Loaded wheel config from {} ({} rotations, {}s spin, {} reveal)",
            path.display(),
            config.rotations,
            config.spin_duration_secs,
            config.timing.profile
        );
        Ok(config)
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> EwResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| EwError::Json(e.to_string()))
    }
}
