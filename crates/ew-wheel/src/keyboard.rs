//! Keyboard surface

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Keys the wheel responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelKey {
    Escape,
    Enter,
    Space,
    /// Anything else (never consumed)
    Other,
}

impl WheelKey {
    /// Map a DOM-style key name (`"Escape"`, `"Enter"`, `" "`)
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Self::Escape,
            "Enter" | "Return" => Self::Enter,
            " " | "Space" | "Spacebar" => Self::Space,
            _ => Self::Other,
        }
    }

    /// Enter and Space both trigger a spin
    #[inline]
    pub fn is_activate(&self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

impl FromStr for WheelKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_key_name(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(WheelKey::from_key_name("Escape"), WheelKey::Escape);
        assert_eq!(WheelKey::from_key_name(" "), WheelKey::Space);
        assert_eq!(WheelKey::from_key_name("Enter"), WheelKey::Enter);
        assert_eq!(WheelKey::from_key_name("a"), WheelKey::Other);
        assert!(WheelKey::Space.is_activate());
        assert!(!WheelKey::Escape.is_activate());
    }
}
