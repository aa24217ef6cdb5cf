//! Participant list supplied by the host

use serde::{Deserialize, Serialize};

use crate::FULL_TURN_DEG;

/// Ordered list of participant display names
///
/// Duplicates are allowed and count as distinct wheel positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantList {
    names: Vec<String>,
}

impl ParticipantList {
    /// Create from any iterator of names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse one name per line, skipping blank lines
    pub fn from_lines(text: &str) -> Self {
        let list = Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty()),
        );
        log::debug!("Parsed {} participants", list.len());
        list
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name at position
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Remove the first entry equal to `name`, returning whether one was removed
    pub fn remove_name(&mut self, name: &str) -> bool {
        match self.names.iter().position(|n| n == name) {
            Some(pos) => {
                self.names.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Width of one wheel segment in degrees (0 for an empty list)
    pub fn segment_angle(&self) -> f64 {
        segment_angle(self.len())
    }
}

impl<S: Into<String>> FromIterator<S> for ParticipantList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Width of one wheel segment for `n` participants
#[inline]
pub fn segment_angle(n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        FULL_TURN_DEG / n as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_angle() {
        assert_eq!(segment_angle(0), 0.0);
        assert_eq!(segment_angle(1), 360.0);
        assert_eq!(segment_angle(6), 60.0);
    }

    #[test]
    fn test_from_lines_skips_blank() {
        let list = ParticipantList::from_lines("Red\n\n  Blue  \n\t\nGreen\n");
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(1), Some("Blue"));
    }

    #[test]
    fn test_duplicates_are_distinct_positions() {
        let mut list = ParticipantList::new(["Red", "Red", "Blue"]);
        assert_eq!(list.len(), 3);
        assert!(list.remove_name("Red"));
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["Red", "Blue"]);
        assert!(!list.remove_name("Cyan"));
    }
}
