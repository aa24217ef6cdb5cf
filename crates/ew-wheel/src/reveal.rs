//! Name reveal — character-by-character typing of the chosen name
//!
//! Progress is derived from the clock instead of a separate interval timer,
//! so cancelling the session's timers is all it takes to stop it.

use serde::{Deserialize, Serialize};

use ew_stage::RevealTiming;

/// Reveal in progress for one chosen name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealProgress {
    /// Display text (uppercased name)
    text: String,
    char_count: usize,
    started_at_ms: u64,
}

impl RevealProgress {
    pub fn start(name: &str, now_ms: u64) -> Self {
        let text = name.to_uppercase();
        let char_count = text.chars().count();
        Self {
            text,
            char_count,
            started_at_ms: now_ms,
        }
    }

    /// Full display text
    pub fn full_text(&self) -> &str {
        &self.text
    }

    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    /// Characters typed by `now_ms`
    pub fn chars_visible(&self, now_ms: u64, timing: &RevealTiming) -> usize {
        let elapsed = now_ms.saturating_sub(self.started_at_ms);
        timing.chars_revealed(elapsed, self.char_count)
    }

    /// Text typed by `now_ms`
    pub fn visible_text(&self, now_ms: u64, timing: &RevealTiming) -> String {
        self.text
            .chars()
            .take(self.chars_visible(now_ms, timing))
            .collect()
    }

    pub fn is_complete(&self, now_ms: u64, timing: &RevealTiming) -> bool {
        self.chars_visible(now_ms, timing) >= self.char_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_progress() {
        let timing = RevealTiming::normal();
        let reveal = RevealProgress::start("Lime", 1_000);

        assert_eq!(reveal.full_text(), "LIME");
        assert_eq!(reveal.visible_text(1_000, &timing), "");
        assert_eq!(reveal.visible_text(1_250, &timing), "LI");
        assert!(!reveal.is_complete(1_350, &timing));
        assert!(reveal.is_complete(1_400, &timing));
        assert_eq!(reveal.visible_text(9_000, &timing), "LIME");
    }

    #[test]
    fn test_multibyte_names() {
        let timing = RevealTiming::normal();
        let reveal = RevealProgress::start("Zoë", 0);
        assert_eq!(reveal.visible_text(300, &timing), "ZOË");
        assert_eq!(reveal.visible_text(200, &timing), "ZO");
    }

    #[test]
    fn test_clock_before_start() {
        let timing = RevealTiming::normal();
        let reveal = RevealProgress::start("Red", 500);
        assert_eq!(reveal.chars_visible(0, &timing), 0);
    }
}
