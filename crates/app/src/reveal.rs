//! Character-by-character reveal of agent replies, for the typing effect
//! in the chat panel.

use rand::Rng;
use std::time::{Duration, Instant};

/// Remove bold markers before revealing; the panel renders plain text.
/// Newlines pass through untouched.
pub fn strip_bold_markers(text: &str) -> String {
    text.replace("**", "")
}

/// Tracks how much of a reply is visible. Each character is released
/// after a pseudo-random 5-20 ms delay.
pub struct RevealState {
    chars: Vec<char>,
    shown: usize,
    next_at: Instant,
}

impl RevealState {
    pub fn new(text: &str) -> Self {
        Self {
            chars: strip_bold_markers(text).chars().collect(),
            shown: 0,
            next_at: Instant::now(),
        }
    }

    pub fn visible(&self) -> String {
        self.chars[..self.shown].iter().collect()
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.chars.len()
    }

    /// Release every character whose delay has elapsed by `now`. Returns
    /// true when the visible text grew.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut rng = rand::thread_rng();
        let before = self.shown;
        while !self.is_done() && now >= self.next_at {
            self.shown += 1;
            self.next_at += Duration::from_millis(rng.gen_range(5..=20));
        }
        self.shown != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_bold_markers() {
        assert_eq!(strip_bold_markers("**bold** and plain"), "bold and plain");
        assert_eq!(strip_bold_markers("a ** lone pair"), "a  lone pair");
        assert_eq!(strip_bold_markers("line\nbreaks\nstay"), "line\nbreaks\nstay");
    }

    #[test]
    fn test_reveal_starts_empty_and_completes() {
        let mut reveal = RevealState::new("**hi**\nthere");
        assert_eq!(reveal.visible(), "");
        assert!(!reveal.is_done());

        // Far-future tick releases everything.
        let later = Instant::now() + Duration::from_secs(30);
        assert!(reveal.tick(later));
        assert!(reveal.is_done());
        assert_eq!(reveal.visible(), "hi\nthere");
    }

    #[test]
    fn test_reveal_is_incremental() {
        let mut reveal = RevealState::new("abcdef");
        let later = Instant::now() + Duration::from_secs(30);
        reveal.tick(later);
        assert_eq!(reveal.visible(), "abcdef");

        // A tick in the past releases nothing further.
        let mut fresh = RevealState::new("abcdef");
        fresh.next_at = Instant::now() + Duration::from_secs(30);
        assert!(!fresh.tick(Instant::now()));
        assert_eq!(fresh.visible(), "");
    }

    #[test]
    fn test_empty_reply_is_immediately_done() {
        let reveal = RevealState::new("");
        assert!(reveal.is_done());
    }
}
