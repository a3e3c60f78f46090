//! Typewriter text rotator
//!
//! An infinite type/hold/delete/pause cycle over a fixed phrase list,
//! expressed as an explicit state machine instead of nested timer callbacks.
//! The driver calls `step()`, re-renders `text()`, and schedules the next
//! call after the returned delay.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{
    DELETE_DELAY_MS, PHRASE_PAUSE_MS, TYPE_DELAY_MS, TYPE_HOLD_MS, TYPE_JITTER_MS,
};

/// Default rotation when the host supplies no phrases of its own
pub const DEFAULT_PHRASES: [&str; 4] = [
    "BUILDING SOFTWARE // SOLVING PROBLEMS",
    "SYSTEMS // WEB // GRAPHICS",
    "ALWAYS SHIPPING",
    "WELCOME TO THE GRID",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Typing,
    HoldAfterType,
    Deleting,
    HoldAfterDelete,
}

/// Phrase-cycling state. `char_idx` counts chars (not bytes) so multi-byte
/// text never splits a code point; it stays within [0, phrase char count].
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<String>,
    phrase_idx: usize,
    char_idx: usize,
    phase: Phase,
    rng: Pcg32,
}

impl Typewriter {
    /// Empty lists fall back to [`DEFAULT_PHRASES`].
    pub fn new(phrases: Vec<String>, seed: u64) -> Self {
        let phrases = if phrases.is_empty() {
            DEFAULT_PHRASES.iter().map(|s| s.to_string()).collect()
        } else {
            phrases
        };
        Self {
            phrases,
            phrase_idx: 0,
            char_idx: 0,
            phase: Phase::Typing,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// The prefix of the current phrase to display right now
    pub fn text(&self) -> String {
        self.phrases[self.phrase_idx]
            .chars()
            .take(self.char_idx)
            .collect()
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase_idx
    }

    fn current_len(&self) -> usize {
        self.phrases[self.phrase_idx].chars().count()
    }

    /// Advance one step and return the delay in ms until the next step.
    /// Never terminates; the cycle wraps around the phrase list forever.
    pub fn step(&mut self) -> i32 {
        match self.phase {
            Phase::Typing => {
                if self.char_idx < self.current_len() {
                    self.char_idx += 1;
                }
                if self.char_idx == self.current_len() {
                    self.phase = Phase::HoldAfterType;
                    TYPE_HOLD_MS
                } else {
                    TYPE_DELAY_MS + self.rng.random_range(0..=TYPE_JITTER_MS)
                }
            }
            Phase::HoldAfterType => {
                self.phase = Phase::Deleting;
                self.delete_one()
            }
            Phase::Deleting => self.delete_one(),
            Phase::HoldAfterDelete => {
                self.phase = Phase::Typing;
                // Re-enter typing immediately with the first character
                self.step()
            }
        }
    }

    /// Remove one character; on reaching empty, advance to the next phrase
    /// and pause before typing resumes.
    fn delete_one(&mut self) -> i32 {
        self.char_idx = self.char_idx.saturating_sub(1);
        if self.char_idx == 0 {
            self.phase = Phase::HoldAfterDelete;
            self.phrase_idx = (self.phrase_idx + 1) % self.phrases.len();
            PHRASE_PAUSE_MS
        } else {
            DELETE_DELAY_MS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn typewriter(phrases: &[&str]) -> Typewriter {
        Typewriter::new(phrases.iter().map(|s| s.to_string()).collect(), 42)
    }

    #[test]
    fn test_visits_every_prefix_in_order() {
        let mut tw = typewriter(&["abc", "xy"]);
        let mut seen = Vec::new();
        // One full cycle of "abc": 3 typing steps, then 3 delete steps
        // (the post-type hold rides on the completing step's delay)
        for _ in 0..6 {
            tw.step();
            seen.push(tw.text());
        }
        assert_eq!(seen, ["a", "ab", "abc", "ab", "a", ""]);
        assert_eq!(tw.phrase_index(), 1);
    }

    #[test]
    fn test_cycles_through_all_phrases() {
        let phrases = ["one", "two", "three"];
        let mut tw = typewriter(&phrases);
        let mut order = Vec::new();
        let mut last = tw.phrase_index();
        for _ in 0..100 {
            tw.step();
            if tw.phrase_index() != last {
                last = tw.phrase_index();
                order.push(last);
            }
        }
        // Wraps around modulo the list length
        assert!(order.starts_with(&[1, 2, 0, 1]));
    }

    #[test]
    fn test_delays_match_cycle_position() {
        let mut tw = typewriter(&["hi"]);
        let d = tw.step(); // "h"
        assert!((TYPE_DELAY_MS..=TYPE_DELAY_MS + TYPE_JITTER_MS).contains(&d));
        let d = tw.step(); // "hi" complete
        assert_eq!(d, TYPE_HOLD_MS);
        let d = tw.step(); // "h"
        assert_eq!(d, DELETE_DELAY_MS);
        let d = tw.step(); // "" -> phrase pause
        assert_eq!(d, PHRASE_PAUSE_MS);
        let _ = tw.step(); // resumes typing
        assert_eq!(tw.text(), "h");
    }

    #[test]
    fn test_multibyte_phrases_never_split() {
        let mut tw = typewriter(&["héllo"]);
        for _ in 0..20 {
            tw.step();
            // Would panic on a char-boundary violation if indexing bytes
            let _ = tw.text();
        }
    }

    #[test]
    fn test_empty_list_uses_defaults() {
        let tw = Typewriter::new(Vec::new(), 0);
        assert_eq!(tw.text(), "");
        assert_eq!(tw.phrase_index(), 0);
    }

    proptest! {
        /// Indices stay in bounds and the display is always a prefix of the
        /// current phrase, for arbitrary phrase lists.
        #[test]
        fn prop_display_is_prefix(
            phrases in prop::collection::vec("[a-zA-Z0-9 /]{0,12}", 1..5),
            steps in 1usize..200,
        ) {
            let mut tw = Typewriter::new(phrases.clone(), 1);
            for _ in 0..steps {
                let delay = tw.step();
                prop_assert!(delay >= 0);
                let idx = tw.phrase_index();
                prop_assert!(idx < phrases.len());
                prop_assert!(phrases[idx].starts_with(&tw.text()));
            }
        }
    }
}
