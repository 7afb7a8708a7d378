//! Heuristic response scoring.
//!
//! Four independent checks award points to both axes alike:
//!
//! | check                                                     | points |
//! |-----------------------------------------------------------|--------|
//! | trimmed text longer than 50 characters                    | 30     |
//! | trimmed text ends with `.`, `!` or `?`                    | 20     |
//! | contains "because", "therefore", "however" or "example"   | 20     |
//! | non-empty and not entirely uppercase                      | 20     |
//!
//! The ceiling is therefore 90, not 100.

use serde::{Deserialize, Serialize};

const LENGTH_THRESHOLD: usize = 50;
const LENGTH_POINTS: u8 = 30;
const STRUCTURE_POINTS: u8 = 20;
const REASONING_POINTS: u8 = 20;
const FORMAT_POINTS: u8 = 20;

const REASONING_MARKERS: [&str; 4] = ["because", "therefore", "however", "example"];

/// Accuracy and relevancy sub-scores, each within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub accuracy: u8,
    pub relevancy: u8,
}

/// Scores a response text. Pure and deterministic.
pub fn score_response(text: &str) -> Score {
    let trimmed = text.trim();
    let mut points = 0u8;

    if trimmed.chars().count() > LENGTH_THRESHOLD {
        points += LENGTH_POINTS;
    }
    if trimmed.ends_with(['.', '!', '?']) {
        points += STRUCTURE_POINTS;
    }
    let lower = text.to_lowercase();
    if REASONING_MARKERS.iter().any(|marker| lower.contains(marker)) {
        points += REASONING_POINTS;
    }
    if !trimmed.is_empty() && !is_shouting(trimmed) {
        points += FORMAT_POINTS;
    }

    Score {
        accuracy: points,
        relevancy: points,
    }
}

/// At least one cased character and no lowercase ones.
fn is_shouting(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}
