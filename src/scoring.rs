use crate::highlight::{classify, count, Outcome};
use std::time::Duration;

/// Characters that count as one word
pub const CHARS_PER_WORD: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accuracy {
    /// Share of reference characters reproduced in place, 0..=100, two decimals
    pub percent: f64,
    pub errors: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    pub wpm: u32,
    pub accuracy_percent: f64,
    pub error_count: usize,
}

/// Character-based words per minute, rounded to the nearest integer (ties to
/// even). A zero (or otherwise unusable) duration scores 0.
pub fn compute_wpm(typed: &str, elapsed_secs: f64) -> u32 {
    let words_typed = typed.chars().count() as f64 / CHARS_PER_WORD;
    let minutes = elapsed_secs / 60.0;

    if minutes <= 0.0 || !minutes.is_finite() {
        return 0;
    }

    (words_typed / minutes).round_ties_even() as u32
}

/// Positional accuracy against the reference.
///
/// Every typed character that misses its reference character, or lands past
/// the end of the reference, is an error. Reference characters left untyped
/// are errors too. Overrun is not capped, so `errors` can exceed the
/// reference length. An empty reference scores 0% instead of dividing by zero.
pub fn compute_accuracy(reference: &str, typed: &str) -> Accuracy {
    let total_chars = reference.chars().count();
    let outcomes = classify(reference, typed);

    let correct = count(&outcomes, Outcome::Correct);
    let missed = total_chars.saturating_sub(outcomes.len());
    let errors = count(&outcomes, Outcome::Incorrect) + missed;

    let percent = if total_chars == 0 {
        0.0
    } else {
        round_to_hundredths(correct as f64 / total_chars as f64 * 100.0)
    };

    Accuracy { percent, errors }
}

pub fn score(reference: &str, typed: &str, elapsed: Duration) -> ScoreResult {
    let accuracy = compute_accuracy(reference, typed);

    ScoreResult {
        wpm: compute_wpm(typed, elapsed.as_secs_f64()),
        accuracy_percent: accuracy.percent,
        error_count: accuracy.errors,
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
