#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// Classifies every typed character against the reference at the same
/// position. Characters past the end of the reference are always incorrect.
///
/// This is recomputed from scratch for each render; the texts involved are a
/// sentence long.
pub fn classify(reference: &str, typed: &str) -> Vec<Outcome> {
    let mut expected = reference.chars();

    typed
        .chars()
        .map(|c| match expected.next() {
            Some(e) if e == c => Outcome::Correct,
            _ => Outcome::Incorrect,
        })
        .collect()
}

pub fn count(outcomes: &[Outcome], outcome: Outcome) -> usize {
    outcomes.iter().filter(|o| **o == outcome).count()
}
