//! Emotional state classification
//!
//! Keyword decision table scanned in order; the first row with any keyword
//! present in the summary wins. Row order is the tie-break, not where in the
//! text a keyword appears.

use mindstore::EmotionalState;

/// Ordered (label, keywords) rows. Keywords are lowercase substrings.
pub const EMOTION_TABLE: &[(EmotionalState, &[&str])] = &[
    (EmotionalState::Happy, &["happy", "joyful", "content"]),
    (EmotionalState::Sad, &["sad", "down", "depressed"]),
    (EmotionalState::Nervous, &["nervous", "anxious", "worried"]),
    (EmotionalState::Angry, &["angry", "frustrated", "mad"]),
    (EmotionalState::Fearful, &["fearful", "scared", "afraid"]),
];

/// Map a free-text summary to a label; `Neutral` when nothing matches
pub fn classify(summary: &str) -> EmotionalState {
    let lowered = summary.to_lowercase();
    EMOTION_TABLE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(state, _)| *state)
        .unwrap_or_default()
}
