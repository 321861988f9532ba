//! Search-intent scoring.
//!
//! Maps a keyword's intent tag set to a single quality score via a fixed
//! priority table. Scoring takes the maximum over the tags rather than an
//! average: any strong-intent signal on a keyword is valuable even when
//! mixed with weaker ones.

/// Score for an unrecognized tag or an empty tag set.
pub const DEFAULT_INTENT_SCORE: f64 = 50.0;

/// Known intents in priority order: (lowercase form, canonical label, quality).
const INTENTS: [(&str, &str, f64); 4] = [
    ("informational", "Informational", 90.0),
    ("commercial", "Commercial", 80.0),
    ("transactional", "Transactional", 70.0),
    ("navigational", "Navigational", 60.0),
];

fn quality(tag: &str) -> f64 {
    INTENTS
        .iter()
        .find(|(lower, _, _)| tag.eq_ignore_ascii_case(lower))
        .map(|(_, _, score)| *score)
        .unwrap_or(DEFAULT_INTENT_SCORE)
}

/// Intent-quality score for a tag set: the maximum quality over all tags,
/// or [`DEFAULT_INTENT_SCORE`] when the set is empty.
pub fn intent_score(tags: &[String]) -> f64 {
    tags.iter()
        .map(|tag| quality(tag))
        .fold(DEFAULT_INTENT_SCORE, f64::max)
}

/// Resolve the primary intent for a tag set.
///
/// Ties resolve by the fixed priority order Informational > Commercial >
/// Transactional > Navigational; if no known intent is present, the
/// first-listed tag wins verbatim. Empty tag set yields `None`.
pub fn primary_intent(tags: &[String]) -> Option<String> {
    if tags.is_empty() {
        return None;
    }
    for (lower, canonical, _) in INTENTS {
        if tags.iter().any(|tag| tag.eq_ignore_ascii_case(lower)) {
            return Some(canonical.to_string());
        }
    }
    tags.first().cloned()
}
