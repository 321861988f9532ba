//! Transfer functions that map raw keyword signals onto bounded 0–100
//! scales.
//!
//! Volume and CPC span several orders of magnitude across a batch, so both
//! use log compression to keep a few viral keywords from dominating the
//! blended score. Difficulty is inverted linearly: lower difficulty must
//! contribute a higher opportunity score.
//!
//! All three fail closed: a negative or non-finite input yields 0 rather
//! than an error. Upstream validation belongs to the ingestion layer, and
//! one bad record must never sink a batch.

/// Reference volume that maps to a score of 100.
const VOLUME_CEILING: f64 = 100_000.0;

/// Reference cost-per-click (USD) that maps to a score of 100.
const CPC_CEILING: f64 = 10.0;

/// Log-scale volume score: `log10(v + 1) / log10(100_000) * 100`, clamped.
pub fn volume_score(volume: f64) -> f64 {
    if !volume.is_finite() || volume < 0.0 {
        return 0.0;
    }
    ((volume + 1.0).log10() / VOLUME_CEILING.log10() * 100.0).clamp(0.0, 100.0)
}

/// Log-scale CPC score with a $10 ceiling, same pattern as [`volume_score`].
pub fn cpc_score(cpc: f64) -> f64 {
    if !cpc.is_finite() || cpc < 0.0 {
        return 0.0;
    }
    ((cpc + 1.0).log10() / CPC_CEILING.log10() * 100.0).clamp(0.0, 100.0)
}

/// Inverted linear difficulty score: `100 - difficulty`, clamped.
pub fn difficulty_score(difficulty: f64) -> f64 {
    if !difficulty.is_finite() || difficulty < 0.0 {
        return 0.0;
    }
    (100.0 - difficulty).clamp(0.0, 100.0)
}

/// Round to two decimal places. Scores are rounded once, at the point
/// they become part of a result entity, so repeat runs stay bit-identical.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
