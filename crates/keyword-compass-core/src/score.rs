//! Opportunity scoring: a configurable weighted blend of the four
//! normalized component signals.
//!
//! The blend is a convex combination: weights are non-negative and must
//! sum to 1.0 within a small tolerance. Violating weights are rejected for
//! the whole batch rather than silently renormalized.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineError;
use crate::models::{KeywordRecord, OpportunityCategory, ScoredKeyword};
use crate::normalize::round2;
use crate::{intent, normalize};

/// Allowed deviation of the weight sum from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-3;

/// Blend weights for the opportunity score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub volume: f64,
    pub difficulty: f64,
    pub cpc: f64,
    pub intent: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            volume: 0.4,
            difficulty: 0.3,
            cpc: 0.2,
            intent: 0.1,
        }
    }
}

impl ScoringWeights {
    /// Validate the convex-combination invariant.
    ///
    /// Every weight must be finite and non-negative, and the sum must be
    /// within `1.0 ±` [`WEIGHT_SUM_TOLERANCE`]. The error message names
    /// the offending weight.
    pub fn validate(&self) -> Result<(), EngineError> {
        let named = [
            ("volume", self.volume),
            ("difficulty", self.difficulty),
            ("cpc", self.cpc),
            ("intent", self.intent),
        ];
        for (name, value) in named {
            if !value.is_finite() {
                return Err(EngineError::config(format!(
                    "weight `{name}` must be finite, got {value}"
                )));
            }
            if value < 0.0 {
                return Err(EngineError::config(format!(
                    "weight `{name}` must be non-negative, got {value}"
                )));
            }
        }
        let sum: f64 = named.iter().map(|(_, v)| v).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EngineError::config(format!(
                "weights must sum to 1.0 (tolerance {WEIGHT_SUM_TOLERANCE}), got {sum:.4}"
            )));
        }
        Ok(())
    }
}

/// Score a single record. Assumes `weights` have been validated.
pub fn score_keyword(record: &KeywordRecord, weights: &ScoringWeights) -> ScoredKeyword {
    let volume_score = normalize::volume_score(record.volume as f64);
    let difficulty_score = normalize::difficulty_score(record.difficulty);
    let cpc_score = normalize::cpc_score(record.cpc);
    let intent_score = intent::intent_score(&record.intents);

    let opportunity = round2(
        volume_score * weights.volume
            + difficulty_score * weights.difficulty
            + cpc_score * weights.cpc
            + intent_score * weights.intent,
    );

    ScoredKeyword {
        record: record.clone(),
        volume_score,
        difficulty_score,
        cpc_score,
        intent_score,
        opportunity,
        category: OpportunityCategory::from_score(opportunity),
        primary_intent: intent::primary_intent(&record.intents),
    }
}

/// Score a batch, order-preserving.
///
/// Invalid weights abort the whole batch with a configuration error; an
/// empty batch yields an empty vector (a valid, reportable outcome).
pub fn score_keywords(
    records: &[KeywordRecord],
    weights: &ScoringWeights,
) -> Result<Vec<ScoredKeyword>, EngineError> {
    weights.validate()?;
    let scored: Vec<ScoredKeyword> = records
        .iter()
        .map(|record| score_keyword(record, weights))
        .collect();
    debug!(records = scored.len(), "scored keyword batch");
    Ok(scored)
}
