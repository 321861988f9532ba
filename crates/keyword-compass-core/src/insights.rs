//! Population-level insight reporting.
//!
//! Pure aggregate statistics over a scored batch plus a fixed set of
//! templated insight and next-step sentences, each emitted only when its
//! triggering count is positive.

use crate::models::{OpportunityCategory, PopulationSummary, ScoredKeyword};

/// Difficulty ceiling for a quick win.
pub const QUICK_WIN_MAX_DIFFICULTY: f64 = 25.0;
/// Volume floor for a quick win.
pub const QUICK_WIN_MIN_VOLUME: u64 = 200;
/// Volume floor for a high-volume keyword.
pub const HIGH_VOLUME_MIN: u64 = 5000;
/// CPC floor for a high-monetization keyword.
pub const HIGH_CPC_MIN: f64 = 2.0;

/// Count the population by category and by the fixed signal thresholds.
pub fn summarize(scored: &[ScoredKeyword]) -> PopulationSummary {
    let mut summary = PopulationSummary {
        total: scored.len(),
        ..PopulationSummary::default()
    };
    for keyword in scored {
        match keyword.category {
            OpportunityCategory::High => summary.high += 1,
            OpportunityCategory::Medium => summary.medium += 1,
            OpportunityCategory::Low => summary.low += 1,
        }
        if keyword.record.difficulty <= QUICK_WIN_MAX_DIFFICULTY
            && keyword.record.volume >= QUICK_WIN_MIN_VOLUME
        {
            summary.quick_wins += 1;
        }
        if keyword.record.volume >= HIGH_VOLUME_MIN {
            summary.high_volume += 1;
        }
        if keyword.record.cpc >= HIGH_CPC_MIN {
            summary.high_cpc += 1;
        }
    }
    summary
}

/// Templated insight/next-step sentences, in a fixed order.
pub fn insight_statements(summary: &PopulationSummary) -> Vec<String> {
    let mut statements = Vec::new();
    if summary.high > 0 {
        statements.push(format!(
            "{} keyword(s) score 80 or above; prioritize these for the next content sprint.",
            summary.high
        ));
    }
    if summary.medium > 0 {
        statements.push(format!(
            "{} keyword(s) sit in the 60-79 band; solid secondary targets once the top tier is covered.",
            summary.medium
        ));
    }
    if summary.low > 0 {
        statements.push(format!(
            "{} keyword(s) score below 60; deprioritize or fold them into broader pieces.",
            summary.low
        ));
    }
    if summary.quick_wins > 0 {
        statements.push(format!(
            "{} quick win(s) found (difficulty at most 25, volume at least 200); these can rank with minimal link building.",
            summary.quick_wins
        ));
    }
    if summary.high_volume > 0 {
        statements.push(format!(
            "{} keyword(s) exceed 5000 monthly searches; strong candidates for pillar content.",
            summary.high_volume
        ));
    }
    if summary.high_cpc > 0 {
        statements.push(format!(
            "{} keyword(s) carry a CPC of $2.00 or more; commercial pages here can offset paid spend.",
            summary.high_cpc
        ));
    }
    statements
}
