//! The analysis pipeline: scoring, clustering, synthesis, insights.
//!
//! This is the single entry point all frontends delegate to. Components
//! are constructed explicitly per call; they are stateless, so
//! independent analysis runs can execute fully in parallel with no
//! locking. Each invocation is atomic: it returns a complete result
//! bundle or a configuration error, never a partial result.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cluster;
use crate::error::EngineError;
use crate::ideas;
use crate::insights;
use crate::models::{AnalysisReport, Cluster, KeywordRecord, ScoredKeyword};
use crate::score::{self, ScoringWeights};

/// Tuning parameters for one analysis run, decoupled from any
/// application config format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisParams {
    pub weights: ScoringWeights,
    pub min_cluster_size: usize,
    pub max_clusters: usize,
    pub min_group_size: usize,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            min_cluster_size: cluster::DEFAULT_MIN_CLUSTER_SIZE,
            max_clusters: cluster::DEFAULT_MAX_CLUSTERS,
            min_group_size: ideas::DEFAULT_MIN_GROUP_SIZE,
        }
    }
}

impl AnalysisParams {
    /// Validate the whole configuration up front, before any work runs.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.weights.validate()?;
        if self.min_cluster_size == 0 {
            return Err(EngineError::config("min_cluster_size must be positive"));
        }
        if self.max_clusters == 0 {
            return Err(EngineError::config("max_clusters must be positive"));
        }
        if self.min_group_size == 0 {
            return Err(EngineError::config("min_group_size must be positive"));
        }
        Ok(())
    }
}

/// Run the full analysis over a keyword batch.
///
/// An empty batch is a valid input and produces a complete empty report.
/// Re-running on unchanged records and parameters yields byte-identical
/// output.
pub fn analyze(
    records: &[KeywordRecord],
    params: &AnalysisParams,
) -> Result<AnalysisReport, EngineError> {
    params.validate()?;
    info!(records = records.len(), "analysis started");

    let scored = score::score_keywords(records, &params.weights)?;

    let member_sets =
        cluster::cluster_indices(&scored, params.min_cluster_size, params.max_clusters)?;
    let clusters: Vec<Cluster> = member_sets
        .iter()
        .map(|members| cluster::make_cluster(&scored, members))
        .collect();

    let groups: Vec<(String, Vec<ScoredKeyword>)> = member_sets
        .iter()
        .zip(clusters.iter())
        .map(|(members, cluster)| {
            let records: Vec<ScoredKeyword> =
                members.iter().map(|&i| scored[i].clone()).collect();
            (cluster.label.clone(), records)
        })
        .collect();
    let ideas = ideas::synthesize(&groups, params.min_group_size)?;

    let summary = insights::summarize(&scored);
    let statements = insights::insight_statements(&summary);

    info!(
        scored = scored.len(),
        clusters = clusters.len(),
        ideas = ideas.len(),
        "analysis complete"
    );

    Ok(AnalysisReport {
        scored,
        clusters,
        ideas,
        summary,
        insights: statements,
    })
}
