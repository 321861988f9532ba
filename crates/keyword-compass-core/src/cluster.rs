//! Topic clustering of keyword batches.
//!
//! Keywords are vectorized with batch-local TF-IDF and partitioned with
//! seeded k-means. The cluster count is chosen adaptively with an elbow
//! heuristic over the inertia curve. Batches at or below the minimum
//! clusterable size silently fall back to a single cluster; that is
//! documented behavior, not an error.
//!
//! # Algorithm
//!
//! 1. Vectorize the batch (unigram + bigram TF-IDF, L2-normalized).
//! 2. Try `k = 2 ..= min(max_clusters, n / 2)`; record inertia per k.
//! 3. Pick the k whose second discrete derivative of inertia is maximal;
//!    with fewer than three samples, default to the first candidate.
//! 4. Drop clusters smaller than `min_cluster_size` from the result.
//!    Callers must tolerate fewer output members than input keywords.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::EngineError;
use crate::kmeans;
use crate::models::{Cluster, ScoredKeyword};
use crate::normalize::round2;
use crate::vectorize::{self, TfIdfVectorizer};

pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 3;
pub const DEFAULT_MAX_CLUSTERS: usize = 10;

/// Batches at or below this size skip partitioning entirely.
const DEGENERATE_BATCH_MAX: usize = 3;

/// Fixed seed for reproducible clustering runs.
const CLUSTERING_SEED: u64 = 42;

/// A population keyword ranked by similarity to a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarKeyword {
    pub keyword: String,
    pub similarity: f64,
}

/// Cluster a scored batch into disjoint topic groups.
///
/// Returns an empty list for an empty batch and a single cluster for
/// batches of three or fewer keywords.
pub fn cluster_keywords(
    scored: &[ScoredKeyword],
    min_cluster_size: usize,
    max_clusters: usize,
) -> Result<Vec<Cluster>, EngineError> {
    let member_sets = cluster_indices(scored, min_cluster_size, max_clusters)?;
    Ok(member_sets
        .iter()
        .map(|members| make_cluster(scored, members))
        .collect())
}

/// Cluster membership as index sets into the scored slice.
///
/// This is the shared driver behind [`cluster_keywords`] and the analysis
/// pipeline, which needs the member records as well as the clusters.
pub(crate) fn cluster_indices(
    scored: &[ScoredKeyword],
    min_cluster_size: usize,
    max_clusters: usize,
) -> Result<Vec<Vec<usize>>, EngineError> {
    if min_cluster_size == 0 {
        return Err(EngineError::config("min_cluster_size must be positive"));
    }
    if max_clusters == 0 {
        return Err(EngineError::config("max_clusters must be positive"));
    }
    if scored.is_empty() {
        return Ok(Vec::new());
    }
    if scored.len() <= DEGENERATE_BATCH_MAX {
        debug!(
            batch = scored.len(),
            "batch below clusterable size, returning single cluster"
        );
        return Ok(vec![(0..scored.len()).collect()]);
    }

    let texts: Vec<String> = scored
        .iter()
        .map(|s| s.record.keyword.clone())
        .collect();
    let (_, vectors) = TfIdfVectorizer::fit_transform(&texts);

    let k_max = max_clusters.min(scored.len() / 2);
    let candidates: Vec<usize> = if k_max < 2 {
        vec![1]
    } else {
        (2..=k_max).collect()
    };

    let mut runs: Vec<(usize, kmeans::KMeansResult)> = candidates
        .iter()
        .map(|&k| (k, kmeans::run(&vectors, k, CLUSTERING_SEED)))
        .collect();
    let inertias: Vec<f64> = runs.iter().map(|(_, r)| r.inertia).collect();
    for ((k, _), inertia) in runs.iter().zip(inertias.iter()) {
        debug!(k, inertia, "k-means candidate");
    }

    let (k, result) = runs.swap_remove(elbow_index(&inertias));

    let mut members: Vec<Vec<usize>> = vec![Vec::new(); k];
    for (i, &assignment) in result.assignments.iter().enumerate() {
        members[assignment].push(i);
    }
    let kept: Vec<Vec<usize>> = members
        .into_iter()
        .filter(|m| m.len() >= min_cluster_size)
        .collect();

    info!(
        batch = scored.len(),
        k,
        clusters = kept.len(),
        "clustering complete"
    );
    Ok(kept)
}

/// Pick the elbow: the index whose second discrete derivative of inertia
/// is maximal. Fewer than three samples default to the first candidate.
fn elbow_index(inertias: &[f64]) -> usize {
    if inertias.len() < 3 {
        return 0;
    }
    let mut best = 1;
    let mut best_curvature = f64::NEG_INFINITY;
    for j in 1..inertias.len() - 1 {
        let curvature = inertias[j - 1] - 2.0 * inertias[j] + inertias[j + 1];
        if curvature > best_curvature {
            best = j;
            best_curvature = curvature;
        }
    }
    best
}

/// Assemble a [`Cluster`] from member indices.
pub(crate) fn make_cluster(scored: &[ScoredKeyword], members: &[usize]) -> Cluster {
    let keywords: Vec<String> = members
        .iter()
        .map(|&i| scored[i].record.keyword.clone())
        .collect();
    let avg_opportunity = if members.is_empty() {
        0.0
    } else {
        round2(
            members.iter().map(|&i| scored[i].opportunity).sum::<f64>() / members.len() as f64,
        )
    };
    Cluster {
        label: topic_label(&keywords),
        keywords,
        avg_opportunity,
    }
}

/// Derive a topic label from the most frequent non-stopword tokens,
/// frequency descending then alphabetical.
fn topic_label(keywords: &[String]) -> String {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for keyword in keywords {
        for token in vectorize::content_tokens(keyword) {
            *counts.entry(token).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let tokens: Vec<String> = ranked.into_iter().take(2).map(|(t, _)| t).collect();
    if tokens.is_empty() {
        keywords
            .first()
            .map(|k| vectorize::preprocess(k))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "general".to_string())
    } else {
        tokens.join(" ")
    }
}

/// Rank population keywords by cosine similarity to a target keyword,
/// descending, ties broken by input order. The target itself is excluded.
pub fn find_similar(target: &str, population: &[String], top_n: usize) -> Vec<SimilarKeyword> {
    if population.is_empty() || top_n == 0 {
        return Vec::new();
    }

    let mut corpus: Vec<String> = population.to_vec();
    corpus.push(target.to_string());
    let (_, vectors) = TfIdfVectorizer::fit_transform(&corpus);
    let target_vector = &vectors[vectors.len() - 1];
    let target_text = vectorize::preprocess(target);

    let mut ranked: Vec<SimilarKeyword> = population
        .iter()
        .zip(vectors.iter())
        .filter(|(keyword, _)| vectorize::preprocess(keyword) != target_text)
        .map(|(keyword, vector)| SimilarKeyword {
            keyword: keyword.clone(),
            similarity: vectorize::cosine_similarity(vector, target_vector),
        })
        .collect();
    // Stable sort: equal similarities keep input order.
    ranked.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(top_n);
    ranked
}
