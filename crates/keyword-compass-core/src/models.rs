//! Core data models that flow through the analysis pipeline.
//!
//! All entities are computed fresh per analysis run and never mutated
//! after creation. The engine mandates no wire format; everything derives
//! `Serialize` so the calling layer can persist or export results as it
//! sees fit.

use serde::{Deserialize, Serialize};

/// A raw keyword-research record as exported by an upstream tool.
///
/// `difficulty` is nominally 0-100 and `cpc` non-negative, but neither is
/// clamped on input. The normalizer tolerates out-of-range values and
/// fails closed instead of rejecting the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub keyword: String,
    pub volume: u64,
    pub difficulty: f64,
    pub cpc: f64,
    /// Ordered intent tags from an open vocabulary (commonly
    /// Informational, Commercial, Navigational, Transactional).
    #[serde(default)]
    pub intents: Vec<String>,
}

/// Discrete opportunity band. Lower bounds are inclusive: a score of
/// exactly 80.0 is `High`, 79.99 is `Medium`, 59.99 is `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpportunityCategory {
    High,
    Medium,
    Low,
}

impl OpportunityCategory {
    /// Band an opportunity score using the documented thresholds.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            OpportunityCategory::High
        } else if score >= 60.0 {
            OpportunityCategory::Medium
        } else {
            OpportunityCategory::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OpportunityCategory::High => "high",
            OpportunityCategory::Medium => "medium",
            OpportunityCategory::Low => "low",
        }
    }
}

/// A keyword record plus its derived component scores and opportunity.
///
/// Component scores are each 0–100; `opportunity` is their convex
/// combination under the validated [`crate::score::ScoringWeights`],
/// rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredKeyword {
    #[serde(flatten)]
    pub record: KeywordRecord,
    pub volume_score: f64,
    pub difficulty_score: f64,
    pub cpc_score: f64,
    pub intent_score: f64,
    pub opportunity: f64,
    pub category: OpportunityCategory,
    pub primary_intent: Option<String>,
}

/// A group of topically related keywords produced by one clustering run.
///
/// Clusters are disjoint; members below the minimum cluster size are
/// dropped from the result, so the union of clusters may be smaller than
/// the input batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Derived topic label: the most frequent non-stopword tokens.
    pub label: String,
    pub keywords: Vec<String>,
    /// Mean opportunity score over the member keywords.
    pub avg_opportunity: f64,
}

/// Article format detected from the keyword patterns inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    ListArticle,
    HowToGuide,
    Comparison,
    Review,
    Tutorial,
    CaseStudy,
    Informational,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::ListArticle => "list-article",
            ContentType::HowToGuide => "how-to-guide",
            ContentType::Comparison => "comparison",
            ContentType::Review => "review",
            ContentType::Tutorial => "tutorial",
            ContentType::CaseStudy => "case-study",
            ContentType::Informational => "informational",
        }
    }
}

/// A content-idea candidate synthesized from one keyword group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentIdea {
    pub topic: String,
    pub title: String,
    pub content_type: ContentType,
    /// Top members by opportunity score.
    pub primary_keywords: Vec<String>,
    /// The next members after the primary picks.
    pub secondary_keywords: Vec<String>,
    pub seo_score: f64,
    pub traffic_score: f64,
    /// Arithmetic mean of `seo_score` and `traffic_score`.
    pub combined_score: f64,
    pub total_volume: u64,
    pub avg_difficulty: f64,
    pub avg_cpc: f64,
    pub tips: Vec<String>,
    pub outline: String,
}

/// Aggregate counts over a scored population, consumed by the insight
/// reporter and by the app layer's rendered summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationSummary {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    /// Keywords with difficulty <= 25 and volume >= 200.
    pub quick_wins: usize,
    /// Keywords with volume >= 5000.
    pub high_volume: usize,
    /// Keywords with CPC >= 2.0.
    pub high_cpc: usize,
}

/// The complete result bundle of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub scored: Vec<ScoredKeyword>,
    pub clusters: Vec<Cluster>,
    pub ideas: Vec<ContentIdea>,
    pub summary: PopulationSummary,
    pub insights: Vec<String>,
}
