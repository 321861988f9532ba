use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use keyword_compass_core::pipeline::AnalysisParams;
use keyword_compass_core::score::ScoringWeights;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub clustering: ClusteringConfig,
    #[serde(default)]
    pub ideas: IdeasConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeightsConfig {
    #[serde(default = "default_volume_weight")]
    pub volume: f64,
    #[serde(default = "default_difficulty_weight")]
    pub difficulty: f64,
    #[serde(default = "default_cpc_weight")]
    pub cpc: f64,
    #[serde(default = "default_intent_weight")]
    pub intent: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            volume: default_volume_weight(),
            difficulty: default_difficulty_weight(),
            cpc: default_cpc_weight(),
            intent: default_intent_weight(),
        }
    }
}

fn default_volume_weight() -> f64 {
    0.4
}
fn default_difficulty_weight() -> f64 {
    0.3
}
fn default_cpc_weight() -> f64 {
    0.2
}
fn default_intent_weight() -> f64 {
    0.1
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClusteringConfig {
    #[serde(default = "default_min_cluster_size")]
    pub min_cluster_size: usize,
    #[serde(default = "default_max_clusters")]
    pub max_clusters: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            min_cluster_size: default_min_cluster_size(),
            max_clusters: default_max_clusters(),
        }
    }
}

fn default_min_cluster_size() -> usize {
    3
}
fn default_max_clusters() -> usize {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct IdeasConfig {
    #[serde(default = "default_min_group_size")]
    pub min_group_size: usize,
}

impl Default for IdeasConfig {
    fn default() -> Self {
        Self {
            min_group_size: default_min_group_size(),
        }
    }
}

fn default_min_group_size() -> usize {
    3
}

impl Config {
    /// Engine parameters for this configuration.
    pub fn params(&self) -> AnalysisParams {
        AnalysisParams {
            weights: ScoringWeights {
                volume: self.weights.volume,
                difficulty: self.weights.difficulty,
                cpc: self.weights.cpc,
                intent: self.weights.intent,
            },
            min_cluster_size: self.clustering.min_cluster_size,
            max_clusters: self.clustering.max_clusters,
            min_group_size: self.ideas.min_group_size,
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate weights; the engine re-checks, but failing here names the
    // config file in the error chain.
    for (name, value) in [
        ("weights.volume", config.weights.volume),
        ("weights.difficulty", config.weights.difficulty),
        ("weights.cpc", config.weights.cpc),
        ("weights.intent", config.weights.intent),
    ] {
        if !value.is_finite() || value < 0.0 {
            anyhow::bail!("{} must be a non-negative number, got {}", name, value);
        }
    }
    let sum = config.weights.volume
        + config.weights.difficulty
        + config.weights.cpc
        + config.weights.intent;
    if (sum - 1.0).abs() > 1e-3 {
        anyhow::bail!("weights must sum to 1.0, got {:.4}", sum);
    }

    if config.clustering.min_cluster_size == 0 {
        anyhow::bail!("clustering.min_cluster_size must be >= 1");
    }
    if config.clustering.max_clusters == 0 {
        anyhow::bail!("clustering.max_clusters must be >= 1");
    }
    if config.ideas.min_group_size == 0 {
        anyhow::bail!("ideas.min_group_size must be >= 1");
    }

    Ok(config)
}

/// Load the config at `path`, falling back to defaults when the file
/// does not exist.
pub fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_engine_defaults() {
        let config = Config::default();
        let params = config.params();
        assert_eq!(params.weights, ScoringWeights::default());
        assert_eq!(params.min_cluster_size, 3);
        assert_eq!(params.max_clusters, 10);
        assert_eq!(params.min_group_size, 3);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [weights]
            volume = 0.5
            difficulty = 0.2
            cpc = 0.2
            intent = 0.1
            "#,
        )
        .unwrap();
        assert_eq!(config.weights.volume, 0.5);
        assert_eq!(config.clustering.max_clusters, 10);
        assert_eq!(config.ideas.min_group_size, 3);
    }

    #[test]
    fn test_empty_config_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.weights.volume, 0.4);
        assert_eq!(config.weights.intent, 0.1);
    }
}
