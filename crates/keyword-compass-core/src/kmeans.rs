//! Seeded k-means partitioning over TF-IDF vectors.
//!
//! Determinism is a hard requirement, not a nice-to-have: given identical
//! input ordering and the same seed, clustering output must be bit-for-bit
//! reproducible. Initial centroids come from a seeded [`SmallRng`]
//! shuffle, nearest-centroid ties resolve to the lowest index, and empty
//! clusters keep their previous centroid.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

/// Initializations per k; the lowest-inertia run wins.
const N_INIT: u64 = 4;

/// Iteration bound per initialization.
const MAX_ITER: usize = 100;

/// Result of one k-means run.
#[derive(Debug, Clone)]
pub struct KMeansResult {
    /// Cluster index per input vector, parallel to the input slice.
    pub assignments: Vec<usize>,
    pub centroids: Vec<Vec<f64>>,
    /// Within-cluster sum of squared distances.
    pub inertia: f64,
}

/// Run k-means with [`N_INIT`] seeded initializations, keeping the best
/// (lowest-inertia) result.
///
/// Callers guarantee `1 <= k <= vectors.len()` and a non-empty input.
pub fn run(vectors: &[Vec<f64>], k: usize, seed: u64) -> KMeansResult {
    let mut best = run_single(vectors, k, seed);
    for init in 1..N_INIT {
        let candidate = run_single(vectors, k, seed.wrapping_add(init));
        if candidate.inertia < best.inertia {
            best = candidate;
        }
    }
    debug!(k, inertia = best.inertia, "k-means complete");
    best
}

fn run_single(vectors: &[Vec<f64>], k: usize, seed: u64) -> KMeansResult {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..vectors.len()).collect();
    indices.shuffle(&mut rng);
    indices.truncate(k);

    let mut centroids: Vec<Vec<f64>> = indices.iter().map(|&i| vectors[i].clone()).collect();
    let mut assignments: Vec<usize> = vectors
        .iter()
        .map(|v| nearest_centroid(v, &centroids))
        .collect();

    for _ in 0..MAX_ITER {
        centroids = recompute_centroids(vectors, &assignments, &centroids);
        let next: Vec<usize> = vectors
            .iter()
            .map(|v| nearest_centroid(v, &centroids))
            .collect();
        if next == assignments {
            break;
        }
        assignments = next;
    }

    let inertia = assignments
        .iter()
        .zip(vectors.iter())
        .map(|(&a, v)| squared_distance(v, &centroids[a]))
        .sum();

    KMeansResult {
        assignments,
        centroids,
        inertia,
    }
}

/// Index of the closest centroid; ties resolve to the lowest index.
fn nearest_centroid(vector: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let dist = squared_distance(vector, centroid);
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

/// Mean of each cluster's members; an empty cluster keeps its previous
/// centroid so the run stays deterministic.
fn recompute_centroids(
    vectors: &[Vec<f64>],
    assignments: &[usize],
    previous: &[Vec<f64>],
) -> Vec<Vec<f64>> {
    let k = previous.len();
    let dims = previous.first().map_or(0, Vec::len);
    let mut sums = vec![vec![0.0; dims]; k];
    let mut counts = vec![0usize; k];

    for (&a, vector) in assignments.iter().zip(vectors.iter()) {
        counts[a] += 1;
        for (s, v) in sums[a].iter_mut().zip(vector.iter()) {
            *s += v;
        }
    }

    sums.into_iter()
        .zip(counts)
        .enumerate()
        .map(|(i, (mut sum, count))| {
            if count == 0 {
                previous[i].clone()
            } else {
                for s in sum.iter_mut() {
                    *s /= count as f64;
                }
                sum
            }
        })
        .collect()
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_blobs() -> Vec<Vec<f64>> {
        vec![
            vec![1.0, 0.0, 0.0],
            vec![0.9, 0.1, 0.0],
            vec![1.0, 0.1, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![0.0, 0.1, 0.9],
            vec![0.1, 0.0, 1.0],
        ]
    }

    #[test]
    fn test_separates_two_obvious_blobs() {
        let result = run(&two_blobs(), 2, 42);
        let first = result.assignments[0];
        assert_eq!(result.assignments[1], first);
        assert_eq!(result.assignments[2], first);
        let second = result.assignments[3];
        assert_ne!(first, second);
        assert_eq!(result.assignments[4], second);
        assert_eq!(result.assignments[5], second);
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let vectors = two_blobs();
        let a = run(&vectors, 2, 42);
        let b = run(&vectors, 2, 42);
        assert_eq!(a.assignments, b.assignments);
        assert_eq!(a.centroids, b.centroids);
        assert_eq!(a.inertia, b.inertia);
    }

    #[test]
    fn test_k_equals_one_puts_everything_together() {
        let result = run(&two_blobs(), 1, 42);
        assert!(result.assignments.iter().all(|&a| a == 0));
    }

    #[test]
    fn test_inertia_non_negative_and_shrinks_with_k() {
        let vectors = two_blobs();
        let k1 = run(&vectors, 1, 42);
        let k2 = run(&vectors, 2, 42);
        assert!(k1.inertia >= 0.0);
        assert!(k2.inertia <= k1.inertia);
    }

    #[test]
    fn test_assignments_parallel_to_input() {
        let vectors = two_blobs();
        let result = run(&vectors, 2, 7);
        assert_eq!(result.assignments.len(), vectors.len());
        assert!(result.assignments.iter().all(|&a| a < 2));
    }
}
