//! Cluster-based matcher: k-means over job embeddings, candidate assigned
//! to the nearest fitted centroid, ranking restricted to that cluster.

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::RankedJob;
use crate::embedding::{self, Embedding, TextEmbedder};
use crate::{CandidateProfile, JobPosting};

/// Ephemeral per-invocation assignment of one job to a cluster.
#[derive(Debug, Clone)]
pub struct ClusterAssignment {
    pub job_index: usize,
    pub cluster: usize,
    pub embedding: Embedding,
}

#[derive(Debug, Clone)]
pub struct ClusterConfig {
    /// Number of clusters to partition the catalog into.
    pub clusters: usize,
    /// Fixed seed: identical (catalog, seed, k) always produce identical
    /// cluster boundaries.
    pub seed: u64,
    pub max_iterations: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            clusters: 5,
            seed: 42,
            max_iterations: 100,
        }
    }
}

/// Read cluster settings from the environment, with defaults.
pub fn load_config_from_env() -> ClusterConfig {
    let defaults = ClusterConfig::default();
    ClusterConfig {
        clusters: std::env::var("RR_CLUSTER_COUNT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.clusters),
        seed: std::env::var("RR_CLUSTER_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.seed),
        max_iterations: defaults.max_iterations,
    }
}

/// Alternative matcher: narrows the comparison set to the candidate's
/// cluster before ranking by cosine similarity.
///
/// Known trade-off, accepted by design: a strong match sitting just across
/// a cluster boundary is excluded from the ranking.
pub struct EmbeddingClusterMatcher {
    config: ClusterConfig,
    embedder: &'static dyn TextEmbedder,
}

impl Default for EmbeddingClusterMatcher {
    fn default() -> Self {
        Self::new(ClusterConfig::default())
    }
}

impl EmbeddingClusterMatcher {
    pub fn new(config: ClusterConfig) -> Self {
        Self {
            config,
            embedder: embedding::global(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(load_config_from_env())
    }

    /// Fit k-means on the catalog embeddings (catalog only: the candidate
    /// never participates in fitting), assign the candidate to the nearest
    /// centroid, and rank that cluster's jobs by similarity.
    pub fn rank(&self, profile: &CandidateProfile, catalog: &[JobPosting]) -> Vec<RankedJob> {
        let (assignments, centroids) = self.fit(catalog);
        if assignments.is_empty() {
            return Vec::new();
        }

        let candidate = self.embedder.embed_profile(profile);
        let candidate_cluster = nearest_centroid(&candidate.vector, &centroids);

        let mut ranked: Vec<RankedJob> = assignments
            .iter()
            .filter(|a| a.cluster == candidate_cluster)
            .map(|a| RankedJob {
                title: catalog[a.job_index].title.clone(),
                score: self.embedder.similarity(&candidate, &a.embedding) as f64,
            })
            .collect();

        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        ranked
    }

    /// Embed every job and partition the embeddings with seeded k-means.
    pub fn assign_clusters(&self, catalog: &[JobPosting]) -> Vec<ClusterAssignment> {
        self.fit(catalog).0
    }

    /// Fit the catalog: returns the per-job assignments together with the
    /// fitted centroids. The candidate must be placed against these exact
    /// centroids, not a recomputation from the labels, or an empty cluster
    /// could capture it.
    fn fit(&self, catalog: &[JobPosting]) -> (Vec<ClusterAssignment>, Vec<Vec<f32>>) {
        if catalog.is_empty() {
            return (Vec::new(), Vec::new());
        }

        let embeddings: Vec<Embedding> =
            catalog.iter().map(|job| self.embedder.embed_job(job)).collect();
        let vectors: Vec<&[f32]> = embeddings.iter().map(|e| e.vector.as_slice()).collect();

        let k = self.config.clusters.min(catalog.len()).max(1);
        let (labels, centroids) = kmeans(&vectors, k, self.config.seed, self.config.max_iterations);

        let assignments = embeddings
            .into_iter()
            .enumerate()
            .map(|(job_index, embedding)| ClusterAssignment {
                job_index,
                cluster: labels[job_index],
                embedding,
            })
            .collect();
        (assignments, centroids)
    }
}

/// Lloyd's algorithm with seeded initialization. Deterministic for a fixed
/// (points, k, seed); empty clusters keep their previous centroid. Returns
/// both the final labels and the centroids the last assignment used.
fn kmeans(
    points: &[&[f32]],
    k: usize,
    seed: u64,
    max_iterations: usize,
) -> (Vec<usize>, Vec<Vec<f32>>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..points.len()).collect();
    indices.shuffle(&mut rng);

    let mut centroids: Vec<Vec<f32>> = indices[..k].iter().map(|&i| points[i].to_vec()).collect();
    let mut labels = vec![0usize; points.len()];

    let mut iteration = 0;
    loop {
        let mut changed = false;
        for (i, point) in points.iter().enumerate() {
            let nearest = nearest_centroid(point, &centroids);
            if labels[i] != nearest {
                labels[i] = nearest;
                changed = true;
            }
        }

        iteration += 1;
        if !changed || iteration >= max_iterations {
            // Stop right after an assignment pass so the returned labels and
            // centroids agree.
            break;
        }
        centroids = centroids_from_labels(points, &labels, k, &centroids);
    }

    (labels, centroids)
}

/// Index of the closest centroid by squared Euclidean distance; ties go to
/// the lowest cluster index.
fn nearest_centroid(point: &[f32], centroids: &[Vec<f32>]) -> usize {
    let mut best = 0usize;
    let mut best_dist = f32::INFINITY;
    for (idx, centroid) in centroids.iter().enumerate() {
        let dist: f32 = point
            .iter()
            .zip(centroid.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        if dist < best_dist {
            best = idx;
            best_dist = dist;
        }
    }
    best
}

fn centroids_from_labels(
    points: &[&[f32]],
    labels: &[usize],
    k: usize,
    previous: &[Vec<f32>],
) -> Vec<Vec<f32>> {
    let dim = points.first().map(|p| p.len()).unwrap_or(0);
    let mut sums = vec![vec![0.0f32; dim]; k];
    let mut counts = vec![0usize; k];

    for (point, &label) in points.iter().zip(labels.iter()) {
        counts[label] += 1;
        for (acc, v) in sums[label].iter_mut().zip(point.iter()) {
            *acc += v;
        }
    }

    sums.into_iter()
        .enumerate()
        .map(|(idx, mut sum)| {
            if counts[idx] == 0 {
                previous[idx].clone()
            } else {
                for v in &mut sum {
                    *v /= counts[idx] as f32;
                }
                sum
            }
        })
        .collect()
}
