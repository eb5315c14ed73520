//! Embedding service used by extraction and both matchers.
//!
//! The embedder is treated as an expensive, stateless, read-only resource:
//! initialized once per process behind [`global`], shared freely across
//! invocations (`Send + Sync`, no hidden caching).

pub mod hash_embedder;
pub mod tokenizer;

use std::sync::OnceLock;

pub use hash_embedder::HashEmbedder;
pub use tokenizer::WeightedToken;

use crate::{CandidateProfile, JobPosting};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Embedding {
    pub vector: Vec<f32>,
    pub source: EmbeddingSource,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingSource {
    Document,
    Phrase,
    Job,
    Profile,
}

/// Abstract text embedder.
///
/// The shipped implementation is [`HashEmbedder`] (feature hashing,
/// deterministic, no model files); the trait is the seam where a learned
/// model would plug in.
pub trait TextEmbedder: Send + Sync {
    /// Implementation name ("hash", ...).
    fn name(&self) -> &'static str;

    /// Generation marker; bump when token design or hashing changes.
    fn version(&self) -> &str;

    fn dimension(&self) -> usize;

    fn embed_tokens(&self, tokens: Vec<WeightedToken>, source: EmbeddingSource) -> Embedding;

    fn embed_text(&self, text: &str) -> Embedding {
        self.embed_tokens(tokenizer::tokenize_text(text), EmbeddingSource::Document)
    }

    fn embed_phrase(&self, phrase: &str) -> Embedding {
        self.embed_tokens(tokenizer::tokenize_text(phrase), EmbeddingSource::Phrase)
    }

    fn embed_job(&self, job: &JobPosting) -> Embedding {
        self.embed_tokens(
            tokenizer::tokenize_text(&tokenizer::describe_job(job)),
            EmbeddingSource::Job,
        )
    }

    fn embed_profile(&self, profile: &CandidateProfile) -> Embedding {
        self.embed_tokens(
            tokenizer::tokenize_text(&tokenizer::describe_profile(profile)),
            EmbeddingSource::Profile,
        )
    }

    /// Mean-pooled embedding of a set of phrases; `None` when the set is
    /// empty (the degenerate-similarity contract lives with the caller).
    fn embed_phrase_set(&self, phrases: &[&str]) -> Option<Embedding> {
        let embeddings: Vec<Embedding> = phrases
            .iter()
            .map(|phrase| self.embed_phrase(phrase))
            .collect();
        mean_pool(&embeddings)
    }

    /// Similarity of two embeddings in [0.0, 1.0].
    fn similarity(&self, a: &Embedding, b: &Embedding) -> f32 {
        if a.vector.len() != b.vector.len() {
            warn!(
                source_a = ?a.source,
                source_b = ?b.source,
                a_len = a.vector.len(),
                b_len = b.vector.len(),
                "embedding dimension mismatch; returning zero similarity"
            );
            return 0.0;
        }
        cosine_similarity(&a.vector, &b.vector)
    }
}

/// Mean-pool a batch of embeddings; `None` on an empty batch.
pub fn mean_pool(embeddings: &[Embedding]) -> Option<Embedding> {
    let first = embeddings.first()?;
    let dim = first.vector.len();
    let mut pooled = vec![0.0f32; dim];

    for emb in embeddings {
        for (acc, v) in pooled.iter_mut().zip(emb.vector.iter()) {
            *acc += v;
        }
    }
    let n = embeddings.len() as f32;
    for v in &mut pooled {
        *v /= n;
    }

    Some(Embedding {
        vector: pooled,
        source: first.source,
        created_at: chrono::Utc::now(),
    })
}

/// Cosine similarity mapped into [0.0, 1.0].
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        warn!(
            a_len = a.len(),
            b_len = b.len(),
            "embedding dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    // Clamp to [0, 1] for normalized similarity
    (((dot / (norm_a * norm_b)) + 1.0) / 2.0).clamp(0.0, 1.0)
}

#[derive(Debug, Clone)]
pub struct EmbedderConfig {
    /// Embedding dimension (powers of two recommended: 256, 512, 1024).
    pub dimension: usize,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self { dimension: 256 }
    }
}

/// Read embedder settings from the environment, with defaults.
pub fn load_config_from_env() -> EmbedderConfig {
    EmbedderConfig {
        dimension: std::env::var("RR_EMBED_DIMENSION")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
    }
}

static GLOBAL_EMBEDDER: OnceLock<Box<dyn TextEmbedder>> = OnceLock::new();

/// Install a process-wide embedder. First caller wins; later calls are
/// ignored (the service must stay stable for the life of the process).
pub fn init(embedder: Box<dyn TextEmbedder>) {
    let _ = GLOBAL_EMBEDDER.set(embedder);
}

/// The process-wide embedder, lazily defaulting to a `HashEmbedder` built
/// from env config when `init` was never called.
pub fn global() -> &'static dyn TextEmbedder {
    GLOBAL_EMBEDDER
        .get_or_init(|| Box::new(HashEmbedder::new(load_config_from_env())))
        .as_ref()
}
