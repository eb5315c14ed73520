use std::hash::{Hash, Hasher};

use siphasher::sip::SipHasher13;

use super::{Embedding, EmbedderConfig, EmbeddingSource, TextEmbedder, WeightedToken};

/// Fixed seeds for deterministic hashing.
/// Changing either value changes every embedding; bump `version()` with it.
const HASH_SEED_K0: u64 = 0x6a0b_c512_37de_91f4;
const HASH_SEED_K1: u64 = 0x84f1_0d3a_e652_7c9b;

/// Deterministic feature-hashing embedder.
///
/// - no model files, no training
/// - O(n) in token count
/// - SipHash13 with fixed seeds keeps vectors stable across Rust versions
pub struct HashEmbedder {
    config: EmbedderConfig,
}

impl HashEmbedder {
    pub fn new(config: EmbedderConfig) -> Self {
        let mut cfg = config;
        cfg.dimension = cfg.dimension.max(1);
        Self { config: cfg }
    }

    /// Hash a token into a dimension index.
    fn hash_token(&self, token: &str) -> usize {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        token.hash(&mut hasher);
        (hasher.finish() as usize) % self.config.dimension
    }
}

impl TextEmbedder for HashEmbedder {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn version(&self) -> &str {
        "v1"
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    fn embed_tokens(&self, tokens: Vec<WeightedToken>, source: EmbeddingSource) -> Embedding {
        let mut vector = vec![0.0f32; self.config.dimension];

        for wt in &tokens {
            let idx = self.hash_token(&wt.token);
            // Sign hashing: even hash of the shadow token adds, odd subtracts.
            let sign = if self.hash_token(&format!("{}_sign", wt.token)) % 2 == 0 {
                1.0
            } else {
                -1.0
            };
            vector[idx] += sign * wt.weight;
        }

        // L2 normalization
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        Embedding {
            vector,
            source,
            created_at: chrono::Utc::now(),
        }
    }
}
