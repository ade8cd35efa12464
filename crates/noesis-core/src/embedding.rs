//! Embedding provider trait and the deterministic hashing implementation.
//!
//! The trait abstracts over embedding backends; the orchestration layer
//! only requires that embedding be deterministic and side-effect-free.
//! [`HashingEmbedder`] is the always-available implementation: a
//! feature-hashed bag of lowercase tokens, L2-normalised, so texts that
//! share vocabulary land near each other under cosine similarity. It is
//! deterministic across processes, which the router's exemplar scoring
//! and the test suite both rely on.

use async_trait::async_trait;

use crate::error::Result;

/// Trait for generating text embeddings.
///
/// Implementations must be deterministic: the same text always produces
/// the same vector for the lifetime of the provider.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// The embedding dimension.
    fn dimension(&self) -> usize;

    /// The provider name for diagnostics.
    fn name(&self) -> &str;
}

/// Deterministic feature-hashing embedder.
///
/// Tokenizes on non-alphanumeric boundaries, lowercases, hashes each
/// token into one of `dimension` buckets with FNV-1a, accumulates counts,
/// and L2-normalises. All components are non-negative, so cosine
/// similarity between two embeddings lands in [0, 1].
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    /// Default embedding dimension.
    pub const DEFAULT_DIMENSION: usize = 384;

    /// Create an embedder with the default dimension.
    pub fn new() -> Self {
        Self::with_dimension(Self::DEFAULT_DIMENSION)
    }

    /// Create an embedder with a specific dimension.
    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.dimension];

        for token in tokens(text) {
            let bucket = (fnv1a(token.as_bytes()) % self.dimension as u64) as usize;
            embedding[bucket] += 1.0;
        }

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for val in &mut embedding {
                *val /= norm;
            }
        }

        embedding
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_text(text))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        "hashing"
    }
}

/// Lowercased alphanumeric tokens of at least two characters.
fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 2)
        .map(str::to_lowercase)
}

/// FNV-1a, inlined so hashing is stable across platforms and runs.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET;
    for &b in bytes {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

/// Cosine similarity between two vectors of equal length.
///
/// Returns 0.0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embed_is_deterministic() {
        let embedder = HashingEmbedder::with_dimension(64);
        let a = embedder.embed("quantum mechanics").await.unwrap();
        let b = embedder.embed("quantum mechanics").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_embed_is_unit_normalised() {
        let embedder = HashingEmbedder::with_dimension(64);
        let v = embedder.embed("how do atoms bond together").await.unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_embed_empty_text_is_zero_vector() {
        let embedder = HashingEmbedder::with_dimension(16);
        let v = embedder.embed("").await.unwrap();
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[tokio::test]
    async fn test_shared_vocabulary_scores_higher() {
        let embedder = HashingEmbedder::with_dimension(256);
        let query = embedder.embed("how do atoms bond together").await.unwrap();
        let close = embedder
            .embed("chemical bonds between atoms and molecules")
            .await
            .unwrap();
        let far = embedder
            .embed("kubernetes deployment rollout strategies")
            .await
            .unwrap();

        assert!(cosine_similarity(&query, &close) > cosine_similarity(&query, &far));
    }

    #[test]
    fn test_cosine_similarity_bounds() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert_eq!(cosine_similarity(&a, &a), 1.0);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        assert_eq!(cosine_similarity(&a, &[]), 0.0);
    }

    #[test]
    fn test_tokens_skip_short_and_punctuation() {
        let toks: Vec<String> = tokens("A quick, brown fox? I").collect();
        assert_eq!(toks, vec!["quick", "brown", "fox"]);
    }

    #[test]
    fn test_fnv1a_known_value() {
        // FNV-1a of empty input is the offset basis.
        assert_eq!(fnv1a(b""), 0xcbf2_9ce4_8422_2325);
        assert_ne!(fnv1a(b"atoms"), fnv1a(b"atom"));
    }
}
