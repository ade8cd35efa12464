//! In-memory vector store with brute-force cosine search.
//!
//! The reference [`VectorStore`] implementation: records live in a `Vec`,
//! search is an exact scan. Suitable for demos and tests; production
//! ANN backends live behind the same trait outside this repository.

use async_trait::async_trait;

use noesis_core::error::{Error, Result};
use noesis_core::traits::VectorStore;
use noesis_core::types::{VectorMatch, VectorRecord};
use noesis_core::cosine_similarity;

/// Brute-force in-memory vector store.
///
/// Records are inserted at build time and never mutated afterwards;
/// share the finished store behind an `Arc`.
pub struct MemoryVectorStore {
    dimension: usize,
    records: Vec<VectorRecord>,
}

impl MemoryVectorStore {
    /// Create an empty store for vectors of the given dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            records: Vec::new(),
        }
    }

    /// Insert a record at ingestion time.
    ///
    /// # Errors
    ///
    /// Fails if the record's vector has the wrong dimension.
    pub fn insert(&mut self, record: VectorRecord) -> Result<()> {
        if record.vector.len() != self.dimension {
            return Err(Error::store(format!(
                "dimension mismatch for record {}: expected {}, got {}",
                record.id,
                self.dimension,
                record.vector.len()
            )));
        }
        self.records.push(record);
        Ok(())
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn search(&self, vector: &[f32], k: usize) -> Result<Vec<VectorMatch>> {
        if vector.len() != self.dimension {
            return Err(Error::store(format!(
                "query dimension mismatch: expected {}, got {}",
                self.dimension,
                vector.len()
            )));
        }

        let mut matches: Vec<VectorMatch> = self
            .records
            .iter()
            .map(|record| VectorMatch {
                id: record.id.clone(),
                distance: (1.0 - cosine_similarity(vector, &record.vector)).max(0.0),
                metadata: record.metadata.clone(),
            })
            .collect();

        // Ascending distance; exact ties broken by id for determinism.
        matches.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.id.cmp(&b.id))
        });
        matches.truncate(k);

        Ok(matches)
    }
}
