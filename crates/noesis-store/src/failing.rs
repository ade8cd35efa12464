//! Misbehaving store doubles for failure-isolation tests.

use std::time::Duration;

use async_trait::async_trait;

use noesis_core::error::{Error, Result};
use noesis_core::traits::{GraphStore, VectorStore};
use noesis_core::types::{EdgeDirection, GraphEdge, GraphNode, VectorMatch};

/// A vector store whose every search fails.
pub struct FailingVectorStore;

#[async_trait]
impl VectorStore for FailingVectorStore {
    async fn search(&self, _vector: &[f32], _k: usize) -> Result<Vec<VectorMatch>> {
        Err(Error::store("backend offline"))
    }
}

/// A graph store whose every lookup fails.
pub struct FailingGraphStore;

#[async_trait]
impl GraphStore for FailingGraphStore {
    async fn get_node(&self, _id: &str) -> Result<Option<GraphNode>> {
        Err(Error::store("backend offline"))
    }

    async fn get_edges(
        &self,
        _node_id: &str,
        _direction: EdgeDirection,
    ) -> Result<Vec<GraphEdge>> {
        Err(Error::store("backend offline"))
    }

    async fn find_node_by_name(&self, _name: &str) -> Result<Option<GraphNode>> {
        Err(Error::store("backend offline"))
    }
}

/// A vector store that stalls before answering, for deadline tests.
pub struct SlowVectorStore {
    delay: Duration,
    matches: Vec<VectorMatch>,
}

impl SlowVectorStore {
    /// Create a store that sleeps for `delay` before returning `matches`.
    pub fn new(delay: Duration, matches: Vec<VectorMatch>) -> Self {
        Self { delay, matches }
    }
}

#[async_trait]
impl VectorStore for SlowVectorStore {
    async fn search(&self, _vector: &[f32], k: usize) -> Result<Vec<VectorMatch>> {
        tokio::time::sleep(self.delay).await;
        let mut matches = self.matches.clone();
        matches.truncate(k);
        Ok(matches)
    }
}
