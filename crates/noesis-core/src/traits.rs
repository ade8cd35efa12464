//! Collaborator traits for the external store boundary.
//!
//! The orchestration layer never owns a vector index or a graph engine;
//! it talks to them through these narrow async interfaces. Production
//! backends live outside this repository; `noesis-store` provides
//! in-memory reference implementations for tests and demos.
//!
//! All traits require `Send + Sync` so store handles can be shared
//! across fan-out tasks behind `Arc`.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{EdgeDirection, GraphEdge, GraphNode, VectorMatch};

/// Nearest-neighbor search over one domain's stored vectors.
///
/// Implementations return matches ranked ascending by distance, breaking
/// exact distance ties by record id so rankings are deterministic.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Return up to `k` nearest matches for the query vector.
    async fn search(&self, vector: &[f32], k: usize) -> Result<Vec<VectorMatch>>;
}

/// Typed-node, directed-edge storage for one domain's property graph.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Look up a node by exact id.
    async fn get_node(&self, id: &str) -> Result<Option<GraphNode>>;

    /// All edges incident to a node in the given direction.
    async fn get_edges(&self, node_id: &str, direction: EdgeDirection)
    -> Result<Vec<GraphEdge>>;

    /// Look up a node by its `name` property, case-insensitively.
    ///
    /// Used by the connection finder's fallback endpoint resolution.
    async fn find_node_by_name(&self, name: &str) -> Result<Option<GraphNode>>;
}
