//! Core types, errors, and collaborator traits for Noesis.
//!
//! Noesis is a query orchestration layer sitting in front of several
//! independent knowledge domains, each backed by a vector similarity
//! store and a property graph store. This crate defines everything the
//! orchestration components share:
//!
//! - The [`Domain`](types::Domain) enumeration and transient result
//!   types (`SearchHit`, `QueryResult`, `ConnectionPath`, ...)
//! - The [`Error`](error::Error) taxonomy and `Result` alias
//! - Collaborator traits for the external store boundary
//!   ([`VectorStore`](traits::VectorStore),
//!   [`GraphStore`](traits::GraphStore),
//!   [`EmbeddingProvider`](embedding::EmbeddingProvider))
//! - The validated [`DomainRegistry`](registry::DomainRegistry) holding
//!   dependency-injected store handles

pub mod embedding;
pub mod error;
pub mod registry;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use embedding::{EmbeddingProvider, HashingEmbedder, cosine_similarity};
pub use error::{Error, Result};
pub use registry::{DomainRegistry, DomainRegistryBuilder, DomainStores};
pub use traits::{GraphStore, VectorStore};
pub use types::{
    ConnectionPath, Domain, DomainWarning, EdgeDirection, GraphConnection, GraphEdge, GraphNode,
    PathRelation, PathStep, QueryResult, RouterDecision, SearchHit, SearchReport, VectorMatch,
    VectorRecord,
};
