//! In-memory reference stores for Noesis.
//!
//! These back the collaborator traits from `noesis-core` for tests and
//! the demo CLI:
//!
//! - [`MemoryVectorStore`]: brute-force cosine nearest-neighbor scan
//! - [`MemoryGraphStore`]: petgraph-backed directed property graph
//!
//! The `test-utils` feature adds deliberately misbehaving doubles
//! (failing and slow stores) for failure-isolation and deadline tests.

pub mod graph;
pub mod vector;

#[cfg(any(test, feature = "test-utils"))]
pub mod failing;

pub use graph::MemoryGraphStore;
pub use vector::MemoryVectorStore;

#[cfg(any(test, feature = "test-utils"))]
pub use failing::{FailingGraphStore, FailingVectorStore, SlowVectorStore};
