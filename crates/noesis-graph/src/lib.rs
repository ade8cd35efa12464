//! Federated graph traversal for Noesis.
//!
//! Path discovery over the per-domain property graphs, crossing domain
//! boundaries wherever the same node id exists in more than one graph.

pub mod finder;

pub use finder::{ConnectionFinder, DEFAULT_MAX_HOPS};
