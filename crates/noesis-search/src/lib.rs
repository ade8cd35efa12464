//! Search fusion and graph enrichment for Noesis.
//!
//! Two stages run over the domain registry:
//!
//! 1. [`FusionSearch`] fans an embedded query out across domain vector
//!    stores concurrently and merges the branches into one ranked list,
//!    isolating per-domain failures as warnings.
//! 2. [`GraphEnhancer`] annotates the surviving hits with relationships
//!    from each domain's property graph.

pub mod enhancer;
pub mod fusion;

pub use enhancer::GraphEnhancer;
pub use fusion::{FusedHits, FusionSearch, SearchOptions, Truncation, rank_hits};
