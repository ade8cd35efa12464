//! Semantic intent routing for Noesis.
//!
//! Decides which knowledge domain a free-text query belongs to by
//! comparing the embedded query against each domain's pre-embedded
//! exemplar intent set. See [`IntentRouter`].

pub mod router;

pub use router::{IntentRouter, RouterConfig, ScoreStrategy};
