//! Noesis: query orchestration over multi-domain knowledge stores.
//!
//! Three knowledge domains (science, technology, philosophy), each
//! backed by a vector store and a property graph, sit behind one
//! facade. A query is semantically routed to its best domain, searched
//! across domains concurrently with score fusion, enriched with graph
//! relationships, or traced as a relationship path between two
//! concepts.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use noesis::{Domain, KnowledgeOrchestrator};
//! # async fn example(
//! #     registry: Arc<noesis::DomainRegistry>,
//! #     embedder: Arc<dyn noesis::EmbeddingProvider>,
//! # ) -> noesis::Result<()> {
//! let orchestrator = KnowledgeOrchestrator::builder()
//!     .registry(registry)
//!     .embedder(embedder)
//!     .exemplars(Domain::Science, vec!["how do atoms bond".into()])
//!     .exemplars(Domain::Technology, vec!["how do neural networks learn".into()])
//!     .exemplars(Domain::Philosophy, vec!["what is knowledge".into()])
//!     .build()
//!     .await?;
//!
//! let routed = orchestrator.search("How do atoms bond together?", None).await?;
//! println!("answered by {}", routed.decision.domain);
//! # Ok(())
//! # }
//! ```

pub mod orchestrator;

pub use orchestrator::{KnowledgeOrchestrator, KnowledgeOrchestratorBuilder, RoutedSearch};

pub use noesis_core::embedding::{EmbeddingProvider, HashingEmbedder};
pub use noesis_core::error::{Error, Result};
pub use noesis_core::registry::{DomainRegistry, DomainRegistryBuilder, DomainStores};
pub use noesis_core::traits::{GraphStore, VectorStore};
pub use noesis_core::types::{
    ConnectionPath, Domain, DomainWarning, EdgeDirection, GraphConnection, GraphEdge, GraphNode,
    PathRelation, PathStep, QueryResult, RouterDecision, SearchHit, SearchReport, VectorMatch,
    VectorRecord,
};
pub use noesis_graph::ConnectionFinder;
pub use noesis_router::{IntentRouter, RouterConfig, ScoreStrategy};
pub use noesis_search::{FusedHits, FusionSearch, GraphEnhancer, SearchOptions, Truncation};
