//! The orchestration facade.
//!
//! [`KnowledgeOrchestrator`] wires the router, fusion search, enhancer,
//! and connection finder over one domain registry and exposes the four
//! public operations: route, routed search, multi-domain search, and
//! connection finding.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use noesis_core::embedding::EmbeddingProvider;
use noesis_core::error::{Error, Result};
use noesis_core::registry::DomainRegistry;
use noesis_core::types::{ConnectionPath, Domain, RouterDecision, SearchReport};
use noesis_graph::{ConnectionFinder, DEFAULT_MAX_HOPS};
use noesis_router::{IntentRouter, RouterConfig};
use noesis_search::{FusionSearch, GraphEnhancer, SearchOptions};

/// A routed search: the router's decision plus the enriched results
/// from the chosen domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutedSearch {
    /// Which domain answered, and with what confidence.
    pub decision: RouterDecision,

    /// The enriched results from that domain.
    pub report: SearchReport,
}

// ============================================================================
// Builder
// ============================================================================

/// Assembles a [`KnowledgeOrchestrator`].
pub struct KnowledgeOrchestratorBuilder {
    registry: Option<Arc<DomainRegistry>>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    exemplars: BTreeMap<Domain, Vec<String>>,
    router_config: RouterConfig,
    search_options: SearchOptions,
    enhancement_depth: usize,
    max_hops: usize,
}

impl KnowledgeOrchestratorBuilder {
    fn new() -> Self {
        Self {
            registry: None,
            embedder: None,
            exemplars: BTreeMap::new(),
            router_config: RouterConfig::default(),
            search_options: SearchOptions::default(),
            enhancement_depth: 1,
            max_hops: DEFAULT_MAX_HOPS,
        }
    }

    /// The domain registry every component searches against. Required.
    pub fn registry(mut self, registry: Arc<DomainRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// The embedding provider shared by router and search. Required.
    pub fn embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Register a domain's exemplar intents for routing. Every domain
    /// needs a non-empty set before `build` succeeds.
    pub fn exemplars(mut self, domain: Domain, phrases: Vec<String>) -> Self {
        self.exemplars.insert(domain, phrases);
        self
    }

    /// Override router tuning.
    pub fn router_config(mut self, config: RouterConfig) -> Self {
        self.router_config = config;
        self
    }

    /// Default search options for calls that pass none.
    pub fn search_options(mut self, options: SearchOptions) -> Self {
        self.search_options = options;
        self
    }

    /// Graph enrichment depth in hops.
    pub fn enhancement_depth(mut self, depth: usize) -> Self {
        self.enhancement_depth = depth;
        self
    }

    /// Connection-finder traversal bound in hops.
    pub fn max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Build the orchestrator, embedding all exemplar intents.
    ///
    /// # Errors
    ///
    /// Configuration errors for a missing registry or embedder, or for
    /// incomplete exemplar coverage.
    pub async fn build(self) -> Result<KnowledgeOrchestrator> {
        let registry = self
            .registry
            .ok_or_else(|| Error::config("orchestrator requires a domain registry"))?;
        let embedder = self
            .embedder
            .ok_or_else(|| Error::config("orchestrator requires an embedding provider"))?;

        let router =
            IntentRouter::new(Arc::clone(&embedder), self.exemplars, self.router_config).await?;
        let fusion = FusionSearch::new(Arc::clone(&registry), Arc::clone(&embedder));
        let enhancer =
            GraphEnhancer::new(Arc::clone(&registry)).with_depth(self.enhancement_depth);
        let finder = ConnectionFinder::new(Arc::clone(&registry)).with_max_hops(self.max_hops);

        info!(
            domains = registry.len(),
            embedder = embedder.name(),
            "orchestrator ready"
        );
        Ok(KnowledgeOrchestrator {
            registry,
            router,
            fusion,
            enhancer,
            finder,
            options: self.search_options,
        })
    }
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Routes, searches, enriches, and connects across knowledge domains.
pub struct KnowledgeOrchestrator {
    registry: Arc<DomainRegistry>,
    router: IntentRouter,
    fusion: FusionSearch,
    enhancer: GraphEnhancer,
    finder: ConnectionFinder,
    options: SearchOptions,
}

impl KnowledgeOrchestrator {
    /// Start assembling an orchestrator.
    pub fn builder() -> KnowledgeOrchestratorBuilder {
        KnowledgeOrchestratorBuilder::new()
    }

    /// Classify a query without searching.
    pub async fn route(&self, query: &str) -> Result<RouterDecision> {
        self.router.route(query).await
    }

    /// Route a query, search its winning domain, and enrich the hits.
    pub async fn search(
        &self,
        query: &str,
        options: Option<SearchOptions>,
    ) -> Result<RoutedSearch> {
        let decision = self.router.route(query).await?;
        let options = options.unwrap_or(self.options);
        let fused = self.fusion.search(query, &[decision.domain], options).await?;
        let results = self.enhancer.enhance(&fused.hits).await?;
        Ok(RoutedSearch {
            decision,
            report: SearchReport {
                results,
                warnings: fused.warnings,
            },
        })
    }

    /// Search every domain concurrently, merge, and enrich.
    pub async fn multi_domain_search(
        &self,
        query: &str,
        options: Option<SearchOptions>,
    ) -> Result<SearchReport> {
        let options = options.unwrap_or(self.options);
        let fused = self.fusion.search(query, &Domain::ALL, options).await?;
        let results = self.enhancer.enhance(&fused.hits).await?;
        Ok(SearchReport {
            results,
            warnings: fused.warnings,
        })
    }

    /// Find the shortest relationship path between two concepts.
    pub async fn find_connections(&self, from: &str, to: &str) -> Result<ConnectionPath> {
        self.finder.find(from, to).await
    }

    /// The registry this orchestrator searches.
    pub fn registry(&self) -> &DomainRegistry {
        &self.registry
    }
}
