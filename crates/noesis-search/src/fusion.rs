//! Multi-domain fan-out search with score fusion.
//!
//! The same embedded query is issued concurrently against every target
//! domain's vector store; all branches complete (or individually fail)
//! before the merge runs — a join barrier, not a race. A failed or
//! timed-out branch degrades the result with a warning marker; only the
//! loss of every target domain fails the call.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use noesis_core::embedding::EmbeddingProvider;
use noesis_core::error::{Error, Result};
use noesis_core::registry::DomainRegistry;
use noesis_core::types::{Domain, DomainWarning, SearchHit, VectorMatch};

// ============================================================================
// Options
// ============================================================================

/// Whether the merged list is re-truncated after fusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Truncation {
    /// Keep up to `k` hits from each domain (no re-truncation).
    PerDomain,

    /// Re-truncate the merged list to `k` overall.
    Overall,
}

/// Parameters for one fused search call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Hits requested per domain; must be at least 1.
    pub k: usize,

    /// Top-k semantics across domains.
    pub truncation: Truncation,

    /// Caller-supplied deadline per branch. A branch still pending when
    /// it elapses counts as a failed domain.
    #[serde(skip)]
    pub timeout: Option<Duration>,
}

impl SearchOptions {
    /// Options requesting `k` hits per domain, no deadline.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            truncation: Truncation::PerDomain,
            ..Default::default()
        }
    }

    /// Set the truncation policy.
    pub fn with_truncation(mut self, truncation: Truncation) -> Self {
        self.truncation = truncation;
        self
    }

    /// Set the per-branch deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            k: 5,
            truncation: Truncation::PerDomain,
            timeout: None,
        }
    }
}

/// The outcome of a fused search: merged hits plus markers for any
/// domain that contributed nothing because its store failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusedHits {
    /// Hits sorted by score descending, ties by `(domain, id)`.
    pub hits: Vec<SearchHit>,

    /// One marker per failed domain.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<DomainWarning>,
}

// ============================================================================
// FusionSearch
// ============================================================================

/// Fans queries out across domain vector stores and fuses the results.
pub struct FusionSearch {
    registry: Arc<DomainRegistry>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl FusionSearch {
    /// Create a fusion searcher over the registered domains.
    pub fn new(registry: Arc<DomainRegistry>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { registry, embedder }
    }

    /// Search the given target domains and merge the results.
    ///
    /// # Errors
    ///
    /// - `InvalidQuery` for a blank query, empty target set, or `k == 0`
    ///   (checked before any store I/O)
    /// - `AllDomainsUnavailable` when every target domain fails
    pub async fn search(
        &self,
        query: &str,
        domains: &[Domain],
        options: SearchOptions,
    ) -> Result<FusedHits> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_query("query is empty"));
        }
        if domains.is_empty() {
            return Err(Error::invalid_query("no target domains"));
        }
        if options.k == 0 {
            return Err(Error::invalid_query("k must be positive"));
        }

        let embedding = self.embedder.embed(trimmed).await?;

        let registry = &self.registry;
        let branches = domains.iter().map(|&domain| {
            let embedding = &embedding;
            async move {
                let outcome = Self::search_domain(registry, embedding, domain, options).await;
                (domain, outcome)
            }
        });

        // Join barrier: every branch completes or fails before merging.
        let outcomes = join_all(branches).await;

        let mut hits = Vec::new();
        let mut warnings = Vec::new();
        for (domain, outcome) in outcomes {
            match outcome {
                Ok(matches) => {
                    debug!(domain = %domain, count = matches.len(), "domain search complete");
                    hits.extend(
                        matches
                            .into_iter()
                            .map(|m| SearchHit::from_match(domain, m)),
                    );
                }
                Err(err) => {
                    warn!(domain = %domain, error = %err, "domain search failed");
                    warnings.push(DomainWarning {
                        domain,
                        message: err.to_string(),
                    });
                }
            }
        }

        if warnings.len() == domains.len() {
            return Err(Error::AllDomainsUnavailable);
        }

        rank_hits(&mut hits);
        if options.truncation == Truncation::Overall {
            hits.truncate(options.k);
        }

        Ok(FusedHits { hits, warnings })
    }

    async fn search_domain(
        registry: &DomainRegistry,
        embedding: &[f32],
        domain: Domain,
        options: SearchOptions,
    ) -> Result<Vec<VectorMatch>> {
        let stores = registry.get(domain)?;
        let search = stores.vector.search(embedding, options.k);

        match options.timeout {
            Some(deadline) => tokio::time::timeout(deadline, search)
                .await
                .map_err(|_| Error::domain_unavailable(domain, "deadline elapsed"))?,
            None => search.await,
        }
    }
}

/// Sort hits by score descending; exact score ties break by
/// `(domain, id)` ascending so fused rankings are deterministic.
pub fn rank_hits(hits: &mut [SearchHit]) {
    hits.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.domain.cmp(&b.domain))
            .then_with(|| a.id.cmp(&b.id))
    });
}
