//! Exemplar-similarity intent routing.
//!
//! Each domain registers a small curated set of exemplar phrases. The
//! router embeds every exemplar once at construction; routing a query
//! embeds the query and scores each domain by cosine similarity against
//! its exemplars. The decision is pure: same query, same router state,
//! same answer.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use noesis_core::embedding::{EmbeddingProvider, cosine_similarity};
use noesis_core::error::{Error, Result};
use noesis_core::types::{Domain, RouterDecision};

// ============================================================================
// Configuration
// ============================================================================

/// How a domain's exemplar similarities collapse into one score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStrategy {
    /// The maximum similarity across the domain's exemplars.
    Max,

    /// The mean of the top-k similarities (k capped at the exemplar
    /// count; `TopKMean(1)` is equivalent to `Max`).
    TopKMean(usize),
}

/// Router tuning knobs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Scores within this distance of the top score are ties, resolved
    /// by lexicographic domain order.
    pub epsilon: f32,

    /// Similarity aggregation strategy.
    pub strategy: ScoreStrategy,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-6,
            strategy: ScoreStrategy::Max,
        }
    }
}

// ============================================================================
// IntentRouter
// ============================================================================

/// One pre-embedded exemplar phrase.
struct Exemplar {
    phrase: String,
    embedding: Vec<f32>,
}

/// Classifies queries against per-domain exemplar sets.
pub struct IntentRouter {
    embedder: Arc<dyn EmbeddingProvider>,
    exemplars: BTreeMap<Domain, Vec<Exemplar>>,
    config: RouterConfig,
}

impl IntentRouter {
    /// Build a router, embedding every exemplar phrase once.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error if any domain in
    /// [`Domain::ALL`] is missing from `exemplars` or has an empty set.
    pub async fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        exemplars: BTreeMap<Domain, Vec<String>>,
        config: RouterConfig,
    ) -> Result<Self> {
        for domain in Domain::ALL {
            match exemplars.get(&domain) {
                Some(phrases) if !phrases.is_empty() => {}
                _ => {
                    return Err(Error::config(format!(
                        "domain {domain} has no exemplar intents"
                    )));
                }
            }
        }

        let mut embedded = BTreeMap::new();
        for (domain, phrases) in exemplars {
            let mut set = Vec::with_capacity(phrases.len());
            for phrase in phrases {
                let embedding = embedder.embed(&phrase).await?;
                set.push(Exemplar { phrase, embedding });
            }
            embedded.insert(domain, set);
        }

        Ok(Self {
            embedder,
            exemplars: embedded,
            config,
        })
    }

    /// Route a query to its best-matching domain.
    ///
    /// # Errors
    ///
    /// `InvalidQuery` when the query is empty or whitespace-only;
    /// embedding failures propagate as-is.
    pub async fn route(&self, query: &str) -> Result<RouterDecision> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_query("query is empty"));
        }

        let query_embedding = self.embedder.embed(trimmed).await?;

        let mut scores = Vec::with_capacity(self.exemplars.len());
        for (&domain, exemplars) in &self.exemplars {
            let score = self.domain_score(&query_embedding, exemplars);
            debug!(domain = %domain, score, "router domain score");
            scores.push((domain, score));
        }

        // Every domain within epsilon of the top score ties; the
        // BTreeMap iteration order makes the first qualifying entry the
        // lexicographically-smallest domain.
        let top = scores.iter().map(|&(_, s)| s).fold(f32::MIN, f32::max);
        let (domain, score) = scores
            .into_iter()
            .find(|&(_, s)| s >= top - self.config.epsilon)
            .ok_or_else(|| Error::config("router has no domains"))?;
        let decision = RouterDecision {
            domain,
            confidence: score.clamp(0.0, 1.0),
        };
        debug!(domain = %decision.domain, confidence = decision.confidence, "routed query");
        Ok(decision)
    }

    /// The exemplar phrases registered for a domain.
    pub fn exemplar_phrases(&self, domain: Domain) -> Vec<&str> {
        self.exemplars
            .get(&domain)
            .map(|set| set.iter().map(|e| e.phrase.as_str()).collect())
            .unwrap_or_default()
    }

    fn domain_score(&self, query: &[f32], exemplars: &[Exemplar]) -> f32 {
        let mut sims: Vec<f32> = exemplars
            .iter()
            .map(|e| cosine_similarity(query, &e.embedding))
            .collect();

        match self.config.strategy {
            ScoreStrategy::Max => sims.iter().copied().fold(f32::MIN, f32::max),
            ScoreStrategy::TopKMean(k) => {
                sims.sort_by(|a, b| b.total_cmp(a));
                let k = k.max(1).min(sims.len());
                sims[..k].iter().sum::<f32>() / k as f32
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use noesis_core::embedding::HashingEmbedder;

    fn exemplars() -> BTreeMap<Domain, Vec<String>> {
        let mut map = BTreeMap::new();
        map.insert(
            Domain::Science,
            vec![
                "how do atoms form chemical bonds".to_string(),
                "what drives evolution and natural selection".to_string(),
                "explain quantum mechanics and wave functions".to_string(),
            ],
        );
        map.insert(
            Domain::Technology,
            vec![
                "how do neural networks learn".to_string(),
                "deploying containers with kubernetes".to_string(),
                "what are vector databases used for".to_string(),
            ],
        );
        map.insert(
            Domain::Philosophy,
            vec![
                "what makes an action morally right".to_string(),
                "the nature of knowledge and empiricism".to_string(),
                "existentialism and the meaning of life".to_string(),
            ],
        );
        map
    }

    async fn test_router() -> IntentRouter {
        IntentRouter::new(
            Arc::new(HashingEmbedder::with_dimension(256)),
            exemplars(),
            RouterConfig::default(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_route_atoms_query_to_science() {
        let router = test_router().await;
        let decision = router.route("How do atoms bond together?").await.unwrap();
        assert_eq!(decision.domain, Domain::Science);
        assert!(decision.confidence > 0.0);
        assert!(decision.confidence <= 1.0);
    }

    #[tokio::test]
    async fn test_route_kubernetes_query_to_technology() {
        let router = test_router().await;
        let decision = router
            .route("rolling out kubernetes containers")
            .await
            .unwrap();
        assert_eq!(decision.domain, Domain::Technology);
    }

    #[tokio::test]
    async fn test_route_is_deterministic() {
        let router = test_router().await;
        let first = router.route("what is knowledge").await.unwrap();
        let second = router.route("what is knowledge").await.unwrap();
        assert_eq!(first.domain, second.domain);
        assert_eq!(first.confidence, second.confidence);
    }

    #[tokio::test]
    async fn test_route_rejects_empty_query() {
        let router = test_router().await;
        assert!(matches!(
            router.route("").await.unwrap_err(),
            Error::InvalidQuery(_)
        ));
        assert!(matches!(
            router.route("   ").await.unwrap_err(),
            Error::InvalidQuery(_)
        ));
    }

    #[tokio::test]
    async fn test_new_rejects_missing_exemplars() {
        let mut partial = exemplars();
        partial.remove(&Domain::Technology);

        let err = IntentRouter::new(
            Arc::new(HashingEmbedder::with_dimension(64)),
            partial,
            RouterConfig::default(),
        )
        .await
        .err()
        .unwrap();
        assert!(err.to_string().contains("technology"));
    }

    #[tokio::test]
    async fn test_new_rejects_empty_exemplar_set() {
        let mut map = exemplars();
        map.insert(Domain::Science, Vec::new());

        let err = IntentRouter::new(
            Arc::new(HashingEmbedder::with_dimension(64)),
            map,
            RouterConfig::default(),
        )
        .await
        .err()
        .unwrap();
        assert!(err.to_string().contains("science"));
    }

    /// Embedder that maps every text to the same vector, forcing a
    /// three-way tie between domains.
    struct ConstantEmbedder;

    #[async_trait]
    impl EmbeddingProvider for ConstantEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }

        fn dimension(&self) -> usize {
            2
        }

        fn name(&self) -> &str {
            "constant"
        }
    }

    #[tokio::test]
    async fn test_tie_breaks_to_lexicographically_first_domain() {
        let router = IntentRouter::new(
            Arc::new(ConstantEmbedder),
            exemplars(),
            RouterConfig::default(),
        )
        .await
        .unwrap();

        let decision = router.route("anything at all").await.unwrap();
        assert_eq!(decision.domain, Domain::Philosophy);
        assert_eq!(decision.confidence, 1.0);
    }

    /// Embedder with scripted similarities: the query maps to the x
    /// axis and each exemplar's cosine against it is its x component.
    struct ScriptedEmbedder;

    #[async_trait]
    impl EmbeddingProvider for ScriptedEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let x: f32 = match text {
                "which domain" => return Ok(vec![1.0, 0.0]),
                "ethics" => 0.50,
                "atoms" => 0.56,
                "networks" => 0.64,
                other => panic!("unexpected text: {other}"),
            };
            Ok(vec![x, (1.0 - x * x).sqrt()])
        }

        fn dimension(&self) -> usize {
            2
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    #[tokio::test]
    async fn test_chained_epsilon_ties_measure_from_top_score() {
        let mut map = BTreeMap::new();
        map.insert(Domain::Philosophy, vec!["ethics".to_string()]);
        map.insert(Domain::Science, vec!["atoms".to_string()]);
        map.insert(Domain::Technology, vec!["networks".to_string()]);

        let config = RouterConfig {
            epsilon: 0.1,
            strategy: ScoreStrategy::Max,
        };
        let router = IntentRouter::new(Arc::new(ScriptedEmbedder), map, config)
            .await
            .unwrap();

        // Scores: philosophy 0.50, science 0.56, technology 0.64.
        // Science is within epsilon of the top score while philosophy
        // is not, so the tie resolves to science even though the
        // philosophy-science gap is also below epsilon.
        let decision = router.route("which domain").await.unwrap();
        assert_eq!(decision.domain, Domain::Science);
        assert!((decision.confidence - 0.56).abs() < 1e-4);
    }

    #[tokio::test]
    async fn test_top_k_mean_strategy() {
        let config = RouterConfig {
            epsilon: 1e-6,
            strategy: ScoreStrategy::TopKMean(2),
        };
        let router = IntentRouter::new(
            Arc::new(HashingEmbedder::with_dimension(256)),
            exemplars(),
            config,
        )
        .await
        .unwrap();

        let decision = router.route("How do atoms bond together?").await.unwrap();
        assert_eq!(decision.domain, Domain::Science);
        assert!(decision.confidence >= 0.0 && decision.confidence <= 1.0);
    }

    #[tokio::test]
    async fn test_exemplar_phrases_accessor() {
        let router = test_router().await;
        let phrases = router.exemplar_phrases(Domain::Science);
        assert_eq!(phrases.len(), 3);
        assert!(phrases[0].contains("atoms"));
    }
}
