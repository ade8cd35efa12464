//! Graph enrichment of vector search hits.
//!
//! After fusion, each hit is looked up in its domain's property graph
//! and annotated with the relationships found around it. Enrichment is
//! strictly additive: a hit whose node is absent, or whose graph store
//! errors, keeps its vector result and simply carries no connections.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use noesis_core::error::Result;
use noesis_core::registry::DomainRegistry;
use noesis_core::traits::GraphStore;
use noesis_core::types::{Domain, EdgeDirection, GraphConnection, QueryResult, SearchHit};

/// Attaches graph relationships to search hits, grouped per domain.
pub struct GraphEnhancer {
    registry: Arc<DomainRegistry>,
    depth: usize,
}

impl GraphEnhancer {
    /// Create an enhancer that collects direct (one-hop) relationships.
    pub fn new(registry: Arc<DomainRegistry>) -> Self {
        Self { registry, depth: 1 }
    }

    /// Set the neighborhood depth in hops; clamped to at least 1.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth.max(1);
        self
    }

    /// Enrich hits with their graph neighborhoods.
    ///
    /// Returns one [`QueryResult`] per domain, in the order domains
    /// first appear in `hits`. Graph lookups never fail the call.
    pub async fn enhance(&self, hits: &[SearchHit]) -> Result<Vec<QueryResult>> {
        // Group by domain, preserving first-appearance order so the
        // grouping mirrors the fused ranking.
        let mut order: Vec<Domain> = Vec::new();
        let mut groups: HashMap<Domain, Vec<SearchHit>> = HashMap::new();
        for hit in hits {
            if !groups.contains_key(&hit.domain) {
                order.push(hit.domain);
            }
            groups.entry(hit.domain).or_default().push(hit.clone());
        }

        let mut results = Vec::with_capacity(order.len());
        for domain in order {
            let matches = groups.remove(&domain).unwrap_or_default();
            let graph = match self.registry.get(domain) {
                Ok(stores) => Arc::clone(&stores.graph),
                Err(err) => {
                    warn!(domain = %domain, error = %err, "no graph store for domain");
                    results.push(QueryResult {
                        domain,
                        matches,
                        graph_connections: Vec::new(),
                    });
                    continue;
                }
            };

            let lookups = matches
                .iter()
                .map(|hit| self.connections_for(graph.as_ref(), domain, &hit.id));
            let fetched = join_all(lookups).await;

            let mut connections: Vec<GraphConnection> = fetched.into_iter().flatten().collect();
            connections.sort_by(|a, b| {
                a.from
                    .cmp(&b.from)
                    .then_with(|| a.relation.cmp(&b.relation))
                    .then_with(|| a.to.cmp(&b.to))
            });
            connections.dedup();
            debug!(
                domain = %domain,
                hits = matches.len(),
                connections = connections.len(),
                "enhanced domain hits"
            );

            results.push(QueryResult {
                domain,
                matches,
                graph_connections: connections,
            });
        }

        Ok(results)
    }

    /// Collect the depth-bounded edge neighborhood of one hit. Lookup
    /// failures are logged and treated as an empty neighborhood.
    async fn connections_for(
        &self,
        graph: &dyn GraphStore,
        domain: Domain,
        id: &str,
    ) -> Vec<GraphConnection> {
        match graph.get_node(id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(domain = %domain, id, error = %err, "graph node lookup failed");
                return Vec::new();
            }
        }

        let mut connections = Vec::new();
        let mut visited: HashSet<String> = HashSet::from([id.to_string()]);
        let mut frontier = vec![id.to_string()];

        for _ in 0..self.depth {
            let mut next = Vec::new();
            for node_id in &frontier {
                let edges = match graph.get_edges(node_id, EdgeDirection::Both).await {
                    Ok(edges) => edges,
                    Err(err) => {
                        warn!(domain = %domain, id = %node_id, error = %err, "edge lookup failed");
                        continue;
                    }
                };
                for edge in edges {
                    connections.push(GraphConnection {
                        from: edge.from.clone(),
                        relation: edge.relation.clone(),
                        to: edge.to.clone(),
                    });
                    for endpoint in [edge.from, edge.to] {
                        if visited.insert(endpoint.clone()) {
                            next.push(endpoint);
                        }
                    }
                }
            }
            frontier = next;
            if frontier.is_empty() {
                break;
            }
        }

        connections
    }
}
