//! Breadth-first connection discovery across domain graphs.
//!
//! The finder treats the per-domain property graphs as one federated
//! graph: a node id that exists in more than one domain is the same
//! concept, so a traversal can cross from one domain's graph into
//! another's through it. BFS guarantees the returned path has the
//! fewest hops; deterministic edge and domain ordering guarantees the
//! same path every time.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, warn};

use noesis_core::error::{Error, Result};
use noesis_core::registry::DomainRegistry;
use noesis_core::types::{ConnectionPath, Domain, EdgeDirection, PathRelation, PathStep};

/// Default traversal bound, in hops.
pub const DEFAULT_MAX_HOPS: usize = 6;

/// A node's location in the federated graph.
type Locus = (Domain, String);

/// Finds shortest relationship paths between two concepts.
pub struct ConnectionFinder {
    registry: Arc<DomainRegistry>,
    max_hops: usize,
}

impl ConnectionFinder {
    /// Create a finder with the default hop bound.
    pub fn new(registry: Arc<DomainRegistry>) -> Self {
        Self {
            registry,
            max_hops: DEFAULT_MAX_HOPS,
        }
    }

    /// Set the traversal bound; clamped to at least 1 hop.
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops.max(1);
        self
    }

    /// Find the shortest path between two concepts.
    ///
    /// Concepts are resolved first as exact node ids, then by name
    /// lookup, across domains in lexicographic order. An exhausted
    /// search returns an empty [`ConnectionPath`], not an error.
    ///
    /// # Errors
    ///
    /// - `InvalidQuery` when either concept is blank
    /// - `UnknownConcept` when either concept resolves in no domain
    pub async fn find(&self, from: &str, to: &str) -> Result<ConnectionPath> {
        let start = self.resolve(from).await?;
        let goal = self.resolve(to).await?;
        debug!(
            from = %start.1, from_domain = %start.0,
            to = %goal.1, to_domain = %goal.0,
            "finding connection"
        );

        // Same concept: a zero-hop path, not an empty one.
        if start.1 == goal.1 {
            return Ok(ConnectionPath {
                steps: vec![PathStep {
                    node_id: start.1,
                    domain: start.0,
                    relation_to_next: None,
                }],
            });
        }

        let mut visited: HashSet<Locus> = HashSet::from([start.clone()]);
        let mut parents: HashMap<Locus, (Locus, PathRelation)> = HashMap::new();
        let mut frontier = vec![start];

        for _ in 0..self.max_hops {
            let mut next = Vec::new();
            for locus in frontier {
                let (home, ref id) = locus;
                // A shared id is one concept: collect its edges from
                // every domain graph that anchors any, home first.
                for domain in self.domain_order(home) {
                    let mut edges = match self
                        .registry
                        .get(domain)?
                        .graph
                        .get_edges(id, EdgeDirection::Both)
                        .await
                    {
                        Ok(edges) => edges,
                        Err(err) => {
                            warn!(domain = %domain, id = %id, error = %err, "edge expansion failed");
                            continue;
                        }
                    };
                    // Deterministic expansion order regardless of store.
                    edges.sort_by(|a, b| a.relation.cmp(&b.relation).then_with(|| a.to.cmp(&b.to)));

                    for edge in edges {
                        let outgoing = edge.from == *id;
                        let neighbor_id = if outgoing { edge.to } else { edge.from };
                        if neighbor_id == *id {
                            continue;
                        }
                        let Some(neighbor) = self.locate(domain, &neighbor_id).await else {
                            continue;
                        };
                        if !visited.insert(neighbor.clone()) {
                            continue;
                        }
                        parents.insert(
                            neighbor.clone(),
                            (
                                locus.clone(),
                                PathRelation {
                                    relation: edge.relation.clone(),
                                    outgoing,
                                },
                            ),
                        );
                        if neighbor.1 == goal.1 {
                            return Ok(reconstruct(neighbor, &parents));
                        }
                        next.push(neighbor);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        Ok(ConnectionPath::empty())
    }

    /// Resolve a concept to its home domain and node id: exact id
    /// match first, then name lookup, each scanning domains in
    /// lexicographic order.
    async fn resolve(&self, concept: &str) -> Result<Locus> {
        let trimmed = concept.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_query("concept is empty"));
        }

        for domain in self.registry.domains() {
            match self.registry.get(domain)?.graph.get_node(trimmed).await {
                Ok(Some(node)) => return Ok((domain, node.id)),
                Ok(None) => {}
                Err(err) => warn!(domain = %domain, error = %err, "node lookup failed"),
            }
        }

        for domain in self.registry.domains() {
            match self
                .registry
                .get(domain)?
                .graph
                .find_node_by_name(trimmed)
                .await
            {
                Ok(Some(node)) => return Ok((domain, node.id)),
                Ok(None) => {}
                Err(err) => warn!(domain = %domain, error = %err, "name lookup failed"),
            }
        }

        Err(Error::unknown_concept(trimmed))
    }

    /// Domains with `home` first, then the rest in lexicographic
    /// order.
    fn domain_order(&self, home: Domain) -> Vec<Domain> {
        let mut order = vec![home];
        order.extend(self.registry.domains().into_iter().filter(|d| *d != home));
        order
    }

    /// Locate the domain a neighbor id lives in: the edge's home
    /// domain first, then the others in lexicographic order. An id
    /// with no real node anywhere is not traversable.
    async fn locate(&self, home: Domain, id: &str) -> Option<Locus> {
        for domain in self.domain_order(home) {
            let Ok(stores) = self.registry.get(domain) else {
                continue;
            };
            match stores.graph.get_node(id).await {
                Ok(Some(node)) => return Some((domain, node.id)),
                Ok(None) => {}
                Err(err) => warn!(domain = %domain, id, error = %err, "node lookup failed"),
            }
        }
        None
    }
}

/// Rebuild the path from the parent links, start to goal.
fn reconstruct(goal: Locus, parents: &HashMap<Locus, (Locus, PathRelation)>) -> ConnectionPath {
    let mut steps = vec![PathStep {
        node_id: goal.1.clone(),
        domain: goal.0,
        relation_to_next: None,
    }];

    let mut current = goal;
    while let Some((parent, relation)) = parents.get(&current) {
        steps.push(PathStep {
            node_id: parent.1.clone(),
            domain: parent.0,
            relation_to_next: Some(relation.clone()),
        });
        current = parent.clone();
    }

    steps.reverse();
    ConnectionPath { steps }
}
