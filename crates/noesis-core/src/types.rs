//! Shared data types for the Noesis orchestration layer.
//!
//! These are the transient, per-query values that cross component
//! boundaries: routing decisions, search hits, enriched query results,
//! and connection paths. All types derive `Serialize`/`Deserialize` for
//! JSON transport.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

// ============================================================================
// Domain
// ============================================================================

/// A closed knowledge category with its own vector and graph store.
///
/// The set of domains is fixed at compile time; adding one means adding a
/// variant here and registering its stores in the
/// [`DomainRegistry`](crate::registry::DomainRegistry). Ordering is the
/// lexicographic order of the identifier strings, which every component
/// relies on for deterministic iteration and tie-breaking.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Ethics, epistemology, metaphysics.
    Philosophy,
    /// Natural sciences: physics, chemistry, biology.
    Science,
    /// Software, infrastructure, and engineering.
    Technology,
}

impl Domain {
    /// Every domain, sorted by identifier.
    pub const ALL: [Domain; 3] = [Domain::Philosophy, Domain::Science, Domain::Technology];

    /// The canonical string identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Philosophy => "philosophy",
            Domain::Science => "science",
            Domain::Technology => "technology",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "philosophy" => Ok(Domain::Philosophy),
            "science" => Ok(Domain::Science),
            "technology" => Ok(Domain::Technology),
            other => Err(Error::config(format!("unknown domain: {other}"))),
        }
    }
}

// ============================================================================
// Vector store records and matches
// ============================================================================

/// A record stored in a domain's vector store.
///
/// Created at ingestion time and never mutated. `id` is unique within
/// its domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Unique identifier within the owning domain.
    pub id: String,

    /// Fixed-length embedding vector.
    pub vector: Vec<f32>,

    /// Arbitrary metadata key-value pairs.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl VectorRecord {
    /// Create a new record with empty metadata.
    pub fn new(id: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            vector,
            metadata: HashMap::new(),
        }
    }

    /// Add a metadata key-value pair.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A raw nearest-neighbor match as returned by a [`VectorStore`].
///
/// Stores speak distances; conversion to a comparable similarity score
/// happens at the store boundary when the match becomes a [`SearchHit`].
///
/// [`VectorStore`]: crate::traits::VectorStore
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorMatch {
    /// Record identifier.
    pub id: String,

    /// Distance from the query vector (0.0 = exact match).
    pub distance: f32,

    /// Metadata snapshot from the stored record.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

// ============================================================================
// Search hits and fused results
// ============================================================================

/// A single similarity hit, comparable across domains.
///
/// `score` is a similarity in [0, 1] where 1.0 is an exact match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// The domain whose store produced this hit.
    pub domain: Domain,

    /// Record identifier within that domain.
    pub id: String,

    /// Similarity score in [0, 1], higher is better.
    pub score: f32,

    /// Metadata snapshot.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl SearchHit {
    /// Convert a raw store match into a hit, translating distance to
    /// similarity at the store boundary (`score = 1 − distance`, clamped).
    pub fn from_match(domain: Domain, m: VectorMatch) -> Self {
        Self {
            domain,
            id: m.id,
            score: (1.0 - m.distance).clamp(0.0, 1.0),
            metadata: m.metadata,
        }
    }
}

/// Marker noting that a domain contributed no hits because its store
/// failed or timed out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainWarning {
    /// The failed domain.
    pub domain: Domain,

    /// Human-readable failure description.
    pub message: String,
}

// ============================================================================
// Routing
// ============================================================================

/// The router's confidence-ranked domain decision for one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterDecision {
    /// The winning domain.
    pub domain: Domain,

    /// Confidence in [0, 1].
    pub confidence: f32,
}

// ============================================================================
// Query results
// ============================================================================

/// A graph relationship attached to a search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConnection {
    /// Source node id.
    pub from: String,

    /// Relationship type.
    pub relation: String,

    /// Target node id.
    pub to: String,
}

/// The unit returned to a caller: one domain's matches plus the graph
/// relationships discovered around them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    /// The domain these matches came from.
    pub domain: Domain,

    /// Matches ordered by score, descending.
    pub matches: Vec<SearchHit>,

    /// Graph relationships incident to the matches.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub graph_connections: Vec<GraphConnection>,
}

/// A full search response: enriched per-domain results plus any
/// failed-domain markers collected during fan-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    /// Per-domain enriched results.
    pub results: Vec<QueryResult>,

    /// Domains that failed and contributed no hits.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<DomainWarning>,
}

// ============================================================================
// Graph nodes and edges
// ============================================================================

/// A typed node in a domain's property graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    /// Node identifier, unique within the owning domain.
    pub id: String,

    /// Node labels (e.g. "Concept", "Scientist").
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub labels: BTreeSet<String>,

    /// Property key-value pairs.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, String>,
}

impl GraphNode {
    /// Create a node with no labels or properties.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            labels: BTreeSet::new(),
            properties: HashMap::new(),
        }
    }

    /// Add a label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.insert(label.into());
        self
    }

    /// Add a property key-value pair.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// The `name` property, if present.
    pub fn name(&self) -> Option<&str> {
        self.properties.get("name").map(String::as_str)
    }
}

/// A directed, typed, weighted edge between two nodes.
///
/// Multiple edges between the same pair with different relation types
/// are permitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Source node id.
    pub from: String,

    /// Target node id.
    pub to: String,

    /// Relationship type (e.g. "PIONEERED").
    pub relation: String,

    /// Confidence in [0, 1].
    pub confidence: f32,
}

impl GraphEdge {
    /// Create an edge with full confidence.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        relation: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            relation: relation.into(),
            confidence: 1.0,
        }
    }

    /// Set the confidence.
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }
}

/// Which incident edges to fetch for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeDirection {
    /// Edges pointing into the node.
    In,
    /// Edges leaving the node.
    Out,
    /// Both directions.
    Both,
}

// ============================================================================
// Connection paths
// ============================================================================

/// The relation label between consecutive path nodes, with the original
/// edge direction preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRelation {
    /// Relationship type.
    pub relation: String,

    /// True if the edge points from this step's node to the next node;
    /// false if it was walked against its direction.
    pub outgoing: bool,
}

/// One node on a connection path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    /// Node identifier.
    pub node_id: String,

    /// Domain owning the node.
    pub domain: Domain,

    /// Relation to the next step; `None` for the last node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation_to_next: Option<PathRelation>,
}

/// A bounded-length path through the union of domain graphs.
///
/// An empty step list denotes "no path found", which is a normal
/// outcome, not an error. A single step with no relation is the
/// zero-hop path from a concept to itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionPath {
    /// Path nodes in order, each carrying the relation to its successor.
    pub steps: Vec<PathStep>,
}

impl ConnectionPath {
    /// The empty "no path found" value.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether a path was found.
    pub fn found(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Number of edge traversals in the path.
    pub fn hops(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

impl fmt::Display for ConnectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str("(no path)");
        }
        for step in &self.steps {
            write!(f, "[{}]", step.node_id)?;
            if let Some(rel) = &step.relation_to_next {
                if rel.outgoing {
                    write!(f, " -{}-> ", rel.relation)?;
                } else {
                    write!(f, " <-{}- ", rel.relation)?;
                }
            }
        }
        Ok(())
    }
}
