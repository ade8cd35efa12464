//! In-memory property graph store backed by petgraph.
//!
//! The reference [`GraphStore`] implementation. Nodes and directed,
//! typed, weighted edges are added at build time; lookups run over a
//! `StableDiGraph` plus an id index.
//!
//! Edges may reference node ids that are not (yet, or ever) present in
//! this store — cross-domain edges bridge into other domains' graphs by
//! id. Such endpoints are kept as phantom vertices: they anchor edges
//! but are invisible to `get_node` and `find_node_by_name`.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;

use noesis_core::error::Result;
use noesis_core::traits::GraphStore;
use noesis_core::types::{EdgeDirection, GraphEdge, GraphNode};

/// Edge payload stored in the petgraph graph.
#[derive(Debug, Clone)]
struct EdgeAttrs {
    relation: String,
    confidence: f32,
}

/// In-memory directed property graph.
pub struct MemoryGraphStore {
    graph: StableDiGraph<GraphNode, EdgeAttrs>,
    id_index: HashMap<String, NodeIndex>,
    phantoms: BTreeSet<String>,
}

impl MemoryGraphStore {
    /// Create an empty graph store.
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::new(),
            id_index: HashMap::new(),
            phantoms: BTreeSet::new(),
        }
    }

    /// Add a node. Adding a node whose id was previously only an edge
    /// endpoint upgrades the phantom vertex in place; re-adding an
    /// existing node replaces its labels and properties.
    pub fn add_node(&mut self, node: GraphNode) {
        let id = node.id.clone();
        match self.id_index.get(&id) {
            Some(&idx) => {
                self.graph[idx] = node;
                self.phantoms.remove(&id);
            }
            None => {
                let idx = self.graph.add_node(node);
                self.id_index.insert(id, idx);
            }
        }
    }

    /// Add a directed edge. Unknown endpoints become phantom vertices.
    pub fn add_edge(&mut self, edge: GraphEdge) {
        let from = self.ensure_vertex(&edge.from);
        let to = self.ensure_vertex(&edge.to);
        self.graph.add_edge(
            from,
            to,
            EdgeAttrs {
                relation: edge.relation,
                confidence: edge.confidence,
            },
        );
    }

    /// Number of real (non-phantom) nodes.
    pub fn node_count(&self) -> usize {
        self.id_index.len() - self.phantoms.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn ensure_vertex(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.id_index.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(GraphNode::new(id));
        self.id_index.insert(id.to_string(), idx);
        self.phantoms.insert(id.to_string());
        idx
    }

    fn is_real(&self, id: &str) -> bool {
        self.id_index.contains_key(id) && !self.phantoms.contains(id)
    }

    fn edges_at(&self, idx: NodeIndex, direction: EdgeDirection) -> Vec<GraphEdge> {
        let mut seen = BTreeSet::new();
        let mut edges = Vec::new();

        let directions: &[Direction] = match direction {
            EdgeDirection::In => &[Direction::Incoming],
            EdgeDirection::Out => &[Direction::Outgoing],
            EdgeDirection::Both => &[Direction::Outgoing, Direction::Incoming],
        };

        for &dir in directions {
            for edge in self.graph.edges_directed(idx, dir) {
                // A self-loop shows up in both directions; count it once.
                if !seen.insert(edge.id()) {
                    continue;
                }
                edges.push(GraphEdge {
                    from: self.graph[edge.source()].id.clone(),
                    to: self.graph[edge.target()].id.clone(),
                    relation: edge.weight().relation.clone(),
                    confidence: edge.weight().confidence,
                });
            }
        }

        edges.sort_by(|a, b| {
            a.relation
                .cmp(&b.relation)
                .then_with(|| a.to.cmp(&b.to))
                .then_with(|| a.from.cmp(&b.from))
        });
        edges
    }
}

impl Default for MemoryGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GraphStore for MemoryGraphStore {
    async fn get_node(&self, id: &str) -> Result<Option<GraphNode>> {
        if !self.is_real(id) {
            return Ok(None);
        }
        Ok(self.id_index.get(id).map(|&idx| self.graph[idx].clone()))
    }

    async fn get_edges(
        &self,
        node_id: &str,
        direction: EdgeDirection,
    ) -> Result<Vec<GraphEdge>> {
        match self.id_index.get(node_id) {
            Some(&idx) => Ok(self.edges_at(idx, direction)),
            None => Ok(Vec::new()),
        }
    }

    async fn find_node_by_name(&self, name: &str) -> Result<Option<GraphNode>> {
        let wanted = name.to_lowercase();
        let mut best: Option<&GraphNode> = None;

        for &idx in self.id_index.values() {
            let node = &self.graph[idx];
            if self.phantoms.contains(&node.id) {
                continue;
            }
            let matches = node
                .name()
                .is_some_and(|n| n.to_lowercase() == wanted)
                || node.id.to_lowercase() == wanted;
            if matches {
                // Deterministic pick when several nodes share a name.
                match best {
                    Some(b) if b.id <= node.id => {}
                    _ => best = Some(node),
                }
            }
        }

        Ok(best.cloned())
    }
}
