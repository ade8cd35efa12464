//! The validated domain-to-store mapping.
//!
//! Every domain's vector and graph store handle is injected at
//! construction time and validated once: a missing registration is a
//! configuration error at startup, never a runtime crash mid-query.
//! The registry is immutable after `build()` and cheap to share.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::traits::{GraphStore, VectorStore};
use crate::types::Domain;

/// The store pair owned by one domain.
#[derive(Clone)]
pub struct DomainStores {
    /// Nearest-neighbor store.
    pub vector: Arc<dyn VectorStore>,

    /// Property graph store.
    pub graph: Arc<dyn GraphStore>,
}

/// Closed, validated mapping from [`Domain`] to its stores.
///
/// Iteration order is always lexicographic by domain identifier, which
/// fan-out, routing tie-breaks, and BFS bridging all rely on.
pub struct DomainRegistry {
    stores: BTreeMap<Domain, DomainStores>,
}

impl DomainRegistry {
    /// Start building a registry.
    pub fn builder() -> DomainRegistryBuilder {
        DomainRegistryBuilder::default()
    }

    /// The stores for a domain.
    ///
    /// Validation at build time guarantees presence, but call sites get
    /// a `Result` so a future partial registry cannot panic.
    pub fn get(&self, domain: Domain) -> Result<&DomainStores> {
        self.stores
            .get(&domain)
            .ok_or_else(|| Error::config(format!("domain not registered: {domain}")))
    }

    /// All registered domains in sorted order.
    pub fn domains(&self) -> impl Iterator<Item = Domain> + '_ {
        self.stores.keys().copied()
    }

    /// Number of registered domains.
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Whether no domain is registered.
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

/// Builder collecting per-domain store registrations.
#[derive(Default)]
pub struct DomainRegistryBuilder {
    stores: BTreeMap<Domain, DomainStores>,
}

impl DomainRegistryBuilder {
    /// Register the store pair for a domain. Re-registering replaces
    /// the previous pair.
    pub fn register(
        mut self,
        domain: Domain,
        vector: Arc<dyn VectorStore>,
        graph: Arc<dyn GraphStore>,
    ) -> Self {
        self.stores.insert(domain, DomainStores { vector, graph });
        self
    }

    /// Validate and build the registry.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error naming every domain in
    /// [`Domain::ALL`] that has no registered stores.
    pub fn build(self) -> Result<DomainRegistry> {
        let missing: Vec<&str> = Domain::ALL
            .iter()
            .filter(|d| !self.stores.contains_key(d))
            .map(Domain::as_str)
            .collect();

        if !missing.is_empty() {
            return Err(Error::config(format!(
                "unregistered domains: {}",
                missing.join(", ")
            )));
        }

        Ok(DomainRegistry {
            stores: self.stores,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EdgeDirection, GraphEdge, GraphNode, VectorMatch};
    use async_trait::async_trait;

    struct NullVectorStore;

    #[async_trait]
    impl VectorStore for NullVectorStore {
        async fn search(&self, _vector: &[f32], _k: usize) -> Result<Vec<VectorMatch>> {
            Ok(Vec::new())
        }
    }

    struct NullGraphStore;

    #[async_trait]
    impl GraphStore for NullGraphStore {
        async fn get_node(&self, _id: &str) -> Result<Option<GraphNode>> {
            Ok(None)
        }

        async fn get_edges(
            &self,
            _node_id: &str,
            _direction: EdgeDirection,
        ) -> Result<Vec<GraphEdge>> {
            Ok(Vec::new())
        }

        async fn find_node_by_name(&self, _name: &str) -> Result<Option<GraphNode>> {
            Ok(None)
        }
    }

    fn full_builder() -> DomainRegistryBuilder {
        let mut builder = DomainRegistry::builder();
        for domain in Domain::ALL {
            builder = builder.register(domain, Arc::new(NullVectorStore), Arc::new(NullGraphStore));
        }
        builder
    }

    #[test]
    fn test_build_with_all_domains() {
        let registry = full_builder().build().unwrap();
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
        assert!(registry.get(Domain::Science).is_ok());
    }

    #[test]
    fn test_build_fails_on_missing_domain() {
        let builder = DomainRegistry::builder().register(
            Domain::Science,
            Arc::new(NullVectorStore),
            Arc::new(NullGraphStore),
        );

        let err = builder.build().err().unwrap();
        let msg = err.to_string();
        assert!(msg.contains("philosophy"));
        assert!(msg.contains("technology"));
        assert!(!msg.contains("science,"));
    }

    #[test]
    fn test_domains_iterate_sorted() {
        let registry = full_builder().build().unwrap();
        let domains: Vec<Domain> = registry.domains().collect();
        assert_eq!(domains, Domain::ALL.to_vec());
    }
}
