//! Error types for Noesis operations.
//!
//! This module provides the common [`Error`] type and [`Result<T>`] alias
//! used across all Noesis crates. Uses `thiserror` for derive macros.
//!
//! The taxonomy follows the orchestration failure policy: invalid input is
//! rejected before any I/O, a single unavailable domain degrades result
//! completeness, and only total failure or an unresolvable concept reaches
//! the caller as an error. No failure is fatal to the process.

use crate::types::Domain;
use thiserror::Error;

/// Errors that can occur in Noesis operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The query was empty or malformed. Rejected before any store I/O.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// One backing store failed or timed out. Tolerated during fan-out;
    /// surfaced only as a warning marker on the result set.
    #[error("Domain {domain} unavailable: {message}")]
    DomainUnavailable {
        /// The domain whose store failed.
        domain: Domain,
        /// What went wrong.
        message: String,
    },

    /// Every target domain failed. The query as a whole cannot succeed.
    #[error("All target domains are unavailable")]
    AllDomainsUnavailable,

    /// A connection-finding endpoint resolved to no node in any domain.
    #[error("Unknown concept: {0}")]
    UnknownConcept(String),

    /// Configuration error (unregistered domain, empty exemplar set, ...).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A store-level failure (dimension mismatch, backend fault, ...).
    #[error("Store error: {0}")]
    Store(String),
}

impl Error {
    /// Create an invalid query error.
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    /// Create a domain unavailable error.
    pub fn domain_unavailable(domain: Domain, msg: impl Into<String>) -> Self {
        Self::DomainUnavailable {
            domain,
            message: msg.into(),
        }
    }

    /// Create an unknown concept error.
    pub fn unknown_concept(concept: impl Into<String>) -> Self {
        Self::UnknownConcept(concept.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a store error.
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}

/// Result type alias using Noesis's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_query("empty query");
        assert_eq!(err.to_string(), "Invalid query: empty query");

        let err = Error::unknown_concept("Phlogiston");
        assert_eq!(err.to_string(), "Unknown concept: Phlogiston");

        let err = Error::AllDomainsUnavailable;
        assert!(err.to_string().contains("unavailable"));
    }

    #[test]
    fn test_domain_unavailable_display() {
        let err = Error::domain_unavailable(Domain::Science, "timed out");
        assert_eq!(err.to_string(), "Domain science unavailable: timed out");
    }

    #[test]
    fn test_helper_constructors() {
        assert!(matches!(Error::config("x"), Error::Config(_)));
        assert!(matches!(Error::store("x"), Error::Store(_)));
        assert!(matches!(
            Error::invalid_query("x"),
            Error::InvalidQuery(_)
        ));
    }
}
