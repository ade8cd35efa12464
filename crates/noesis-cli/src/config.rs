//! Configuration for the Noesis CLI.
//!
//! Loads from TOML files, environment variables, and defaults using the
//! `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `NOESIS_CONFIG` environment variable
//! 3. XDG default: `~/.config/noesis/config.toml`
//! 4. Built-in defaults

use std::path::PathBuf;

use confyg::{Confygery, env};
use serde::{Deserialize, Serialize};

use noesis_core::error::{Error, Result};

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the Noesis CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NoesisConfig {
    /// Project name, used for env var prefixes and default paths.
    pub project_name: String,

    /// Router tuning.
    pub router: RouterSection,

    /// Search defaults.
    pub search: SearchSection,

    /// Graph traversal defaults.
    pub graph: GraphSection,

    /// Embedding configuration.
    pub embedding: EmbeddingSection,
}

/// Router tuning section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterSection {
    /// Scores within this distance of the top score count as ties.
    pub epsilon: f32,
}

/// Search defaults section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    /// Default results per domain.
    pub limit: usize,

    /// Default per-domain deadline in milliseconds, if any.
    pub timeout_ms: Option<u64>,
}

/// Graph traversal section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphSection {
    /// Connection-finder traversal bound in hops.
    pub max_hops: usize,

    /// Graph enrichment depth in hops.
    pub enhancement_depth: usize,
}

/// Embedding section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSection {
    /// Embedding vector dimension.
    pub dimension: usize,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for NoesisConfig {
    fn default() -> Self {
        Self {
            project_name: "noesis".to_string(),
            router: RouterSection::default(),
            search: SearchSection::default(),
            graph: GraphSection::default(),
            embedding: EmbeddingSection::default(),
        }
    }
}

impl Default for RouterSection {
    fn default() -> Self {
        Self { epsilon: 1e-6 }
    }
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            limit: 5,
            timeout_ms: None,
        }
    }
}

impl Default for GraphSection {
    fn default() -> Self {
        Self {
            max_hops: 6,
            enhancement_depth: 1,
        }
    }
}

impl Default for EmbeddingSection {
    fn default() -> Self {
        Self { dimension: 384 }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl NoesisConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("NOESIS");
        env_opts.add_section("router");
        env_opts.add_section("search");
        env_opts.add_section("graph");
        env_opts.add_section("embedding");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("NOESIS_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("noesis").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// RAII guard for env var manipulation in tests.
    ///
    /// SAFETY: these tests run single-threaded with respect to the
    /// variables they touch; no other thread reads them concurrently.
    struct EnvGuard {
        key: String,
        prev: Option<String>,
    }

    impl EnvGuard {
        fn new(key: &str, value: &str) -> Self {
            let prev = std::env::var(key).ok();
            unsafe { std::env::set_var(key, value) };
            Self {
                key: key.to_string(),
                prev,
            }
        }

        fn remove(key: &str) -> Self {
            let prev = std::env::var(key).ok();
            unsafe { std::env::remove_var(key) };
            Self {
                key: key.to_string(),
                prev,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(ref val) = self.prev {
                unsafe { std::env::set_var(&self.key, val) };
            } else {
                unsafe { std::env::remove_var(&self.key) };
            }
        }
    }

    #[test]
    fn test_noesis_config_default() {
        let config = NoesisConfig::default();
        assert_eq!(config.project_name, "noesis");
        assert_eq!(config.router.epsilon, 1e-6);
        assert_eq!(config.search.limit, 5);
        assert!(config.search.timeout_ms.is_none());
        assert_eq!(config.graph.max_hops, 6);
        assert_eq!(config.graph.enhancement_depth, 1);
        assert_eq!(config.embedding.dimension, 384);
    }

    #[test]
    fn test_noesis_config_from_toml() {
        let toml_str = r#"
            project_name = "my-noesis"

            [search]
            limit = 10
            timeout_ms = 250

            [graph]
            max_hops = 4
        "#;

        let config: NoesisConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.project_name, "my-noesis");
        assert_eq!(config.search.limit, 10);
        assert_eq!(config.search.timeout_ms, Some(250));
        assert_eq!(config.graph.max_hops, 4);
        // Unspecified sections keep defaults.
        assert_eq!(config.embedding.dimension, 384);
    }

    #[test]
    fn test_noesis_config_to_toml() {
        let config = NoesisConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("project_name = \"noesis\""));
        assert!(toml_str.contains("[search]"));

        let parsed: NoesisConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.search.limit, config.search.limit);
    }

    #[test]
    fn test_noesis_config_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                project_name = "loaded"
                [search]
                limit = 7
            "#,
        )
        .unwrap();

        let config = NoesisConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.project_name, "loaded");
        assert_eq!(config.search.limit, 7);
    }

    #[test]
    fn test_noesis_config_load_defaults() {
        let config = NoesisConfig::load(Some("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.project_name, "noesis");
        assert_eq!(config.search.limit, 5);
    }

    #[test]
    fn test_resolve_config_path_explicit() {
        let path = NoesisConfig::resolve_config_path(Some("/explicit/config.toml"));
        assert_eq!(path, Some(PathBuf::from("/explicit/config.toml")));
    }

    #[test]
    fn test_resolve_config_path_env() {
        let _guard = EnvGuard::new("NOESIS_CONFIG", "/env/config.toml");
        let path = NoesisConfig::resolve_config_path(None);
        assert_eq!(path, Some(PathBuf::from("/env/config.toml")));
    }

    #[test]
    fn test_resolve_config_path_default() {
        let _guard = EnvGuard::remove("NOESIS_CONFIG");
        let path = NoesisConfig::resolve_config_path(None);
        assert!(path.is_some());
        let p = path.unwrap();
        assert!(p.to_str().unwrap().contains("noesis"));
        assert!(p.to_str().unwrap().ends_with("config.toml"));
    }
}
