//! The Noesis CLI application.
//!
//! Loads configuration, seeds the demo stores, assembles the
//! orchestrator, and dispatches commands.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use noesis::{
    ConnectionPath, HashingEmbedder, KnowledgeOrchestrator, Result, RouterConfig, RouterDecision,
    SearchOptions, SearchReport, Truncation,
};
use noesis::orchestrator::RoutedSearch;

use crate::cli::{CliArgs, Command};
use crate::config::NoesisConfig;
use crate::seed;

/// The CLI application.
pub struct NoesisApp {
    config: NoesisConfig,
    version: String,
}

impl NoesisApp {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let config = NoesisConfig::load(args.config.as_deref())?;
        Ok(Self {
            config,
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on
    /// verbosity flags.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // Ignore error if a subscriber is already set (e.g. in tests).
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        let command = match args.command {
            Some(command) => command,
            None => {
                println!("noesis {} — use --help for usage", self.version);
                return Ok(());
            }
        };

        if let Command::Version = command {
            println!("noesis {}", self.version);
            return Ok(());
        }

        let max_hops = match &command {
            Command::Connect {
                max_hops: Some(hops),
                ..
            } => *hops,
            _ => self.config.graph.max_hops,
        };
        let orchestrator = self.orchestrator_with_max_hops(max_hops).await?;
        match command {
            Command::Route { query } => {
                let decision = orchestrator.route(&query).await?;
                self.emit(args.json, &decision, render_decision)?;
            }
            Command::Search {
                query,
                limit,
                timeout_ms,
            } => {
                let options = self.options(limit, timeout_ms, false);
                let routed = orchestrator.search(&query, Some(options)).await?;
                self.emit(args.json, &routed, render_routed_search)?;
            }
            Command::Multi {
                query,
                limit,
                overall,
                timeout_ms,
            } => {
                let options = self.options(limit, timeout_ms, overall);
                let report = orchestrator.multi_domain_search(&query, Some(options)).await?;
                self.emit(args.json, &report, render_report)?;
            }
            Command::Connect { from, to, .. } => {
                let path = orchestrator.find_connections(&from, &to).await?;
                self.emit(args.json, &path, render_path)?;
            }
            Command::Version => unreachable!("handled above"),
        }
        Ok(())
    }

    fn options(&self, limit: usize, timeout_ms: Option<u64>, overall: bool) -> SearchOptions {
        let mut options = SearchOptions::new(limit);
        if overall {
            options = options.with_truncation(Truncation::Overall);
        }
        let timeout = timeout_ms.or(self.config.search.timeout_ms);
        if let Some(ms) = timeout {
            options = options.with_timeout(Duration::from_millis(ms));
        }
        options
    }

    async fn orchestrator_with_max_hops(&self, max_hops: usize) -> Result<KnowledgeOrchestrator> {
        let embedder = Arc::new(HashingEmbedder::with_dimension(
            self.config.embedding.dimension,
        ));
        let registry = seed::demo_registry(&embedder).await?;

        let mut builder = KnowledgeOrchestrator::builder()
            .registry(registry)
            .embedder(embedder)
            .router_config(RouterConfig {
                epsilon: self.config.router.epsilon,
                ..Default::default()
            })
            .search_options(SearchOptions::new(self.config.search.limit))
            .enhancement_depth(self.config.graph.enhancement_depth)
            .max_hops(max_hops);
        for (domain, phrases) in seed::demo_exemplars() {
            builder = builder.exemplars(domain, phrases);
        }
        builder.build().await
    }

    fn emit<T, F>(&self, json: bool, value: &T, render: F) -> Result<()>
    where
        T: serde::Serialize,
        F: Fn(&T),
    {
        if json {
            println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
        } else {
            render(value);
        }
        Ok(())
    }
}

// ============================================================================
// Human-readable rendering
// ============================================================================

fn render_decision(decision: &RouterDecision) {
    println!(
        "{} (confidence {:.2})",
        decision.domain, decision.confidence
    );
}

fn render_routed_search(routed: &RoutedSearch) {
    render_decision(&routed.decision);
    render_report(&routed.report);
}

fn render_report(report: &SearchReport) {
    for result in &report.results {
        println!("\n[{}]", result.domain);
        for hit in &result.matches {
            let name = hit.metadata.get("name").map_or(hit.id.as_str(), String::as_str);
            println!("  {:.3}  {} ({})", hit.score, name, hit.id);
        }
        for connection in &result.graph_connections {
            println!(
                "    {} -{}-> {}",
                connection.from, connection.relation, connection.to
            );
        }
    }
    for warning in &report.warnings {
        eprintln!("warning: {} unavailable: {}", warning.domain, warning.message);
    }
}

fn render_path(path: &ConnectionPath) {
    println!("{path}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn test_app() -> NoesisApp {
        NoesisApp {
            config: NoesisConfig::default(),
            version: "0.0.0-test".to_string(),
        }
    }

    #[tokio::test]
    async fn test_run_no_command() {
        let args = CliArgs::parse_from(["noesis"]);
        assert!(test_app().run(args).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_version() {
        let args = CliArgs::parse_from(["noesis", "version"]);
        assert!(test_app().run(args).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_route() {
        let args = CliArgs::parse_from(["noesis", "route", "how do atoms bond together"]);
        assert!(test_app().run(args).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_search_json() {
        let args = CliArgs::parse_from(["noesis", "--json", "search", "quantum mechanics"]);
        assert!(test_app().run(args).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_multi() {
        let args = CliArgs::parse_from(["noesis", "multi", "machine learning", "-k", "2"]);
        assert!(test_app().run(args).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_connect() {
        let args = CliArgs::parse_from(["noesis", "connect", "Einstein", "Quantum Mechanics"]);
        assert!(test_app().run(args).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_connect_unknown_concept_fails() {
        let args = CliArgs::parse_from(["noesis", "connect", "einstein", "phlogiston"]);
        assert!(test_app().run(args).await.is_err());
    }

    #[test]
    fn test_options_timeout_precedence() {
        let mut app = test_app();
        app.config.search.timeout_ms = Some(500);

        // The flag wins over the config default.
        let options = app.options(3, Some(100), false);
        assert_eq!(options.timeout, Some(Duration::from_millis(100)));

        let options = app.options(3, None, false);
        assert_eq!(options.timeout, Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_options_overall_truncation() {
        let options = test_app().options(3, None, true);
        assert_eq!(options.truncation, Truncation::Overall);
    }
}
