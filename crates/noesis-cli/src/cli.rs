//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};

/// Top-level arguments for the `noesis` binary.
#[derive(Parser, Debug)]
#[command(name = "noesis", author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "NOESIS_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Emit results as JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Noesis commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify a query into its best-matching domain.
    Route {
        /// The query to classify.
        query: String,
    },

    /// Route a query, then search its winning domain.
    Search {
        /// The query to search.
        query: String,

        /// Results to return.
        #[arg(short = 'k', long, default_value = "5")]
        limit: usize,

        /// Per-domain deadline in milliseconds.
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Search every domain concurrently and merge the results.
    Multi {
        /// The query to search.
        query: String,

        /// Results to return per domain.
        #[arg(short = 'k', long, default_value = "3")]
        limit: usize,

        /// Truncate the merged list to the limit overall, instead of
        /// keeping the limit per domain.
        #[arg(long)]
        overall: bool,

        /// Per-domain deadline in milliseconds.
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Find the shortest relationship path between two concepts.
    Connect {
        /// Starting concept (node id or display name).
        from: String,

        /// Ending concept (node id or display name).
        to: String,

        /// Traversal bound in hops.
        #[arg(long)]
        max_hops: Option<usize>,
    },

    /// Print version information.
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_args_default() {
        let args = CliArgs::parse_from(["noesis"]);
        assert!(args.config.is_none());
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(!args.json);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_cli_args_flags() {
        let args = CliArgs::parse_from(["noesis", "--verbose", "--json"]);
        assert!(args.verbose);
        assert!(args.json);
    }

    #[test]
    fn test_route_command() {
        let args = CliArgs::parse_from(["noesis", "route", "how do atoms bond"]);
        match args.command {
            Some(Command::Route { query }) => assert_eq!(query, "how do atoms bond"),
            _ => panic!("Expected Route command"),
        }
    }

    #[test]
    fn test_search_command_defaults() {
        let args = CliArgs::parse_from(["noesis", "search", "quantum mechanics"]);
        match args.command {
            Some(Command::Search {
                query,
                limit,
                timeout_ms,
            }) => {
                assert_eq!(query, "quantum mechanics");
                assert_eq!(limit, 5);
                assert!(timeout_ms.is_none());
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_search_command_limit_and_timeout() {
        let args = CliArgs::parse_from([
            "noesis",
            "search",
            "quantum",
            "-k",
            "10",
            "--timeout-ms",
            "250",
        ]);
        match args.command {
            Some(Command::Search {
                limit, timeout_ms, ..
            }) => {
                assert_eq!(limit, 10);
                assert_eq!(timeout_ms, Some(250));
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_multi_command() {
        let args = CliArgs::parse_from(["noesis", "multi", "learning", "--overall"]);
        match args.command {
            Some(Command::Multi {
                query,
                limit,
                overall,
                ..
            }) => {
                assert_eq!(query, "learning");
                assert_eq!(limit, 3);
                assert!(overall);
            }
            _ => panic!("Expected Multi command"),
        }
    }

    #[test]
    fn test_connect_command() {
        let args = CliArgs::parse_from(["noesis", "connect", "Einstein", "Quantum Mechanics"]);
        match args.command {
            Some(Command::Connect { from, to, max_hops }) => {
                assert_eq!(from, "Einstein");
                assert_eq!(to, "Quantum Mechanics");
                assert!(max_hops.is_none());
            }
            _ => panic!("Expected Connect command"),
        }
    }

    #[test]
    fn test_connect_command_max_hops() {
        let args = CliArgs::parse_from(["noesis", "connect", "a", "b", "--max-hops", "3"]);
        match args.command {
            Some(Command::Connect { max_hops, .. }) => assert_eq!(max_hops, Some(3)),
            _ => panic!("Expected Connect command"),
        }
    }

    #[test]
    fn test_version_command() {
        let args = CliArgs::parse_from(["noesis", "version"]);
        assert!(matches!(args.command, Some(Command::Version)));
    }
}
