//! CLI argument parsing and command definitions.
//!
//! Provides the `vaultgraf` command structure: configuration and verbosity
//! flags plus the base commands (analyze, graph, frontmatter, config,
//! version).

use clap::{Parser, Subcommand};

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments for Vaultgraf.
#[derive(Parser, Debug)]
#[command(author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "VAULTGRAF_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<BaseCommand>,
}

/// Built-in commands.
#[derive(Subcommand, Debug)]
pub enum BaseCommand {
    /// Run the full analysis: build, classify, rewrite, report.
    Analyze {
        /// Show classification without touching any file.
        #[arg(long)]
        dry_run: bool,

        /// Report output path (overrides configuration).
        #[arg(short, long)]
        report: Option<String>,
    },

    /// Graph operations.
    Graph(GraphCommand),

    /// Audit YAML frontmatter across the vault.
    Frontmatter,

    /// Configuration operations.
    Config(ConfigCommand),

    /// Print version information.
    Version,
}

/// Graph-specific subcommands.
#[derive(Parser, Debug)]
pub struct GraphCommand {
    /// Graph subcommand to execute.
    #[command(subcommand)]
    pub command: GraphSubcommand,
}

/// Available graph subcommands.
#[derive(Subcommand, Debug)]
pub enum GraphSubcommand {
    /// Show statistics for the built graph.
    Stats,

    /// Run graph integrity checks.
    Check,

    /// Classify connectivity without writing anything.
    Classify {
        /// Maximum paths enumerated per major-domain pair.
        #[arg(long)]
        max_paths: Option<usize>,

        /// Visitation budget per domain pair.
        #[arg(long)]
        max_visits: Option<usize>,
    },
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "classify.max_paths_per_pair").
        key: String,
    },

    /// Set a configuration value by dotted key.
    Set {
        /// Dotted key (e.g., "classify.max_paths_per_pair").
        key: String,

        /// Value to set.
        value: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
