//! Vaultgraf application framework.
//!
//! Wires the parsed CLI arguments, the loaded configuration, and the
//! command handlers together.

use crate::cli::{BaseCommand, CliArgs, GraphSubcommand};
use crate::config::VaultgrafConfig;
use crate::{config_handlers, handlers};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use vaultgraf_core::Result;
use vaultgraf_graph::ClassifyOptions;

// ============================================================================
// VaultgrafCli
// ============================================================================

/// The CLI application: a name, a loaded configuration, and a version.
pub struct VaultgrafCli {
    name: String,
    config: Arc<VaultgrafConfig>,
    version: String,
}

impl VaultgrafCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = VaultgrafConfig::load(args.config.as_deref())?;
        Ok(Self::new(name, config))
    }

    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: VaultgrafConfig) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &VaultgrafConfig {
        &self.config
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

        match args.command {
            Some(BaseCommand::Analyze { dry_run, report }) => {
                let options = handlers::AnalyzeOptions {
                    majors: self.config.domains.major.clone(),
                    classify: self.config.classify_options(),
                    dry_run,
                    report_override: report,
                };
                handlers::handle_analyze(&*self.config, options).await
            }
            Some(BaseCommand::Graph(graph_cmd)) => self.handle_graph(graph_cmd.command).await,
            Some(BaseCommand::Frontmatter) => {
                handlers::handle_frontmatter(&*self.config).await
            }
            Some(BaseCommand::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            Some(BaseCommand::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            None => {
                println!("{} {} — use --help for usage", self.name, self.version);
                Ok(())
            }
        }
    }

    /// Dispatch graph subcommands to handlers.
    async fn handle_graph(&self, command: GraphSubcommand) -> Result<()> {
        let majors = &self.config.domains.major;
        match command {
            GraphSubcommand::Stats => handlers::handle_stats(&*self.config, majors).await,
            GraphSubcommand::Check => handlers::handle_check(&*self.config, majors).await,
            GraphSubcommand::Classify {
                max_paths,
                max_visits,
            } => {
                let configured = self.config.classify_options();
                let options = ClassifyOptions {
                    max_paths_per_pair: max_paths.unwrap_or(configured.max_paths_per_pair),
                    max_visits: max_visits.unwrap_or(configured.max_visits),
                };
                handlers::handle_classify(&*self.config, majors, options).await
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
