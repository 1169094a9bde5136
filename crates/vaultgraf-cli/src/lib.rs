//! Vaultgraf CLI — configuration, argument parsing, and command handlers.
//!
//! # Modules
//!
//! - [`cli`]: clap argument and subcommand definitions
//! - [`config`]: TOML/env configuration with XDG defaults
//! - [`app`]: the application struct wiring everything together
//! - [`handlers`]: analysis command handlers
//! - [`config_handlers`]: `config` subcommand handlers

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod handlers;

pub use app::VaultgrafCli;
pub use cli::CliArgs;
pub use config::VaultgrafConfig;
