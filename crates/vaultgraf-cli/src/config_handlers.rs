//! Handler functions for config CLI commands.
//!
//! Implements `vaultgraf config {path,get,set,init,export}` subcommands
//! and TOML dotted-key helper functions.

use crate::cli::ConfigAction;
use crate::config::VaultgrafConfig;
use std::path::PathBuf;
use vaultgraf_core::{Error, Result};

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
///
/// Receives the raw `--config` path (not a loaded config) because some
/// commands (path, init) work before a config file exists.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key),
        ConfigAction::Set { key, value } => cmd_config_set(config_path, &key, &value),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force),
        ConfigAction::Export { docker_env } => {
            let config = VaultgrafConfig::load(config_path)?;
            cmd_config_export(&config, docker_env)
        }
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// Show the resolved config file path.
fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    match VaultgrafConfig::resolve_config_path(config_path) {
        Some(path) => {
            let exists = path.exists();
            println!("{}", path.display());
            if !exists {
                eprintln!("(file does not exist — run `vaultgraf config init` to create it)");
            }
            Ok(())
        }
        None => Err(Error::config(
            "Could not determine config directory for this platform",
        )),
    }
}

/// Get a configuration value by dotted key.
fn cmd_config_get(config_path: Option<&str>, key: &str) -> Result<()> {
    let config = VaultgrafConfig::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    match get_nested_value(&value, key) {
        Some(val) => {
            println!("{}", format_toml_value(val));
            Ok(())
        }
        None => Err(Error::config(format!(
            "Key '{key}' not found in configuration"
        ))),
    }
}

/// Set a configuration value by dotted key in the config file.
fn cmd_config_set(config_path: Option<&str>, key: &str, value: &str) -> Result<()> {
    let path = VaultgrafConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;

    let mut doc: toml::Value = if path.exists() {
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?
    } else {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `vaultgraf config init` first.",
            path.display()
        )));
    };

    set_nested_value(&mut doc, key, parse_value(value))?;

    let toml_str = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Set {key} = {value} in {}", path.display());
    Ok(())
}

/// Create a default configuration file.
fn cmd_config_init(file: Option<&str>, force: bool) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => VaultgrafConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let config = VaultgrafConfig::default();
    let toml_str = config.to_toml_string()?;
    std::fs::write(&path, &toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Config file created at {}", path.display());
    Ok(())
}

/// Export configuration as environment variables.
fn cmd_config_export(config: &VaultgrafConfig, docker_env: bool) -> Result<()> {
    let vars = config.to_env_vars()?;
    for (key, value) in &vars {
        if docker_env {
            println!("--env {key}={value}");
        } else {
            println!("{key}={value}");
        }
    }
    Ok(())
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Navigate a dotted key path in a TOML value tree.
fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    let parts: Vec<&str> = key.split('.').collect();
    let mut current = value;
    for part in &parts {
        current = current.as_table()?.get(*part)?;
    }
    Some(current)
}

/// Set a value at a dotted key path, creating intermediate tables as needed.
fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let mut current = root;

    for (i, part) in parts.iter().enumerate() {
        if i == parts.len() - 1 {
            let table = current
                .as_table_mut()
                .ok_or_else(|| Error::config("Cannot set key on a non-table value"))?;
            table.insert(part.to_string(), value);
            return Ok(());
        }

        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config("Cannot navigate into a non-table value"))?;
        if !table.contains_key(*part) {
            table.insert(part.to_string(), toml::Value::Table(toml::map::Map::new()));
        }
        current = table.get_mut(*part).ok_or_else(|| {
            Error::config(format!("Failed to navigate into config section '{part}'"))
        })?;
    }

    Err(Error::config("Empty key path"))
}

/// Parse a string value into a TOML value, auto-detecting the type.
///
/// Priority: bool, then integer, then float, then string.
fn parse_value(s: &str) -> toml::Value {
    if s == "true" {
        return toml::Value::Boolean(true);
    }
    if s == "false" {
        return toml::Value::Boolean(false);
    }
    if let Ok(i) = s.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return toml::Value::Float(f);
    }
    toml::Value::String(s.to_string())
}

/// Format a TOML value for display on stdout.
fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
