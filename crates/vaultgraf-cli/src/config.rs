//! Configuration for the Vaultgraf CLI.
//!
//! Provides the [`VaultgrafConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `VAULTGRAF_CONFIG` environment variable
//! 3. XDG default: `~/.config/vaultgraf/config.toml`
//! 4. Built-in defaults

use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vaultgraf_core::{ConfigProvider, Error, Result};
use vaultgraf_graph::ClassifyOptions;

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the Vaultgraf CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultgrafConfig {
    /// Project name, used for env var prefixes and default paths.
    pub project_name: String,

    /// Base path of the documentation vault.
    pub base_path: Option<String>,

    /// Vault document locations.
    pub vault: VaultPaths,

    /// Major-domain configuration.
    pub domains: DomainConfig,

    /// Connectivity classifier tuning.
    pub classify: ClassifyConfig,

    /// Report output configuration.
    pub report: ReportConfig,
}

/// Locations of the analysed documents, relative to the vault base when
/// not set explicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultPaths {
    /// Primary coverage table (default: `<base>/Coverage.md`).
    pub coverage_path: Option<String>,

    /// Directory of per-repository documentation folders
    /// (default: `<base>/Repos Docs`).
    pub repos_path: Option<String>,

    /// Index document with diagram blocks (default: `<repos>/Index.md`).
    pub index_path: Option<String>,
}

/// The major domains anchoring connectivity analysis.
///
/// Injectable configuration, not a constant: a different vault names
/// different domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    /// Major-domain identifiers.
    pub major: Vec<String>,
}

/// Classifier tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    /// Maximum paths enumerated per major-domain pair.
    pub max_paths_per_pair: usize,

    /// Visitation budget per domain pair.
    pub max_visits: usize,
}

/// Report output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Report path (default: `<base>/connectivity_report.md`).
    pub output_path: Option<String>,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for VaultgrafConfig {
    fn default() -> Self {
        Self {
            project_name: "vaultgraf".to_string(),
            base_path: None,
            vault: VaultPaths::default(),
            domains: DomainConfig::default(),
            classify: ClassifyConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            major: [
                "chat",
                "video",
                "web",
                "commerce",
                "identity",
                "security",
                "content",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        let defaults = ClassifyOptions::default();
        Self {
            max_paths_per_pair: defaults.max_paths_per_pair,
            max_visits: defaults.max_visits,
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl VaultgrafConfig {
    /// Load configuration from file, environment, and defaults.
    ///
    /// Loading priority:
    /// 1. Explicit `config_path` (from `--config` flag)
    /// 2. `VAULTGRAF_CONFIG` env var
    /// 3. XDG default: `~/.config/vaultgraf/config.toml`
    /// 4. Built-in defaults
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

        let mut env_opts = env::Options::with_top_level("VAULTGRAF");
        env_opts.add_section("vault");
        env_opts.add_section("domains");
        env_opts.add_section("classify");
        env_opts.add_section("report");
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
        // 1. Explicit --config flag
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        // 2. VAULTGRAF_CONFIG env var
        if let Ok(path) = std::env::var("VAULTGRAF_CONFIG") {
            return Some(PathBuf::from(path));
        }

        // 3. XDG default
        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("vaultgraf").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into environment variable pairs with a
    /// `VAULTGRAF_` prefix.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value: toml::Value =
            toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, "VAULTGRAF", &mut vars);
        Ok(vars)
    }

    /// Classifier options from the configured tuning values.
    pub fn classify_options(&self) -> ClassifyOptions {
        ClassifyOptions {
            max_paths_per_pair: self.classify.max_paths_per_pair,
            max_visits: self.classify.max_visits,
        }
    }
}

/// Expand `~` and environment references in a configured path.
fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for VaultgrafConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        match &self.base_path {
            Some(p) => Ok(expand_path(p)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine base path: {e}"))),
        }
    }

    fn document_path(&self, kind: &str) -> Result<PathBuf> {
        match kind {
            "coverage" => match &self.vault.coverage_path {
                Some(p) => Ok(expand_path(p)),
                None => Ok(self.base_path()?.join("Coverage.md")),
            },
            "repos" => match &self.vault.repos_path {
                Some(p) => Ok(expand_path(p)),
                None => Ok(self.base_path()?.join("Repos Docs")),
            },
            "index" => match &self.vault.index_path {
                Some(p) => Ok(expand_path(p)),
                None => Ok(self.document_path("repos")?.join("Index.md")),
            },
            "report" => match &self.report.output_path {
                Some(p) => Ok(expand_path(p)),
                None => Ok(self.base_path()?.join("connectivity_report.md")),
            },
            other => Err(Error::config(format!("Unknown document kind: {other}"))),
        }
    }
}

// ============================================================================
// Helper: flatten TOML to env vars
// ============================================================================

/// Recursively flatten a TOML value into `KEY=value` pairs.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => {
            out.push((prefix.to_string(), s.clone()));
        }
        toml::Value::Integer(i) => {
            out.push((prefix.to_string(), i.to_string()));
        }
        toml::Value::Float(f) => {
            out.push((prefix.to_string(), f.to_string()));
        }
        toml::Value::Boolean(b) => {
            out.push((prefix.to_string(), b.to_string()));
        }
        toml::Value::Datetime(dt) => {
            out.push((prefix.to_string(), dt.to_string()));
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
