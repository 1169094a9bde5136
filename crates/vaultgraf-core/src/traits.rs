//! Core traits for Vaultgraf configuration.
//!
//! The primary trait is [`ConfigProvider`], which abstracts where the
//! vault's documents live so handlers can be exercised against test
//! configurations as easily as the real TOML-backed one.

use std::path::PathBuf;

use crate::Result;

/// Trait for application configuration.
///
/// Implementations map well-known document kinds to filesystem paths.
/// The known kinds are:
///
/// - `"coverage"` — the primary coverage table document
/// - `"repos"` — the directory holding per-repository documentation
/// - `"index"` — the index document containing diagram blocks
/// - `"report"` — where the connectivity report is written
///
/// # Bounds
///
/// - `Send + Sync`: configuration must be shareable across threads
/// - `Clone`: configuration can be duplicated for passing to subsystems
/// - `'static`: configuration lifetime is not borrowed
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Base path of the documentation vault.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined.
    fn base_path(&self) -> Result<PathBuf>;

    /// Path for a specific document kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the kind is unknown or the path cannot be
    /// resolved.
    fn document_path(&self, kind: &str) -> Result<PathBuf>;
}
