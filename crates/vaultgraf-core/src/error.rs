//! Error types for Vaultgraf operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used
//! across all Vaultgraf crates. Uses `thiserror` for derive macros.
//!
//! The taxonomy is deliberately closed: per-document and per-row problems
//! are recovered locally by callers (skip and count), while output-write
//! failures surface as fatal errors.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur in Vaultgraf operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error without path context.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error with the path that produced it.
    #[error("I/O error at {path}: {source}")]
    IoPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source document could not be read or decoded.
    ///
    /// Callers recover from this locally: the document's contribution to
    /// the graph is simply absent.
    #[error("Document unreadable: {path}: {reason}")]
    DocumentUnreadable { path: PathBuf, reason: String },

    /// An output artifact could not be written. Always fatal.
    #[error("Failed to write output {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parse failure in document content.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Something was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A command-level operation failed.
    #[error("Operation failed: {0}")]
    Operation(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an operation error.
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }

    /// Attach path context to an I/O error.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a document-unreadable error.
    pub fn document_unreadable(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::DocumentUnreadable {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create an output-write error.
    pub fn output_write(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::OutputWrite {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether this error is recoverable by skipping the offending document.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DocumentUnreadable { .. })
    }
}

/// Result type alias using Vaultgraf's Error type.
pub type Result<T> = std::result::Result<T, Error>;
