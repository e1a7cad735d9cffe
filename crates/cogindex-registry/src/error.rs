//! Error types for the registry crate.
//!
//! [`RegistryError`] covers both the fatal case (the index could not be
//! obtained) and the per-entry rejections the catalog builder recovers from.

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while fetching or parsing the index.
#[derive(Error, Diagnostic, Debug)]
pub enum RegistryError {
    /// The index document could not be fetched or decoded. Fatal for the
    /// whole request.
    #[error("Cog index unavailable at {url}: {reason}")]
    #[diagnostic(
        code(cogindex_registry::index_unavailable),
        help("Check your network connection and the configured index URL")
    )]
    IndexUnavailable { url: String, reason: String },

    /// A repository entry failed validation and is dropped with all its cogs.
    #[error("Invalid repository `{key}`: {reason}")]
    #[diagnostic(code(cogindex_registry::invalid_repo))]
    InvalidRepo { key: String, reason: String },

    /// A single cog record failed to parse and is dropped.
    #[error("Invalid cog `{name}`: {reason}")]
    #[diagnostic(code(cogindex_registry::invalid_package))]
    InvalidPackage { name: String, reason: String },
}

/// A specialized Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
