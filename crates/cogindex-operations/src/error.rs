//! Error types for catalog operations.

use cogindex_config::error::ConfigError;
use cogindex_registry::RegistryError;
use miette::Diagnostic;
use thiserror::Error;

/// Top-level error for everything a request can run into.
#[derive(Error, Diagnostic, Debug)]
pub enum CogError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Registry(#[from] RegistryError),

    #[error("Error while {action}")]
    #[diagnostic(code(cogindex::io), help("Check file permissions and disk space"))]
    IoError {
        action: String,
        #[source]
        source: std::io::Error,
    },
}

impl CogError {
    /// Whether the index itself could not be obtained.
    pub fn is_index_unavailable(&self) -> bool {
        matches!(self, Self::Registry(RegistryError::IndexUnavailable { .. }))
    }
}

pub type CogResult<T> = std::result::Result<T, CogError>;

/// Extension trait for adding context to I/O errors.
pub trait ErrorContext<T> {
    fn with_context<C>(self, context: C) -> CogResult<T>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> CogResult<T>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| {
            CogError::IoError {
                action: context(),
                source: err,
            }
        })
    }
}
