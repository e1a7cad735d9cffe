use std::path::PathBuf;

use cogindex_config::config::Config;
use cogindex_registry::{build_catalog, fetch_index, load_index_file, Cog};
use tracing::debug;

use crate::error::CogResult;

/// Where the index document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSource {
    /// Full URL of the index document.
    Remote(String),
    /// Local copy of the index document.
    File(PathBuf),
}

impl IndexSource {
    /// Uses `index_file` when given, otherwise the configured index URL.
    pub fn from_config(config: &Config, index_file: Option<PathBuf>) -> Self {
        match index_file {
            Some(path) => Self::File(path),
            None => Self::Remote(config.index_document_url()),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Remote(url) => url.clone(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// Fetches the index and builds the visible catalog for one request.
pub fn load_catalog(source: &IndexSource, include_unapproved: bool) -> CogResult<Vec<Cog>> {
    debug!(source = %source.describe(), include_unapproved, "loading catalog");

    let index = match source {
        IndexSource::Remote(url) => fetch_index(url)?,
        IndexSource::File(path) => load_index_file(path)?,
    };

    Ok(build_catalog(&index, include_unapproved)?)
}
