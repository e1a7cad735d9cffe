//! Flattening the index into the list of visible cogs.

use serde_json::Value;
use tracing::{debug, trace};

use crate::{
    cog::Cog,
    error::{RegistryError, Result},
    repo::{parse_repo, Repo, RepoCategory},
};

/// Counters collected while building a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    /// Index entries seen.
    pub repos_seen: usize,
    /// Entries dropped by validation.
    pub repos_rejected: usize,
    /// Unapproved repositories left out of the request.
    pub repos_filtered: usize,
    /// Cogs kept in the catalog.
    pub cogs_loaded: usize,
    /// Cog records that failed to parse.
    pub cogs_skipped: usize,
    /// Cogs dropped because they are hidden or disabled.
    pub cogs_hidden: usize,
}

fn index_entries(index: &Value) -> Result<&serde_json::Map<String, Value>> {
    index.as_object().ok_or_else(|| {
        RegistryError::IndexUnavailable {
            url: "<index>".into(),
            reason: "malformed index: expected an object of repositories".into(),
        }
    })
}

/// Parses every repository of the index, dropping entries that fail
/// validation.
///
/// # Errors
///
/// Returns [`RegistryError::IndexUnavailable`] when the document is not an
/// object. Individual invalid repositories are never an error.
pub fn parse_index(index: &Value) -> Result<Vec<Repo>> {
    let entries = index_entries(index)?;
    let mut repos = Vec::with_capacity(entries.len());

    for (source_key, raw) in entries {
        match parse_repo(source_key, raw) {
            Ok(repo) => repos.push(repo),
            Err(err) => debug!(error = %err, "skipping repository"),
        }
    }

    Ok(repos)
}

/// Builds the flat list of cogs visible for a request.
///
/// Invalid repositories are skipped, unapproved ones are left out unless
/// `include_unapproved` is set, and hidden or disabled cogs are dropped. The
/// result is in index order; sorting happens at query time.
///
/// # Errors
///
/// Returns [`RegistryError::IndexUnavailable`] when the document is not an
/// object of repositories.
pub fn build_catalog(index: &Value, include_unapproved: bool) -> Result<Vec<Cog>> {
    let (cogs, stats) = build_catalog_with_stats(index, include_unapproved)?;
    debug!(
        repos_seen = stats.repos_seen,
        repos_rejected = stats.repos_rejected,
        repos_filtered = stats.repos_filtered,
        cogs_loaded = stats.cogs_loaded,
        cogs_skipped = stats.cogs_skipped,
        cogs_hidden = stats.cogs_hidden,
        "built catalog"
    );
    Ok(cogs)
}

/// Same as [`build_catalog`], also returning the counters.
pub fn build_catalog_with_stats(
    index: &Value,
    include_unapproved: bool,
) -> Result<(Vec<Cog>, CatalogStats)> {
    let mut stats = CatalogStats {
        repos_seen: index_entries(index)?.len(),
        ..CatalogStats::default()
    };

    let repos = parse_index(index)?;
    stats.repos_rejected = stats.repos_seen - repos.len();

    let mut cogs = Vec::new();
    for repo in repos {
        if repo.category() == RepoCategory::Unapproved && !include_unapproved {
            trace!(repo = repo.url(), "leaving out unapproved repository");
            stats.repos_filtered += 1;
            continue;
        }

        stats.cogs_skipped += repo.skipped_cogs;
        for cog in repo.cogs {
            if cog.is_visible() {
                cogs.push(cog);
            } else {
                stats.cogs_hidden += 1;
            }
        }
    }
    stats.cogs_loaded = cogs.len();

    Ok((cogs, stats))
}
