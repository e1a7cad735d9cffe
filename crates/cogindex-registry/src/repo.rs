//! Repository entries of the index.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    cog::{parse_cog, Cog},
    error::{RegistryError, Result},
    fields::object_or_empty,
};

/// Curation status of a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoCategory {
    Approved,
    Unapproved,
}

impl RepoCategory {
    /// Maps the raw `rx_category` value. Matching is exact and case-sensitive.
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            "approved" => Some(Self::Approved),
            "unapproved" => Some(Self::Unapproved),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Unapproved => "unapproved",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Unapproved => "Unapproved",
        }
    }
}

impl fmt::Display for RepoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Repository metadata shared by the repository and each of its cogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoInfo {
    /// Source URL, the index key without its `@branch` qualifier.
    pub url: String,
    pub name: String,
    pub category: RepoCategory,
    /// Branch to add the repository from; empty for the default branch.
    pub branch: String,
}

impl RepoInfo {
    /// Command that adds this repository to a bot.
    pub fn add_command(&self) -> String {
        let command = format!("repo add {} {}", self.name.to_lowercase(), self.url);
        if self.branch.is_empty() {
            command
        } else {
            format!("{command} {}", self.branch)
        }
    }
}

/// A repository together with the cogs it offers.
#[derive(Debug, Clone)]
pub struct Repo {
    pub info: Arc<RepoInfo>,
    pub cogs: Vec<Cog>,
    /// Number of cog records that failed to parse.
    pub skipped_cogs: usize,
}

impl Repo {
    pub fn url(&self) -> &str {
        &self.info.url
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn category(&self) -> RepoCategory {
        self.info.category
    }

    pub fn branch(&self) -> &str {
        &self.info.branch
    }
}

#[derive(Deserialize)]
struct RawRepo {
    name: String,
    #[serde(default)]
    rx_branch: Option<String>,
    #[serde(default, deserialize_with = "object_or_empty")]
    rx_cogs: Map<String, Value>,
}

/// Strips the `@branch` qualifier from an index key.
pub fn repo_url_from_key(source_key: &str) -> &str {
    source_key
        .split_once('@')
        .map_or(source_key, |(url, _)| url)
}

/// Parses one index entry into a [`Repo`].
///
/// The repository is rejected with [`RegistryError::InvalidRepo`] when the
/// record is not an object, the category is missing or unrecognized, the name
/// is missing or not a string, or the branch is present but not a string.
/// Cog records that fail to parse are skipped; the rest of the repository
/// still loads.
pub fn parse_repo(source_key: &str, raw: &Value) -> Result<Repo> {
    let invalid = |reason: String| {
        RegistryError::InvalidRepo {
            key: source_key.to_string(),
            reason,
        }
    };

    if !raw.is_object() {
        return Err(invalid("expected an object".into()));
    }

    let category = match raw.get("rx_category") {
        Some(Value::String(category)) => {
            RepoCategory::from_raw(category)
                .ok_or_else(|| invalid(format!("unrecognized category `{category}`")))?
        }
        Some(_) => return Err(invalid("category is not a string".into())),
        None => return Err(invalid("missing category".into())),
    };

    let RawRepo {
        name,
        rx_branch,
        rx_cogs,
    } = RawRepo::deserialize(raw).map_err(|err| invalid(err.to_string()))?;

    let info = Arc::new(RepoInfo {
        url: repo_url_from_key(source_key).to_string(),
        name,
        category,
        branch: rx_branch.unwrap_or_default(),
    });

    let mut cogs = Vec::with_capacity(rx_cogs.len());
    let mut skipped_cogs = 0;
    for (cog_name, cog_data) in &rx_cogs {
        match parse_cog(&info, cog_name, cog_data) {
            Ok(cog) => cogs.push(cog),
            Err(err) => {
                debug!(repo = %info.url, error = %err, "skipping cog");
                skipped_cogs += 1;
            }
        }
    }

    Ok(Repo {
        info,
        cogs,
        skipped_cogs,
    })
}
