//! Cog metadata structures.
//!
//! This module defines [`Cog`], one installable package offered by a
//! repository. Raw records are decoded leniently (see the field rules on
//! [`parse_cog`]) and the derived requirement list is computed once, at
//! construction.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{
    error::{RegistryError, Result},
    fields::{lenient_bool, lenient_string, string_list, version_triple},
    repo::RepoInfo,
    requirements::{all_requirements, normalize_bot_version},
};

/// Kind of installable a cog record describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CogType {
    Cog,
    SharedLibrary,
    #[default]
    Unknown,
}

impl CogType {
    /// Maps the raw `type` value. Matching is exact; anything else is
    /// [`CogType::Unknown`].
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "COG" => Self::Cog,
            "SHARED_LIBRARY" => Self::SharedLibrary,
            _ => Self::Unknown,
        }
    }
}

fn cog_type<'de, D>(deserializer: D) -> std::result::Result<CogType, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => CogType::from_raw(&s),
        _ => CogType::Unknown,
    })
}

#[derive(Deserialize)]
struct RawCog {
    #[serde(default, rename = "type", deserialize_with = "cog_type")]
    kind: CogType,
    #[serde(default, deserialize_with = "string_list")]
    author: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    short: String,
    #[serde(default, deserialize_with = "lenient_string")]
    description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    end_user_data_statement: String,
    #[serde(default, deserialize_with = "lenient_string")]
    min_bot_version: String,
    #[serde(default, deserialize_with = "lenient_string")]
    max_bot_version: String,
    #[serde(default, deserialize_with = "version_triple")]
    min_python_version: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    disabled: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    hidden: bool,
    #[serde(default, deserialize_with = "string_list")]
    requirements: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    permissions: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    tags: Vec<String>,
}

/// A cog offered by a repository.
///
/// Cogs are built only through [`parse_cog`], which guarantees:
///
/// - `tags` are lower-cased
/// - `min_bot_version` / `max_bot_version` are never `"0.0.0"`
/// - `min_python_version` is either empty or a full `major.minor.patch`
/// - `all_requirements` matches the fields above
#[derive(Debug, Clone, Serialize)]
pub struct Cog {
    /// Cog name, unique within its repository.
    pub name: String,
    /// Owning repository's metadata, kept for display.
    pub repo: Arc<RepoInfo>,
    #[serde(rename = "type")]
    pub kind: CogType,
    pub author: Vec<String>,
    pub short: String,
    pub description: String,
    pub end_user_data_statement: String,
    pub min_bot_version: String,
    pub max_bot_version: String,
    pub min_python_version: String,
    pub disabled: bool,
    pub hidden: bool,
    /// Dependencies declared by the cog itself.
    pub requirements: Vec<String>,
    pub permissions: Vec<String>,
    pub tags: Vec<String>,
    all_requirements: Vec<String>,
}

impl Cog {
    fn from_raw(repo: Arc<RepoInfo>, name: String, raw: RawCog) -> Self {
        let min_bot_version = normalize_bot_version(raw.min_bot_version);
        let max_bot_version = normalize_bot_version(raw.max_bot_version);
        let all_requirements = all_requirements(
            &min_bot_version,
            &max_bot_version,
            &raw.min_python_version,
            &raw.requirements,
        );

        Self {
            name,
            repo,
            kind: raw.kind,
            author: raw.author,
            short: raw.short,
            description: raw.description,
            end_user_data_statement: raw.end_user_data_statement,
            min_bot_version,
            max_bot_version,
            min_python_version: raw.min_python_version,
            disabled: raw.disabled,
            hidden: raw.hidden,
            requirements: raw.requirements,
            permissions: raw.permissions,
            tags: raw.tags.into_iter().map(|tag| tag.to_lowercase()).collect(),
            all_requirements,
        }
    }

    /// Interpreter, bot and declared requirements, in that order.
    pub fn all_requirements(&self) -> &[String] {
        &self.all_requirements
    }

    /// The long description, or the short one when the long one is empty.
    pub fn display_description(&self) -> &str {
        if self.description.is_empty() {
            &self.short
        } else {
            &self.description
        }
    }

    /// Whether the cog may appear in listings at all.
    pub fn is_visible(&self) -> bool {
        !self.disabled && !self.hidden
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Command that installs this cog once its repository has been added.
    pub fn install_command(&self) -> String {
        format!("cog install {} {}", self.repo.name.to_lowercase(), self.name)
    }
}

/// Parses one cog record of a repository.
///
/// Only a record that is not a JSON object fails, with
/// [`RegistryError::InvalidPackage`]. Individual fields never fail:
///
/// - `type` maps exactly to [`CogType`], anything else is `Unknown`
/// - string fields accept only strings, otherwise `""`
/// - boolean fields accept only booleans, otherwise `false`
/// - list fields accept only arrays, dropping non-string elements
/// - `min_python_version` accepts only a three-integer array
/// - bot versions of `"0.0.0"` are treated as unset
pub fn parse_cog(repo: &Arc<RepoInfo>, name: &str, raw: &Value) -> Result<Cog> {
    let invalid = |reason: String| {
        RegistryError::InvalidPackage {
            name: name.to_string(),
            reason,
        }
    };

    if !raw.is_object() {
        return Err(invalid("expected an object".into()));
    }

    let raw = RawCog::deserialize(raw).map_err(|err| invalid(err.to_string()))?;
    Ok(Cog::from_raw(Arc::clone(repo), name.to_string(), raw))
}
