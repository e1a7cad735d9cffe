//! Index fetching and cog metadata parsing.
//!
//! This crate turns the Red-Index JSON document into typed entities:
//!
//! - **Index**: the raw document, fetched over HTTP or read from disk
//!   ([`fetch_index`], [`load_index_file`])
//! - **Repositories**: one [`Repo`] per index entry, rejected as a whole when
//!   the category or name is invalid
//! - **Cogs**: one [`Cog`] per package record, each carrying its derived
//!   requirement list
//! - **Catalog**: the flat list of cogs visible for a request ([`build_catalog`])
//!
//! # Example
//!
//! ```no_run
//! use cogindex_registry::{build_catalog, fetch_index};
//!
//! fn visible_cogs(url: &str) -> cogindex_registry::Result<usize> {
//!     let index = fetch_index(url)?;
//!     let cogs = build_catalog(&index, false)?;
//!     Ok(cogs.len())
//! }
//! ```

pub mod catalog;
pub mod cog;
pub mod error;
mod fields;
pub mod http_client;
pub mod index;
pub mod repo;
pub mod requirements;

pub use catalog::{build_catalog, build_catalog_with_stats, parse_index, CatalogStats};
pub use cog::{parse_cog, Cog, CogType};
pub use error::{RegistryError, Result};
pub use index::{fetch_index, load_index_file, parse_index_bytes};
pub use repo::{parse_repo, Repo, RepoCategory, RepoInfo};
pub use requirements::{all_requirements, normalize_bot_version};
