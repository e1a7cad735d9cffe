//! Catalog queries for the cog index.
//!
//! Loading the catalog for a request, running the tag/search/sort/paginate
//! query over it, and the request parameters that drive the web page.

pub mod catalog;
pub mod error;
pub mod params;
pub mod query;
pub mod tags;
pub mod types;

pub use catalog::{load_catalog, IndexSource};
pub use error::{CogError, CogResult, ErrorContext};
pub use params::{LinkOverrides, RequestParams};
pub use query::query;
pub use types::*;
