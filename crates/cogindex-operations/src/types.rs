use cogindex_registry::Cog;
use serde::Serialize;

// ---- Query ----

/// Filters and page selection applied to a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Exact tag to filter on; empty for no tag filter.
    pub tag: String,
    /// Search term; empty for no search.
    pub search: String,
    /// 1-based page number.
    pub page: usize,
    pub per_page: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            tag: String::new(),
            search: String::new(),
            page: 1,
            per_page: cogindex_config::config::DEFAULT_PER_PAGE,
        }
    }
}

/// One page of query results.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub items: Vec<Cog>,
    /// Number of pages; 0 when nothing matched.
    pub page_count: usize,
    /// The requested page, echoed back even when out of range.
    pub page: usize,
    /// Number of matching cogs across all pages.
    pub total: usize,
}

impl Page {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}

// ---- Tags ----

/// A tag and the number of visible cogs carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}
