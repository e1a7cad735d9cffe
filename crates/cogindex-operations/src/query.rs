//! Filtering, ordering and pagination of a catalog.

use cogindex_registry::Cog;
use cogindex_utils::string::{contains_ignore_case, natural_cmp_ignore_case};
use tracing::{debug, trace};

use crate::types::{Page, QueryOptions};

/// Whether `cog` matches a non-empty search term.
///
/// Name, display description and tags are checked first; authors and
/// requirements are only consulted when none of those matched.
pub fn matches_search(cog: &Cog, term: &str) -> bool {
    let lower = term.to_lowercase();

    let primary = contains_ignore_case(&cog.name, term)
        || contains_ignore_case(cog.display_description(), term)
        || cog.has_tag(&lower);
    if primary {
        return true;
    }

    cog.author
        .iter()
        .chain(cog.all_requirements())
        .any(|field| contains_ignore_case(field, term))
}

/// Runs a query against `catalog`.
///
/// The tag filter is exact against the lower-cased tag list, the search is
/// described on [`matches_search`], results are ordered by name in natural,
/// case-insensitive order (stable for equal names), then cut into pages of
/// `per_page`. A `per_page` or `page` of zero is treated as one.
pub fn query(catalog: &[Cog], options: &QueryOptions) -> Page {
    let per_page = options.per_page.max(1);
    let page = options.page.max(1);
    let tag = options.tag.to_lowercase();

    debug!(
        tag = tag.as_str(),
        search = options.search.as_str(),
        page,
        per_page,
        "querying catalog"
    );

    let mut matched: Vec<&Cog> = catalog
        .iter()
        .filter(|cog| tag.is_empty() || cog.has_tag(&tag))
        .filter(|cog| options.search.is_empty() || matches_search(cog, &options.search))
        .collect();
    matched.sort_by(|a, b| natural_cmp_ignore_case(&a.name, &b.name));

    let total = matched.len();
    let page_count = total.div_ceil(per_page);
    trace!(total, page_count, "matched cogs");

    let items = matched
        .chunks(per_page)
        .nth(page - 1)
        .map(|chunk| chunk.iter().map(|cog| (*cog).clone()).collect())
        .unwrap_or_default();

    Page {
        items,
        page_count,
        page,
        total,
    }
}
