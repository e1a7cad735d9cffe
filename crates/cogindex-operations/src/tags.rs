use std::collections::HashMap;

use cogindex_registry::Cog;
use cogindex_utils::string::natural_cmp_ignore_case;

use crate::types::TagCount;

/// Counts how many cogs carry each tag, in natural tag order.
///
/// A tag repeated on the same cog is counted once for that cog.
pub fn tag_counts(catalog: &[Cog]) -> Vec<TagCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for cog in catalog {
        let mut seen: Vec<&str> = Vec::with_capacity(cog.tags.len());
        for tag in cog.tags.iter().map(String::as_str) {
            if !seen.contains(&tag) {
                seen.push(tag);
                *counts.entry(tag).or_default() += 1;
            }
        }
    }

    let mut tags: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| {
            TagCount {
                tag: tag.to_string(),
                count,
            }
        })
        .collect();
    tags.sort_by(|a, b| natural_cmp_ignore_case(&a.tag, &b.tag).then_with(|| a.tag.cmp(&b.tag)));
    tags
}

/// The tags of a cog in natural order, as shown on its card.
pub fn sorted_tags(cog: &Cog) -> Vec<&str> {
    let mut tags: Vec<&str> = cog.tags.iter().map(String::as_str).collect();
    tags.sort_by(|a, b| natural_cmp_ignore_case(a, b));
    tags
}
