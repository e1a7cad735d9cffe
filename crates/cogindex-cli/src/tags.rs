use cogindex_operations::{load_catalog, tags::tag_counts, CogResult, IndexSource};
use nu_ansi_term::Color::{Blue, Cyan};
use tracing::info;

use crate::utils::{icon_or, Colored, Icons};

pub fn list_tags(source: &IndexSource, include_unapproved: bool, json: bool) -> CogResult<()> {
    let catalog = load_catalog(source, include_unapproved)?;
    let tags = tag_counts(&catalog);

    if json {
        match serde_json::to_string_pretty(&tags) {
            Ok(out) => println!("{out}"),
            Err(err) => tracing::error!("Failed to serialize tags: {err}"),
        }
        return Ok(());
    }

    for entry in &tags {
        info!(
            tag = entry.tag,
            count = entry.count,
            "{} {} ({})",
            icon_or(Icons::TAG, "#"),
            Colored(Blue, &entry.tag),
            Colored(Cyan, entry.count)
        );
    }
    info!("{} tags across {} cogs", tags.len(), catalog.len());

    Ok(())
}
