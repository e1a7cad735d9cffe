use cogindex_config::config::get_config;
use cogindex_operations::{load_catalog, query, CogResult, IndexSource, Page, RequestParams};
use cogindex_registry::{Cog, RepoCategory};
use nu_ansi_term::Color::{Blue, Cyan, Green, LightRed, Yellow};
use tabled::{
    builder::Builder,
    settings::{themes::BorderCorrection, Panel, Style},
};
use tracing::{debug, info};

use crate::utils::{display_settings, first_line, icon_or, Colored, Icons};

fn category_marker(cog: &Cog) -> String {
    match cog.repo.category {
        RepoCategory::Approved => {
            format!("{}", Colored(Green, icon_or(Icons::APPROVED, "+")))
        }
        RepoCategory::Unapproved => {
            format!("{}", Colored(Yellow, icon_or(Icons::UNAPPROVED, "!")))
        }
    }
}

fn print_cog(cog: &Cog) {
    let description = first_line(cog.display_description(), 80);
    info!(
        name = cog.name,
        repo = cog.repo.name,
        url = cog.repo.url,
        category = cog.repo.category.as_str(),
        authors = ?cog.author,
        tags = ?cog.tags,
        "[{}] {} ({}) {} {} - {}",
        category_marker(cog),
        Colored(Blue, &cog.name),
        Colored(Cyan, &cog.repo.name),
        icon_or(Icons::AUTHOR, "by"),
        Colored(LightRed, cog.author.join(", ")),
        description
    );
}

fn print_summary(page: &Page) {
    let settings = display_settings();
    if !settings.summary() {
        return;
    }

    if settings.icons() {
        let mut builder = Builder::new();
        builder.push_record([
            format!("{} Found", Icons::COG),
            format!(
                "{} (showing {})",
                Colored(Cyan, page.total),
                Colored(Green, page.items.len())
            ),
        ]);
        builder.push_record([
            format!("{} Page", Icons::PAGE),
            format!(
                "{} of {}",
                Colored(Cyan, page.page),
                Colored(Cyan, page.page_count)
            ),
        ]);

        let table = builder
            .build()
            .with(Panel::header("Search Results"))
            .with(Style::rounded())
            .with(BorderCorrection {})
            .to_string();

        info!("\n{table}");
    } else {
        info!(
            "Found {} cogs, page {} of {}",
            page.total, page.page, page.page_count
        );
    }
}

pub fn search_cogs(
    source: &IndexSource,
    params: &RequestParams,
    per_page: Option<usize>,
    json: bool,
) -> CogResult<()> {
    debug!(
        search = params.search,
        tag = params.tag,
        page = params.page,
        include_unapproved = params.include_unapproved,
        "searching cogs"
    );

    let per_page = per_page.unwrap_or_else(|| get_config().per_page());
    let catalog = load_catalog(source, params.include_unapproved)?;
    let page = query(&catalog, &params.to_query_options(per_page));

    if json {
        match serde_json::to_string_pretty(&page) {
            Ok(out) => println!("{out}"),
            Err(err) => tracing::error!("Failed to serialize page: {err}"),
        }
        return Ok(());
    }

    if page.items.is_empty() {
        info!("There are no cogs on this page.");
    }
    for cog in &page.items {
        print_cog(cog);
    }
    print_summary(&page);

    Ok(())
}
