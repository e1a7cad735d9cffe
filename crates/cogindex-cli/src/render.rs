//! HTML rendering of the cog index page.

use std::{
    fmt::{self, Display, Formatter},
    fs,
    path::Path,
};

use cogindex_config::config::get_config;
use cogindex_operations::{
    load_catalog, query, tags::sorted_tags, CogError, CogResult, ErrorContext, IndexSource,
    LinkOverrides, Page, RequestParams,
};
use cogindex_registry::{Cog, RepoCategory};
use cogindex_utils::html::{escape, escape_multiline};
use tracing::info;

const TITLE: &str = "Red Discord Bot - Cog Index";

const NAV_LINKS: [(&str, &str); 4] = [
    (
        "Installation",
        "https://docs.discord.red/en/stable/install_guides/index.html",
    ),
    ("Documentation", "https://docs.discord.red/en/stable/index.html"),
    ("Join Discord", "https://discord.gg/red"),
    (
        "Build Your Own Cog",
        "https://docs.discord.red/en/stable/guide_cog_creation.html",
    ),
];

const UNAPPROVED_WARNING: &str = "The content of unapproved repositories has not been vetted by \
                                  QA<br>Safety is not guaranteed. Use at your own risk";

const UNAPPROVED_DISCLAIMER: &str = "Unapproved repositories are provided by the community and \
                                     have not yet been inspected for security or tested for \
                                     stability. The Cog-Creators organization and Red's \
                                     contributors are not responsible for any damage caused by \
                                     3rd party cogs.";

const SCRIPT: &str = r#"document.addEventListener('click', (event) => {
  let match = event.target.closest('[href]');
  if (match) {
    match.classList.add('loading');
    window.location.href = match.getAttribute('href');
  }
  match = event.target.closest('[show-model]');
  if (match) {
    document.body.setAttribute('model', match.getAttribute('show-model'));
  }
  match = event.target.closest('[hide-model]');
  if (match) {
    document.body.setAttribute('model', '');
  }
});"#;

/// The full catalog page for one request.
pub struct CatalogPage<'a> {
    pub params: &'a RequestParams,
    pub page: &'a Page,
}

/// The page shown instead of a catalog when the index is unavailable.
pub struct ErrorPage<'a> {
    pub error: &'a CogError,
}

fn write_head(f: &mut Formatter<'_>) -> fmt::Result {
    writeln!(f, "<!DOCTYPE html>")?;
    writeln!(f, "<html>")?;
    writeln!(f, "<head>")?;
    writeln!(f, "<meta charset=\"utf-8\">")?;
    writeln!(f, "<title>{TITLE}</title>")?;
    writeln!(f, "<link rel=\"stylesheet\" type=\"text/css\" href=\"assets/style.mini.css\">")?;
    writeln!(
        f,
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">"
    )?;
    writeln!(f, "</head>")?;
    writeln!(f, "<body model=\"\">")?;
    writeln!(f, "<div class=\"nav top\">")?;
    writeln!(f, "<a id=\"logo\" href=\"/\">Red<t>Discord Bot - Cog Index</t></a>")?;
    for (label, href) in NAV_LINKS {
        writeln!(f, "<a class=\"nav-link\" href=\"{href}\">{label}</a>")?;
    }
    writeln!(f, "</div>")
}

fn write_tail(f: &mut Formatter<'_>) -> fmt::Result {
    writeln!(f, "<script>\n{SCRIPT}\n</script>")?;
    writeln!(f, "</body>")?;
    writeln!(f, "</html>")
}

impl CatalogPage<'_> {
    fn write_search(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let params = self.params;
        let scope = if params.tag.is_empty() {
            String::new()
        } else {
            format!(" {}", escape(&params.tag))
        };

        writeln!(f, "<div class=\"search\">")?;
        writeln!(f, "<form id=\"search\" method=\"get\">")?;
        writeln!(
            f,
            "<input type=\"text\" name=\"search\" placeholder=\"Search {}{scope} cogs...\" \
             value=\"{}\" />",
            self.page.total,
            escape(&params.search)
        )?;
        if params.include_unapproved {
            writeln!(f, "<input type=\"hidden\" name=\"ua\" value=\"1\" />")?;
        }
        if !params.tag.is_empty() {
            writeln!(
                f,
                "<input type=\"hidden\" name=\"filter_tag\" value=\"{}\" />",
                escape(&params.tag)
            )?;
        }
        writeln!(f, "<button type=\"submit\">Search</button>")?;
        writeln!(f, "</form>")?;
        writeln!(f, "</div>")?;

        if params.include_unapproved {
            writeln!(f, "<div class=\"ua-warning\">{UNAPPROVED_WARNING}</div>")?;
        }
        Ok(())
    }

    fn write_filters(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "<div class=\"filters\">")?;
        if self.params.include_unapproved {
            let href = self.params.url(&LinkOverrides {
                include_unapproved: Some(false),
                ..LinkOverrides::default()
            });
            writeln!(
                f,
                "<box class=\"active\" href=\"{}\">Include Unapproved</box>",
                escape(&href)
            )?;
        } else {
            writeln!(f, "<box show-model=\"uadisclaim\">Include Unapproved</box>")?;
        }
        writeln!(f, "</div>")
    }

    fn write_disclaimer(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let accept = self.params.url(&LinkOverrides {
            include_unapproved: Some(true),
            ..LinkOverrides::default()
        });
        writeln!(f, "<div class=\"model\" model=\"uadisclaim\">")?;
        writeln!(f, "<h>Warning: Use at your own risk!</h>")?;
        writeln!(f, "<t>{UNAPPROVED_DISCLAIMER}</t>")?;
        writeln!(
            f,
            "<f><button hide-model=\"true\">Nevermind</button><button class=\"right red\" \
             href=\"{}\">I understand and accept the risks</button></f>",
            escape(&accept)
        )?;
        writeln!(f, "</div>")
    }

    fn write_card(&self, f: &mut Formatter<'_>, cog: &Cog) -> fmt::Result {
        let repo = &cog.repo;
        let approval_class = match repo.category {
            RepoCategory::Approved => "approval active",
            RepoCategory::Unapproved => "approval",
        };

        writeln!(f, "<div>")?;
        write!(
            f,
            "<h>{}<tag class=\"{approval_class}\">{}</tag><authors>",
            escape(&cog.name),
            repo.category.display_name()
        )?;
        for author in &cog.author {
            write!(f, "<tag>@{}</tag>", escape(author))?;
        }
        writeln!(f, "</authors></h>")?;

        writeln!(
            f,
            "<t><i>{}</i></t>",
            escape_multiline(cog.display_description())
        )?;

        if !cog.end_user_data_statement.is_empty() {
            writeln!(
                f,
                "<t class=\"eud\">{}</t>",
                escape_multiline(&cog.end_user_data_statement)
            )?;
        }

        if !cog.permissions.is_empty() {
            writeln!(
                f,
                "<t><b>Required Permissions</b><l>{}</l></t>",
                escape(&cog.permissions.join(" "))
            )?;
        }

        if !cog.all_requirements().is_empty() {
            write!(f, "<t><b>Bot Version and Packages Used</b>")?;
            for requirement in cog.all_requirements() {
                write!(f, "<l>{}</l>", escape(requirement))?;
            }
            writeln!(f, "</t>")?;
        }

        writeln!(
            f,
            "<t><b>Installation commands</b><l>{}</l><l>{}</l></t>",
            escape(&repo.add_command()),
            escape(&cog.install_command())
        )?;

        write!(f, "<f>")?;
        for tag in sorted_tags(cog) {
            let href = self.params.url(&LinkOverrides {
                page: Some(1),
                tag: Some(tag),
                ..LinkOverrides::default()
            });
            write!(f, "<tag href=\"{}\">{}</tag>", escape(&href), escape(tag))?;
        }
        writeln!(
            f,
            "<a class=\"src-link\" href=\"{}\">View Repository</a></f>",
            escape(&repo.url)
        )?;
        writeln!(f, "</div>")
    }

    fn write_navigation(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let page = self.page;
        let hidden = |hide: bool| if hide { " hidden" } else { "" };

        let previous = self.params.url(&LinkOverrides {
            page: Some(page.page.saturating_sub(1)),
            ..LinkOverrides::default()
        });
        let next = self.params.url(&LinkOverrides {
            page: Some(page.page.saturating_add(1)),
            ..LinkOverrides::default()
        });

        writeln!(f, "<div class=\"nav bottom\">")?;
        writeln!(
            f,
            "<a class=\"left{}\" href=\"{}\">Previous</a>",
            hidden(!page.has_previous()),
            escape(&previous)
        )?;
        if page.page_count >= 1 {
            writeln!(f, "<page>Page {} of {}</page>", page.page, page.page_count)?;
        }
        writeln!(
            f,
            "<a class=\"right{}\" href=\"{}\">Next</a>",
            hidden(!page.has_next()),
            escape(&next)
        )?;
        writeln!(f, "</div>")
    }
}

impl Display for CatalogPage<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_head(f)?;
        self.write_search(f)?;
        self.write_filters(f)?;

        writeln!(f, "<div class=\"list\">")?;
        self.write_disclaimer(f)?;
        if self.page.items.is_empty() {
            writeln!(f, "<div><t><center>There are no cogs on this page.</center></t></div>")?;
        } else {
            for cog in &self.page.items {
                self.write_card(f, cog)?;
            }
        }
        writeln!(f, "</div>")?;

        self.write_navigation(f)?;
        write_tail(f)
    }
}

impl Display for ErrorPage<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_head(f)?;
        writeln!(f, "<div class=\"list\">")?;
        writeln!(
            f,
            "<div><t><center>The cog index is currently unavailable.</center></t><t><center>{}</center></t></div>",
            escape(&self.error.to_string())
        )?;
        writeln!(f, "</div>")?;
        write_tail(f)
    }
}

fn emit(html: &str, output: Option<&Path>) -> CogResult<()> {
    match output {
        Some(path) => {
            fs::write(path, html)
                .with_context(|| format!("writing page to {}", path.display()))?;
            info!(path = %path.display(), "Rendered page written to {}", path.display());
        }
        None => print!("{html}"),
    }
    Ok(())
}

/// Renders the page for `params`. When the index cannot be loaded an error
/// page is written instead and the error is still returned.
pub fn render_page(
    source: &IndexSource,
    params: &RequestParams,
    per_page: Option<usize>,
    output: Option<&Path>,
) -> CogResult<()> {
    let per_page = per_page.unwrap_or_else(|| get_config().per_page());

    let catalog = match load_catalog(source, params.include_unapproved) {
        Ok(catalog) => catalog,
        Err(err) if err.is_index_unavailable() => {
            let html = ErrorPage {
                error: &err,
            }
            .to_string();
            emit(&html, output)?;
            return Err(err);
        }
        Err(err) => return Err(err),
    };

    let page = query(&catalog, &params.to_query_options(per_page));
    let html = CatalogPage {
        params,
        page: &page,
    }
    .to_string();

    emit(&html, output)
}
