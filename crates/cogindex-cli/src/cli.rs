use std::{num::NonZeroUsize, path::PathBuf};

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use cogindex_operations::RequestParams;

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    help_template = "{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}",
    arg_required_else_help = true
)]
pub struct Args {
    /// Set output verbosity
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress outputs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as json
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Provide custom config file
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Read the index from a local file instead of fetching it
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub index_file: Option<PathBuf>,

    /// Set proxy
    #[arg(required = false, long, short = 'P', global = true)]
    pub proxy: Option<String>,

    /// Set request headers
    #[arg(required = false, long, short = 'H', global = true)]
    pub header: Option<Vec<String>>,

    /// Set user agent
    #[arg(required = false, long, short = 'A', global = true)]
    pub user_agent: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

/// Filters shared by the listing commands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Search term
    #[arg(required = false)]
    pub term: Option<String>,

    /// Only show cogs with this tag
    #[arg(required = false, short, long)]
    pub tag: Option<String>,

    /// Page to show
    #[arg(required = false, short, long)]
    pub page: Option<String>,

    /// Include cogs from unapproved repositories
    #[arg(required = false, short, long)]
    pub unapproved: bool,

    /// Number of cogs per page
    #[arg(required = false, long)]
    pub per_page: Option<NonZeroUsize>,
}

impl FilterArgs {
    /// Sanitizes the filters the same way the web page sanitizes its query
    /// string.
    pub fn to_params(&self, include_unapproved: bool) -> RequestParams {
        RequestParams::from_raw(
            (self.unapproved || include_unapproved).then_some("1"),
            self.term.as_deref(),
            self.tag.as_deref(),
            self.page.as_deref(),
        )
    }

    pub fn per_page(&self) -> Option<usize> {
        self.per_page.map(NonZeroUsize::get)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the effective configuration to stdout
    Config,

    /// Generate default config
    #[clap(name = "defconfig")]
    DefConfig,

    /// Search cogs
    #[clap(name = "search", visible_alias = "s", visible_alias = "find")]
    Search {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Render the cog index page as HTML
    #[clap(name = "render")]
    Render {
        #[command(flatten)]
        filters: FilterArgs,

        /// Raw query string of a page request, e.g. `ua=1&p=2`
        #[arg(required = false, long, conflicts_with_all = ["term", "tag", "page", "unapproved"])]
        query: Option<String>,

        /// Write the page to a file instead of stdout
        #[arg(required = false, short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// List tags of visible cogs
    #[clap(name = "tags")]
    Tags {
        /// Include cogs from unapproved repositories
        #[arg(required = false, short, long)]
        unapproved: bool,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_filter_args_are_sanitized() {
        let args = Args::parse_from([
            "cogindex", "search", "music<script>", "--tag", "Fun!", "--page", "x2",
        ]);
        let Commands::Search {
            filters,
        } = args.command
        else {
            panic!("expected search");
        };

        let params = filters.to_params(false);
        assert_eq!(params.search, "musicscript");
        assert_eq!(params.tag, "fun");
        assert_eq!(params.page, 2);
        assert!(!params.include_unapproved);
        assert!(filters.to_params(true).include_unapproved);
        assert_eq!(filters.per_page(), None);
    }

    #[test]
    fn test_per_page_must_be_positive() {
        let args = Args::try_parse_from(["cogindex", "search", "--per-page", "10"]).unwrap();
        let Commands::Search {
            filters,
        } = args.command
        else {
            panic!("expected search");
        };
        assert_eq!(filters.per_page(), Some(10));

        assert!(Args::try_parse_from(["cogindex", "search", "--per-page", "0"]).is_err());
        assert!(Args::try_parse_from(["cogindex", "render", "--per-page", "0"]).is_err());
    }
}
