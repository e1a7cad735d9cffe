use std::{env, time::Duration};

use clap::Parser;
use cli::{Args, Commands};
use cogindex_config::{
    config::{self, generate_default_config, get_config, set_config_path, Config, CONFIG_PATH},
    error::ConfigError,
};
use cogindex_operations::{CogError, CogResult, ErrorContext, IndexSource, RequestParams};
use cogindex_registry::http_client::configure_http_client;
use logging::setup_logging;
use render::render_page;
use search::search_cogs;
use tags::list_tags;
use tracing::{info, warn};
use ureq::{
    http::{HeaderName, HeaderValue},
    Proxy,
};

mod cli;
mod logging;
mod render;
mod search;
mod tags;
mod utils;

fn parse_headers(headers: &[String]) -> ureq::http::HeaderMap {
    headers
        .iter()
        .filter_map(|header| {
            let (key, value) = header.split_once(':')?;
            let key = HeaderName::try_from(key.trim()).ok()?;
            let value = HeaderValue::try_from(value.trim()).ok()?;
            Some((key, value))
        })
        .collect()
}

fn configure_http(args: &Args, config: &Config) -> CogResult<()> {
    let proxy = match args.proxy.as_deref() {
        Some(proxy) => {
            Some(Proxy::new(proxy).map_err(|err| {
                CogError::Config(ConfigError::InvalidProxy {
                    proxy: proxy.to_string(),
                    reason: err.to_string(),
                })
            })?)
        }
        None => None,
    };

    let user_agent = args
        .user_agent
        .clone()
        .or_else(|| config.user_agent.clone());
    let headers = args.header.as_deref().map(parse_headers);
    let timeout = Duration::from_secs(config.timeout());

    configure_http_client(|client| {
        if proxy.is_some() {
            client.proxy = proxy;
        }
        if user_agent.is_some() {
            client.user_agent = user_agent;
        }
        if headers.is_some() {
            client.headers = headers;
        }
        client.timeout = Some(timeout);
    });

    Ok(())
}

fn print_config() -> CogResult<()> {
    let config_path = CONFIG_PATH
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .clone();
    if !config_path.exists() {
        warn!(
            "Config file {} not found, showing defaults",
            config_path.display()
        );
    }

    let document = get_config().to_annotated_document()?;
    info!("{document}");
    Ok(())
}

fn handle_cli() -> CogResult<()> {
    let args = Args::parse();

    setup_logging(&args);

    if args.no_color {
        utils::disable_color();
    }

    if let Some(ref path) = args.config {
        let path = if path.is_absolute() {
            path.clone()
        } else {
            env::current_dir()
                .with_context(|| "retrieving current directory".into())?
                .join(path)
        };
        set_config_path(path);
    }

    if let Commands::DefConfig = args.command {
        generate_default_config()?;
        return Ok(());
    }

    config::init()?;
    let config = get_config();
    configure_http(&args, &config)?;

    let source = IndexSource::from_config(&config, args.index_file.clone());

    match args.command {
        Commands::Config => print_config()?,
        Commands::Search {
            filters,
        } => {
            let params = filters.to_params(config.include_unapproved());
            search_cogs(&source, &params, filters.per_page(), args.json)?;
        }
        Commands::Render {
            filters,
            query,
            output,
        } => {
            let params = match query {
                Some(query) => RequestParams::from_query(&query),
                None => filters.to_params(config.include_unapproved()),
            };
            render_page(&source, &params, filters.per_page(), output.as_deref())?;
        }
        Commands::Tags {
            unapproved,
        } => {
            list_tags(
                &source,
                unapproved || config.include_unapproved(),
                args.json,
            )?;
        }
        Commands::DefConfig => {}
    }

    Ok(())
}

fn main() -> miette::Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    handle_cli()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_headers() {
        let headers = parse_headers(&[
            "Accept: application/json".to_string(),
            "X-Token:abc".to_string(),
            "malformed".to_string(),
        ]);

        assert_eq!(headers.len(), 2);
        assert_eq!(headers["accept"], "application/json");
        assert_eq!(headers["x-token"], "abc");
    }
}
