use std::{
    fs,
    path::PathBuf,
    sync::{LazyLock, PoisonError, RwLock},
};

use cogindex_utils::path::xdg_config_home;
use documented::{Documented, DocumentedFields};
use serde::{Deserialize, Serialize};
use toml_edit::DocumentMut;
use tracing::info;
use url::Url;

use crate::{
    annotations::annotate_toml_table,
    display::DisplaySettings,
    error::{ConfigError, Result},
};

pub const DEFAULT_INDEX_URL: &str =
    "https://raw.githubusercontent.com/Cog-Creators/Red-Index/master/index";
pub const DEFAULT_PER_PAGE: usize = 25;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application's configuration
#[derive(Clone, Debug, Deserialize, Serialize, Documented, DocumentedFields)]
pub struct Config {
    /// Base URL of the index directory; `1-min.json` is fetched from it.
    /// Overridden by the RED_INDEX_URL environment variable.
    /// Default: https://raw.githubusercontent.com/Cog-Creators/Red-Index/master/index
    pub index_url: Option<String>,

    /// Number of cogs shown on each page.
    /// Default: 25
    pub per_page: Option<usize>,

    /// Include cogs from unapproved repositories unless told otherwise.
    /// Default: false
    pub include_unapproved: Option<bool>,

    /// Timeout in seconds for fetching the index.
    /// Default: 30
    pub timeout: Option<u64>,

    /// User agent sent when fetching the index.
    /// Default: cogindex/<version>
    pub user_agent: Option<String>,

    /// Terminal output settings.
    pub display: Option<DisplaySettings>,
}

pub static CONFIG: LazyLock<RwLock<Option<Config>>> = LazyLock::new(|| RwLock::new(None));

pub static CONFIG_PATH: LazyLock<RwLock<PathBuf>> = LazyLock::new(|| {
    RwLock::new(match std::env::var("COGINDEX_CONFIG") {
        Ok(path_str) => PathBuf::from(path_str),
        Err(_) => xdg_config_home().join("cogindex").join("config.toml"),
    })
});

/// Points configuration loading at `path` instead of the default location.
pub fn set_config_path(path: PathBuf) {
    *CONFIG_PATH.write().unwrap_or_else(PoisonError::into_inner) = path;
}

pub fn init() -> Result<()> {
    let config = Config::new()?;
    let mut global_config = CONFIG.write().unwrap_or_else(PoisonError::into_inner);
    *global_config = Some(config);
    Ok(())
}

pub fn get_config() -> Config {
    {
        let config_guard = CONFIG.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(config) = config_guard.as_ref() {
            return config.clone();
        }
    }

    let mut config_guard = CONFIG.write().unwrap_or_else(PoisonError::into_inner);
    config_guard
        .get_or_insert_with(Config::default_config)
        .clone()
}

impl Config {
    /// Built-in defaults, without environment overrides.
    pub fn default_config() -> Self {
        Self {
            index_url: Some(DEFAULT_INDEX_URL.to_string()),
            per_page: Some(DEFAULT_PER_PAGE),
            include_unapproved: Some(false),
            timeout: Some(DEFAULT_TIMEOUT_SECS),
            user_agent: Some(default_user_agent()),
            display: Some(DisplaySettings {
                icons: Some(true),
                summary: Some(true),
            }),
        }
    }

    /// Creates a new configuration by loading it from the configuration file.
    /// If the configuration file is not found, it uses the default configuration.
    pub fn new() -> Result<Self> {
        let config_path = CONFIG_PATH.read().unwrap_or_else(PoisonError::into_inner).to_path_buf();

        let mut config = match fs::read_to_string(&config_path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default_config(),
            Err(err) => return Err(ConfigError::IoError(err)),
        };

        config.resolve()?;

        Ok(config)
    }

    /// Fills in defaults, applies environment overrides and validates values.
    pub fn resolve(&mut self) -> Result<()> {
        self.apply_env_overrides();

        let index_url = self
            .index_url
            .get_or_insert_with(|| DEFAULT_INDEX_URL.to_string());
        let parsed = Url::parse(index_url).map_err(|err| {
            ConfigError::InvalidIndexUrl {
                url: index_url.clone(),
                reason: err.to_string(),
            }
        })?;
        if !matches!(parsed.scheme(), "http" | "https" | "file") {
            return Err(ConfigError::InvalidIndexUrl {
                url: index_url.clone(),
                reason: format!("unsupported scheme `{}`", parsed.scheme()),
            });
        }

        if *self.per_page.get_or_insert(DEFAULT_PER_PAGE) == 0 {
            return Err(ConfigError::InvalidPerPage);
        }

        self.include_unapproved.get_or_insert(false);
        self.timeout.get_or_insert(DEFAULT_TIMEOUT_SECS);
        self.user_agent.get_or_insert_with(default_user_agent);
        self.display.get_or_insert_with(DisplaySettings::default);

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("RED_INDEX_URL") {
            if !url.is_empty() {
                self.index_url = Some(url);
            }
        }
    }

    pub fn index_url(&self) -> &str {
        self.index_url.as_deref().unwrap_or(DEFAULT_INDEX_URL)
    }

    /// URL of the minified index document.
    pub fn index_document_url(&self) -> String {
        format!("{}/1-min.json", self.index_url().trim_end_matches('/'))
    }

    pub fn per_page(&self) -> usize {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE)
    }

    pub fn include_unapproved(&self) -> bool {
        self.include_unapproved.unwrap_or(false)
    }

    pub fn timeout(&self) -> u64 {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    pub fn display(&self) -> DisplaySettings {
        self.display.clone().unwrap_or_default()
    }

    pub fn to_annotated_document(&self) -> Result<DocumentMut> {
        let toml_string = toml::to_string_pretty(self)?;
        let mut doc = toml_string.parse::<DocumentMut>()?;

        annotate_toml_table::<Config>(doc.as_table_mut(), true)?;

        if let Some(display_table) = doc.get_mut("display").and_then(|i| i.as_table_mut()) {
            annotate_toml_table::<DisplaySettings>(display_table, false)?;
        }

        Ok(doc)
    }
}

fn default_user_agent() -> String {
    format!("cogindex/{}", env!("CARGO_PKG_VERSION"))
}

pub fn generate_default_config() -> Result<PathBuf> {
    let config_path = CONFIG_PATH.read().unwrap_or_else(PoisonError::into_inner).to_path_buf();

    if config_path.exists() {
        return Err(ConfigError::ConfigAlreadyExists);
    }

    let annotated_doc = Config::default_config().to_annotated_document()?;

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&config_path, annotated_doc.to_string())?;
    info!(
        "Default configuration file generated with documentation at: {}",
        config_path.display()
    );
    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;
    use crate::test_utils::with_env;

    #[test]
    #[serial]
    fn test_default_config_creation() {
        with_env(vec![("RED_INDEX_URL", None)], || {
            let config = Config::default_config();

            assert_eq!(config.index_url(), DEFAULT_INDEX_URL);
            assert_eq!(config.per_page(), 25);
            assert!(!config.include_unapproved());
            assert_eq!(config.timeout(), 30);
            assert!(config.user_agent.unwrap().starts_with("cogindex/"));
        });
    }

    #[test]
    #[serial]
    fn test_index_url_env_override() {
        with_env(vec![("RED_INDEX_URL", Some("https://mirror.example/index"))], || {
            let mut config = Config::default_config();
            assert_eq!(config.index_url(), DEFAULT_INDEX_URL);

            config.resolve().unwrap();
            assert_eq!(config.index_url(), "https://mirror.example/index");
            assert_eq!(
                config.index_document_url(),
                "https://mirror.example/index/1-min.json"
            );
        });
    }

    #[test]
    #[serial]
    fn test_empty_env_override_is_ignored() {
        with_env(vec![("RED_INDEX_URL", Some(""))], || {
            let mut config = Config::default_config();
            config.resolve().unwrap();
            assert_eq!(config.index_url(), DEFAULT_INDEX_URL);
        });
    }

    #[test]
    fn test_index_document_url_trailing_slash() {
        let mut config = Config::default_config();
        config.index_url = Some("https://example.com/index/".into());
        assert_eq!(
            config.index_document_url(),
            "https://example.com/index/1-min.json"
        );
    }

    #[test]
    #[serial]
    fn test_resolve_sets_defaults() {
        with_env(vec![("RED_INDEX_URL", None)], || {
            let mut config: Config = toml::from_str("").unwrap();
            config.resolve().unwrap();

            assert_eq!(config.index_url.as_deref(), Some(DEFAULT_INDEX_URL));
            assert_eq!(config.per_page, Some(25));
            assert_eq!(config.include_unapproved, Some(false));
            assert_eq!(config.timeout, Some(30));
            assert!(config.display.is_some());
        });
    }

    #[test]
    #[serial]
    fn test_resolve_rejects_zero_per_page() {
        with_env(vec![("RED_INDEX_URL", None)], || {
            let mut config: Config = toml::from_str("per_page = 0").unwrap();
            assert!(matches!(config.resolve(), Err(ConfigError::InvalidPerPage)));
        });
    }

    #[test]
    #[serial]
    fn test_resolve_rejects_bad_index_url() {
        with_env(vec![("RED_INDEX_URL", None)], || {
            let mut config: Config = toml::from_str("index_url = \"not a url\"").unwrap();
            assert!(matches!(
                config.resolve(),
                Err(ConfigError::InvalidIndexUrl { .. })
            ));

            let mut config: Config = toml::from_str("index_url = \"ftp://example.com\"").unwrap();
            assert!(matches!(
                config.resolve(),
                Err(ConfigError::InvalidIndexUrl { .. })
            ));
        });
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default_config();
        let serialized = toml::to_string(&config);
        assert!(serialized.is_ok());

        let deserialized: std::result::Result<Config, _> = toml::from_str(&serialized.unwrap());
        assert!(deserialized.is_ok());
    }

    #[test]
    #[serial]
    fn test_generate_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        {
            let mut config_path = CONFIG_PATH.write().unwrap();
            *config_path = path.clone();
        }

        let written = generate_default_config().unwrap();
        assert_eq!(written, path);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("per_page = 25"));
        assert!(content.contains("# Number of cogs shown on each page."));

        assert!(matches!(
            generate_default_config(),
            Err(ConfigError::ConfigAlreadyExists)
        ));
    }

    #[test]
    #[serial]
    fn test_generate_default_config_ignores_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        {
            let mut config_path = CONFIG_PATH.write().unwrap();
            *config_path = path.clone();
        }

        with_env(vec![("RED_INDEX_URL", Some("https://mirror.example/index"))], || {
            generate_default_config().unwrap();

            let content = fs::read_to_string(&path).unwrap();
            assert!(content.contains(DEFAULT_INDEX_URL));
            assert!(!content.contains("mirror.example"));

            let config = Config::new().unwrap();
            assert_eq!(config.index_url(), "https://mirror.example/index");
        });
    }

    #[test]
    #[serial]
    fn test_new_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut config_path = CONFIG_PATH.write().unwrap();
            *config_path = dir.path().join("missing.toml");
        }

        with_env(vec![("RED_INDEX_URL", None)], || {
            let config = Config::new().unwrap();
            assert_eq!(config.per_page(), 25);
        });
    }

    #[test]
    #[serial]
    fn test_new_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "per_page = 10\ninclude_unapproved = true\n").unwrap();
        {
            let mut config_path = CONFIG_PATH.write().unwrap();
            *config_path = path;
        }

        with_env(vec![("RED_INDEX_URL", None)], || {
            let config = Config::new().unwrap();
            assert_eq!(config.per_page(), 10);
            assert!(config.include_unapproved());
        });
    }
}
