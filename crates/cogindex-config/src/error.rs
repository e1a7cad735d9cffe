use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("TOML serialization error: {0}")]
    #[diagnostic(
        code(cogindex_config::toml_serialize),
        help("Check your configuration structure for invalid values")
    )]
    TomlSerError(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(cogindex_config::toml_deserialize),
        help("Check your config.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error("Configuration file already exists")]
    #[diagnostic(
        code(cogindex_config::already_exists),
        help("Remove the existing config file or use a different location")
    )]
    ConfigAlreadyExists,

    #[error("Invalid index URL `{url}`: {reason}")]
    #[diagnostic(
        code(cogindex_config::invalid_index_url),
        help("The index URL must be an absolute http(s) or file URL pointing at the index directory")
    )]
    InvalidIndexUrl { url: String, reason: String },

    #[error("Page size must be greater than zero")]
    #[diagnostic(
        code(cogindex_config::invalid_per_page),
        help("Set `per_page` to a positive number or remove it to use the default")
    )]
    InvalidPerPage,

    #[error("Invalid proxy `{proxy}`: {reason}")]
    #[diagnostic(
        code(cogindex_config::invalid_proxy),
        help("Use a proxy URL such as http://host:port or socks5://host:port")
    )]
    InvalidProxy { proxy: String, reason: String },

    #[error("IO error: {0}")]
    #[diagnostic(code(cogindex_config::io))]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    #[diagnostic(code(cogindex_config::toml))]
    Toml(#[from] toml_edit::TomlError),

    #[error("Encountered unexpected TOML item: {0}")]
    #[diagnostic(code(cogindex_config::unexpected_toml_item))]
    UnexpectedTomlItem(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ConfigError::InvalidPerPage.to_string(),
            "Page size must be greater than zero"
        );

        let err = ConfigError::InvalidIndexUrl {
            url: "nope".into(),
            reason: "relative URL without a base".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid index URL `nope`: relative URL without a base"
        );
    }
}
