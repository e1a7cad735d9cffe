use std::{env, path::PathBuf};

/// Returns the user's home directory from `$HOME`.
///
/// Falls back to the current directory when `$HOME` is unset.
pub fn home_dir() -> PathBuf {
    env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Returns the user's config directory following the XDG Base Directory
/// Specification.
///
/// This checks `XDG_CONFIG_HOME` and defaults to `$HOME/.config`.
pub fn xdg_config_home() -> PathBuf {
    env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}
