use std::{
    fmt::Display,
    sync::{LazyLock, PoisonError, RwLock},
};

use cogindex_config::{config::get_config, display::DisplaySettings};
use nu_ansi_term::Color;

pub struct Icons;

impl Icons {
    pub const APPROVED: &str = "✓";
    pub const AUTHOR: &str = "👤";
    pub const COG: &str = "⚙";
    pub const PAGE: &str = "📄";
    pub const TAG: &str = "🏷";
    pub const UNAPPROVED: &str = "⚠";
}

pub fn icon_or<'a>(icon: &'a str, fallback: &'a str) -> &'a str {
    if get_config().display().icons() {
        icon
    } else {
        fallback
    }
}

pub fn display_settings() -> DisplaySettings {
    get_config().display()
}

pub static COLOR: LazyLock<RwLock<bool>> = LazyLock::new(|| RwLock::new(true));

pub fn disable_color() {
    *COLOR.write().unwrap_or_else(PoisonError::into_inner) = false;
}

pub struct Colored<T: Display>(pub Color, pub T);

impl<T: Display> Display for Colored<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let color = COLOR.read().unwrap_or_else(PoisonError::into_inner);
        if *color {
            write!(f, "{}", self.0.prefix())?;
            self.1.fmt(f)?;
            write!(f, "{}", self.0.suffix())
        } else {
            self.1.fmt(f)
        }
    }
}

/// First line of `text`, cut to `max` characters.
pub fn first_line(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or_default().trim();
    if line.chars().count() > max {
        let cut: String = line.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("Plays music\nand more", 80), "Plays music");
        assert_eq!(first_line("abcdef", 4), "abc…");
        assert_eq!(first_line("", 10), "");
    }
}
