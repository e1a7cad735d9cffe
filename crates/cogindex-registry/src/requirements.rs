//! Derived requirement strings.
//!
//! Every cog exposes a single human-readable list of what it needs: the
//! Python interpreter, the bot version range and its declared dependencies.

/// Bot version that the index uses to mean "no bound".
pub const UNSET_BOT_VERSION: &str = "0.0.0";

/// Normalizes a raw bot version bound, mapping `"0.0.0"` to `""`.
pub fn normalize_bot_version(raw: String) -> String {
    if raw == UNSET_BOT_VERSION {
        String::new()
    } else {
        raw
    }
}

/// Builds the ordered requirement list for a cog.
///
/// The order is: interpreter requirement, bot requirement(s), then the
/// declared requirements as given. Equal non-empty bot bounds collapse into a
/// single `Bot==` entry; otherwise the lower bound precedes the upper bound.
///
/// Bot versions are taken as-is; callers normalize `"0.0.0"` first with
/// [`normalize_bot_version`].
///
/// # Example
///
/// ```
/// use cogindex_registry::all_requirements;
///
/// let reqs = all_requirements("1.0.0", "2.0.0", "3.9.1", &["aiohttp".to_string()]);
/// assert_eq!(reqs, vec!["Python>=3.9.1", "Bot>=1.0.0", "Bot<=2.0.0", "aiohttp"]);
/// ```
pub fn all_requirements(
    min_bot_version: &str,
    max_bot_version: &str,
    min_python_version: &str,
    declared: &[String],
) -> Vec<String> {
    let mut requirements = Vec::with_capacity(declared.len() + 3);

    if !min_python_version.is_empty() {
        requirements.push(format!("Python>={min_python_version}"));
    }

    if !min_bot_version.is_empty() && min_bot_version == max_bot_version {
        requirements.push(format!("Bot=={min_bot_version}"));
    } else {
        if !min_bot_version.is_empty() {
            requirements.push(format!("Bot>={min_bot_version}"));
        }
        if !max_bot_version.is_empty() {
            requirements.push(format!("Bot<={max_bot_version}"));
        }
    }

    requirements.extend(declared.iter().cloned());
    requirements
}
