use documented::{Documented, DocumentedFields};
use serde::{Deserialize, Serialize};

/// Display settings for CLI output formatting
#[derive(Clone, Debug, Default, Deserialize, Serialize, Documented, DocumentedFields)]
pub struct DisplaySettings {
    /// Show unicode icons/symbols in output
    /// Default: true
    pub icons: Option<bool>,

    /// Print the summary table after search results
    /// Default: true
    pub summary: Option<bool>,
}

impl DisplaySettings {
    pub fn icons(&self) -> bool {
        self.icons.unwrap_or(true)
    }

    pub fn summary(&self) -> bool {
        self.summary.unwrap_or(true)
    }
}
