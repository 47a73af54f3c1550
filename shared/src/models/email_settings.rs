//! Email Settings Model

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Global and per-category email notification toggles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailSettings {
    /// Master switch; when false no notification is ever sent
    pub enabled: bool,
    /// Per-category overrides keyed by notification category; a missing
    /// category defaults to enabled
    #[serde(default)]
    pub categories: HashMap<String, bool>,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            categories: HashMap::new(),
        }
    }
}

impl EmailSettings {
    /// Whether notifications for the given category should be sent
    pub fn category_enabled(&self, category: &str) -> bool {
        self.enabled && self.categories.get(category).copied().unwrap_or(true)
    }
}
