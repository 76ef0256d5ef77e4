//! Toolkit configuration.
//!
//! Every field has a default, so `{}` is a valid configuration document.
//!
//! ```ignore
//! let config = ToolkitConfig::from_json(r#"{"memoryPerNode": 64}"#)?;
//! let manager = ComponentManager::with_config(Document::new(), config);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default path prefix for component stylesheet links.
pub const DEFAULT_STYLESHEET_BASE: &str = "styles/components";

/// Estimated bytes per rendered node, used by manager stats.
pub const DEFAULT_MEMORY_PER_NODE: usize = 100;

/// Default age threshold for `cleanup_old_components` (5 minutes).
pub const DEFAULT_MAX_AGE_MS: u64 = 300_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolkitConfig {
    /// Fixed per-node weight for the memory estimate.
    pub memory_per_node: usize,
    /// Age used by `ComponentManager::cleanup_expired`.
    pub default_max_age_ms: u64,
    /// Prefix for `<link>` hrefs written into `head`.
    pub stylesheet_base: String,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            memory_per_node: DEFAULT_MEMORY_PER_NODE,
            default_max_age_ms: DEFAULT_MAX_AGE_MS,
            stylesheet_base: DEFAULT_STYLESHEET_BASE.to_string(),
        }
    }
}

impl ToolkitConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn default_max_age(&self) -> Duration {
        Duration::from_millis(self.default_max_age_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = ToolkitConfig::from_json("{}").unwrap();
        assert_eq!(config, ToolkitConfig::default());
        assert_eq!(config.default_max_age(), Duration::from_secs(300));
    }

    #[test]
    fn test_partial_override() {
        let config =
            ToolkitConfig::from_json(r#"{"memoryPerNode": 64, "stylesheetBase": "/css"}"#).unwrap();
        assert_eq!(config.memory_per_node, 64);
        assert_eq!(config.stylesheet_base, "/css");
        assert_eq!(config.default_max_age_ms, DEFAULT_MAX_AGE_MS);
    }
}
