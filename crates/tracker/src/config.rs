//! Category set and quota configuration for the tracker.

use muster_common::normalized;
use serde::{Deserialize, Serialize};

/// A resource category that must reach the confirmation quota.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Short code players type in chat (`!feito <code>`)
    pub code: String,

    /// Display label used in player-facing messages
    pub label: String,
}

impl Category {
    pub fn new(code: impl AsRef<str>, label: impl Into<String>) -> Self {
        Self {
            code: normalized(code.as_ref()),
            label: label.into(),
        }
    }
}

/// The fixed category set and the shared per-category quota.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub categories: Vec<Category>,

    /// Distinct fulfiller confirmations required per category
    #[serde(default = "TrackerConfig::default_quota")]
    pub quota: u32,
}

impl TrackerConfig {
    fn default_quota() -> u32 {
        3
    }

    /// Look up a category by code. Both sides are normalized, so the match
    /// works whether the code came from chat or straight out of a config
    /// file that spelled it with capitals.
    pub fn category(&self, code: &str) -> Option<&Category> {
        let code = normalized(code);
        self.categories.iter().find(|c| normalized(&c.code) == code)
    }

    pub fn is_known(&self, code: &str) -> bool {
        self.category(code).is_some()
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            categories: vec![
                Category::new("muni", "Munition"),
                Category::new("fuel", "Fuel"),
                Category::new("manpower", "Manpower"),
            ],
            quota: Self::default_quota(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_three_categories() {
        let config = TrackerConfig::default();
        assert_eq!(config.categories.len(), 3);
        assert_eq!(config.quota, 3);
        assert!(config.is_known("muni"));
        assert!(config.is_known("fuel"));
        assert!(config.is_known("manpower"));
    }

    #[test]
    fn category_lookup_normalizes() {
        let config = TrackerConfig::default();
        assert!(config.is_known("  MUNI "));
        assert_eq!(config.category("Fuel").unwrap().label, "Fuel");
        assert!(!config.is_known("medkits"));
    }

    #[test]
    fn category_codes_normalize_on_construction() {
        let category = Category::new(" Muni ", "Munição");
        assert_eq!(category.code, "muni");
    }
}
