//! Configuration for the dispatcher.

use crate::messages::Language;
use muster_common::{MusterError, Result};
use muster_tracker::{Category, TrackerConfig};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Main dispatcher configuration, loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Language of all player-facing messages
    #[serde(default)]
    pub language: Language,

    /// Chat trigger for opening a supply request
    #[serde(default = "AppConfig::default_request_command")]
    pub request_command: String,

    /// Chat trigger for confirming a category
    #[serde(default = "AppConfig::default_confirm_command")]
    pub confirm_command: String,

    /// Role permitted to open requests
    #[serde(default = "AppConfig::default_requester_role")]
    pub requester_role: String,

    /// Role permitted to confirm categories
    #[serde(default = "AppConfig::default_fulfiller_role")]
    pub fulfiller_role: String,

    /// Resource categories tracked per request
    #[serde(default = "AppConfig::default_categories")]
    pub categories: Vec<Category>,

    /// Distinct confirmations required per category
    #[serde(default = "AppConfig::default_quota")]
    pub quota: u32,

    /// Seconds a player must wait between request commands
    #[serde(default = "AppConfig::default_cooldown_secs")]
    pub cooldown_secs: u64,

    /// Game servers the dispatcher acts on. Empty = all servers.
    #[serde(default)]
    pub enabled_servers: Vec<String>,

    /// Admin API endpoint the roster/notifier client talks to
    #[serde(default)]
    pub admin_api: AdminApiConfig,
}

impl AppConfig {
    fn default_request_command() -> String {
        "!nodos".to_string()
    }

    fn default_confirm_command() -> String {
        "!feito".to_string()
    }

    fn default_requester_role() -> String {
        "commander".to_string()
    }

    fn default_fulfiller_role() -> String {
        "engineer".to_string()
    }

    fn default_categories() -> Vec<Category> {
        TrackerConfig::default().categories
    }

    fn default_quota() -> u32 {
        3
    }

    fn default_cooldown_secs() -> u64 {
        60
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| MusterError::Config(format!("{}: {e}", path.display())))?;

        if config.admin_api.api_key.is_some() {
            warn!(
                "Admin API key found in config file '{}'. For better security, \
                 use the CRCON_API_KEY environment variable instead.",
                path.display()
            );
        }

        Ok(config)
    }

    /// The category/quota subset handed to the tracker.
    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            categories: self.categories.clone(),
            quota: self.quota,
        }
    }

    /// Whether events from `server` should be acted on. With a non-empty
    /// filter, events that do not carry a server tag are ignored.
    pub fn server_enabled(&self, server: Option<&str>) -> bool {
        if self.enabled_servers.is_empty() {
            return true;
        }
        server.is_some_and(|s| self.enabled_servers.iter().any(|e| e == s))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            request_command: Self::default_request_command(),
            confirm_command: Self::default_confirm_command(),
            requester_role: Self::default_requester_role(),
            fulfiller_role: Self::default_fulfiller_role(),
            categories: Self::default_categories(),
            quota: Self::default_quota(),
            cooldown_secs: Self::default_cooldown_secs(),
            enabled_servers: Vec::new(),
            admin_api: AdminApiConfig::default(),
        }
    }
}

/// Where to reach the game-server admin API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminApiConfig {
    #[serde(default = "AdminApiConfig::default_base_url")]
    pub base_url: String,

    /// Bearer key for the admin API. Prefer the CRCON_API_KEY environment
    /// variable over writing this into the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl AdminApiConfig {
    fn default_base_url() -> String {
        "http://localhost:8010".to_string()
    }

    /// Resolve the API key: explicit config first, CRCON_API_KEY second.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }
        std::env::var("CRCON_API_KEY").ok()
    }
}

impl Default for AdminApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            api_key: None,
        }
    }
}
