//! Inbound chat events.

use crate::types::PlayerId;
use serde::{Deserialize, Serialize};

/// A chat line forwarded by the game-server admin tool.
///
/// Only `player_id` and `content` are required; the rest is whatever
/// metadata the admin tool attaches to its log stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEvent {
    /// Player who sent the chat line
    pub player_id: PlayerId,

    /// Raw chat content
    pub content: String,

    /// Display name of the sender, if the admin tool provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,

    /// Which game server the line came from (multi-server installs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    /// Timestamp (Unix millis), if the admin tool provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

impl ChatEvent {
    pub fn new(player_id: impl Into<PlayerId>, content: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            content: content.into(),
            player_name: None,
            server: None,
            timestamp: None,
        }
    }

    pub fn on_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }
}
