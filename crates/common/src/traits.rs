//! Collaborator traits for the dispatch flow.
//!
//! These traits live in `muster-common` so that both the dispatcher and the
//! admin-API client can reference them without circular dependencies. Both
//! collaborators are deliberately infallible at the trait boundary: lookup
//! failures collapse to `None`/empty and delivery failures are the
//! implementation's problem to log, never the caller's to propagate.

use crate::types::{PlayerId, TeamId};
use async_trait::async_trait;

/// What the roster knows about a player at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerProfile {
    /// Role name as reported by the server, normalized
    pub role: Option<String>,

    /// Team the player is on
    pub team: Option<TeamId>,
}

impl PlayerProfile {
    pub fn new(role: impl AsRef<str>, team: impl AsRef<str>) -> Self {
        Self {
            role: Some(crate::types::normalized(role.as_ref())),
            team: Some(TeamId::new(team)),
        }
    }
}

/// Player role/team lookup against the game server.
#[async_trait]
pub trait Roster: Send + Sync {
    /// Resolve a player's role and team. Either field may come back `None`
    /// when the server cannot be reached or does not know the player.
    async fn identify(&self, player: &PlayerId) -> PlayerProfile;

    /// List the players on `team` holding `role`. Empty on lookup failure.
    async fn list_fulfillers(&self, team: &TeamId, role: &str) -> Vec<PlayerId>;
}

/// Direct-message delivery to a player.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_to_player(&self, player: &PlayerId, text: &str);
}
