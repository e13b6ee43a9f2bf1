use async_trait::async_trait;
use muster_common::{
    normalized, MusterError, Notifier, PlayerId, PlayerProfile, Result, Roster, TeamId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// The admin API wraps every payload in `{"result": ...}`.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    result: T,
}

/// Bulk player listing, keyed by player id.
#[derive(Debug, Default, Deserialize)]
pub struct DetailedPlayers {
    #[serde(default)]
    pub players: HashMap<String, DetailedPlayer>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DetailedPlayer {
    #[serde(default)]
    pub player_id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
}

/// Single-player fallback lookup.
#[derive(Debug, Default, Deserialize)]
pub struct PlayerInfo {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
}

#[derive(Serialize)]
struct MessageBody<'a> {
    player_id: &'a str,
    message: &'a str,
}

/// HTTP client for a CRCON-compatible admin API.
pub struct RconClient {
    base_url: String,
    api_key: Option<String>,
    http_client: reqwest::Client,
}

impl RconClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            http_client: reqwest::Client::new(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/api/{}", self.base_url, path);

        let mut request = self.http_client.get(&url).query(query);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MusterError::AdminApi(format!("{path} request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MusterError::AdminApi(format!(
                "{path} returned {status}: {body}"
            )));
        }

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| MusterError::AdminApi(format!("{path} decode failed: {e}")))?;

        Ok(envelope.result)
    }

    /// Bulk listing of everyone on the server with role/team detail.
    pub async fn detailed_players(&self) -> Result<DetailedPlayers> {
        self.get_json("get_detailed_players", &[]).await
    }

    /// Per-player fallback when the bulk listing misses someone.
    pub async fn player_info(&self, player: &PlayerId) -> Result<PlayerInfo> {
        self.get_json("get_player_profile", &[("player_id", player.as_str())])
            .await
    }

    /// Direct-message a player in game.
    pub async fn message_player(&self, player: &PlayerId, text: &str) -> Result<()> {
        let url = format!("{}/api/message_player", self.base_url);
        let body = MessageBody {
            player_id: player.as_str(),
            message: text,
        };

        let mut request = self.http_client.post(&url).json(&body);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MusterError::AdminApi(format!("message_player failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MusterError::AdminApi(format!(
                "message_player returned {status}: {body}"
            )));
        }

        Ok(())
    }
}

fn profile_from_detailed(players: &DetailedPlayers, player: &PlayerId) -> PlayerProfile {
    let Some(entry) = players.players.get(player.as_str()) else {
        return PlayerProfile::default();
    };
    PlayerProfile {
        role: entry.role.as_deref().map(normalized),
        team: entry.team.as_deref().map(TeamId::new),
    }
}

fn fulfillers_from(players: &DetailedPlayers, team: &TeamId, role: &str) -> Vec<PlayerId> {
    let role = normalized(role);
    players
        .players
        .values()
        .filter(|p| {
            p.team.as_deref().map(TeamId::new).as_ref() == Some(team)
                && p.role.as_deref().map(normalized).as_deref() == Some(role.as_str())
        })
        .filter_map(|p| p.player_id.as_deref().map(PlayerId::from))
        .collect()
}

#[async_trait]
impl Roster for RconClient {
    /// Two-tier lookup: the bulk listing first, the per-player endpoint for
    /// whatever is still missing. Failures of either tier collapse to
    /// "unknown".
    async fn identify(&self, player: &PlayerId) -> PlayerProfile {
        let mut profile = match self.detailed_players().await {
            Ok(players) => profile_from_detailed(&players, player),
            Err(e) => {
                warn!(player = %player, error = %e, "Bulk player lookup failed");
                PlayerProfile::default()
            }
        };

        if profile.role.is_none() || profile.team.is_none() {
            match self.player_info(player).await {
                Ok(info) => {
                    if profile.role.is_none() {
                        profile.role = info.role.as_deref().map(normalized);
                    }
                    if profile.team.is_none() {
                        profile.team = info.team.as_deref().map(TeamId::new);
                    }
                }
                Err(e) => {
                    warn!(player = %player, error = %e, "Fallback player lookup failed");
                }
            }
        }

        debug!(player = %player, role = ?profile.role, team = ?profile.team, "Identified player");
        profile
    }

    async fn list_fulfillers(&self, team: &TeamId, role: &str) -> Vec<PlayerId> {
        match self.detailed_players().await {
            Ok(players) => fulfillers_from(&players, team, role),
            Err(e) => {
                warn!(team = %team, role = %role, error = %e, "Fulfiller listing failed");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl Notifier for RconClient {
    async fn send_to_player(&self, player: &PlayerId, text: &str) {
        if let Err(e) = self.message_player(player, text).await {
            warn!(player = %player, error = %e, "Failed to deliver message");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> DetailedPlayers {
        serde_json::from_str(
            r#"{
                "players": {
                    "p1": {"player_id": "p1", "role": "Engineer", "team": "Allies"},
                    "p2": {"player_id": "p2", "role": "engineer", "team": "allies"},
                    "p3": {"player_id": "p3", "role": "engineer", "team": "Axis"},
                    "p4": {"player_id": "p4", "role": "rifleman", "team": "Allies"},
                    "p5": {"role": "engineer", "team": "Allies"}
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn envelope_unwraps_result() {
        let envelope: ApiEnvelope<PlayerInfo> =
            serde_json::from_str(r#"{"result": {"role": "commander", "team": "Allies"}}"#).unwrap();
        assert_eq!(envelope.result.role.as_deref(), Some("commander"));
    }

    #[test]
    fn fulfillers_filter_by_normalized_team_and_role() {
        let players = listing();
        let mut ids = fulfillers_from(&players, &TeamId::new("ALLIES"), "Engineer");
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));

        // p3 is the wrong team, p4 the wrong role, p5 has no id
        assert_eq!(ids, vec![PlayerId::new("p1"), PlayerId::new("p2")]);
    }

    #[test]
    fn profile_comes_back_normalized() {
        let players = listing();
        let profile = profile_from_detailed(&players, &PlayerId::new("p1"));
        assert_eq!(profile.role.as_deref(), Some("engineer"));
        assert_eq!(profile.team, Some(TeamId::new("allies")));
    }

    #[test]
    fn unknown_player_yields_empty_profile() {
        let players = listing();
        let profile = profile_from_detailed(&players, &PlayerId::new("nobody"));
        assert_eq!(profile, PlayerProfile::default());
    }

    #[test]
    fn missing_players_map_deserializes_empty() {
        let players: DetailedPlayers = serde_json::from_str("{}").unwrap();
        assert!(players.players.is_empty());
    }
}
