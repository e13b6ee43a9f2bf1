//! Opaque identifiers for players and teams.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fold a chat token or API field for comparison: trim and lowercase.
///
/// Role names, team names and category codes all pass through here before
/// being compared, so `" Allies "` and `"allies"` are the same team.
pub fn normalized(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Opaque player identifier, as reported by the game-server admin API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Opaque team identifier.
///
/// Construction normalizes the raw value so that a team id is always a
/// valid comparison key regardless of which API endpoint produced it.
/// `Deserialize` is implemented by hand to route through [`TeamId::new`]
/// and keep that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TeamId(String);

impl<'de> Deserialize<'de> for TeamId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(TeamId::new)
    }
}

impl TeamId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(normalized(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TeamId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_trims_and_lowercases() {
        assert_eq!(normalized("  Allies "), "allies");
        assert_eq!(normalized("MUNI"), "muni");
        assert_eq!(normalized(""), "");
    }

    #[test]
    fn team_id_normalizes_on_construction() {
        assert_eq!(TeamId::new("Allies"), TeamId::new(" allies "));
        assert_eq!(TeamId::new("AXIS").as_str(), "axis");
    }

    #[test]
    fn player_id_is_verbatim() {
        let id = PlayerId::new("7656119XYZ");
        assert_eq!(id.as_str(), "7656119XYZ");
        assert_eq!(id.to_string(), "7656119XYZ");
    }

    #[test]
    fn ids_serialize_transparent() {
        let player = PlayerId::new("p1");
        assert_eq!(serde_json::to_string(&player).unwrap(), "\"p1\"");
        let team: TeamId = serde_json::from_str("\"Allies\"").unwrap();
        assert_eq!(team.as_str(), "allies");
    }
}
