//! Request Models
//!
//! Request shapes accepted by every `CfToolsClient` implementation.
//! Bare identifiers convert into the matching request through `From`, so
//! call sites can pass either shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{
    BattlEyeGuid, BohemiaInteractiveId, CfToolsId, PlayerId, ServerApiId, SteamId64,
};
use crate::error::{ClientError, Result};

/// Largest page size the leaderboard endpoint honours.
pub const MAX_LEADERBOARD_LIMIT: u32 = 100;

// == Game ==
/// Games hosted on CFTools Cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Game {
    DayZ,
}

impl Game {
    /// Numeric game code used by the API.
    pub fn code(&self) -> &'static str {
        match self {
            Game::DayZ => "1",
        }
    }
}

// == Statistic ==
/// Statistic a leaderboard is ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    Kills,
    Deaths,
    Suicides,
    Playtime,
    LongestKill,
    LongestShot,
    KdRatio,
}

impl Statistic {
    /// Value of the `stat` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Statistic::Kills => "kills",
            Statistic::Deaths => "deaths",
            Statistic::Suicides => "suicides",
            Statistic::Playtime => "playtime",
            Statistic::LongestKill => "longest_kill",
            Statistic::LongestShot => "longest_shot",
            Statistic::KdRatio => "kdratio",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let stat = match s.to_ascii_lowercase().as_str() {
            "kills" => Statistic::Kills,
            "deaths" => Statistic::Deaths,
            "suicides" => Statistic::Suicides,
            "playtime" => Statistic::Playtime,
            "longest_kill" => Statistic::LongestKill,
            "longest_shot" => Statistic::LongestShot,
            "kdratio" => Statistic::KdRatio,
            _ => return None,
        };
        Some(stat)
    }
}

// == Sort Order ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

// == Expiration ==
/// When a priority queue or whitelist entry runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Expiration {
    #[default]
    Permanent,
    At(DateTime<Utc>),
}

// == Player Request ==
/// Request addressing one player, optionally on a non-default server.
///
/// Used for player details plus priority queue and whitelist lookup/delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRequest {
    pub player_id: PlayerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_api_id: Option<ServerApiId>,
}

impl PlayerRequest {
    pub fn new(player_id: impl Into<PlayerId>) -> Self {
        Self {
            player_id: player_id.into(),
            server_api_id: None,
        }
    }

    /// Targets a server other than the client's default.
    pub fn on_server(mut self, server_api_id: ServerApiId) -> Self {
        self.server_api_id = Some(server_api_id);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.player_id.validate()
    }
}

impl From<PlayerId> for PlayerRequest {
    fn from(player_id: PlayerId) -> Self {
        Self::new(player_id)
    }
}

macro_rules! player_request_from {
    ($($id:ty),*) => {
        $(
            impl From<$id> for PlayerRequest {
                fn from(id: $id) -> Self {
                    Self::new(id)
                }
            }
        )*
    };
}

player_request_from!(CfToolsId, SteamId64, BattlEyeGuid, BohemiaInteractiveId);

// == Leaderboard Request ==
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetLeaderboardRequest {
    pub statistic: Statistic,
    #[serde(default)]
    pub order: SortOrder,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_api_id: Option<ServerApiId>,
}

impl GetLeaderboardRequest {
    pub fn new(statistic: Statistic, order: SortOrder) -> Self {
        Self {
            statistic,
            order,
            limit: None,
            server_api_id: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn on_server(mut self, server_api_id: ServerApiId) -> Self {
        self.server_api_id = Some(server_api_id);
        self
    }

    /// The limit the API will actually apply; out-of-range limits are dropped.
    pub fn effective_limit(&self) -> Option<u32> {
        self.limit
            .filter(|limit| (1..=MAX_LEADERBOARD_LIMIT).contains(limit))
    }
}

// == Game Server Request ==
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetGameServerDetailsRequest {
    pub game: Game,
    pub ip: String,
    pub port: u16,
}

impl GetGameServerDetailsRequest {
    pub fn new(game: Game, ip: impl Into<String>, port: u16) -> Self {
        Self {
            game,
            ip: ip.into(),
            port,
        }
    }

    /// Requires a non-empty address and a non-zero port.
    pub fn validate(&self) -> Result<()> {
        if self.ip.trim().is_empty() {
            return Err(ClientError::MalformedRequest(
                "game server ip must not be empty".to_string(),
            ));
        }
        if self.port == 0 {
            return Err(ClientError::MalformedRequest(
                "game server port must not be 0".to_string(),
            ));
        }
        Ok(())
    }
}

// == Put List Item Request ==
/// Adds a player to the priority queue or whitelist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutListItemRequest {
    pub id: PlayerId,
    pub comment: String,
    #[serde(default)]
    pub expires: Expiration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_api_id: Option<ServerApiId>,
}

impl PutListItemRequest {
    pub fn new(id: impl Into<PlayerId>, comment: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            comment: comment.into(),
            expires: Expiration::Permanent,
            server_api_id: None,
        }
    }

    pub fn expires_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires = Expiration::At(at);
        self
    }

    pub fn on_server(mut self, server_api_id: ServerApiId) -> Self {
        self.server_api_id = Some(server_api_id);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.id.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_id_converts_to_request() {
        let request: PlayerRequest = SteamId64::new("123456789").into();
        assert_eq!(request.player_id, PlayerId::Steam64(SteamId64::new("123456789")));
        assert!(request.server_api_id.is_none());
    }

    #[test]
    fn test_effective_limit_drops_out_of_range() {
        let request = GetLeaderboardRequest::new(Statistic::Kills, SortOrder::Desc);
        assert_eq!(request.effective_limit(), None);
        assert_eq!(request.clone().with_limit(0).effective_limit(), None);
        assert_eq!(request.clone().with_limit(101).effective_limit(), None);
        assert_eq!(request.clone().with_limit(1).effective_limit(), Some(1));
        assert_eq!(request.with_limit(100).effective_limit(), Some(100));
    }

    #[test]
    fn test_game_server_request_validation() {
        assert!(GetGameServerDetailsRequest::new(Game::DayZ, "127.0.0.1", 2302)
            .validate()
            .is_ok());
        assert!(matches!(
            GetGameServerDetailsRequest::new(Game::DayZ, "", 2302).validate(),
            Err(ClientError::MalformedRequest(_))
        ));
        assert!(matches!(
            GetGameServerDetailsRequest::new(Game::DayZ, "127.0.0.1", 0).validate(),
            Err(ClientError::MalformedRequest(_))
        ));
    }

    #[test]
    fn test_statistic_parse() {
        assert_eq!(Statistic::parse("KILLS"), Some(Statistic::Kills));
        assert_eq!(Statistic::parse("longest_shot"), Some(Statistic::LongestShot));
        assert_eq!(Statistic::parse("headshots"), None);
    }
}
