//! Response Models
//!
//! Domain objects returned by `CfToolsClient` operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::CfToolsId;
use super::requests::Expiration;

// == Player ==
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Player {
    pub names: Vec<String>,
    pub statistics: PlayerStatistics,
    /// Seconds played
    pub playtime: u64,
    pub sessions: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerStatistics {
    pub kills: u64,
    pub deaths: u64,
    pub suicides: u64,
    pub environment_deaths: u64,
    pub infected_deaths: u64,
    pub hits: u64,
    pub longest_shot: f64,
    pub longest_kill: f64,
    pub kill_death_ratio: f64,
    /// Per weapon, sorted by weapon name
    pub weapons: Vec<WeaponStatistics>,
    /// Hits taken per body part, sorted by zone name
    pub hit_zones: Vec<HitZoneStatistics>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeaponStatistics {
    pub name: String,
    pub kills: u64,
    pub hits: u64,
    pub longest_kill: f64,
    pub longest_shot: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HitZoneStatistics {
    pub zone: String,
    pub hits: u64,
}

// == Leaderboard ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardItem {
    pub id: CfToolsId,
    pub name: String,
    pub rank: u32,
    pub kills: u64,
    pub deaths: u64,
    pub suicides: u64,
    pub environment_deaths: u64,
    pub playtime: u64,
    pub hits: Option<u64>,
    pub kill_death_ratio: Option<f64>,
    pub longest_kill: Option<f64>,
    pub longest_shot: Option<f64>,
}

// == Priority Queue / Whitelist ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityQueueItem {
    pub created_by: CfToolsId,
    pub comment: String,
    pub expiration: Expiration,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhitelistItem {
    pub created_by: CfToolsId,
    pub comment: String,
    pub expiration: Expiration,
    pub created: DateTime<Utc>,
}

// == Game Server ==
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameServerItem {
    pub name: String,
    pub version: String,
    pub map: String,
    pub online: bool,
    pub rank: u32,
    pub rating: u32,
    pub status: ServerStatus,
    pub security: ServerSecurity,
    pub mods: Vec<ServerMod>,
    pub geolocation: ServerGeolocation,
    pub environment: ServerEnvironment,
    pub attributes: ServerAttributes,
    pub host: ServerHost,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServerStatus {
    pub slots: u32,
    pub online: u32,
    pub queue: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServerSecurity {
    pub vac: bool,
    pub battleye: bool,
    pub password: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServerMod {
    pub name: String,
    pub file_id: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServerGeolocation {
    pub available: bool,
    pub timezone: Option<String>,
    pub country: Option<String>,
    pub continent: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServerEnvironment {
    pub first_person_perspective: bool,
    pub third_person_perspective: bool,
    pub time_acceleration: Option<f64>,
    pub time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServerAttributes {
    pub dlc: bool,
    pub dlcs: Vec<String>,
    pub official: bool,
    pub modded: bool,
    pub hive: Option<String>,
    pub experimental: bool,
    pub whitelist: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServerHost {
    pub address: String,
    pub game_port: u16,
    pub query_port: u16,
}
