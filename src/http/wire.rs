//! Wire Types
//!
//! Raw CFTools Cloud response bodies and their mapping onto domain models.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};
use crate::models::{
    CfToolsId, Expiration, GameServerItem, HitZoneStatistics, LeaderboardItem, Player, PlayerStatistics,
    PriorityQueueItem, ServerAttributes, ServerEnvironment, ServerGeolocation, ServerHost,
    ServerMod, ServerSecurity, ServerStatus, WeaponStatistics, WhitelistItem,
};

// == Timestamps ==
/// Parses RFC 3339, or a naive ISO timestamp taken as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| ClientError::Decode(format!("invalid timestamp {:?}: {}", raw, e)))
}

// == User Lookup ==
#[derive(Debug, Deserialize)]
pub struct UserLookupResponse {
    pub cftools_id: String,
}

// == Player ==
#[derive(Debug, Deserialize)]
pub struct RawPlayer {
    pub omega: RawOmega,
    #[serde(default)]
    pub game: RawGame,
}

#[derive(Debug, Deserialize)]
pub struct RawOmega {
    #[serde(default)]
    pub name_history: Vec<String>,
    #[serde(default)]
    pub playtime: u64,
    #[serde(default)]
    pub sessions: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawGame {
    #[serde(default)]
    pub general: RawGeneral,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawGeneral {
    pub kills: Option<u64>,
    pub deaths: Option<u64>,
    pub suicides: Option<u64>,
    pub environment_deaths: Option<u64>,
    pub infected_deaths: Option<u64>,
    pub hits: Option<u64>,
    pub longest_shot: Option<f64>,
    pub longest_kill: Option<f64>,
    pub kdratio: Option<f64>,
    pub weapons: Option<HashMap<String, RawWeapon>>,
    /// Hit count per body part
    pub zones: Option<HashMap<String, u64>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawWeapon {
    pub kills: u64,
    pub hits: u64,
    pub longest_kill: f64,
    pub longest_shot: f64,
}

/// Picks the player keyed by `cftools_id` out of a player response.
pub fn map_player(mut response: HashMap<String, RawPlayer>, cftools_id: &CfToolsId) -> Result<Player> {
    let raw = response
        .remove(cftools_id.as_str())
        .ok_or_else(|| ClientError::NotFound(format!("player {}", cftools_id)))?;
    let general = raw.game.general;

    // Sorted so equal responses map to equal players
    let weapons: BTreeMap<String, RawWeapon> = general.weapons.unwrap_or_default().into_iter().collect();
    let zones: BTreeMap<String, u64> = general.zones.unwrap_or_default().into_iter().collect();

    Ok(Player {
        names: raw.omega.name_history,
        playtime: raw.omega.playtime,
        sessions: raw.omega.sessions,
        statistics: PlayerStatistics {
            kills: general.kills.unwrap_or(0),
            deaths: general.deaths.unwrap_or(0),
            suicides: general.suicides.unwrap_or(0),
            environment_deaths: general.environment_deaths.unwrap_or(0),
            infected_deaths: general.infected_deaths.unwrap_or(0),
            hits: general.hits.unwrap_or(0),
            longest_shot: general.longest_shot.unwrap_or(0.0),
            longest_kill: general.longest_kill.unwrap_or(0.0),
            kill_death_ratio: general.kdratio.unwrap_or(0.0),
            weapons: weapons
                .into_iter()
                .map(|(name, w)| WeaponStatistics {
                    name,
                    kills: w.kills,
                    hits: w.hits,
                    longest_kill: w.longest_kill,
                    longest_shot: w.longest_shot,
                })
                .collect(),
            hit_zones: zones
                .into_iter()
                .map(|(zone, hits)| HitZoneStatistics { zone, hits })
                .collect(),
        },
    })
}

// == Leaderboard ==
#[derive(Debug, Deserialize)]
pub struct LeaderboardResponse {
    #[serde(default)]
    pub leaderboard: Vec<RawLeaderboardItem>,
}

#[derive(Debug, Deserialize)]
pub struct RawLeaderboardItem {
    pub cftools_id: String,
    pub latest_name: String,
    pub rank: u32,
    #[serde(default)]
    pub playtime: u64,
    pub kills: Option<u64>,
    pub deaths: Option<u64>,
    pub suicides: Option<u64>,
    pub environment_deaths: Option<u64>,
    pub hits: Option<u64>,
    pub kdratio: Option<f64>,
    pub longest_kill: Option<f64>,
    pub longest_shot: Option<f64>,
}

pub fn map_leaderboard(response: LeaderboardResponse) -> Vec<LeaderboardItem> {
    response
        .leaderboard
        .into_iter()
        .map(|raw| LeaderboardItem {
            id: CfToolsId::new(raw.cftools_id),
            name: raw.latest_name,
            rank: raw.rank,
            kills: raw.kills.unwrap_or(0),
            deaths: raw.deaths.unwrap_or(0),
            suicides: raw.suicides.unwrap_or(0),
            environment_deaths: raw.environment_deaths.unwrap_or(0),
            playtime: raw.playtime,
            hits: raw.hits,
            kill_death_ratio: raw.kdratio,
            longest_kill: raw.longest_kill,
            longest_shot: raw.longest_shot,
        })
        .collect()
}

// == Priority Queue / Whitelist ==
#[derive(Debug, Deserialize)]
pub struct ListEntriesResponse {
    #[serde(default)]
    pub entries: Vec<RawListEntry>,
}

#[derive(Debug, Deserialize)]
pub struct RawListEntry {
    pub created_at: String,
    pub creator: RawCreator,
    pub meta: RawListMeta,
}

#[derive(Debug, Deserialize)]
pub struct RawCreator {
    pub cftools_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RawListMeta {
    #[serde(default)]
    pub comment: String,
    pub expiration: Option<String>,
}

/// Fields shared by priority queue and whitelist entries.
struct ListEntry {
    created_by: CfToolsId,
    comment: String,
    expiration: Expiration,
    created: DateTime<Utc>,
}

fn first_entry(response: ListEntriesResponse) -> Result<Option<ListEntry>> {
    let Some(raw) = response.entries.into_iter().next() else {
        return Ok(None);
    };
    let expiration = match raw.meta.expiration.as_deref() {
        None | Some("") => Expiration::Permanent,
        Some(at) => Expiration::At(parse_timestamp(at)?),
    };
    Ok(Some(ListEntry {
        created_by: CfToolsId::new(raw.creator.cftools_id),
        comment: raw.meta.comment,
        expiration,
        created: parse_timestamp(&raw.created_at)?,
    }))
}

pub fn map_priority_queue(response: ListEntriesResponse) -> Result<Option<PriorityQueueItem>> {
    Ok(first_entry(response)?.map(|e| PriorityQueueItem {
        created_by: e.created_by,
        comment: e.comment,
        expiration: e.expiration,
        created: e.created,
    }))
}

pub fn map_whitelist(response: ListEntriesResponse) -> Result<Option<WhitelistItem>> {
    Ok(first_entry(response)?.map(|e| WhitelistItem {
        created_by: e.created_by,
        comment: e.comment,
        expiration: e.expiration,
        created: e.created,
    }))
}

/// Body of a priority queue or whitelist POST.
#[derive(Debug, Serialize)]
pub struct PutListEntryBody<'a> {
    pub cftools_id: &'a str,
    pub comment: &'a str,
    /// RFC 3339, or empty for a permanent entry
    pub expires_at: String,
}

impl<'a> PutListEntryBody<'a> {
    pub fn new(cftools_id: &'a CfToolsId, comment: &'a str, expires: &Expiration) -> Self {
        let expires_at = match expires {
            Expiration::Permanent => String::new(),
            Expiration::At(at) => at.to_rfc3339(),
        };
        Self {
            cftools_id: cftools_id.as_str(),
            comment,
            expires_at,
        }
    }
}

// == Game Server ==
#[derive(Debug, Deserialize)]
pub struct RawGameServer {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub map: String,
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub rating: u32,
    #[serde(default)]
    pub status: RawServerStatus,
    #[serde(default)]
    pub security: RawServerSecurity,
    #[serde(default)]
    pub mods: Vec<RawServerMod>,
    #[serde(default)]
    pub geolocation: RawGeolocation,
    #[serde(default)]
    pub environment: RawEnvironment,
    #[serde(default)]
    pub attributes: RawAttributes,
    #[serde(default)]
    pub host: RawHost,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawServerStatus {
    pub players: u32,
    pub slots: u32,
    pub queue: RawQueue,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawQueue {
    pub size: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawServerSecurity {
    pub vac: bool,
    pub battleye: bool,
    pub password: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawServerMod {
    pub name: String,
    pub file_id: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawGeolocation {
    pub available: bool,
    pub timezone: Option<String>,
    pub country: Option<String>,
    pub continent: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawEnvironment {
    pub perspectives: RawPerspectives,
    pub time_acceleration: Option<f64>,
    pub time: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawPerspectives {
    #[serde(rename = "1rd")]
    pub first_person: bool,
    #[serde(rename = "3rd")]
    pub third_person: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawAttributes {
    pub dlc: bool,
    pub dlcs: Vec<String>,
    pub official: bool,
    pub modded: bool,
    pub hive: Option<String>,
    pub experimental: bool,
    pub whitelist: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawHost {
    pub address: String,
    pub game_port: u16,
    pub query_port: u16,
}

pub fn map_game_server(mut response: HashMap<String, RawGameServer>, resource: &str) -> Result<GameServerItem> {
    let raw = response
        .remove(resource)
        .ok_or_else(|| ClientError::NotFound(format!("game server {}", resource)))?;

    Ok(GameServerItem {
        name: raw.name,
        version: raw.version,
        map: raw.map,
        online: raw.online,
        rank: raw.rank,
        rating: raw.rating,
        status: ServerStatus {
            slots: raw.status.slots,
            online: raw.status.players,
            queue: raw.status.queue.size,
        },
        security: ServerSecurity {
            vac: raw.security.vac,
            battleye: raw.security.battleye,
            password: raw.security.password,
        },
        mods: raw
            .mods
            .into_iter()
            .map(|m| ServerMod {
                name: m.name,
                file_id: m.file_id,
            })
            .collect(),
        geolocation: ServerGeolocation {
            available: raw.geolocation.available,
            timezone: raw.geolocation.timezone,
            country: raw.geolocation.country,
            continent: raw.geolocation.continent,
            city: raw.geolocation.city,
        },
        environment: ServerEnvironment {
            first_person_perspective: raw.environment.perspectives.first_person,
            third_person_perspective: raw.environment.perspectives.third_person,
            time_acceleration: raw.environment.time_acceleration,
            time: raw.environment.time,
        },
        attributes: ServerAttributes {
            dlc: raw.attributes.dlc,
            dlcs: raw.attributes.dlcs,
            official: raw.attributes.official,
            modded: raw.attributes.modded,
            hive: raw.attributes.hive,
            experimental: raw.attributes.experimental,
            whitelist: raw.attributes.whitelist,
        },
        host: ServerHost {
            address: raw.host.address,
            game_port: raw.host.game_port,
            query_port: raw.host.query_port,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2021, 3, 6, 19, 49, 38).unwrap();
        assert_eq!(parse_timestamp("2021-03-06T19:49:38Z").unwrap(), expected);
        assert_eq!(parse_timestamp("2021-03-06T19:49:38+00:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2021-03-06T19:49:38.000000").unwrap(), expected);
        assert!(matches!(parse_timestamp("yesterday"), Err(ClientError::Decode(_))));
    }

    #[test]
    fn test_map_player_defaults_missing_stats() {
        let body = json!({
            "abc": {
                "omega": {"name_history": ["First", "Second"], "playtime": 3600, "sessions": 4},
                "game": {"general": {
                    "kills": 10,
                    "kdratio": 2.5,
                    "weapons": {
                        "M4A1": {"kills": 6, "hits": 20, "longest_kill": 300.5, "longest_shot": 410.0},
                        "AKM": {"kills": 4, "hits": 11}
                    },
                    "zones": {"head": 3, "torso": 12, "leftarm": 1}
                }}
            }
        });
        let response: HashMap<String, RawPlayer> = serde_json::from_value(body).unwrap();

        let player = map_player(response, &CfToolsId::new("abc")).unwrap();
        assert_eq!(player.names, vec!["First", "Second"]);
        assert_eq!(player.playtime, 3600);
        assert_eq!(player.sessions, 4);
        assert_eq!(player.statistics.kills, 10);
        assert_eq!(player.statistics.deaths, 0);
        assert_eq!(player.statistics.kill_death_ratio, 2.5);
        let names: Vec<_> = player.statistics.weapons.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["AKM", "M4A1"]);
        assert_eq!(
            player.statistics.hit_zones,
            vec![
                HitZoneStatistics { zone: "head".to_string(), hits: 3 },
                HitZoneStatistics { zone: "leftarm".to_string(), hits: 1 },
                HitZoneStatistics { zone: "torso".to_string(), hits: 12 },
            ]
        );
    }

    #[test]
    fn test_map_player_without_breakdowns() {
        let body = json!({
            "abc": {
                "omega": {"name_history": ["Solo"], "playtime": 60, "sessions": 1},
                "game": {"general": {"kills": 1}}
            }
        });
        let response: HashMap<String, RawPlayer> = serde_json::from_value(body).unwrap();

        let player = map_player(response, &CfToolsId::new("abc")).unwrap();
        assert!(player.statistics.weapons.is_empty());
        assert!(player.statistics.hit_zones.is_empty());
    }

    #[test]
    fn test_map_player_missing_key_is_not_found() {
        let response: HashMap<String, RawPlayer> = HashMap::new();
        let result = map_player(response, &CfToolsId::new("abc"));
        assert!(matches!(result, Err(ClientError::NotFound(_))));
    }

    #[test]
    fn test_map_leaderboard() {
        let body = json!({
            "leaderboard": [
                {"cftools_id": "a", "latest_name": "Alpha", "rank": 1, "playtime": 100, "kills": 50, "kdratio": 5.0},
                {"cftools_id": "b", "latest_name": "Bravo", "rank": 2, "playtime": 90}
            ]
        });
        let items = map_leaderboard(serde_json::from_value(body).unwrap());

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, CfToolsId::new("a"));
        assert_eq!(items[0].kills, 50);
        assert_eq!(items[0].kill_death_ratio, Some(5.0));
        assert_eq!(items[1].name, "Bravo");
        assert_eq!(items[1].kills, 0);
        assert_eq!(items[1].hits, None);
    }

    #[test]
    fn test_map_priority_queue_empty_is_none() {
        let response: ListEntriesResponse = serde_json::from_value(json!({"entries": []})).unwrap();
        assert_eq!(map_priority_queue(response).unwrap(), None);
    }

    #[test]
    fn test_map_priority_queue_entry() {
        let body = json!({"entries": [{
            "created_at": "2021-03-06T19:49:38Z",
            "creator": {"cftools_id": "admin"},
            "meta": {"comment": "donator", "expiration": null}
        }]});
        let item = map_priority_queue(serde_json::from_value(body).unwrap())
            .unwrap()
            .unwrap();

        assert_eq!(item.created_by, CfToolsId::new("admin"));
        assert_eq!(item.comment, "donator");
        assert_eq!(item.expiration, Expiration::Permanent);
    }

    #[test]
    fn test_map_whitelist_with_expiration() {
        let body = json!({"entries": [{
            "created_at": "2021-03-06T19:49:38Z",
            "creator": {"cftools_id": "admin"},
            "meta": {"comment": "trial", "expiration": "2021-04-06T00:00:00Z"}
        }]});
        let item = map_whitelist(serde_json::from_value(body).unwrap())
            .unwrap()
            .unwrap();

        assert_eq!(
            item.expiration,
            Expiration::At(Utc.with_ymd_and_hms(2021, 4, 6, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_put_body_expiry_rendering() {
        let id = CfToolsId::new("abc");
        let permanent = PutListEntryBody::new(&id, "c", &Expiration::Permanent);
        assert_eq!(permanent.expires_at, "");

        let at = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let timed = PutListEntryBody::new(&id, "c", &Expiration::At(at));
        assert_eq!(timed.expires_at, "2030-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_map_game_server() {
        let body = json!({
            "res": {
                "name": "Test Server",
                "version": "1.20",
                "map": "chernarusplus",
                "online": true,
                "status": {"players": 40, "slots": 60, "queue": {"size": 3}},
                "security": {"vac": true, "battleye": true, "password": false},
                "mods": [{"name": "CF", "file_id": 1559212036u64}],
                "environment": {"perspectives": {"1rd": true, "3rd": false}},
                "host": {"address": "127.0.0.1", "game_port": 2302, "query_port": 27016}
            }
        });
        let server = map_game_server(serde_json::from_value(body).unwrap(), "res").unwrap();

        assert_eq!(server.name, "Test Server");
        assert_eq!(server.status, ServerStatus { slots: 60, online: 40, queue: 3 });
        assert_eq!(server.mods[0].file_id, 1559212036);
        assert!(server.environment.first_person_perspective);
        assert!(!server.environment.third_person_perspective);
        assert_eq!(server.host.game_port, 2302);
        assert!(!server.geolocation.available);
    }
}
