//! Cache Key Derivation
//!
//! Pure functions turning a request into the string it is memoized under.
//!
//! A key is the operation name followed by `:`-separated components. `%` and
//! `:` inside a component are percent-escaped, so two different component
//! lists can never render to the same key. A request with no server at all
//! gets the raw `%default` marker instead, which no escaped id can spell.

use std::borrow::Cow;
use std::fmt;

use crate::caching::Operation;
use crate::error::Result;
use crate::models::{GetGameServerDetailsRequest, GetLeaderboardRequest, PlayerRequest, ServerApiId};

// == Cache Key ==
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    fn new(operation: Operation) -> Self {
        Self(operation.as_str().to_string())
    }

    fn part(mut self, component: &str) -> Self {
        self.0.push(':');
        self.0.push_str(&escape(component));
        self
    }

    /// Effective server, or the marker when the wrapped client picks its own.
    fn server(mut self, server: Option<&ServerApiId>) -> Self {
        match server {
            Some(server) => self.part(server.as_str()),
            None => {
                self.0.push(':');
                self.0.push_str(NO_SERVER_MARKER);
                self
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unescaped `%` never survives `escape`, so this cannot match a real id.
const NO_SERVER_MARKER: &str = "%default";

fn escape(component: &str) -> Cow<'_, str> {
    if !component.contains(['%', ':']) {
        return Cow::Borrowed(component);
    }
    let mut escaped = String::with_capacity(component.len() + 4);
    for c in component.chars() {
        match c {
            '%' => escaped.push_str("%25"),
            ':' => escaped.push_str("%3A"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

// == Normalization ==
/// Key for any operation addressing one player on one server.
///
/// Uses the effective server, so naming the default explicitly and omitting
/// it produce the same key. Without either, the request is keyed as
/// "no server" and left to the wrapped client to resolve.
pub fn player_key(
    operation: Operation,
    request: &PlayerRequest,
    default_server: Option<&ServerApiId>,
) -> Result<CacheKey> {
    request.validate()?;
    let server = request.server_api_id.as_ref().or(default_server);

    Ok(CacheKey::new(operation)
        .server(server)
        .part(request.player_id.kind())
        .part(request.player_id.as_str()))
}

/// Key for a leaderboard page. Limits the API would ignore are left out.
pub fn leaderboard_key(
    request: &GetLeaderboardRequest,
    default_server: Option<&ServerApiId>,
) -> Result<CacheKey> {
    let server = request.server_api_id.as_ref().or(default_server);
    let limit = request
        .effective_limit()
        .map(|limit| limit.to_string())
        .unwrap_or_else(|| "default".to_string());

    Ok(CacheKey::new(Operation::Leaderboard)
        .server(server)
        .part(request.statistic.as_str())
        .part(request.order.as_str())
        .part(&limit))
}

/// Key for a game server lookup; not tied to any server api id.
pub fn game_server_key(request: &GetGameServerDetailsRequest) -> Result<CacheKey> {
    request.validate()?;

    Ok(CacheKey::new(Operation::GameServerDetails)
        .part(request.game.code())
        .part(&request.ip)
        .part(&request.port.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::models::{CfToolsId, Game, PlayerId, SortOrder, Statistic, SteamId64};
    use proptest::prelude::*;

    fn server(id: &str) -> ServerApiId {
        ServerApiId::new(id)
    }

    #[test]
    fn test_bare_id_and_request_share_key() {
        let default = server("AN_ID");
        let bare: PlayerRequest = SteamId64::new("123456789").into();
        let wrapped = PlayerRequest {
            player_id: PlayerId::Steam64(SteamId64::new("123456789")),
            server_api_id: None,
        };

        let a = player_key(Operation::PlayerDetails, &bare, Some(&default)).unwrap();
        let b = player_key(Operation::PlayerDetails, &wrapped, Some(&default)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "player_details:AN_ID:steam64:123456789");
    }

    #[test]
    fn test_explicit_default_server_shares_key() {
        let default = server("AN_ID");
        let implicit = PlayerRequest::new(SteamId64::new("1"));
        let explicit = PlayerRequest::new(SteamId64::new("1")).on_server(server("AN_ID"));

        assert_eq!(
            player_key(Operation::PriorityQueue, &implicit, Some(&default)).unwrap(),
            player_key(Operation::PriorityQueue, &explicit, Some(&default)).unwrap()
        );
    }

    #[test]
    fn test_server_override_changes_key() {
        let default = server("AN_ID");
        let implicit = PlayerRequest::new(SteamId64::new("1"));
        let other = PlayerRequest::new(SteamId64::new("1")).on_server(server("OTHER"));

        assert_ne!(
            player_key(Operation::PriorityQueue, &implicit, Some(&default)).unwrap(),
            player_key(Operation::PriorityQueue, &other, Some(&default)).unwrap()
        );
    }

    #[test]
    fn test_id_kind_is_part_of_key() {
        let default = server("AN_ID");
        let steam = PlayerRequest::new(SteamId64::new("42"));
        let cftools = PlayerRequest::new(CfToolsId::new("42"));

        assert_ne!(
            player_key(Operation::PlayerDetails, &steam, Some(&default)).unwrap(),
            player_key(Operation::PlayerDetails, &cftools, Some(&default)).unwrap()
        );
    }

    #[test]
    fn test_operation_is_part_of_key() {
        let default = server("AN_ID");
        let request = PlayerRequest::new(SteamId64::new("42"));

        assert_ne!(
            player_key(Operation::PriorityQueue, &request, Some(&default)).unwrap(),
            player_key(Operation::Whitelist, &request, Some(&default)).unwrap()
        );
    }

    #[test]
    fn test_missing_server_uses_marker() {
        let request = PlayerRequest::new(SteamId64::new("42"));
        let key = player_key(Operation::PlayerDetails, &request, None).unwrap();
        assert_eq!(key.as_str(), "player_details:%default:steam64:42");

        let leaderboard = GetLeaderboardRequest::new(Statistic::Kills, SortOrder::Desc);
        let key = leaderboard_key(&leaderboard, None).unwrap();
        assert_eq!(key.as_str(), "leaderboard:%default:kills:DESC:default");
    }

    #[test]
    fn test_missing_server_never_matches_a_named_server() {
        let implicit = PlayerRequest::new(SteamId64::new("42"));
        for name in ["%default", "default", "%25default", ""] {
            let named = PlayerRequest::new(SteamId64::new("42")).on_server(server(name));
            assert_ne!(
                player_key(Operation::Whitelist, &implicit, None).unwrap(),
                player_key(Operation::Whitelist, &named, None).unwrap(),
                "server {:?} collided with the marker",
                name
            );
        }
    }

    #[test]
    fn test_blank_player_id_is_malformed() {
        let default = server("AN_ID");
        let request = PlayerRequest::new(SteamId64::new(""));
        let result = player_key(Operation::PlayerDetails, &request, Some(&default));
        assert!(matches!(result, Err(ClientError::MalformedRequest(_))));
    }

    #[test]
    fn test_leaderboard_key_components() {
        let default = server("AN_ID");
        let kills_desc = GetLeaderboardRequest::new(Statistic::Kills, SortOrder::Desc);
        let kills_asc = GetLeaderboardRequest::new(Statistic::Kills, SortOrder::Asc);
        let deaths_desc = GetLeaderboardRequest::new(Statistic::Deaths, SortOrder::Desc);

        let key = leaderboard_key(&kills_desc, Some(&default)).unwrap();
        assert_eq!(key.as_str(), "leaderboard:AN_ID:kills:DESC:default");
        assert_ne!(key, leaderboard_key(&kills_asc, Some(&default)).unwrap());
        assert_ne!(key, leaderboard_key(&deaths_desc, Some(&default)).unwrap());
        assert_ne!(
            key,
            leaderboard_key(&kills_desc.clone().with_limit(10), Some(&default)).unwrap()
        );
    }

    #[test]
    fn test_leaderboard_ignored_limit_shares_key() {
        let default = server("AN_ID");
        let plain = GetLeaderboardRequest::new(Statistic::Kills, SortOrder::Desc);
        let too_big = plain.clone().with_limit(500);

        assert_eq!(
            leaderboard_key(&plain, Some(&default)).unwrap(),
            leaderboard_key(&too_big, Some(&default)).unwrap()
        );
    }

    #[test]
    fn test_game_server_key() {
        let request = GetGameServerDetailsRequest::new(Game::DayZ, "127.0.0.1", 2302);
        let key = game_server_key(&request).unwrap();
        assert_eq!(key.as_str(), "game_server_details:1:127.0.0.1:2302");

        let bad = GetGameServerDetailsRequest::new(Game::DayZ, "127.0.0.1", 0);
        assert!(matches!(game_server_key(&bad), Err(ClientError::MalformedRequest(_))));
    }

    #[test]
    fn test_ipv6_address_is_escaped() {
        let request = GetGameServerDetailsRequest::new(Game::DayZ, "::1", 2302);
        let key = game_server_key(&request).unwrap();
        assert_eq!(key.as_str(), "game_server_details:1:%3A%3A1:2302");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        // Distinct (server, id) pairs never share a key, even when the
        // components contain the separator.
        #[test]
        fn prop_player_keys_are_injective(
            server_a in "[a-zA-Z0-9:%]{1,12}",
            id_a in "[a-zA-Z0-9:%]{1,12}",
            server_b in "[a-zA-Z0-9:%]{1,12}",
            id_b in "[a-zA-Z0-9:%]{1,12}",
        ) {
            let a = PlayerRequest::new(SteamId64::new(id_a.clone())).on_server(server(&server_a));
            let b = PlayerRequest::new(SteamId64::new(id_b.clone())).on_server(server(&server_b));

            let key_a = player_key(Operation::PlayerDetails, &a, None).unwrap();
            let key_b = player_key(Operation::PlayerDetails, &b, None).unwrap();

            prop_assert_eq!(key_a == key_b, server_a == server_b && id_a == id_b);
        }

        // Bare and wrapped shapes of the same id always share a key.
        #[test]
        fn prop_request_shape_does_not_matter(id in "[0-9]{1,17}") {
            let default = server("AN_ID");
            let bare: PlayerRequest = SteamId64::new(id.clone()).into();
            let wrapped = PlayerRequest::new(PlayerId::Steam64(SteamId64::new(id)))
                .on_server(server("AN_ID"));

            prop_assert_eq!(
                player_key(Operation::Whitelist, &bare, Some(&default)).unwrap(),
                player_key(Operation::Whitelist, &wrapped, Some(&default)).unwrap()
            );
        }
    }
}
