//! CFTools Cloud HTTP Client
//!
//! Concrete `CfToolsClient` talking to the CFTools Cloud data API.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use sha1::{Digest, Sha1};
use tracing::{debug, info};

use super::auth::{LoginCredentials, TokenProvider};
use super::wire::{self, ListEntriesResponse, PutListEntryBody, UserLookupResponse};
use crate::client::CfToolsClient;
use crate::error::{ClientError, Result};
use crate::models::{
    CfToolsId, GameServerItem, GetGameServerDetailsRequest, GetLeaderboardRequest,
    LeaderboardItem, Player, PlayerId, PlayerRequest, PriorityQueueItem, PutListItemRequest,
    ServerApiId, SortOrder, WhitelistItem,
};

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://data.cftools.cloud/";

/// HTTP client timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Server-scoped list resources that share one request shape.
#[derive(Debug, Clone, Copy)]
enum ListResource {
    PriorityQueue,
    Whitelist,
}

impl ListResource {
    fn path(&self) -> &'static str {
        match self {
            ListResource::PriorityQueue => "queuepriority",
            ListResource::Whitelist => "whitelist",
        }
    }
}

/// Resource id of a game server: hex SHA-1 over game code, ip and port.
pub fn game_server_resource(request: &GetGameServerDetailsRequest) -> String {
    let mut hasher = Sha1::new();
    hasher.update(request.game.code().as_bytes());
    hasher.update(request.ip.as_bytes());
    hasher.update(request.port.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Query parameters of a leaderboard request.
fn leaderboard_query(request: &GetLeaderboardRequest) -> Vec<(&'static str, String)> {
    let order = match request.order {
        SortOrder::Asc => "-1",
        SortOrder::Desc => "1",
    };
    let mut query = vec![
        ("stat", request.statistic.as_str().to_string()),
        ("order", order.to_string()),
    ];
    if let Some(limit) = request.effective_limit() {
        query.push(("limit", limit.to_string()));
    }
    query
}

// == HTTP Client ==
/// Authenticated client for the CFTools Cloud data API.
///
/// No retries or rate-limit handling; failures surface as `ClientError`.
pub struct HttpClient {
    http: Client,
    base_url: Url,
    server_api_id: Option<ServerApiId>,
    auth: Option<TokenProvider>,
}

impl HttpClient {
    /// Creates a client. Without credentials only game server lookups work.
    pub fn new(
        base_url: &str,
        server_api_id: Option<ServerApiId>,
        credentials: Option<LoginCredentials>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Request(format!("invalid base url {:?}: {}", base_url, e)))?;

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Request(format!("failed to create HTTP client: {}", e)))?;

        let auth = credentials
            .map(|credentials| TokenProvider::new(http.clone(), &base_url, credentials))
            .transpose()?;

        info!(
            base_url = %base_url,
            server_api_id = ?server_api_id.as_ref().map(|id| id.as_str()),
            authenticated = auth.is_some(),
            "CFTools HTTP client ready"
        );

        Ok(Self {
            http,
            base_url,
            server_api_id,
            auth,
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Request(format!("invalid path {:?}: {}", path, e)))
    }

    /// Picks the request's override, falling back to the client's default.
    fn server<'a>(&'a self, requested: Option<&'a ServerApiId>) -> Result<&'a ServerApiId> {
        requested
            .or(self.server_api_id.as_ref())
            .ok_or(ClientError::ServerApiIdRequired)
    }

    /// Fails fast, before any lookup request goes out, when no credentials are set.
    fn require_auth(&self) -> Result<()> {
        match self.auth {
            Some(_) => Ok(()),
            None => Err(ClientError::AuthenticationRequired),
        }
    }

    /// Builds a request carrying the bearer token.
    async fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let auth = self.auth.as_ref().ok_or(ClientError::AuthenticationRequired)?;
        let token = auth.provide_token().await?;
        Ok(self.http.request(method, self.url(path)?).bearer_auth(token))
    }

    /// Sends the request and maps non-2xx statuses to errors.
    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "CFTools response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::from_status(status.as_u16(), &body));
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        Ok(self.send(request).await?.json().await?)
    }

    /// Turns any player id into a CFTools id, asking the lookup endpoint if needed.
    async fn resolve_player(&self, player_id: &PlayerId) -> Result<CfToolsId> {
        player_id.validate()?;
        if let PlayerId::CfTools(id) = player_id {
            return Ok(id.clone());
        }

        let request = self
            .http
            .get(self.url("v1/users/lookup")?)
            .query(&[("identifier", player_id.as_str())]);
        let response: UserLookupResponse = self.send_json(request).await?;
        debug!(kind = player_id.kind(), id = player_id.as_str(), cftools_id = %response.cftools_id, "Resolved player id");
        Ok(CfToolsId::new(response.cftools_id))
    }

    async fn get_list_entry(
        &self,
        resource: ListResource,
        request: &PlayerRequest,
    ) -> Result<ListEntriesResponse> {
        let server = self.server(request.server_api_id.as_ref())?;
        let cftools_id = self.resolve_player(&request.player_id).await?;
        let path = format!("v1/server/{}/{}", server, resource.path());

        let builder = self
            .authorized(Method::GET, &path)
            .await?
            .query(&[("cftools_id", cftools_id.as_str())]);
        self.send_json(builder).await
    }

    async fn put_list_entry(&self, resource: ListResource, request: &PutListItemRequest) -> Result<()> {
        let server = self.server(request.server_api_id.as_ref())?;
        let cftools_id = self.resolve_player(&request.id).await?;
        let path = format!("v1/server/{}/{}", server, resource.path());

        let body = PutListEntryBody::new(&cftools_id, &request.comment, &request.expires);
        let builder = self.authorized(Method::POST, &path).await?.json(&body);
        self.send(builder).await?;
        Ok(())
    }

    async fn delete_list_entry(&self, resource: ListResource, request: &PlayerRequest) -> Result<()> {
        let server = self.server(request.server_api_id.as_ref())?;
        let cftools_id = self.resolve_player(&request.player_id).await?;
        let path = format!("v1/server/{}/{}", server, resource.path());

        let builder = self
            .authorized(Method::DELETE, &path)
            .await?
            .query(&[("cftools_id", cftools_id.as_str())]);
        self.send(builder).await?;
        Ok(())
    }
}

#[async_trait]
impl CfToolsClient for HttpClient {
    async fn get_game_server_details(
        &self,
        request: GetGameServerDetailsRequest,
    ) -> Result<GameServerItem> {
        request.validate()?;
        let resource = game_server_resource(&request);
        let builder = self
            .http
            .get(self.url(&format!("v1/gameserver/{}", resource))?);

        let response: HashMap<String, wire::RawGameServer> = self.send_json(builder).await?;
        wire::map_game_server(response, &resource)
    }

    async fn get_player_details(&self, request: PlayerRequest) -> Result<Player> {
        self.require_auth()?;
        let server = self.server(request.server_api_id.as_ref())?;
        let cftools_id = self.resolve_player(&request.player_id).await?;
        let path = format!("v1/server/{}/player", server);

        let builder = self
            .authorized(Method::GET, &path)
            .await?
            .query(&[("cftools_id", cftools_id.as_str())]);
        let response: HashMap<String, wire::RawPlayer> = self.send_json(builder).await?;
        wire::map_player(response, &cftools_id)
    }

    async fn get_leaderboard(&self, request: GetLeaderboardRequest) -> Result<Vec<LeaderboardItem>> {
        let server = self.server(request.server_api_id.as_ref())?;
        let path = format!("v1/server/{}/leaderboard", server);

        let builder = self
            .authorized(Method::GET, &path)
            .await?
            .query(&leaderboard_query(&request));
        let response: wire::LeaderboardResponse = self.send_json(builder).await?;
        Ok(wire::map_leaderboard(response))
    }

    async fn get_priority_queue(&self, request: PlayerRequest) -> Result<Option<PriorityQueueItem>> {
        self.require_auth()?;
        let response = self.get_list_entry(ListResource::PriorityQueue, &request).await?;
        wire::map_priority_queue(response)
    }

    async fn put_priority_queue(&self, request: PutListItemRequest) -> Result<()> {
        self.require_auth()?;
        self.put_list_entry(ListResource::PriorityQueue, &request).await
    }

    async fn delete_priority_queue(&self, request: PlayerRequest) -> Result<()> {
        self.require_auth()?;
        self.delete_list_entry(ListResource::PriorityQueue, &request).await
    }

    async fn get_whitelist(&self, request: PlayerRequest) -> Result<Option<WhitelistItem>> {
        self.require_auth()?;
        let response = self.get_list_entry(ListResource::Whitelist, &request).await?;
        wire::map_whitelist(response)
    }

    async fn put_whitelist(&self, request: PutListItemRequest) -> Result<()> {
        self.require_auth()?;
        self.put_list_entry(ListResource::Whitelist, &request).await
    }

    async fn delete_whitelist(&self, request: PlayerRequest) -> Result<()> {
        self.require_auth()?;
        self.delete_list_entry(ListResource::Whitelist, &request).await
    }
}
