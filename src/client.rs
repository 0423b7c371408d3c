//! Client Contract
//!
//! The operation set shared by the HTTP client and the caching decorator.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    GameServerItem, GetGameServerDetailsRequest, GetLeaderboardRequest, LeaderboardItem, Player,
    PlayerRequest, PriorityQueueItem, PutListItemRequest, WhitelistItem,
};

/// Full read and write surface of the CFTools Cloud API.
///
/// Lookups that can legitimately find nothing (priority queue, whitelist)
/// return `Ok(None)` rather than an error.
#[async_trait]
pub trait CfToolsClient: Send + Sync {
    async fn get_game_server_details(
        &self,
        request: GetGameServerDetailsRequest,
    ) -> Result<GameServerItem>;

    async fn get_player_details(&self, request: PlayerRequest) -> Result<Player>;

    async fn get_leaderboard(&self, request: GetLeaderboardRequest) -> Result<Vec<LeaderboardItem>>;

    async fn get_priority_queue(&self, request: PlayerRequest) -> Result<Option<PriorityQueueItem>>;

    async fn put_priority_queue(&self, request: PutListItemRequest) -> Result<()>;

    async fn delete_priority_queue(&self, request: PlayerRequest) -> Result<()>;

    async fn get_whitelist(&self, request: PlayerRequest) -> Result<Option<WhitelistItem>>;

    async fn put_whitelist(&self, request: PutListItemRequest) -> Result<()>;

    async fn delete_whitelist(&self, request: PlayerRequest) -> Result<()>;
}

/// Shared handles forward to the client they point at, so a decorator can
/// wrap an `Arc` while the caller keeps another handle to the same client.
#[async_trait]
impl<T: CfToolsClient + ?Sized> CfToolsClient for Arc<T> {
    async fn get_game_server_details(
        &self,
        request: GetGameServerDetailsRequest,
    ) -> Result<GameServerItem> {
        (**self).get_game_server_details(request).await
    }

    async fn get_player_details(&self, request: PlayerRequest) -> Result<Player> {
        (**self).get_player_details(request).await
    }

    async fn get_leaderboard(&self, request: GetLeaderboardRequest) -> Result<Vec<LeaderboardItem>> {
        (**self).get_leaderboard(request).await
    }

    async fn get_priority_queue(&self, request: PlayerRequest) -> Result<Option<PriorityQueueItem>> {
        (**self).get_priority_queue(request).await
    }

    async fn put_priority_queue(&self, request: PutListItemRequest) -> Result<()> {
        (**self).put_priority_queue(request).await
    }

    async fn delete_priority_queue(&self, request: PlayerRequest) -> Result<()> {
        (**self).delete_priority_queue(request).await
    }

    async fn get_whitelist(&self, request: PlayerRequest) -> Result<Option<WhitelistItem>> {
        (**self).get_whitelist(request).await
    }

    async fn put_whitelist(&self, request: PutListItemRequest) -> Result<()> {
        (**self).put_whitelist(request).await
    }

    async fn delete_whitelist(&self, request: PlayerRequest) -> Result<()> {
        (**self).delete_whitelist(request).await
    }
}
