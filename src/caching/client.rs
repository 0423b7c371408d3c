//! Caching Client
//!
//! Read-through decorator over any `CfToolsClient`.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::caching::key::{self, CacheKey};
use crate::caching::{CacheTtlConfig, Operation};
use crate::client::CfToolsClient;
use crate::error::Result;
use crate::models::{
    GameServerItem, GetGameServerDetailsRequest, GetLeaderboardRequest, LeaderboardItem, Player,
    PlayerRequest, PriorityQueueItem, PutListItemRequest, ServerApiId, WhitelistItem,
};

// == Cached Response ==
/// Everything a cacheable operation can return, as stored in the cache.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedResponse {
    GameServer(GameServerItem),
    Player(Player),
    Leaderboard(Vec<LeaderboardItem>),
    PriorityQueue(Option<PriorityQueueItem>),
    Whitelist(Option<WhitelistItem>),
}

/// Result types that can round-trip through `CachedResponse`.
pub trait Cacheable: Sized + Send {
    fn to_cached(&self) -> CachedResponse;
    fn from_cached(cached: CachedResponse) -> Option<Self>;
}

macro_rules! cacheable {
    ($ty:ty, $variant:ident) => {
        impl Cacheable for $ty {
            fn to_cached(&self) -> CachedResponse {
                CachedResponse::$variant(self.clone())
            }

            fn from_cached(cached: CachedResponse) -> Option<Self> {
                match cached {
                    CachedResponse::$variant(value) => Some(value),
                    _ => None,
                }
            }
        }
    };
}

cacheable!(GameServerItem, GameServer);
cacheable!(Player, Player);
cacheable!(Vec<LeaderboardItem>, Leaderboard);
cacheable!(Option<PriorityQueueItem>, PriorityQueue);
cacheable!(Option<WhitelistItem>, Whitelist);

/// Store handle shared between a caching client and its cleanup task.
pub type SharedStore = Arc<Mutex<CacheStore<CachedResponse>>>;

// == Caching Client ==
/// Memoizes reads of the wrapped client for their configured TTL.
///
/// Writes (put/delete on priority queue and whitelist) always go straight to
/// the wrapped client and never read or modify the cache. Concurrent misses
/// on the same key are not coalesced: each calls upstream and the last
/// write to the store wins.
pub struct CachingClient<C> {
    inner: C,
    store: SharedStore,
    ttls: CacheTtlConfig,
    default_server: Option<ServerApiId>,
}

impl<C: CfToolsClient> CachingClient<C> {
    /// Wraps `inner`. `default_server` is used for requests that name no server.
    pub fn new(
        store: CacheStore<CachedResponse>,
        ttls: CacheTtlConfig,
        inner: C,
        default_server: Option<ServerApiId>,
    ) -> Self {
        Self::with_shared_store(Arc::new(Mutex::new(store)), ttls, inner, default_server)
    }

    pub fn with_shared_store(
        store: SharedStore,
        ttls: CacheTtlConfig,
        inner: C,
        default_server: Option<ServerApiId>,
    ) -> Self {
        Self {
            inner,
            store,
            ttls,
            default_server,
        }
    }

    /// Handle to the underlying store, e.g. for `spawn_cleanup_task`.
    pub fn store(&self) -> SharedStore {
        Arc::clone(&self.store)
    }

    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats()
    }

    pub fn ttls(&self) -> &CacheTtlConfig {
        &self.ttls
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn default_server(&self) -> Option<&ServerApiId> {
        self.default_server.as_ref()
    }

    // == Read Through ==
    /// Serves `request` from the store, or runs `fetch` and stores its result.
    ///
    /// Operations with a zero TTL go straight to `fetch` without deriving a
    /// key. Errors from `fetch` are returned untouched and leave the store as
    /// it was.
    async fn read_through<R, T, K, F, Fut>(
        &self,
        operation: Operation,
        request: R,
        key: K,
        fetch: F,
    ) -> Result<T>
    where
        R: Send,
        T: Cacheable,
        K: FnOnce(&R) -> Result<CacheKey> + Send,
        F: FnOnce(R) -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
    {
        let ttl = self.ttls.ttl_for(operation);
        if ttl == 0 {
            trace!(operation = %operation, "Caching disabled, forwarding");
            return fetch(request).await;
        }

        let key = key(&request)?;
        let cached = self.store.lock().get(key.as_str());
        if let Some(value) = cached.and_then(T::from_cached) {
            debug!(operation = %operation, key = %key, "Cache HIT");
            return Ok(value);
        }
        debug!(operation = %operation, key = %key, "Cache MISS");

        let value = match fetch(request).await {
            Ok(value) => value,
            Err(e) => {
                warn!(operation = %operation, key = %key, error = %e, "Upstream call failed, nothing cached");
                return Err(e);
            }
        };

        self.store.lock().set(key.as_str(), value.to_cached(), ttl);
        debug!(operation = %operation, key = %key, ttl_secs = ttl, "Cached upstream result");

        Ok(value)
    }
}

#[async_trait]
impl<C: CfToolsClient> CfToolsClient for CachingClient<C> {
    async fn get_game_server_details(
        &self,
        request: GetGameServerDetailsRequest,
    ) -> Result<GameServerItem> {
        self.read_through(
            Operation::GameServerDetails,
            request,
            key::game_server_key,
            |request| self.inner.get_game_server_details(request),
        )
        .await
    }

    async fn get_player_details(&self, request: PlayerRequest) -> Result<Player> {
        self.read_through(
            Operation::PlayerDetails,
            request,
            |request| key::player_key(Operation::PlayerDetails, request, self.default_server()),
            |request| self.inner.get_player_details(request),
        )
        .await
    }

    async fn get_leaderboard(&self, request: GetLeaderboardRequest) -> Result<Vec<LeaderboardItem>> {
        self.read_through(
            Operation::Leaderboard,
            request,
            |request| key::leaderboard_key(request, self.default_server()),
            |request| self.inner.get_leaderboard(request),
        )
        .await
    }

    async fn get_priority_queue(&self, request: PlayerRequest) -> Result<Option<PriorityQueueItem>> {
        self.read_through(
            Operation::PriorityQueue,
            request,
            |request| key::player_key(Operation::PriorityQueue, request, self.default_server()),
            |request| self.inner.get_priority_queue(request),
        )
        .await
    }

    async fn put_priority_queue(&self, request: PutListItemRequest) -> Result<()> {
        self.inner.put_priority_queue(request).await
    }

    async fn delete_priority_queue(&self, request: PlayerRequest) -> Result<()> {
        self.inner.delete_priority_queue(request).await
    }

    async fn get_whitelist(&self, request: PlayerRequest) -> Result<Option<WhitelistItem>> {
        self.read_through(
            Operation::Whitelist,
            request,
            |request| key::player_key(Operation::Whitelist, request, self.default_server()),
            |request| self.inner.get_whitelist(request),
        )
        .await
    }

    async fn put_whitelist(&self, request: PutListItemRequest) -> Result<()> {
        self.inner.put_whitelist(request).await
    }

    async fn delete_whitelist(&self, request: PlayerRequest) -> Result<()> {
        self.inner.delete_whitelist(request).await
    }
}
