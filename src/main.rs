//! CFTools Client CLI
//!
//! Runs one read command against CFTools Cloud through the caching client
//! and prints the result as JSON.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cftools_client::models::{
    Game, GetGameServerDetailsRequest, GetLeaderboardRequest, SortOrder, Statistic, SteamId64,
};
use cftools_client::{spawn_cleanup_task, CfToolsClientBuilder, Config};

const USAGE: &str = "usage: cftools-client <command> [args]

commands:
  player <steam64>                          player details
  leaderboard <stat> [asc|desc] [limit]     leaderboard page
  priority-queue <steam64>                  priority queue entry
  whitelist <steam64>                       whitelist entry
  server <ip> <port>                        DayZ game server status";

#[tokio::main]
async fn main() -> Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cftools_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        bail!(USAGE);
    };

    let config = Config::from_env();
    info!(
        "Configuration loaded: base_url={}, server_api_id={:?}, cleanup_interval={}s",
        config.base_url, config.server_api_id, config.cleanup_interval
    );

    let mut builder = CfToolsClientBuilder::new()
        .with_base_url(config.base_url.clone())
        .with_cache(config.cache_ttls);
    if let Some(server_api_id) = &config.server_api_id {
        builder = builder.with_server_api_id(server_api_id.clone());
    }
    if let Some((application_id, secret)) = config.credentials() {
        builder = builder.with_credentials(application_id, secret);
    }
    let built = builder.build().context("Failed to build CFTools client")?;

    let cleanup_handle = built
        .cache_store
        .clone()
        .map(|store| spawn_cleanup_task(store, config.cleanup_interval));

    let client = &built.client;
    let output = match command.as_str() {
        "player" => {
            let id = steam_id(rest)?;
            to_json(&client.get_player_details(id.into()).await?)?
        }
        "leaderboard" => {
            let request = leaderboard_request(rest)?;
            to_json(&client.get_leaderboard(request).await?)?
        }
        "priority-queue" => {
            let id = steam_id(rest)?;
            to_json(&client.get_priority_queue(id.into()).await?)?
        }
        "whitelist" => {
            let id = steam_id(rest)?;
            to_json(&client.get_whitelist(id.into()).await?)?
        }
        "server" => {
            let (ip, port) = match rest {
                [ip, port, ..] => (ip, port),
                _ => bail!("server needs <ip> <port>\n\n{}", USAGE),
            };
            let port: u16 = port.parse().context("port must be a number")?;
            let request = GetGameServerDetailsRequest::new(Game::DayZ, ip.clone(), port);
            to_json(&client.get_game_server_details(request).await?)?
        }
        other => bail!("unknown command {:?}\n\n{}", other, USAGE),
    };

    println!("{}", output);

    if let Some(store) = &built.cache_store {
        let stats = store.lock().stats();
        info!(
            "Cache: {} lookups, hit rate {:.2}, {} entries",
            stats.lookups(),
            stats.hit_rate(),
            stats.total_entries
        );
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
    }
    Ok(())
}

fn steam_id(args: &[String]) -> Result<SteamId64> {
    match args.first() {
        Some(id) => Ok(SteamId64::new(id.clone())),
        None => bail!("missing <steam64> argument\n\n{}", USAGE),
    }
}

fn leaderboard_request(args: &[String]) -> Result<GetLeaderboardRequest> {
    let stat = args
        .first()
        .context("missing <stat> argument")?;
    let statistic = Statistic::parse(stat).with_context(|| format!("unknown statistic {:?}", stat))?;

    let order = match args.get(1).map(|s| s.to_ascii_lowercase()).as_deref() {
        None | Some("desc") => SortOrder::Desc,
        Some("asc") => SortOrder::Asc,
        Some(other) => bail!("order must be asc or desc, got {:?}", other),
    };

    let mut request = GetLeaderboardRequest::new(statistic, order);
    if let Some(limit) = args.get(2) {
        request = request.with_limit(limit.parse().context("limit must be a number")?);
    }
    Ok(request)
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to render response")
}
