use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sql_middleware::middleware::ConfigAndPool;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::controller::cache::{CacheKey, CacheKind, CacheMap, CachedValue, put};
use crate::model::database_read::get_leaderboard_rows;
use crate::model::utils::current_week_start;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
    Retrying,
    Error,
}

/// Snapshot of the background poller, shared with the HTTP layer so pages
/// can show when live updates have stopped.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RefreshStatus {
    pub status: ConnectionStatus,
    pub last_update: Option<chrono::DateTime<chrono::Utc>>,
    pub consecutive_failures: u32,
}

pub type RefreshStatusHandle = Arc<RwLock<RefreshStatus>>;

#[must_use]
pub fn new_status_handle() -> RefreshStatusHandle {
    Arc::new(RwLock::new(RefreshStatus {
        status: ConnectionStatus::Disconnected,
        last_update: None,
        consecutive_failures: 0,
    }))
}

#[derive(Clone, Copy, Debug)]
pub struct RefreshConfig {
    pub interval: Duration,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        RefreshConfig {
            interval: Duration::from_secs(5),
            retry_attempts: 3,
            retry_delay: Duration::from_secs(5),
        }
    }
}

/// One refresh pass: re-read the leaderboard and replace the cache entry.
/// On failure the stale entry is left in place.
///
/// # Errors
///
/// Will return `Err` if the database query fails
pub async fn refresh_leaderboard_once(
    config_and_pool: &ConfigAndPool,
    cache_map: &CacheMap,
    tournament_id: i32,
    week: NaiveDate,
) -> Result<(), sql_middleware::SqlMiddlewareDbError> {
    let rows = get_leaderboard_rows(config_and_pool, tournament_id, week).await?;
    let key = CacheKey {
        tournament_id,
        week,
        kind: CacheKind::Leaderboard,
    };
    put(cache_map, key, CachedValue::Leaderboard(rows), chrono::Utc::now()).await;
    Ok(())
}

/// One scheduled pass with its bounded retries. A failed attempt retries up
/// to `retry_attempts` times at `retry_delay` spacing; after that the status
/// sticks at `Error` until a later pass succeeds, and cached data is never
/// cleared.
pub async fn run_refresh_pass(
    config_and_pool: &ConfigAndPool,
    cache_map: &CacheMap,
    status: &RefreshStatusHandle,
    tournament_id: i32,
    week: NaiveDate,
    cfg: &RefreshConfig,
) {
    let mut attempt = 0;
    loop {
        match refresh_leaderboard_once(config_and_pool, cache_map, tournament_id, week).await {
            Ok(()) => {
                let mut st = status.write().await;
                st.status = ConnectionStatus::Connected;
                st.last_update = Some(chrono::Utc::now());
                st.consecutive_failures = 0;
                break;
            }
            Err(e) => {
                eprintln!("leaderboard refresh failed: {e}");
                attempt += 1;
                let mut st = status.write().await;
                st.consecutive_failures += 1;
                if attempt > cfg.retry_attempts {
                    st.status = ConnectionStatus::Error;
                    drop(st);
                    break;
                }
                st.status = ConnectionStatus::Retrying;
                drop(st);
                tokio::time::sleep(cfg.retry_delay).await;
            }
        }
    }
}

/// Recurring leaderboard refresh; the normal cadence continues even after a
/// pass ends in `Error`. Not spawning this task at all is "manual mode".
pub fn spawn_leaderboard_refresh(
    config_and_pool: ConfigAndPool,
    cache_map: CacheMap,
    status: RefreshStatusHandle,
    tournament_id: i32,
    cfg: RefreshConfig,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(cfg.interval);
        loop {
            ticker.tick().await;

            // re-evaluated every tick so a week rollover mid-run is picked up
            let week = current_week_start();
            run_refresh_pass(
                &config_and_pool,
                &cache_map,
                &status,
                tournament_id,
                week,
                &cfg,
            )
            .await;
        }
    })
}
