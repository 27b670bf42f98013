use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::model::points::PointsLedger;
use crate::model::types::{FieldStat, LeaderboardRow};

pub const CACHE_DURATION_SECS: i64 = 300;

/// Typed cache key; one entry per tournament, week, and data kind.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct CacheKey {
    pub tournament_id: i32,
    pub week: NaiveDate,
    pub kind: CacheKind,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum CacheKind {
    Leaderboard,
    FieldStats,
    HolePoints(i64),
}

#[derive(Clone, Debug)]
pub enum CachedValue {
    Leaderboard(Vec<LeaderboardRow>),
    FieldStats(Vec<FieldStat>),
    HolePoints(PointsLedger),
}

#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub data: CachedValue,
    pub cached_time: DateTime<Utc>,
}

/// Read-through cache over the week's derived data. Never the source of truth
/// for scoring decisions; an expired or missing entry just means another read
/// from the database.
pub type CacheMap = Arc<RwLock<HashMap<CacheKey, CacheEntry>>>;

#[must_use]
pub fn new_cache_map() -> CacheMap {
    Arc::new(RwLock::new(HashMap::new()))
}

/// `now` is passed in rather than read from the wall clock so expiry is
/// testable without sleeping.
pub async fn get_if_fresh(
    cache_map: &CacheMap,
    key: &CacheKey,
    now: DateTime<Utc>,
) -> Option<CachedValue> {
    let map = cache_map.read().await;
    let entry = map.get(key)?;
    if now - entry.cached_time < chrono::Duration::seconds(CACHE_DURATION_SECS) {
        Some(entry.data.clone())
    } else {
        None
    }
}

pub async fn put(cache_map: &CacheMap, key: CacheKey, data: CachedValue, now: DateTime<Utc>) {
    let mut map = cache_map.write().await;
    map.insert(
        key,
        CacheEntry {
            data,
            cached_time: now,
        },
    );
}

/// Drops every cached entry for one tournament week. Called after a
/// scorecard write so the next read recomputes from the database.
pub async fn invalidate_week(cache_map: &CacheMap, tournament_id: i32, week: NaiveDate) {
    let mut map = cache_map.write().await;
    map.retain(|key, _| key.tournament_id != tournament_id || key.week != week);
}

/// Age of a cached entry, if present, regardless of freshness. Used for the
/// "last refresh" label; stale data stays displayable.
pub async fn entry_age(
    cache_map: &CacheMap,
    key: &CacheKey,
    now: DateTime<Utc>,
) -> Option<chrono::Duration> {
    let map = cache_map.read().await;
    map.get(key).map(|entry| now - entry.cached_time)
}
