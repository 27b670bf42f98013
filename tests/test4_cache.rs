use chrono::{Duration, NaiveDate, Utc};
use mulligan_league::controller::cache::{
    CACHE_DURATION_SECS, CacheKey, CacheKind, CachedValue, get_if_fresh, invalidate_week,
    new_cache_map, put,
};
use mulligan_league::model::types::FieldStat;

fn week() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
}

fn stats_value() -> CachedValue {
    CachedValue::FieldStats(vec![FieldStat {
        hole: 1,
        average_score: 4.5,
        total_players: 2,
        best_score: 4,
    }])
}

#[tokio::test]
async fn test4_fresh_entry_is_returned() {
    let cache = new_cache_map();
    let key = CacheKey {
        tournament_id: 1,
        week: week(),
        kind: CacheKind::FieldStats,
    };
    let now = Utc::now();

    put(&cache, key, stats_value(), now).await;

    let hit = get_if_fresh(&cache, &key, now + Duration::seconds(CACHE_DURATION_SECS - 1)).await;
    assert!(matches!(hit, Some(CachedValue::FieldStats(ref s)) if s.len() == 1));
}

#[tokio::test]
async fn test4_expired_entry_is_a_miss() {
    let cache = new_cache_map();
    let key = CacheKey {
        tournament_id: 1,
        week: week(),
        kind: CacheKind::FieldStats,
    };
    let now = Utc::now();

    put(&cache, key, stats_value(), now).await;

    let hit = get_if_fresh(&cache, &key, now + Duration::seconds(CACHE_DURATION_SECS)).await;
    assert!(hit.is_none());
}

#[tokio::test]
async fn test4_keys_are_scoped_by_week_and_kind() {
    let cache = new_cache_map();
    let now = Utc::now();
    let key = CacheKey {
        tournament_id: 1,
        week: week(),
        kind: CacheKind::FieldStats,
    };
    put(&cache, key, stats_value(), now).await;

    let other_week = CacheKey {
        week: week() + Duration::days(7),
        ..key
    };
    assert!(get_if_fresh(&cache, &other_week, now).await.is_none());

    let other_kind = CacheKey {
        kind: CacheKind::Leaderboard,
        ..key
    };
    assert!(get_if_fresh(&cache, &other_kind, now).await.is_none());

    let per_player = CacheKey {
        kind: CacheKind::HolePoints(7),
        ..key
    };
    assert!(get_if_fresh(&cache, &per_player, now).await.is_none());
}

#[tokio::test]
async fn test4_invalidate_week_clears_only_that_week() {
    let cache = new_cache_map();
    let now = Utc::now();
    let this_week = CacheKey {
        tournament_id: 1,
        week: week(),
        kind: CacheKind::FieldStats,
    };
    let next_week = CacheKey {
        week: week() + Duration::days(7),
        ..this_week
    };
    put(&cache, this_week, stats_value(), now).await;
    put(&cache, next_week, stats_value(), now).await;

    invalidate_week(&cache, 1, week()).await;

    assert!(get_if_fresh(&cache, &this_week, now).await.is_none());
    assert!(get_if_fresh(&cache, &next_week, now).await.is_some());
}
