use chrono::NaiveDate;
use sql_middleware::middleware::ConfigAndPool;

use crate::controller::cache::{
    CacheKey, CacheKind, CacheMap, CachedValue, entry_age, get_if_fresh, put,
};
use crate::model::matchplay::{MatchplayStates, field_stats, states_against_field};
use crate::model::points::{PointsLedger, player_ledger};
use crate::model::types::{FieldStat, LeaderboardRow};
use crate::model::utils::format_time_ago;
use crate::model::{get_leaderboard_rows, get_week_scorecards};

/// Everything the scoring page needs for one viewer: the field, derived
/// display state, and the viewer's own authoritative points.
pub struct WeeklyScoreData {
    pub leaderboard: Vec<LeaderboardRow>,
    pub field_stats: Vec<FieldStat>,
    pub matchplay: MatchplayStates,
    pub viewer_id: i64,
    pub viewer_scores: Vec<i32>,
    pub hole_points: PointsLedger,
    pub last_refresh: String,
}

/// # Errors
///
/// Will return `Err` if the database query fails
pub async fn get_leaderboard(
    config_and_pool: &ConfigAndPool,
    cache_map: &CacheMap,
    tournament_id: i32,
    week: NaiveDate,
    use_cache: bool,
) -> Result<Vec<LeaderboardRow>, Box<dyn std::error::Error>> {
    let key = CacheKey {
        tournament_id,
        week,
        kind: CacheKind::Leaderboard,
    };
    let now = chrono::Utc::now();

    if use_cache {
        if let Some(CachedValue::Leaderboard(rows)) = get_if_fresh(cache_map, &key, now).await {
            return Ok(rows);
        }
    }

    let rows = get_leaderboard_rows(config_and_pool, tournament_id, week).await?;
    put(cache_map, key, CachedValue::Leaderboard(rows.clone()), now).await;
    Ok(rows)
}

/// # Errors
///
/// Will return `Err` if the database query fails
pub async fn get_field_stats(
    config_and_pool: &ConfigAndPool,
    cache_map: &CacheMap,
    tournament_id: i32,
    week: NaiveDate,
    use_cache: bool,
) -> Result<Vec<FieldStat>, Box<dyn std::error::Error>> {
    let key = CacheKey {
        tournament_id,
        week,
        kind: CacheKind::FieldStats,
    };
    let now = chrono::Utc::now();

    if use_cache {
        if let Some(CachedValue::FieldStats(stats)) = get_if_fresh(cache_map, &key, now).await {
            return Ok(stats);
        }
    }

    let cards = get_week_scorecards(config_and_pool, tournament_id, week).await?;
    let scored: Vec<(i64, Vec<i32>)> = cards
        .into_iter()
        .map(|c| (c.player_id, c.hole_scores))
        .collect();
    let stats = field_stats(&scored);
    put(cache_map, key, CachedValue::FieldStats(stats.clone()), now).await;
    Ok(stats)
}

/// The viewer's authoritative hole/round points ledger.
///
/// # Errors
///
/// Will return `Err` if the database query fails
pub async fn get_hole_points(
    config_and_pool: &ConfigAndPool,
    cache_map: &CacheMap,
    tournament_id: i32,
    player_id: i64,
    week: NaiveDate,
    use_cache: bool,
) -> Result<PointsLedger, Box<dyn std::error::Error>> {
    let key = CacheKey {
        tournament_id,
        week,
        kind: CacheKind::HolePoints(player_id),
    };
    let now = chrono::Utc::now();

    if use_cache {
        if let Some(CachedValue::HolePoints(ledger)) = get_if_fresh(cache_map, &key, now).await {
            return Ok(ledger);
        }
    }

    let cards = get_week_scorecards(config_and_pool, tournament_id, week).await?;
    let yours = cards
        .iter()
        .find(|c| c.player_id == player_id)
        .map(|c| c.hole_scores.clone())
        .unwrap_or_default();
    let opponents: Vec<(i64, Vec<i32>)> = cards
        .into_iter()
        .filter(|c| c.player_id != player_id)
        .map(|c| (c.player_id, c.hole_scores))
        .collect();

    let ledger = player_ledger(&yours, &opponents);
    put(cache_map, key, CachedValue::HolePoints(ledger.clone()), now).await;
    Ok(ledger)
}

/// # Errors
///
/// Will return `Err` if the database query fails
pub async fn get_data_for_scores_page(
    config_and_pool: &ConfigAndPool,
    cache_map: &CacheMap,
    tournament_id: i32,
    week: NaiveDate,
    viewer_id: i64,
    use_cache: bool,
) -> Result<WeeklyScoreData, Box<dyn std::error::Error>> {
    let leaderboard =
        get_leaderboard(config_and_pool, cache_map, tournament_id, week, use_cache).await?;
    let field_stats =
        get_field_stats(config_and_pool, cache_map, tournament_id, week, use_cache).await?;
    let hole_points = get_hole_points(
        config_and_pool,
        cache_map,
        tournament_id,
        viewer_id,
        week,
        use_cache,
    )
    .await?;

    let viewer_scores = leaderboard
        .iter()
        .find(|row| row.player_id == viewer_id)
        .map(|row| row.hole_scores.clone())
        .unwrap_or_default();

    // rebuilt wholesale on every refresh; nothing incremental to go stale
    let matchplay = states_against_field(&viewer_scores, &leaderboard, viewer_id);

    let key = CacheKey {
        tournament_id,
        week,
        kind: CacheKind::Leaderboard,
    };
    let last_refresh = match entry_age(cache_map, &key, chrono::Utc::now()).await {
        Some(age) => format_time_ago(age),
        None => "just now".to_string(),
    };

    Ok(WeeklyScoreData {
        leaderboard,
        field_stats,
        matchplay,
        viewer_id,
        viewer_scores,
        hole_points,
        last_refresh,
    })
}
