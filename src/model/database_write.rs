use chrono::NaiveDate;
use sql_middleware::{AsyncDatabaseExecutor, SqlMiddlewareDbError};
use sql_middleware::middleware::{ConfigAndPool, MiddlewarePool, MiddlewarePoolConnection};
use sql_middleware::middleware::{QueryAndParams as QueryAndParams2, RowValues as RowValues2};

use crate::model::database_read::{get_current_scorecard, get_week_scorecards};
use crate::model::points::{self, MatchWinner};
use crate::model::types::WeeklyScorecard;

/// First write wins per hole: once a hole holds a score > 0 it is terminal,
/// so a delayed duplicate submit cannot overwrite it. This replaces the
/// client-side `submitted` flag as the idempotency guard.
#[must_use]
pub fn merge_hole_scores(existing: &[i32], incoming: &[i32]) -> Vec<i32> {
    existing
        .iter()
        .zip(incoming)
        .map(|(&old, &new)| if old > 0 { old } else { new.max(0) })
        .collect()
}

/// # Errors
///
/// Will return `Err` if the database query fails
pub async fn execute_batch_sql(
    config_and_pool: &ConfigAndPool,
    query: &str,
) -> Result<(), SqlMiddlewareDbError> {
    let pool = config_and_pool.pool.get().await?;
    let mut conn = MiddlewarePool::get_connection(pool).await?;

    conn.execute_batch(query).await
}

/// Store (or merge into) the player's card for the week, then recompute every
/// pairwise match and the leaderboard for that week from scratch. Returns the
/// card as stored.
///
/// The read, merge, and upsert all happen inside one transaction; two
/// concurrent submits for the same player serialize instead of merging
/// against a stale read.
///
/// # Errors
///
/// Will return `Err` if the database query fails
pub async fn upsert_weekly_scorecard(
    config_and_pool: &ConfigAndPool,
    tournament_id: i32,
    player_id: i64,
    week: NaiveDate,
    hole_scores: &[i32],
    is_live: bool,
    group_id: Option<&str>,
) -> Result<WeeklyScorecard, SqlMiddlewareDbError> {
    let incoming = hole_scores.to_vec();
    let week_str = week.to_string();
    // empty string stands in for "no group"
    let group = group_id.unwrap_or_default().to_string();

    let pool = config_and_pool.pool.get().await?;
    let conn = MiddlewarePool::get_connection(pool).await?;
    match conn {
        MiddlewarePoolConnection::Sqlite(sqlite_conn) => {
            sqlite_conn
                .with_connection(move |db_conn| {
                    let tx = db_conn.transaction()?;

                    let existing: Option<String> = {
                        let mut stmt = tx.prepare(
                            "SELECT hole_scores FROM weekly_scorecard
                             WHERE tournament_id = ?1 AND player_id = ?2 AND week_start_date = ?3",
                        )?;
                        let mut rows =
                            stmt.query(rusqlite::params![tournament_id, player_id, week_str])?;
                        match rows.next()? {
                            Some(row) => Some(row.get(0)?),
                            None => None,
                        }
                    };

                    let merged = match existing {
                        Some(json) => {
                            let stored: Vec<i32> = serde_json::from_str(&json).map_err(|e| {
                                SqlMiddlewareDbError::Other(format!(
                                    "Failed to parse hole_scores field: {e}"
                                ))
                            })?;
                            merge_hole_scores(&stored, &incoming)
                        }
                        None => incoming.iter().map(|&s| s.max(0)).collect(),
                    };
                    let total_score: i32 = merged.iter().sum();
                    let scores_json = serde_json::to_string(&merged).map_err(|e| {
                        SqlMiddlewareDbError::Other(format!("Failed to serialize hole scores: {e}"))
                    })?;

                    tx.execute(
                        include_str!("../sql/functions/sqlite/04_sp_upsert_scorecard.sql"),
                        rusqlite::params![
                            tournament_id,
                            player_id,
                            week_str,
                            scores_json,
                            total_score,
                            i64::from(is_live),
                            group
                        ],
                    )?;
                    tx.commit()?;
                    Ok::<_, SqlMiddlewareDbError>(())
                })
                .await?;
        }
        MiddlewarePoolConnection::Postgres(_) => {
            return Err(SqlMiddlewareDbError::Other(
                "Database type not supported for this operation".to_string(),
            ));
        }
    }

    recompute_week(config_and_pool, tournament_id, week).await?;

    get_current_scorecard(config_and_pool, tournament_id, player_id, week)
        .await?
        .ok_or_else(|| SqlMiddlewareDbError::Other("Scorecard missing after upsert".to_string()))
}

/// Rebuild the week's `weekly_match` and `weekly_leaderboard` rows from the
/// stored cards. Wholesale recompute rather than incremental patching; the
/// field is small and this avoids partial-update races.
///
/// # Errors
///
/// Will return `Err` if the database query fails
pub async fn recompute_week(
    config_and_pool: &ConfigAndPool,
    tournament_id: i32,
    week: NaiveDate,
) -> Result<(), SqlMiddlewareDbError> {
    let cards = get_week_scorecards(config_and_pool, tournament_id, week).await?;
    let scored: Vec<(i64, Vec<i32>)> = cards
        .iter()
        .map(|c| (c.player_id, c.hole_scores.clone()))
        .collect();

    let match_queries = build_match_queries(&scored, tournament_id, week);
    let leaderboard_queries = build_leaderboard_queries(&scored, tournament_id, week);

    let pool = config_and_pool.pool.get().await?;
    let mut conn = MiddlewarePool::get_connection(pool).await?;
    match &mut conn {
        sqlite_conn @ MiddlewarePoolConnection::Sqlite { .. } => {
            execute_sqlite_queries(sqlite_conn, match_queries).await?;
            execute_sqlite_queries(sqlite_conn, leaderboard_queries).await?;
        }
        MiddlewarePoolConnection::Postgres { .. } => {
            return Err(SqlMiddlewareDbError::Other(
                "Database type not supported for this operation".to_string(),
            ));
        }
    }
    Ok(())
}

fn build_match_queries(
    cards: &[(i64, Vec<i32>)],
    tournament_id: i32,
    week: NaiveDate,
) -> Vec<QueryAndParams2> {
    let insert_stmt = include_str!("../sql/functions/sqlite/05_sp_upsert_match.sql");
    let mut queries = vec![];

    for i in 0..cards.len() {
        for j in i + 1..cards.len() {
            let (p1_id, p1_scores) = &cards[i];
            let (p2_id, p2_scores) = &cards[j];
            let Some(outcome) = points::score_match(p1_scores, p2_scores) else {
                continue;
            };

            // 0 = tied match; player ids start at 1
            let winner_id = match outcome.winner {
                Some(MatchWinner::Player1) => RowValues2::Int(*p1_id),
                Some(MatchWinner::Player2) => RowValues2::Int(*p2_id),
                None => RowValues2::Int(0),
            };

            let params = vec![
                RowValues2::Int(i64::from(tournament_id)),
                RowValues2::Text(week.to_string()),
                RowValues2::Int(*p1_id),
                RowValues2::Int(*p2_id),
                RowValues2::Float(outcome.hole_points.0),
                RowValues2::Float(outcome.hole_points.1),
                RowValues2::Float(outcome.round_points[0].0),
                RowValues2::Float(outcome.round_points[0].1),
                RowValues2::Float(outcome.round_points[1].0),
                RowValues2::Float(outcome.round_points[1].1),
                RowValues2::Float(outcome.round_points[2].0),
                RowValues2::Float(outcome.round_points[2].1),
                winner_id,
                RowValues2::Float(outcome.total_points.0),
                RowValues2::Float(outcome.total_points.1),
            ];
            queries.push(QueryAndParams2 {
                query: insert_stmt.to_string(),
                params,
            });
        }
    }

    queries
}

fn build_leaderboard_queries(
    cards: &[(i64, Vec<i32>)],
    tournament_id: i32,
    week: NaiveDate,
) -> Vec<QueryAndParams2> {
    let insert_stmt = include_str!("../sql/functions/sqlite/06_sp_upsert_leaderboard.sql");
    let totals = points::week_totals(cards);

    // players with a card but no match yet still get a row
    cards
        .iter()
        .map(|(player_id, _)| {
            let t = totals.get(player_id).cloned().unwrap_or_default();
            QueryAndParams2 {
                query: insert_stmt.to_string(),
                params: vec![
                    RowValues2::Int(i64::from(tournament_id)),
                    RowValues2::Text(week.to_string()),
                    RowValues2::Int(*player_id),
                    RowValues2::Float(t.hole_points),
                    RowValues2::Float(t.round_points),
                    RowValues2::Float(t.total_score()),
                    RowValues2::Int(i64::from(t.matches_played)),
                    RowValues2::Int(i64::from(t.matches_won)),
                    RowValues2::Int(i64::from(t.matches_tied)),
                    RowValues2::Int(i64::from(t.matches_lost)),
                ],
            }
        })
        .collect()
}

async fn execute_sqlite_queries(
    sqlite_conn: &mut MiddlewarePoolConnection,
    queries: Vec<QueryAndParams2>,
) -> Result<(), SqlMiddlewareDbError> {
    let Some(first) = queries.first() else {
        return Ok(());
    };

    let insert_sql = first.query.clone();
    let mut prepared = sqlite_conn.prepare_sqlite_statement(&insert_sql).await?;

    for query in queries {
        prepared.execute(&query.params).await?;
    }

    Ok(())
}
