use chrono::NaiveDate;
use sql_middleware::middleware::{
    ConfigAndPool, ConversionMode, CustomDbRow, MiddlewarePool, MiddlewarePoolConnection,
    ResultSet,
};
use sql_middleware::{SqlMiddlewareDbError, SqliteParamsQuery, convert_sql_params};
use sql_middleware::middleware::{QueryAndParams as QueryAndParams2, RowValues as RowValues2};

use crate::model::types::{LeaderboardRow, WeeklyScorecard};

/// # Errors
///
/// Will return `Err` if the JSON column does not parse
pub fn parse_json_field<T>(row: &CustomDbRow, field_name: &str) -> Result<T, SqlMiddlewareDbError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let json_text = row
        .get(field_name)
        .and_then(|v| v.as_text())
        .unwrap_or_default();

    serde_json::from_str(json_text).map_err(|e| {
        SqlMiddlewareDbError::Other(format!("Failed to parse {field_name} field: {e}"))
    })
}

fn get_int(row: &CustomDbRow, field: &str) -> i64 {
    row.get(field).and_then(|v| v.as_int()).map_or(0, |&v| v)
}

fn get_float(row: &CustomDbRow, field: &str) -> f64 {
    row.get(field).and_then(|v| v.as_float()).unwrap_or(0.0)
}

fn get_string(row: &CustomDbRow, field: &str) -> String {
    row.get(field)
        .and_then(|v| v.as_text())
        .unwrap_or_default()
        .to_string()
}

fn get_date(row: &CustomDbRow, field: &str) -> Result<NaiveDate, SqlMiddlewareDbError> {
    let text = get_string(row, field);
    NaiveDate::parse_from_str(&text, "%Y-%m-%d")
        .map_err(|e| SqlMiddlewareDbError::Other(format!("Bad date in {field}: {e}")))
}

/// # Errors
///
/// Will return `Err` if the database query fails
pub async fn execute_query(
    conn: &MiddlewarePoolConnection,
    query: &str,
    params: Vec<RowValues2>,
) -> Result<ResultSet, SqlMiddlewareDbError> {
    let query_and_params = QueryAndParams2 {
        query: query.to_string(),
        params,
    };

    match conn {
        MiddlewarePoolConnection::Sqlite(sqlite_conn) => {
            let result = sqlite_conn
                .with_connection(move |db_conn| {
                    let converted_params = convert_sql_params::<SqliteParamsQuery>(
                        &query_and_params.params,
                        ConversionMode::Query,
                    )?;
                    let tx = db_conn.transaction()?;

                    let result_set = {
                        let mut stmt = tx.prepare(&query_and_params.query)?;

                        sql_middleware::sqlite_build_result_set(&mut stmt, &converted_params.0)?
                    };
                    tx.commit()?;
                    Ok::<_, SqlMiddlewareDbError>(result_set)
                })
                .await?;

            Ok(result)
        }
        _ => Err(SqlMiddlewareDbError::Other(
            "Database type not supported for this operation".to_string(),
        )),
    }
}

fn scorecard_from_row(row: &CustomDbRow) -> Result<WeeklyScorecard, SqlMiddlewareDbError> {
    Ok(WeeklyScorecard {
        scorecard_id: get_int(row, "scorecard_id"),
        tournament_id: get_int(row, "tournament_id") as i32,
        player_id: get_int(row, "player_id"),
        week_start_date: get_date(row, "week_start_date")?,
        hole_scores: parse_json_field(row, "hole_scores")?,
        total_score: get_int(row, "total_score") as i32,
        is_live: get_int(row, "is_live") != 0,
        group_id: row
            .get("group_id")
            .and_then(|v| v.as_text())
            .filter(|s| !s.is_empty())
            .map(ToString::to_string),
        ins_ts: row
            .get("ins_ts")
            .and_then(|v| v.as_timestamp())
            .unwrap_or_else(|| chrono::Utc::now().naive_utc()),
    })
}

/// Every card submitted for this tournament week, one per player.
///
/// # Errors
///
/// Will return `Err` if the database query fails
pub async fn get_week_scorecards(
    config_and_pool: &ConfigAndPool,
    tournament_id: i32,
    week: NaiveDate,
) -> Result<Vec<WeeklyScorecard>, SqlMiddlewareDbError> {
    let pool = config_and_pool.pool.get().await?;
    let conn = MiddlewarePool::get_connection(pool).await?;
    let query = include_str!("../sql/functions/sqlite/02_sp_get_week_scorecards.sql");

    let res = execute_query(
        &conn,
        query,
        vec![
            RowValues2::Int(i64::from(tournament_id)),
            RowValues2::Text(week.to_string()),
        ],
    )
    .await?;

    res.results.iter().map(scorecard_from_row).collect()
}

/// Rehydration read for one player's card; `None` when nothing stored yet.
///
/// # Errors
///
/// Will return `Err` if the database query fails
pub async fn get_current_scorecard(
    config_and_pool: &ConfigAndPool,
    tournament_id: i32,
    player_id: i64,
    week: NaiveDate,
) -> Result<Option<WeeklyScorecard>, SqlMiddlewareDbError> {
    let pool = config_and_pool.pool.get().await?;
    let conn = MiddlewarePool::get_connection(pool).await?;
    let query = include_str!("../sql/functions/sqlite/03_sp_get_current_scorecard.sql");

    let res = execute_query(
        &conn,
        query,
        vec![
            RowValues2::Int(i64::from(tournament_id)),
            RowValues2::Text(week.to_string()),
            RowValues2::Int(player_id),
        ],
    )
    .await?;

    res.results.first().map(scorecard_from_row).transpose()
}

/// Leaderboard as stored, joined with player identity and each player's hole
/// scores; ordered by total score then hole points, both descending.
///
/// # Errors
///
/// Will return `Err` if the database query fails
pub async fn get_leaderboard_rows(
    config_and_pool: &ConfigAndPool,
    tournament_id: i32,
    week: NaiveDate,
) -> Result<Vec<LeaderboardRow>, SqlMiddlewareDbError> {
    let pool = config_and_pool.pool.get().await?;
    let conn = MiddlewarePool::get_connection(pool).await?;
    let query = include_str!("../sql/functions/sqlite/07_sp_get_leaderboard.sql");

    let res = execute_query(
        &conn,
        query,
        vec![
            RowValues2::Int(i64::from(tournament_id)),
            RowValues2::Text(week.to_string()),
        ],
    )
    .await?;

    res.results
        .iter()
        .map(|row| {
            let hole_scores = if row.get("hole_scores").and_then(|v| v.as_text()).is_some() {
                parse_json_field(row, "hole_scores")?
            } else {
                vec![0; crate::model::matchplay::HOLE_COUNT]
            };
            Ok(LeaderboardRow {
                player_id: get_int(row, "player_id"),
                first_name: get_string(row, "first_name"),
                last_name: get_string(row, "last_name"),
                club: get_string(row, "club"),
                hole_scores,
                total_score: get_float(row, "total_score"),
                total_hole_points: get_float(row, "total_hole_points"),
                total_round_points: get_float(row, "total_round_points"),
                matches_played: get_int(row, "matches_played") as i32,
                matches_won: get_int(row, "matches_won") as i32,
                matches_tied: get_int(row, "matches_tied") as i32,
                matches_lost: get_int(row, "matches_lost") as i32,
            })
        })
        .collect()
}
