use sql_middleware::SqlMiddlewareDbError;
use sql_middleware::middleware::{ConfigAndPool, MiddlewarePool, MiddlewarePoolConnection};
use sql_middleware::middleware::RowValues as RowValues2;

use crate::model::database_read::execute_query;
use crate::model::types::TournamentDetails;

/// # Errors
///
/// Will return `Err` if the database query fails or the tournament is unknown
pub async fn get_tournament_details(
    config_and_pool: &ConfigAndPool,
    tournament_id: i32,
) -> Result<TournamentDetails, SqlMiddlewareDbError> {
    let pool = config_and_pool.pool.get().await?;
    let conn = MiddlewarePool::get_connection(pool).await?;

    let query = match &conn {
        MiddlewarePoolConnection::Postgres(_) => {
            "SELECT tournament_id, name FROM tournament WHERE tournament_id = $1"
        }
        MiddlewarePoolConnection::Sqlite(_) => {
            include_str!("../sql/functions/sqlite/01_sp_get_tournament.sql")
        }
    };

    let res = execute_query(&conn, query, vec![RowValues2::Int(i64::from(tournament_id))]).await?;

    res.results
        .first()
        .map(|row| {
            Ok(TournamentDetails {
                tournament_id: row
                    .get("tournament_id")
                    .and_then(|v| v.as_int())
                    .map(|&v| v as i32)
                    .ok_or(SqlMiddlewareDbError::Other(
                        "Tournament id not found".to_string(),
                    ))?,
                tournament_name: row
                    .get("name")
                    .and_then(|v| v.as_text())
                    .map(ToString::to_string)
                    .ok_or(SqlMiddlewareDbError::Other(
                        "Tournament name not found".to_string(),
                    ))?,
            })
        })
        .unwrap_or_else(|| Err(SqlMiddlewareDbError::Other("No results found".to_string())))
}
