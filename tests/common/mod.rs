use std::time::{SystemTime, UNIX_EPOCH};

use sql_middleware::SqlMiddlewareDbError;
use sql_middleware::middleware::{ConfigAndPool, MiddlewarePool, MiddlewarePoolConnection};

pub struct TestContext {
    pub config_and_pool: ConfigAndPool,
}

pub async fn setup_test_context(fixture_sql: &str) -> Result<TestContext, SqlMiddlewareDbError> {
    let db_name = format!(
        "file:test_db_{}?mode=memory&cache=shared",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time went backwards")
            .as_nanos()
    );

    let config_and_pool = ConfigAndPool::new_sqlite(db_name).await?;

    execute_batch_sql(
        &config_and_pool,
        include_str!("../../src/sql/schema/sqlite/00_table_drop.sql"),
    )
    .await?;

    let schema = [
        include_str!("../../src/sql/schema/sqlite/00_tournament.sql"),
        include_str!("../../src/sql/schema/sqlite/01_player.sql"),
        include_str!("../../src/sql/schema/sqlite/02_weekly_scorecard.sql"),
        include_str!("../../src/sql/schema/sqlite/03_weekly_match.sql"),
        include_str!("../../src/sql/schema/sqlite/04_weekly_leaderboard.sql"),
    ]
    .join("\n");
    execute_batch_sql(&config_and_pool, &schema).await?;

    if !fixture_sql.is_empty() {
        execute_batch_sql(&config_and_pool, fixture_sql).await?;
    }

    Ok(TestContext { config_and_pool })
}

#[allow(dead_code)]
pub async fn execute_batch_sql(
    config_and_pool: &ConfigAndPool,
    sql: &str,
) -> Result<(), SqlMiddlewareDbError> {
    let pool = config_and_pool.pool.get().await?;
    let conn = MiddlewarePool::get_connection(pool).await?;

    match conn {
        MiddlewarePoolConnection::Sqlite(sqlite_conn) => {
            let sql_owned = sql.to_owned();
            sqlite_conn
                .with_connection(move |conn| {
                    let tx = conn.transaction()?;
                    tx.execute_batch(&sql_owned)?;
                    tx.commit()?;
                    Ok::<_, SqlMiddlewareDbError>(())
                })
                .await?;
            Ok(())
        }
        MiddlewarePoolConnection::Postgres(mut pg_conn) => {
            let tx = pg_conn.transaction().await?;
            tx.batch_execute(sql).await?;
            tx.commit().await?;
            Ok(())
        }
    }
}
