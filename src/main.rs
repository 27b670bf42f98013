use deadpool_postgres::{ManagerConfig, RecyclingMethod};
use mulligan_league::args;
use mulligan_league::controller::cache::{CacheMap, new_cache_map};
use mulligan_league::controller::refresh::{
    RefreshConfig, new_status_handle, spawn_leaderboard_refresh,
};
use mulligan_league::controller::score::{
    current_scorecard, scores, submit_scorecard, weekly_field_stats, weekly_hole_points,
    weekly_leaderboard,
};
use mulligan_league::model::get_tournament_details;
use sql_middleware::SqlMiddlewareDbError;
use sql_middleware::middleware::{
    ConfigAndPool, DatabaseType, MiddlewarePool, MiddlewarePoolConnection, QueryAndParams,
};

use actix_files::Files;
use actix_web::web::Data;
use actix_web::{App, HttpResponse, HttpServer, Responder, web};
use std::collections::HashMap;
use std::time::Duration;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = args::args_checks();

    let cfg = deadpool_postgres::Config::new();
    let config_and_pool: ConfigAndPool;
    if args.db_type == DatabaseType::Postgres {
        let mut postgres_config = cfg;
        postgres_config.dbname = Some(args.db_name);
        postgres_config.host = args.db_host;
        postgres_config.port = args.db_port;
        postgres_config.user = args.db_user;
        postgres_config.password = args.db_password;
        postgres_config.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });
        config_and_pool = ConfigAndPool::new_postgres(postgres_config).await?;
    } else {
        let a = ConfigAndPool::new_sqlite(args.db_name).await;
        match a {
            Ok(a) => {
                config_and_pool = a;
            }
            Err(e) => {
                eprintln!(
                    "Error: {}\nBacktrace: {:?}",
                    e,
                    std::backtrace::Backtrace::capture()
                );
                std::process::exit(1);
            }
        }
    }

    if args.db_startup_script.is_some() {
        let script = args.combined_sql_script;
        let query_and_params = QueryAndParams {
            query: script,
            params: vec![],
        };

        let pool = config_and_pool.pool.get().await?;
        let sconn = MiddlewarePool::get_connection(pool).await?;
        (match sconn {
            MiddlewarePoolConnection::Postgres(mut xx) => {
                let tx = xx.transaction().await?;

                tx.batch_execute(&query_and_params.query).await?;
                tx.commit().await?;
                Ok::<_, SqlMiddlewareDbError>(())
            }
            MiddlewarePoolConnection::Sqlite(xx) => {
                xx.with_connection(move |xxx| {
                    let tx = xxx.transaction()?;
                    tx.execute_batch(&query_and_params.query)?;

                    tx.commit()?;
                    Ok::<_, SqlMiddlewareDbError>(())
                })
                .await
            }
        })?;
    }

    let cache_map = new_cache_map();
    let refresh_status = new_status_handle();

    if let Some(tournament_id) = args.refresh_tournament {
        let cfg = RefreshConfig {
            interval: Duration::from_secs(args.refresh_interval),
            ..RefreshConfig::default()
        };
        spawn_leaderboard_refresh(
            config_and_pool.clone(),
            cache_map.clone(),
            refresh_status.clone(),
            tournament_id,
            cfg,
        );
    }

    HttpServer::new(move || {
        App::new()
            .app_data(Data::new(config_and_pool.clone()))
            .app_data(Data::new(cache_map.clone()))
            .app_data(Data::new(refresh_status.clone()))
            .route("/", web::get().to(index))
            .route("/scores", web::get().to(scores))
            .route("/health", web::get().to(HttpResponse::Ok))
            .route(
                "/api/tournaments/{tournament_id}/weekly-scorecard",
                web::post().to(submit_scorecard),
            )
            .route(
                "/api/tournaments/{tournament_id}/weekly-scorecard/current",
                web::get().to(current_scorecard),
            )
            .route(
                "/api/tournaments/{tournament_id}/weekly-leaderboard",
                web::get().to(weekly_leaderboard),
            )
            .route(
                "/api/tournaments/{tournament_id}/weekly-field-stats",
                web::get().to(weekly_field_stats),
            )
            .route(
                "/api/tournaments/{tournament_id}/weekly-hole-points/{player_id}",
                web::get().to(weekly_hole_points),
            )
            .service(Files::new("/static", "./static").show_files_listing())
    })
    .bind("0.0.0.0:8081")?
    .run()
    .await?;
    Ok(())
}

async fn index(
    query: web::Query<HashMap<String, String>>,
    abc: Data<ConfigAndPool>,
) -> impl Responder {
    let config_and_pool = abc.get_ref().clone();
    let tournament_str = query.get("tournament").cloned().unwrap_or_default();
    let player_str = query.get("player").cloned().unwrap_or_default();

    let tournament_id: i32 = tournament_str.parse().unwrap_or(0);
    let player_id: i64 = player_str.parse().unwrap_or(0);

    let title = match get_tournament_details(&config_and_pool, tournament_id).await {
        Ok(details) => details.tournament_name,
        Err(e) => {
            eprintln!("Error: {e}");
            "Weekly Scoring".to_string()
        }
    };

    let markup = mulligan_league::view::index::render_index_template(&title, tournament_id, player_id);
    HttpResponse::Ok()
        .content_type("text/html")
        .body(markup.into_string())
}
