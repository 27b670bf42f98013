use actix_web::web::{self, Data};
use actix_web::{HttpResponse, Responder};
use chrono::NaiveDate;
use serde_json::json;
use sql_middleware::middleware::ConfigAndPool;
use std::collections::HashMap;

use super::data_service::{
    get_data_for_scores_page, get_field_stats, get_hole_points, get_leaderboard,
};
use crate::controller::cache::{CacheMap, invalidate_week};
use crate::controller::refresh::RefreshStatusHandle;
use crate::model::matchplay::HOLE_COUNT;
use crate::model::types::{MAX_HOLE_SCORE, SubmitScorecard};
use crate::model::utils::{current_week_start, week_start};
use crate::model::{get_current_scorecard, get_tournament_details, upsert_weekly_scorecard};
use crate::view::score::render_scores_template;

fn get_param_str<'a>(query: &'a HashMap<String, String>, key: &str) -> &'a str {
    query.get(key).map(|s| s.as_str()).unwrap_or("")
}

/// The `week_start_date` query parameter names any date inside the target
/// week; it normalizes to that week's Monday. Absent or malformed means this
/// week.
fn parse_week(query: &HashMap<String, String>) -> NaiveDate {
    match NaiveDate::parse_from_str(get_param_str(query, "week_start_date"), "%Y-%m-%d") {
        Ok(date) => week_start(date),
        Err(_) => current_week_start(),
    }
}

fn parse_use_cache(query: &HashMap<String, String>) -> bool {
    match get_param_str(query, "cache") {
        "0" => false,
        _ => true,
    }
}

pub async fn submit_scorecard(
    path: web::Path<i32>,
    body: web::Json<SubmitScorecard>,
    abc: Data<ConfigAndPool>,
    cache_map: Data<CacheMap>,
) -> impl Responder {
    let tournament_id = path.into_inner();
    let config_and_pool = abc.get_ref().clone();
    let submission = body.into_inner();

    if submission.hole_scores.len() != HOLE_COUNT {
        return HttpResponse::BadRequest().json(json!({
            "error": format!("hole_scores must contain exactly {HOLE_COUNT} entries")
        }));
    }
    if submission.hole_scores.iter().all(|&s| s <= 0) {
        return HttpResponse::BadRequest()
            .json(json!({"error": "at least one hole score must be submitted"}));
    }
    if submission
        .hole_scores
        .iter()
        .any(|&s| s < 0 || s > MAX_HOLE_SCORE)
    {
        return HttpResponse::BadRequest().json(json!({
            "error": format!("hole scores must be between 0 and {MAX_HOLE_SCORE}")
        }));
    }

    if get_tournament_details(&config_and_pool, tournament_id)
        .await
        .is_err()
    {
        return HttpResponse::NotFound().json(json!({"error": "tournament not found"}));
    }

    let week = match submission.week_start_date {
        Some(date) => week_start(date),
        None => current_week_start(),
    };

    let result = upsert_weekly_scorecard(
        &config_and_pool,
        tournament_id,
        submission.player_id,
        week,
        &submission.hole_scores,
        submission.is_live,
        submission.group_id.as_deref(),
    )
    .await;

    match result {
        Ok(card) => {
            invalidate_week(cache_map.get_ref(), tournament_id, week).await;
            HttpResponse::Ok().json(card)
        }
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": e.to_string()})),
    }
}

pub async fn weekly_leaderboard(
    path: web::Path<i32>,
    query: web::Query<HashMap<String, String>>,
    abc: Data<ConfigAndPool>,
    cache_map: Data<CacheMap>,
) -> impl Responder {
    let tournament_id = path.into_inner();
    let config_and_pool = abc.get_ref().clone();
    let week = parse_week(&query);
    let use_cache = parse_use_cache(&query);

    match get_leaderboard(
        &config_and_pool,
        cache_map.get_ref(),
        tournament_id,
        week,
        use_cache,
    )
    .await
    {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": e.to_string()})),
    }
}

pub async fn weekly_field_stats(
    path: web::Path<i32>,
    query: web::Query<HashMap<String, String>>,
    abc: Data<ConfigAndPool>,
    cache_map: Data<CacheMap>,
) -> impl Responder {
    let tournament_id = path.into_inner();
    let config_and_pool = abc.get_ref().clone();
    let week = parse_week(&query);
    let use_cache = parse_use_cache(&query);

    match get_field_stats(
        &config_and_pool,
        cache_map.get_ref(),
        tournament_id,
        week,
        use_cache,
    )
    .await
    {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": e.to_string()})),
    }
}

/// Rehydrates a player's in-progress card. Responds 200 with `null` when
/// nothing is stored yet so clients can distinguish "no card" from an error.
pub async fn current_scorecard(
    path: web::Path<i32>,
    query: web::Query<HashMap<String, String>>,
    abc: Data<ConfigAndPool>,
) -> impl Responder {
    let tournament_id = path.into_inner();
    let config_and_pool = abc.get_ref().clone();

    let player_id: i64 = match get_param_str(&query, "player").parse() {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest()
                .json(json!({"error": "player parameter is required"}));
        }
    };
    let week = parse_week(&query);

    match get_current_scorecard(&config_and_pool, tournament_id, player_id, week).await {
        Ok(card) => HttpResponse::Ok().json(card),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": e.to_string()})),
    }
}

pub async fn weekly_hole_points(
    path: web::Path<(i32, i64)>,
    query: web::Query<HashMap<String, String>>,
    abc: Data<ConfigAndPool>,
    cache_map: Data<CacheMap>,
) -> impl Responder {
    let (tournament_id, player_id) = path.into_inner();
    let config_and_pool = abc.get_ref().clone();
    let week = parse_week(&query);
    let use_cache = parse_use_cache(&query);

    match get_hole_points(
        &config_and_pool,
        cache_map.get_ref(),
        tournament_id,
        player_id,
        week,
        use_cache,
    )
    .await
    {
        Ok(ledger) => HttpResponse::Ok().json(ledger),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": e.to_string()})),
    }
}

pub async fn scores(
    query: web::Query<HashMap<String, String>>,
    abc: Data<ConfigAndPool>,
    cache_map: Data<CacheMap>,
    refresh_status: Data<RefreshStatusHandle>,
) -> impl Responder {
    let config_and_pool = abc.get_ref().clone();

    let tournament_id: i32 = match get_param_str(&query, "tournament").parse() {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest()
                .json(json!({"error": "tournament parameter is required"}));
        }
    };
    let viewer_id: i64 = match get_param_str(&query, "player").parse() {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest()
                .json(json!({"error": "player parameter is required"}));
        }
    };

    let week = parse_week(&query);
    let use_cache = parse_use_cache(&query);

    let json = match get_param_str(&query, "json") {
        "1" => true,
        "0" => false,
        other => other.parse().unwrap_or(false),
    };

    let details = match get_tournament_details(&config_and_pool, tournament_id).await {
        Ok(details) => details,
        Err(_) => {
            return HttpResponse::NotFound().json(json!({"error": "tournament not found"}));
        }
    };

    let data = get_data_for_scores_page(
        &config_and_pool,
        cache_map.get_ref(),
        tournament_id,
        week,
        viewer_id,
        use_cache,
    )
    .await;

    let status = refresh_status.read().await.clone();

    match data {
        Ok(data) => {
            if json {
                HttpResponse::Ok().json(json!({
                    "leaderboard": data.leaderboard,
                    "fieldStats": data.field_stats,
                    "holePoints": data.hole_points,
                    "lastRefresh": data.last_refresh,
                    "connectionStatus": status.status,
                }))
            } else {
                let markup = render_scores_template(&data, &details, week, &status);
                HttpResponse::Ok()
                    .content_type("text/html")
                    .body(markup.into_string())
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": e.to_string()})),
    }
}
