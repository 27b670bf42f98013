mod common;

use chrono::NaiveDate;
use mulligan_league::model::database_write::merge_hole_scores;
use mulligan_league::model::{
    get_current_scorecard, get_leaderboard_rows, get_tournament_details, get_week_scorecards,
    upsert_weekly_scorecard,
};

const FIXTURE: &str = "
INSERT INTO tournament (tournament_id, name) VALUES (1, 'Thursday League');
INSERT INTO player (player_id, first_name, last_name, club) VALUES
    (1, 'Alice', 'Anders', 'North'),
    (2, 'Bob', 'Baker', 'South'),
    (3, 'Cara', 'Cole', 'East');
";

fn week() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
}

#[test]
fn test5_merge_is_first_write_wins() {
    let existing = vec![4, 0, 3, 0, 0, 0, 0, 0, 0];
    let incoming = vec![9, 5, 9, 0, 0, 0, 0, 0, 0];
    assert_eq!(
        merge_hole_scores(&existing, &incoming),
        vec![4, 5, 3, 0, 0, 0, 0, 0, 0]
    );
}

#[test]
fn test5_merge_clamps_negatives() {
    let existing = vec![0, 0, 0, 0, 0, 0, 0, 0, 0];
    let incoming = vec![-3, 5, 0, 0, 0, 0, 0, 0, 0];
    assert_eq!(
        merge_hole_scores(&existing, &incoming),
        vec![0, 5, 0, 0, 0, 0, 0, 0, 0]
    );
}

#[tokio::test]
async fn test5_tournament_lookup() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = common::setup_test_context(FIXTURE).await?;

    let details = get_tournament_details(&ctx.config_and_pool, 1).await?;
    assert_eq!(details.tournament_name, "Thursday League");

    assert!(get_tournament_details(&ctx.config_and_pool, 99).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test5_upsert_and_rehydrate() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = common::setup_test_context(FIXTURE).await?;

    let card = upsert_weekly_scorecard(
        &ctx.config_and_pool,
        1,
        1,
        week(),
        &[4, 5, 0, 0, 0, 0, 0, 0, 0],
        false,
        Some("group-a"),
    )
    .await?;

    assert_eq!(card.hole_scores, vec![4, 5, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(card.total_score, 9);
    assert_eq!(card.group_id.as_deref(), Some("group-a"));

    let fetched = get_current_scorecard(&ctx.config_and_pool, 1, 1, week()).await?;
    assert_eq!(fetched.unwrap().hole_scores, card.hole_scores);

    let missing = get_current_scorecard(&ctx.config_and_pool, 1, 2, week()).await?;
    assert!(missing.is_none());
    Ok(())
}

#[tokio::test]
async fn test5_resubmission_cannot_change_scored_holes() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = common::setup_test_context(FIXTURE).await?;

    upsert_weekly_scorecard(
        &ctx.config_and_pool,
        1,
        1,
        week(),
        &[4, 0, 0, 0, 0, 0, 0, 0, 0],
        false,
        None,
    )
    .await?;

    // hole 1 already scored; only hole 2 lands
    let card = upsert_weekly_scorecard(
        &ctx.config_and_pool,
        1,
        1,
        week(),
        &[9, 5, 0, 0, 0, 0, 0, 0, 0],
        false,
        None,
    )
    .await?;

    assert_eq!(card.hole_scores, vec![4, 5, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(card.total_score, 9);
    Ok(())
}

#[tokio::test]
async fn test5_concurrent_submits_lose_no_holes() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = common::setup_test_context(FIXTURE).await?;

    // same player, disjoint holes, submitted at the same time; a stale
    // read-merge-write would let one submit erase the other's hole
    let a = upsert_weekly_scorecard(
        &ctx.config_and_pool,
        1,
        1,
        week(),
        &[4, 0, 0, 0, 0, 0, 0, 0, 0],
        false,
        None,
    );
    let b = upsert_weekly_scorecard(
        &ctx.config_and_pool,
        1,
        1,
        week(),
        &[0, 5, 0, 0, 0, 0, 0, 0, 0],
        false,
        None,
    );
    let (ra, rb) = tokio::join!(a, b);
    ra?;
    rb?;

    let card = get_current_scorecard(&ctx.config_and_pool, 1, 1, week())
        .await?
        .unwrap();
    assert_eq!(card.hole_scores[0], 4);
    assert_eq!(card.hole_scores[1], 5);
    assert_eq!(card.total_score, 9);
    Ok(())
}

#[tokio::test]
async fn test5_scorecards_scoped_to_week() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = common::setup_test_context(FIXTURE).await?;

    upsert_weekly_scorecard(
        &ctx.config_and_pool,
        1,
        1,
        week(),
        &[4, 0, 0, 0, 0, 0, 0, 0, 0],
        false,
        None,
    )
    .await?;
    let next_week = week() + chrono::Duration::days(7);
    upsert_weekly_scorecard(
        &ctx.config_and_pool,
        1,
        1,
        next_week,
        &[6, 0, 0, 0, 0, 0, 0, 0, 0],
        false,
        None,
    )
    .await?;

    let this_week_cards = get_week_scorecards(&ctx.config_and_pool, 1, week()).await?;
    assert_eq!(this_week_cards.len(), 1);
    assert_eq!(this_week_cards[0].hole_scores[0], 4);

    let next_week_cards = get_week_scorecards(&ctx.config_and_pool, 1, next_week).await?;
    assert_eq!(next_week_cards[0].hole_scores[0], 6);
    Ok(())
}

#[tokio::test]
async fn test5_leaderboard_recomputed_on_submit() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = common::setup_test_context(FIXTURE).await?;

    upsert_weekly_scorecard(
        &ctx.config_and_pool,
        1,
        1,
        week(),
        &[4; 9],
        false,
        None,
    )
    .await?;
    upsert_weekly_scorecard(
        &ctx.config_and_pool,
        1,
        2,
        week(),
        &[5; 9],
        false,
        None,
    )
    .await?;

    let rows = get_leaderboard_rows(&ctx.config_and_pool, 1, week()).await?;
    assert_eq!(rows.len(), 2);

    // winner first: 4.5 hole points plus 3 round wins
    assert_eq!(rows[0].player_id, 1);
    assert_eq!(rows[0].total_score, 7.5);
    assert_eq!(rows[0].matches_won, 1);
    assert_eq!(rows[0].first_name, "Alice");

    assert_eq!(rows[1].player_id, 2);
    assert_eq!(rows[1].total_score, 0.0);
    assert_eq!(rows[1].matches_lost, 1);
    Ok(())
}

#[tokio::test]
async fn test5_no_match_below_three_common_holes() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = common::setup_test_context(FIXTURE).await?;

    upsert_weekly_scorecard(
        &ctx.config_and_pool,
        1,
        1,
        week(),
        &[4, 4, 0, 0, 0, 0, 0, 0, 0],
        false,
        None,
    )
    .await?;
    upsert_weekly_scorecard(
        &ctx.config_and_pool,
        1,
        2,
        week(),
        &[5, 5, 0, 0, 0, 0, 0, 0, 0],
        false,
        None,
    )
    .await?;

    let rows = get_leaderboard_rows(&ctx.config_and_pool, 1, week()).await?;
    assert!(rows.iter().all(|r| r.matches_played == 0));
    Ok(())
}
