use mulligan_league::model::scorecard::{
    HoleField, PlayerInfoField, ScoreCard, TOTAL_MULLIGANS,
};

#[test]
fn test1_new_card_is_blank() {
    let card = ScoreCard::new(9);
    assert_eq!(card.holes.len(), 9);
    assert_eq!(card.holes[0].hole, 1);
    assert_eq!(card.holes[8].hole, 9);
    assert!(card.holes.iter().all(|h| h.strokes == 0 && h.mulligans == 0));
    assert_eq!(card.total_strokes, 0);
    assert_eq!(card.final_score, 0);
    assert_eq!(card.remaining_mulligans(), TOTAL_MULLIGANS);
}

#[test]
fn test1_update_hole_score_recomputes_totals() {
    let mut card = ScoreCard::new(9);
    card.update_hole_score(1, HoleField::Strokes, 4);
    card.update_hole_score(2, HoleField::Strokes, 5);
    card.update_hole_score(2, HoleField::Mulligans, 1);

    assert_eq!(card.total_strokes, 9);
    assert_eq!(card.total_mulligans, 1);
    assert_eq!(card.final_score, 10);
    assert_eq!(card.holes[1].total, 6);
}

#[test]
fn test1_negative_values_clamp_to_zero() {
    let mut card = ScoreCard::new(9);
    card.update_hole_score(3, HoleField::Strokes, -2);
    assert_eq!(card.holes[2].strokes, 0);
    assert_eq!(card.total_strokes, 0);
}

#[test]
fn test1_unknown_hole_is_ignored() {
    let mut card = ScoreCard::new(9);
    card.update_hole_score(10, HoleField::Strokes, 4);
    assert_eq!(card.total_strokes, 0);
}

#[test]
fn test1_mulligan_budget_is_global() {
    let mut card = ScoreCard::new(9);
    assert!(card.try_apply_mulligan(1));
    assert!(card.try_apply_mulligan(1));
    assert!(card.try_apply_mulligan(5));
    // budget spent, fourth application refused without side effects
    assert!(!card.try_apply_mulligan(7));
    assert_eq!(card.total_mulligans, TOTAL_MULLIGANS);
    assert_eq!(card.remaining_mulligans(), 0);
    assert_eq!(card.holes[6].mulligans, 0);
}

#[test]
fn test1_revoke_frees_budget() {
    let mut card = ScoreCard::new(9);
    for _ in 0..TOTAL_MULLIGANS {
        assert!(card.try_apply_mulligan(2));
    }
    assert!(!card.try_apply_mulligan(3));

    assert!(card.try_revoke_mulligan(2));
    assert_eq!(card.remaining_mulligans(), 1);
    assert!(card.try_apply_mulligan(3));
    assert_eq!(card.remaining_mulligans(), 0);
}

#[test]
fn test1_revoke_without_mulligan_is_refused() {
    let mut card = ScoreCard::new(9);
    assert!(!card.try_revoke_mulligan(4));
    assert_eq!(card.total_mulligans, 0);
}

#[test]
fn test1_validate_blank_card() {
    let card = ScoreCard::new(9);
    let errors = card.validate();
    assert!(errors.iter().any(|e| e.contains("name")));
    assert!(errors.iter().any(|e| e.contains("At least one hole")));
}

#[test]
fn test1_validate_complete_card() {
    let mut card = ScoreCard::new(9);
    card.update_player_info(PlayerInfoField::Name("Sam".to_string()));
    card.update_hole_score(1, HoleField::Strokes, 4);
    assert!(card.validate().is_empty());
}

#[test]
fn test1_reset_returns_to_blank() {
    let mut card = ScoreCard::new(18);
    card.update_player_info(PlayerInfoField::Name("Sam".to_string()));
    card.update_hole_score(1, HoleField::Strokes, 4);
    card.try_apply_mulligan(1);

    card.reset();
    assert_eq!(card.holes.len(), 18);
    assert!(card.player_info.name.is_empty());
    assert_eq!(card.total_strokes, 0);
    assert_eq!(card.total_mulligans, 0);
}

#[test]
fn test1_stats_none_until_scored() {
    let card = ScoreCard::new(9);
    assert!(card.stats().is_none());
}

#[test]
fn test1_stats_average_and_extremes() {
    let mut card = ScoreCard::new(9);
    card.update_hole_score(1, HoleField::Strokes, 4);
    card.update_hole_score(2, HoleField::Strokes, 7);
    card.update_hole_score(3, HoleField::Strokes, 3);

    let stats = card.stats().unwrap();
    assert_eq!(stats.total_holes, 3);
    // 14 / 3 rounded to one decimal
    assert_eq!(stats.average_score, 4.7);
    assert_eq!(stats.best_hole.hole, 3);
    assert_eq!(stats.worst_hole.hole, 2);
    assert_eq!(stats.mulligan_efficiency, 0);
}

#[test]
fn test1_stats_mulligan_efficiency() {
    let mut card = ScoreCard::new(9);
    card.update_hole_score(1, HoleField::Strokes, 4);
    card.try_apply_mulligan(1);
    assert_eq!(card.stats().unwrap().mulligan_efficiency, 33);

    card.try_apply_mulligan(2);
    assert_eq!(card.stats().unwrap().mulligan_efficiency, 67);

    card.try_apply_mulligan(3);
    assert_eq!(card.stats().unwrap().mulligan_efficiency, 100);
}

#[test]
fn test1_unplayed_holes_excluded_from_stats() {
    let mut card = ScoreCard::new(9);
    card.update_hole_score(5, HoleField::Strokes, 6);
    let stats = card.stats().unwrap();
    assert_eq!(stats.total_holes, 1);
    assert_eq!(stats.best_hole.hole, 5);
    assert_eq!(stats.worst_hole.hole, 5);
}
