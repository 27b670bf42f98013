use mulligan_league::model::matchplay::{
    MatchResult, compare_hole, cumulative_states, field_rank, field_stats, round_outcome,
    standing_display, states_against_field,
};
use mulligan_league::model::types::LeaderboardRow;

fn row(player_id: i64, hole_scores: Vec<i32>) -> LeaderboardRow {
    LeaderboardRow {
        player_id,
        first_name: format!("P{player_id}"),
        last_name: "Test".to_string(),
        club: "Club".to_string(),
        hole_scores,
        total_score: 0.0,
        total_hole_points: 0.0,
        total_round_points: 0.0,
        matches_played: 0,
        matches_won: 0,
        matches_tied: 0,
        matches_lost: 0,
    }
}

#[test]
fn test2_compare_hole_lower_wins() {
    assert_eq!(compare_hole(4, 5), Some(1));
    assert_eq!(compare_hole(5, 4), Some(-1));
    assert_eq!(compare_hole(4, 4), Some(0));
}

#[test]
fn test2_unsubmitted_hole_not_evaluated() {
    assert_eq!(compare_hole(0, 4), None);
    assert_eq!(compare_hole(4, 0), None);
    assert_eq!(compare_hole(0, 0), None);
}

#[test]
fn test2_cumulative_states_single_round() {
    // round 1: win hole 1, lose hole 2, tie hole 3
    let yours = vec![4, 5, 3, 0, 0, 0, 0, 0, 0];
    let theirs = vec![5, 4, 3, 0, 0, 0, 0, 0, 0];

    let states = cumulative_states(&yours, &theirs);
    assert_eq!(states.get(&1), Some(&1));
    assert_eq!(states.get(&2), Some(&0));
    assert_eq!(states.get(&3), Some(&0));
    assert!(states.get(&4).is_none());
}

#[test]
fn test2_state_resets_each_round() {
    // 3 up after round 1; round 2 starts all square again
    let yours = vec![3, 3, 3, 4, 0, 0, 0, 0, 0];
    let theirs = vec![5, 5, 5, 5, 0, 0, 0, 0, 0];

    let states = cumulative_states(&yours, &theirs);
    assert_eq!(states.get(&3), Some(&3));
    assert_eq!(states.get(&4), Some(&1));
}

#[test]
fn test2_gaps_skip_holes_but_keep_state() {
    // hole 2 unsubmitted by the opponent; state carries from hole 1 to 3
    let yours = vec![4, 4, 4, 0, 0, 0, 0, 0, 0];
    let theirs = vec![5, 0, 5, 0, 0, 0, 0, 0, 0];

    let states = cumulative_states(&yours, &theirs);
    assert_eq!(states.get(&1), Some(&1));
    assert!(states.get(&2).is_none());
    assert_eq!(states.get(&3), Some(&2));
}

#[test]
fn test2_standing_display_strings() {
    assert_eq!(standing_display(0), "AS");
    assert_eq!(standing_display(2), "2\u{25b2}");
    assert_eq!(standing_display(-1), "1\u{25bc}");
}

#[test]
fn test2_round_outcome_requires_all_six_scores() {
    let yours = vec![4, 4, 4, 0, 0, 0, 0, 0, 0];
    let mut theirs = vec![5, 5, 0, 0, 0, 0, 0, 0, 0];

    assert_eq!(round_outcome(&yours, &theirs, 1), None);

    theirs[2] = 5;
    assert_eq!(round_outcome(&yours, &theirs, 1), Some(MatchResult::Win));
}

#[test]
fn test2_round_outcome_majority_rules() {
    let yours = vec![4, 6, 4, 0, 0, 0, 0, 0, 0];
    let theirs = vec![5, 4, 4, 0, 0, 0, 0, 0, 0];
    // one hole each, one tie
    assert_eq!(round_outcome(&yours, &theirs, 1), Some(MatchResult::Tie));

    let theirs_worse = vec![5, 4, 5, 0, 0, 0, 0, 0, 0];
    assert_eq!(
        round_outcome(&yours, &theirs_worse, 1),
        Some(MatchResult::Win)
    );
}

#[test]
fn test2_states_against_field_skips_viewer() {
    let viewer = vec![4, 4, 4, 0, 0, 0, 0, 0, 0];
    let field = vec![
        row(1, viewer.clone()),
        row(2, vec![5, 5, 5, 0, 0, 0, 0, 0, 0]),
    ];

    let states = states_against_field(&viewer, &field, 1);
    assert!(!states.contains_key(&1));
    assert_eq!(states.get(&2).and_then(|s| s.get(&3)), Some(&3));
}

#[test]
fn test2_field_rank_first_occurrence_on_ties() {
    assert_eq!(field_rank(&[3, 4, 4, 5], 4), Some((2, 4)));
    assert_eq!(field_rank(&[3, 4, 5], 3), Some((1, 3)));
    assert_eq!(field_rank(&[], 4), None);
}

#[test]
fn test2_field_stats_ignore_unsubmitted() {
    let cards = vec![
        (1_i64, vec![4, 0, 0, 0, 0, 0, 0, 0, 0]),
        (2_i64, vec![6, 3, 0, 0, 0, 0, 0, 0, 0]),
    ];

    let stats = field_stats(&cards);
    let hole1 = stats.iter().find(|s| s.hole == 1).unwrap();
    assert_eq!(hole1.total_players, 2);
    assert_eq!(hole1.average_score, 5.0);
    assert_eq!(hole1.best_score, 4);

    let hole2 = stats.iter().find(|s| s.hole == 2).unwrap();
    assert_eq!(hole2.total_players, 1);
    assert_eq!(hole2.best_score, 3);

    // nobody has played hole 3 yet
    let hole3 = stats.iter().find(|s| s.hole == 3).unwrap();
    assert_eq!(hole3.total_players, 0);
    assert_eq!(hole3.average_score, 0.0);
    assert_eq!(hole3.best_score, 0);
}
