use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::model::types::{FieldStat, LeaderboardRow};

pub const HOLE_COUNT: usize = 9;
pub const ROUND_COUNT: usize = 3;
pub const HOLES_PER_ROUND: usize = 3;

/// W/T/L from the player's own perspective.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "T")]
    Tie,
    #[serde(rename = "L")]
    Loss,
}

impl MatchResult {
    #[must_use]
    pub fn letter(self) -> &'static str {
        match self {
            MatchResult::Win => "W",
            MatchResult::Tie => "T",
            MatchResult::Loss => "L",
        }
    }
}

/// Cumulative up/down state per opponent, keyed by hole number. Derived,
/// never persisted; rebuilt wholesale on every refresh.
pub type MatchplayStates = HashMap<i64, BTreeMap<i32, i32>>;

/// Lower gross wins. A score of 0 means "not yet submitted", so the hole is
/// not evaluated at all rather than counting as an impossible zero.
#[must_use]
pub fn compare_hole(yours: i32, theirs: i32) -> Option<i32> {
    if yours <= 0 || theirs <= 0 {
        return None;
    }
    Some(match yours.cmp(&theirs) {
        std::cmp::Ordering::Less => 1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => -1,
    })
}

/// 0-based index range of the holes in a 1-based round number.
#[must_use]
pub fn round_holes(round: usize) -> std::ops::Range<usize> {
    (round - 1) * HOLES_PER_ROUND..round * HOLES_PER_ROUND
}

/// Cumulative state against one opponent, hole number -> state. The state
/// resets to all-square at the first hole of each 3-hole round and only
/// advances on holes both players have submitted.
#[must_use]
pub fn cumulative_states(yours: &[i32], theirs: &[i32]) -> BTreeMap<i32, i32> {
    let mut states = BTreeMap::new();

    for round in 1..=ROUND_COUNT {
        let mut state = 0;
        for idx in round_holes(round) {
            let your_score = yours.get(idx).copied().unwrap_or(0);
            let their_score = theirs.get(idx).copied().unwrap_or(0);
            if let Some(result) = compare_hole(your_score, their_score) {
                state += result;
                states.insert(idx as i32 + 1, state);
            }
        }
    }

    states
}

/// "AS", "2▲" (up two), "1▼" (down one).
#[must_use]
pub fn standing_display(state: i32) -> String {
    match state.cmp(&0) {
        std::cmp::Ordering::Equal => "AS".to_string(),
        std::cmp::Ordering::Greater => format!("{state}\u{25b2}"),
        std::cmp::Ordering::Less => format!("{}\u{25bc}", state.abs()),
    }
}

/// Round W/T/L, only once all three holes of that round are submitted by both
/// players. A round still in progress for either side has no outcome.
#[must_use]
pub fn round_outcome(yours: &[i32], theirs: &[i32], round: usize) -> Option<MatchResult> {
    let range = round_holes(round);
    let your_round = yours.get(range.clone())?;
    let their_round = theirs.get(range)?;

    if !your_round.iter().all(|&s| s > 0) || !their_round.iter().all(|&s| s > 0) {
        return None;
    }

    let mut wins = 0;
    let mut losses = 0;
    for (&y, &t) in your_round.iter().zip(their_round) {
        match compare_hole(y, t) {
            Some(1) => wins += 1,
            Some(-1) => losses += 1,
            _ => {}
        }
    }

    Some(match wins.cmp(&losses) {
        std::cmp::Ordering::Greater => MatchResult::Win,
        std::cmp::Ordering::Less => MatchResult::Loss,
        std::cmp::Ordering::Equal => MatchResult::Tie,
    })
}

/// Cumulative states for the viewer against every other player in the field.
/// The viewer's own row is skipped; self-matching would corrupt the states.
#[must_use]
pub fn states_against_field(
    your_scores: &[i32],
    field: &[LeaderboardRow],
    viewer_id: i64,
) -> MatchplayStates {
    field
        .iter()
        .filter(|row| row.player_id != viewer_id)
        .map(|row| {
            (
                row.player_id,
                cumulative_states(your_scores, &row.hole_scores),
            )
        })
        .collect()
}

/// 1-based rank of the player's score among all submitted scores for a hole
/// (first occurrence on ties), plus the submitted-score count.
#[must_use]
pub fn field_rank(field_scores: &[i32], your_score: i32) -> Option<(usize, usize)> {
    if your_score <= 0 {
        return None;
    }
    let mut submitted: Vec<i32> = field_scores.iter().copied().filter(|&s| s > 0).collect();
    submitted.sort_unstable();
    let rank = submitted.iter().position(|&s| s == your_score)? + 1;
    Some((rank, submitted.len()))
}

/// Per-hole field averages and bests over submitted scores only.
#[must_use]
pub fn field_stats(cards: &[(i64, Vec<i32>)]) -> Vec<FieldStat> {
    (0..HOLE_COUNT)
        .map(|idx| {
            let submitted: Vec<i32> = cards
                .iter()
                .filter_map(|(_, scores)| scores.get(idx).copied())
                .filter(|&s| s > 0)
                .collect();

            let total_players = submitted.len() as i32;
            let average_score = if submitted.is_empty() {
                0.0
            } else {
                f64::from(submitted.iter().sum::<i32>()) / submitted.len() as f64
            };
            let best_score = submitted.iter().copied().min().unwrap_or(0);

            FieldStat {
                hole: idx as i32 + 1,
                average_score,
                total_players,
                best_score,
            }
        })
        .collect()
}
