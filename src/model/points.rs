use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::model::matchplay::{MatchResult, ROUND_COUNT, compare_hole, round_holes, round_outcome};

/// A pairwise match only exists once both players share this many holes.
pub const MIN_COMMON_HOLES: usize = 3;
pub const HOLE_WIN_POINTS: f64 = 0.5;
pub const ROUND_WIN_POINTS: f64 = 1.0;
pub const ROUND_TIE_POINTS: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchWinner {
    Player1,
    Player2,
}

/// The server-side result of one pairwise weekly match. This is the scoring
/// authority; the client-side matchplay state is presentation only.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchOutcome {
    pub hole_points: (f64, f64),
    pub round_points: [(f64, f64); ROUND_COUNT],
    pub winner: Option<MatchWinner>,
    pub total_points: (f64, f64),
}

#[must_use]
pub fn common_hole_count(p1: &[i32], p2: &[i32]) -> usize {
    p1.iter()
        .zip(p2)
        .filter(|&(&a, &b)| a > 0 && b > 0)
        .count()
}

/// 0.5 per hole won, nothing for a tie or loss; unsubmitted holes on either
/// side are skipped.
#[must_use]
pub fn hole_points(p1: &[i32], p2: &[i32]) -> (f64, f64) {
    let mut points = (0.0, 0.0);
    for (&a, &b) in p1.iter().zip(p2) {
        match compare_hole(a, b) {
            Some(1) => points.0 += HOLE_WIN_POINTS,
            Some(-1) => points.1 += HOLE_WIN_POINTS,
            _ => {}
        }
    }
    points
}

/// Per 3-hole round: win 1.0, tie 0.5, loss 0.0, decided on hole win-count
/// over the holes both players have submitted. A round with no common holes
/// is a tie, matching the league convention.
#[must_use]
pub fn round_points(p1: &[i32], p2: &[i32]) -> [(f64, f64); ROUND_COUNT] {
    let mut rounds = [(0.0, 0.0); ROUND_COUNT];
    for (round_idx, entry) in rounds.iter_mut().enumerate() {
        let mut p1_wins = 0;
        let mut p2_wins = 0;
        for idx in round_holes(round_idx + 1) {
            let a = p1.get(idx).copied().unwrap_or(0);
            let b = p2.get(idx).copied().unwrap_or(0);
            match compare_hole(a, b) {
                Some(1) => p1_wins += 1,
                Some(-1) => p2_wins += 1,
                _ => {}
            }
        }
        *entry = match p1_wins.cmp(&p2_wins) {
            std::cmp::Ordering::Greater => (ROUND_WIN_POINTS, 0.0),
            std::cmp::Ordering::Less => (0.0, ROUND_WIN_POINTS),
            std::cmp::Ordering::Equal => (ROUND_TIE_POINTS, ROUND_TIE_POINTS),
        };
    }
    rounds
}

/// Win the match by taking 2+ rounds, or 1 round with the other two tied.
#[must_use]
pub fn match_winner(rounds: &[(f64, f64); ROUND_COUNT]) -> Option<MatchWinner> {
    let mut p1_rounds = 0;
    let mut p2_rounds = 0;
    let mut ties = 0;
    for (a, b) in rounds {
        if a > b {
            p1_rounds += 1;
        } else if b > a {
            p2_rounds += 1;
        } else {
            ties += 1;
        }
    }

    if p1_rounds >= 2 || (p1_rounds == 1 && ties == 2) {
        Some(MatchWinner::Player1)
    } else if p2_rounds >= 2 || (p2_rounds == 1 && ties == 2) {
        Some(MatchWinner::Player2)
    } else {
        None
    }
}

/// `None` when the pair has fewer than [`MIN_COMMON_HOLES`] in common.
#[must_use]
pub fn score_match(p1: &[i32], p2: &[i32]) -> Option<MatchOutcome> {
    if common_hole_count(p1, p2) < MIN_COMMON_HOLES {
        return None;
    }

    let hole_points = hole_points(p1, p2);
    let round_points = round_points(p1, p2);
    let winner = match_winner(&round_points);

    let round_total_p1: f64 = round_points.iter().map(|(a, _)| a).sum();
    let round_total_p2: f64 = round_points.iter().map(|(_, b)| b).sum();

    Some(MatchOutcome {
        hole_points,
        round_points,
        winner,
        total_points: (
            hole_points.0 + round_total_p1,
            hole_points.1 + round_total_p2,
        ),
    })
}

/// Weekly aggregate for one player across every match they appear in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerTotals {
    pub hole_points: f64,
    pub round_points: f64,
    pub matches_played: i32,
    pub matches_won: i32,
    pub matches_tied: i32,
    pub matches_lost: i32,
}

impl PlayerTotals {
    #[must_use]
    pub fn total_score(&self) -> f64 {
        self.hole_points + self.round_points
    }
}

/// Recompute every pairwise match for the week from scratch and fold the
/// results into per-player totals. Input is `(player_id, hole_scores)`.
#[must_use]
pub fn week_totals(cards: &[(i64, Vec<i32>)]) -> HashMap<i64, PlayerTotals> {
    let mut totals: HashMap<i64, PlayerTotals> = HashMap::new();

    for i in 0..cards.len() {
        for j in i + 1..cards.len() {
            let (p1_id, p1_scores) = &cards[i];
            let (p2_id, p2_scores) = &cards[j];
            let Some(outcome) = score_match(p1_scores, p2_scores) else {
                continue;
            };

            let round_total_p1: f64 = outcome.round_points.iter().map(|(a, _)| a).sum();
            let round_total_p2: f64 = outcome.round_points.iter().map(|(_, b)| b).sum();

            let p1 = totals.entry(*p1_id).or_default();
            p1.hole_points += outcome.hole_points.0;
            p1.round_points += round_total_p1;
            p1.matches_played += 1;
            match outcome.winner {
                Some(MatchWinner::Player1) => p1.matches_won += 1,
                Some(MatchWinner::Player2) => p1.matches_lost += 1,
                None => p1.matches_tied += 1,
            }

            let p2 = totals.entry(*p2_id).or_default();
            p2.hole_points += outcome.hole_points.1;
            p2.round_points += round_total_p2;
            p2.matches_played += 1;
            match outcome.winner {
                Some(MatchWinner::Player2) => p2.matches_won += 1,
                Some(MatchWinner::Player1) => p2.matches_lost += 1,
                None => p2.matches_tied += 1,
            }
        }
    }

    totals
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HoleLedgerEntry {
    pub points: f64,
    pub result: Option<MatchResult>,
    pub record: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RoundLedgerEntry {
    pub result: Option<MatchResult>,
    pub record: String,
}

/// One player's authoritative per-hole and per-round ledger for the week,
/// consumed read-only by the scoring view.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PointsLedger {
    #[serde(rename = "holePoints")]
    pub hole_points: BTreeMap<i32, HoleLedgerEntry>,
    #[serde(rename = "roundPoints")]
    pub round_points: BTreeMap<i32, RoundLedgerEntry>,
}

fn record_result(wins: i32, losses: i32) -> MatchResult {
    match wins.cmp(&losses) {
        std::cmp::Ordering::Greater => MatchResult::Win,
        std::cmp::Ordering::Less => MatchResult::Loss,
        std::cmp::Ordering::Equal => MatchResult::Tie,
    }
}

/// Build the ledger for `yours` against every opponent's card. Holes the
/// player has not submitted carry no entry at all.
#[must_use]
pub fn player_ledger(yours: &[i32], opponents: &[(i64, Vec<i32>)]) -> PointsLedger {
    let mut ledger = PointsLedger::default();

    for (idx, &your_score) in yours.iter().enumerate() {
        if your_score <= 0 {
            continue;
        }
        let mut wins = 0;
        let mut ties = 0;
        let mut losses = 0;
        for (_, theirs) in opponents {
            match compare_hole(your_score, theirs.get(idx).copied().unwrap_or(0)) {
                Some(1) => wins += 1,
                Some(0) => ties += 1,
                Some(-1) => losses += 1,
                _ => {}
            }
        }
        if wins + ties + losses == 0 {
            continue;
        }
        ledger.hole_points.insert(
            idx as i32 + 1,
            HoleLedgerEntry {
                points: f64::from(wins) * HOLE_WIN_POINTS,
                result: Some(record_result(wins, losses)),
                record: format!("{wins}-{ties}-{losses}"),
            },
        );
    }

    for round in 1..=ROUND_COUNT {
        let mut wins = 0;
        let mut ties = 0;
        let mut losses = 0;
        for (_, theirs) in opponents {
            match round_outcome(yours, theirs, round) {
                Some(MatchResult::Win) => wins += 1,
                Some(MatchResult::Tie) => ties += 1,
                Some(MatchResult::Loss) => losses += 1,
                None => {}
            }
        }
        if wins + ties + losses == 0 {
            continue;
        }
        ledger.round_points.insert(
            round as i32,
            RoundLedgerEntry {
                result: Some(record_result(wins, losses)),
                record: format!("{wins}-{ties}-{losses}"),
            },
        );
    }

    ledger
}
