use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Highest stroke count the HTTP layer will accept for a single hole. The
/// engine itself only clamps negatives; this is the one canonical bound.
pub const MAX_HOLE_SCORE: i32 = 20;

/// One stored weekly card. `hole_scores` is always dense, 9 entries, with 0
/// standing for "not yet submitted".
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WeeklyScorecard {
    pub scorecard_id: i64,
    pub tournament_id: i32,
    pub player_id: i64,
    pub week_start_date: NaiveDate,
    pub hole_scores: Vec<i32>,
    pub total_score: i32,
    pub is_live: bool,
    pub group_id: Option<String>,
    pub ins_ts: NaiveDateTime,
}

/// Submission body for `POST /api/tournaments/{id}/weekly-scorecard`.
/// Auth is out of scope, so the caller names the player directly.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SubmitScorecard {
    pub player_id: i64,
    pub hole_scores: Vec<i32>,
    #[serde(default)]
    pub is_live: bool,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub week_start_date: Option<NaiveDate>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LeaderboardRow {
    pub player_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub club: String,
    pub hole_scores: Vec<i32>,
    pub total_score: f64,
    pub total_hole_points: f64,
    pub total_round_points: f64,
    pub matches_played: i32,
    pub matches_won: i32,
    pub matches_tied: i32,
    pub matches_lost: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FieldStat {
    pub hole: i32,
    #[serde(rename = "averageScore")]
    pub average_score: f64,
    #[serde(rename = "totalPlayers")]
    pub total_players: i32,
    #[serde(rename = "bestScore")]
    pub best_score: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TournamentDetails {
    pub tournament_id: i32,
    pub tournament_name: String,
}
