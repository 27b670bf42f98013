use serde::{Deserialize, Serialize};

/// Hard budget for the whole round, not a per-hole cap.
pub const TOTAL_MULLIGANS: i32 = 3;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HoleScore {
    pub hole: i32,
    pub strokes: i32,
    pub mulligans: i32,
    pub total: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlayerInfo {
    pub name: String,
    pub date: String,
    pub handicap: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoleField {
    Strokes,
    Mulligans,
}

#[derive(Clone, Debug)]
pub enum PlayerInfoField {
    Name(String),
    Date(String),
    Handicap(i32),
}

/// One player's round. Everything here is synchronous and total: bad input is
/// clamped or rejected, never raised. The only error surface is `validate()`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ScoreCard {
    pub player_info: PlayerInfo,
    pub holes: Vec<HoleScore>,
    pub total_strokes: i32,
    pub total_mulligans: i32,
    pub final_score: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScoreStats {
    pub total_holes: usize,
    pub average_score: f64,
    pub best_hole: HoleScore,
    pub worst_hole: HoleScore,
    pub mulligan_efficiency: i32,
}

fn blank_holes(hole_count: usize) -> Vec<HoleScore> {
    (1..=hole_count as i32)
        .map(|hole| HoleScore {
            hole,
            strokes: 0,
            mulligans: 0,
            total: 0,
        })
        .collect()
}

fn today() -> String {
    chrono::Utc::now().date_naive().to_string()
}

impl ScoreCard {
    /// Fresh card with all-zero holes, numbered 1..=`hole_count` (9 or 18).
    #[must_use]
    pub fn new(hole_count: usize) -> Self {
        ScoreCard {
            player_info: PlayerInfo {
                name: String::new(),
                date: today(),
                handicap: 0,
            },
            holes: blank_holes(hole_count),
            total_strokes: 0,
            total_mulligans: 0,
            final_score: 0,
        }
    }

    /// No validation at call time; `validate()` is the gate before submission.
    pub fn update_player_info(&mut self, field: PlayerInfoField) {
        match field {
            PlayerInfoField::Name(name) => self.player_info.name = name,
            PlayerInfoField::Date(date) => self.player_info.date = date,
            PlayerInfoField::Handicap(handicap) => self.player_info.handicap = handicap,
        }
    }

    /// Negative values clamp to 0. Upper bounds (1..=20) are the HTTP layer's
    /// job, not the engine's. Unknown hole numbers are ignored.
    pub fn update_hole_score(&mut self, hole_number: i32, field: HoleField, value: i32) {
        let value = value.max(0);
        if let Some(hole) = self.holes.iter_mut().find(|h| h.hole == hole_number) {
            match field {
                HoleField::Strokes => hole.strokes = value,
                HoleField::Mulligans => hole.mulligans = value,
            }
            hole.total = hole.strokes + hole.mulligans;
            self.recompute_totals();
        }
    }

    /// Returns false (and changes nothing) once the round's budget is spent.
    pub fn try_apply_mulligan(&mut self, hole_number: i32) -> bool {
        if self.total_mulligans >= TOTAL_MULLIGANS {
            return false;
        }
        let Some(hole) = self.holes.iter_mut().find(|h| h.hole == hole_number) else {
            return false;
        };
        hole.mulligans += 1;
        hole.total = hole.strokes + hole.mulligans;
        self.recompute_totals();
        true
    }

    /// Returns false when the hole has no mulligan to give back.
    pub fn try_revoke_mulligan(&mut self, hole_number: i32) -> bool {
        let Some(hole) = self.holes.iter_mut().find(|h| h.hole == hole_number) else {
            return false;
        };
        if hole.mulligans <= 0 {
            return false;
        }
        hole.mulligans -= 1;
        hole.total = hole.strokes + hole.mulligans;
        self.recompute_totals();
        true
    }

    #[must_use]
    pub fn remaining_mulligans(&self) -> i32 {
        TOTAL_MULLIGANS - self.total_mulligans
    }

    /// Human-readable violations; empty means the card may be submitted.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.player_info.name.trim().is_empty() {
            errors.push("Player name is required".to_string());
        }
        if self.player_info.date.is_empty() {
            errors.push("Date is required".to_string());
        }
        // unreachable via try_apply_mulligan, kept as a submission-time check
        if self.total_mulligans > TOTAL_MULLIGANS {
            errors.push(format!("Cannot use more than {TOTAL_MULLIGANS} mulligans"));
        }
        if self.holes.iter().all(|h| h.strokes == 0) {
            errors.push("At least one hole must have a score".to_string());
        }

        errors
    }

    /// Back to a blank card: empty name, today's date, all-zero holes.
    pub fn reset(&mut self) {
        let hole_count = self.holes.len();
        *self = ScoreCard::new(hole_count);
    }

    /// `None` until at least one hole has strokes recorded.
    #[must_use]
    pub fn stats(&self) -> Option<ScoreStats> {
        let played: Vec<&HoleScore> = self.holes.iter().filter(|h| h.strokes > 0).collect();
        let total_holes = played.len();
        if total_holes == 0 {
            return None;
        }

        let average = f64::from(self.total_strokes) / total_holes as f64;
        let best_hole = played.iter().copied().min_by_key(|h| h.strokes)?.clone();
        let worst_hole = played.iter().copied().max_by_key(|h| h.strokes)?.clone();

        let mulligan_efficiency = if self.total_mulligans > 0 {
            (f64::from(self.total_mulligans) / f64::from(TOTAL_MULLIGANS) * 100.0).round() as i32
        } else {
            0
        };

        Some(ScoreStats {
            total_holes,
            average_score: (average * 10.0).round() / 10.0,
            best_hole,
            worst_hole,
            mulligan_efficiency,
        })
    }

    fn recompute_totals(&mut self) {
        self.total_strokes = self.holes.iter().map(|h| h.strokes).sum();
        self.total_mulligans = self.holes.iter().map(|h| h.mulligans).sum();
        self.final_score = self.total_strokes + self.total_mulligans;
    }
}
