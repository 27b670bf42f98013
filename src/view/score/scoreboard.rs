use maud::{Markup, html};

use crate::model::types::LeaderboardRow;

/// Weekly standings table. Rows arrive already ordered by the database, so
/// the rank here is just the row position.
#[must_use]
pub fn render_scoreboard(leaderboard: &[LeaderboardRow]) -> Markup {
    html! {
        @if leaderboard.is_empty() {
            table class="styled-table" id="leaderboard-table" {
                thead {
                    tr {
                        th { "PLACE" }
                        th { "PLAYER" }
                        th { "CLUB" }
                        th { "POINTS" }
                    }
                }
                tbody {
                    tr {
                        td colspan="4" { "No scores submitted this week" }
                    }
                }
            }
        }
        @else {
            h3 { "Weekly Leaderboard" }

            table class="styled-table" id="leaderboard-table" {
                thead {
                    tr {
                        th { "PLACE" }
                        th { "PLAYER" }
                        th { "CLUB" }
                        th { "HOLE PTS" }
                        th { "ROUND PTS" }
                        th { "TOTAL" }
                        th { "W-T-L" }
                    }
                }
                tbody {
                    @for (idx, row) in leaderboard.iter().enumerate() {
                        tr {
                            td { (idx + 1) }
                            td { (row.first_name) " " (row.last_name) }
                            td { (row.club) }
                            td { (format!("{:.1}", row.total_hole_points)) }
                            td { (format!("{:.1}", row.total_round_points)) }
                            td { (format!("{:.1}", row.total_score)) }
                            td { (row.matches_won) "-" (row.matches_tied) "-" (row.matches_lost) }
                        }
                    }
                }
            }
        }
    }
}
