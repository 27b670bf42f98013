use maud::{Markup, html};

use crate::model::matchplay::{ROUND_COUNT, field_rank, round_holes};
use crate::model::points::PointsLedger;
use crate::model::types::{FieldStat, LeaderboardRow};

/// The viewer's own card, one 3-hole round per block, with the field average,
/// the viewer's rank within the field, and the authoritative points underneath
/// each hole. A dash marks holes not yet submitted.
#[must_use]
pub fn render_scorecard_grid(
    viewer_scores: &[i32],
    field_stats: &[FieldStat],
    ledger: &PointsLedger,
    field: &[LeaderboardRow],
) -> Markup {
    html! {
        h3 { "Your Card" }

        @for round in 1..=ROUND_COUNT {
            table class="styled-table scorecard-round" {
                thead {
                    tr {
                        th { "Round " (round) }
                        @for idx in round_holes(round) {
                            th { "Hole " (idx + 1) }
                        }
                    }
                }
                tbody {
                    tr {
                        td { "Score" }
                        @for idx in round_holes(round) {
                            td {
                                @let score = viewer_scores.get(idx).copied().unwrap_or(0);
                                @if score > 0 { (score) } @else { "-" }
                            }
                        }
                    }
                    tr {
                        td { "Field avg" }
                        @for idx in round_holes(round) {
                            td {
                                @let stat = field_stats
                                    .iter()
                                    .find(|s| s.hole == idx as i32 + 1)
                                    .filter(|s| s.total_players > 0);
                                @match stat {
                                    Some(s) => { (format!("{:.1}", s.average_score)) }
                                    None => { "-" }
                                }
                            }
                        }
                    }
                    tr {
                        td { "Rank" }
                        @for idx in round_holes(round) {
                            td {
                                @let hole_field: Vec<i32> = field
                                    .iter()
                                    .map(|r| r.hole_scores.get(idx).copied().unwrap_or(0))
                                    .collect();
                                @let your = viewer_scores.get(idx).copied().unwrap_or(0);
                                @match field_rank(&hole_field, your) {
                                    Some((rank, total)) => { (rank) "/" (total) }
                                    None => { "-" }
                                }
                            }
                        }
                    }
                    tr {
                        td { "Points" }
                        @for idx in round_holes(round) {
                            td {
                                @match ledger.hole_points.get(&(idx as i32 + 1)) {
                                    Some(entry) => { (format!("{:.1}", entry.points)) }
                                    None => { "-" }
                                }
                            }
                        }
                    }
                    tr {
                        td { "W-T-L" }
                        @for idx in round_holes(round) {
                            td {
                                @match ledger.hole_points.get(&(idx as i32 + 1)) {
                                    Some(entry) => { (entry.record) }
                                    None => { "-" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
