use maud::{Markup, html};

use crate::model::matchplay::{
    HOLE_COUNT, MatchplayStates, ROUND_COUNT, round_outcome, standing_display,
};
use crate::model::types::LeaderboardRow;

/// One row per opponent: hole-by-hole cumulative standing, with the round
/// outcome letter once a round is complete on both cards. Holes neither side
/// has finished stay blank rather than showing all-square.
#[must_use]
pub fn render_matchplay(
    viewer_scores: &[i32],
    states: &MatchplayStates,
    field: &[LeaderboardRow],
    viewer_id: i64,
) -> Markup {
    let opponents: Vec<&LeaderboardRow> = field
        .iter()
        .filter(|row| row.player_id != viewer_id)
        .collect();

    html! {
        @if !opponents.is_empty() {
            h3 { "Matchplay" }

            table class="styled-table" id="matchplay-table" {
                thead {
                    tr {
                        th rowspan="2" { "Opponent" }
                        @for round in 1..=ROUND_COUNT {
                            th colspan="4" { "Round " (round) }
                        }
                    }
                    tr {
                        @for _ in 0..ROUND_COUNT {
                            th { "1" }
                            th { "2" }
                            th { "3" }
                            th { "W/T/L" }
                        }
                    }
                }
                tbody {
                    @for opp in &opponents {
                        tr {
                            td { (opp.first_name) " " (opp.last_name) }
                            @let opp_states = states.get(&opp.player_id);
                            @for round in 1..=ROUND_COUNT {
                                @for hole_in_round in 0..HOLE_COUNT / ROUND_COUNT {
                                    @let hole = ((round - 1) * 3 + hole_in_round) as i32 + 1;
                                    td class="matchplay-state" {
                                        @if let Some(state) = opp_states.and_then(|s| s.get(&hole)) {
                                            (standing_display(*state))
                                        }
                                    }
                                }
                                td class="matchplay-outcome" {
                                    @if let Some(result) = round_outcome(viewer_scores, &opp.hole_scores, round) {
                                        (result.letter())
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
