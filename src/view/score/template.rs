use chrono::NaiveDate;
use maud::{Markup, html};

use crate::controller::refresh::{ConnectionStatus, RefreshStatus};
use crate::controller::score::WeeklyScoreData;
use crate::model::types::TournamentDetails;
use crate::view::score::{
    render_field_stats, render_matchplay, render_points_ledger, render_scoreboard,
    render_scorecard_grid,
};

/// Full scoring page body. Pure; all IO happens in the data service so tests
/// can render from fixtures.
#[must_use]
pub fn render_scores_template(
    data: &WeeklyScoreData,
    details: &TournamentDetails,
    week: NaiveDate,
    refresh: &RefreshStatus,
) -> Markup {
    html! {
        div id="weekly-scores" {
            h2 { (details.tournament_name) }
            p class="week-label" { "Week of " (week.format("%B %-d, %Y")) }

            (render_scoreboard(&data.leaderboard))
            (render_scorecard_grid(&data.viewer_scores, &data.field_stats, &data.hole_points, &data.leaderboard))
            (render_matchplay(&data.viewer_scores, &data.matchplay, &data.leaderboard, data.viewer_id))
            (render_points_ledger(&data.hole_points))
            (render_field_stats(&data.field_stats))

            p class="refresh-label" { "Last refreshed " (data.last_refresh) }
            @match refresh.status {
                ConnectionStatus::Error => {
                    p class="refresh-error" { "Live updates stopped after repeated failures" }
                }
                ConnectionStatus::Retrying => {
                    p class="refresh-warning" { "Reconnecting to live updates..." }
                }
                _ => {}
            }
        }
    }
}
