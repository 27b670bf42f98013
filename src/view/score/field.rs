use maud::{Markup, html};

use crate::model::points::PointsLedger;
use crate::model::types::FieldStat;

#[must_use]
pub fn render_field_stats(stats: &[FieldStat]) -> Markup {
    html! {
        @if !stats.is_empty() {
            h3 { "Field Stats" }

            table class="styled-table" id="field-stats-table" {
                thead {
                    tr {
                        th { "HOLE" }
                        th { "AVG" }
                        th { "BEST" }
                        th { "SUBMITTED" }
                    }
                }
                tbody {
                    @for stat in stats {
                        tr {
                            td { (stat.hole) }
                            td { (format!("{:.1}", stat.average_score)) }
                            td { (stat.best_score) }
                            td { (stat.total_players) }
                        }
                    }
                }
            }
        }
    }
}

/// The viewer's authoritative weekly points, hole by hole then round by
/// round. Records read wins-ties-losses against the rest of the field.
#[must_use]
pub fn render_points_ledger(ledger: &PointsLedger) -> Markup {
    html! {
        @if !ledger.hole_points.is_empty() || !ledger.round_points.is_empty() {
            h3 { "Your Points" }

            table class="styled-table" id="hole-points-table" {
                thead {
                    tr {
                        th { "HOLE" }
                        th { "POINTS" }
                        th { "RECORD" }
                    }
                }
                tbody {
                    @for (hole, entry) in &ledger.hole_points {
                        tr {
                            td { (hole) }
                            td { (format!("{:.1}", entry.points)) }
                            td { (entry.record) }
                        }
                    }
                }
            }

            table class="styled-table" id="round-points-table" {
                thead {
                    tr {
                        th { "ROUND" }
                        th { "RESULT" }
                        th { "RECORD" }
                    }
                }
                tbody {
                    @for (round, entry) in &ledger.round_points {
                        tr {
                            td { (round) }
                            td {
                                @if let Some(result) = entry.result {
                                    (result.letter())
                                }
                            }
                            td { (entry.record) }
                        }
                    }
                }
            }
        }
    }
}
