use maud::{Markup, html};

use crate::HTMX_PATH;

#[must_use]
pub fn render_index_template(title: &str, tournament_id: i32, player_id: i64) -> Markup {
    html! {
        (maud::DOCTYPE)
        head {
            meta charset="UTF-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            link rel="stylesheet" type="text/css" href="static/styles.css";
            title { (title) }
            script src=(HTMX_PATH) defer {}
        }
        body {
            h1 { (title) }
            div id="scores"
                hx-get=(format!("scores?tournament={tournament_id}&player={player_id}"))
                hx-trigger="load, every 5s" hx-swap="innerHTML" {
                img alt="Result loading..." class="htmx-indicator" width="150" src="https://htmx.org//img/bars.svg" {}
            }
        }
    }
}
