pub mod args;
pub mod model;
pub mod controller {
    pub mod cache;
    pub mod refresh;
    pub mod score;
}
pub mod view {
    pub mod index;
    pub mod score;
}

const HTMX_PATH: &str = "https://unpkg.com/htmx.org@1.9.12";
