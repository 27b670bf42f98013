pub mod database_read;
pub mod database_write;
pub mod matchplay;
pub mod points;
pub mod scorecard;
pub mod tournament;
pub mod types;
pub mod utils;

pub use database_read::*;
pub use database_write::*;
pub use matchplay::*;
pub use points::*;
pub use scorecard::*;
pub use tournament::*;
pub use types::*;
pub use utils::*;
