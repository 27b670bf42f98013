pub mod field;
pub mod matchplay;
pub mod scoreboard;
pub mod scorecard;
pub mod template;

pub use field::*;
pub use matchplay::*;
pub use scoreboard::*;
pub use scorecard::*;
pub use template::*;
