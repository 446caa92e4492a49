//! Plain bookkeeping owned by the session: score, help charges and
//! discovered entities.

pub mod encyclopedia;
pub mod help;
pub mod score;

pub use encyclopedia::Encyclopedia;
pub use help::HelpState;
pub use score::{Outcome, ScoreBoard};
