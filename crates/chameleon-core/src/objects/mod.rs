pub mod cards;
pub mod chameleon;
pub mod tongue;

pub use cards::{AnswerCard, QuestionCard};
pub use chameleon::{AimState, Chameleon, Expression};
pub use tongue::{Tongue, TonguePhase};
