pub mod coordinator;
pub mod distractors;

pub use coordinator::{CatchResolution, GroupState, QuestionGroup, SpawnCoordinator};
pub use distractors::select_distractors;
