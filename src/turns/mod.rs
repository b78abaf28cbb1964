//! Turn scheduling: the fixed asker→target cycle and the timed rapid round.

pub mod rapid;
pub mod scheduler;

pub use rapid::{rapid_target, RapidRound, RapidStage};
pub use scheduler::{cycle_target, question_cycle, QuestionTurn};
