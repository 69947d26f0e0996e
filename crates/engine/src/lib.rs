#![forbid(unsafe_code)]

pub mod session;
mod trainer;

pub use quiz_core::Clock;

pub use session::{
    AnsweredEvent, OptionView, ProgressTracker, QuestionView, Session, SessionBuilder,
    SessionCursor, TrainerSnapshot,
};
pub use trainer::Trainer;
