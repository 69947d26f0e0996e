mod builder;
mod cursor;
mod progress;
mod view;

// Public API of the session subsystem.
pub use builder::{Session, SessionBuilder};
pub use cursor::{AnsweredEvent, SessionCursor};
pub use progress::ProgressTracker;
pub use view::{OptionView, QuestionView, TrainerSnapshot};
