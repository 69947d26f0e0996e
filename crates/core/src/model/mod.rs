mod config;
mod corpus;
mod ids;
mod question;

pub use config::{CategoryFilter, SessionConfig, DEFAULT_POOL_SIZE};
pub use corpus::Corpus;
pub use ids::QuestionId;
pub use question::{ParseSlotError, QuestionRecord, RawRow, RowError, Slot};
