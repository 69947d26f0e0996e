#![forbid(unsafe_code)]

pub mod assemble;
pub mod source;

pub use assemble::{CorpusLoader, LoadOutcome, LoadTicket, SourceFailure};
pub use source::{
    DelimitedFileSource, InMemorySource, JsonFileSource, QuestionSource, SourceError,
};
