use rand::rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use quiz_core::model::{Corpus, QuestionId, QuestionRecord, SessionConfig};

/// The finite, ordered subset of the corpus selected for one practice run.
///
/// Materialized once per rebuild; an empty session is a valid terminal
/// state, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    questions: Vec<QuestionRecord>,
}

impl Session {
    #[must_use]
    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&QuestionRecord> {
        self.questions.get(position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Builds a session by filtering, optionally shuffling, and truncating
/// the corpus.
pub struct SessionBuilder<'a> {
    config: &'a SessionConfig,
    answered: &'a HashSet<QuestionId>,
}

impl<'a> SessionBuilder<'a> {
    #[must_use]
    pub fn new(config: &'a SessionConfig, answered: &'a HashSet<QuestionId>) -> Self {
        Self { config, answered }
    }

    /// Selects the session for the current configuration.
    ///
    /// Filtering keeps corpus order. When shuffling is on, the filtered
    /// set gets a uniform Fisher-Yates permutation before truncation, so
    /// every record that passes the filters has an equal chance of
    /// appearing in a truncated session.
    #[must_use]
    pub fn build(&self, corpus: &Corpus) -> Session {
        let needle = self.config.search_text().trim().to_lowercase();

        let mut filtered: Vec<QuestionRecord> = corpus
            .records()
            .iter()
            .filter(|record| self.keeps(record, &needle))
            .cloned()
            .collect();

        if filtered.is_empty() {
            return Session::default();
        }

        let pool = (self.config.pool_size().max(1) as usize).min(filtered.len());

        if self.config.shuffle() {
            let mut rng = rng();
            filtered.as_mut_slice().shuffle(&mut rng);
        }
        filtered.truncate(pool);

        Session { questions: filtered }
    }

    fn keeps(&self, record: &QuestionRecord, needle: &str) -> bool {
        if !self.config.topic().matches(record.topic()) {
            return false;
        }
        if !self.config.difficulty().matches(record.difficulty()) {
            return false;
        }
        if !needle.is_empty()
            && !record.prompt().to_lowercase().contains(needle)
            && !record.explanation().to_lowercase().contains(needle)
        {
            return false;
        }
        if self.config.exclude_answered() && self.answered.contains(record.id()) {
            return false;
        }
        true
    }
}
