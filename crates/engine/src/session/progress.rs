use std::collections::HashSet;

use quiz_core::model::QuestionId;

use super::cursor::{percent, AnsweredEvent};

/// Accumulates answer counts and the set of answered question IDs across
/// session rebuilds.
///
/// The answered-ID set survives filter changes and restarts; only an
/// explicit `reset` clears it. Resetting does not rebuild the session,
/// the caller triggers that so "exclude answered" re-admits records.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    answered_count: u32,
    correct_count: u32,
    answered_ids: HashSet<QuestionId>,
}

impl ProgressTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one answered event from the cursor.
    pub fn record(&mut self, event: &AnsweredEvent) {
        self.answered_count += 1;
        if event.was_correct {
            self.correct_count += 1;
        }
        self.answered_ids.insert(event.question_id.clone());
    }

    /// Clears counts and the answered-ID set back to zero.
    pub fn reset(&mut self) {
        self.answered_count = 0;
        self.correct_count = 0;
        self.answered_ids.clear();
    }

    #[must_use]
    pub fn answered_count(&self) -> u32 {
        self.answered_count
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn answered_ids(&self) -> &HashSet<QuestionId> {
        &self.answered_ids
    }

    /// Rounded percentage of correct answers; zero when nothing has been
    /// answered yet, by convention.
    #[must_use]
    pub fn accuracy(&self) -> u32 {
        if self.answered_count == 0 {
            return 0;
        }
        percent(self.correct_count as usize, self.answered_count as usize)
    }
}
