use rand::rng;
use rand::seq::SliceRandom;

use quiz_core::model::{QuestionId, QuestionRecord, Slot};

use super::builder::Session;

/// Emitted once per question appearance when the user commits an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsweredEvent {
    pub question_id: QuestionId,
    pub was_correct: bool,
}

/// Tracks the current position within one session, the revealed state,
/// and the per-question display order of the four option slots.
///
/// The cursor is scoped to one session instance; `rebuild` discards it
/// wholesale when the session is rebuilt. Display order never affects
/// correctness, which always compares against the record's fixed slot.
#[derive(Debug)]
pub struct SessionCursor {
    session: Session,
    position: usize,
    selected: Option<Slot>,
    revealed: bool,
    option_order: [Slot; 4],
}

impl SessionCursor {
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            session,
            position: 0,
            selected: None,
            revealed: false,
            option_order: fresh_order(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.session.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.session.is_empty()
    }

    /// Current index, or `None` when the session is empty.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        if self.is_empty() { None } else { Some(self.position) }
    }

    #[must_use]
    pub fn current(&self) -> Option<&QuestionRecord> {
        self.session.get(self.position)
    }

    #[must_use]
    pub fn selected(&self) -> Option<Slot> {
        self.selected
    }

    #[must_use]
    pub fn revealed(&self) -> bool {
        self.revealed
    }

    /// Display order for the current question's options.
    #[must_use]
    pub fn option_order(&self) -> [Slot; 4] {
        self.option_order
    }

    /// Percentage of the session completed, counting a revealed current
    /// question as done. Zero for an empty session.
    #[must_use]
    pub fn completion(&self) -> u32 {
        if self.is_empty() {
            return 0;
        }
        let done = self.position + usize::from(self.revealed);
        percent(done, self.len())
    }

    /// Moves to the next question, wrapping past the end. No-op when empty.
    pub fn advance(&mut self) {
        if self.is_empty() {
            return;
        }
        self.position = (self.position + 1) % self.len();
        self.enter_question();
    }

    /// Moves to the previous question, wrapping to the last. No-op when empty.
    pub fn retreat(&mut self) {
        if self.is_empty() {
            return;
        }
        self.position = (self.position + self.len() - 1) % self.len();
        self.enter_question();
    }

    /// Commits an answer for the current question and reveals the result.
    ///
    /// Returns the answered event for the progress tracker, or `None`
    /// when the session is empty or the question is already revealed: a
    /// question can be answered exactly once per appearance.
    pub fn select(&mut self, slot: Slot) -> Option<AnsweredEvent> {
        if self.revealed {
            return None;
        }
        let current = self.current()?;
        let event = AnsweredEvent {
            question_id: current.id().clone(),
            was_correct: slot == current.correct_slot(),
        };
        self.selected = Some(slot);
        self.revealed = true;
        Some(event)
    }

    /// Replaces the session wholesale and resets to the first question.
    pub fn rebuild(&mut self, session: Session) {
        self.session = session;
        self.position = 0;
        self.enter_question();
    }

    fn enter_question(&mut self) {
        self.selected = None;
        self.revealed = false;
        self.option_order = fresh_order();
    }
}

/// Rounded integer percentage, total must be non-zero.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn percent(part: usize, total: usize) -> u32 {
    ((part as f64 / total as f64) * 100.0).round() as u32
}

fn fresh_order() -> [Slot; 4] {
    let mut order = Slot::ALL;
    let mut rng = rng();
    order.shuffle(&mut rng);
    order
}
