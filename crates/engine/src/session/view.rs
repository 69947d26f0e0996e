use chrono::{DateTime, Utc};

use quiz_core::model::{Corpus, QuestionRecord, Slot};

use super::cursor::SessionCursor;
use super::progress::ProgressTracker;

/// One option as the presentation layer should display it: the display
/// position is the vector index, the slot stays attached for answering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub slot: Slot,
    pub text: String,
}

/// The current question rendered for display.
///
/// `correct_slot` and `explanation` are withheld until the answer has
/// been revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub id: String,
    pub prompt: String,
    pub topic: String,
    pub difficulty: String,
    pub options: Vec<OptionView>,
    pub correct_slot: Option<Slot>,
    pub explanation: Option<String>,
}

impl QuestionView {
    fn render(record: &QuestionRecord, order: [Slot; 4], revealed: bool) -> Self {
        Self {
            id: record.id().to_string(),
            prompt: record.prompt().to_owned(),
            topic: record.topic().to_owned(),
            difficulty: record.difficulty().to_owned(),
            options: order
                .iter()
                .map(|&slot| OptionView {
                    slot,
                    text: record.option_text(slot).to_owned(),
                })
                .collect(),
            correct_slot: revealed.then(|| record.correct_slot()),
            explanation: revealed.then(|| record.explanation().to_owned()),
        }
    }
}

/// Read-only snapshot of the whole engine for the presentation adapter.
///
/// This is intentionally **not** a UI view-model: no pre-formatted
/// strings beyond the question texts themselves, no layout assumptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerSnapshot {
    pub question: Option<QuestionView>,
    pub position: Option<usize>,
    pub session_len: usize,
    pub session_empty: bool,
    pub selected: Option<Slot>,
    pub revealed: bool,

    pub answered_count: u32,
    pub correct_count: u32,
    /// Corpus records not yet in the answered-ID set.
    pub unanswered_count: usize,
    pub accuracy: u32,
    pub completion: u32,

    pub topics: Vec<String>,
    pub difficulties: Vec<String>,
    pub difficulty_counts: Vec<(String, usize)>,

    pub session_started_at: DateTime<Utc>,
}

impl TrainerSnapshot {
    #[must_use]
    pub(crate) fn capture(
        corpus: &Corpus,
        cursor: &SessionCursor,
        progress: &ProgressTracker,
        session_started_at: DateTime<Utc>,
    ) -> Self {
        let question = cursor
            .current()
            .map(|record| QuestionView::render(record, cursor.option_order(), cursor.revealed()));

        Self {
            question,
            position: cursor.position(),
            session_len: cursor.len(),
            session_empty: cursor.is_empty(),
            selected: cursor.selected(),
            revealed: cursor.revealed(),
            answered_count: progress.answered_count(),
            correct_count: progress.correct_count(),
            unanswered_count: corpus.len().saturating_sub(progress.answered_ids().len()),
            accuracy: progress.accuracy(),
            completion: cursor.completion(),
            topics: corpus.topics().iter().map(|&t| t.to_owned()).collect(),
            difficulties: corpus
                .difficulties()
                .iter()
                .map(|&d| d.to_owned())
                .collect(),
            difficulty_counts: corpus
                .difficulty_counts()
                .into_iter()
                .map(|(d, n)| (d.to_owned(), n))
                .collect(),
            session_started_at,
        }
    }
}
