use chrono::{DateTime, Utc};

use quiz_core::model::{CategoryFilter, Corpus, SessionConfig, Slot};
use quiz_core::Clock;

use crate::session::{ProgressTracker, SessionBuilder, SessionCursor, TrainerSnapshot};

/// Single-threaded, event-driven facade over the session engine.
///
/// Owns the corpus, the configuration, the cursor, and the progress
/// tracker, and sequences every command to completion before the next
/// one is observed. Every configuration change rebuilds the session from
/// scratch; the session is never patched incrementally.
#[derive(Debug)]
pub struct Trainer {
    clock: Clock,
    corpus: Corpus,
    config: SessionConfig,
    cursor: SessionCursor,
    progress: ProgressTracker,
    session_started_at: DateTime<Utc>,
}

impl Trainer {
    #[must_use]
    pub fn new(corpus: Corpus) -> Self {
        Self::with_clock(corpus, Clock::default())
    }

    #[must_use]
    pub fn with_clock(corpus: Corpus, clock: Clock) -> Self {
        let config = SessionConfig::default();
        let progress = ProgressTracker::new();
        let session = SessionBuilder::new(&config, progress.answered_ids()).build(&corpus);
        Self {
            clock,
            corpus,
            config,
            cursor: SessionCursor::new(session),
            progress,
            session_started_at: clock.now(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    #[must_use]
    pub fn cursor(&self) -> &SessionCursor {
        &self.cursor
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    // ── Configuration commands; each rebuilds the session. ────────────

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.config.set_search_text(text);
        self.rebuild_session();
    }

    pub fn set_topic_filter(&mut self, filter: CategoryFilter) {
        self.config.set_topic(filter);
        self.rebuild_session();
    }

    pub fn set_difficulty_filter(&mut self, filter: CategoryFilter) {
        self.config.set_difficulty(filter);
        self.rebuild_session();
    }

    pub fn set_pool_size(&mut self, size: u32) {
        self.config.set_pool_size(size);
        self.rebuild_session();
    }

    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.config.set_shuffle(shuffle);
        self.rebuild_session();
    }

    pub fn set_exclude_answered(&mut self, exclude: bool) {
        self.config.set_exclude_answered(exclude);
        self.rebuild_session();
    }

    /// Swaps in a freshly loaded corpus and rebuilds.
    pub fn replace_corpus(&mut self, corpus: Corpus) {
        self.corpus = corpus;
        self.rebuild_session();
    }

    // ── Session commands. ─────────────────────────────────────────────

    /// Commits an answer for the current question; the answered event is
    /// routed straight into the progress tracker. No-op when the session
    /// is empty or the question is already revealed.
    pub fn select_option(&mut self, slot: Slot) {
        if let Some(event) = self.cursor.select(slot) {
            self.progress.record(&event);
        }
    }

    pub fn advance(&mut self) {
        self.cursor.advance();
    }

    pub fn retreat(&mut self) {
        self.cursor.retreat();
    }

    /// Rebuilds with the current configuration, keeping progress.
    pub fn restart_session(&mut self) {
        self.rebuild_session();
    }

    /// Clears progress, then rebuilds so "exclude answered" re-admits
    /// previously excluded records.
    pub fn reset_progress(&mut self) {
        self.progress.reset();
        self.rebuild_session();
    }

    /// Read-only snapshot for the presentation adapter.
    #[must_use]
    pub fn snapshot(&self) -> TrainerSnapshot {
        TrainerSnapshot::capture(
            &self.corpus,
            &self.cursor,
            &self.progress,
            self.session_started_at,
        )
    }

    fn rebuild_session(&mut self) {
        let session =
            SessionBuilder::new(&self.config, self.progress.answered_ids()).build(&self.corpus);
        self.cursor.rebuild(session);
        self.session_started_at = self.clock.now();
    }
}
