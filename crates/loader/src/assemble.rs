use futures::future::join_all;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;

use quiz_core::model::{Corpus, QuestionRecord};

use crate::source::{QuestionSource, SourceError};

/// A source that could not be fetched or parsed, surfaced to the
/// presentation layer with the offending source named.
#[derive(Debug, Error)]
#[error("source {label} failed to load: {error}")]
pub struct SourceFailure {
    pub label: String,
    #[source]
    pub error: SourceError,
}

/// Result of one load pass over all registered sources.
#[derive(Debug)]
pub struct LoadOutcome {
    /// Accepted records from every successful source, in source order.
    pub corpus: Corpus,
    /// One entry per source that failed outright.
    pub failures: Vec<SourceFailure>,
    /// Rows dropped by validation across all successful sources.
    pub rejected_rows: usize,
}

/// Ticket for one load pass; stale once a newer pass begins or the
/// loader is torn down. A consumer must discard the outcome of a pass
/// whose ticket is no longer current.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl LoadTicket {
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }
}

/// Loads all registered sources concurrently and merges their accepted
/// records into one corpus.
///
/// Merging is deterministic: records land in registration order of their
/// sources, then row order, no matter which source finishes first. A
/// partially built corpus is never observable; `load` hands back the
/// complete outcome or nothing.
#[derive(Default)]
pub struct CorpusLoader {
    sources: Vec<Arc<dyn QuestionSource>>,
    generation: Arc<AtomicU64>,
}

impl CorpusLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_source(&mut self, source: Arc<dyn QuestionSource>) {
        self.sources.push(source);
    }

    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn QuestionSource>) -> Self {
        self.add_source(source);
        self
    }

    /// Begins a load pass, invalidating tickets from earlier passes.
    #[must_use]
    pub fn begin(&self) -> LoadTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket {
            generation,
            current: Arc::clone(&self.generation),
        }
    }

    /// Invalidates every outstanding ticket, e.g. on consumer teardown.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Fetches every source concurrently, validates rows, and merges.
    ///
    /// Per-source failures are collected in the outcome instead of
    /// aborting sibling sources; rejected rows are counted but dropped
    /// silently as routine data-quality filtering.
    pub async fn load(&self) -> LoadOutcome {
        let fetches = self.sources.iter().map(|source| {
            let source = Arc::clone(source);
            async move {
                let rows = source.fetch_rows().await;
                (source.label().to_owned(), rows)
            }
        });

        // join_all preserves registration order regardless of completion order.
        let results = join_all(fetches).await;

        let mut records = Vec::new();
        let mut failures = Vec::new();
        let mut rejected_rows = 0;

        for (label, result) in results {
            match result {
                Ok(rows) => {
                    for (index, row) in rows.iter().enumerate() {
                        match QuestionRecord::parse(row, &label, index) {
                            Ok(record) => records.push(record),
                            Err(_) => rejected_rows += 1,
                        }
                    }
                }
                Err(error) => failures.push(SourceFailure { label, error }),
            }
        }

        LoadOutcome {
            corpus: Corpus::new(records),
            failures,
            rejected_rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemorySource;
    use quiz_core::model::RawRow;

    fn valid_row(n: usize) -> RawRow {
        RawRow::new()
            .with("question", format!("Q{n}"))
            .with("option_a", "1")
            .with("option_b", "2")
            .with("option_c", "3")
            .with("option_d", "4")
            .with("correct_option", "A")
    }

    #[tokio::test]
    async fn merge_keeps_registration_order() {
        let loader = CorpusLoader::new()
            .with_source(Arc::new(InMemorySource::new("first", vec![valid_row(0)])))
            .with_source(Arc::new(InMemorySource::new("second", vec![valid_row(0)])));

        let outcome = loader.load().await;
        let ids: Vec<&str> = outcome
            .corpus
            .records()
            .iter()
            .map(|r| r.id().as_str())
            .collect();
        assert_eq!(ids, vec!["first-1", "second-1"]);
        assert!(outcome.failures.is_empty());
    }

    #[tokio::test]
    async fn invalid_rows_are_counted_but_dropped() {
        let rows = vec![valid_row(0), RawRow::new().with("question", "no options")];
        let loader =
            CorpusLoader::new().with_source(Arc::new(InMemorySource::new("bank", rows)));

        let outcome = loader.load().await;
        assert_eq!(outcome.corpus.len(), 1);
        assert_eq!(outcome.rejected_rows, 1);
    }

    #[tokio::test]
    async fn newer_pass_invalidates_older_tickets() {
        let loader = CorpusLoader::new();
        let first = loader.begin();
        assert!(first.is_current());

        let second = loader.begin();
        assert!(!first.is_current());
        assert!(second.is_current());

        loader.cancel();
        assert!(!second.is_current());
    }
}
