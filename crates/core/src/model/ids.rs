use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a question record.
///
/// IDs come from the source row when present. For rows without an `id`
/// field the ID is synthesized from the source label and the 1-based row
/// position, which keeps it stable across reloads of an unchanged source.
/// Reordering rows within a source changes synthesized IDs and desyncs
/// any answered-ID tracking keyed by them; this is a documented
/// limitation of position-based IDs.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(String);

impl QuestionId {
    /// Creates a `QuestionId` from an explicit source-provided value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Synthesizes an ID for a row that carries none.
    ///
    /// `row_number` is 1-based within the source.
    #[must_use]
    pub fn synthesize(source_label: &str, row_number: usize) -> Self {
        Self(format!("{source_label}-{row_number}"))
    }

    /// Returns the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_id_display() {
        let id = QuestionId::new("sheet1-42");
        assert_eq!(id.to_string(), "sheet1-42");
    }

    #[test]
    fn synthesized_id_uses_label_and_row_number() {
        let id = QuestionId::synthesize("sql-bank", 7);
        assert_eq!(id.as_str(), "sql-bank-7");
    }

    #[test]
    fn ids_compare_by_value() {
        assert_eq!(QuestionId::new("a-1"), QuestionId::synthesize("a", 1));
    }
}
