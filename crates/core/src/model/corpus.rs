use crate::model::question::QuestionRecord;

/// The full set of validated question records available after loading.
///
/// Records keep source-then-row order; that order is what an unshuffled
/// session preserves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    records: Vec<QuestionRecord>,
}

impl Corpus {
    #[must_use]
    pub fn new(records: Vec<QuestionRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct topics in first-seen order, for building filter choices.
    #[must_use]
    pub fn topics(&self) -> Vec<&str> {
        distinct(self.records.iter().map(QuestionRecord::topic))
    }

    /// Distinct difficulties in first-seen order.
    #[must_use]
    pub fn difficulties(&self) -> Vec<&str> {
        distinct(self.records.iter().map(QuestionRecord::difficulty))
    }

    /// Record count per difficulty, in first-seen order.
    #[must_use]
    pub fn difficulty_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for record in &self.records {
            match counts.iter_mut().find(|(d, _)| *d == record.difficulty()) {
                Some((_, n)) => *n += 1,
                None => counts.push((record.difficulty(), 1)),
            }
        }
        counts
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::question::RawRow;

    fn record(topic: &str, difficulty: &str, n: usize) -> QuestionRecord {
        let row = RawRow::new()
            .with("question", format!("Q{n}"))
            .with("option_a", "1")
            .with("option_b", "2")
            .with("option_c", "3")
            .with("option_d", "4")
            .with("correct_option", "A")
            .with("topic", topic)
            .with("difficulty", difficulty);
        QuestionRecord::parse(&row, "test", n).unwrap()
    }

    #[test]
    fn topics_are_distinct_in_first_seen_order() {
        let corpus = Corpus::new(vec![
            record("SQL", "Easy", 0),
            record("UML", "Hard", 1),
            record("SQL", "Medium", 2),
        ]);
        assert_eq!(corpus.topics(), vec!["SQL", "UML"]);
    }

    #[test]
    fn difficulty_counts_accumulate() {
        let corpus = Corpus::new(vec![
            record("SQL", "Easy", 0),
            record("UML", "Hard", 1),
            record("SQL", "Easy", 2),
        ]);
        assert_eq!(corpus.difficulty_counts(), vec![("Easy", 2), ("Hard", 1)]);
    }

    #[test]
    fn empty_corpus_reports_no_categories() {
        let corpus = Corpus::default();
        assert!(corpus.is_empty());
        assert!(corpus.topics().is_empty());
        assert!(corpus.difficulty_counts().is_empty());
    }
}
