use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── SLOTS ─────────────────────────────────────────────────────────────────────
//

/// One of the four fixed answer-option identifiers.
///
/// Slots identify options independently of display order; shuffling the
/// presentation never changes which slot is correct.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Slot {
    A,
    B,
    C,
    D,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::A, Slot::B, Slot::C, Slot::D];

    /// Display label for this slot.
    #[must_use]
    pub fn label(self) -> char {
        match self {
            Slot::A => 'A',
            Slot::B => 'B',
            Slot::C => 'C',
            Slot::D => 'D',
        }
    }

    /// Stable index of this slot, 0..4.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Slot::A => 0,
            Slot::B => 1,
            Slot::C => 2,
            Slot::D => 3,
        }
    }

    /// Raw-row field name carrying this slot's option text.
    #[must_use]
    pub fn field_name(self) -> &'static str {
        match self {
            Slot::A => "option_a",
            Slot::B => "option_b",
            Slot::C => "option_c",
            Slot::D => "option_d",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Error type for parsing a slot identifier from a raw field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a valid option slot: {value:?}")]
pub struct ParseSlotError {
    value: String,
}

impl FromStr for Slot {
    type Err = ParseSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Slot::A),
            "B" => Ok(Slot::B),
            "C" => Ok(Slot::C),
            "D" => Ok(Slot::D),
            _ => Err(ParseSlotError {
                value: s.to_owned(),
            }),
        }
    }
}

//
// ─── RAW ROWS ──────────────────────────────────────────────────────────────────
//

/// One unvalidated row from a tabular source: named string fields.
///
/// Distinguishes a *missing* field (`get` returns `None`) from a field
/// that is present but blank, so validation can apply one uniform policy
/// to both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Builder-style `set`, for tests and in-memory sources.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Returns the field value, or `None` when the field is absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

//
// ─── QUESTION RECORDS ──────────────────────────────────────────────────────────
//

/// Why a raw row was rejected during validation.
///
/// Rejections are routine data-quality filtering, not user-facing errors;
/// the loader drops rejected rows silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RowError {
    #[error("prompt is missing or blank")]
    MissingPrompt,

    #[error("correct option is missing or blank")]
    MissingCorrectSlot,

    #[error(transparent)]
    InvalidCorrectSlot(#[from] ParseSlotError),

    #[error("option {0} is missing or blank")]
    MissingOption(Slot),
}

const DEFAULT_EXPLANATION: &str = "No explanation provided.";
const DEFAULT_TOPIC: &str = "General";
const DEFAULT_DIFFICULTY: &str = "Medium";

/// A validated, immutable quiz item.
///
/// Only validation can construct a record, so every record in a corpus
/// has a non-empty prompt, all four option texts, and a correct slot
/// referencing one of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRecord {
    id: QuestionId,
    prompt: String,
    options: [String; 4],
    correct_slot: Slot,
    explanation: String,
    topic: String,
    difficulty: String,
}

impl QuestionRecord {
    /// Validates a raw row into a record.
    ///
    /// All string fields are trimmed. Blank option text is rejected the
    /// same way as a missing option field. Optional fields fall back to
    /// fixed placeholders; a missing `id` is synthesized from the source
    /// label and the 1-based row position (`row_index` is 0-based).
    ///
    /// # Errors
    ///
    /// Returns `RowError` describing the first failed check.
    pub fn parse(row: &RawRow, source_label: &str, row_index: usize) -> Result<Self, RowError> {
        let prompt = non_blank(row.get("question")).ok_or(RowError::MissingPrompt)?;

        let correct_raw = non_blank(row.get("correct_option")).ok_or(RowError::MissingCorrectSlot)?;
        let correct_slot = correct_raw.parse::<Slot>()?;

        let mut options: [String; 4] = Default::default();
        for slot in Slot::ALL {
            let text = non_blank(row.get(slot.field_name()))
                .ok_or(RowError::MissingOption(slot))?;
            options[slot.index()] = text;
        }

        let id = match non_blank(row.get("id")) {
            Some(id) => QuestionId::new(id),
            None => QuestionId::synthesize(source_label, row_index + 1),
        };

        Ok(Self {
            id,
            prompt,
            options,
            correct_slot,
            explanation: non_blank(row.get("explanation"))
                .unwrap_or_else(|| DEFAULT_EXPLANATION.to_owned()),
            topic: non_blank(row.get("topic")).unwrap_or_else(|| DEFAULT_TOPIC.to_owned()),
            difficulty: non_blank(row.get("difficulty"))
                .unwrap_or_else(|| DEFAULT_DIFFICULTY.to_owned()),
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Option text for the given slot.
    #[must_use]
    pub fn option_text(&self, slot: Slot) -> &str {
        &self.options[slot.index()]
    }

    #[must_use]
    pub fn correct_slot(&self) -> Slot {
        self.correct_slot
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
