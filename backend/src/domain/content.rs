//! Daily content catalogue types.
//!
//! The catalogue is a fixed set of [`ContentDay`] records, one per index in
//! the repeating 30-day cycle. Records are immutable once loaded.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Length of the repeating content cycle.
pub const CYCLE_DAYS: u32 = 30;

/// Validation errors returned by the content constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentValidationError {
    DayOutOfRange { day: u32 },
    EmptyQuestion,
}

impl fmt::Display for ContentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DayOutOfRange { day } => {
                write!(f, "day index {day} is outside 1..={CYCLE_DAYS}")
            }
            Self::EmptyQuestion => write!(f, "question text must not be blank"),
        }
    }
}

impl std::error::Error for ContentValidationError {}

/// Index into the repeating content cycle, always in `1..=30`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct DayIndex(u32);

impl DayIndex {
    /// Validate and construct a [`DayIndex`].
    pub fn new(day: u32) -> Result<Self, ContentValidationError> {
        if (1..=CYCLE_DAYS).contains(&day) {
            Ok(Self(day))
        } else {
            Err(ContentValidationError::DayOutOfRange { day })
        }
    }

    /// Map a 1-based day-of-year onto the repeating cycle.
    ///
    /// `(day_of_year % CYCLE_DAYS) + 1` is always in range, so this cannot
    /// fail.
    pub fn from_day_of_year(day_of_year: u32) -> Self {
        Self((day_of_year % CYCLE_DAYS) + 1)
    }

    /// The raw 1-based index.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for DayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DayIndex> for u32 {
    fn from(value: DayIndex) -> Self {
        value.0
    }
}

impl TryFrom<u32> for DayIndex {
    type Error = ContentValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A single quiz question presented to both members of a relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct Question(String);

impl Question {
    /// Validate and construct a question.
    pub fn new(text: impl AsRef<str>) -> Result<Self, ContentValidationError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ContentValidationError::EmptyQuestion);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Question {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Question> for String {
    fn from(value: Question) -> Self {
        value.0
    }
}

impl TryFrom<String> for Question {
    type Error = ContentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Immutable catalogue entry: the questions for one cycle day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentDay {
    day: DayIndex,
    questions: Vec<Question>,
}

impl ContentDay {
    /// Assemble a catalogue entry.
    pub fn new(day: DayIndex, questions: Vec<Question>) -> Self {
        Self { day, questions }
    }

    /// Cycle day this entry covers.
    pub fn day(&self) -> DayIndex {
        self.day
    }

    /// Questions for the day.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}
