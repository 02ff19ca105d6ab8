//! # Person Rows
//!
//! The read-only input of a conversion run: one `PersonRow` per line of the
//! source table. Every optional cell is an `Option`; an empty cell is `None`.

use crate::types::{ParentPair, SourceId};
use serde::{Deserialize, Serialize};

// =============================================================================
// SOURCE DATE
// =============================================================================

/// A date cell as found in the source table.
///
/// Spreadsheets hand out a bare year as a number and anything more precise
/// as `day/month/year` text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceDate {
    /// A bare year, e.g. `1931`.
    Year(i64),
    /// Slash-delimited text, e.g. `08/04/1931` or `04/1931`.
    Text(String),
}

// =============================================================================
// SEX
// =============================================================================

/// Sex marker of an individual record.
///
/// The mapping is binary: code `0` is male, every other code (and a missing
/// code) is female. There is deliberately no third category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Map a source sex code.
    #[must_use]
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(0) => Sex::Male,
            _ => Sex::Female,
        }
    }

    /// The `SEX` line value.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }
}

// =============================================================================
// PERSON ROW
// =============================================================================

/// One person of the source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRow {
    pub id: SourceId,
    pub father_id: Option<SourceId>,
    pub mother_id: Option<SourceId>,
    pub last_name: String,
    pub title: Option<String>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub nickname: Option<String>,
    pub sex_code: Option<i64>,
    pub email: Option<String>,
    pub webpage: Option<String>,
    pub birth_date: Option<SourceDate>,
    pub birth_place: Option<String>,
    pub death_date: Option<SourceDate>,
    pub death_place: Option<String>,
    /// `Some(0)` marks a person known to be dead without a death date.
    pub living: Option<i64>,
}

impl PersonRow {
    /// Create a row with only the required fields set.
    #[must_use]
    pub fn new(id: SourceId, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            father_id: None,
            mother_id: None,
            last_name: last_name.into(),
            title: None,
            first_name: first_name.into(),
            middle_name: None,
            nickname: None,
            sex_code: None,
            email: None,
            webpage: None,
            birth_date: None,
            birth_place: None,
            death_date: None,
            death_place: None,
            living: None,
        }
    }

    /// The family key of this row, if at least one parent is known.
    #[must_use]
    pub fn parent_pair(&self) -> Option<ParentPair> {
        ParentPair::new(self.father_id.clone(), self.mother_id.clone())
    }

    #[must_use]
    pub fn sex(&self) -> Sex {
        Sex::from_code(self.sex_code)
    }

    /// True when the row carries no death date but is flagged as not living.
    #[must_use]
    pub fn is_dead_without_date(&self) -> bool {
        self.death_date.is_none() && self.living == Some(0)
    }
}
