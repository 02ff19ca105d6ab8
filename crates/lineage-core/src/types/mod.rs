//! # Core Type Definitions
//!
//! This module contains the identifier and error types shared by every
//! stage of a conversion run:
//! - Natural keys from the tabular source (`SourceId`)
//! - Run-local synthetic identifiers (`IndividualId`, `FamilyId`, `MediaId`)
//! - The family key (`ParentPair`)
//! - Error types (`LineageError`)
//!
//! ## Determinism Guarantees
//!
//! All keys implement `Ord` so they can live in `BTreeMap`/`BTreeSet`.
//! Synthetic identifiers are plain integers assigned in discovery order.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// SOURCE IDENTIFIER
// =============================================================================

/// Natural identifier of a person row, as written in the source table.
///
/// Never empty: an empty cell is an absent value, not an identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceId(String);

impl SourceId {
    /// Create a source identifier. Surrounding whitespace is trimmed.
    ///
    /// Returns `None` for an empty (or whitespace-only) value.
    #[must_use]
    pub fn new(s: impl AsRef<str>) -> Option<Self> {
        let trimmed = s.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// SYNTHETIC IDENTIFIERS
// =============================================================================

/// Synthetic identifier of an individual record (1-based, row order).
/// Displays as its cross-reference form, e.g. `@I3@`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndividualId(pub u64);

/// Synthetic identifier of a family record (1-based, discovery order).
/// Displays as its cross-reference form, e.g. `@F2@`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FamilyId(pub u64);

/// Identifier of a media object record (0-based, enqueue order).
/// Displays as its cross-reference form, e.g. `@O0@`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MediaId(pub u64);

impl fmt::Display for IndividualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@I{}@", self.0)
    }
}

impl fmt::Display for FamilyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@F{}@", self.0)
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@O{}@", self.0)
    }
}

// =============================================================================
// PARENT PAIR
// =============================================================================

/// The key of a family unit: the (father, mother) pair of a child row.
///
/// Absence is `None`, never an empty string, so an absent parent cannot
/// collide with a real identifier. At least one side is always present.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParentPair {
    father: Option<SourceId>,
    mother: Option<SourceId>,
}

impl ParentPair {
    /// Build a pair. Returns `None` when both parents are absent.
    #[must_use]
    pub fn new(father: Option<SourceId>, mother: Option<SourceId>) -> Option<Self> {
        if father.is_none() && mother.is_none() {
            return None;
        }
        Some(Self { father, mother })
    }

    #[must_use]
    pub fn father(&self) -> Option<&SourceId> {
        self.father.as_ref()
    }

    #[must_use]
    pub fn mother(&self) -> Option<&SourceId> {
        self.mother.as_ref()
    }

    /// The present parents, father first.
    pub fn parents(&self) -> impl Iterator<Item = &SourceId> {
        self.father.iter().chain(self.mother.iter())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur during a conversion run.
///
/// - No silent failures
/// - Use `Result<T, LineageError>` for fallible operations
/// - A run either produces a complete document or one of these
#[derive(Debug, Error)]
pub enum LineageError {
    /// A parent or child reference names no row.
    #[error("Unknown identifier '{id}' referenced by row {row}")]
    UnknownIdentifier { id: String, row: usize },

    /// Two rows share one source identifier.
    #[error("Duplicate source identifier '{id}' in rows {first} and {second}")]
    DuplicateSourceIdentifier {
        id: String,
        first: usize,
        second: usize,
    },

    /// A date cell could not be converted.
    #[error("Malformed date '{value}': {reason}")]
    MalformedDate { value: String, reason: String },

    /// A place cell is not of the form `[COUNTRY] [CITY]`.
    #[error("Malformed place '{0}': expected \"[COUNTRY] [CITY]\"")]
    MalformedPlace(String),

    /// No family unit is registered for the given parent pair.
    #[error("No family registered for parents {father:?} / {mother:?}")]
    UnknownFamily {
        father: Option<String>,
        mother: Option<String>,
    },

    /// A text cell holds a line break, which would split its output line.
    #[error("Row {row}: field '{field}' contains a line break")]
    LineBreak { row: usize, field: String },

    /// A required column is missing or empty.
    #[error("Row {row}: required field '{field}' is missing")]
    MissingField { row: usize, field: String },

    /// The serializer was asked to go back to an earlier phase.
    #[error("Cannot enter phase {to} after {from}")]
    PhaseOrder { from: String, to: String },

    /// The tabular input could not be read as records.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The configuration file is unreadable or inconsistent.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for LineageError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e.to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================
