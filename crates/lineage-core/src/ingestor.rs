//! # Ingestor Module
//!
//! The build pass of a conversion run.
//!
//! - Validate every row before anything is emitted
//! - Reject dangling parent references and duplicate identifiers
//! - Assign synthetic identifiers and discover family units in one
//!   sequential pass, so identical input always yields identical numbering

use crate::date::format_date;
use crate::identity::IdentityMap;
use crate::place::Place;
use crate::primitives::columns;
use crate::registry::FamilyRegistry;
use crate::row::PersonRow;
use crate::tree::FamilyTree;
use crate::types::LineageError;

/// The Ingestor turns person rows into a [`FamilyTree`].
pub struct Ingestor;

impl Ingestor {
    /// Validate the cells of a single row that the serializer will parse.
    ///
    /// A row is valid if:
    /// - No text cell contains a line break
    /// - Its birth and death dates (when present) convert
    /// - The place of each dated event (when present) parses as `[COUNTRY] [CITY]`
    ///
    /// A place without a date is never emitted and is not checked.
    /// `row_number` is 1-based and only used in error messages.
    pub fn validate(row: &PersonRow, row_number: usize) -> Result<(), LineageError> {
        let text_cells = [
            (columns::ID, Some(row.id.as_str())),
            (columns::LAST_NAME, Some(row.last_name.as_str())),
            (columns::TITLE, row.title.as_deref()),
            (columns::FIRST_NAME, Some(row.first_name.as_str())),
            (columns::MIDDLE_NAME, row.middle_name.as_deref()),
            (columns::NICKNAME, row.nickname.as_deref()),
            (columns::EMAIL, row.email.as_deref()),
            (columns::WEBPAGE, row.webpage.as_deref()),
            (columns::BIRTH_PLACE, row.birth_place.as_deref()),
            (columns::DEATH_PLACE, row.death_place.as_deref()),
        ];
        for (field, value) in text_cells {
            if value.is_some_and(has_line_break) {
                return Err(LineageError::LineBreak {
                    row: row_number,
                    field: field.to_string(),
                });
            }
        }

        let events = [
            (&row.birth_date, &row.birth_place),
            (&row.death_date, &row.death_place),
        ];
        for (date, place) in events {
            let Some(date) = date else { continue };
            format_date(date)?;
            if let Some(place) = place {
                Place::parse(place)?;
            }
        }
        tracing::trace!(row = row_number, id = %row.id, "row validated");
        Ok(())
    }

    /// Run the build pass over all rows.
    ///
    /// # Errors
    /// - `DuplicateSourceIdentifier` if two rows share an identifier
    /// - `UnknownIdentifier` if a parent reference names no row
    /// - `LineBreak` / `MalformedDate` / `MalformedPlace` from [`Ingestor::validate`]
    pub fn build(rows: Vec<PersonRow>) -> Result<FamilyTree, LineageError> {
        let identities = IdentityMap::build(&rows)?;
        let mut registry = FamilyRegistry::new();

        for (idx, row) in rows.iter().enumerate() {
            let row_number = idx + 1;
            Self::validate(row, row_number)?;

            let Some(parents) = row.parent_pair() else {
                continue;
            };
            for parent in parents.parents() {
                identities.lookup(parent, row_number)?;
            }
            let child = identities.lookup(&row.id, row_number)?;
            registry.register_child(parents, child);
        }

        tracing::debug!(
            individuals = identities.len(),
            families = registry.len(),
            "build pass complete"
        );

        Ok(FamilyTree::new(rows, identities, registry))
    }
}

/// True if `text` would not fit on one output line.
pub(crate) fn has_line_break(text: &str) -> bool {
    text.contains(['\r', '\n'])
}

// =============================================================================
// TESTS
// =============================================================================
