//! # Identity Remapper
//!
//! Replaces the natural identifiers of the source table with sequential
//! synthetic ones. Row `n` (0-based) becomes individual `n + 1`.

use crate::row::PersonRow;
use crate::types::{IndividualId, LineageError, SourceId};
use std::collections::BTreeMap;

/// Mapping from source identifier to synthetic individual identifier.
///
/// Built once, in row order, and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct IdentityMap {
    /// Source identifiers in row order; position `n` holds individual `n + 1`.
    order: Vec<SourceId>,

    /// Reverse lookup: SourceId -> IndividualId
    index: BTreeMap<SourceId, IndividualId>,
}

impl IdentityMap {
    /// Assign identifiers `1..=N` in row order.
    ///
    /// Fails with `DuplicateSourceIdentifier` if two rows share an identifier.
    /// Row numbers in errors are 1-based.
    pub fn build(rows: &[PersonRow]) -> Result<Self, LineageError> {
        let mut map = Self {
            order: Vec::with_capacity(rows.len()),
            index: BTreeMap::new(),
        };

        for row in rows {
            let next = IndividualId(map.order.len() as u64 + 1);
            if let Some(existing) = map.index.get(&row.id) {
                return Err(LineageError::DuplicateSourceIdentifier {
                    id: row.id.to_string(),
                    first: existing.0 as usize,
                    second: next.0 as usize,
                });
            }
            map.index.insert(row.id.clone(), next);
            map.order.push(row.id.clone());
        }

        Ok(map)
    }

    /// Look up the synthetic identifier of a source identifier.
    ///
    /// `row` is the 1-based row that holds the reference, used for the error.
    pub fn lookup(&self, id: &SourceId, row: usize) -> Result<IndividualId, LineageError> {
        self.get(id).ok_or_else(|| LineageError::UnknownIdentifier {
            id: id.to_string(),
            row,
        })
    }

    #[must_use]
    pub fn get(&self, id: &SourceId) -> Option<IndividualId> {
        self.index.get(id).copied()
    }

    /// All (source, synthetic) pairs in row order.
    pub fn iter(&self) -> impl Iterator<Item = (&SourceId, IndividualId)> {
        self.order
            .iter()
            .enumerate()
            .map(|(i, id)| (id, IndividualId(i as u64 + 1)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
