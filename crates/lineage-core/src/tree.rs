//! # Family Tree
//!
//! The immutable result of the build pass: the rows together with their
//! identity map, family registry and spouse index. Everything the
//! serializer reads lives here; nothing here changes after construction.

use crate::identity::IdentityMap;
use crate::registry::{FamilyRegistry, FamilyUnit, SpouseIndex};
use crate::row::PersonRow;
use crate::types::{FamilyId, LineageError};

/// A fully linked set of person rows.
///
/// Construct with [`crate::Ingestor::build`].
#[derive(Debug, Clone)]
pub struct FamilyTree {
    rows: Vec<PersonRow>,
    identities: IdentityMap,
    registry: FamilyRegistry,
    spouses: SpouseIndex,
}

impl FamilyTree {
    pub(crate) fn new(rows: Vec<PersonRow>, identities: IdentityMap, registry: FamilyRegistry) -> Self {
        let spouses = registry.spouse_index();
        Self {
            rows,
            identities,
            registry,
            spouses,
        }
    }

    /// Rows in input order.
    #[must_use]
    pub fn rows(&self) -> &[PersonRow] {
        &self.rows
    }

    #[must_use]
    pub fn identities(&self) -> &IdentityMap {
        &self.identities
    }

    #[must_use]
    pub fn registry(&self) -> &FamilyRegistry {
        &self.registry
    }

    #[must_use]
    pub fn spouses(&self) -> &SpouseIndex {
        &self.spouses
    }

    /// The family in which `row` is a child, if it has a known parent.
    pub fn child_family(&self, row: &PersonRow) -> Result<Option<&FamilyUnit>, LineageError> {
        match row.parent_pair() {
            Some(pair) => self.registry.family_for(&pair).map(Some),
            None => Ok(None),
        }
    }

    /// Families in which `row` is a spouse, in discovery order.
    #[must_use]
    pub fn spouse_families(&self, row: &PersonRow) -> &[FamilyId] {
        self.spouses.families_of(&row.id)
    }
}
