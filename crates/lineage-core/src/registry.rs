//! # Family Registry
//!
//! Discovers family units from the parent references of child rows.
//!
//! One family unit exists per distinct `ParentPair`. Units are numbered in
//! the order their pair is first seen, and that order is kept explicitly
//! (`Vec` storage plus a `BTreeMap` index) rather than inferred from map
//! iteration.

use crate::types::{FamilyId, IndividualId, LineageError, ParentPair, SourceId};
use std::collections::BTreeMap;

// =============================================================================
// FAMILY UNIT
// =============================================================================

/// One family: a parent pair and the children registered under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyUnit {
    id: FamilyId,
    parents: ParentPair,
    children: Vec<IndividualId>,
}

impl FamilyUnit {
    #[must_use]
    pub fn id(&self) -> FamilyId {
        self.id
    }

    #[must_use]
    pub fn parents(&self) -> &ParentPair {
        &self.parents
    }

    /// Children in registration (row) order. Never empty.
    #[must_use]
    pub fn children(&self) -> &[IndividualId] {
        &self.children
    }
}

// =============================================================================
// SPOUSE INDEX
// =============================================================================

/// Derived mapping from a parent's source identifier to the families in
/// which they are a spouse, in family discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpouseIndex {
    families: BTreeMap<SourceId, Vec<FamilyId>>,
}

impl SpouseIndex {
    /// Families in which `id` is a parent. Empty if none.
    #[must_use]
    pub fn families_of(&self, id: &SourceId) -> &[FamilyId] {
        self.families.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct people that are a parent in at least one family.
    #[must_use]
    pub fn spouse_count(&self) -> usize {
        self.families.len()
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Registry of discovered family units.
#[derive(Debug, Clone, Default)]
pub struct FamilyRegistry {
    /// Units in discovery order; position `n` holds family `n + 1`.
    units: Vec<FamilyUnit>,

    /// Lookup: ParentPair -> position in `units`
    index: BTreeMap<ParentPair, usize>,
}

impl FamilyRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `child` under `parents`.
    ///
    /// Appends to the existing unit for this pair, or creates a new unit
    /// with the next sequential identifier. Returns the unit's identifier.
    pub fn register_child(&mut self, parents: ParentPair, child: IndividualId) -> FamilyId {
        if let Some(&pos) = self.index.get(&parents) {
            let unit = &mut self.units[pos];
            unit.children.push(child);
            return unit.id;
        }

        let id = FamilyId(self.units.len() as u64 + 1);
        tracing::trace!(family = id.0, "discovered family unit");
        self.index.insert(parents.clone(), self.units.len());
        self.units.push(FamilyUnit {
            id,
            parents,
            children: vec![child],
        });
        id
    }

    /// The unit registered for exactly this pair.
    pub fn family_for(&self, parents: &ParentPair) -> Result<&FamilyUnit, LineageError> {
        self.index
            .get(parents)
            .and_then(|&pos| self.units.get(pos))
            .ok_or_else(|| LineageError::UnknownFamily {
                father: parents.father().map(ToString::to_string),
                mother: parents.mother().map(ToString::to_string),
            })
    }

    /// Derive the spouse index.
    ///
    /// A person who is father in one unit and mother in another collects
    /// both, in unit discovery order.
    #[must_use]
    pub fn spouse_index(&self) -> SpouseIndex {
        let mut families: BTreeMap<SourceId, Vec<FamilyId>> = BTreeMap::new();
        for unit in &self.units {
            for parent in unit.parents.parents() {
                families.entry(parent.clone()).or_default().push(unit.id);
            }
        }
        SpouseIndex { families }
    }

    /// All units in discovery order.
    pub fn families(&self) -> impl Iterator<Item = &FamilyUnit> {
        self.units.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(father: &str, mother: &str) -> ParentPair {
        ParentPair::new(SourceId::new(father), SourceId::new(mother)).expect("pair")
    }

    fn id(s: &str) -> SourceId {
        SourceId::new(s).expect("id")
    }

    #[test]
    fn same_pair_shares_unit() {
        let mut registry = FamilyRegistry::new();
        let f1 = registry.register_child(pair("F", "M"), IndividualId(3));
        let f2 = registry.register_child(pair("F", "M"), IndividualId(4));

        assert_eq!(f1, f2);
        assert_eq!(registry.len(), 1);
        let unit = registry.family_for(&pair("F", "M")).expect("family");
        assert_eq!(unit.children(), &[IndividualId(3), IndividualId(4)]);
    }

    #[test]
    fn missing_mother_in_both_rows_shares_unit() {
        let mut registry = FamilyRegistry::new();
        registry.register_child(pair("F1", ""), IndividualId(2));
        registry.register_child(pair("F1", ""), IndividualId(3));

        assert_eq!(registry.len(), 1);
        assert!(registry.family_for(&pair("F1", "M1")).is_err());
    }

    #[test]
    fn ids_follow_discovery_order() {
        let mut registry = FamilyRegistry::new();
        assert_eq!(registry.register_child(pair("B", "Y"), IndividualId(5)), FamilyId(1));
        assert_eq!(registry.register_child(pair("A", "X"), IndividualId(6)), FamilyId(2));
        assert_eq!(registry.register_child(pair("B", "Y"), IndividualId(7)), FamilyId(1));

        let ids: Vec<_> = registry.families().map(|u| u.id().0).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn unknown_pair_is_an_error() {
        let registry = FamilyRegistry::new();
        assert!(matches!(
            registry.family_for(&pair("F", "M")),
            Err(LineageError::UnknownFamily { .. })
        ));
    }

    #[test]
    fn spouse_index_collects_both_roles_in_discovery_order() {
        let mut registry = FamilyRegistry::new();
        // P is father in the first union, mother in the third.
        registry.register_child(pair("P", "W1"), IndividualId(10));
        registry.register_child(pair("Q", "W2"), IndividualId(11));
        registry.register_child(pair("H", "P"), IndividualId(12));
        registry.register_child(pair("P", "W3"), IndividualId(13));

        let index = registry.spouse_index();
        assert_eq!(
            index.families_of(&id("P")),
            &[FamilyId(1), FamilyId(3), FamilyId(4)]
        );
        assert_eq!(index.families_of(&id("W2")), &[FamilyId(2)]);
        assert!(index.families_of(&id("nobody")).is_empty());
        assert_eq!(index.spouse_count(), 6);
    }

    #[test]
    fn single_parent_families_index_only_present_parent() {
        let mut registry = FamilyRegistry::new();
        registry.register_child(pair("", "M"), IndividualId(1));

        let index = registry.spouse_index();
        assert_eq!(index.families_of(&id("M")), &[FamilyId(1)]);
        assert_eq!(index.spouse_count(), 1);
    }
}
