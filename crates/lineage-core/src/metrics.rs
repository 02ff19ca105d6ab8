//! # Tree Metrics
//!
//! Summary counts of a built tree, for status reporting.
//! Informational only: nothing in the conversion depends on them.

use crate::media::PictureStore;
use crate::tree::FamilyTree;
use serde::{Deserialize, Serialize};

/// Counts describing a [`FamilyTree`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeMetrics {
    /// Individual records (one per row).
    pub individuals: usize,
    /// Family records (distinct parent pairs).
    pub families: usize,
    /// Individuals with a family-as-child link.
    pub linked_children: usize,
    /// Individuals with neither parent known.
    pub without_parents: usize,
    /// Individuals that are a parent in at least one family.
    pub spouses: usize,
    /// Children in the largest family.
    pub largest_family: usize,
    /// Individuals whose picture was found.
    pub with_picture: usize,
}

impl TreeMetrics {
    /// Compute metrics for a tree, probing `pictures` once per individual.
    #[must_use]
    pub fn from_tree<P: PictureStore + ?Sized>(tree: &FamilyTree, pictures: &P) -> Self {
        let registry = tree.registry();
        let linked_children: usize = registry.families().map(|u| u.children().len()).sum();

        Self {
            individuals: tree.rows().len(),
            families: registry.len(),
            linked_children,
            without_parents: tree.rows().len().saturating_sub(linked_children),
            spouses: tree.spouses().spouse_count(),
            largest_family: registry
                .families()
                .map(|u| u.children().len())
                .max()
                .unwrap_or(0),
            with_picture: tree
                .rows()
                .iter()
                .filter(|row| pictures.locate(&row.id).is_some())
                .count(),
        }
    }
}
