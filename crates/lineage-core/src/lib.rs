//! # lineage-core
//!
//! Turns a table of people (one row per person, parents referenced by
//! identifier) into a lineage-linked GEDCOM 5.5.1 document.
//!
//! ## Pipeline
//!
//! ```text
//! rows ──► Ingestor::build ──► FamilyTree ──► DocumentSerializer ──► text
//!          (identity map,      (read-only)     (header, individuals,
//!           family registry,                    families, media, trailer)
//!           spouse index)
//! ```
//!
//! ## Architectural Constraints
//!
//! - No async, no network dependencies (pure Rust)
//! - One build pass, then read-only emission
//! - Identical input and picture directory give identical output,
//!   apart from the header timestamp
//! - A run yields a complete document or an error, never a partial document

// =============================================================================
// MODULES
// =============================================================================

pub mod date;
pub mod export;
pub mod identity;
pub mod ingestor;
pub mod media;
pub mod metrics;
pub mod names;
pub mod place;
pub mod primitives;
pub mod registry;
pub mod row;
pub mod tree;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use row::{PersonRow, Sex, SourceDate};
pub use types::{FamilyId, IndividualId, LineageError, MediaId, ParentPair, SourceId};

// =============================================================================
// RE-EXPORTS: Build & Emit
// =============================================================================

pub use date::format_date;
pub use export::{DocumentSerializer, LineWriter, Phase, Submitter, render_document};
pub use identity::IdentityMap;
pub use ingestor::Ingestor;
pub use media::{NoPictures, PictureDirectory, PictureStore, picture_file_name};
pub use metrics::TreeMetrics;
pub use names::{given_with_middle, surname_with_prefix};
pub use place::Place;
pub use registry::{FamilyRegistry, FamilyUnit, SpouseIndex};
pub use tree::FamilyTree;
