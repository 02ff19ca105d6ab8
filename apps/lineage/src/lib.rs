//! # lineage
//!
//! Command-line front end for `lineage-core`: reads tabular family records,
//! builds the family tree and writes a GEDCOM document.

pub mod cli;
pub mod config;
pub mod input;
