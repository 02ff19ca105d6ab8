//! # Document Export
//!
//! Serializes a [`FamilyTree`] into a lineage-linked GEDCOM 5.5.1 document.
//!
//! The document is emitted in five strictly ordered phases:
//!
//! ```text
//! Header -> Individuals -> Families -> Media -> Trailer
//! ```
//!
//! Individuals point forward at families and media objects that are only
//! written later; the format resolves cross-references over the whole file.
//!
//! Output is rendered into memory first. A run that fails half-way never
//! hands out a partial document.

use crate::date::format_date;
use crate::ingestor::has_line_break;
use crate::media::PictureStore;
use crate::names::{given_with_middle, surname_with_prefix};
use crate::place::Place;
use crate::primitives::{
    CHARACTER_SET, GEDCOM_FORM, GEDCOM_VERSION, LANGUAGE, PICTURE_FORMAT, SOURCE_SYSTEM,
    SUBMITTER_XREF,
};
use crate::row::{PersonRow, SourceDate};
use crate::tree::FamilyTree;
use crate::types::{LineageError, MediaId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

// =============================================================================
// SUBMITTER
// =============================================================================

/// The person credited in the header's submitter record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submitter {
    pub first_name: String,
    pub last_name: String,
}

impl Submitter {
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

// =============================================================================
// PHASES
// =============================================================================

/// Emission phase of a document. Phases only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Header,
    Individuals,
    Families,
    Media,
    Trailer,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Header => "header",
            Phase::Individuals => "individuals",
            Phase::Families => "families",
            Phase::Media => "media",
            Phase::Trailer => "trailer",
            Phase::Done => "done",
        };
        f.write_str(name)
    }
}

// =============================================================================
// LINE WRITER
// =============================================================================

/// Renders `LEVEL TAG [VALUE]` lines into a buffer and tracks the phase.
#[derive(Debug)]
pub struct LineWriter {
    buf: String,
    phase: Phase,
}

impl Default for LineWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl LineWriter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: String::new(),
            phase: Phase::Header,
        }
    }

    /// Move to `next`. Staying in the current phase is allowed; going back is not.
    pub fn enter(&mut self, next: Phase) -> Result<(), LineageError> {
        if next < self.phase || self.phase == Phase::Done {
            return Err(LineageError::PhaseOrder {
                from: self.phase.to_string(),
                to: next.to_string(),
            });
        }
        self.phase = next;
        Ok(())
    }

    /// A line without a value, e.g. `1 BIRT`.
    pub fn tag(&mut self, level: u8, tag: &str) {
        self.buf.push_str(&format!("{} {}\n", level, tag));
    }

    /// A line with a value, e.g. `2 DATE 08 APR 1931`.
    pub fn value(&mut self, level: u8, tag: &str, value: impl fmt::Display) {
        self.buf.push_str(&format!("{} {} {}\n", level, tag, value));
    }

    /// A top-level record line, e.g. `0 @I1@ INDI`.
    pub fn record(&mut self, xref: impl fmt::Display, tag: &str) {
        self.buf.push_str(&format!("0 {} {}\n", xref, tag));
    }

    /// Close the document. Only valid once the trailer has been written.
    pub fn finish(mut self) -> Result<String, LineageError> {
        if self.phase != Phase::Trailer {
            return Err(LineageError::PhaseOrder {
                from: self.phase.to_string(),
                to: Phase::Done.to_string(),
            });
        }
        self.phase = Phase::Done;
        Ok(self.buf)
    }
}

// =============================================================================
// DOCUMENT SERIALIZER
// =============================================================================

/// Emits the document for one built tree.
///
/// Read-only over the tree; the only outside access is the picture lookup.
pub struct DocumentSerializer<'a, P: PictureStore + ?Sized> {
    tree: &'a FamilyTree,
    pictures: &'a P,
}

impl<'a, P: PictureStore + ?Sized> DocumentSerializer<'a, P> {
    #[must_use]
    pub fn new(tree: &'a FamilyTree, pictures: &'a P) -> Self {
        Self { tree, pictures }
    }

    /// Render the complete document.
    ///
    /// `generated_at` is written to the header; everything else depends
    /// only on the tree and the picture store.
    pub fn render(
        &self,
        submitter: &Submitter,
        generated_at: NaiveDateTime,
    ) -> Result<String, LineageError> {
        if has_line_break(&submitter.first_name) || has_line_break(&submitter.last_name) {
            return Err(LineageError::InvalidInput(
                "submitter name contains a line break".to_string(),
            ));
        }

        let mut out = LineWriter::new();

        out.enter(Phase::Header)?;
        self.write_header(&mut out, submitter, generated_at);

        out.enter(Phase::Individuals)?;
        let mut media: Vec<String> = Vec::new();
        for (idx, row) in self.tree.rows().iter().enumerate() {
            self.write_individual(&mut out, row, idx + 1, &mut media)?;
        }

        out.enter(Phase::Families)?;
        self.write_families(&mut out)?;

        out.enter(Phase::Media)?;
        for (idx, path) in media.iter().enumerate() {
            out.record(MediaId(idx as u64), "OBJE");
            out.value(1, "FILE", path);
            out.value(2, "FORM", PICTURE_FORMAT);
        }

        out.enter(Phase::Trailer)?;
        out.tag(0, "TRLR");

        tracing::debug!(
            individuals = self.tree.rows().len(),
            families = self.tree.registry().len(),
            media = media.len(),
            "document rendered"
        );
        out.finish()
    }

    /// Render, then write the whole document to `sink` in one go.
    pub fn write_to<W: Write + ?Sized>(
        &self,
        sink: &mut W,
        submitter: &Submitter,
        generated_at: NaiveDateTime,
    ) -> Result<(), LineageError> {
        let document = self.render(submitter, generated_at)?;
        sink.write_all(document.as_bytes())?;
        sink.flush()?;
        Ok(())
    }

    fn write_header(&self, out: &mut LineWriter, submitter: &Submitter, at: NaiveDateTime) {
        out.tag(0, "HEAD");
        out.value(1, "SOUR", SOURCE_SYSTEM);
        out.value(1, "DATE", at.format("%d %b %Y").to_string().to_uppercase());
        out.value(2, "TIME", at.format("%H:%M:%S"));
        out.value(1, "SUBM", SUBMITTER_XREF);
        out.tag(1, "GEDC");
        out.value(2, "VERS", GEDCOM_VERSION);
        out.value(2, "FORM", GEDCOM_FORM);
        out.value(1, "CHAR", CHARACTER_SET);
        out.value(1, "LANG", LANGUAGE);
        out.record(SUBMITTER_XREF, "SUBM");
        out.value(
            1,
            "NAME",
            format!("{} /{}/", submitter.first_name, submitter.last_name),
        );
    }

    fn write_individual(
        &self,
        out: &mut LineWriter,
        row: &PersonRow,
        row_number: usize,
        media: &mut Vec<String>,
    ) -> Result<(), LineageError> {
        let id = self.tree.identities().lookup(&row.id, row_number)?;
        out.record(id, "INDI");

        out.value(
            1,
            "NAME",
            format!("{} /{}/", given_with_middle(row), surname_with_prefix(row)),
        );
        out.value(2, "GIVN", &row.first_name);
        out.value(2, "SURN", &row.last_name);
        if let Some(nick) = &row.nickname {
            out.value(2, "NICK", nick);
        }
        out.value(1, "SEX", row.sex().marker());
        if let Some(email) = &row.email {
            out.value(1, "EMAIL", email);
        }
        if let Some(www) = &row.webpage {
            out.value(1, "WWW", www);
        }

        if let Some(date) = &row.birth_date {
            write_event(out, "BIRT", date, row.birth_place.as_deref())?;
        }
        if let Some(date) = &row.death_date {
            write_event(out, "DEAT", date, row.death_place.as_deref())?;
        } else if row.is_dead_without_date() {
            out.value(1, "DEAT", "Y");
        }

        if let Some(family) = self.tree.child_family(row)? {
            out.value(1, "FAMC", family.id());
        }
        for family in self.tree.spouse_families(row) {
            out.value(1, "FAMS", family);
        }

        if let Some(path) = self.pictures.locate(&row.id) {
            let file = path
                .to_str()
                .filter(|p| !has_line_break(p))
                .ok_or_else(|| {
                    LineageError::InvalidInput(format!(
                        "picture path {:?} is not a single line of UTF-8",
                        path
                    ))
                })?;
            out.value(1, "OBJE", MediaId(media.len() as u64));
            media.push(file.to_string());
        }
        Ok(())
    }

    fn write_families(&self, out: &mut LineWriter) -> Result<(), LineageError> {
        let identities = self.tree.identities();
        for unit in self.tree.registry().families() {
            out.record(unit.id(), "FAM");
            // Individual ids equal row numbers; the first child is where the pair came from.
            let row = unit.children().first().map_or(0, |c| c.0 as usize);
            let parents = unit.parents();
            if let Some(father) = parents.father() {
                out.value(1, "HUSB", identities.lookup(father, row)?);
            }
            if let Some(mother) = parents.mother() {
                out.value(1, "WIFE", identities.lookup(mother, row)?);
            }
            for child in unit.children() {
                out.value(1, "CHIL", child);
            }
        }
        Ok(())
    }
}

/// A dated event block with its optional place.
fn write_event(
    out: &mut LineWriter,
    tag: &str,
    date: &SourceDate,
    place: Option<&str>,
) -> Result<(), LineageError> {
    out.tag(1, tag);
    out.value(2, "DATE", format_date(date)?);
    if let Some(raw) = place {
        let place = Place::parse(raw)?;
        out.value(2, "PLAC", &place.city);
        out.tag(2, "ADDR");
        out.value(3, "CITY", &place.city);
        out.value(3, "CTRY", &place.country);
    }
    Ok(())
}

/// Build-and-render convenience for a single run.
pub fn render_document<P: PictureStore + ?Sized>(
    tree: &FamilyTree,
    pictures: &P,
    submitter: &Submitter,
    generated_at: NaiveDateTime,
) -> Result<String, LineageError> {
    DocumentSerializer::new(tree, pictures).render(submitter, generated_at)
}

// =============================================================================
// TESTS
// =============================================================================
