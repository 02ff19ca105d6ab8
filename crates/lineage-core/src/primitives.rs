//! # Fixed Primitives
//!
//! Constants of the emitted document and of the tabular source.
//! These are compiled into the binary and never change at runtime.

// =============================================================================
// DOCUMENT HEADER
// =============================================================================

/// Value of the `SOUR` line in the header.
pub const SOURCE_SYSTEM: &str = "XLSTOGEDCOM";

/// Interchange format version written to `GEDC.VERS`.
pub const GEDCOM_VERSION: &str = "5.5.1";

/// Interchange form written to `GEDC.FORM`.
pub const GEDCOM_FORM: &str = "LINEAGE-LINKED";

/// Character set written to `CHAR`.
pub const CHARACTER_SET: &str = "UTF-8";

/// Language written to `LANG`.
pub const LANGUAGE: &str = "English";

/// Cross-reference of the single submitter record.
pub const SUBMITTER_XREF: &str = "@SUBM@";

// =============================================================================
// MEDIA
// =============================================================================

/// File extension of picture files, also the `FORM` of media records.
pub const PICTURE_FORMAT: &str = "jpg";

/// Characters folded before a source identifier becomes a picture file name.
///
/// Each `(from, to)` pair is applied after lower-casing.
pub const TRANSLITERATION: [(char, char); 9] = [
    ('é', 'e'),
    ('á', 'a'),
    ('ű', 'u'),
    ('ú', 'u'),
    ('ü', 'u'),
    ('ő', 'o'),
    ('ö', 'o'),
    ('ó', 'o'),
    ('í', 'i'),
];

// =============================================================================
// DATES
// =============================================================================

/// Upper-case three-letter month names, January first.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

// =============================================================================
// SOURCE COLUMNS
// =============================================================================

/// Default column headers of the tabular source.
pub mod columns {
    pub const ID: &str = "ID";
    pub const FATHER_ID: &str = "father's ID";
    pub const MOTHER_ID: &str = "mother's ID";
    pub const LAST_NAME: &str = "last name";
    pub const TITLE: &str = "title";
    pub const FIRST_NAME: &str = "first name";
    pub const MIDDLE_NAME: &str = "midname";
    pub const NICKNAME: &str = "nickname";
    pub const SEX: &str = "gender";
    pub const EMAIL: &str = "email";
    pub const WEBPAGE: &str = "webpage";
    pub const BIRTH_DATE: &str = "date of birth";
    pub const BIRTH_PLACE: &str = "place of birth";
    pub const DEATH_DATE: &str = "date of death";
    pub const DEATH_PLACE: &str = "place of death";
    pub const LIVING: &str = "is living?";
}
