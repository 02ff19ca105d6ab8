//! # Name Formatter

use crate::row::PersonRow;

/// Surname with the title/prefix in front, e.g. `dr. Nagy`.
#[must_use]
pub fn surname_with_prefix(row: &PersonRow) -> String {
    match &row.title {
        Some(title) => format!("{} {}", title, row.last_name),
        None => row.last_name.clone(),
    }
}

/// Given name with the middle name in front, e.g. `Mária Anna`.
#[must_use]
pub fn given_with_middle(row: &PersonRow) -> String {
    match &row.middle_name {
        Some(middle) => format!("{} {}", middle, row.first_name),
        None => row.first_name.clone(),
    }
}
