//! # Date Formatter
//!
//! Converts source date cells to the interchange date text:
//! `08/04/1931` becomes `08 APR 1931`, `04/1931` becomes `APR 1931`,
//! and a bare year stays a bare year.

use crate::primitives::MONTH_ABBREVIATIONS;
use crate::row::SourceDate;
use crate::types::LineageError;

/// Format a source date.
///
/// Text dates are split on `/` into one to three components ordered
/// day/month/year. The month component must be a number in `1..=12`.
pub fn format_date(date: &SourceDate) -> Result<String, LineageError> {
    match date {
        SourceDate::Year(year) => Ok(year.to_string()),
        SourceDate::Text(text) => format_text(text),
    }
}

fn format_text(text: &str) -> Result<String, LineageError> {
    let malformed = |reason: &str| LineageError::MalformedDate {
        value: text.to_string(),
        reason: reason.to_string(),
    };

    let mut parts: Vec<String> = text.split('/').map(|p| p.trim().to_string()).collect();

    match parts.len() {
        1 => {
            let year: i64 = parts[0]
                .parse()
                .map_err(|_| malformed("year is not a number"))?;
            Ok(year.to_string())
        }
        2 | 3 => {
            let month_index = parts.len() - 2;
            let month = month_abbreviation(&parts[month_index]).ok_or_else(|| malformed("month must be 1-12"))?;
            parts[month_index] = month.to_string();
            Ok(parts.join(" ").trim().to_string())
        }
        n => Err(malformed(&format!("expected 1 to 3 components, found {}", n))),
    }
}

fn month_abbreviation(token: &str) -> Option<&'static str> {
    let month: usize = token.parse().ok()?;
    MONTH_ABBREVIATIONS.get(month.checked_sub(1)?).copied()
}
