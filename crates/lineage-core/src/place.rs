//! # Places
//!
//! Place cells are written as `[COUNTRY] [CITY]`. The first token is the
//! country; everything after it is the city, so `[US] [New York]` works.

use crate::types::LineageError;

/// A place split into its structured parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    pub city: String,
    pub country: String,
}

impl Place {
    /// Parse a `[COUNTRY] [CITY]` cell.
    pub fn parse(raw: &str) -> Result<Self, LineageError> {
        let malformed = || LineageError::MalformedPlace(raw.to_string());

        let trimmed = raw.trim();
        let (country, city) = trimmed.split_once(char::is_whitespace).ok_or_else(malformed)?;

        Ok(Self {
            country: unwrap_brackets(country).ok_or_else(malformed)?,
            city: unwrap_brackets(city.trim()).ok_or_else(malformed)?,
        })
    }
}

fn unwrap_brackets(token: &str) -> Option<String> {
    let inner = token.strip_prefix('[')?.strip_suffix(']')?.trim();
    if inner.is_empty() || inner.contains(['[', ']']) {
        return None;
    }
    Some(inner.to_string())
}
