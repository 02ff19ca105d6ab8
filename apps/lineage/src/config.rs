//! # Configuration
//!
//! Optional TOML file for values that rarely change between runs:
//!
//! ```toml
//! pictures = "photos"
//!
//! [submitter]
//! first_name = "Péter"
//! last_name = "Kiss"
//!
//! [columns]
//! id = "Azonosító"
//! sex = "nem"
//! ```
//!
//! Every key is optional. Command-line arguments win over the file.

use lineage_core::primitives::columns;
use lineage_core::{LineageError, Submitter};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Maximum configuration file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Contents of the configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Header names of the source table.
    pub columns: ColumnNames,
    /// Default submitter for the document header.
    pub submitter: Option<Submitter>,
    /// Default picture directory.
    pub pictures: Option<PathBuf>,
}

impl Config {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, LineageError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            LineageError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(LineageError::ConfigError(format!(
                "'{}' exceeds {} bytes",
                path.display(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            LineageError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::parse(&text)
    }

    /// Parse TOML text.
    pub fn parse(text: &str) -> Result<Self, LineageError> {
        toml::from_str(text).map_err(|e| LineageError::ConfigError(e.to_string()))
    }

    /// Pick the submitter: both command-line names, or the configured one.
    pub fn resolve_submitter(
        &self,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<Submitter, LineageError> {
        match (first_name, last_name) {
            (Some(first), Some(last)) => Ok(Submitter::new(first, last)),
            (None, None) => self.submitter.clone().ok_or_else(|| {
                LineageError::ConfigError(
                    "submitter first and last name are required (arguments or [submitter])"
                        .to_string(),
                )
            }),
            _ => Err(LineageError::ConfigError(
                "give both submitter names or neither".to_string(),
            )),
        }
    }

    /// Pick the picture directory: command line first, then the file.
    #[must_use]
    pub fn resolve_pictures(&self, cli: Option<PathBuf>) -> Option<PathBuf> {
        cli.or_else(|| self.pictures.clone())
    }
}

/// Header names of the source table. Unset names keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnNames {
    pub id: String,
    pub father_id: String,
    pub mother_id: String,
    pub last_name: String,
    pub title: String,
    pub first_name: String,
    pub middle_name: String,
    pub nickname: String,
    pub sex: String,
    pub email: String,
    pub webpage: String,
    pub birth_date: String,
    pub birth_place: String,
    pub death_date: String,
    pub death_place: String,
    pub living: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            id: columns::ID.to_string(),
            father_id: columns::FATHER_ID.to_string(),
            mother_id: columns::MOTHER_ID.to_string(),
            last_name: columns::LAST_NAME.to_string(),
            title: columns::TITLE.to_string(),
            first_name: columns::FIRST_NAME.to_string(),
            middle_name: columns::MIDDLE_NAME.to_string(),
            nickname: columns::NICKNAME.to_string(),
            sex: columns::SEX.to_string(),
            email: columns::EMAIL.to_string(),
            webpage: columns::WEBPAGE.to_string(),
            birth_date: columns::BIRTH_DATE.to_string(),
            birth_place: columns::BIRTH_PLACE.to_string(),
            death_date: columns::DEATH_DATE.to_string(),
            death_place: columns::DEATH_PLACE.to_string(),
            living: columns::LIVING.to_string(),
        }
    }
}
