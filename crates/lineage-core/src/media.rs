//! # Picture Lookup
//!
//! Pictures are found by name: the source identifier, lower-cased and
//! folded through [`TRANSLITERATION`], with a `.jpg` extension.
//!
//! The filesystem is reached only through [`PictureStore`], so the
//! serializer can be driven by an in-memory store in tests.

use crate::primitives::{PICTURE_FORMAT, TRANSLITERATION};
use crate::types::SourceId;
use std::path::PathBuf;

// =============================================================================
// PICTURE STORE TRAIT
// =============================================================================

/// Resolves the picture of an individual, if one exists.
///
/// A missing picture is the normal case, not an error. Implementations
/// must answer the same way for the same identifier within one run.
pub trait PictureStore {
    /// The path to emit in the media record, or `None` when there is no picture.
    fn locate(&self, id: &SourceId) -> Option<PathBuf>;
}

/// File name of the picture for `id`, e.g. `Kovács_Ödön` -> `kovacs_odon.jpg`.
#[must_use]
pub fn picture_file_name(id: &SourceId) -> String {
    let stem: String = id
        .as_str()
        .to_lowercase()
        .chars()
        .map(|c| {
            TRANSLITERATION
                .iter()
                .find(|(from, _)| *from == c)
                .map(|(_, to)| *to)
                .unwrap_or(c)
        })
        .collect();
    format!("{}.{}", stem, PICTURE_FORMAT)
}

// =============================================================================
// FILESYSTEM STORE
// =============================================================================

/// Pictures stored flat in one directory.
#[derive(Debug, Clone)]
pub struct PictureDirectory {
    root: PathBuf,
}

impl PictureDirectory {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PictureStore for PictureDirectory {
    fn locate(&self, id: &SourceId) -> Option<PathBuf> {
        let path = self.root.join(picture_file_name(id));
        // Unreadable or missing directories simply yield no picture.
        if !path.is_file() {
            return None;
        }
        // The media record holds the path as text.
        if path.to_str().is_none() {
            tracing::warn!("Skipping picture with non-UTF-8 path {:?}", path);
            return None;
        }
        Some(path)
    }
}

/// A store with no pictures at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPictures;

impl PictureStore for NoPictures {
    fn locate(&self, _id: &SourceId) -> Option<PathBuf> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> SourceId {
        SourceId::new(s).expect("id")
    }

    #[test]
    fn file_name_is_lowercased_and_folded() {
        assert_eq!(picture_file_name(&id("Kovács_Ödön")), "kovacs_odon.jpg");
        assert_eq!(picture_file_name(&id("SzŰcs")), "szucs.jpg");
        assert_eq!(picture_file_name(&id("plain1")), "plain1.jpg");
    }

    #[test]
    fn directory_finds_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("nagy_eva.jpg"), b"jpg").expect("write");

        let store = PictureDirectory::new(dir.path());
        assert_eq!(
            store.locate(&id("Nagy_Éva")),
            Some(dir.path().join("nagy_eva.jpg"))
        );
        assert_eq!(store.locate(&id("Nagy_Anna")), None);
    }

    #[test]
    fn directory_ignores_subdirectories() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(dir.path().join("x.jpg")).expect("mkdir");

        let store = PictureDirectory::new(dir.path());
        assert_eq!(store.locate(&id("x")), None);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_directory_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let odd = dir.path().join(OsStr::from_bytes(b"pics\xff"));
        std::fs::create_dir(&odd).expect("mkdir");
        std::fs::write(odd.join("a.jpg"), b"jpg").expect("write");

        assert_eq!(PictureDirectory::new(&odd).locate(&id("a")), None);
    }

    #[test]
    fn missing_directory_yields_nothing() {
        let store = PictureDirectory::new("/definitely/not/here");
        assert_eq!(store.locate(&id("a")), None);
        assert_eq!(NoPictures.locate(&id("a")), None);
    }
}
