//! # CLI Command Implementations

use crate::config::Config;
use crate::input::rows_from_json;
use lineage_core::{
    DocumentSerializer, FamilyTree, Ingestor, LineageError, NoPictures, PictureDirectory,
    PictureStore, Submitter, TreeMetrics,
};
use std::io::Write;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum file size for input records (100 MB).
///
/// This prevents memory exhaustion from malicious or accidental large files.
const MAX_INPUT_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), LineageError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| LineageError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(LineageError::InvalidInput(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate an input path: it must exist and be a regular file.
///
/// Canonicalizing resolves ".." and symlinks before the size check.
fn validate_file_path(path: &Path) -> Result<PathBuf, LineageError> {
    let canonical = path.canonicalize().map_err(|e| {
        LineageError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(LineageError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate an output path: its parent directory must exist.
fn validate_output_path(path: &Path) -> Result<PathBuf, LineageError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        LineageError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(LineageError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| LineageError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// SHARED LOADING
// =============================================================================

/// Read the input records and run the build pass.
pub fn load_tree(config: &Config, input: &Path) -> Result<FamilyTree, LineageError> {
    let validated_path = validate_file_path(input)?;
    validate_file_size(&validated_path, MAX_INPUT_FILE_SIZE)?;

    tracing::info!("Reading records from {:?}", validated_path);
    let contents = std::fs::read(&validated_path)
        .map_err(|e| LineageError::IoError(format!("Read file: {}", e)))?;

    let rows = rows_from_json(&contents, &config.columns)?;
    tracing::debug!(rows = rows.len(), "records parsed");

    Ingestor::build(rows)
}

/// The picture store for an optional directory.
fn picture_store(dir: Option<&Path>) -> Box<dyn PictureStore> {
    match dir {
        Some(dir) => {
            if !dir.is_dir() {
                tracing::warn!("Picture directory {:?} not found; no media will be linked", dir);
            }
            Box::new(PictureDirectory::new(dir))
        }
        None => Box::new(NoPictures),
    }
}

// =============================================================================
// CONVERT COMMAND
// =============================================================================

/// Write the GEDCOM document for `input` to stdout or `output`.
///
/// Nothing is written unless the whole document rendered.
pub fn cmd_convert(
    config: &Config,
    input: &Path,
    pictures: Option<&Path>,
    submitter: &Submitter,
    output: Option<&Path>,
) -> Result<(), LineageError> {
    let tree = load_tree(config, input)?;
    let store = picture_store(pictures);

    let generated_at = chrono::Local::now().naive_local();
    let serializer = DocumentSerializer::new(&tree, store.as_ref());

    match output {
        Some(path) => {
            let target = validate_output_path(path)?;
            let document = serializer.render(submitter, generated_at)?;
            std::fs::write(&target, document)
                .map_err(|e| LineageError::IoError(format!("Write {:?}: {}", target, e)))?;
            tracing::info!("Document written to {:?}", target);
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            serializer.write_to(&mut lock, submitter, generated_at)?;
            lock.flush()?;
        }
    }

    Ok(())
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show counts of the tree built from `input`.
pub fn cmd_status(
    config: &Config,
    input: &Path,
    pictures: Option<&Path>,
    json_mode: bool,
) -> Result<(), LineageError> {
    let report = status_report(config, input, pictures, json_mode)?;
    println!("{}", report);
    Ok(())
}

/// The status text printed by [`cmd_status`].
pub fn status_report(
    config: &Config,
    input: &Path,
    pictures: Option<&Path>,
    json_mode: bool,
) -> Result<String, LineageError> {
    let tree = load_tree(config, input)?;
    let store = picture_store(pictures);
    let metrics = TreeMetrics::from_tree(&tree, store.as_ref());

    if json_mode {
        let output = serde_json::json!({
            "input": input.to_string_lossy(),
            "pictures": pictures.map(|p| p.to_string_lossy().into_owned()),
            "metrics": metrics,
        });
        return serde_json::to_string_pretty(&output)
            .map_err(|e| LineageError::InvalidInput(format!("Status serialization: {}", e)));
    }

    let mut report = String::new();
    report.push_str("Lineage Tree Status\n");
    report.push_str("===================\n");
    report.push_str(&format!("Input:    {:?}\n", input));
    if let Some(dir) = pictures {
        report.push_str(&format!("Pictures: {:?}\n", dir));
    }
    report.push('\n');
    report.push_str(&format!("Individuals:        {}\n", metrics.individuals));
    report.push_str(&format!("Families:           {}\n", metrics.families));
    report.push_str(&format!("Linked children:    {}\n", metrics.linked_children));
    report.push_str(&format!("Without parents:    {}\n", metrics.without_parents));
    report.push_str(&format!("Spouses:            {}\n", metrics.spouses));
    report.push_str(&format!("Largest family:     {}\n", metrics.largest_family));
    report.push_str(&format!("With picture:       {}", metrics.with_picture));

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_without_parent_uses_cwd() {
        let path = validate_output_path(Path::new("family.ged")).expect("valid");
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("family.ged"));
    }

    #[test]
    fn output_path_in_missing_directory_rejected() {
        assert!(validate_output_path(Path::new("/no/such/dir/family.ged")).is_err());
    }

    #[test]
    fn input_must_be_a_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(validate_file_path(dir.path()).is_err());
        assert!(validate_file_path(&dir.path().join("missing.json")).is_err());
    }
}
