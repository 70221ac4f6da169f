//! Atomic Markdown output.
//!
//! The document is written to a temp file in the destination directory and
//! renamed over the target only once every byte is on disk. A failed run
//! leaves no file behind: the temp file is deleted when it is dropped.

use crate::error::PdfToMdError;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Create the directory that will hold `path`, including missing ancestors.
pub fn ensure_parent_dir(path: &Path) -> Result<(), PdfToMdError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|source| PdfToMdError::OutputDirectoryCreationFailed {
                path: parent.to_path_buf(),
                source,
            }),
        _ => Ok(()),
    }
}

/// Write `markdown` to `path` atomically.
pub fn write_atomic(path: &Path, markdown: &str) -> Result<(), PdfToMdError> {
    let write_failed = |source: std::io::Error| PdfToMdError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_failed)?;
    tmp.write_all(markdown.as_bytes()).map_err(write_failed)?;
    tmp.as_file().sync_all().map_err(write_failed)?;
    tmp.persist(path).map_err(|e| write_failed(e.error))?;

    debug!("Wrote {} bytes to {}", markdown.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_ancestors() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a/b/c/out.md");
        ensure_parent_dir(&target).unwrap();
        assert!(dir.path().join("a/b/c").is_dir());
    }

    #[test]
    fn bare_file_name_needs_no_directory() {
        ensure_parent_dir(Path::new("out.md")).unwrap();
    }

    #[test]
    fn directory_creation_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let err = ensure_parent_dir(&blocker.join("sub/out.md")).unwrap_err();
        assert!(matches!(
            err,
            PdfToMdError::OutputDirectoryCreationFailed { .. }
        ));
    }

    #[test]
    fn write_replaces_existing_file_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.md");
        std::fs::write(&target, "old").unwrap();

        write_atomic(&target, "# Page 1\n\n---\n\n").unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "# Page 1\n\n---\n\n");
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_atomic(&dir.path().join("missing/out.md"), "x").unwrap_err();
        assert!(matches!(err, PdfToMdError::OutputWriteFailed { .. }));
    }
}
