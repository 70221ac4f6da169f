//! Input validation and output-path resolution.
//!
//! The input must be an existing, readable file that starts with the `%PDF`
//! magic bytes. Checking this up front gives callers a precise error instead
//! of an opaque pdfium failure, and guarantees nothing is written for a
//! missing input.

use crate::error::PdfToMdError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Validate that `path` names a readable PDF file.
pub fn resolve_input(path: &Path) -> Result<PathBuf, PdfToMdError> {
    let path = path.to_path_buf();

    if !path.is_file() {
        return Err(PdfToMdError::InputNotFound { path });
    }

    match std::fs::File::open(&path) {
        Ok(mut f) => {
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_err() || &magic != b"%PDF" {
                return Err(PdfToMdError::NotAPdf { path, magic });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(PdfToMdError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(PdfToMdError::InputNotFound { path });
        }
    }

    debug!("Resolved local PDF: {}", path.display());
    Ok(path)
}

/// Work out which file the Markdown goes to.
///
/// When `output` is an existing directory the file is named after the input:
/// `report.pdf` into `out/` becomes `out/report.md`. Any other `output` is
/// used as given.
pub fn resolve_output_path(input: &Path, output: &Path) -> PathBuf {
    if !output.is_dir() {
        return output.to_path_buf();
    }

    let name = input
        .file_name()
        .map(|n| Path::new(n).with_extension("md"))
        .unwrap_or_else(|| PathBuf::from("output.md"));
    output.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_input(&dir.path().join("nope.pdf")).unwrap_err();
        assert!(matches!(err, PdfToMdError::InputNotFound { .. }));
    }

    #[test]
    fn directory_input_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_input(dir.path()).unwrap_err();
        assert!(matches!(err, PdfToMdError::InputNotFound { .. }));
    }

    #[test]
    fn non_pdf_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.pdf");
        std::fs::write(&path, b"hello world").unwrap();
        match resolve_input(&path).unwrap_err() {
            PdfToMdError::NotAPdf { magic, .. } => assert_eq!(&magic, b"hell"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn pdf_magic_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, b"%PDF-1.7\n").unwrap();
        assert_eq!(resolve_input(&path).unwrap(), path);
    }

    #[test]
    fn output_file_path_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/result.md");
        assert_eq!(resolve_output_path(Path::new("report.pdf"), &out), out);
    }

    #[test]
    fn output_directory_gets_input_stem() {
        let dir = tempfile::tempdir().unwrap();
        let out = resolve_output_path(Path::new("/data/in/report.pdf"), dir.path());
        assert_eq!(out, dir.path().join("report.md"));
    }

    #[test]
    fn only_the_last_extension_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let out = resolve_output_path(Path::new("q3.final.PDF"), dir.path());
        assert_eq!(out, dir.path().join("q3.final.md"));
    }
}
