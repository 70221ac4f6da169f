//! Error types for the pdf-to-md library.
//!
//! Every failure is fatal: a conversion either produces a complete Markdown
//! file or nothing at all. There is no per-page recovery mode, so a single
//! enum covers input validation, the PDF collaborator, and output I/O.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdf-to-md library.
#[derive(Debug, Error)]
pub enum PdfToMdError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// The PDF collaborator could not open the document or read a page.
    ///
    /// `page` is 1-indexed; `None` means the document as a whole failed.
    #[error("{}", extraction_message(*page, detail))]
    ExtractionFailed { page: Option<usize>, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    // ── Output errors ─────────────────────────────────────────────────────
    /// The directory that should hold the output file could not be created.
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write the output Markdown file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Place libpdfium next to the executable, install it system-wide,\n\
or set PDFIUM_LIB_PATH=/path/to/libpdfium.\n\
Pre-built libraries: https://github.com/bblanchon/pdfium-binaries/releases\n"
    )]
    PdfiumBindingFailed(String),
}

fn extraction_message(page: Option<usize>, detail: &str) -> String {
    match page {
        Some(page) => format!("Extraction failed for page {page}: {detail}"),
        None => format!("Failed to open PDF document: {detail}"),
    }
}
