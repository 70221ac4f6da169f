//! The PDF collaborator: per-page text and table extraction.
//!
//! The converter only ever sees the narrow [`PdfBackend`] / [`PageSource`]
//! pair, so tests can feed it fake documents. [`PdfiumBackend`] is the real
//! implementation on top of `pdfium-render`.
//!
//! pdfium is a C++ library loaded at runtime. [`bind_pdfium`] looks for it in
//! this order:
//!
//! 1. `PDFIUM_LIB_PATH`, when set
//! 2. a `libpdfium` next to the current working directory
//! 3. the system library search path

use crate::config::TableDetectorConfig;
use crate::error::PdfToMdError;
use crate::pipeline::tables::{self, TextCell};
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A grid of table cells; the first row is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Build a table from rows of plain strings (every cell present).
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(|c| Some(c.into())).collect())
                .collect(),
        }
    }
}

/// Everything the converter needs from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    /// Plain text of the page in reading order; `None` when the page has none.
    pub text: Option<String>,
    /// Tables found on the page, top to bottom.
    pub tables: Vec<Table>,
}

/// An opened document that can be read page by page.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Extract text and tables for the page at 0-based `index`.
    fn extract_page(&self, index: usize) -> Result<PageContent, PdfToMdError>;
}

/// Opens documents. Implementations decide which PDF engine does the work.
///
/// The returned document may borrow both the backend and the password.
pub trait PdfBackend {
    fn open<'a>(
        &'a self,
        path: &Path,
        password: Option<&'a str>,
    ) -> Result<Box<dyn PageSource + 'a>, PdfToMdError>;
}

/// Bind to a pdfium shared library.
pub fn bind_pdfium() -> Result<Pdfium, PdfToMdError> {
    let bindings = match std::env::var("PDFIUM_LIB_PATH") {
        Ok(path) if !path.is_empty() => {
            debug!("Binding pdfium from PDFIUM_LIB_PATH={}", path);
            Pdfium::bind_to_library(&path)
        }
        _ => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library()),
    }
    .map_err(|e| PdfToMdError::PdfiumBindingFailed(e.to_string()))?;

    Ok(Pdfium::new(bindings))
}

/// [`PdfBackend`] backed by pdfium.
pub struct PdfiumBackend {
    pdfium: Pdfium,
    tables: TableDetectorConfig,
}

impl PdfiumBackend {
    /// Bind pdfium (see [`bind_pdfium`]) and use `tables` for table detection.
    pub fn new(tables: TableDetectorConfig) -> Result<Self, PdfToMdError> {
        Ok(Self::with_pdfium(bind_pdfium()?, tables))
    }

    /// Use an already bound pdfium instance.
    pub fn with_pdfium(pdfium: Pdfium, tables: TableDetectorConfig) -> Self {
        Self { pdfium, tables }
    }
}

impl PdfBackend for PdfiumBackend {
    fn open<'a>(
        &'a self,
        path: &Path,
        password: Option<&'a str>,
    ) -> Result<Box<dyn PageSource + 'a>, PdfToMdError> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, password)
            .map_err(|e| map_load_error(path, password, e))?;

        info!("PDF loaded: {} pages", document.pages().len());

        Ok(Box::new(PdfiumDocument {
            document,
            path: path.to_path_buf(),
            tables: &self.tables,
        }))
    }
}

fn map_load_error(path: &Path, password: Option<&str>, e: PdfiumError) -> PdfToMdError {
    let err_str = format!("{:?}", e);
    if err_str.contains("Password") || err_str.contains("password") {
        if password.is_some() {
            PdfToMdError::WrongPassword {
                path: path.to_path_buf(),
            }
        } else {
            PdfToMdError::PasswordRequired {
                path: path.to_path_buf(),
            }
        }
    } else {
        PdfToMdError::ExtractionFailed {
            page: None,
            detail: format!("{}: {}", path.display(), err_str),
        }
    }
}

struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
    path: PathBuf,
    tables: &'a TableDetectorConfig,
}

impl PageSource for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn extract_page(&self, index: usize) -> Result<PageContent, PdfToMdError> {
        let failed = |detail: String| PdfToMdError::ExtractionFailed {
            page: Some(index + 1),
            detail,
        };

        let page = self
            .document
            .pages()
            .get(index as u16)
            .map_err(|e| failed(format!("{:?}", e)))?;
        let text = page.text().map_err(|e| failed(format!("{:?}", e)))?;

        let all = text.all();
        let tables = if self.tables.enabled {
            let page_height = page.height().value;
            let cells: Vec<TextCell> = text
                .segments()
                .iter()
                .map(|segment| {
                    let bounds = segment.bounds();
                    // pdfium's origin is bottom-left; the detector wants top-left.
                    TextCell {
                        text: segment.text(),
                        x: bounds.left().value,
                        y: page_height - bounds.top().value,
                        width: bounds.right().value - bounds.left().value,
                        height: bounds.top().value - bounds.bottom().value,
                    }
                })
                .collect();
            tables::detect_tables(&cells, self.tables)
        } else {
            Vec::new()
        };

        debug!(
            "{} page {}: {} chars, {} tables",
            self.path.display(),
            index + 1,
            all.len(),
            tables.len()
        );

        Ok(PageContent {
            text: (!all.trim().is_empty()).then_some(all),
            tables,
        })
    }
}
