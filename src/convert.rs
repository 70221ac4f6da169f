//! Conversion entry points.
//!
//! A conversion is one linear pass: validate the input, open the document,
//! render every page in order, then hand the assembled Markdown back
//! ([`convert`]) or persist it atomically ([`convert_to_file`]).
//!
//! The `*_with_backend` variants take any [`PdfBackend`]; the plain variants
//! bind pdfium and use [`PdfiumBackend`].

use crate::config::ConversionConfig;
use crate::error::PdfToMdError;
use crate::output::{ConversionOutput, ConversionStats, PageResult};
use crate::pipeline::extract::{PageSource, PdfBackend, PdfiumBackend};
use crate::pipeline::{input, markdown, output};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert a PDF file to Markdown in memory.
///
/// # Errors
/// - [`PdfToMdError::InputNotFound`] / [`PdfToMdError::NotAPdf`] for bad input
/// - [`PdfToMdError::PdfiumBindingFailed`] when no pdfium library can be loaded
/// - [`PdfToMdError::ExtractionFailed`] when the document or any page can't be read
pub fn convert(
    input_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, PdfToMdError> {
    let input_path = input::resolve_input(input_path.as_ref())?;
    let backend = PdfiumBackend::new(config.table_detection.clone())?;
    convert_resolved(&backend, &input_path, config)
}

/// Same as [`convert`], with a caller-supplied PDF backend.
pub fn convert_with_backend(
    backend: &dyn PdfBackend,
    input_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, PdfToMdError> {
    let input_path = input::resolve_input(input_path.as_ref())?;
    convert_resolved(backend, &input_path, config)
}

/// Convert a PDF file and write the Markdown to `output_path`.
///
/// If `output_path` is an existing directory, the file is written inside it
/// as `<input stem>.md`. Missing parent directories are created. The write is
/// atomic (temp file + rename): on any error no output file is left behind.
pub fn convert_to_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, PdfToMdError> {
    let input_path = input::resolve_input(input_path.as_ref())?;
    let backend = PdfiumBackend::new(config.table_detection.clone())?;
    write_resolved(&backend, &input_path, output_path.as_ref(), config)
}

/// Same as [`convert_to_file`], with a caller-supplied PDF backend.
pub fn convert_to_file_with_backend(
    backend: &dyn PdfBackend,
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, PdfToMdError> {
    let input_path = input::resolve_input(input_path.as_ref())?;
    write_resolved(backend, &input_path, output_path.as_ref(), config)
}

// ── Internal helpers ─────────────────────────────────────────────────────

fn convert_resolved(
    backend: &dyn PdfBackend,
    input_path: &Path,
    config: &ConversionConfig,
) -> Result<ConversionOutput, PdfToMdError> {
    let start = Instant::now();
    info!("Starting conversion: {}", input_path.display());

    let document = backend.open(input_path, config.password.as_deref())?;
    let output = render_document(document.as_ref(), config, start)?;

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(output.stats.total_pages, None);
    }
    Ok(output)
}

fn write_resolved(
    backend: &dyn PdfBackend,
    input_path: &Path,
    output_path: &Path,
    config: &ConversionConfig,
) -> Result<ConversionStats, PdfToMdError> {
    let start = Instant::now();
    let target = input::resolve_output_path(input_path, output_path);
    info!(
        "Starting conversion: {} → {}",
        input_path.display(),
        target.display()
    );

    output::ensure_parent_dir(&target)?;

    let document = backend.open(input_path, config.password.as_deref())?;
    let mut converted = render_document(document.as_ref(), config, start)?;
    drop(document);

    output::write_atomic(&target, &converted.markdown)?;
    converted.stats.total_duration_ms = start.elapsed().as_millis() as u64;

    info!(
        "Conversion complete: {} pages, {} tables, {}ms → {}",
        converted.stats.total_pages,
        converted.stats.total_tables,
        converted.stats.total_duration_ms,
        target.display()
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(converted.stats.total_pages, Some(&target));
    }
    Ok(converted.stats)
}

/// Render every page of `document`, in order, into one Markdown string.
///
/// Stops at the first page that fails to extract.
fn render_document(
    document: &dyn PageSource,
    config: &ConversionConfig,
    start: Instant,
) -> Result<ConversionOutput, PdfToMdError> {
    let total_pages = document.page_count();
    info!("PDF has {} pages", total_pages);
    if total_pages == 0 {
        warn!("Document has no pages; output will be empty");
    }

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(total_pages);
    }

    let mut markdown = String::new();
    let mut pages = Vec::with_capacity(total_pages);

    for index in 0..total_pages {
        let page_num = index + 1;
        if let Some(ref cb) = config.progress_callback {
            cb.on_page_start(page_num, total_pages);
        }

        let content = match document.extract_page(index) {
            Ok(content) => content,
            Err(e) => {
                warn!("Page {} failed: {}", page_num, e);
                if let Some(ref cb) = config.progress_callback {
                    cb.on_page_error(page_num, total_pages, &e.to_string());
                }
                return Err(e);
            }
        };

        let fragment = markdown::render_page(page_num, content.text.as_deref(), &content.tables);
        debug!(
            "Rendered page {}: {} bytes, {} tables",
            page_num,
            fragment.len(),
            content.tables.len()
        );

        if let Some(ref cb) = config.progress_callback {
            cb.on_page_complete(page_num, total_pages, fragment.len());
        }

        markdown.push_str(&fragment);
        pages.push(PageResult {
            page_num,
            markdown: fragment,
            has_text: content.text.as_deref().is_some_and(|t| !t.is_empty()),
            table_count: content.tables.len(),
        });
    }

    let stats = ConversionStats {
        total_pages,
        pages_with_text: pages.iter().filter(|p| p.has_text).count(),
        total_tables: pages.iter().map(|p| p.table_count).sum(),
        output_bytes: markdown.len(),
        total_duration_ms: start.elapsed().as_millis() as u64,
    };

    Ok(ConversionOutput {
        markdown,
        pages,
        stats,
    })
}
