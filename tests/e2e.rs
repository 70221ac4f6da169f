//! End-to-end tests against a real pdfium library.
//!
//! These need a pdfium shared library and sample PDFs in `./test_cases/`, so
//! they are gated behind the `PDF_TO_MD_E2E` environment variable.
//!
//! Run with:
//!   PDF_TO_MD_E2E=1 PDFIUM_LIB_PATH=/path/to/libpdfium.so cargo test --test e2e -- --nocapture

use pdf_to_md::{convert, convert_to_file, ConversionConfig, PdfToMdError};
use std::path::PathBuf;

fn test_cases_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_cases")
}

/// Skip this test if PDF_TO_MD_E2E is not set *or* no PDF file at `path`.
macro_rules! e2e_skip_unless_ready {
    ($path:expr) => {{
        if std::env::var("PDF_TO_MD_E2E").is_err() {
            println!("SKIP: set PDF_TO_MD_E2E=1 to run e2e tests");
            return;
        }
        let p: PathBuf = $path;
        if !p.exists() {
            println!("SKIP: test file not found: {}", p.display());
            return;
        }
        p
    }};
}

/// Structural checks every converted document must pass.
fn assert_page_structure(md: &str, context: &str) {
    assert!(md.starts_with("# Page 1\n\n"), "[{context}] must open with page 1");
    assert!(md.ends_with("---\n\n"), "[{context}] must end with a page rule");
    assert!(
        md.matches("\n---\n\n").count() >= md.matches("# Page ").count(),
        "[{context}] every page heading needs a closing rule"
    );
    for line in md.lines().filter(|l| l.starts_with("| ---")) {
        assert!(line.ends_with(" |"), "[{context}] malformed separator: {line}");
    }
}

#[test]
fn test_convert_sample_document() {
    let path = e2e_skip_unless_ready!(test_cases_dir().join("sample.pdf"));

    let output = convert(&path, &ConversionConfig::default()).expect("conversion should succeed");

    assert!(output.stats.total_pages > 0);
    assert_eq!(output.pages.len(), output.stats.total_pages);
    assert_page_structure(&output.markdown, "sample.pdf");
    println!(
        "sample.pdf: {} pages, {} tables, {} bytes",
        output.stats.total_pages, output.stats.total_tables, output.stats.output_bytes
    );
}

#[test]
fn test_convert_table_document_to_directory() {
    let path = e2e_skip_unless_ready!(test_cases_dir().join("tables.pdf"));
    let out_dir = tempfile::tempdir().unwrap();

    let stats = convert_to_file(&path, out_dir.path(), &ConversionConfig::default())
        .expect("conversion should succeed");

    let md = std::fs::read_to_string(out_dir.path().join("tables.md")).unwrap();
    assert!(stats.total_tables > 0, "tables.pdf should yield at least one table");
    assert!(md.contains("## Table\n\n| "));
    assert_page_structure(&md, "tables.pdf");
}

#[test]
fn test_corrupt_pdf_is_an_extraction_failure() {
    if std::env::var("PDF_TO_MD_E2E").is_err() {
        println!("SKIP");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("truncated.pdf");
    std::fs::write(&path, b"%PDF-1.7\n1 0 obj\n<<").unwrap();

    let err = convert(&path, &ConversionConfig::default()).unwrap_err();
    assert!(
        matches!(err, PdfToMdError::ExtractionFailed { page: None, .. }),
        "got: {err:?}"
    );
}
