//! # pdf-to-md
//!
//! Convert a PDF document into a flat Markdown transcript: one `# Page N`
//! section per page with the page text, every detected table as a GitHub
//! pipe table under `## Table`, and a `---` rule closing each page.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input    check the file exists and is a PDF
//!  ├─ 2. Extract  page text + positioned segments via pdfium
//!  ├─ 3. Tables   segments → cell grids (row/column alignment)
//!  ├─ 4. Render   per-page Markdown fragments, in page order
//!  └─ 5. Output   single atomic write (temp file + rename)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf_to_md::{convert_to_file, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     // Writes out/report.md when `out/` is an existing directory.
//!     let stats = convert_to_file("report.pdf", "out/", &config)?;
//!     eprintln!("{} pages, {} tables", stats.total_pages, stats.total_tables);
//!     Ok(())
//! }
//! ```
//!
//! ## Testing without pdfium
//!
//! The converter talks to PDFs only through [`PdfBackend`] and
//! [`PageSource`]. Implement them over canned [`PageContent`] and pass the
//! backend to [`convert_with_backend`] or [`convert_to_file_with_backend`].
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf-to-md` binary (clap + anyhow + indicatif + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, TableDetectorConfig};
pub use convert::{convert, convert_to_file, convert_to_file_with_backend, convert_with_backend};
pub use error::PdfToMdError;
pub use output::{ConversionOutput, ConversionStats, PageResult};
pub use pipeline::extract::{PageContent, PageSource, PdfBackend, PdfiumBackend, Table};
pub use pipeline::input::resolve_output_path;
pub use pipeline::markdown::{format_table, render_page};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
