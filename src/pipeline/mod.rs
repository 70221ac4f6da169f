//! Pipeline stages for PDF-to-Markdown conversion.
//!
//! Each submodule implements one step, so each can be tested on its own and
//! the PDF engine can be swapped without touching the Markdown side.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ tables ──▶ markdown ──▶ output
//! (path)    (pdfium)    (grids)    (fragments)  (atomic write)
//! ```
//!
//! 1. [`input`]: validate the PDF path; pick the output file name
//! 2. [`extract`]: per-page text and positioned text segments via pdfium,
//!    behind the [`extract::PdfBackend`] / [`extract::PageSource`] traits
//! 3. [`tables`]: group positioned text into table cell grids
//! 4. [`markdown`]: pipe tables and per-page fragments
//! 5. [`output`]: create the target directory and persist the file

pub mod extract;
pub mod input;
pub mod markdown;
pub mod output;
pub mod tables;
