//! Result types returned by the conversion entry points.

use serde::Serialize;

/// The rendered fragment for a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult {
    /// 1-indexed page number.
    pub page_num: usize,
    /// Markdown fragment for this page, separator rule included.
    pub markdown: String,
    /// Whether the page contributed any text.
    pub has_text: bool,
    /// Number of `## Table` sections on the page.
    pub table_count: usize,
}

/// Aggregate figures for a finished conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    pub total_pages: usize,
    pub pages_with_text: usize,
    pub total_tables: usize,
    /// Byte length of the assembled Markdown.
    pub output_bytes: usize,
    pub total_duration_ms: u64,
}

/// A complete in-memory conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionOutput {
    /// All page fragments concatenated in page order.
    pub markdown: String,
    pub pages: Vec<PageResult>,
    pub stats: ConversionStats,
}
