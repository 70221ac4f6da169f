//! Configuration types for PDF-to-Markdown conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The defaults reproduce the plain
//! `pdf-to-md -I in.pdf -O out.md` behaviour; the knobs exist for library
//! callers (encrypted documents, noisy table layouts, progress reporting).

use crate::error::PdfToMdError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for a PDF-to-Markdown conversion.
///
/// # Example
/// ```rust
/// use pdf_to_md::{ConversionConfig, TableDetectorConfig};
///
/// let config = ConversionConfig::builder()
///     .password("s3cret")
///     .table_detection(TableDetectorConfig {
///         row_tolerance: 3.0,
///         ..TableDetectorConfig::default()
///     })
///     .build()
///     .unwrap();
/// assert_eq!(config.password.as_deref(), Some("s3cret"));
/// ```
#[derive(Clone, Default)]
pub struct ConversionConfig {
    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Geometry thresholds used to group positioned text into table grids.
    pub table_detection: TableDetectorConfig,

    /// Receives per-page progress events. Default: None.
    pub progress_callback: Option<ProgressCallback>,
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("table_detection", &self.table_detection)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn table_detection(mut self, detection: TableDetectorConfig) -> Self {
        self.config.table_detection = detection;
        self
    }

    /// Turn table extraction off entirely; pages then carry text only.
    pub fn extract_tables(mut self, enabled: bool) -> Self {
        self.config.table_detection.enabled = enabled;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, PdfToMdError> {
        let t = &self.config.table_detection;
        if !(t.row_tolerance.is_finite() && t.row_tolerance >= 0.0) {
            return Err(PdfToMdError::InvalidConfig(format!(
                "row_tolerance must be a non-negative number, got {}",
                t.row_tolerance
            )));
        }
        if !(t.col_tolerance.is_finite() && t.col_tolerance >= 0.0) {
            return Err(PdfToMdError::InvalidConfig(format!(
                "col_tolerance must be a non-negative number, got {}",
                t.col_tolerance
            )));
        }
        if t.min_rows < 2 {
            return Err(PdfToMdError::InvalidConfig(
                "min_rows must be >= 2 (a table needs a header and a data row)".into(),
            ));
        }
        if t.min_cols < 2 {
            return Err(PdfToMdError::InvalidConfig("min_cols must be >= 2".into()));
        }
        Ok(self.config)
    }
}

/// Table detector thresholds, in PDF points (1/72 inch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDetectorConfig {
    /// Run table detection at all. Default: true.
    pub enabled: bool,
    /// Text segments whose vertical centres are within this distance share a row.
    pub row_tolerance: f32,
    /// Left edges within this distance are merged into one column boundary.
    pub col_tolerance: f32,
    /// Minimum consecutive rows (header included) for a region to count as a table.
    pub min_rows: usize,
    /// Minimum cells per row for that row to take part in a table.
    pub min_cols: usize,
}

impl Default for TableDetectorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            row_tolerance: 5.0,
            col_tolerance: 10.0,
            min_rows: 2,
            min_cols: 2,
        }
    }
}
