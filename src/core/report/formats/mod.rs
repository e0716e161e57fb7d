//! Workbook writer implementations
//!
//! Serializes assembled sheets to bytes: an `.xlsx` workbook, or Markdown
//! tables for quick previews.

pub mod markdown;
pub mod xlsx;

pub use markdown::MarkdownWriter;
pub use xlsx::XlsxWriter;

use crate::core::error::ReportError;
use crate::core::report::sheet::Sheet;
use std::fmt;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkbookFormat {
    /// Excel workbook, one tab per sheet
    #[default]
    Xlsx,
    /// Markdown document, one table per sheet
    Markdown,
}

impl WorkbookFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Markdown => "md",
        }
    }

    /// Writer for this format
    #[must_use]
    pub fn writer(self) -> Box<dyn WorkbookWriter> {
        match self {
            Self::Xlsx => Box::new(XlsxWriter::new()),
            Self::Markdown => Box::new(MarkdownWriter::new()),
        }
    }
}

impl FromStr for WorkbookFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(Self::Xlsx),
            "md" | "markdown" => Ok(Self::Markdown),
            _ => Err(format!("Unknown workbook format: {s}")),
        }
    }
}

impl fmt::Display for WorkbookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xlsx => write!(f, "xlsx"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

/// Serializes sheets into a downloadable document
pub trait WorkbookWriter {
    /// Format this writer produces
    fn format(&self) -> WorkbookFormat;

    /// Serialize the sheets, in order
    ///
    /// # Errors
    /// Returns [`ReportError::Workbook`] if serialization fails
    fn write(&self, sheets: &[Sheet]) -> Result<Vec<u8>, ReportError>;
}
