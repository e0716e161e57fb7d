//! Error types for the result-processing pipeline

use std::fmt;
use thiserror::Error;

/// Failures surfaced by [`generate_report`](crate::core::pipeline::generate_report).
///
/// Extraction and parse failures short-circuit before any sheet is assembled,
/// so a caller never receives a partial workbook.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The text extractor rejected the payload (malformed or not a PDF).
    #[error("text extraction failed: {0}")]
    Extraction(String),

    /// Text was extracted but no usable student records came out of it.
    #[error("no results found: {0}")]
    EmptyResult(String),

    /// A finalized record is missing its register number or department.
    #[error("incomplete student record (register no: '{register_no}', department: '{department}')")]
    IncompleteRecord {
        /// Register number as parsed (may be empty)
        register_no: String,
        /// Department as derived (may be empty)
        department: String,
    },

    /// The payload exceeds the configured size cap.
    #[error("input is {size} bytes, larger than the {limit} byte limit")]
    InputTooLarge {
        /// Actual payload size
        size: usize,
        /// Configured maximum
        limit: usize,
    },

    /// The workbook writer failed to serialize the sheets.
    #[error("failed to write workbook: {0}")]
    Workbook(String),
}

/// Failures while loading a curriculum table file.
#[derive(Debug, Error)]
pub enum CurriculumError {
    /// The file could not be read.
    #[error("failed to read curriculum file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid curriculum TOML.
    #[error("invalid curriculum TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A subject whose code has no entry in the credit table.
///
/// Not an error: the subject is left out of the SGPA numerator and
/// denominator and the miss is reported for data-quality review.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CreditLookupMiss {
    /// Student the subject belongs to
    pub register_no: String,
    /// Subject code missing from the credit table
    pub subject: String,
}

impl fmt::Display for CreditLookupMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no credit entry for {} (student {})",
            self.subject, self.register_no
        )
    }
}
