//! Result-sheet text parsing
//!
//! [`header`] reads the examination context; [`records`] turns the grade
//! listing into finalized [`StudentRecord`](crate::core::models::StudentRecord)s.

pub mod header;
pub mod records;

pub use header::extract_exam_context;
pub use records::{department_of, parse_records, parse_records_with, ParseOutcome, RecordParser};
