//! Library for `KtuAnalytics`
//! Parses KTU result sheets, computes SGPA, and assembles per-department workbooks

pub mod core;
pub mod logger;

pub use core::config;
pub use core::error::{CreditLookupMiss, CurriculumError, ReportError};
pub use core::pipeline::{generate_report, GeneratedReport, ReportRequest};
