//! Report generation module for result analysis
//!
//! Assembles one sheet per department (student table plus analysis block) and
//! serializes the sheets to a workbook in one of the supported formats.

pub mod assembler;
pub mod formats;
pub mod sheet;

pub use assembler::{assemble_report, AssembleOptions};
pub use formats::{MarkdownWriter, WorkbookFormat, WorkbookWriter, XlsxWriter};
pub use sheet::{Cell, Row, Sheet};
