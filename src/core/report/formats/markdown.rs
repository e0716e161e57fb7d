//! Markdown workbook writer
//!
//! Renders each sheet as a level-two heading followed by a table whose header
//! row carries spreadsheet column letters, so ragged rows line up the same way
//! they would in a spreadsheet. These render well in GitHub, GitLab, and VS Code.

use crate::core::error::ReportError;
use crate::core::report::formats::{WorkbookFormat, WorkbookWriter};
use crate::core::report::sheet::Sheet;
use std::fmt::Write;

/// Markdown workbook writer
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownWriter;

impl MarkdownWriter {
    /// Create a new Markdown writer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render all sheets into one document
    #[must_use]
    pub fn render(sheets: &[Sheet]) -> String {
        let mut output = String::new();
        for (idx, sheet) in sheets.iter().enumerate() {
            if idx > 0 {
                output.push('\n');
            }
            Self::render_sheet(&mut output, sheet);
        }
        output
    }

    fn render_sheet(output: &mut String, sheet: &Sheet) {
        let width = sheet.width().max(1);

        let _ = writeln!(output, "## {}\n", sheet.name);

        let letters: Vec<String> = (0..width).map(column_letter).collect();
        let _ = writeln!(output, "| {} |", letters.join(" | "));
        let _ = writeln!(output, "|{}", "---|".repeat(width));

        for row in &sheet.rows {
            let cells: Vec<String> = (0..width)
                .map(|i| row.get(i).map(|c| escape(&c.to_string())).unwrap_or_default())
                .collect();
            let _ = writeln!(output, "| {} |", cells.join(" | "));
        }
    }
}

impl WorkbookWriter for MarkdownWriter {
    fn format(&self) -> WorkbookFormat {
        WorkbookFormat::Markdown
    }

    fn write(&self, sheets: &[Sheet]) -> Result<Vec<u8>, ReportError> {
        Ok(Self::render(sheets).into_bytes())
    }
}

/// Spreadsheet column letter for a zero-based index (0 → A, 26 → AA)
fn column_letter(index: usize) -> String {
    const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        letters.push(char::from(ALPHABET[(n - 1) % 26]));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

fn escape(text: &str) -> String {
    text.replace('|', "\\|")
}
