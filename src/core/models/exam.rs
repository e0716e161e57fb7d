//! Examination context read from the result sheet header

use std::fmt;

/// Semester the examination belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Semester {
    /// Semester 1 through 8
    Numbered(u8),
    /// No semester marker found
    Unknown,
}

impl Semester {
    /// Build a semester from its number; anything outside 1..=8 is `Unknown`
    #[must_use]
    pub const fn from_number(n: u8) -> Self {
        if matches!(n, 1..=8) {
            Self::Numbered(n)
        } else {
            Self::Unknown
        }
    }

    /// Years between admission and this semester's examination.
    ///
    /// S1 → 0, S2/S3 → 1, S4/S5 → 2, S6/S7 → 3, anything else → 4.
    #[must_use]
    pub const fn batch_offset(self) -> u32 {
        match self {
            Self::Numbered(1) => 0,
            Self::Numbered(2 | 3) => 1,
            Self::Numbered(4 | 5) => 2,
            Self::Numbered(6 | 7) => 3,
            _ => 4,
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numbered(n) => write!(f, "S{n}"),
            Self::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Kind of examination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExamType {
    /// Regular examination
    Regular,
    /// Supplementary examination
    Supplementary,
    /// Not stated in the text
    Unknown,
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Regular => "Regular",
            Self::Supplementary => "Supplementary",
            Self::Unknown => "Unknown",
        })
    }
}

/// Everything the header tells us about the examination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamContext {
    /// Semester label
    pub semester: Semester,
    /// Regular or supplementary examination
    pub exam_type: ExamType,
    /// Date token exactly as found (empty when none was found)
    pub exam_date: String,
    /// Admission year of the batch sitting this semester on schedule
    pub batch_year: Option<u32>,
}

impl ExamContext {
    /// Context with nothing recognised
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            semester: Semester::Unknown,
            exam_type: ExamType::Unknown,
            exam_date: String::new(),
            batch_year: None,
        }
    }

    /// Batch year for display, `Unknown` when absent
    #[must_use]
    pub fn batch_label(&self) -> String {
        self.batch_year
            .map_or_else(|| "Unknown".to_string(), |y| y.to_string())
    }
}

impl Default for ExamContext {
    fn default() -> Self {
        Self::unknown()
    }
}
