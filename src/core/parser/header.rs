//! Exam header extraction
//!
//! Best-effort scan of the free-form header for semester, exam type and exam
//! date. Missing markers yield `Unknown` / empty values, never an error.

use crate::core::models::{ExamContext, ExamType, Semester};
use once_cell::sync::Lazy;
use regex::Regex;

/// `S4 Regular`, `S6 (R,S) Supplementary`: semester followed by the exam type on the same line
static SEMESTER_WITH_TYPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bS([1-8])[ \t]+(?:\S+[ \t]+){0,3}?(?i:regular|supplementary)").unwrap()
});
static SEMESTER_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bsemester[ \t]*([1-8])\b").unwrap());
static SEMESTER_BARE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bS([1-8])\s").unwrap());

static EXAM_TYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(regular|supplementary)\b").unwrap());

static MONTH_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?[ \t,]*((?:19|20)\d{2})\b",
    )
    .unwrap()
});
static NUMERIC_MONTH_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:0?[1-9]|1[0-2])[/-]((?:19|20)\d{2})\b").unwrap());
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b((?:19|20)\d{2})\b").unwrap());

/// Read the examination context from the full document text
#[must_use]
pub fn extract_exam_context(text: &str) -> ExamContext {
    let semester = extract_semester(text);
    let exam_type = extract_exam_type(text);
    let (exam_date, exam_year) = extract_exam_date(text).unwrap_or_default();
    let batch = (!exam_date.is_empty()).then(|| batch_year(semester, exam_year));

    ExamContext {
        semester,
        exam_type,
        exam_date,
        batch_year: batch,
    }
}

/// Semester marker, trying the most specific pattern first
#[must_use]
pub fn extract_semester(text: &str) -> Semester {
    [
        &*SEMESTER_WITH_TYPE_RE,
        &*SEMESTER_WORD_RE,
        &*SEMESTER_BARE_RE,
    ]
    .iter()
    .find_map(|re| re.captures(text))
    .and_then(|caps| caps[1].parse::<u8>().ok())
    .map_or(Semester::Unknown, Semester::from_number)
}

/// First mention of "Regular" or "Supplementary", any case
#[must_use]
pub fn extract_exam_type(text: &str) -> ExamType {
    EXAM_TYPE_RE
        .captures(text)
        .map_or(ExamType::Unknown, |caps| {
            if caps[1].eq_ignore_ascii_case("regular") {
                ExamType::Regular
            } else {
                ExamType::Supplementary
            }
        })
}

/// Exam date token and its four-digit year.
///
/// Tries month name + year, then `MM/YYYY` / `MM-YYYY`, then a bare year.
#[must_use]
pub fn extract_exam_date(text: &str) -> Option<(String, u32)> {
    [&*MONTH_YEAR_RE, &*NUMERIC_MONTH_YEAR_RE, &*YEAR_RE]
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| {
            let year = caps[1].parse().ok()?;
            Some((caps[0].trim().to_string(), year))
        })
}

/// Admission year of the batch that sits `semester` in `exam_year`
#[must_use]
pub const fn batch_year(semester: Semester, exam_year: u32) -> u32 {
    exam_year.saturating_sub(semester.batch_offset())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_header() {
        let text = "APJ ABDUL KALAM TECHNOLOGICAL UNIVERSITY\n\
                    B.Tech S4 Regular Examination May 2024\n\
                    TCR22CS061 CST202(A)";
        let ctx = extract_exam_context(text);
        assert_eq!(ctx.semester, Semester::Numbered(4));
        assert_eq!(ctx.exam_type, ExamType::Regular);
        assert_eq!(ctx.exam_date, "May 2024");
        assert_eq!(ctx.batch_year, Some(2022));
    }

    #[test]
    fn test_semester_with_intervening_words() {
        let text = "B.Tech S6 (R,S) Supplementary Exam";
        assert_eq!(extract_semester(text), Semester::Numbered(6));
        assert_eq!(extract_exam_type(text), ExamType::Supplementary);
    }

    #[test]
    fn test_semester_fallbacks() {
        assert_eq!(extract_semester("Semester 3 results"), Semester::Numbered(3));
        assert_eq!(extract_semester("Result of S7 exam"), Semester::Numbered(7));
        assert_eq!(extract_semester("no marker here"), Semester::Unknown);
        assert_eq!(extract_semester("S9 Regular"), Semester::Unknown);
    }

    #[test]
    fn test_specific_semester_pattern_wins() {
        let text = "S2 list attached\nB.Tech S5 Regular Exam";
        assert_eq!(extract_semester(text), Semester::Numbered(5));
    }

    #[test]
    fn test_exam_type_case_insensitive_first_wins() {
        assert_eq!(
            extract_exam_type("SUPPLEMENTARY then regular"),
            ExamType::Supplementary
        );
        assert_eq!(extract_exam_type("nothing"), ExamType::Unknown);
    }

    #[test]
    fn test_date_formats() {
        assert_eq!(
            extract_exam_date("held in December, 2023"),
            Some(("December, 2023".to_string(), 2023))
        );
        assert_eq!(
            extract_exam_date("Exam 06/2024 session"),
            Some(("06/2024".to_string(), 2024))
        );
        assert_eq!(
            extract_exam_date("Exam 11-2023"),
            Some(("11-2023".to_string(), 2023))
        );
        assert_eq!(
            extract_exam_date("Academic year 2024"),
            Some(("2024".to_string(), 2024))
        );
        assert_eq!(extract_exam_date("TCR22CS061 CST201(A)"), None);
    }

    #[test]
    fn test_month_name_beats_numeric() {
        let text = "Published 05/2024 for the April 2024 exam";
        assert_eq!(
            extract_exam_date(text),
            Some(("April 2024".to_string(), 2024))
        );
    }

    #[test]
    fn test_batch_year_derivation() {
        assert_eq!(batch_year(Semester::Numbered(4), 2024), 2022);
        assert_eq!(batch_year(Semester::Numbered(1), 2024), 2024);
        assert_eq!(batch_year(Semester::Numbered(7), 2024), 2021);
        assert_eq!(batch_year(Semester::Unknown, 2024), 2020);
    }

    #[test]
    fn test_empty_text_is_unknown() {
        assert_eq!(extract_exam_context(""), ExamContext::unknown());
    }
}
