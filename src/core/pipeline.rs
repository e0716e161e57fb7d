//! End-to-end report generation
//!
//! bytes → text → (exam context, student records) → department buckets →
//! sheets → workbook bytes. Extraction and parse failures return before any
//! sheet is assembled.

use crate::core::analysis::{analyze, DepartmentAnalysis};
use crate::core::error::{CreditLookupMiss, ReportError};
use crate::core::extract::TextExtractor;
use crate::core::models::{Curriculum, DepartmentBuckets, ExamContext, StudentRecord};
use crate::core::parser::{extract_exam_context, parse_records, ParseOutcome};
use crate::core::report::{assemble_report, AssembleOptions, WorkbookFormat, WorkbookWriter};
use crate::{debug, info, warn};
use chrono::NaiveDate;

/// Default cap on the input payload (10 MiB)
pub const DEFAULT_MAX_INPUT_BYTES: usize = 10 * 1024 * 1024;

/// Everything a report run needs besides the payload
pub struct ReportRequest<'a> {
    /// Static tables
    pub curriculum: &'a Curriculum,
    /// Turns the payload into text
    pub extractor: &'a dyn TextExtractor,
    /// Serializes the assembled sheets
    pub writer: &'a dyn WorkbookWriter,
    /// Date stamped into the file name
    pub date: NaiveDate,
    /// Sheet assembly options
    pub options: AssembleOptions,
    /// Reject payloads larger than this many bytes
    pub max_input_bytes: Option<usize>,
}

/// Parsed and grouped result data, ready for analysis or assembly
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResults {
    /// Exam header information
    pub context: ExamContext,
    /// Students grouped by department
    pub buckets: DepartmentBuckets,
    /// Distinct subject codes across all students
    pub subject_count: usize,
    /// Subjects left out of SGPA for lack of a credit entry
    pub credit_misses: Vec<CreditLookupMiss>,
    /// Register numbers dropped for having no grades
    pub dropped: Vec<String>,
}

/// One department's line in the run summary
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentSummary {
    /// Department name
    pub name: String,
    /// Aggregate figures
    pub analysis: DepartmentAnalysis,
}

/// What a report run found
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    /// Exam header information
    pub context: ExamContext,
    /// Per-department analysis, in sheet order
    pub departments: Vec<DepartmentSummary>,
    /// Students across all departments
    pub student_count: usize,
    /// Distinct subject codes
    pub subject_count: usize,
    /// Subjects left out of SGPA for lack of a credit entry
    pub credit_misses: Vec<CreditLookupMiss>,
    /// Register numbers dropped for having no grades
    pub dropped: Vec<String>,
}

/// A finished report
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedReport {
    /// Suggested file name, `results_<semester>_<date>.<ext>`
    pub file_name: String,
    /// Serialized workbook
    pub content: Vec<u8>,
    /// What went into it
    pub summary: ReportSummary,
}

/// Parse extracted text into grouped student records.
///
/// # Errors
/// - [`ReportError::EmptyResult`] when no student record (or department) is found
/// - [`ReportError::IncompleteRecord`] when a record lacks a register number or department
pub fn parse_results(text: &str, curriculum: &Curriculum) -> Result<ParsedResults, ReportError> {
    let context = extract_exam_context(text);
    info!(
        "Exam context: semester={} type={} date='{}' batch={}",
        context.semester,
        context.exam_type,
        context.exam_date,
        context.batch_label()
    );

    let outcome = parse_records(text, curriculum);
    if outcome.students.is_empty() {
        return Err(ReportError::EmptyResult(
            "no student records found in the document".to_string(),
        ));
    }

    check_complete(&outcome.students)?;

    if !outcome.credit_misses.is_empty() {
        warn!(
            "{} subject(s) had no credit entry and were left out of SGPA",
            outcome.credit_misses.len()
        );
    }

    let ParseOutcome {
        students,
        subject_count,
        credit_misses,
        dropped,
    } = outcome;
    let buckets = DepartmentBuckets::from_records(students);
    if buckets.is_empty() {
        return Err(ReportError::EmptyResult(
            "no departments found in the document".to_string(),
        ));
    }

    info!(
        "Parsed {} students across {} departments ({} subjects)",
        buckets.student_count(),
        buckets.len(),
        subject_count
    );

    Ok(ParsedResults {
        context,
        buckets,
        subject_count,
        credit_misses,
        dropped,
    })
}

/// Every record must carry a register number and a department
///
/// # Errors
/// Returns [`ReportError::IncompleteRecord`] for the first record missing either
pub fn check_complete(students: &[StudentRecord]) -> Result<(), ReportError> {
    match students
        .iter()
        .find(|s| s.register_no.is_empty() || s.department.is_empty())
    {
        Some(bad) => Err(ReportError::IncompleteRecord {
            register_no: bad.register_no.clone(),
            department: bad.department.clone(),
        }),
        None => Ok(()),
    }
}

/// Analyze every department in parsed results
#[must_use]
pub fn summarize(parsed: &ParsedResults) -> ReportSummary {
    let departments = parsed
        .buckets
        .iter()
        .map(|bucket| DepartmentSummary {
            name: bucket.name.clone(),
            analysis: analyze(&bucket.students, parsed.context.batch_year),
        })
        .collect();

    ReportSummary {
        context: parsed.context.clone(),
        departments,
        student_count: parsed.buckets.student_count(),
        subject_count: parsed.subject_count,
        credit_misses: parsed.credit_misses.clone(),
        dropped: parsed.dropped.clone(),
    }
}

/// `results_<semester>_<YYYY-MM-DD>.<ext>`
#[must_use]
pub fn report_file_name(context: &ExamContext, date: NaiveDate, format: WorkbookFormat) -> String {
    format!(
        "results_{}_{}.{}",
        context.semester,
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Run the whole pipeline on a document payload.
///
/// # Errors
/// - [`ReportError::InputTooLarge`] when the payload exceeds `max_input_bytes`
/// - [`ReportError::Extraction`] when the extractor rejects the payload
/// - [`ReportError::EmptyResult`] / [`ReportError::IncompleteRecord`] from parsing
/// - [`ReportError::Workbook`] when the writer fails
pub fn generate_report(
    bytes: &[u8],
    request: &ReportRequest<'_>,
) -> Result<GeneratedReport, ReportError> {
    if let Some(limit) = request.max_input_bytes {
        if bytes.len() > limit {
            return Err(ReportError::InputTooLarge {
                size: bytes.len(),
                limit,
            });
        }
    }

    let text = request.extractor.extract_text(bytes)?;
    debug!("Extracted text: {} lines", text.lines().count());

    let parsed = parse_results(&text, request.curriculum)?;
    let sheets = assemble_report(
        &parsed.buckets,
        &parsed.context,
        request.curriculum,
        &request.options,
    );
    let content = request.writer.write(&sheets)?;
    let file_name = report_file_name(&parsed.context, request.date, request.writer.format());

    info!(
        "Generated {file_name}: {} sheets, {} bytes",
        sheets.len(),
        content.len()
    );

    Ok(GeneratedReport {
        file_name,
        content,
        summary: summarize(&parsed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extract::PlainTextExtractor;
    use crate::core::models::Semester;
    use crate::core::report::MarkdownWriter;

    const SAMPLE: &str = "APJ ABDUL KALAM TECHNOLOGICAL UNIVERSITY\n\
                          B.Tech S4 Regular Examination May 2024\n\
                          TCR22CS061 CST202(A) CST204(B+)\n\
                          MCN202(P)\n\
                          TCR22CS062 CST202(S) CST204(F)\n\
                          TCR20ME010 CST202(B)\n";

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
    }

    fn run(bytes: &[u8], max: Option<usize>) -> Result<GeneratedReport, ReportError> {
        let curriculum = Curriculum::from_defaults();
        let request = ReportRequest {
            curriculum: &curriculum,
            extractor: &PlainTextExtractor,
            writer: &MarkdownWriter,
            date: date(),
            options: AssembleOptions::default(),
            max_input_bytes: max,
        };
        generate_report(bytes, &request)
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = run(SAMPLE.as_bytes(), None).expect("report");
        assert_eq!(report.file_name, "results_S4_2024-06-01.md");

        let summary = &report.summary;
        assert_eq!(summary.context.semester, Semester::Numbered(4));
        assert_eq!(summary.context.batch_year, Some(2022));
        assert_eq!(summary.student_count, 3);
        assert_eq!(summary.subject_count, 3);
        assert_eq!(summary.departments.len(), 2);
        assert_eq!(summary.departments[0].name, "COMPUTER SCIENCE & ENGINEERING");

        let text = String::from_utf8(report.content).expect("utf8");
        assert!(text.contains("## CSE"));
        assert!(text.contains("## ME"));
    }

    #[test]
    fn test_empty_text_is_empty_result() {
        let err = run(b"", None).expect_err("empty");
        assert!(matches!(err, ReportError::EmptyResult(_)));
    }

    #[test]
    fn test_header_only_is_empty_result() {
        let err = run(b"B.Tech S4 Regular Examination May 2024\n", None).expect_err("empty");
        assert!(matches!(err, ReportError::EmptyResult(_)));
    }

    #[test]
    fn test_size_cap() {
        let err = run(SAMPLE.as_bytes(), Some(10)).expect_err("too large");
        assert!(matches!(
            err,
            ReportError::InputTooLarge { limit: 10, .. }
        ));
    }

    #[test]
    fn test_extraction_failure_short_circuits() {
        let err = run(&[0xff, 0xfe], None).expect_err("bad utf8");
        assert!(matches!(err, ReportError::Extraction(_)));
    }

    #[test]
    fn test_file_name_for_unknown_semester() {
        let name = report_file_name(&ExamContext::unknown(), date(), WorkbookFormat::Xlsx);
        assert_eq!(name, "results_Unknown_2024-06-01.xlsx");
    }

    #[test]
    fn test_incomplete_record_is_rejected() {
        let ok = StudentRecord::new("TCR22CS061".to_string(), "CSE".to_string());
        let bad = StudentRecord::new("TCR22CS062".to_string(), String::new());
        assert!(check_complete(std::slice::from_ref(&ok)).is_ok());

        let err = check_complete(&[ok, bad]).expect_err("incomplete");
        match err {
            ReportError::IncompleteRecord {
                register_no,
                department,
            } => {
                assert_eq!(register_no, "TCR22CS062");
                assert!(department.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_and_summarize() {
        let curriculum = Curriculum::from_defaults();
        let parsed = parse_results(SAMPLE, &curriculum).expect("parsed");
        assert_eq!(parsed.buckets.len(), 2);
        assert!(parsed.dropped.is_empty());

        let summary = summarize(&parsed);
        let cse = &summary.departments[0].analysis;
        assert_eq!(cse.overall.total, 2);
        assert_eq!(cse.overall.fail_count, 1);
        assert_eq!(cse.regular.total, 2);

        let me = &summary.departments[1].analysis;
        assert_eq!(me.supplementary.total, 1);
    }
}
