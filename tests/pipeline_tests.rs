//! End-to-end tests: result text in, workbook and summary out

use chrono::NaiveDate;
use ktu_analytics::core::extract::{extractor_for, PdfTextExtractor, PlainTextExtractor};
use ktu_analytics::core::models::{Curriculum, ExamType, Semester};
use ktu_analytics::core::pipeline::{parse_results, summarize};
use ktu_analytics::core::report::{AssembleOptions, MarkdownWriter, WorkbookWriter, XlsxWriter};
use ktu_analytics::{generate_report, GeneratedReport, ReportError, ReportRequest};
use std::fs;
use tempfile::TempDir;

const RESULT_TEXT: &str = "APJ ABDUL KALAM TECHNOLOGICAL UNIVERSITY\n\
                           B.Tech S4 Regular Examination May 2024\n\
                           Register No Course Code (Grade)\n\
                           TCR22CS061 CST202(A) CST204(B+)\n\
                           MCN202(P)\n\
                           TCR22CS062 CST202(S) CST204(F)\n\
                           TCR22CS063 CST202(A+) CST204(A+)\n\
                           TCR20ME010 CST202(B)\n";

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
}

fn run_with(
    bytes: &[u8],
    writer: &dyn WorkbookWriter,
    options: AssembleOptions,
) -> Result<GeneratedReport, ReportError> {
    let curriculum = Curriculum::from_defaults();
    let request = ReportRequest {
        curriculum: &curriculum,
        extractor: &PlainTextExtractor,
        writer,
        date: date(),
        options,
        max_input_bytes: None,
    };
    generate_report(bytes, &request)
}

#[test]
fn test_markdown_report_end_to_end() {
    let report = run_with(
        RESULT_TEXT.as_bytes(),
        &MarkdownWriter,
        AssembleOptions::default(),
    )
    .expect("report");

    assert_eq!(report.file_name, "results_S4_2024-06-01.md");
    let text = String::from_utf8(report.content).expect("utf8");

    assert!(text.contains("## CSE"));
    assert!(text.contains("## ME"));
    assert!(text.contains("TCR22CS061"));
    assert!(text.contains("8.25"));
    assert!(text.contains("Department Analysis"));
    assert!(text.contains("Subject-wise Analysis"));
    assert!(text.contains("TCR22CS063"));
}

#[test]
fn test_xlsx_report_is_a_zip_container() {
    let report = run_with(
        RESULT_TEXT.as_bytes(),
        &XlsxWriter,
        AssembleOptions::default(),
    )
    .expect("report");

    assert_eq!(report.file_name, "results_S4_2024-06-01.xlsx");
    assert!(report.content.starts_with(b"PK"));
}

#[test]
fn test_report_written_to_disk() {
    let temp = TempDir::new().expect("temp dir");
    let report = run_with(
        RESULT_TEXT.as_bytes(),
        &XlsxWriter,
        AssembleOptions::default(),
    )
    .expect("report");

    let path = temp.path().join(&report.file_name);
    fs::write(&path, &report.content).expect("write workbook");
    assert_eq!(
        fs::metadata(&path).expect("metadata").len() as usize,
        report.content.len()
    );
}

#[test]
fn test_summary_figures() {
    let report = run_with(
        RESULT_TEXT.as_bytes(),
        &MarkdownWriter,
        AssembleOptions::default(),
    )
    .expect("report");
    let summary = report.summary;

    assert_eq!(summary.context.semester, Semester::Numbered(4));
    assert_eq!(summary.context.exam_type, ExamType::Regular);
    assert_eq!(summary.context.exam_date, "May 2024");
    assert_eq!(summary.context.batch_year, Some(2022));
    assert_eq!(summary.student_count, 4);
    assert_eq!(summary.subject_count, 3);
    assert!(summary.credit_misses.is_empty());

    let cse = &summary.departments[0];
    assert_eq!(cse.name, "COMPUTER SCIENCE & ENGINEERING");
    assert_eq!(cse.analysis.overall.total, 3);
    assert_eq!(cse.analysis.overall.fail_count, 1);
    assert_eq!(cse.analysis.regular.total, 3);
    assert_eq!(cse.analysis.supplementary.total, 0);

    let topper = cse.analysis.topper.as_ref().expect("topper");
    assert_eq!(topper.register_no, "TCR22CS063");
    assert!((topper.sgpa - 9.0).abs() < 1e-9);

    let me = &summary.departments[1];
    assert_eq!(me.name, "MECHANICAL ENGINEERING");
    assert_eq!(me.analysis.regular.total, 0);
    assert_eq!(me.analysis.supplementary.total, 1);
}

#[test]
fn test_topper_threshold_option() {
    let strict = run_with(
        RESULT_TEXT.as_bytes(),
        &MarkdownWriter,
        AssembleOptions {
            topper_threshold: 9.5,
        },
    )
    .expect("report");
    let text = String::from_utf8(strict.content).expect("utf8");
    assert!(text.contains("No students with SGPA >= 9.5"));
}

#[test]
fn test_missing_credit_is_reported_not_defaulted() {
    let text = "B.Tech S4 Regular Examination May 2024\n\
                TCR22CS061 CST202(S) XYZ999(A)\n";
    let parsed = parse_results(text, &Curriculum::from_defaults()).expect("parsed");

    assert_eq!(parsed.credit_misses.len(), 1);
    assert_eq!(parsed.credit_misses[0].subject, "XYZ999");

    let student = &parsed.buckets.iter().next().expect("bucket").students[0];
    assert_eq!(student.sgpa, Some(10.0));

    let summary = summarize(&parsed);
    assert_eq!(summary.credit_misses.len(), 1);
}

#[test]
fn test_empty_document_is_rejected() {
    let err = run_with(b"", &MarkdownWriter, AssembleOptions::default()).expect_err("empty");
    assert!(matches!(err, ReportError::EmptyResult(_)));

    let header_only = "B.Tech S4 Regular Examination May 2024\nNo results published\n";
    let err = run_with(
        header_only.as_bytes(),
        &MarkdownWriter,
        AssembleOptions::default(),
    )
    .expect_err("no students");
    assert!(matches!(err, ReportError::EmptyResult(_)));
}

#[test]
fn test_size_cap() {
    let curriculum = Curriculum::from_defaults();
    let request = ReportRequest {
        curriculum: &curriculum,
        extractor: &PlainTextExtractor,
        writer: &MarkdownWriter,
        date: date(),
        options: AssembleOptions::default(),
        max_input_bytes: Some(16),
    };

    let err = generate_report(RESULT_TEXT.as_bytes(), &request).expect_err("too large");
    assert!(matches!(err, ReportError::InputTooLarge { limit: 16, .. }));
}

#[test]
fn test_non_pdf_payload_rejected_by_pdf_extractor() {
    let curriculum = Curriculum::from_defaults();
    let request = ReportRequest {
        curriculum: &curriculum,
        extractor: &PdfTextExtractor,
        writer: &MarkdownWriter,
        date: date(),
        options: AssembleOptions::default(),
        max_input_bytes: None,
    };

    let err = generate_report(RESULT_TEXT.as_bytes(), &request).expect_err("not a pdf");
    assert!(matches!(err, ReportError::Extraction(_)));
}

#[test]
fn test_text_files_use_plain_extractor() {
    let text = extractor_for("results.TXT")
        .extract_text(RESULT_TEXT.as_bytes())
        .expect("plain text");
    assert_eq!(text, RESULT_TEXT);
}
