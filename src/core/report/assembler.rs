//! Per-department sheet assembly
//!
//! Each department gets one sheet: a title block, the student table, and an
//! analysis block underneath.

use crate::core::analysis::{analyze, CohortStats, DepartmentAnalysis};
use crate::core::batch::{batch_label, is_regular_in};
use crate::core::models::{Curriculum, DepartmentBucket, DepartmentBuckets, ExamContext};
use crate::core::report::sheet::{Cell, Row, Sheet};
use crate::row;

/// Longest sheet name spreadsheet applications accept
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Placeholder for a subject the student did not sit
pub const NOT_TAKEN: &str = "-";

/// Knobs for sheet assembly
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssembleOptions {
    /// Minimum SGPA for the topper list
    pub topper_threshold: f64,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            topper_threshold: 9.0,
        }
    }
}

/// Build one sheet per department, in bucket order
#[must_use]
pub fn assemble_report(
    buckets: &DepartmentBuckets,
    context: &ExamContext,
    curriculum: &Curriculum,
    options: &AssembleOptions,
) -> Vec<Sheet> {
    let mut used_names: Vec<String> = Vec::with_capacity(buckets.len());

    buckets
        .iter()
        .map(|bucket| {
            let name = unique_sheet_name(&sheet_name(&bucket.name, curriculum), &used_names);
            used_names.push(name.clone());
            let analysis = analyze(&bucket.students, context.batch_year);
            assemble_department(name, bucket, &analysis, context, curriculum, options)
        })
        .collect()
}

/// Sheet for a single department
#[must_use]
pub fn assemble_department(
    name: String,
    bucket: &DepartmentBucket,
    analysis: &DepartmentAnalysis,
    context: &ExamContext,
    curriculum: &Curriculum,
    options: &AssembleOptions,
) -> Sheet {
    let mut sheet = Sheet::new(name);
    let codes: Vec<&str> = analysis.subjects.iter().map(|s| s.code.as_str()).collect();

    push_title_block(&mut sheet, &bucket.name, context);
    sheet.push_blank();
    push_student_table(&mut sheet, bucket, &codes, curriculum);
    sheet.push_blank();
    sheet.push_blank();
    push_analysis_block(&mut sheet, bucket, analysis, context, options);
    push_subject_credits(&mut sheet, &codes, curriculum);
    push_notes(&mut sheet, curriculum);

    sheet
}

/// Column header for a subject: `CODE (credits)`, `CODE* (NC)`, or bare `CODE`
#[must_use]
pub fn subject_header(code: &str, curriculum: &Curriculum) -> String {
    if curriculum.is_non_credit(code) {
        format!("{code}* (NC)")
    } else if let Some(credits) = curriculum.credits(code) {
        format!("{code} ({credits})")
    } else {
        code.to_string()
    }
}

/// Base sheet name for a department.
///
/// Uses the configured short code, otherwise the initials of the department's
/// words truncated to three characters.
#[must_use]
pub fn sheet_name(department: &str, curriculum: &Curriculum) -> String {
    let raw = curriculum.short_code(department).map_or_else(
        || {
            department
                .split_whitespace()
                .filter_map(|word| word.chars().next())
                .take(3)
                .collect::<String>()
        },
        str::to_string,
    );
    let cleaned = sanitize(&raw);
    if cleaned.is_empty() {
        "Sheet".to_string()
    } else {
        truncate(&cleaned, MAX_SHEET_NAME_LEN)
    }
}

/// Make `base` unique among `taken` (case-insensitive) with `_2`, `_3`, …
#[must_use]
pub fn unique_sheet_name(base: &str, taken: &[String]) -> String {
    let clashes = |candidate: &str| taken.iter().any(|t| t.eq_ignore_ascii_case(candidate));
    if !clashes(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| {
            let suffix = format!("_{n}");
            let stem = truncate(base, MAX_SHEET_NAME_LEN - suffix.len());
            format!("{stem}{suffix}")
        })
        .find(|candidate| !clashes(candidate))
        .unwrap_or_else(|| base.to_string())
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            other => other,
        })
        .collect::<String>()
        .trim_matches('\'')
        .to_string()
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

fn push_title_block(sheet: &mut Sheet, department: &str, context: &ExamContext) {
    let exam_date = if context.exam_date.is_empty() {
        "Unknown"
    } else {
        context.exam_date.as_str()
    };
    sheet.push_row(row![department]);
    sheet.push_row(row!["Semester", context.semester.to_string()]);
    sheet.push_row(row!["Exam Type", context.exam_type.to_string()]);
    sheet.push_row(row!["Exam Date", exam_date]);
    sheet.push_row(row!["Regular Batch", context.batch_label()]);
}

fn push_student_table(
    sheet: &mut Sheet,
    bucket: &DepartmentBucket,
    codes: &[&str],
    curriculum: &Curriculum,
) {
    let mut header: Row = vec![Cell::from("Register No")];
    header.extend(codes.iter().map(|c| Cell::from(subject_header(c, curriculum))));
    header.push(Cell::from("SGPA"));
    header.push(Cell::from("Failed Subjects"));
    sheet.push_row(header);

    for student in &bucket.students {
        let mut row: Row = vec![Cell::from(student.register_no.as_str())];
        row.extend(codes.iter().map(|code| {
            student
                .subjects
                .get(code)
                .map_or_else(|| Cell::from(NOT_TAKEN), |g| Cell::from(g.as_str()))
        }));
        row.push(Cell::from(student.sgpa_or_zero()));
        row.push(Cell::from(
            student.failed_subjects.clone().unwrap_or_default(),
        ));
        sheet.push_row(row);
    }
}

fn cohort_row(label: String, stats: &CohortStats) -> Row {
    row![
        label,
        stats.total,
        stats.pass_count,
        stats.fail_count,
        format!("{:.2}%", stats.pass_percentage()),
        stats.average_sgpa,
    ]
}

fn push_analysis_block(
    sheet: &mut Sheet,
    bucket: &DepartmentBucket,
    analysis: &DepartmentAnalysis,
    context: &ExamContext,
    options: &AssembleOptions,
) {
    let overall = &analysis.overall;
    sheet.push_row(row!["Department Analysis"]);
    sheet.push_row(row!["Total Students", overall.total]);
    sheet.push_row(row!["Pass Count", overall.pass_count]);
    sheet.push_row(row!["Fail Count", overall.fail_count]);
    sheet.push_row(row![
        "Pass Percentage",
        format!("{:.2}%", overall.pass_percentage())
    ]);
    sheet.push_row(row!["Average SGPA", overall.average_sgpa]);
    sheet.push_blank();

    sheet.push_row(row!["Regular vs Supplementary"]);
    sheet.push_row(row![
        "Cohort",
        "Students",
        "Pass Count",
        "Fail Count",
        "Pass %",
        "Average SGPA"
    ]);
    sheet.push_row(cohort_row(
        format!("Regular ({})", context.batch_label()),
        &analysis.regular,
    ));
    sheet.push_row(cohort_row("Supplementary".to_string(), &analysis.supplementary));
    sheet.push_blank();

    let threshold = options.topper_threshold;
    sheet.push_row(row![format!("Toppers (SGPA >= {threshold:.1})")]);
    sheet.push_row(row!["Register No", "SGPA", "Batch"]);
    let mut toppers: Vec<_> = bucket
        .students
        .iter()
        .filter(|s| s.sgpa_or_zero() >= threshold)
        .collect();
    // stable: equal SGPAs keep parse order
    toppers.sort_by(|a, b| b.sgpa_or_zero().total_cmp(&a.sgpa_or_zero()));
    if toppers.is_empty() {
        sheet.push_row(row![format!("No students with SGPA >= {threshold:.1}")]);
    }
    for student in toppers {
        let regular = is_regular_in(&student.register_no, context.batch_year);
        sheet.push_row(row![
            student.register_no.as_str(),
            student.sgpa_or_zero(),
            batch_label(regular),
        ]);
    }
    sheet.push_blank();

    sheet.push_row(row!["Grade Distribution"]);
    sheet.push_row(row!["Grade", "Count"]);
    for (grade, count) in analysis.grade_distribution.iter() {
        sheet.push_row(row![grade.as_str(), count]);
    }
    sheet.push_blank();

    sheet.push_row(row!["Subject-wise Analysis"]);
    sheet.push_row(row!["Subject", "Pass Count", "Fail Count", "Pass %"]);
    for subject in &analysis.subjects {
        sheet.push_row(row![
            subject.code.as_str(),
            subject.pass_count,
            subject.fail_count,
            format!("{:.2}%", subject.pass_percentage()),
        ]);
    }
    sheet.push_blank();
}

fn push_subject_credits(sheet: &mut Sheet, codes: &[&str], curriculum: &Curriculum) {
    sheet.push_row(row!["Subject Credits"]);
    sheet.push_row(row!["Subject", "Credits"]);
    for code in codes.iter().filter(|c| !curriculum.is_non_credit(c)) {
        let credits = curriculum
            .credits(code)
            .map_or_else(|| Cell::from(NOT_TAKEN), Cell::from);
        sheet.push_row(vec![Cell::from(*code), credits]);
    }
    sheet.push_blank();
}

fn push_notes(sheet: &mut Sheet, curriculum: &Curriculum) {
    sheet.push_row(row!["Note: * indicates non-credit course (NC)"]);
    sheet.push_row(row![
        "Non-credit courses:",
        curriculum.non_credit_courses.join(", ")
    ]);
    sheet.push_blank();

    sheet.push_row(row!["SGPA Calculation Details"]);
    sheet.push_row(row!["Formula: SGPA = Σ(Ci × GPi) / ΣCi"]);
    sheet.push_row(row!["Where Ci = Course Credits, GPi = Grade Points"]);
    sheet.push_blank();

    sheet.push_row(row!["Grade Points Scale"]);
    sheet.push_row(row!["Grade", "Points"]);
    for step in curriculum.grade_scale.iter().filter(|gp| gp.points > 0.0) {
        sheet.push_row(row![step.grade.as_str(), step.points]);
    }
}
