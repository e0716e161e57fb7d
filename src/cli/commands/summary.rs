//! Summary command handler
//!
//! Parses a result document and prints the per-department analysis without
//! writing a workbook.

use super::{load_curriculum, read_input};
use ktu_analytics::config::Config;
use ktu_analytics::core::analysis::CohortStats;
use ktu_analytics::core::extract::extractor_for;
use ktu_analytics::core::pipeline::{parse_results, summarize, ReportSummary};
use ktu_analytics::error;
use std::path::Path;

/// Run the summary command.
pub fn run(input_file: &Path, curriculum: Option<&Path>, config: &Config) {
    match build(input_file, curriculum, config) {
        Ok(summary) => print!("{}", render(&summary)),
        Err(err) => {
            error!("Summary failed for {}: {err}", input_file.display());
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

fn build(
    input_file: &Path,
    curriculum: Option<&Path>,
    config: &Config,
) -> Result<ReportSummary, String> {
    let curriculum = load_curriculum(curriculum, config)?;
    let bytes = read_input(input_file, config.report.max_input_bytes)?;
    let text = extractor_for(&input_file.to_string_lossy())
        .extract_text(&bytes)
        .map_err(|e| format!("✗ {e}"))?;
    let parsed = parse_results(&text, &curriculum).map_err(|e| format!("✗ {e}"))?;
    Ok(summarize(&parsed))
}

fn cohort_line(label: &str, stats: &CohortStats) -> String {
    format!(
        "  {label:<14} {:>4} students  {:>4} pass  {:>4} fail  {:>7.2}%  avg {:.2}\n",
        stats.total,
        stats.pass_count,
        stats.fail_count,
        stats.pass_percentage(),
        stats.average_sgpa
    )
}

/// Plain-text rendering of a run summary
fn render(summary: &ReportSummary) -> String {
    let mut out = String::new();
    let ctx = &summary.context;
    out.push_str(&format!(
        "\n=== {} {} Examination {} ===\n",
        ctx.semester, ctx.exam_type, ctx.exam_date
    ));
    out.push_str(&format!("Regular batch: {}\n", ctx.batch_label()));
    out.push_str(&format!(
        "Students: {}  Departments: {}  Subjects: {}\n",
        summary.student_count,
        summary.departments.len(),
        summary.subject_count
    ));

    for dept in &summary.departments {
        let a = &dept.analysis;
        out.push_str(&format!("\n{}\n", dept.name));
        out.push_str(&cohort_line("Overall", &a.overall));
        out.push_str(&cohort_line("Regular", &a.regular));
        out.push_str(&cohort_line("Supplementary", &a.supplementary));
        if let Some(topper) = &a.topper {
            out.push_str(&format!(
                "  Topper: {} ({:.2})\n",
                topper.register_no, topper.sgpa
            ));
        }
        let weakest = a
            .subjects
            .iter()
            .min_by(|x, y| x.pass_percentage().total_cmp(&y.pass_percentage()));
        if let Some(subject) = weakest {
            out.push_str(&format!(
                "  Lowest pass rate: {} ({:.2}%)\n",
                subject.code,
                subject.pass_percentage()
            ));
        }
    }

    if !summary.credit_misses.is_empty() {
        out.push_str(&format!(
            "\n⚠️  {} subject entries had no credit value and were left out of SGPA\n",
            summary.credit_misses.len()
        ));
    }
    out
}
