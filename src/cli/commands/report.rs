//! Report command handler
//!
//! Runs the full pipeline on a result document and writes the workbook.

use super::{load_curriculum, read_input};
use chrono::Local;
use ktu_analytics::config::Config;
use ktu_analytics::core::extract::extractor_for;
use ktu_analytics::core::pipeline::{generate_report, ReportRequest, ReportSummary};
use ktu_analytics::core::report::{AssembleOptions, WorkbookFormat};
use ktu_analytics::{error, info, verbose};
use std::fs;
use std::path::{Path, PathBuf};

/// Options for a single report run
pub struct ReportArgs<'a> {
    /// Result PDF or extracted text
    pub input_file: &'a Path,
    /// Output file or directory
    pub output: Option<&'a Path>,
    /// Workbook format name
    pub format: Option<&'a str>,
    /// Curriculum tables file
    pub curriculum: Option<&'a Path>,
    /// Minimum SGPA for the topper list
    pub topper_threshold: Option<f64>,
}

/// Run the report command.
pub fn run(args: &ReportArgs<'_>, config: &Config) {
    match generate(args, config) {
        Ok((path, summary)) => {
            println!("✓ Report generated: {}", path.display());
            print_summary(&summary);
        }
        Err(err) => {
            error!(
                "Report generation failed for {}: {err}",
                args.input_file.display()
            );
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

fn generate(args: &ReportArgs<'_>, config: &Config) -> Result<(PathBuf, ReportSummary), String> {
    let format = match args.format {
        Some(name) => name.parse::<WorkbookFormat>(),
        None => config.workbook_format(),
    }
    .map_err(|e| format!("✗ {e}"))?;

    let curriculum = load_curriculum(args.curriculum, config)?;
    let bytes = read_input(args.input_file, config.report.max_input_bytes)?;

    let file_name = args.input_file.to_string_lossy();
    let extractor = extractor_for(&file_name);
    let writer = format.writer();
    let request = ReportRequest {
        curriculum: &curriculum,
        extractor: extractor.as_ref(),
        writer: writer.as_ref(),
        date: Local::now().date_naive(),
        options: AssembleOptions {
            topper_threshold: args
                .topper_threshold
                .unwrap_or(config.report.topper_threshold),
        },
        max_input_bytes: Some(config.report.max_input_bytes),
    };

    let report = generate_report(&bytes, &request).map_err(|e| format!("✗ {e}"))?;
    let output_path = resolve_output_path(args.output, &config.paths.reports_dir, &report.file_name);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                format!(
                    "✗ Failed to create output directory {}: {e}",
                    parent.display()
                )
            })?;
        }
    }
    fs::write(&output_path, &report.content)
        .map_err(|e| format!("✗ Failed to write {}: {e}", output_path.display()))?;

    info!(
        "Wrote {} ({} bytes, format {format})",
        output_path.display(),
        report.content.len()
    );
    Ok((output_path, report.summary))
}

/// Where to write the workbook.
///
/// An explicit output that is an existing directory (or ends with a path
/// separator) receives the generated file name; any other explicit output is
/// used as-is. Without one, the workbook goes into `reports_dir`.
fn resolve_output_path(output: Option<&Path>, reports_dir: &str, file_name: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() || path.to_string_lossy().ends_with(['/', '\\']) => {
            path.join(file_name)
        }
        Some(path) => path.to_path_buf(),
        None if reports_dir.is_empty() => PathBuf::from(file_name),
        None => Path::new(reports_dir).join(file_name),
    }
}

fn print_summary(summary: &ReportSummary) {
    println!("\n=== Summary ===");
    println!(
        "Exam: {} {} ({})",
        summary.context.semester,
        summary.context.exam_type,
        if summary.context.exam_date.is_empty() {
            "date unknown"
        } else {
            summary.context.exam_date.as_str()
        }
    );
    println!("Regular batch: {}", summary.context.batch_label());
    println!(
        "Students: {} across {} departments, {} subjects",
        summary.student_count,
        summary.departments.len(),
        summary.subject_count
    );

    if !summary.credit_misses.is_empty() {
        println!(
            "⚠️  {} subject entries had no credit value and were left out of SGPA",
            summary.credit_misses.len()
        );
        for miss in &summary.credit_misses {
            verbose!("  {miss}");
        }
    }
    if !summary.dropped.is_empty() {
        println!(
            "⚠️  {} register numbers had no grades and were skipped",
            summary.dropped.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_defaults_to_reports_dir() {
        let path = resolve_output_path(None, "/srv/reports", "results_S4_2024-06-01.xlsx");
        assert_eq!(path, PathBuf::from("/srv/reports/results_S4_2024-06-01.xlsx"));
    }

    #[test]
    fn test_output_without_reports_dir() {
        let path = resolve_output_path(None, "", "results_S4_2024-06-01.md");
        assert_eq!(path, PathBuf::from("results_S4_2024-06-01.md"));
    }

    #[test]
    fn test_explicit_file_output() {
        let path = resolve_output_path(Some(Path::new("out/cse.xlsx")), "/srv", "generated.xlsx");
        assert_eq!(path, PathBuf::from("out/cse.xlsx"));
    }

    #[test]
    fn test_explicit_directory_output() {
        let temp = TempDir::new().expect("temp dir");
        let path = resolve_output_path(Some(temp.path()), "/srv", "generated.xlsx");
        assert_eq!(path, temp.path().join("generated.xlsx"));

        let path = resolve_output_path(Some(Path::new("not-yet/")), "/srv", "generated.xlsx");
        assert_eq!(path, PathBuf::from("not-yet/generated.xlsx"));
    }
}
