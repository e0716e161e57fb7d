//! Department-level aggregation
//!
//! Everything here is a pure function of the student list and batch year:
//! empty cohorts produce zero counts and zero averages rather than errors.

use crate::core::batch::is_regular_in;
use crate::core::grading::{has_failed, round2};
use crate::core::models::{Grade, StudentRecord};

/// Grade → count, in scale order followed by unrecognised tokens in first-seen order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeHistogram {
    counts: Vec<(Grade, usize)>,
}

impl Default for GradeHistogram {
    fn default() -> Self {
        Self {
            counts: Grade::SCALE.into_iter().map(|g| (g, 0)).collect(),
        }
    }
}

impl GradeHistogram {
    /// Count one occurrence of a grade
    pub fn record(&mut self, grade: &Grade) {
        if let Some((_, n)) = self.counts.iter_mut().find(|(g, _)| g == grade) {
            *n += 1;
        } else {
            self.counts.push((grade.clone(), 1));
        }
    }

    /// Count for a grade
    #[must_use]
    pub fn count(&self, grade: &Grade) -> usize {
        self.counts
            .iter()
            .find_map(|(g, n)| (g == grade).then_some(*n))
            .unwrap_or(0)
    }

    /// Iterate `(grade, count)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (&Grade, usize)> {
        self.counts.iter().map(|(g, n)| (g, *n))
    }

    /// Sum of all counts
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

/// Pass/fail figures for one subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectStats {
    /// Subject code
    pub code: String,
    /// Students who did not fail the subject
    pub pass_count: usize,
    /// Students graded F, FE or Absent
    pub fail_count: usize,
    /// Grades awarded for the subject
    pub grades: GradeHistogram,
}

impl SubjectStats {
    fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            pass_count: 0,
            fail_count: 0,
            grades: GradeHistogram::default(),
        }
    }

    /// Pass percentage rounded to two decimals (0 for no candidates)
    #[must_use]
    pub fn pass_percentage(&self) -> f64 {
        percentage(self.pass_count, self.pass_count + self.fail_count)
    }
}

/// Pass/fail/average figures for a group of students
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CohortStats {
    /// Students in the cohort
    pub total: usize,
    /// Students with no failed subject
    pub pass_count: usize,
    /// Students with at least one failed subject
    pub fail_count: usize,
    /// Mean SGPA rounded to two decimals (0 for an empty cohort)
    pub average_sgpa: f64,
}

impl CohortStats {
    fn from_students<'a>(students: impl IntoIterator<Item = &'a StudentRecord>) -> Self {
        let mut stats = Self::default();
        let mut sgpa_sum = 0.0;
        for student in students {
            stats.total += 1;
            sgpa_sum += student.sgpa_or_zero();
            if has_failed(student) {
                stats.fail_count += 1;
            } else {
                stats.pass_count += 1;
            }
        }
        stats.average_sgpa = average(sgpa_sum, stats.total);
        stats
    }

    /// Pass percentage rounded to two decimals (0 for an empty cohort)
    #[must_use]
    pub fn pass_percentage(&self) -> f64 {
        percentage(self.pass_count, self.total)
    }
}

/// Highest-SGPA student
#[derive(Debug, Clone, PartialEq)]
pub struct Topper {
    /// Register number
    pub register_no: String,
    /// SGPA
    pub sgpa: f64,
}

/// Aggregate figures for one department
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentAnalysis {
    /// Every student in the department
    pub overall: CohortStats,
    /// Students of the batch sitting this exam on schedule
    pub regular: CohortStats,
    /// Everyone else
    pub supplementary: CohortStats,
    /// Highest SGPA, first-seen on ties; `None` for an empty department
    pub topper: Option<Topper>,
    /// Grades across all subjects and students
    pub grade_distribution: GradeHistogram,
    /// Per-subject figures in first-seen order
    pub subjects: Vec<SubjectStats>,
}

impl DepartmentAnalysis {
    /// Total students
    #[must_use]
    pub const fn total_students(&self) -> usize {
        self.overall.total
    }

    /// Figures for a subject code
    #[must_use]
    pub fn subject(&self, code: &str) -> Option<&SubjectStats> {
        self.subjects.iter().find(|s| s.code == code)
    }
}

/// Aggregate a department's students, splitting by cohort.
///
/// Students are regular when their admission year matches `batch_year`; with
/// no batch year everyone counts as supplementary.
#[must_use]
pub fn analyze(students: &[StudentRecord], batch_year: Option<u32>) -> DepartmentAnalysis {
    let (regular, supplementary): (Vec<&StudentRecord>, Vec<&StudentRecord>) = students
        .iter()
        .partition(|s| is_regular_in(&s.register_no, batch_year));

    let mut topper: Option<Topper> = None;
    let mut grade_distribution = GradeHistogram::default();
    let mut subjects: Vec<SubjectStats> = Vec::new();

    for student in students {
        let sgpa = student.sgpa_or_zero();
        if topper.as_ref().is_none_or(|t| sgpa > t.sgpa) {
            topper = Some(Topper {
                register_no: student.register_no.clone(),
                sgpa,
            });
        }

        for (code, grade) in student.subjects.iter() {
            let idx = if let Some(idx) = subjects.iter().position(|s| s.code == code) {
                idx
            } else {
                subjects.push(SubjectStats::new(code));
                subjects.len() - 1
            };
            let stats = &mut subjects[idx];
            stats.grades.record(grade);
            if grade.is_failure() {
                stats.fail_count += 1;
            } else {
                stats.pass_count += 1;
            }
            grade_distribution.record(grade);
        }
    }

    DepartmentAnalysis {
        overall: CohortStats::from_students(students),
        regular: CohortStats::from_students(regular),
        supplementary: CohortStats::from_students(supplementary),
        topper,
        grade_distribution,
        subjects,
    }
}

#[allow(clippy::cast_precision_loss)]
fn average(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        round2(sum / count as f64)
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round2(part as f64 / whole as f64 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(reg: &str, sgpa: f64, grades: &[(&str, &str)]) -> StudentRecord {
        let mut record = StudentRecord::new(reg.to_string(), "CSE".to_string());
        for (code, grade) in grades {
            record.set_grade(*code, Grade::from(*grade));
        }
        record.sgpa = Some(sgpa);
        record.failed_subjects = Some(String::new());
        record
    }

    fn sample() -> Vec<StudentRecord> {
        vec![
            student("TCR22CS001", 9.1, &[("CST202", "S"), ("MCN202", "P")]),
            student("TCR22CS002", 6.0, &[("CST202", "F"), ("MCN202", "P")]),
            student("TCR21CS003", 9.1, &[("CST202", "A+"), ("MCN202", "Absent")]),
            student("TCR22CS004", 8.0, &[("CST202", "B+")]),
        ]
    }

    #[test]
    fn test_cohort_split() {
        let analysis = analyze(&sample(), Some(2022));

        assert_eq!(analysis.total_students(), 4);
        assert_eq!(analysis.overall.pass_count, 2);
        assert_eq!(analysis.overall.fail_count, 2);
        assert!((analysis.overall.average_sgpa - 8.05).abs() < 1e-9);
        assert!((analysis.overall.pass_percentage() - 50.0).abs() < 1e-9);

        assert_eq!(analysis.regular.total, 3);
        assert_eq!(analysis.regular.pass_count, 2);
        assert_eq!(analysis.regular.fail_count, 1);
        assert!((analysis.regular.average_sgpa - 7.7).abs() < 1e-9);

        assert_eq!(analysis.supplementary.total, 1);
        assert_eq!(analysis.supplementary.fail_count, 1);
    }

    #[test]
    fn test_topper_first_seen_on_tie() {
        let analysis = analyze(&sample(), Some(2022));
        let topper = analysis.topper.expect("topper");
        assert_eq!(topper.register_no, "TCR22CS001");
        assert!((topper.sgpa - 9.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_grade_and_subject_distribution() {
        let analysis = analyze(&sample(), Some(2022));

        assert_eq!(analysis.grade_distribution.count(&Grade::P), 2);
        assert_eq!(analysis.grade_distribution.count(&Grade::Absent), 1);
        assert_eq!(analysis.grade_distribution.total(), 7);

        let codes: Vec<_> = analysis.subjects.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, ["CST202", "MCN202"]);

        let cst = analysis.subject("CST202").expect("CST202");
        assert_eq!((cst.pass_count, cst.fail_count), (3, 1));
        assert!((cst.pass_percentage() - 75.0).abs() < 1e-9);
        assert_eq!(cst.grades.count(&Grade::F), 1);
    }

    #[test]
    fn test_unknown_batch_makes_everyone_supplementary() {
        let analysis = analyze(&sample(), None);
        assert_eq!(analysis.regular.total, 0);
        assert!(analysis.regular.average_sgpa.abs() < f64::EPSILON);
        assert_eq!(analysis.supplementary.total, 4);
    }

    #[test]
    fn test_empty_department() {
        let analysis = analyze(&[], Some(2022));
        assert_eq!(analysis.total_students(), 0);
        assert!(analysis.overall.average_sgpa.abs() < f64::EPSILON);
        assert!(analysis.overall.pass_percentage().abs() < f64::EPSILON);
        assert!(analysis.topper.is_none());
        assert!(analysis.subjects.is_empty());
    }

    #[test]
    fn test_unrecognised_grade_gets_its_own_bucket() {
        let students = vec![student("TCR22CS001", 5.0, &[("CST202", "W")])];
        let analysis = analyze(&students, Some(2022));
        let last = analysis.grade_distribution.iter().last().expect("entry");
        assert_eq!(last, (&Grade::Other("W".to_string()), 1));
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let students = sample();
        assert_eq!(analyze(&students, Some(22)), analyze(&students, Some(22)));
    }
}
