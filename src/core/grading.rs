//! SGPA and pass/fail computation for a single student
//!
//! SGPA = Σ(Cᵢ × GPᵢ) / ΣCᵢ over credited subjects, rounded to two decimals.
//! Non-credit courses never enter the sum, and neither do subjects missing
//! from the credit table; the latter are returned as [`CreditLookupMiss`]es.

use crate::core::error::CreditLookupMiss;
use crate::core::models::{Curriculum, StudentRecord};
use crate::debug;

/// Result of an SGPA computation
#[derive(Debug, Clone, PartialEq)]
pub struct SgpaOutcome {
    /// SGPA rounded to two decimals (0 when no credits were counted)
    pub sgpa: f64,
    /// Sum of credits that entered the average
    pub counted_credits: u32,
    /// Subjects skipped because the credit table has no entry for them
    pub misses: Vec<CreditLookupMiss>,
}

/// Round to two decimal places
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute a student's credit-weighted SGPA.
///
/// Unknown grade tokens earn 0 points but still count their credits.
#[must_use]
pub fn compute_sgpa(record: &StudentRecord, curriculum: &Curriculum) -> SgpaOutcome {
    let mut weighted_points = 0.0;
    let mut counted_credits: u32 = 0;
    let mut misses = Vec::new();

    for (code, grade) in record.subjects.iter() {
        if curriculum.is_non_credit(code) {
            continue;
        }
        let Some(credits) = curriculum.credits(code) else {
            misses.push(CreditLookupMiss {
                register_no: record.register_no.clone(),
                subject: code.to_string(),
            });
            continue;
        };

        let points = curriculum.grade_points(grade);
        weighted_points += f64::from(credits) * points;
        counted_credits += credits;

        debug!(
            "{}: {code} credits={credits} grade={grade} points={points}",
            record.register_no
        );
    }

    let sgpa = if counted_credits > 0 {
        round2(weighted_points / f64::from(counted_credits))
    } else {
        0.0
    };

    debug!(
        "{}: weighted={weighted_points} credits={counted_credits} sgpa={sgpa}",
        record.register_no
    );

    SgpaOutcome {
        sgpa,
        counted_credits,
        misses,
    }
}

/// Failed subject codes joined with `", "`, non-credit courses marked with `*`.
///
/// Empty when the student passed everything.
#[must_use]
pub fn failed_subjects(record: &StudentRecord, curriculum: &Curriculum) -> String {
    record
        .subjects
        .iter()
        .filter(|(_, grade)| grade.is_failure())
        .map(|(code, _)| {
            if curriculum.is_non_credit(code) {
                format!("{code}*")
            } else {
                code.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Whether the student failed any subject, credited or not
#[must_use]
pub fn has_failed(record: &StudentRecord) -> bool {
    record.subjects.iter().any(|(_, grade)| grade.is_failure())
}

/// Fill in `sgpa` and `failed_subjects`, returning any credit lookup misses
pub fn finalize(record: &mut StudentRecord, curriculum: &Curriculum) -> Vec<CreditLookupMiss> {
    let outcome = compute_sgpa(record, curriculum);
    record.sgpa = Some(outcome.sgpa);
    record.failed_subjects = Some(failed_subjects(record, curriculum));
    outcome.misses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Grade;

    fn curriculum() -> Curriculum {
        Curriculum::from_defaults()
            .with_credit("CST201", 4)
            .with_credit("CST203", 4)
            .with_credit("CST205", 3)
    }

    fn student(grades: &[(&str, Grade)]) -> StudentRecord {
        let mut record = StudentRecord::new("TCR22CS061".to_string(), "CSE".to_string());
        for (code, grade) in grades {
            record.set_grade(*code, grade.clone());
        }
        record
    }

    #[test]
    fn test_weighted_average() {
        // (4*8.5 + 4*8 + 3*10) / 11 = 96 / 11 = 8.727...
        let record = student(&[
            ("CST201", Grade::A),
            ("CST203", Grade::BPlus),
            ("CST205", Grade::S),
        ]);
        let outcome = compute_sgpa(&record, &curriculum());
        assert!((outcome.sgpa - 8.73).abs() < 1e-9);
        assert_eq!(outcome.counted_credits, 11);
        assert!(outcome.misses.is_empty());
    }

    #[test]
    fn test_non_credit_and_unknown_subjects_are_excluded() {
        let record = student(&[
            ("CST201", Grade::S),
            ("MCN202", Grade::F),
            ("XYZ999", Grade::F),
        ]);
        let outcome = compute_sgpa(&record, &curriculum());
        assert!((outcome.sgpa - 10.0).abs() < f64::EPSILON);
        assert_eq!(outcome.counted_credits, 4);
        assert_eq!(
            outcome.misses,
            vec![CreditLookupMiss {
                register_no: "TCR22CS061".to_string(),
                subject: "XYZ999".to_string(),
            }]
        );
    }

    #[test]
    fn test_zero_credits_yields_zero() {
        let record = student(&[("MCN202", Grade::S), ("ABC123", Grade::S)]);
        let outcome = compute_sgpa(&record, &curriculum());
        assert!(outcome.sgpa.abs() < f64::EPSILON);
        assert_eq!(outcome.counted_credits, 0);
    }

    #[test]
    fn test_unknown_grade_counts_credits_with_zero_points() {
        let record = student(&[("CST201", Grade::S), ("CST203", Grade::from("W"))]);
        let outcome = compute_sgpa(&record, &curriculum());
        assert!((outcome.sgpa - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_failed_subjects_order_and_marker() {
        let record = student(&[
            ("CST203", Grade::Absent),
            ("CST201", Grade::A),
            ("MCN202", Grade::FE),
            ("CST205", Grade::F),
            ("CST207", Grade::I),
        ]);
        assert_eq!(
            failed_subjects(&record, &curriculum()),
            "CST203, MCN202*, CST205"
        );
        assert!(has_failed(&record));
    }

    #[test]
    fn test_non_credit_failure_still_fails_student() {
        let record = student(&[("CST201", Grade::S), ("MCN202", Grade::F)]);
        assert!(has_failed(&record));
        assert_eq!(failed_subjects(&record, &curriculum()), "MCN202*");
    }

    #[test]
    fn test_has_failed_matches_failed_subjects() {
        let cases = [
            student(&[("CST201", Grade::S)]),
            student(&[("CST201", Grade::F)]),
            student(&[("CST201", Grade::I), ("CST203", Grade::P)]),
            student(&[("XYZ111", Grade::Absent)]),
        ];
        for record in &cases {
            assert_eq!(
                has_failed(record),
                !failed_subjects(record, &curriculum()).is_empty()
            );
        }
    }

    #[test]
    fn test_finalize_sets_fields() {
        let mut record = student(&[("CST201", Grade::B), ("NOPE100", Grade::A)]);
        let misses = finalize(&mut record, &curriculum());
        assert!(record.is_finalized());
        assert_eq!(record.sgpa, Some(7.5));
        assert_eq!(record.failed_subjects.as_deref(), Some(""));
        assert_eq!(misses.len(), 1);
    }

    #[test]
    fn test_sgpa_stays_in_range() {
        let all_grades = Grade::SCALE;
        for grade in all_grades {
            let record = student(&[("CST201", grade.clone()), ("CST205", Grade::S)]);
            let sgpa = compute_sgpa(&record, &curriculum()).sgpa;
            assert!((0.0..=10.0).contains(&sgpa), "{grade} gave {sgpa}");
        }
    }
}
