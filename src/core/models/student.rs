//! Student record model

use super::grade::Grade;

/// Subject code → grade mapping that remembers first-insertion order.
///
/// Re-inserting a subject replaces its grade but keeps its original position,
/// so failed-subject lists and report columns follow the order subjects were
/// first printed for the student.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectGrades {
    entries: Vec<(String, Grade)>,
}

impl SubjectGrades {
    /// Create an empty mapping
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a grade for a subject. Returns the grade it replaced, if any.
    pub fn insert(&mut self, code: impl Into<String>, grade: Grade) -> Option<Grade> {
        let code = code.into();
        if let Some(slot) = self.entries.iter_mut().find(|(c, _)| *c == code) {
            return Some(std::mem::replace(&mut slot.1, grade));
        }
        self.entries.push((code, grade));
        None
    }

    /// Look up the grade for a subject
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Grade> {
        self.entries
            .iter()
            .find_map(|(c, g)| (c == code).then_some(g))
    }

    /// Iterate `(code, grade)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Grade)> {
        self.entries.iter().map(|(c, g)| (c.as_str(), g))
    }

    /// Iterate subject codes in insertion order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    /// Number of subjects
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no subject has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One student's row on the result sheet
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    /// University register number (e.g. `TCR22CS061`)
    pub register_no: String,

    /// Department name derived from the register number
    pub department: String,

    /// Grades keyed by subject code
    pub subjects: SubjectGrades,

    /// Semester grade point average, `None` until the record is finalized
    pub sgpa: Option<f64>,

    /// Comma-separated failed subject codes, `None` until the record is finalized
    pub failed_subjects: Option<String>,
}

impl StudentRecord {
    /// Start a record with no subjects
    #[must_use]
    pub const fn new(register_no: String, department: String) -> Self {
        Self {
            register_no,
            department,
            subjects: SubjectGrades::new(),
            sgpa: None,
            failed_subjects: None,
        }
    }

    /// Record a subject grade (last value wins)
    pub fn set_grade(&mut self, code: impl Into<String>, grade: Grade) {
        self.subjects.insert(code, grade);
    }

    /// Whether SGPA and the failed-subject list have been computed
    #[must_use]
    pub const fn is_finalized(&self) -> bool {
        self.sgpa.is_some() && self.failed_subjects.is_some()
    }

    /// SGPA, treating an unfinalized record as 0
    #[must_use]
    pub fn sgpa_or_zero(&self) -> f64 {
        self.sgpa.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_empty_and_unfinalized() {
        let record = StudentRecord::new("TCR22CS061".to_string(), "CSE".to_string());
        assert!(record.subjects.is_empty());
        assert!(!record.is_finalized());
        assert!(record.sgpa_or_zero().abs() < f64::EPSILON);
    }

    #[test]
    fn test_duplicate_subject_keeps_position_and_takes_last_grade() {
        let mut subjects = SubjectGrades::new();
        subjects.insert("CST201", Grade::B);
        subjects.insert("CST203", Grade::S);
        let replaced = subjects.insert("CST201", Grade::A);

        assert_eq!(replaced, Some(Grade::B));
        assert_eq!(subjects.get("CST201"), Some(&Grade::A));
        assert_eq!(subjects.codes().collect::<Vec<_>>(), ["CST201", "CST203"]);
        assert_eq!(subjects.len(), 2);
    }
}
