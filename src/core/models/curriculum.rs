//! Static curriculum tables: grade scale, departments, credits

use super::grade::Grade;
use crate::core::error::CurriculumError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Curriculum tables compiled into the binary
const CURRICULUM_DEFAULTS: &str = include_str!("../../assets/DefaultCurriculum.toml");

/// One step of the grade scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradePoint {
    /// Grade token (e.g. `A+`)
    pub grade: String,
    /// Points awarded for the grade
    pub points: f64,
}

/// Immutable lookup tables consumed by the parser, calculator and report.
///
/// Built once at startup and passed by reference; nothing mutates it while a
/// result sheet is being processed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Curriculum {
    /// Courses counted for pass/fail but excluded from SGPA
    #[serde(default)]
    pub non_credit_courses: Vec<String>,

    /// Grade → points, best grade first
    #[serde(default)]
    pub grade_scale: Vec<GradePoint>,

    /// Register-number department code (e.g. `CS`) → department name
    #[serde(default)]
    pub departments: BTreeMap<String, String>,

    /// Subject code → credits
    #[serde(default)]
    pub subject_credits: HashMap<String, u32>,

    /// Department name → short sheet name
    #[serde(default)]
    pub short_codes: HashMap<String, String>,
}

impl Curriculum {
    /// Parse curriculum tables from a TOML string
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or doesn't match the schema
    pub fn from_toml(toml_str: &str) -> Result<Self, CurriculumError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load curriculum tables from a TOML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file(path: &Path) -> Result<Self, CurriculumError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// The tables bundled with the binary
    ///
    /// # Panics
    /// Panics if the embedded defaults are invalid TOML, which would be a build defect.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CURRICULUM_DEFAULTS)
            .expect("Failed to parse compiled-in curriculum tables")
    }

    /// Grade points for a grade; grades missing from the scale earn 0
    #[must_use]
    pub fn grade_points(&self, grade: &Grade) -> f64 {
        self.grade_scale
            .iter()
            .find(|gp| gp.grade == grade.as_str())
            .map_or(0.0, |gp| gp.points)
    }

    /// Credits for a subject, `None` on a lookup miss
    #[must_use]
    pub fn credits(&self, subject: &str) -> Option<u32> {
        self.subject_credits.get(subject).copied()
    }

    /// Whether a subject is a non-credit course
    #[must_use]
    pub fn is_non_credit(&self, subject: &str) -> bool {
        self.non_credit_courses.iter().any(|c| c == subject)
    }

    /// Department name for a two-letter department code
    #[must_use]
    pub fn department_name(&self, code: &str) -> Option<&str> {
        self.departments.get(code).map(String::as_str)
    }

    /// Configured short sheet name for a department
    #[must_use]
    pub fn short_code(&self, department: &str) -> Option<&str> {
        self.short_codes.get(department).map(String::as_str)
    }

    /// Builder-style helper to register a subject's credits
    #[must_use]
    pub fn with_credit(mut self, subject: &str, credits: u32) -> Self {
        self.subject_credits.insert(subject.to_string(), credits);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load() {
        let curriculum = Curriculum::from_defaults();
        assert_eq!(curriculum.grade_scale.len(), 13);
        assert_eq!(curriculum.credits("CST202"), Some(4));
        assert_eq!(curriculum.credits("CST201"), None);
        assert!(curriculum.is_non_credit("MCN202"));
        assert_eq!(
            curriculum.department_name("CS"),
            Some("COMPUTER SCIENCE & ENGINEERING")
        );
        assert_eq!(curriculum.short_code("CIVIL ENGINEERING"), Some("CE"));
    }

    #[test]
    fn test_grade_points() {
        let curriculum = Curriculum::from_defaults();
        assert!((curriculum.grade_points(&Grade::S) - 10.0).abs() < f64::EPSILON);
        assert!((curriculum.grade_points(&Grade::APlus) - 9.0).abs() < f64::EPSILON);
        assert!((curriculum.grade_points(&Grade::P) - 5.5).abs() < f64::EPSILON);
        assert!(curriculum.grade_points(&Grade::Absent).abs() < f64::EPSILON);
        let unknown = Grade::Other("Z".to_string());
        assert!(curriculum.grade_points(&unknown).abs() < f64::EPSILON);
    }

    #[test]
    fn test_custom_tables_replace_defaults() {
        let curriculum = Curriculum::from_toml(
            r#"
non_credit_courses = ["MCN301"]

[[grade_scale]]
grade = "S"
points = 10.0

[subject_credits]
CST301 = 3
"#,
        )
        .expect("valid curriculum");

        assert_eq!(curriculum.credits("CST301"), Some(3));
        assert_eq!(curriculum.credits("CST202"), None);
        assert!(curriculum.departments.is_empty());
        assert!(curriculum.grade_points(&Grade::A).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(Curriculum::from_toml("subject_credits = 5").is_err());
    }
}
