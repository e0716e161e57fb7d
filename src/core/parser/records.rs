//! Student record parser
//!
//! Walks the extracted text line by line with a two-state machine:
//!
//! | state        | line kind                 | action                                          | next         |
//! |--------------|---------------------------|-------------------------------------------------|--------------|
//! | any          | empty                     | skip                                            | unchanged    |
//! | any          | contains a register no.   | finalize current, start new, take grade tokens  | `Collecting` |
//! | `Collecting` | has grade tokens          | add tokens to current (last value wins)         | `Collecting` |
//! | `Collecting` | no grade tokens           | nothing                                         | `Idle`       |
//! | `Idle`       | anything else             | ignore                                          | `Idle`       |
//!
//! The trailing record is finalized at end of input.

use crate::core::error::CreditLookupMiss;
use crate::core::grading;
use crate::core::models::{Curriculum, DepartmentBuckets, Grade, StudentRecord};
use crate::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static REGISTER_NO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z]+\d{2}[A-Z]{2}\d{3})").unwrap());
static GRADE_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z]+\d{3})\(([A-Z+]+|Absent)\)").unwrap());
static DEPARTMENT_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z]+\d{2}([A-Z]{2})\d{3}").unwrap());

/// Department used when the register number carries no known department code
pub const OTHER_DEPARTMENT: &str = "OTHER";

/// Department name for a register number, `OTHER` when unknown
#[must_use]
pub fn department_of(register_no: &str, curriculum: &Curriculum) -> String {
    DEPARTMENT_CODE_RE
        .captures(register_no)
        .and_then(|caps| curriculum.department_name(&caps[1]))
        .unwrap_or(OTHER_DEPARTMENT)
        .to_string()
}

/// All `CODE(GRADE)` tokens on a line, in order
pub fn grade_tokens(line: &str) -> impl Iterator<Item = (&str, &str)> {
    GRADE_TOKEN_RE.captures_iter(line).map(|caps| {
        let (_, [code, grade]) = caps.extract();
        (code, grade)
    })
}

/// Everything the parser produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    /// Finalized records in parse order
    pub students: Vec<StudentRecord>,
    /// Distinct subject codes across all kept students
    pub subject_count: usize,
    /// Subjects that had no credit entry, per student
    pub credit_misses: Vec<CreditLookupMiss>,
    /// Register numbers seen without any grade token (not kept)
    pub dropped: Vec<String>,
}

impl ParseOutcome {
    /// Group the parsed students by department, preserving parse order
    #[must_use]
    pub fn into_buckets(self) -> DepartmentBuckets {
        DepartmentBuckets::from_records(self.students)
    }
}

/// Line-classification state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Waiting for the next register number; other lines are ignored
    Idle,
    /// Inside a student's grade block
    Collecting,
}

/// Incremental record builder behind [`parse_records`]
pub struct RecordParser<'a, F> {
    curriculum: &'a Curriculum,
    department_lookup: F,
    state: ParseState,
    current: Option<StudentRecord>,
    outcome: ParseOutcome,
    subjects_seen: HashSet<String>,
}

impl<'a, F> RecordParser<'a, F>
where
    F: Fn(&str) -> String,
{
    /// Create a parser that derives departments with `department_lookup`
    pub fn new(curriculum: &'a Curriculum, department_lookup: F) -> Self {
        Self {
            curriculum,
            department_lookup,
            state: ParseState::Idle,
            current: None,
            outcome: ParseOutcome::default(),
            subjects_seen: HashSet::new(),
        }
    }

    /// Current state of the line machine
    #[must_use]
    pub const fn state(&self) -> ParseState {
        self.state
    }

    /// Feed one raw line
    pub fn feed_line(&mut self, raw: &str) {
        let line = raw.trim();
        if line.is_empty() {
            return;
        }

        if let Some(caps) = REGISTER_NO_RE.captures(line) {
            self.finalize_current();
            let register_no = caps[1].to_string();
            let department = (self.department_lookup)(&register_no);
            let mut record = StudentRecord::new(register_no, department);
            Self::collect_grades(&mut record, line);
            self.current = Some(record);
            self.state = ParseState::Collecting;
            return;
        }

        if self.state == ParseState::Idle {
            return;
        }
        let Some(record) = self.current.as_mut() else {
            self.state = ParseState::Idle;
            return;
        };
        if !Self::collect_grades(record, line) {
            self.state = ParseState::Idle;
        }
    }

    /// Finalize the trailing record and return the outcome
    #[must_use]
    pub fn finish(mut self) -> ParseOutcome {
        self.finalize_current();
        self.outcome.subject_count = self.subjects_seen.len();
        self.outcome
    }

    /// Returns `true` if the line carried at least one grade token
    fn collect_grades(record: &mut StudentRecord, line: &str) -> bool {
        let mut found = false;
        for (code, grade) in grade_tokens(line) {
            record.set_grade(code, Grade::from(grade));
            found = true;
        }
        found
    }

    fn finalize_current(&mut self) {
        let Some(mut record) = self.current.take() else {
            return;
        };

        if record.subjects.is_empty() {
            warn!(
                "Dropping {}: no grades found for this register number",
                record.register_no
            );
            self.outcome.dropped.push(record.register_no);
            return;
        }

        let misses = grading::finalize(&mut record, self.curriculum);
        for miss in &misses {
            warn!("Credit lookup miss: {miss}; subject excluded from SGPA");
        }
        self.outcome.credit_misses.extend(misses);
        self.subjects_seen
            .extend(record.subjects.codes().map(str::to_string));

        debug!(
            "Parsed {} ({}) with {} subjects, SGPA {}",
            record.register_no,
            record.department,
            record.subjects.len(),
            record.sgpa_or_zero()
        );
        self.outcome.students.push(record);
    }
}

/// Parse every student record in `text`, deriving departments from the curriculum
#[must_use]
pub fn parse_records(text: &str, curriculum: &Curriculum) -> ParseOutcome {
    parse_records_with(text, curriculum, |reg| department_of(reg, curriculum))
}

/// Parse every student record in `text` with a custom department lookup
pub fn parse_records_with<F>(text: &str, curriculum: &Curriculum, department_lookup: F) -> ParseOutcome
where
    F: Fn(&str) -> String,
{
    let mut parser = RecordParser::new(curriculum, department_lookup);
    for line in text.lines() {
        parser.feed_line(line);
    }
    parser.finish()
}
