//! Students grouped by department

use super::student::StudentRecord;

/// One department's students, in parse order
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentBucket {
    /// Department name
    pub name: String,
    /// Students in the order they appeared in the text
    pub students: Vec<StudentRecord>,
}

/// All departments, ordered by the first appearance of one of their students
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepartmentBuckets {
    buckets: Vec<DepartmentBucket>,
}

impl DepartmentBuckets {
    /// Create an empty grouping
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buckets: Vec::new(),
        }
    }

    /// Group records by their `department` field, preserving order
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = StudentRecord>) -> Self {
        let mut buckets = Self::new();
        for record in records {
            buckets.push(record);
        }
        buckets
    }

    /// Append a record to its department's bucket, creating the bucket on first use
    pub fn push(&mut self, record: StudentRecord) {
        if let Some(bucket) = self
            .buckets
            .iter_mut()
            .find(|b| b.name == record.department)
        {
            bucket.students.push(record);
        } else {
            self.buckets.push(DepartmentBucket {
                name: record.department.clone(),
                students: vec![record],
            });
        }
    }

    /// Look up a department's bucket
    #[must_use]
    pub fn get(&self, department: &str) -> Option<&DepartmentBucket> {
        self.buckets.iter().find(|b| b.name == department)
    }

    /// Iterate buckets in order
    pub fn iter(&self) -> std::slice::Iter<'_, DepartmentBucket> {
        self.buckets.iter()
    }

    /// Number of departments
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether no department has any student
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total students across all departments
    #[must_use]
    pub fn student_count(&self) -> usize {
        self.buckets.iter().map(|b| b.students.len()).sum()
    }
}

impl<'a> IntoIterator for &'a DepartmentBuckets {
    type Item = &'a DepartmentBucket;
    type IntoIter = std::slice::Iter<'a, DepartmentBucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
