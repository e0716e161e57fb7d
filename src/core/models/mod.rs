//! Data models for `KtuAnalytics`

pub mod curriculum;
pub mod department;
pub mod exam;
pub mod grade;
pub mod student;

pub use curriculum::{Curriculum, GradePoint};
pub use department::{DepartmentBucket, DepartmentBuckets};
pub use exam::{ExamContext, ExamType, Semester};
pub use grade::Grade;
pub use student::{StudentRecord, SubjectGrades};
