pub mod engine;
pub mod error;
pub mod table;
pub mod validation;

pub use engine::{compute_gpa, course_points, project, score_courses, CourseScore, Projection, ScoreResult};
pub use error::GpaError;
pub use table::{band_for, base_points, GradeBand, GRADE_TABLE};
pub use validation::{apply_grade_policy, validate_courses, GradePolicy};
