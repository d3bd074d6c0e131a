pub mod parse;
pub mod types;

pub use types::{default_courses, next_course_name, Course, GradeSource, ScoringMode, WeightTier};
