use thiserror::Error;

/// Invalid input to the scoring function.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GpaError {
    #[error("cannot compute a GPA without any courses")]
    EmptyCourseList,

    #[error("courses[{index}].{field}: {value} is outside 0-100 (course '{name}')")]
    GradeOutOfRange {
        index: usize,
        name: String,
        field: &'static str,
        value: f64,
    },

    #[error("courses[{index}].{field}: grade is not a finite number (course '{name}')")]
    NonFiniteGrade {
        index: usize,
        name: String,
        field: &'static str,
    },
}
