use serde::{Deserialize, Serialize};
use std::fmt;

/// Weighting tier of a course. Honors and AP courses earn a bonus on top
/// of the base points when scoring in weighted mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightTier {
    #[default]
    Normal,
    #[serde(alias = "honours")]
    Honors,
    #[serde(alias = "AP")]
    Ap,
}

impl WeightTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightTier::Normal => "normal",
            WeightTier::Honors => "honors",
            WeightTier::Ap => "ap",
        }
    }
}

impl fmt::Display for WeightTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether tier bonuses are added to the base points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    #[default]
    Weighted,
    Unweighted,
}

impl ScoringMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMode::Weighted => "weighted",
            ScoringMode::Unweighted => "unweighted",
        }
    }
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which grade field of a course is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeSource {
    Current,
    /// Falls back to the current grade when no target is set.
    Target,
}

impl GradeSource {
    pub fn field_name(&self) -> &'static str {
        match self {
            GradeSource::Current => "grade",
            GradeSource::Target => "target_grade",
        }
    }
}

/// A single course row.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Course {
    pub name: String,

    /// Numeric grade, 0-100
    pub grade: f64,

    #[serde(default)]
    pub weight: WeightTier,

    /// Hypothetical grade used by target projections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_grade: Option<f64>,
}

impl Course {
    pub fn new(name: impl Into<String>, grade: f64, weight: WeightTier) -> Self {
        Self {
            name: name.into(),
            grade,
            weight,
            target_grade: None,
        }
    }

    pub fn with_target(mut self, target: f64) -> Self {
        self.target_grade = Some(target);
        self
    }

    /// The grade scored for `source`.
    pub fn active_grade(&self, source: GradeSource) -> f64 {
        match source {
            GradeSource::Current => self.grade,
            GradeSource::Target => self.target_grade.unwrap_or(self.grade),
        }
    }
}

/// The worksheet a fresh session starts with.
pub fn default_courses() -> Vec<Course> {
    vec![
        Course::new("Course 1", 75.0, WeightTier::Normal),
        Course::new("Course 2", 80.0, WeightTier::Normal),
    ]
}

/// Name given to a course added without one ("Course N").
pub fn next_course_name(courses: &[Course]) -> String {
    format!("Course {}", courses.len() + 1)
}
