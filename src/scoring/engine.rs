use serde::Serialize;

use super::error::GpaError;
use super::table::band_for;
use super::validation::check_grade;
use crate::course::{Course, GradeSource, ScoringMode};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseScore {
    pub name: String,
    pub grade: f64,       // Active grade for this run
    pub letter: char,     // Band letter, e.g. 'B'
    pub base_points: f64, // From the grade table
    pub bonus: f64,       // Tier bonus (0 when unweighted)
    pub points: f64,      // base_points + bonus
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub gpa: f64,
    pub mode: ScoringMode,
    pub source: GradeSource,
    pub courses: Vec<CourseScore>,
}

/// Current and target GPA for the same course list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub current: ScoreResult,
    pub target: ScoreResult,
}

/// Points earned by one course: base points for the active grade plus the
/// tier bonus.
pub fn course_points(course: &Course, mode: ScoringMode, source: GradeSource) -> f64 {
    let grade = course.active_grade(source);
    band_for(grade).points + course.weight.bonus(mode)
}

/// Score every course and average the points.
///
/// Fails on an empty list or on an active grade that is non-finite or
/// outside 0-100, so the result always lies in 0.0..=5.0.
pub fn score_courses(
    courses: &[Course],
    mode: ScoringMode,
    source: GradeSource,
) -> Result<ScoreResult, GpaError> {
    if courses.is_empty() {
        return Err(GpaError::EmptyCourseList);
    }

    let mut scores = Vec::with_capacity(courses.len());
    let mut total = 0.0;

    for (i, course) in courses.iter().enumerate() {
        check_grade(i, course, GradeSource::Current)?;
        if source == GradeSource::Target {
            check_grade(i, course, GradeSource::Target)?;
        }

        let grade = course.active_grade(source);
        let band = band_for(grade);
        let bonus = course.weight.bonus(mode);
        let points = band.points + bonus;
        total += points;

        tracing::debug!(
            course = %course.name,
            grade,
            weight = %course.weight,
            points,
            "scored course"
        );

        scores.push(CourseScore {
            name: course.name.clone(),
            grade,
            letter: band.letter,
            base_points: band.points,
            bonus,
            points,
        });
    }

    Ok(ScoreResult {
        gpa: total / courses.len() as f64,
        mode,
        source,
        courses: scores,
    })
}

/// Compute the GPA of a course list. The one shared reduction behind both
/// current and target figures.
pub fn compute_gpa(
    courses: &[Course],
    mode: ScoringMode,
    source: GradeSource,
) -> Result<f64, GpaError> {
    score_courses(courses, mode, source).map(|r| r.gpa)
}

/// Evaluate the course list twice: once on current grades and once on
/// target grades (falling back to the current grade where none is set).
pub fn project(courses: &[Course], mode: ScoringMode) -> Result<Projection, GpaError> {
    Ok(Projection {
        current: score_courses(courses, mode, GradeSource::Current)?,
        target: score_courses(courses, mode, GradeSource::Target)?,
    })
}
