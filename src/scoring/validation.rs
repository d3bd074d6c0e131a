use serde::{Deserialize, Serialize};

use super::error::GpaError;
use crate::course::{Course, GradeSource};

pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 100.0;

/// What to do with grades outside 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradePolicy {
    /// Fail with a validation error
    #[default]
    Reject,
    /// Pull finite grades back into 0-100 before scoring
    Clamp,
}

/// Check one grade field of a course. Returns the first problem found.
pub fn check_grade(index: usize, course: &Course, source: GradeSource) -> Result<(), GpaError> {
    let value = match source {
        GradeSource::Current => course.grade,
        GradeSource::Target => match course.target_grade {
            Some(t) => t,
            None => return Ok(()),
        },
    };

    if !value.is_finite() {
        return Err(GpaError::NonFiniteGrade {
            index,
            name: course.name.clone(),
            field: source.field_name(),
        });
    }
    if !(MIN_GRADE..=MAX_GRADE).contains(&value) {
        return Err(GpaError::GradeOutOfRange {
            index,
            name: course.name.clone(),
            field: source.field_name(),
            value,
        });
    }
    Ok(())
}

/// Validate a course list before scoring.
/// Target grades are only checked when `target` is set, since they play no
/// part in a current-only run.
/// Returns all validation errors at once (not just the first).
pub fn validate_courses(courses: &[Course], target: bool) -> Result<(), Vec<String>> {
    if courses.is_empty() {
        return Err(vec![GpaError::EmptyCourseList.to_string()]);
    }

    let sources: &[GradeSource] = if target {
        &[GradeSource::Current, GradeSource::Target]
    } else {
        &[GradeSource::Current]
    };

    let mut errors = Vec::new();
    for (i, course) in courses.iter().enumerate() {
        for &source in sources {
            if let Err(e) = check_grade(i, course, source) {
                errors.push(e.to_string());
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Apply the out-of-range policy in place. Returns how many grades changed.
/// Non-finite grades are left alone so validation still rejects them.
pub fn apply_grade_policy(courses: &mut [Course], policy: GradePolicy) -> usize {
    if policy == GradePolicy::Reject {
        return 0;
    }

    let mut clamped = 0;
    for course in courses.iter_mut() {
        if let Some(new) = clamp_grade(course.grade) {
            tracing::warn!("Clamped grade of '{}' from {} to {}", course.name, course.grade, new);
            course.grade = new;
            clamped += 1;
        }
        if let Some(target) = course.target_grade {
            if let Some(new) = clamp_grade(target) {
                tracing::warn!("Clamped target grade of '{}' from {} to {}", course.name, target, new);
                course.target_grade = Some(new);
                clamped += 1;
            }
        }
    }
    clamped
}

fn clamp_grade(value: f64) -> Option<f64> {
    if value.is_finite() && !(MIN_GRADE..=MAX_GRADE).contains(&value) {
        Some(value.clamp(MIN_GRADE, MAX_GRADE))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::WeightTier;

    fn course(grade: f64) -> Course {
        Course::new("Physics", grade, WeightTier::Normal)
    }

    #[test]
    fn test_valid_courses() {
        let courses = vec![course(0.0), course(100.0), course(72.5).with_target(88.0)];
        assert!(validate_courses(&courses, true).is_ok());
    }

    #[test]
    fn test_empty_courses() {
        let errors = validate_courses(&[], false).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("without any courses"));
    }

    #[test]
    fn test_grade_above_range() {
        let errors = validate_courses(&[course(104.0)], false).unwrap_err();
        assert!(errors[0].contains("courses[0].grade"));
        assert!(errors[0].contains("104"));
    }

    #[test]
    fn test_target_below_range() {
        let errors = validate_courses(&[course(80.0).with_target(-1.0)], true).unwrap_err();
        assert!(errors[0].contains("courses[0].target_grade"));
    }

    #[test]
    fn test_target_ignored_without_projection() {
        let courses = vec![course(80.0).with_target(120.0)];
        assert!(validate_courses(&courses, false).is_ok());

        let errors = validate_courses(&courses, true).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("courses[0].target_grade: 120"));
    }

    #[test]
    fn test_non_finite_grade() {
        let errors = validate_courses(&[course(f64::NAN)], false).unwrap_err();
        assert!(errors[0].contains("not a finite number"));
    }

    #[test]
    fn test_collects_all_errors() {
        let courses = vec![
            course(120.0),                   // Error 1
            course(90.0),
            course(-5.0).with_target(101.0), // Errors 2 and 3
        ];
        let errors = validate_courses(&courses, true).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[1].contains("courses[2].grade"));
        assert!(errors[2].contains("courses[2].target_grade"));
    }

    #[test]
    fn test_clamp_policy() {
        let mut courses = vec![course(105.0), course(-3.0).with_target(150.0), course(88.0)];
        let changed = apply_grade_policy(&mut courses, GradePolicy::Clamp);
        assert_eq!(changed, 3);
        assert_eq!(courses[0].grade, 100.0);
        assert_eq!(courses[1].grade, 0.0);
        assert_eq!(courses[1].target_grade, Some(100.0));
        assert_eq!(courses[2].grade, 88.0);
        assert!(validate_courses(&courses, true).is_ok());
    }

    #[test]
    fn test_clamp_leaves_nan() {
        let mut courses = vec![course(f64::NAN)];
        assert_eq!(apply_grade_policy(&mut courses, GradePolicy::Clamp), 0);
        assert!(validate_courses(&courses, false).is_err());
    }

    #[test]
    fn test_reject_policy_is_noop() {
        let mut courses = vec![course(105.0)];
        assert_eq!(apply_grade_policy(&mut courses, GradePolicy::Reject), 0);
        assert_eq!(courses[0].grade, 105.0);
    }
}
