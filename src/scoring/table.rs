use crate::course::{ScoringMode, WeightTier};

/// One row of the grade-to-points table. A grade falls in the first band
/// whose `min` it reaches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeBand {
    pub min: f64,
    pub points: f64,
    pub letter: char,
}

impl GradeBand {
    pub fn matches(&self, grade: f64) -> bool {
        grade >= self.min
    }
}

/// Fixed 4.0 scale, highest band first. Boundaries belong to the higher band.
pub const GRADE_TABLE: [GradeBand; 5] = [
    GradeBand { min: 90.0, points: 4.0, letter: 'A' },
    GradeBand { min: 80.0, points: 3.0, letter: 'B' },
    GradeBand { min: 70.0, points: 2.0, letter: 'C' },
    GradeBand { min: 60.0, points: 1.0, letter: 'D' },
    GradeBand { min: f64::NEG_INFINITY, points: 0.0, letter: 'F' },
];

const FAILING: GradeBand = GRADE_TABLE[GRADE_TABLE.len() - 1];

/// Band a grade falls into. NaN lands in the failing band.
pub fn band_for(grade: f64) -> GradeBand {
    GRADE_TABLE
        .iter()
        .copied()
        .find(|band| band.matches(grade))
        .unwrap_or(FAILING)
}

/// Base points for a numeric grade, independent of weighting.
pub fn base_points(grade: f64) -> f64 {
    band_for(grade).points
}

impl WeightTier {
    /// Bonus added to base points. Always zero in unweighted mode.
    pub fn bonus(&self, mode: ScoringMode) -> f64 {
        match mode {
            ScoringMode::Unweighted => 0.0,
            ScoringMode::Weighted => match self {
                WeightTier::Normal => 0.0,
                WeightTier::Honors => 0.5,
                WeightTier::Ap => 1.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_points_a_band() {
        assert_eq!(base_points(90.0), 4.0);
        assert_eq!(base_points(95.5), 4.0);
        assert_eq!(base_points(100.0), 4.0);
    }

    #[test]
    fn test_base_points_middle_bands() {
        assert_eq!(base_points(89.999), 3.0);
        assert_eq!(base_points(80.0), 3.0);
        assert_eq!(base_points(79.5), 2.0);
        assert_eq!(base_points(70.0), 2.0);
        assert_eq!(base_points(69.0), 1.0);
        assert_eq!(base_points(60.0), 1.0);
    }

    #[test]
    fn test_base_points_failing() {
        assert_eq!(base_points(59.999), 0.0);
        assert_eq!(base_points(0.0), 0.0);
    }

    #[test]
    fn test_boundaries_map_to_higher_band() {
        for (grade, points) in [(90.0, 4.0), (80.0, 3.0), (70.0, 2.0), (60.0, 1.0)] {
            assert_eq!(base_points(grade), points, "grade {}", grade);
        }
    }

    #[test]
    fn test_band_letters() {
        assert_eq!(band_for(91.0).letter, 'A');
        assert_eq!(band_for(85.0).letter, 'B');
        assert_eq!(band_for(72.0).letter, 'C');
        assert_eq!(band_for(61.0).letter, 'D');
        assert_eq!(band_for(12.0).letter, 'F');
    }

    #[test]
    fn test_nan_is_failing() {
        assert_eq!(band_for(f64::NAN).letter, 'F');
    }

    #[test]
    fn test_weighted_bonus() {
        assert_eq!(WeightTier::Normal.bonus(ScoringMode::Weighted), 0.0);
        assert_eq!(WeightTier::Honors.bonus(ScoringMode::Weighted), 0.5);
        assert_eq!(WeightTier::Ap.bonus(ScoringMode::Weighted), 1.0);
    }

    #[test]
    fn test_unweighted_bonus_is_zero() {
        for tier in [WeightTier::Normal, WeightTier::Honors, WeightTier::Ap] {
            assert_eq!(tier.bonus(ScoringMode::Unweighted), 0.0);
        }
    }
}
