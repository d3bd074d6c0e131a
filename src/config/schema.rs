use serde::{Deserialize, Serialize};

use crate::course::{Course, ScoringMode};
use crate::scoring::GradePolicy;

pub const DEFAULT_PRECISION: usize = 2;
pub const MAX_PRECISION: usize = 6;

/// User preferences (~/.config/gpa-calc/config.yaml).
///
/// Example YAML:
/// ```yaml
/// mode: weighted
/// out_of_range: clamp
/// precision: 2
/// colors: auto
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Scoring mode used when neither the CLI nor the worksheet sets one
    #[serde(default)]
    pub mode: ScoringMode,

    /// Handling of grades outside 0-100
    #[serde(default)]
    pub out_of_range: GradePolicy,

    /// Decimal places shown for GPA values
    #[serde(default = "default_precision")]
    pub precision: usize,

    #[serde(default)]
    pub colors: ColorChoice,
}

fn default_precision() -> usize {
    DEFAULT_PRECISION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: ScoringMode::default(),
            out_of_range: GradePolicy::default(),
            precision: DEFAULT_PRECISION,
            colors: ColorChoice::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

/// A list of courses to score, optionally pinning the mode and target
/// projection.
///
/// Example YAML:
/// ```yaml
/// mode: weighted
/// target: true
/// courses:
///   - { name: Chemistry, grade: 88, weight: ap, target_grade: 93 }
///   - { name: History, grade: 74 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Worksheet {
    #[serde(default)]
    pub mode: Option<ScoringMode>,

    #[serde(default)]
    pub target: Option<bool>,

    pub courses: Vec<Course>,
}
