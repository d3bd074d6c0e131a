use anyhow::{bail, Context, Result};
use std::str::FromStr;

use super::types::{Course, ScoringMode, WeightTier};

impl FromStr for WeightTier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "normal" | "regular" => Ok(WeightTier::Normal),
            "honors" | "honours" => Ok(WeightTier::Honors),
            "ap" => Ok(WeightTier::Ap),
            other => bail!("Unknown weight tier '{}' (expected normal, honors or ap)", other),
        }
    }
}

impl FromStr for ScoringMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weighted" => Ok(ScoringMode::Weighted),
            "unweighted" => Ok(ScoringMode::Unweighted),
            other => bail!("Unknown scoring mode '{}' (expected weighted or unweighted)", other),
        }
    }
}

fn parse_grade(label: &str, s: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid {} '{}'", label, s.trim()))
}

impl Course {
    /// Parse the compact course form `NAME:GRADE[:TIER[:TARGET]]`.
    ///
    /// An empty name is allowed here; callers fill it in with
    /// [`next_course_name`](super::next_course_name).
    /// Examples: `"Chemistry:92:ap"`, `"Algebra:78::85"`, `":88"`.
    pub fn parse(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() < 2 || parts.len() > 4 {
            bail!("Invalid course '{}': expected NAME:GRADE[:TIER[:TARGET]]", s);
        }

        let name = parts[0].trim().to_string();
        let grade = parse_grade("grade", parts[1])?;
        let weight = match parts.get(2) {
            Some(tier) => tier.parse()?,
            None => WeightTier::Normal,
        };
        let target_grade = match parts.get(3) {
            Some(t) if !t.trim().is_empty() => Some(parse_grade("target grade", t)?),
            _ => None,
        };

        Ok(Course {
            name,
            grade,
            weight,
            target_grade,
        })
    }
}

impl FromStr for Course {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Course::parse(s)
    }
}
