pub mod init;
mod schema;

pub use schema::{ColorChoice, Config, Worksheet, DEFAULT_PRECISION, MAX_PRECISION};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::course::{default_courses, next_course_name, Course, ScoringMode};

/// Get the config directory path (~/.config/gpa-calc/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("gpa-calc"))
}

/// Get the default config file path (~/.config/gpa-calc/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load preferences from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   and falls back to built-in defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let (config_path, explicit) = match path {
        Some(p) => (p, true),
        None => (get_config_path()?, false),
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        tracing::debug!("No config at {}, using defaults", config_path.display());
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    tracing::debug!("Loaded config from {}", config_path.display());
    Ok(config)
}

/// Validate preferences at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.precision > MAX_PRECISION {
        errors.push(format!(
            "precision: {} is too large (max {})",
            config.precision, MAX_PRECISION
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Load a course worksheet. Files ending in `.json` are read as JSON,
/// everything else as YAML.
pub fn load_worksheet(path: &Path) -> Result<Worksheet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read worksheet at {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let worksheet: Worksheet = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse worksheet: invalid JSON in {}", path.display()))?
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse worksheet: invalid YAML in {}", path.display()))?
    };

    tracing::debug!(
        "Loaded {} courses from {}",
        worksheet.courses.len(),
        path.display()
    );
    Ok(worksheet)
}

/// Courses and settings for one scoring run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub courses: Vec<Course>,
    pub mode: ScoringMode,
    pub target: bool,
}

/// Merge command-line input, an optional worksheet and preferences.
///
/// - Mode: `cli_mode` > worksheet `mode` > config `mode`
/// - Target: on if either the flag or the worksheet asks for it
/// - CLI courses follow the worksheet's; unnamed ones become "Course N"
/// - With no worksheet and no CLI courses, the default worksheet is used
pub fn resolve_run(
    worksheet: Option<Worksheet>,
    cli_courses: Vec<Course>,
    cli_mode: Option<ScoringMode>,
    cli_target: bool,
    config: &Config,
) -> RunSettings {
    let has_worksheet = worksheet.is_some();
    let (mut courses, sheet_mode, sheet_target) = match worksheet {
        Some(w) => (w.courses, w.mode, w.target.unwrap_or(false)),
        None => (Vec::new(), None, false),
    };

    for mut course in cli_courses {
        if course.name.is_empty() {
            course.name = next_course_name(&courses);
        }
        courses.push(course);
    }

    if !has_worksheet && courses.is_empty() {
        tracing::debug!("No courses given, using the default worksheet");
        courses = default_courses();
    }

    RunSettings {
        courses,
        mode: cli_mode.or(sheet_mode).unwrap_or(config.mode),
        target: cli_target || sheet_target,
    }
}
