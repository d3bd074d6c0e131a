use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::config::ColorChoice;
use crate::course::ScoringMode;
use crate::scoring::{CourseScore, ScoreResult};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal(),
    }
}

/// Format a GPA with a fixed number of decimals ("2.50")
pub fn format_gpa(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}

/// Format points earned by one course ("3.5", "4")
fn format_points(points: f64) -> String {
    let s = format!("{:.1}", points);
    s.strip_suffix(".0").map(str::to_string).unwrap_or(s)
}

/// Format a grade without a trailing ".0" for whole numbers
fn format_grade(grade: f64) -> String {
    if grade.fract() == 0.0 {
        format!("{:.0}", grade)
    } else {
        format!("{}", grade)
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a course name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Summary lines: "Current GPA: 2.50" and, when projecting, "Target GPA: 3.00"
pub fn format_summary(
    current: f64,
    target: Option<f64>,
    mode: ScoringMode,
    precision: usize,
    use_colors: bool,
) -> String {
    let mut lines = Vec::new();
    let current_str = format_gpa(current, precision);
    if use_colors {
        lines.push(format!("Current GPA: {} ({})", current_str.bold(), mode.dimmed()));
    } else {
        lines.push(format!("Current GPA: {} ({})", current_str, mode));
    }

    if let Some(target) = target {
        let target_str = format_gpa(target, precision);
        if use_colors {
            lines.push(format!("Target GPA:  {}", target_str.bold().green()));
        } else {
            lines.push(format!("Target GPA:  {}", target_str));
        }
    }

    lines.join("\n")
}

fn score_cell(score: &CourseScore) -> String {
    format!(
        "{:>5} {} {:>3}",
        format_grade(score.grade),
        score.letter,
        format_points(score.points)
    )
}

/// Format a per-course breakdown table.
/// Columns: index, name, grade/letter/points, and target grade/letter/points
/// when a projection is given. No headers.
pub fn format_course_table(
    current: &ScoreResult,
    target: Option<&ScoreResult>,
    use_colors: bool,
) -> String {
    render_course_table(current, target, use_colors, get_terminal_width())
}

fn render_course_table(
    current: &ScoreResult,
    target: Option<&ScoreResult>,
    use_colors: bool,
    term_width: Option<usize>,
) -> String {
    // Index "99." + grade cell "100.5 A 4.5" per scored column
    let index_width = 3;
    let cell_width = 11;
    let separator = "  ";
    let arrow = "-> ";
    let fixed_width = match target {
        Some(_) => index_width + 1 + (cell_width + separator.len()) * 2 + arrow.len(),
        None => index_width + 1 + cell_width + separator.len(),
    };

    let name_width = current
        .courses
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);
    let name_width = match term_width {
        Some(width) if width > fixed_width + 10 => name_width.min(width - fixed_width),
        Some(_) => name_width.min(20),
        None => name_width,
    };

    current
        .courses
        .iter()
        .enumerate()
        .map(|(idx, score)| {
            let index_str = format!("{:>2}.", idx + 1);
            let name = truncate_name(&score.name, name_width);
            let name_padded = format!("{:<width$}", name, width = name_width);
            let current_cell = score_cell(score);
            let target_cell = target
                .and_then(|t| t.courses.get(idx))
                .map(score_cell);

            let mut line = if use_colors {
                format!(
                    "{} {}{}{}",
                    index_str.dimmed(),
                    name_padded.bold(),
                    separator,
                    current_cell
                )
            } else {
                format!("{} {}{}{}", index_str, name_padded, separator, current_cell)
            };

            if let Some(cell) = target_cell {
                line.push_str(separator);
                line.push_str(arrow);
                if use_colors {
                    line.push_str(&cell.green().to_string());
                } else {
                    line.push_str(&cell);
                }
            }
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format scored courses as tab-separated values for scripting.
/// Columns: name, grade, letter, points[, target grade, target letter, target points]
/// (no headers, no colors)
pub fn format_tsv(current: &ScoreResult, target: Option<&ScoreResult>) -> String {
    current
        .courses
        .iter()
        .enumerate()
        .map(|(idx, score)| {
            let mut fields = vec![
                score.name.clone(),
                format_grade(score.grade),
                score.letter.to_string(),
                format_points(score.points),
            ];
            if let Some(t) = target.and_then(|t| t.courses.get(idx)) {
                fields.push(format_grade(t.grade));
                fields.push(t.letter.to_string());
                fields.push(format_points(t.points));
            }
            fields.join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// JSON form of a scoring run (`--format json`).
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub mode: ScoringMode,
    pub gpa: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_gpa: Option<f64>,
    pub courses: &'a [CourseScore],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_courses: Option<&'a [CourseScore]>,
}

impl<'a> Report<'a> {
    pub fn new(current: &'a ScoreResult, target: Option<&'a ScoreResult>) -> Self {
        Self {
            mode: current.mode,
            gpa: current.gpa,
            target_gpa: target.map(|t| t.gpa),
            courses: &current.courses,
            target_courses: target.map(|t| t.courses.as_slice()),
        }
    }
}

pub fn format_json(report: &Report) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
