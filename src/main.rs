use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use gpa_calc::config::{self, Config, RunSettings};
use gpa_calc::course::{Course, GradeSource, ScoringMode};
use gpa_calc::output;
use gpa_calc::scoring::{self, ScoreResult};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_CONFIG: i32 = 4;
const EXIT_INTERNAL: i32 = 5;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the GPA for the given courses (default if no subcommand)
    Calc,
    /// Create a preferences file interactively
    Init,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Tsv,
    Json,
}

#[derive(Args, Debug)]
struct CalcArgs {
    /// Worksheet file (YAML, or JSON with a .json extension) listing courses
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Course as NAME:GRADE[:TIER[:TARGET]], e.g. "Chemistry:92:ap:95" (repeatable)
    #[arg(long = "course", global = true)]
    courses: Vec<Course>,

    /// Scoring mode (overrides worksheet and config)
    #[arg(short, long, global = true)]
    mode: Option<ScoringMode>,

    /// Also compute the target GPA from each course's target grade
    #[arg(short, long, global = true)]
    target: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
#[command(name = "gpa-calc")]
#[command(about = "Grade point average calculator with weighted tiers and target projections", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/gpa-calc/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(flatten)]
    calc: CalcArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    gpa_calc::logging::init_logger(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Calc);
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init = command {
        if let Err(e) = config::init::run_init_wizard(config_path) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    std::process::exit(run_calc(cli.calc, &config));
}

fn run_calc(args: CalcArgs, config: &Config) -> i32 {
    let worksheet = match args.file {
        Some(ref path) => match config::load_worksheet(path) {
            Ok(w) => Some(w),
            Err(e) => {
                eprintln!("Worksheet error: {:#}", e);
                return EXIT_INPUT;
            }
        },
        None => None,
    };

    let RunSettings {
        mut courses,
        mode,
        target,
    } = config::resolve_run(worksheet, args.courses, args.mode, args.target, config);

    let clamped = scoring::apply_grade_policy(&mut courses, config.out_of_range);
    if clamped > 0 {
        tracing::debug!("Clamped {} grades into 0-100", clamped);
    }

    if let Err(errors) = scoring::validate_courses(&courses, target) {
        eprintln!("Invalid courses:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return EXIT_INPUT;
    }

    tracing::debug!(
        "Scoring {} courses ({} mode, target: {})",
        courses.len(),
        mode,
        target
    );

    let scored = if target {
        scoring::project(&courses, mode).map(|p| (p.current, Some(p.target)))
    } else {
        scoring::score_courses(&courses, mode, GradeSource::Current).map(|r| (r, None))
    };
    let (current, projected) = match scored {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Invalid courses: {}", e);
            return EXIT_INPUT;
        }
    };

    match render(args.format, &current, projected.as_ref(), config) {
        Ok(text) => {
            println!("{}", text);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to render output: {:#}", e);
            EXIT_INTERNAL
        }
    }
}

fn render(
    format: OutputFormat,
    current: &ScoreResult,
    projected: Option<&ScoreResult>,
    config: &Config,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => {
            let use_colors = output::should_use_colors(config.colors);
            Ok(format!(
                "{}\n\n{}",
                output::format_course_table(current, projected, use_colors),
                output::format_summary(
                    current.gpa,
                    projected.map(|t| t.gpa),
                    current.mode,
                    config.precision,
                    use_colors,
                )
            ))
        }
        OutputFormat::Tsv => Ok(output::format_tsv(current, projected)),
        OutputFormat::Json => output::format_json(&output::Report::new(current, projected)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpa_calc::config::ColorChoice;
    use gpa_calc::course::WeightTier;

    fn plain_config() -> Config {
        Config {
            colors: ColorChoice::Never,
            ..Config::default()
        }
    }

    fn sample_result() -> ScoreResult {
        let courses = vec![Course::new("Algebra", 75.0, WeightTier::Normal)];
        scoring::score_courses(&courses, ScoringMode::Weighted, GradeSource::Current).unwrap()
    }

    #[test]
    fn test_render_failures_have_their_own_exit_code() {
        assert_ne!(EXIT_INTERNAL, EXIT_SUCCESS);
        assert_ne!(EXIT_INTERNAL, EXIT_INPUT);
        assert_ne!(EXIT_INTERNAL, EXIT_CONFIG);
    }

    #[test]
    fn test_render_table_ends_with_summary() {
        let text = render(OutputFormat::Table, &sample_result(), None, &plain_config()).unwrap();
        assert!(text.starts_with(" 1. Algebra"));
        assert!(text.ends_with("Current GPA: 2.00 (weighted)"));
    }

    #[test]
    fn test_render_json() {
        let text = render(OutputFormat::Json, &sample_result(), None, &plain_config()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["gpa"], 2.0);
    }

    #[test]
    fn test_render_tsv() {
        let text = render(OutputFormat::Tsv, &sample_result(), None, &plain_config()).unwrap();
        assert_eq!(text, "Algebra\t75\tC\t2");
    }
}
