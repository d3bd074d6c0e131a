use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{get_config_path, ColorChoice, Config, MAX_PRECISION};
use crate::course::ScoringMode;
use crate::scoring::GradePolicy;

/// Line-oriented prompt over any reader/writer pair.
struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Prompt user with a message and return their trimmed input.
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message)?;
        self.output.flush().context("Failed to flush stdout")?;
        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .context("Failed to read input")?;
        Ok(line.trim().to_string())
    }

    /// Prompt user with a message and a default value. Returns default if input is empty.
    fn prompt_with_default(&mut self, message: &str, default: &str) -> Result<String> {
        let input = self.prompt(&format!("{} [{}]: ", message, default))?;
        if input.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(input)
        }
    }

    /// Prompt user with a yes/no question. Returns bool based on input and default.
    fn prompt_yes_no(&mut self, message: &str, default_yes: bool) -> Result<bool> {
        let hint = if default_yes { "Y/n" } else { "y/N" };
        let input = self.prompt(&format!("{} [{}]: ", message, hint))?.to_lowercase();
        if input.is_empty() {
            Ok(default_yes)
        } else {
            Ok(input == "y" || input == "yes")
        }
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }
}

/// Write preferences atomically, creating parent directories as needed.
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}

/// Run the interactive init wizard on stdin/stdout.
///
/// If `default_path` is Some, it is offered as the config file path.
/// Otherwise the default config path is offered.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let default_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    run_init_wizard_with(stdin.lock(), stdout.lock(), default_path).map(|_| ())
}

/// Wizard body. Returns the written path, or None when the user declined
/// to overwrite an existing file.
pub fn run_init_wizard_with<R: BufRead, W: Write>(
    input: R,
    output: W,
    default_path: PathBuf,
) -> Result<Option<PathBuf>> {
    let mut p = Prompter { input, output };
    let defaults = Config::default();

    p.say("")?;
    p.say("GPA Calculator Configuration")?;
    p.say("============================")?;
    p.say("")?;

    p.say("Weighted mode adds +0.5 for honors and +1.0 for AP courses; unweighted ignores tiers.")?;
    let mode = loop {
        let input = p.prompt_with_default("Default scoring mode", defaults.mode.as_str())?;
        match input.parse::<ScoringMode>() {
            Ok(m) => break m,
            Err(e) => p.say(&format!("  Invalid: {}. Try again.", e))?,
        }
    };

    p.say("")?;
    p.say("Grades outside 0-100 can be rejected with an error or clamped into range.")?;
    let out_of_range = loop {
        let input = p.prompt_with_default("Out-of-range grades (reject/clamp)", "reject")?;
        match input.to_lowercase().as_str() {
            "reject" => break GradePolicy::Reject,
            "clamp" => break GradePolicy::Clamp,
            _ => p.say("  Invalid: expected 'reject' or 'clamp'. Try again.")?,
        }
    };

    p.say("")?;
    let precision = loop {
        let input = p.prompt_with_default("Decimal places shown", &defaults.precision.to_string())?;
        match input.parse::<usize>() {
            Ok(v) if v <= MAX_PRECISION => break v,
            Ok(_) => p.say(&format!("  Invalid: at most {}. Try again.", MAX_PRECISION))?,
            Err(_) => p.say("  Invalid: must be a whole number. Try again.")?,
        }
    };

    p.say("")?;
    let path_str = p.prompt_with_default(
        "Where should the config be saved?",
        &default_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = p.prompt_yes_no(
            &format!("Config already exists at {}. Overwrite?", config_path.display()),
            false,
        )?;
        if !overwrite {
            p.say("Aborted.")?;
            return Ok(None);
        }
    }

    let config = Config {
        mode,
        out_of_range,
        precision,
        colors: ColorChoice::Auto,
    };
    write_config(&config_path, &config)?;

    p.say("")?;
    p.say(&format!("Config written to {}", config_path.display()))?;
    p.say("Run `gpa-calc --course \"Algebra:88:honors\"` to get started.")?;

    Ok(Some(config_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use std::env;
    use std::io::Cursor;

    #[test]
    fn test_write_config_roundtrip() {
        let path = env::temp_dir()
            .join("gpa_calc_test_init_dir")
            .join("config.yaml");
        let _ = std::fs::remove_file(&path);

        let config = Config {
            mode: ScoringMode::Unweighted,
            out_of_range: GradePolicy::Clamp,
            precision: 1,
            colors: ColorChoice::Never,
        };
        write_config(&path, &config).unwrap();

        let loaded = load_config(Some(path.clone())).unwrap();
        assert_eq!(loaded, config);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_wizard_accepts_defaults() {
        let path = env::temp_dir().join("gpa_calc_test_wizard_defaults.yaml");
        let _ = std::fs::remove_file(&path);

        // mode, policy, precision, path
        let input = Cursor::new("\n\n\n\n");
        let mut output = Vec::new();
        let written = run_init_wizard_with(input, &mut output, path.clone()).unwrap();
        assert_eq!(written, Some(path.clone()));

        let loaded = load_config(Some(path.clone())).unwrap();
        assert_eq!(loaded, Config::default());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_wizard_retries_invalid_answers() {
        let path = env::temp_dir().join("gpa_calc_test_wizard_retry.yaml");
        let _ = std::fs::remove_file(&path);

        let input = Cursor::new("both\nunweighted\nignore\nclamp\n9\n3\n\n");
        let mut output = Vec::new();
        run_init_wizard_with(input, &mut output, path.clone()).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Unknown scoring mode"));
        assert!(text.contains("expected 'reject' or 'clamp'"));
        assert!(text.contains("at most 6"));

        let loaded = load_config(Some(path.clone())).unwrap();
        assert_eq!(loaded.mode, ScoringMode::Unweighted);
        assert_eq!(loaded.out_of_range, GradePolicy::Clamp);
        assert_eq!(loaded.precision, 3);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_wizard_declines_overwrite() {
        let path = env::temp_dir().join("gpa_calc_test_wizard_existing.yaml");
        std::fs::write(&path, "precision: 4\n").unwrap();

        let input = Cursor::new("\n\n\n\nn\n");
        let mut output = Vec::new();
        let written = run_init_wizard_with(input, &mut output, path.clone()).unwrap();
        assert!(written.is_none());

        let loaded = load_config(Some(path.clone())).unwrap();
        assert_eq!(loaded.precision, 4);

        let _ = std::fs::remove_file(&path);
    }
}
