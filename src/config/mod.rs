mod schema;

pub use schema::{Config, ExportConfig, ThemeMode};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/risk-calc/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("risk-calc"))
}

/// Get the default config file path (~/.config/risk-calc/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   and falls back to defaults when that file does not exist.
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
        None => match get_config_path() {
            Ok(p) => (p, false),
            Err(_) => return Ok(Config::default()),
        },
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(config)
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    check_filename(
        "export.csv_filename",
        &config.export.csv_filename,
        ".csv",
        &mut errors,
    );
    check_filename(
        "export.pdf_filename",
        &config.export.pdf_filename,
        ".pdf",
        &mut errors,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_filename(field: &str, name: &str, extension: &str, errors: &mut Vec<String>) {
    if name.trim().is_empty() {
        errors.push(format!("{}: must not be empty", field));
    } else if name.contains('/') || name.contains('\\') {
        errors.push(format!(
            "{}: '{}' must be a file name, not a path (use export.dir)",
            field, name
        ));
    } else if !name.to_ascii_lowercase().ends_with(extension) {
        errors.push(format!("{}: '{}' must end with {}", field, name, extension));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_explicit_missing_file_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let result = load_config(Some(tmp.path().join("missing.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        fs::write(&path, "export:\n  pdf_filename: latest.pdf\n").unwrap();

        let config = load_config(Some(path)).unwrap();
        assert_eq!(config.export.pdf_filename, "latest.pdf");
        assert_eq!(config.export.csv_filename, "all_risk_scores.csv");
    }

    #[test]
    fn test_load_config_invalid_yaml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        fs::write(&path, "theme: [not, a, theme]\n").unwrap();
        assert!(load_config(Some(path)).is_err());
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = Config::default();
        config.export.csv_filename = "".to_string();
        config.export.pdf_filename = "report.txt".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("export.csv_filename"));
        assert!(errors[1].contains("must end with .pdf"));
    }

    #[test]
    fn test_validate_rejects_paths() {
        let mut config = Config::default();
        config.export.csv_filename = "out/scores.csv".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("not a path"));
    }
}
