use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::export::{CSV_FILENAME, PDF_FILENAME};

/// Application configuration.
///
/// Every field is optional; a missing config file means all defaults.
///
/// Example YAML:
/// ```yaml
/// theme: dark
/// export:
///   dir: ./exports
///   csv_filename: all_risk_scores.csv
///   pdf_filename: risk_report.pdf
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub theme: ThemeMode,

    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Detect from terminal background
    #[default]
    Auto,
    Dark,
    Light,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// Directory for exported files (default: current directory)
    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default = "default_csv_filename")]
    pub csv_filename: String,

    #[serde(default = "default_pdf_filename")]
    pub pdf_filename: String,
}

fn default_csv_filename() -> String {
    CSV_FILENAME.to_string()
}

fn default_pdf_filename() -> String {
    PDF_FILENAME.to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: None,
            csv_filename: default_csv_filename(),
            pdf_filename: default_pdf_filename(),
        }
    }
}

impl ExportConfig {
    pub fn export_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
