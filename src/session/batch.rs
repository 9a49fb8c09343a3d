use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::log::SessionLog;
use crate::scoring::{
    compute_general_risk, compute_qrisk_simplified, validate_general, validate_qrisk,
    GeneralInput, QriskInput,
};

/// A batch file: a list of calculations run in order.
///
/// Example YAML:
/// ```yaml
/// calculations:
///   - model: general
///     age: 35
///     bmi: 24.5
///   - model: qrisk
///     age: 45
///     gender: male
///     ethnicity: south_asian
///     bp_meds: true
///     chol_hdl_ratio: 4.5
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BatchFile {
    pub calculations: Vec<Calculation>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum Calculation {
    General(GeneralInput),
    Qrisk(QriskInput),
}

pub fn load_batch(path: &Path) -> Result<BatchFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch file at {}", path.display()))?;

    serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse batch file: invalid YAML in {}", path.display()))
}

/// Validate every calculation before running any of them.
/// Error messages are prefixed with the calculation index.
pub fn validate_batch(batch: &BatchFile) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (i, calc) in batch.calculations.iter().enumerate() {
        let result = match calc {
            Calculation::General(input) => validate_general(input),
            Calculation::Qrisk(input) => validate_qrisk(input),
        };
        if let Err(errs) = result {
            errors.extend(errs.into_iter().map(|e| format!("calculations[{}].{}", i, e)));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Run every calculation in file order into a fresh session log
pub fn run_batch(batch: &BatchFile) -> SessionLog {
    let mut log = SessionLog::new();
    for calc in &batch.calculations {
        match calc {
            Calculation::General(input) => {
                let result = compute_general_risk(input);
                log.record_general(*input, &result);
            }
            Calculation::Qrisk(input) => {
                let score = compute_qrisk_simplified(input);
                log.record_qrisk(*input, score);
            }
        }
    }
    log
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Ethnicity;
    use crate::session::ModelKind;

    const SAMPLE: &str = r#"
calculations:
  - model: general
    age: 35
    bmi: 24.5
  - model: qrisk
    age: 45
    gender: male
    ethnicity: white
    chol_hdl_ratio: 4.5
  - model: general
    age: 70
    bmi: 40.0
    smoker: true
    diabetic: true
"#;

    #[test]
    fn test_parse_batch() {
        let batch: BatchFile = serde_saphyr::from_str(SAMPLE).unwrap();
        assert_eq!(batch.calculations.len(), 3);
        match batch.calculations[1] {
            Calculation::Qrisk(q) => assert_eq!(q.ethnicity, Ethnicity::White),
            _ => panic!("expected qrisk"),
        }
    }

    #[test]
    fn test_run_batch_in_file_order() {
        let batch: BatchFile = serde_saphyr::from_str(SAMPLE).unwrap();
        let log = run_batch(&batch);
        let summary: Vec<_> = log.entries().iter().map(|e| (e.kind(), e.score())).collect();
        assert_eq!(
            summary,
            vec![
                (ModelKind::General, 37.1),
                (ModelKind::Qrisk, 22.8),
                (ModelKind::General, 100.0),
            ]
        );
    }

    #[test]
    fn test_validate_batch_reports_indices() {
        let batch = BatchFile {
            calculations: vec![
                Calculation::General(GeneralInput::default()),
                Calculation::Qrisk(QriskInput {
                    age: 90,
                    ..QriskInput::default()
                }),
            ],
        };
        let errors = validate_batch(&batch).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("calculations[1].age"));
    }

    #[test]
    fn test_load_batch_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_batch(&dir.path().join("nope.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_batch_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.yaml");
        std::fs::write(&path, SAMPLE).unwrap();
        let batch = load_batch(&path).unwrap();
        assert!(validate_batch(&batch).is_ok());
    }
}
