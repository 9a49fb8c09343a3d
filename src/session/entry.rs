use serde::Serialize;
use std::fmt;

use crate::scoring::{GeneralInput, QriskInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModelKind {
    General,
    #[serde(rename = "QRISK")]
    Qrisk,
}

impl ModelKind {
    pub fn label(&self) -> &'static str {
        match self {
            ModelKind::General => "General",
            ModelKind::Qrisk => "QRISK",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single cell of an exported row.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(u32),
    Real(f64),
    Bool(bool),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Int(n) => write!(f, "{}", n),
            // Whole numbers keep one decimal ("37.0"), others print shortest round-trip form
            FieldValue::Real(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            FieldValue::Real(x) => write!(f, "{}", x),
            FieldValue::Bool(true) => f.write_str("True"),
            FieldValue::Bool(false) => f.write_str("False"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneralRecord {
    pub input: GeneralInput,
    /// Score rounded to one decimal place at log time
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QriskRecord {
    pub input: QriskInput,
    pub score: f64,
}

/// One logged calculation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "model")]
pub enum HistoryEntry {
    General(GeneralRecord),
    #[serde(rename = "QRISK")]
    Qrisk(QriskRecord),
}

pub fn round_score(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}

impl HistoryEntry {
    pub fn general(input: GeneralInput, score: f64) -> Self {
        HistoryEntry::General(GeneralRecord {
            input,
            score: round_score(score),
        })
    }

    pub fn qrisk(input: QriskInput, score: f64) -> Self {
        HistoryEntry::Qrisk(QriskRecord {
            input,
            score: round_score(score),
        })
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            HistoryEntry::General(_) => ModelKind::General,
            HistoryEntry::Qrisk(_) => ModelKind::Qrisk,
        }
    }

    /// Rounded score
    pub fn score(&self) -> f64 {
        match self {
            HistoryEntry::General(r) => r.score,
            HistoryEntry::Qrisk(r) => r.score,
        }
    }

    /// Flattened `(column, value)` pairs in display order. This is the row
    /// shape used by the CSV and PDF exports and the history table.
    pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        let model = ("Model", FieldValue::Text(self.kind().label().to_string()));
        match self {
            HistoryEntry::General(r) => vec![
                model,
                ("Age", FieldValue::Int(r.input.age)),
                ("BMI", FieldValue::Real(r.input.bmi)),
                ("Smoker", FieldValue::Bool(r.input.is_smoker)),
                ("Diabetic", FieldValue::Bool(r.input.is_diabetic)),
                ("Score", FieldValue::Real(r.score)),
            ],
            HistoryEntry::Qrisk(r) => vec![
                model,
                ("Age", FieldValue::Int(r.input.age)),
                ("Gender", FieldValue::Text(r.input.gender.label().to_string())),
                ("Ethnicity", FieldValue::Text(r.input.ethnicity.label().to_string())),
                ("Smoker", FieldValue::Bool(r.input.is_smoker)),
                ("BP meds", FieldValue::Bool(r.input.on_bp_medication)),
                ("Diabetic", FieldValue::Bool(r.input.is_diabetic)),
                ("Chol/HDL Ratio", FieldValue::Real(r.input.chol_hdl_ratio)),
                ("Score", FieldValue::Real(r.score)),
            ],
        }
    }
}
