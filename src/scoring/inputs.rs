use serde::{Deserialize, Serialize};
use std::fmt;

/// Inputs for the general risk score.
///
/// Example YAML (batch files):
/// ```yaml
/// age: 35
/// bmi: 24.5
/// smoker: false
/// diabetic: false
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralInput {
    /// Age in years (18-100)
    pub age: u32,

    /// Body Mass Index (15.0-60.0)
    pub bmi: f64,

    #[serde(rename = "smoker", default)]
    pub is_smoker: bool,

    #[serde(rename = "diabetic", default)]
    pub is_diabetic: bool,
}

impl Default for GeneralInput {
    fn default() -> Self {
        Self {
            age: 35,
            bmi: 24.5,
            is_smoker: false,
            is_diabetic: false,
        }
    }
}

/// Inputs for the simplified QRISK-style score.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QriskInput {
    /// Age in years (25-84)
    pub age: u32,

    pub gender: Gender,

    pub ethnicity: Ethnicity,

    #[serde(rename = "smoker", default)]
    pub is_smoker: bool,

    #[serde(rename = "bp_meds", default)]
    pub on_bp_medication: bool,

    #[serde(rename = "diabetic", default)]
    pub is_diabetic: bool,

    /// Total cholesterol divided by HDL (2.0-8.0)
    pub chol_hdl_ratio: f64,
}

impl Default for QriskInput {
    fn default() -> Self {
        Self {
            age: 45,
            gender: Gender::Male,
            ethnicity: Ethnicity::White,
            is_smoker: false,
            on_bp_medication: false,
            is_diabetic: false,
            chol_hdl_ratio: 4.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[serde(alias = "Male")]
    Male,
    #[serde(alias = "Female")]
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Ethnicity {
    #[serde(alias = "White")]
    White,
    #[serde(alias = "South Asian")]
    SouthAsian,
    #[serde(alias = "Black")]
    Black,
    #[serde(alias = "Other")]
    Other,
}

impl Ethnicity {
    pub const ALL: [Ethnicity; 4] = [
        Ethnicity::White,
        Ethnicity::SouthAsian,
        Ethnicity::Black,
        Ethnicity::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Ethnicity::White => "White",
            Ethnicity::SouthAsian => "South Asian",
            Ethnicity::Black => "Black",
            Ethnicity::Other => "Other",
        }
    }
}

impl fmt::Display for Ethnicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_input_parse_defaults_booleans() {
        let yaml = r#"
age: 50
bmi: 31.2
"#;
        let input: GeneralInput = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(input.age, 50);
        assert_eq!(input.bmi, 31.2);
        assert!(!input.is_smoker);
        assert!(!input.is_diabetic);
    }

    #[test]
    fn test_qrisk_input_parse() {
        let yaml = r#"
age: 60
gender: female
ethnicity: south_asian
smoker: true
bp_meds: true
chol_hdl_ratio: 5.1
"#;
        let input: QriskInput = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(input.gender, Gender::Female);
        assert_eq!(input.ethnicity, Ethnicity::SouthAsian);
        assert!(input.is_smoker);
        assert!(input.on_bp_medication);
        assert!(!input.is_diabetic);
        assert_eq!(input.chol_hdl_ratio, 5.1);
    }

    #[test]
    fn test_ethnicity_accepts_display_form() {
        let input: QriskInput = serde_saphyr::from_str(
            "age: 45\ngender: Male\nethnicity: South Asian\nchol_hdl_ratio: 4.5\n",
        )
        .unwrap();
        assert_eq!(input.ethnicity, Ethnicity::SouthAsian);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<GeneralInput, _> =
            serde_saphyr::from_str("age: 40\nbmi: 22.0\nheight: 180\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Ethnicity::SouthAsian.to_string(), "South Asian");
        assert_eq!(Gender::Female.to_string(), "Female");
    }
}
