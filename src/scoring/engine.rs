use serde::Serialize;
use std::fmt;

use super::inputs::{Ethnicity, Gender, GeneralInput, QriskInput};

/// Upper bound shared by both scores.
pub const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RiskFactor {
    Age,
    #[serde(rename = "BMI")]
    Bmi,
    Smoking,
    Diabetes,
}

impl RiskFactor {
    pub fn label(&self) -> &'static str {
        match self {
            RiskFactor::Age => "Age",
            RiskFactor::Bmi => "BMI",
            RiskFactor::Smoking => "Smoking",
            RiskFactor::Diabetes => "Diabetes",
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorContribution {
    pub factor: RiskFactor,
    pub contribution: f64, // uncapped, never rescaled
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub factors: Vec<FactorContribution>,
}

impl ScoreBreakdown {
    /// Contribution of a single factor, if present
    pub fn get(&self, factor: RiskFactor) -> Option<f64> {
        self.factors
            .iter()
            .find(|c| c.factor == factor)
            .map(|c| c.contribution)
    }

    /// Sum of contributions in insertion order (equals the uncapped total)
    pub fn total(&self) -> f64 {
        self.factors.iter().map(|c| c.contribution).sum()
    }

    /// Contributions sorted largest first, for display
    pub fn sorted_desc(&self) -> Vec<FactorContribution> {
        let mut sorted = self.factors.clone();
        sorted.sort_by(|a, b| {
            b.contribution
                .partial_cmp(&a.contribution)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sorted
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneralRiskResult {
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

impl GeneralRiskResult {
    pub fn uncapped_total(&self) -> f64 {
        self.breakdown.total()
    }

    pub fn is_capped(&self) -> bool {
        self.uncapped_total() > MAX_SCORE
    }
}

/// General risk: weighted sum of age, BMI, smoking and diabetes, capped at 100.
///
/// Accepts any finite input; range enforcement belongs to the caller.
pub fn compute_general_risk(input: &GeneralInput) -> GeneralRiskResult {
    let age_contrib = 0.5 * f64::from(input.age);
    let bmi_contrib = 0.8 * input.bmi;
    let smoke_contrib = if input.is_smoker { 15.0 } else { 0.0 };
    let diabetes_contrib = if input.is_diabetic { 20.0 } else { 0.0 };

    let total = age_contrib + bmi_contrib + smoke_contrib + diabetes_contrib;

    GeneralRiskResult {
        score: total.min(MAX_SCORE),
        breakdown: ScoreBreakdown {
            factors: vec![
                FactorContribution {
                    factor: RiskFactor::Age,
                    contribution: age_contrib,
                },
                FactorContribution {
                    factor: RiskFactor::Bmi,
                    contribution: bmi_contrib,
                },
                FactorContribution {
                    factor: RiskFactor::Smoking,
                    contribution: smoke_contrib,
                },
                FactorContribution {
                    factor: RiskFactor::Diabetes,
                    contribution: diabetes_contrib,
                },
            ],
        },
    }
}

/// Simplified QRISK-style 10-year risk percentage, capped at 100.
///
/// Demonstration only. Returns the score without a breakdown.
pub fn compute_qrisk_simplified(input: &QriskInput) -> f64 {
    let mut base = 5.0 + 0.15 * f64::from(input.age) + 2.0 * input.chol_hdl_ratio;

    if input.is_smoker {
        base += 5.0;
    }
    if input.on_bp_medication {
        base += 3.0;
    }
    if input.is_diabetic {
        base += 4.0;
    }
    if input.gender == Gender::Male {
        base += 2.0;
    }
    match input.ethnicity {
        Ethnicity::SouthAsian => base += 3.0,
        Ethnicity::Black => base += 2.0,
        Ethnicity::White | Ethnicity::Other => {}
    }

    base.min(MAX_SCORE)
}
