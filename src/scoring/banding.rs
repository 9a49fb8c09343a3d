//! Presentational risk bands. Not part of the scoring contract.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

/// General score: below 30 low, below 70 moderate, otherwise high
pub fn general_band(score: f64) -> RiskBand {
    if score < 30.0 {
        RiskBand::Low
    } else if score < 70.0 {
        RiskBand::Moderate
    } else {
        RiskBand::High
    }
}

/// QRISK percentage: below 10 low, below 20 moderate, otherwise high
pub fn qrisk_band(score: f64) -> RiskBand {
    if score < 10.0 {
        RiskBand::Low
    } else if score < 20.0 {
        RiskBand::Moderate
    } else {
        RiskBand::High
    }
}

impl RiskBand {
    pub fn general_label(&self) -> &'static str {
        match self {
            RiskBand::Low => "Low risk",
            RiskBand::Moderate => "Moderate risk",
            RiskBand::High => "High risk",
        }
    }

    pub fn qrisk_label(&self) -> &'static str {
        match self {
            RiskBand::Low => "Low 10-year risk (<10%)",
            RiskBand::Moderate => "Moderate 10-year risk (10-20%)",
            RiskBand::High => "High 10-year risk (>=20%)",
        }
    }

    pub fn general_advice(&self) -> &'static str {
        match self {
            RiskBand::Low => {
                "Keep doing what works: balanced diet, regular activity, and routine checkups."
            }
            RiskBand::Moderate => {
                "Consider lifestyle tweaks (nutrition, activity, weight management) and discuss screening with a clinician."
            }
            RiskBand::High => {
                "Please consider a clinical review. Address smoking, weight, and glucose management with a professional."
            }
        }
    }

    pub fn qrisk_advice() -> &'static [&'static str] {
        &[
            "Review blood pressure and lipids with your clinician",
            "Consider smoking cessation support if applicable",
            "Nutrition, activity, and weight management can significantly reduce risk",
        ]
    }
}
