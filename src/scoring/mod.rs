pub mod banding;
pub mod engine;
pub mod inputs;
pub mod validation;
pub mod what_if;

pub use banding::{general_band, qrisk_band, RiskBand};
pub use engine::{
    compute_general_risk, compute_qrisk_simplified, FactorContribution, GeneralRiskResult,
    RiskFactor, ScoreBreakdown, MAX_SCORE,
};
pub use inputs::{Ethnicity, Gender, GeneralInput, QriskInput};
pub use validation::{validate_general, validate_qrisk};
