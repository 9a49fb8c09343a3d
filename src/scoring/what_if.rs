use super::engine::compute_general_risk;
use super::inputs::GeneralInput;
use super::validation::GENERAL_AGE_RANGE;

pub const WHAT_IF_BMI_START: f64 = 15.0;
pub const WHAT_IF_BMI_STEP: f64 = 0.5;
pub const WHAT_IF_BMI_POINTS: usize = 61; // 15.0..=45.0

/// Starting point for the interactive explorer
pub const WHAT_IF_BASE: GeneralInput = GeneralInput {
    age: 40,
    bmi: 27.0,
    is_smoker: false,
    is_diabetic: false,
};

/// General score for every age in range, holding BMI and flags fixed
pub fn risk_by_age(base: &GeneralInput) -> Vec<(u32, f64)> {
    GENERAL_AGE_RANGE
        .map(|age| {
            let input = GeneralInput { age, ..*base };
            (age, compute_general_risk(&input).score)
        })
        .collect()
}

/// General score for BMI 15.0 to 45.0 in 0.5 steps, holding age and flags fixed
pub fn risk_by_bmi(base: &GeneralInput) -> Vec<(f64, f64)> {
    (0..WHAT_IF_BMI_POINTS)
        .map(|i| {
            let bmi = WHAT_IF_BMI_START + WHAT_IF_BMI_STEP * i as f64;
            let input = GeneralInput { bmi, ..*base };
            (bmi, compute_general_risk(&input).score)
        })
        .collect()
}
