use std::ops::RangeInclusive;

use super::inputs::{GeneralInput, QriskInput};

pub const GENERAL_AGE_RANGE: RangeInclusive<u32> = 18..=100;
pub const GENERAL_BMI_RANGE: RangeInclusive<f64> = 15.0..=60.0;
pub const QRISK_AGE_RANGE: RangeInclusive<u32> = 25..=84;
pub const QRISK_RATIO_RANGE: RangeInclusive<f64> = 2.0..=8.0;

/// Validate general risk inputs against the documented ranges.
/// Returns all validation errors at once (not just the first).
pub fn validate_general(input: &GeneralInput) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    check_int("age", input.age, &GENERAL_AGE_RANGE, &mut errors);
    check_real("bmi", input.bmi, &GENERAL_BMI_RANGE, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate QRISK inputs against the documented ranges.
pub fn validate_qrisk(input: &QriskInput) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    check_int("age", input.age, &QRISK_AGE_RANGE, &mut errors);
    check_real(
        "chol_hdl_ratio",
        input.chol_hdl_ratio,
        &QRISK_RATIO_RANGE,
        &mut errors,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_int(name: &str, value: u32, range: &RangeInclusive<u32>, errors: &mut Vec<String>) {
    if !range.contains(&value) {
        errors.push(format!(
            "{}: {} is outside {}-{}",
            name,
            value,
            range.start(),
            range.end()
        ));
    }
}

fn check_real(name: &str, value: f64, range: &RangeInclusive<f64>, errors: &mut Vec<String>) {
    if !value.is_finite() {
        errors.push(format!("{}: must be a finite number", name));
    } else if !range.contains(&value) {
        errors.push(format!(
            "{}: {} is outside {:.1}-{:.1}",
            name,
            value,
            range.start(),
            range.end()
        ));
    }
}
