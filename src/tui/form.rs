//! Editable input forms for the General and QRISK tabs.
//!
//! Every adjustment clamps to the accepted input ranges, so a form can
//! never hold a value the scoring validators would reject.

use std::ops::RangeInclusive;

use crate::scoring::validation::{
    GENERAL_AGE_RANGE, GENERAL_BMI_RANGE, QRISK_AGE_RANGE, QRISK_RATIO_RANGE,
};
use crate::scoring::{Ethnicity, Gender, GeneralInput, QriskInput};

/// Direction of a field adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Down,
    Up,
}

impl Step {
    fn sign(self) -> i64 {
        match self {
            Step::Down => -1,
            Step::Up => 1,
        }
    }
}

fn step_int(value: u32, step: Step, amount: u32, range: &RangeInclusive<u32>) -> u32 {
    let next = value as i64 + step.sign() * amount as i64;
    next.clamp(*range.start() as i64, *range.end() as i64) as u32
}

fn step_real(value: f64, step: Step, amount: f64, range: &RangeInclusive<f64>) -> f64 {
    let next = value + step.sign() as f64 * amount;
    // Keep one decimal so repeated 0.1 steps don't drift
    ((next.clamp(*range.start(), *range.end())) * 10.0).round() / 10.0
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: Step) -> T {
    let len = all.len();
    let pos = all.iter().position(|v| *v == current).unwrap_or(0);
    let next = match step {
        Step::Up => (pos + 1) % len,
        Step::Down => (pos + len - 1) % len,
    };
    all[next]
}

fn yes_no(value: bool) -> String {
    if value { "Yes" } else { "No" }.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneralField {
    Age,
    Bmi,
    Smoker,
    Diabetic,
}

impl GeneralField {
    pub const ALL: [GeneralField; 4] = [
        GeneralField::Age,
        GeneralField::Bmi,
        GeneralField::Smoker,
        GeneralField::Diabetic,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GeneralField::Age => "Age",
            GeneralField::Bmi => "BMI",
            GeneralField::Smoker => "Smoker",
            GeneralField::Diabetic => "Diabetic",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GeneralForm {
    pub input: GeneralInput,
    pub selected: usize,
}

impl GeneralForm {
    pub fn selected_field(&self) -> GeneralField {
        GeneralField::ALL[self.selected]
    }

    pub fn next_field(&mut self) {
        self.selected = (self.selected + 1) % GeneralField::ALL.len();
    }

    pub fn previous_field(&mut self) {
        let len = GeneralField::ALL.len();
        self.selected = (self.selected + len - 1) % len;
    }

    /// Step the selected field. `coarse` uses a larger increment for
    /// numeric fields; booleans toggle either way.
    pub fn adjust(&mut self, step: Step, coarse: bool) {
        let field = self.selected_field();
        let input = &mut self.input;
        match field {
            GeneralField::Age => {
                let amount = if coarse { 10 } else { 1 };
                input.age = step_int(input.age, step, amount, &GENERAL_AGE_RANGE);
            }
            GeneralField::Bmi => {
                let amount = if coarse { 1.0 } else { 0.1 };
                input.bmi = step_real(input.bmi, step, amount, &GENERAL_BMI_RANGE);
            }
            GeneralField::Smoker => input.is_smoker = !input.is_smoker,
            GeneralField::Diabetic => input.is_diabetic = !input.is_diabetic,
        }
    }

    /// (label, display value) pairs in field order
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        GeneralField::ALL
            .iter()
            .map(|field| {
                let value = match field {
                    GeneralField::Age => self.input.age.to_string(),
                    GeneralField::Bmi => format!("{:.1}", self.input.bmi),
                    GeneralField::Smoker => yes_no(self.input.is_smoker),
                    GeneralField::Diabetic => yes_no(self.input.is_diabetic),
                };
                (field.label(), value)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QriskField {
    Age,
    Gender,
    Ethnicity,
    Smoker,
    BpMeds,
    Diabetic,
    CholRatio,
}

impl QriskField {
    pub const ALL: [QriskField; 7] = [
        QriskField::Age,
        QriskField::Gender,
        QriskField::Ethnicity,
        QriskField::Smoker,
        QriskField::BpMeds,
        QriskField::Diabetic,
        QriskField::CholRatio,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            QriskField::Age => "Age",
            QriskField::Gender => "Gender",
            QriskField::Ethnicity => "Ethnicity",
            QriskField::Smoker => "Smoker",
            QriskField::BpMeds => "BP meds",
            QriskField::Diabetic => "Diabetic",
            QriskField::CholRatio => "Chol/HDL Ratio",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QriskForm {
    pub input: QriskInput,
    pub selected: usize,
}

impl QriskForm {
    pub fn selected_field(&self) -> QriskField {
        QriskField::ALL[self.selected]
    }

    pub fn next_field(&mut self) {
        self.selected = (self.selected + 1) % QriskField::ALL.len();
    }

    pub fn previous_field(&mut self) {
        let len = QriskField::ALL.len();
        self.selected = (self.selected + len - 1) % len;
    }

    pub fn adjust(&mut self, step: Step, coarse: bool) {
        let field = self.selected_field();
        let input = &mut self.input;
        match field {
            QriskField::Age => {
                let amount = if coarse { 10 } else { 1 };
                input.age = step_int(input.age, step, amount, &QRISK_AGE_RANGE);
            }
            QriskField::Gender => input.gender = cycle(&Gender::ALL, input.gender, step),
            QriskField::Ethnicity => {
                input.ethnicity = cycle(&Ethnicity::ALL, input.ethnicity, step)
            }
            QriskField::Smoker => input.is_smoker = !input.is_smoker,
            QriskField::BpMeds => input.on_bp_medication = !input.on_bp_medication,
            QriskField::Diabetic => input.is_diabetic = !input.is_diabetic,
            QriskField::CholRatio => {
                let amount = if coarse { 1.0 } else { 0.1 };
                input.chol_hdl_ratio =
                    step_real(input.chol_hdl_ratio, step, amount, &QRISK_RATIO_RANGE);
            }
        }
    }

    pub fn rows(&self) -> Vec<(&'static str, String)> {
        QriskField::ALL
            .iter()
            .map(|field| {
                let value = match field {
                    QriskField::Age => self.input.age.to_string(),
                    QriskField::Gender => self.input.gender.label().to_string(),
                    QriskField::Ethnicity => self.input.ethnicity.label().to_string(),
                    QriskField::Smoker => yes_no(self.input.is_smoker),
                    QriskField::BpMeds => yes_no(self.input.on_bp_medication),
                    QriskField::Diabetic => yes_no(self.input.is_diabetic),
                    QriskField::CholRatio => format!("{:.1}", self.input.chol_hdl_ratio),
                };
                (field.label(), value)
            })
            .collect()
    }
}
