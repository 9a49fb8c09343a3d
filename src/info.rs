//! Explanatory text shown alongside the scores: healthy ranges, what the
//! models mean, their limitations and further reading.

pub const DISCLAIMER: &str = "Educational demo only. Not for clinical use.";

/// (topic, guidance) pairs for the General model's inputs
pub const HEALTHY_TIPS: &[(&str, &str)] = &[
    (
        "BMI",
        "18.5-24.9 (consider a nutrition & activity plan if above range)",
    ),
    (
        "Smoking",
        "Not smoking is strongly associated with lower long-term risk",
    ),
    (
        "Blood sugar (diabetes)",
        "Aim for good glycaemic control per clinician advice",
    ),
    (
        "General",
        "Sleep, stress, and regular checkups matter more than people think",
    ),
];

#[derive(Debug, Clone, Copy)]
pub struct InfoSection {
    pub title: &'static str,
    pub paragraphs: &'static [&'static str],
}

pub const SECTIONS: &[InfoSection] = &[
    InfoSection {
        title: "What is QRISK (in general terms)?",
        paragraphs: &[
            "QRISK-type tools estimate 10-year cardiovascular risk using demographics, clinical history, and lipid levels. This app includes a simplified version for demonstration only.",
        ],
    },
    InfoSection {
        title: "What is Cholesterol/HDL Ratio?",
        paragraphs: &[
            "It's total cholesterol divided by HDL (the 'good' cholesterol). Higher ratios typically indicate higher risk.",
        ],
    },
    InfoSection {
        title: "Limitations",
        paragraphs: &[
            "This app is a demonstration and not a medical device.",
            "It uses simplified logic and may not reflect your personal clinical risk.",
            "Always seek professional medical advice for diagnosis or treatment.",
        ],
    },
];

pub const REFERENCES: &[&str] = &[
    "NHS resources on cardiovascular risk and prevention",
    "NICE guidance on lipid modification and cardiovascular risk assessment",
    "Public information from respected health systems (e.g., academic hospitals, national health services)",
    "Primary literature on risk factors and prevention strategies",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limitations_mention_medical_device() {
        let limitations = SECTIONS
            .iter()
            .find(|s| s.title == "Limitations")
            .unwrap();
        assert!(limitations
            .paragraphs
            .iter()
            .any(|p| p.contains("not a medical device")));
    }

    #[test]
    fn test_tips_cover_general_inputs() {
        let topics: Vec<_> = HEALTHY_TIPS.iter().map(|(t, _)| *t).collect();
        assert_eq!(
            topics,
            vec!["BMI", "Smoking", "Blood sugar (diabetes)", "General"]
        );
    }
}
