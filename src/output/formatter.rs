use std::io::IsTerminal;
use owo_colors::OwoColorize;
use serde_json::json;
use terminal_size::{Width, terminal_size};

use crate::scoring::{
    GeneralInput, GeneralRiskResult, QriskInput, RiskBand, general_band, qrisk_band, MAX_SCORE,
};
use crate::info;
use crate::session::HistoryEntry;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with one decimal place ("37.1")
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

fn paint_band(text: &str, band: RiskBand, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match band {
        RiskBand::Low => text.green().bold().to_string(),
        RiskBand::Moderate => text.yellow().bold().to_string(),
        RiskBand::High => text.red().bold().to_string(),
    }
}

/// Format a General result: score out of 100, band, advice, then the
/// per-factor breakdown largest first.
pub fn format_general_result(result: &GeneralRiskResult, use_colors: bool) -> String {
    let band = general_band(result.score);
    let mut lines = vec![
        format!(
            "Risk score: {} / {}",
            paint_band(&format_score(result.score), band, use_colors),
            MAX_SCORE as u32
        ),
        paint_band(band.general_label(), band, use_colors),
        band.general_advice().to_string(),
        String::new(),
        if use_colors {
            "Breakdown".bold().to_string()
        } else {
            "Breakdown".to_string()
        },
    ];

    for item in result.breakdown.sorted_desc() {
        lines.push(format!(
            "  {:<10}{:>6}",
            item.factor.label(),
            format_score(item.contribution)
        ));
    }

    if result.is_capped() {
        let note = format!(
            "  (uncapped total {} capped at {})",
            format_score(result.uncapped_total()),
            MAX_SCORE as u32
        );
        lines.push(if use_colors { note.dimmed().to_string() } else { note });
    }

    lines.join("\n")
}

/// Format a QRISK result: percentage, band and the fixed guidance list
pub fn format_qrisk_result(score: f64, use_colors: bool) -> String {
    let band = qrisk_band(score);
    let mut lines = vec![
        format!(
            "Estimated 10-year risk: {}%",
            paint_band(&format_score(score), band, use_colors)
        ),
        paint_band(band.qrisk_label(), band, use_colors),
    ];
    for advice in RiskBand::qrisk_advice() {
        lines.push(format!("  - {}", advice));
    }
    lines.join("\n")
}

/// Format the session history as a table: index, model, score, then the
/// remaining fields as `key=value`.
pub fn format_history_table(entries: &[HistoryEntry], use_colors: bool) -> String {
    if entries.is_empty() {
        return "No calculations yet.".to_string();
    }

    let term_width = get_terminal_width();

    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let index_str = format!("{:>3}.", idx + 1);
            let model = format!("{:<8}", entry.kind().label());
            let score = format!("{:>6}", format_score(entry.score()));
            let details = entry
                .fields()
                .into_iter()
                .filter(|(key, _)| *key != "Model" && *key != "Score")
                .map(|(key, value)| format!("{}={}", key, value))
                .collect::<Vec<_>>()
                .join(", ");

            // index + model + score + separators
            let fixed_width = index_str.len() + model.len() + score.len() + 4;
            let details = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate(&details, width - fixed_width)
                }
                Some(_) => truncate(&details, 20),
                None => details,
            };

            if use_colors {
                format!(
                    "{} {}  {}  {}",
                    index_str.dimmed(),
                    model.cyan(),
                    score.bold(),
                    details
                )
            } else {
                format!("{} {}  {}  {}", index_str, model, score, details)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the What-If sweeps as two bar charts (score by age, score by BMI).
/// Bars scale to the terminal width; pipes get a fixed 40-column bar.
pub fn format_what_if(
    by_age: &[(u32, f64)],
    by_bmi: &[(f64, f64)],
    use_colors: bool,
) -> String {
    let bar_width = get_terminal_width()
        .map(|w| w.saturating_sub(16).clamp(10, 60))
        .unwrap_or(40);

    let mut lines = Vec::new();
    let heading = |text: &str| {
        if use_colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    };

    lines.push(heading("Risk by age"));
    for (age, score) in by_age {
        lines.push(format!(
            "{:>5}  {:>5}  {}",
            age,
            format_score(*score),
            score_bar(*score, bar_width, general_band(*score), use_colors)
        ));
    }

    lines.push(String::new());
    lines.push(heading("Risk by BMI"));
    for (bmi, score) in by_bmi {
        lines.push(format!(
            "{:>5.1}  {:>5}  {}",
            bmi,
            format_score(*score),
            score_bar(*score, bar_width, general_band(*score), use_colors)
        ));
    }

    lines.join("\n")
}

/// Explanations, limitations, healthy ranges and references, ending with
/// the disclaimer
pub fn format_info(use_colors: bool) -> String {
    let heading = |text: &str| {
        if use_colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    };

    let mut lines = Vec::new();
    for section in info::SECTIONS {
        lines.push(heading(section.title));
        for paragraph in section.paragraphs {
            lines.push(format!("  {}", paragraph));
        }
        lines.push(String::new());
    }

    lines.push(heading("Healthy ranges & quick tips"));
    for (topic, tip) in info::HEALTHY_TIPS {
        lines.push(format!("  - {}: {}", topic, tip));
    }
    lines.push(String::new());

    lines.push(heading("References & further reading"));
    for reference in info::REFERENCES {
        lines.push(format!("  - {}", reference));
    }
    lines.push(String::new());

    if use_colors {
        lines.push(info::DISCLAIMER.dimmed().to_string());
    } else {
        lines.push(info::DISCLAIMER.to_string());
    }
    lines.join("\n")
}

fn score_bar(score: f64, width: usize, band: RiskBand, use_colors: bool) -> String {
    let filled = ((score / MAX_SCORE) * width as f64).round() as usize;
    let bar = "#".repeat(filled.min(width));
    paint_band(&bar, band, use_colors)
}

/// JSON for a General calculation
pub fn format_general_json(input: &GeneralInput, result: &GeneralRiskResult) -> String {
    let value = json!({
        "model": "General",
        "input": input,
        "score": result.score,
        "band": general_band(result.score),
        "breakdown": result.breakdown.sorted_desc(),
    });
    serde_json::to_string_pretty(&value).unwrap_or_default()
}

/// JSON for a QRISK calculation
pub fn format_qrisk_json(input: &QriskInput, score: f64) -> String {
    let value = json!({
        "model": "QRISK",
        "input": input,
        "score": score,
        "band": qrisk_band(score),
    });
    serde_json::to_string_pretty(&value).unwrap_or_default()
}

/// JSON array of history entries in insertion order
pub fn format_history_json(entries: &[HistoryEntry]) -> String {
    serde_json::to_string_pretty(entries).unwrap_or_else(|_| "[]".to_string())
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{compute_general_risk, compute_qrisk_simplified};

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(37.1), "37.1");
        assert_eq!(format_score(100.0), "100.0");
        assert_eq!(format_score(22.75), "22.8");
    }

    #[test]
    fn test_format_general_result_plain() {
        let result = compute_general_risk(&GeneralInput::default());
        let text = format_general_result(&result, false);
        assert!(text.starts_with("Risk score: 37.1 / 100"));
        assert!(text.contains("Moderate risk"));

        // Breakdown sorted largest first: BMI 19.6 before Age 17.5
        let bmi_pos = text.find("BMI").unwrap();
        let age_pos = text.find("Age").unwrap();
        assert!(bmi_pos < age_pos);
        assert!(!text.contains("capped"));
    }

    #[test]
    fn test_format_general_result_capped() {
        let input = GeneralInput {
            age: 100,
            bmi: 60.0,
            is_smoker: true,
            is_diabetic: true,
        };
        let text = format_general_result(&compute_general_risk(&input), false);
        assert!(text.contains("100.0 / 100"));
        assert!(text.contains("High risk"));
        assert!(text.contains("uncapped total 133.0 capped at 100"));
    }

    #[test]
    fn test_format_qrisk_result_plain() {
        let score = compute_qrisk_simplified(&QriskInput::default());
        let text = format_qrisk_result(score, false);
        assert!(text.starts_with("Estimated 10-year risk: 22.8%"));
        assert!(text.contains("High 10-year risk"));
        assert_eq!(text.lines().filter(|l| l.starts_with("  - ")).count(), 3);
    }

    #[test]
    fn test_format_history_table_empty() {
        assert_eq!(format_history_table(&[], false), "No calculations yet.");
    }

    #[test]
    fn test_format_history_table_rows() {
        let entries = vec![
            HistoryEntry::general(GeneralInput::default(), 37.1),
            HistoryEntry::qrisk(QriskInput::default(), 22.75),
        ];
        let text = format_history_table(&entries, false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  1. General"));
        assert!(lines[0].contains("37.1"));
        assert!(lines[1].starts_with("  2. QRISK"));
        assert!(lines[1].contains("22.8"));
    }

    #[test]
    fn test_format_what_if_plain() {
        let by_age = vec![(18, 21.0), (19, 21.5)];
        let by_bmi = vec![(15.0, 29.5), (15.5, 29.9)];
        let text = format_what_if(&by_age, &by_bmi, false);
        assert!(text.starts_with("Risk by age"));
        assert!(text.contains("Risk by BMI"));
        assert!(text.contains("   18   21.0  "));
        assert!(text.contains(" 15.5   29.9  "));
    }

    #[test]
    fn test_format_info_plain() {
        let text = format_info(false);
        assert!(text.starts_with("What is QRISK (in general terms)?"));
        assert!(text.contains("  This app is a demonstration and not a medical device."));
        assert!(text.contains("  - BMI: 18.5-24.9"));
        assert!(text.contains("  - NICE guidance on lipid modification"));
        assert!(text.ends_with("Educational demo only. Not for clinical use."));
    }

    #[test]
    fn test_score_bar_width() {
        assert_eq!(score_bar(50.0, 40, RiskBand::Moderate, false), "#".repeat(20));
        assert_eq!(score_bar(100.0, 40, RiskBand::High, false), "#".repeat(40));
        assert_eq!(score_bar(0.0, 40, RiskBand::Low, false), "");
    }

    #[test]
    fn test_format_general_json() {
        let input = GeneralInput::default();
        let result = compute_general_risk(&input);
        let value: serde_json::Value =
            serde_json::from_str(&format_general_json(&input, &result)).unwrap();
        assert_eq!(value["model"], "General");
        assert_eq!(value["band"], "Moderate");
        assert_eq!(value["input"]["age"], 35);
        assert_eq!(value["breakdown"][0]["factor"], "BMI");
    }

    #[test]
    fn test_format_qrisk_json() {
        let input = QriskInput::default();
        let value: serde_json::Value =
            serde_json::from_str(&format_qrisk_json(&input, 22.75)).unwrap();
        assert_eq!(value["model"], "QRISK");
        assert_eq!(value["score"], 22.75);
        assert_eq!(value["band"], "High");
    }

    #[test]
    fn test_format_history_json_tagged() {
        let entries = vec![HistoryEntry::qrisk(QriskInput::default(), 22.75)];
        let value: serde_json::Value =
            serde_json::from_str(&format_history_json(&entries)).unwrap();
        assert_eq!(value[0]["model"], "QRISK");
    }

    #[test]
    fn test_truncate_long() {
        assert_eq!(truncate("This is a very long title", 15), "This is a ve...");
        assert_eq!(truncate("Short", 20), "Short");
        assert_eq!(truncate("Hello world", 3), "Hel");
    }
}
