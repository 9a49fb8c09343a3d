use super::error::ExportError;
use crate::session::HistoryEntry;

/// Serialize history entries as comma-separated text.
///
/// The header is the union of every entry's columns in first-appearance
/// order, so General and QRISK rows can share one table. Columns an entry
/// does not have are left empty. Rows follow log order.
pub fn to_csv(entries: &[HistoryEntry]) -> Result<String, ExportError> {
    if entries.is_empty() {
        return Err(ExportError::EmptyLog);
    }

    let rows: Vec<Vec<(&'static str, String)>> = entries
        .iter()
        .map(|entry| {
            entry
                .fields()
                .into_iter()
                .map(|(name, value)| (name, value.to_string()))
                .collect()
        })
        .collect();

    let header = union_columns(&rows);

    let mut output = String::new();
    output.push_str(
        &header
            .iter()
            .map(|h| escape_csv(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    output.push('\n');

    for row in &rows {
        let line = header
            .iter()
            .map(|column| {
                row.iter()
                    .find(|(name, _)| name == column)
                    .map(|(_, value)| escape_csv(value))
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>()
            .join(",");
        output.push_str(&line);
        output.push('\n');
    }

    tracing::debug!(rows = rows.len(), columns = header.len(), "rendered CSV export");
    Ok(output)
}

fn union_columns(rows: &[Vec<(&'static str, String)>]) -> Vec<&'static str> {
    let mut header: Vec<&'static str> = Vec::new();
    for row in rows {
        for (name, _) in row {
            if !header.contains(name) {
                header.push(*name);
            }
        }
    }
    header
}

/// Quote a field if it contains the delimiter, a quote, or a line break
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Ethnicity, Gender, GeneralInput, QriskInput};

    /// Minimal RFC 4180 reader for checking the writer's output
    fn parse_csv(text: &str) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            if in_quotes {
                match c {
                    '"' if chars.peek() == Some(&'"') => {
                        field.push('"');
                        chars.next();
                    }
                    '"' => in_quotes = false,
                    _ => field.push(c),
                }
            } else {
                match c {
                    '"' => in_quotes = true,
                    ',' => row.push(std::mem::take(&mut field)),
                    '\n' => {
                        row.push(std::mem::take(&mut field));
                        rows.push(std::mem::take(&mut row));
                    }
                    _ => field.push(c),
                }
            }
        }
        rows
    }

    fn sample_entries() -> Vec<HistoryEntry> {
        vec![
            HistoryEntry::general(
                GeneralInput {
                    age: 35,
                    bmi: 24.5,
                    is_smoker: false,
                    is_diabetic: false,
                },
                37.1,
            ),
            HistoryEntry::qrisk(
                QriskInput {
                    age: 45,
                    gender: Gender::Male,
                    ethnicity: Ethnicity::SouthAsian,
                    is_smoker: true,
                    on_bp_medication: false,
                    is_diabetic: false,
                    chol_hdl_ratio: 4.5,
                },
                30.75,
            ),
            HistoryEntry::general(
                GeneralInput {
                    age: 80,
                    bmi: 40.0,
                    is_smoker: true,
                    is_diabetic: true,
                },
                100.0,
            ),
        ]
    }

    #[test]
    fn test_empty_log_is_an_error() {
        assert!(matches!(to_csv(&[]), Err(ExportError::EmptyLog)));
    }

    #[test]
    fn test_header_is_union_in_first_appearance_order() {
        let csv = to_csv(&sample_entries()).unwrap();
        let header = csv.lines().next().unwrap();
        assert_eq!(
            header,
            "Model,Age,BMI,Smoker,Diabetic,Score,Gender,Ethnicity,BP meds,Chol/HDL Ratio"
        );
    }

    #[test]
    fn test_roundtrip_heterogeneous_entries() {
        let csv = to_csv(&sample_entries()).unwrap();
        let rows = parse_csv(&csv);
        assert_eq!(rows.len(), 4); // header + 3
        let header = &rows[0];
        let col = |name: &str| header.iter().position(|h| h == name).unwrap();

        let general = &rows[1];
        assert_eq!(general.len(), header.len());
        assert_eq!(general[col("Model")], "General");
        assert_eq!(general[col("Age")], "35");
        assert_eq!(general[col("BMI")], "24.5");
        assert_eq!(general[col("Smoker")], "False");
        assert_eq!(general[col("Score")], "37.1");
        assert_eq!(general[col("Gender")], "");
        assert_eq!(general[col("Chol/HDL Ratio")], "");

        let qrisk = &rows[2];
        assert_eq!(qrisk[col("Model")], "QRISK");
        assert_eq!(qrisk[col("BMI")], "");
        assert_eq!(qrisk[col("Gender")], "Male");
        assert_eq!(qrisk[col("Ethnicity")], "South Asian");
        assert_eq!(qrisk[col("Smoker")], "True");
        assert_eq!(qrisk[col("Chol/HDL Ratio")], "4.5");
        assert_eq!(qrisk[col("Score")], "30.8");

        assert_eq!(rows[3][col("Score")], "100.0");
        assert_eq!(rows[3][col("BMI")], "40.0");
    }

    #[test]
    fn test_rows_follow_log_order() {
        let entries = sample_entries();
        let csv = to_csv(&entries).unwrap();
        let models: Vec<String> = parse_csv(&csv)
            .into_iter()
            .skip(1)
            .map(|row| row[0].clone())
            .collect();
        assert_eq!(models, vec!["General", "QRISK", "General"]);
    }

    #[test]
    fn test_every_line_terminated() {
        let csv = to_csv(&sample_entries()).unwrap();
        assert!(csv.ends_with('\n'));
        assert_eq!(csv.matches('\n').count(), 4);
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("two\nlines"), "\"two\nlines\"");
    }
}
