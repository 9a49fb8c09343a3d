pub mod csv;
pub mod error;
pub mod pdf;
pub mod sink;

pub use csv::to_csv;
pub use error::ExportError;
pub use pdf::{render_pdf_report, render_pdf_report_now, report_lines, PdfReport, ReportLine};
pub use sink::{mime_for, write_artifact, CSV_FILENAME, CSV_MIME, PDF_FILENAME, PDF_MIME};

use std::path::{Path, PathBuf};

use crate::session::SessionLog;

/// Export the whole session as CSV into `dir`
pub fn export_session_csv(
    log: &SessionLog,
    dir: &Path,
    filename: &str,
) -> Result<PathBuf, ExportError> {
    let csv = to_csv(log.entries())?;
    write_artifact(dir, filename, csv.as_bytes())
}

/// Export one entry of the session as a PDF report into `dir`.
/// `index` selects the entry (0-based); `None` means the latest.
pub fn export_entry_pdf(
    log: &SessionLog,
    index: Option<usize>,
    dir: &Path,
    filename: &str,
) -> Result<PathBuf, ExportError> {
    let entry = match index {
        Some(i) => log.entries().get(i).ok_or(if log.is_empty() {
            ExportError::EmptyLog
        } else {
            ExportError::NoSuchEntry {
                index: i,
                len: log.len(),
            }
        })?,
        None => log.last().ok_or(ExportError::EmptyLog)?,
    };

    let report = render_pdf_report_now(entry, filename)?;
    write_artifact(dir, &report.filename, &report.bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{GeneralInput, QriskInput};
    use crate::session::HistoryEntry;

    #[test]
    fn test_export_empty_session_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let log = SessionLog::new();
        assert!(matches!(
            export_session_csv(&log, tmp.path(), CSV_FILENAME),
            Err(ExportError::EmptyLog)
        ));
        assert!(matches!(
            export_entry_pdf(&log, None, tmp.path(), PDF_FILENAME),
            Err(ExportError::EmptyLog)
        ));
        assert!(!tmp.path().join(CSV_FILENAME).exists());
    }

    #[test]
    fn test_export_session_csv_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut log = SessionLog::new();
        log.append(HistoryEntry::general(GeneralInput::default(), 37.1));
        log.append(HistoryEntry::qrisk(QriskInput::default(), 22.75));

        let path = export_session_csv(&log, tmp.path(), CSV_FILENAME).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.lines().nth(1).unwrap().starts_with("General,35,24.5"));
        assert!(content.lines().nth(2).unwrap().starts_with("QRISK,45,"));
    }

    #[test]
    fn test_export_entry_pdf_latest_and_selected() {
        let tmp = tempfile::tempdir().unwrap();
        let mut log = SessionLog::new();
        log.append(HistoryEntry::general(GeneralInput::default(), 37.1));

        let path = export_entry_pdf(&log, None, tmp.path(), PDF_FILENAME).unwrap();
        assert_eq!(path, tmp.path().join(PDF_FILENAME));
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));

        let path = export_entry_pdf(&log, Some(0), tmp.path(), "first.pdf").unwrap();
        assert!(path.ends_with("first.pdf"));

        assert!(export_entry_pdf(&log, Some(5), tmp.path(), "missing.pdf").is_err());
    }

    #[test]
    fn test_export_entry_pdf_bad_index_is_not_empty_log() {
        let tmp = tempfile::tempdir().unwrap();
        let mut log = SessionLog::new();
        log.append(HistoryEntry::general(GeneralInput::default(), 37.1));

        let err = export_entry_pdf(&log, Some(5), tmp.path(), PDF_FILENAME).unwrap_err();
        assert!(matches!(err, ExportError::NoSuchEntry { index: 5, len: 1 }));
        assert_eq!(
            err.to_string(),
            "No history entry #6 (the session has 1 entries)"
        );
        assert!(!tmp.path().join(PDF_FILENAME).exists());

        let empty = SessionLog::new();
        assert!(matches!(
            export_entry_pdf(&empty, Some(0), tmp.path(), PDF_FILENAME),
            Err(ExportError::EmptyLog)
        ));
    }

    #[test]
    fn test_failed_export_leaves_session_intact() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        let mut log = SessionLog::new();
        log.append(HistoryEntry::general(GeneralInput::default(), 37.1));

        let result = export_session_csv(&log, &blocker.join("sub"), CSV_FILENAME);
        assert!(matches!(result, Err(ExportError::Io { .. })));
        assert_eq!(log.len(), 1);
    }
}
