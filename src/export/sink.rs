use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::error::ExportError;

pub const CSV_FILENAME: &str = "all_risk_scores.csv";
pub const CSV_MIME: &str = "text/csv";
pub const PDF_FILENAME: &str = "risk_report.pdf";
pub const PDF_MIME: &str = "application/pdf";

/// Write an export artifact into `dir` atomically and return its path.
///
/// Creates `dir` if it doesn't exist. A failed write never leaves a
/// partially written file behind.
pub fn write_artifact(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let path = dir.join(filename);
    let io_err = |source: std::io::Error| ExportError::Io {
        path: path.clone(),
        source,
    };

    let mut file = AtomicWriteFile::open(&path).map_err(io_err)?;
    file.write_all(bytes).map_err(io_err)?;
    file.commit().map_err(io_err)?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote export artifact");
    Ok(path)
}

/// MIME type for an artifact, by extension
pub fn mime_for(filename: &str) -> &'static str {
    if filename.to_ascii_lowercase().ends_with(".pdf") {
        PDF_MIME
    } else if filename.to_ascii_lowercase().ends_with(".csv") {
        CSV_MIME
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_artifact_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("exports");

        let path = write_artifact(&dir, "all_risk_scores.csv", b"Model\nGeneral\n").unwrap();

        assert!(path.exists());
        assert_eq!(path, dir.join("all_risk_scores.csv"));
        assert_eq!(std::fs::read(&path).unwrap(), b"Model\nGeneral\n");
    }

    #[test]
    fn test_write_artifact_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        write_artifact(tmp.path(), "risk_report.pdf", b"first").unwrap();
        let path = write_artifact(tmp.path(), "risk_report.pdf", b"second").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }

    #[test]
    fn test_write_artifact_reports_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        // A regular file where a directory is expected
        let blocker = tmp.path().join("not_a_dir");
        std::fs::write(&blocker, b"x").unwrap();

        let result = write_artifact(&blocker.join("nested"), "out.csv", b"data");
        assert!(matches!(result, Err(ExportError::Io { .. })));
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for("risk_report.pdf"), "application/pdf");
        assert_eq!(mime_for("all_risk_scores.CSV"), "text/csv");
        assert_eq!(mime_for("notes.txt"), "application/octet-stream");
    }
}
