use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Nothing to export: the session log is empty")]
    EmptyLog,

    #[error("No history entry #{} (the session has {len} entries)", .index + 1)]
    NoSuchEntry { index: usize, len: usize },

    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
