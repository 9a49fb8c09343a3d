pub mod batch;
pub mod entry;
pub mod log;

pub use batch::{load_batch, run_batch, validate_batch, BatchFile, Calculation};
pub use entry::{FieldValue, HistoryEntry, ModelKind};
pub use log::SessionLog;
