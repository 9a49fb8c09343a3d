use super::entry::{HistoryEntry, ModelKind};
use crate::scoring::{GeneralInput, GeneralRiskResult, QriskInput};

/// Append-only, insertion-ordered log of calculations for one session.
///
/// Owned by whoever drives the session (a CLI command or the TUI `App`).
/// Dropping it ends the session; nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    entries: Vec<HistoryEntry>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        tracing::debug!(
            model = %entry.kind(),
            score = entry.score(),
            position = self.entries.len() + 1,
            "appended history entry"
        );
        self.entries.push(entry);
    }

    /// Log a general calculation and return the stored entry
    pub fn record_general(
        &mut self,
        input: GeneralInput,
        result: &GeneralRiskResult,
    ) -> &HistoryEntry {
        self.append(HistoryEntry::general(input, result.score));
        &self.entries[self.entries.len() - 1]
    }

    /// Log a QRISK calculation and return the stored entry
    pub fn record_qrisk(&mut self, input: QriskInput, score: f64) -> &HistoryEntry {
        self.append(HistoryEntry::qrisk(input, score));
        &self.entries[self.entries.len() - 1]
    }

    /// All entries in calculation order
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entries for a single model, still in calculation order
    pub fn entries_of(&self, kind: ModelKind) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().filter(move |e| e.kind() == kind)
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
