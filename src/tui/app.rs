use std::time::Instant;

use crate::config::{Config, ExportConfig};
use crate::export;
use crate::scoring::what_if::WHAT_IF_BASE;
use crate::scoring::{
    compute_general_risk, compute_qrisk_simplified, general_band, qrisk_band, validate_general,
    validate_qrisk, GeneralRiskResult,
};
use crate::session::{HistoryEntry, SessionLog};
use crate::tui::form::{GeneralForm, QriskForm, Step};
use crate::tui::theme::ThemeColors;

const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    General,
    Qrisk,
    WhatIf,
    History,
    Info,
}

impl View {
    pub const ALL: [View; 5] = [
        View::General,
        View::Qrisk,
        View::WhatIf,
        View::History,
        View::Info,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            View::General => "General",
            View::Qrisk => "QRISK",
            View::WhatIf => "What-If",
            View::History => "History",
            View::Info => "Info",
        }
    }

    fn index(&self) -> usize {
        match self {
            View::General => 0,
            View::Qrisk => 1,
            View::WhatIf => 2,
            View::History => 3,
            View::Info => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
    Breakdown,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

/// State for one interactive session. Owns the session log; dropping the
/// app ends the session.
pub struct App {
    pub session: SessionLog,
    pub general_form: GeneralForm,
    pub qrisk_form: QriskForm,
    pub what_if_form: GeneralForm,
    pub show_tips: bool,
    pub info_scroll: u16,
    pub last_general: Option<GeneralRiskResult>,
    pub last_qrisk: Option<f64>,
    pub table_state: ratatui::widgets::TableState,
    pub current_view: View,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, FlashKind, Instant)>,
    pub should_quit: bool,
    pub export: ExportConfig,
    pub theme: ThemeColors,
}

impl App {
    pub fn new(config: &Config, theme: ThemeColors) -> Self {
        Self {
            session: SessionLog::new(),
            general_form: GeneralForm::default(),
            qrisk_form: QriskForm::default(),
            what_if_form: GeneralForm {
                input: WHAT_IF_BASE,
                selected: 0,
            },
            show_tips: false,
            info_scroll: 0,
            last_general: None,
            last_qrisk: None,
            table_state: ratatui::widgets::TableState::default(),
            current_view: View::General,
            input_mode: InputMode::Normal,
            flash_message: None,
            should_quit: false,
            export: config.export.clone(),
            theme,
        }
    }

    pub fn next_view(&mut self) {
        let i = (self.current_view.index() + 1) % View::ALL.len();
        self.set_view(View::ALL[i]);
    }

    pub fn previous_view(&mut self) {
        let len = View::ALL.len();
        let i = (self.current_view.index() + len - 1) % len;
        self.set_view(View::ALL[i]);
    }

    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
        if view == View::History {
            // Select the most recent entry when entering the history tab
            let len = self.session.len();
            self.table_state
                .select(if len == 0 { None } else { Some(len - 1) });
        }
    }

    /// Move down: next form field, next history row, or scroll the info text
    pub fn next_row(&mut self) {
        match self.current_view {
            View::General => self.general_form.next_field(),
            View::Qrisk => self.qrisk_form.next_field(),
            View::WhatIf => self.what_if_form.next_field(),
            View::Info => self.info_scroll = self.info_scroll.saturating_add(1),
            View::History => {
                let len = self.session.len();
                if len == 0 {
                    return;
                }
                let i = match self.table_state.selected() {
                    Some(i) if i + 1 < len => i + 1,
                    _ => 0,
                };
                self.table_state.select(Some(i));
            }
        }
    }

    pub fn previous_row(&mut self) {
        match self.current_view {
            View::General => self.general_form.previous_field(),
            View::Qrisk => self.qrisk_form.previous_field(),
            View::WhatIf => self.what_if_form.previous_field(),
            View::Info => self.info_scroll = self.info_scroll.saturating_sub(1),
            View::History => {
                let len = self.session.len();
                if len == 0 {
                    return;
                }
                let i = match self.table_state.selected() {
                    Some(0) | None => len - 1,
                    Some(i) => i - 1,
                };
                self.table_state.select(Some(i));
            }
        }
    }

    pub fn adjust_field(&mut self, step: Step, coarse: bool) {
        match self.current_view {
            View::General => self.general_form.adjust(step, coarse),
            View::Qrisk => self.qrisk_form.adjust(step, coarse),
            View::WhatIf => self.what_if_form.adjust(step, coarse),
            View::History | View::Info => {}
        }
    }

    /// Show or hide the healthy ranges under the General result
    pub fn toggle_tips(&mut self) {
        self.show_tips = !self.show_tips;
    }

    /// Score the current form, show the result and append it to the log
    pub fn calculate(&mut self) {
        match self.current_view {
            View::General => {
                let input = self.general_form.input;
                if let Err(errors) = validate_general(&input) {
                    self.show_flash(format!("Invalid input: {}", errors.join("; ")), FlashKind::Error);
                    return;
                }
                let result = compute_general_risk(&input);
                let band = general_band(result.score);
                self.session.record_general(input, &result);
                self.show_flash(
                    format!("General score {:.1} / 100 ({})", result.score, band.general_label()),
                    FlashKind::Success,
                );
                self.last_general = Some(result);
            }
            View::Qrisk => {
                let input = self.qrisk_form.input;
                if let Err(errors) = validate_qrisk(&input) {
                    self.show_flash(format!("Invalid input: {}", errors.join("; ")), FlashKind::Error);
                    return;
                }
                let score = compute_qrisk_simplified(&input);
                self.session.record_qrisk(input, score);
                self.show_flash(
                    format!("Estimated 10-year risk {:.1}% ({})", score, qrisk_band(score).qrisk_label()),
                    FlashKind::Success,
                );
                self.last_qrisk = Some(score);
            }
            View::WhatIf | View::History | View::Info => {}
        }
    }

    pub fn selected_entry(&self) -> Option<&HistoryEntry> {
        self.table_state
            .selected()
            .and_then(|i| self.session.entries().get(i))
    }

    /// Breakdown to show in the popup: the latest General result on the
    /// General tab, or a recomputation of the selected General history entry.
    pub fn breakdown_result(&self) -> Option<GeneralRiskResult> {
        match self.current_view {
            View::General => self.last_general.clone(),
            View::History => match self.selected_entry() {
                Some(HistoryEntry::General(record)) => Some(compute_general_risk(&record.input)),
                _ => None,
            },
            View::Qrisk | View::WhatIf | View::Info => None,
        }
    }

    pub fn show_breakdown(&mut self) {
        if self.breakdown_result().is_some() {
            self.input_mode = InputMode::Breakdown;
        } else if self.current_view == View::Qrisk {
            self.show_flash("QRISK has no per-factor breakdown".to_string(), FlashKind::Info);
        } else {
            self.show_flash("No General result to break down yet".to_string(), FlashKind::Info);
        }
    }

    pub fn dismiss_breakdown(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Export the whole session as CSV into the configured directory
    pub fn export_csv(&mut self) {
        if self.session.is_empty() {
            self.show_flash(
                "Nothing to export: run a calculation first".to_string(),
                FlashKind::Info,
            );
            return;
        }
        let dir = self.export.export_dir();
        match export::export_session_csv(&self.session, &dir, &self.export.csv_filename) {
            Ok(path) => self.show_flash(
                format!(
                    "Exported {} rows to {} ({})",
                    self.session.len(),
                    path.display(),
                    export::mime_for(&self.export.csv_filename)
                ),
                FlashKind::Success,
            ),
            Err(e) => {
                tracing::warn!(error = %e, "CSV export failed");
                self.show_flash(format!("Export failed: {}", e), FlashKind::Error);
            }
        }
    }

    /// Export a PDF report of the selected history entry, or the latest
    /// entry outside the history tab
    pub fn export_pdf(&mut self) {
        if self.session.is_empty() {
            self.show_flash(
                "Nothing to export: run a calculation first".to_string(),
                FlashKind::Info,
            );
            return;
        }
        let index = match self.current_view {
            View::History => self.table_state.selected(),
            _ => None,
        };
        let dir = self.export.export_dir();
        match export::export_entry_pdf(&self.session, index, &dir, &self.export.pdf_filename) {
            Ok(path) => self.show_flash(
                format!(
                    "Saved report to {} ({})",
                    path.display(),
                    export::mime_for(&self.export.pdf_filename)
                ),
                FlashKind::Success,
            ),
            Err(e) => {
                tracing::warn!(error = %e, "PDF export failed");
                self.show_flash(format!("Export failed: {}", e), FlashKind::Error);
            }
        }
    }

    pub fn update_flash(&mut self) {
        if let Some((_, _, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String, kind: FlashKind) {
        self.flash_message = Some((msg, kind, Instant::now()));
    }
}
