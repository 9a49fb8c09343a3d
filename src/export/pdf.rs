use chrono::{Local, NaiveDateTime};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use std::io::BufWriter;

use super::error::ExportError;
use crate::session::HistoryEntry;

pub const REPORT_TITLE: &str = "Health Risk Report";
pub const REPORT_DISCLAIMER: &str =
    "Educational demo only. Not a medical device and not for clinical use.";

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_X: f32 = 20.0;
const TOP_Y: f32 = 277.0;
const BOTTOM_Y: f32 = 20.0;
const WRAP_CHARS: usize = 85;

/// A rendered report held in memory. The caller decides where it goes.
#[derive(Debug, Clone)]
pub struct PdfReport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportLine {
    Title(String),
    Text(String),
    Field { key: String, value: String },
    Note(String),
}

/// Report content in render order: title, timestamp, one line per field
/// (entry field order), then the disclaimer.
pub fn report_lines(entry: &HistoryEntry, generated_at: NaiveDateTime) -> Vec<ReportLine> {
    let mut lines = vec![
        ReportLine::Title(REPORT_TITLE.to_string()),
        ReportLine::Text(format!(
            "Generated on: {}",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        )),
    ];

    lines.extend(entry.fields().into_iter().map(|(key, value)| ReportLine::Field {
        key: key.to_string(),
        value: value.to_string(),
    }));

    lines.push(ReportLine::Note(REPORT_DISCLAIMER.to_string()));
    lines
}

/// Render one history entry to an A4 PDF, starting new pages as needed.
pub fn render_pdf_report(
    entry: &HistoryEntry,
    generated_at: NaiveDateTime,
    filename: &str,
) -> Result<PdfReport, ExportError> {
    let (doc, page1, layer1) =
        PdfDocument::new(REPORT_TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let font = add_font(&doc, BuiltinFont::Helvetica)?;
    let bold = add_font(&doc, BuiltinFont::HelveticaBold)?;

    let mut cursor = PageCursor {
        doc: &doc,
        layer: doc.get_page(page1).get_layer(layer1),
        y: TOP_Y,
        pages: 1,
    };

    for line in report_lines(entry, generated_at) {
        match line {
            ReportLine::Title(text) => {
                cursor.write(&text, 18.0, &bold, 12.0);
            }
            ReportLine::Text(text) => {
                cursor.write(&text, 10.0, &font, 10.0);
            }
            ReportLine::Field { key, value } => {
                for (i, chunk) in wrap_text(&format!("{}: {}", key, value), WRAP_CHARS)
                    .iter()
                    .enumerate()
                {
                    let face = if i == 0 { &bold } else { &font };
                    cursor.write(chunk, 11.0, face, 7.0);
                }
            }
            ReportLine::Note(text) => {
                cursor.y -= 6.0;
                for chunk in wrap_text(&text, WRAP_CHARS) {
                    cursor.write(&chunk, 8.0, &font, 4.5);
                }
            }
        }
    }

    let pages = cursor.pages;
    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ExportError::Pdf(format!("save error: {e}")))?;
    let bytes = buf
        .into_inner()
        .map_err(|e| ExportError::Pdf(format!("buffer error: {e}")))?;

    tracing::debug!(pages, bytes = bytes.len(), filename, "rendered PDF report");
    Ok(PdfReport {
        filename: filename.to_string(),
        bytes,
    })
}

/// Render with the current local wall-clock time as the generation stamp
pub fn render_pdf_report_now(
    entry: &HistoryEntry,
    filename: &str,
) -> Result<PdfReport, ExportError> {
    render_pdf_report(entry, Local::now().naive_local(), filename)
}

fn add_font(doc: &PdfDocumentReference, font: BuiltinFont) -> Result<IndirectFontRef, ExportError> {
    doc.add_builtin_font(font)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))
}

struct PageCursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
    pages: usize,
}

impl PageCursor<'_> {
    /// Write one line at the cursor and move down by `advance` mm
    fn write(&mut self, text: &str, size: f32, font: &IndirectFontRef, advance: f32) {
        if self.y < BOTTOM_Y {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = TOP_Y;
            self.pages += 1;
        }
        self.layer.use_text(text, size, Mm(MARGIN_X), Mm(self.y), font);
        self.y -= advance;
    }
}

/// Simple word-wrap for fixed-width PDF lines
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
