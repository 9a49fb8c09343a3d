use ratatui::prelude::*;
use ratatui::layout::Margin;
use ratatui::symbols::Marker;
use ratatui::widgets::{
    Axis, Block, Cell, Chart, Clear, Dataset, GraphType, Paragraph, Row, Table, Tabs, Wrap,
};

use crate::info;
use crate::scoring::what_if::{risk_by_age, risk_by_bmi};
use crate::scoring::{
    compute_general_risk, general_band, qrisk_band, GeneralRiskResult, RiskBand, MAX_SCORE,
};
use crate::session::ModelKind;
use crate::tui::app::{App, FlashKind, InputMode, View};
use crate::tui::theme::ThemeColors;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 8 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Tabs(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    match app.current_view {
        View::General => render_general(frame, chunks[2], app),
        View::Qrisk => render_qrisk(frame, chunks[2], app),
        View::WhatIf => render_what_if(frame, chunks[2], app),
        View::History => render_history(frame, chunks[2], app),
        View::Info => render_info(frame, chunks[2], app),
    }
    render_status_bar(frame, chunks[3], app);

    match app.input_mode {
        InputMode::Help => render_help_popup(frame, &app.theme),
        InputMode::Breakdown => {
            if let Some(result) = app.breakdown_result() {
                render_breakdown_popup(frame, &app.theme, &result);
            }
        }
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let left = "Risk Calc";
    let disclaimer = format!("  {}", info::DISCLAIMER);
    let right = format!(
        "{} General / {} QRISK",
        app.session.entries_of(ModelKind::General).count(),
        app.session.entries_of(ModelKind::Qrisk).count()
    );
    let padding_len =
        (area.width as usize).saturating_sub(left.len() + disclaimer.len() + right.len());

    let title = Line::from(vec![
        Span::styled(left, Style::default().fg(app.theme.title_color).bold()),
        Span::styled(disclaimer, Style::default().fg(app.theme.flash_error)),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right, Style::default().fg(app.theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<&str> = View::ALL.iter().map(|v| v.title()).collect();
    let selected = View::ALL
        .iter()
        .position(|v| *v == app.current_view)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive_style)
        .highlight_style(app.theme.tab_active_style)
        .divider(" | ");

    frame.render_widget(tabs, area);
}

/// Split the body into a fixed-width form column and a result column
fn split_body(area: Rect) -> (Rect, Rect) {
    let cols = Layout::horizontal([Constraint::Length(34), Constraint::Fill(1)]).split(area);
    (cols[0], cols[1])
}

fn render_form(
    frame: &mut Frame,
    area: Rect,
    theme: &ThemeColors,
    title: &str,
    rows: Vec<(&'static str, String)>,
    selected: usize,
) {
    let lines: Vec<Line> = rows
        .into_iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let marker = if i == selected { "> " } else { "  " };
            let style = if i == selected {
                theme.field_selected
            } else {
                Style::default().fg(theme.text)
            };
            Line::from(vec![
                Span::styled(format!("{}{:<16}", marker, label), style),
                Span::styled(format!("< {} >", value), style),
            ])
        })
        .collect();

    let block = Block::bordered()
        .title(format!(" {} ", title))
        .border_style(Style::default().fg(theme.muted));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_general(frame: &mut Frame, area: Rect, app: &App) {
    let (form_area, result_area) = split_body(area);
    render_form(
        frame,
        form_area,
        &app.theme,
        "Inputs",
        app.general_form.rows(),
        app.general_form.selected,
    );

    let theme = &app.theme;
    let block = Block::bordered()
        .title(" Result ")
        .border_style(Style::default().fg(theme.muted));

    let Some(result) = &app.last_general else {
        let hint = Paragraph::new("Press Enter to calculate")
            .style(Style::default().fg(theme.muted))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(hint, result_area);
        return;
    };

    let band = general_band(result.score);
    let color = theme.band_color(band);
    let bar_width = (result_area.width as usize).saturating_sub(14).min(40);

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Risk score: "),
            Span::styled(format!("{:.1}", result.score), Style::default().fg(color).bold()),
            Span::raw(format!(" / {}", MAX_SCORE as u32)),
        ]),
        score_bar(result.score, bar_width, band, theme),
        Line::from(Span::styled(band.general_label(), Style::default().fg(color).bold())),
        Line::from(""),
        Line::from(band.general_advice()),
        Line::from(""),
        Line::from(Span::styled("Breakdown", theme.header_style)),
    ];
    lines.extend(breakdown_lines(result, bar_width, theme));

    if app.show_tips {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Healthy ranges & quick tips",
            theme.header_style,
        )));
        lines.extend(tip_lines(theme));
    } else {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "t: healthy ranges & quick tips",
            Style::default().fg(theme.muted),
        )));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, result_area);
}

fn tip_lines(theme: &ThemeColors) -> Vec<Line<'static>> {
    info::HEALTHY_TIPS
        .iter()
        .map(|(topic, tip)| {
            Line::from(vec![
                Span::styled(format!("- {}: ", topic), Style::default().fg(theme.text).bold()),
                Span::raw(*tip),
            ])
        })
        .collect()
}

fn render_qrisk(frame: &mut Frame, area: Rect, app: &App) {
    let (form_area, result_area) = split_body(area);
    render_form(
        frame,
        form_area,
        &app.theme,
        "Inputs",
        app.qrisk_form.rows(),
        app.qrisk_form.selected,
    );

    let theme = &app.theme;
    let block = Block::bordered()
        .title(" Result ")
        .border_style(Style::default().fg(theme.muted));

    let Some(score) = app.last_qrisk else {
        let hint = Paragraph::new("Press Enter to calculate")
            .style(Style::default().fg(theme.muted))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(hint, result_area);
        return;
    };

    let band = qrisk_band(score);
    let color = theme.band_color(band);
    let bar_width = (result_area.width as usize).saturating_sub(14).min(40);

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Estimated 10-year risk: "),
            Span::styled(format!("{:.1}%", score), Style::default().fg(color).bold()),
        ]),
        score_bar(score, bar_width, band, theme),
        Line::from(Span::styled(band.qrisk_label(), Style::default().fg(color).bold())),
        Line::from(""),
    ];
    for advice in RiskBand::qrisk_advice() {
        lines.push(Line::from(format!("- {}", advice)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Simplified demo model. Not the real QRISK algorithm.",
        Style::default().fg(theme.muted),
    )));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, result_area);
}

fn render_what_if(frame: &mut Frame, area: Rect, app: &App) {
    let (form_area, chart_area) = split_body(area);
    let theme = &app.theme;
    let base = app.what_if_form.input;

    let form_rows = Layout::vertical([Constraint::Length(6), Constraint::Fill(1)]).split(form_area);
    render_form(
        frame,
        form_rows[0],
        theme,
        "Base inputs",
        app.what_if_form.rows(),
        app.what_if_form.selected,
    );

    let base_score = compute_general_risk(&base).score;
    let summary = vec![
        Line::from(vec![
            Span::raw("Score at base: "),
            Span::styled(
                format!("{:.1}", base_score),
                Style::default().fg(theme.band_color(general_band(base_score))).bold(),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Smoking and diabetes stay fixed while age or BMI varies.",
            Style::default().fg(theme.muted),
        )),
    ];
    frame.render_widget(
        Paragraph::new(summary).wrap(Wrap { trim: true }),
        form_rows[1].inner(Margin::new(1, 1)),
    );

    let by_age: Vec<(f64, f64)> = risk_by_age(&base)
        .into_iter()
        .map(|(age, score)| (age as f64, score))
        .collect();
    let by_bmi = risk_by_bmi(&base);

    let charts = Layout::vertical([Constraint::Fill(1), Constraint::Fill(1)]).split(chart_area);
    render_curve(
        frame,
        charts[0],
        theme,
        "Risk vs Age (BMI fixed)",
        "Age",
        &by_age,
        [18.0, 100.0],
    );
    render_curve(
        frame,
        charts[1],
        theme,
        "Risk vs BMI (Age fixed)",
        "BMI",
        &by_bmi,
        [15.0, 45.0],
    );
}

fn render_curve(
    frame: &mut Frame,
    area: Rect,
    theme: &ThemeColors,
    title: &str,
    x_title: &str,
    points: &[(f64, f64)],
    x_bounds: [f64; 2],
) {
    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme.title_color))
        .data(points);

    let x_labels = [
        format!("{}", x_bounds[0]),
        format!("{}", (x_bounds[0] + x_bounds[1]) / 2.0),
        format!("{}", x_bounds[1]),
    ];

    let chart = Chart::new(vec![dataset])
        .block(
            Block::bordered()
                .title(format!(" {} ", title))
                .border_style(Style::default().fg(theme.muted)),
        )
        .x_axis(
            Axis::default()
                .title(x_title)
                .style(Style::default().fg(theme.muted))
                .bounds(x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(theme.muted))
                .bounds([0.0, MAX_SCORE])
                .labels(["0", "50", "100"]),
        );

    frame.render_widget(chart, area);
}

/// Info text: model explanations, limitations, healthy ranges, references
fn info_lines(theme: &ThemeColors) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for section in info::SECTIONS {
        lines.push(Line::from(Span::styled(section.title, theme.header_style)));
        for paragraph in section.paragraphs {
            lines.push(Line::from(format!("  {}", paragraph)));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "Healthy ranges & quick tips",
        theme.header_style,
    )));
    lines.extend(tip_lines(theme));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "References & further reading",
        theme.header_style,
    )));
    for reference in info::REFERENCES {
        lines.push(Line::from(format!("- {}", reference)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        info::DISCLAIMER,
        Style::default().fg(theme.flash_error),
    )));
    lines
}

fn render_info(frame: &mut Frame, area: Rect, app: &mut App) {
    let lines = info_lines(&app.theme);
    let max_scroll = lines.len().saturating_sub(1) as u16;
    app.info_scroll = app.info_scroll.min(max_scroll);

    let block = Block::bordered()
        .title(" Information, Limitations & References ")
        .border_style(Style::default().fg(app.theme.muted));
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.info_scroll, 0))
        .block(block);
    frame.render_widget(paragraph, area);
}

fn render_history(frame: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let entries = app.session.entries();

    if entries.is_empty() {
        let empty_msg = Paragraph::new("No calculations yet")
            .style(Style::default().fg(theme.muted))
            .alignment(Alignment::Center);
        frame.render_widget(empty_msg, area);
        return;
    }

    let rows: Vec<Row> = entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let band = match entry.kind() {
                ModelKind::General => general_band(entry.score()),
                ModelKind::Qrisk => qrisk_band(entry.score()),
            };
            let details = entry
                .fields()
                .into_iter()
                .filter(|(key, _)| *key != "Model" && *key != "Score")
                .map(|(key, value)| format!("{}: {}", key, value))
                .collect::<Vec<_>>()
                .join("  ");

            // Alternating row background (odd rows get subtle background)
            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(format!("{}.", idx + 1)).style(Style::default().fg(theme.index_color)),
                Cell::from(entry.kind().label()),
                Cell::from(format!("{:>5.1}", entry.score()))
                    .style(Style::default().fg(theme.band_color(band))),
                Cell::from(details),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Fill(1),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "Model", "Score", "Inputs"])
                .style(theme.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(theme.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let text = if let Some((ref msg, kind, _)) = app.flash_message {
        let msg_color = match kind {
            FlashKind::Success => theme.flash_success,
            FlashKind::Error => theme.flash_error,
            FlashKind::Info => theme.text,
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints: &[(&str, &str)] = match app.current_view {
            View::General => &[
                ("j/k", ":field "),
                ("h/l", ":adjust "),
                ("Enter", ":calculate "),
                ("b", ":breakdown "),
                ("t", ":tips "),
                ("e", ":csv "),
                ("p", ":pdf "),
                ("Tab", ":next "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            View::Qrisk => &[
                ("j/k", ":field "),
                ("h/l", ":adjust "),
                ("Enter", ":calculate "),
                ("e", ":csv "),
                ("p", ":pdf "),
                ("Tab", ":next "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            View::WhatIf => &[
                ("j/k", ":field "),
                ("h/l", ":adjust "),
                ("H/L", ":coarse "),
                ("Tab", ":next "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            View::Info => &[
                ("j/k", ":scroll "),
                ("Tab", ":next "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            View::History => &[
                ("j/k", ":nav "),
                ("b", ":breakdown "),
                ("e", ":csv "),
                ("p", ":pdf selected "),
                ("Tab", ":next "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
        };

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::styled(*label, Style::default().fg(theme.muted)));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

fn score_bar(score: f64, width: usize, band: RiskBand, theme: &ThemeColors) -> Line<'static> {
    let filled = (ThemeColors::bar_ratio(score) * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled(
            "█".repeat(filled),
            Style::default().fg(theme.band_color(band)),
        ));
    }
    if empty > 0 {
        spans.push(Span::styled("░".repeat(empty), Style::default().fg(theme.bar_empty)));
    }
    Line::from(spans)
}

/// One line per factor, largest contribution first, bars on the 0-100 scale
fn breakdown_lines(
    result: &GeneralRiskResult,
    bar_width: usize,
    theme: &ThemeColors,
) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = result
        .breakdown
        .sorted_desc()
        .into_iter()
        .map(|item| {
            let filled =
                (ThemeColors::bar_ratio(item.contribution) * bar_width as f64).round() as usize;
            Line::from(vec![
                Span::raw(format!("{:<9}{:>5.1} ", item.factor.label(), item.contribution)),
                Span::styled("█".repeat(filled), Style::default().fg(theme.title_color)),
            ])
        })
        .collect();

    if result.is_capped() {
        lines.push(Line::from(Span::styled(
            format!(
                "Uncapped total {:.1}, capped at {}",
                result.uncapped_total(),
                MAX_SCORE as u32
            ),
            Style::default().fg(theme.muted),
        )));
    }
    lines
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn render_breakdown_popup(frame: &mut Frame, theme: &ThemeColors, result: &GeneralRiskResult) {
    let popup_area = centered_rect_fixed(50, 10, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Score Breakdown ", theme.popup_title))
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines = vec![Line::from(vec![
        Span::raw("Score: "),
        Span::styled(
            format!("{:.1}", result.score),
            Style::default().fg(theme.band_color(general_band(result.score))).bold(),
        ),
    ])];
    lines.extend(breakdown_lines(result, 25, theme));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc / b to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(52, 17, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Keyboard Shortcuts ", theme.popup_title))
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let shortcuts = [
        ("Tab / S-Tab", "Next / previous tab"),
        ("j / k", "Select field, row, or scroll"),
        ("h / l", "Decrease / increase field"),
        ("H / L", "Coarse decrease / increase"),
        ("Enter", "Calculate and log result"),
        ("b", "Show score breakdown (General)"),
        ("t", "Toggle healthy ranges & tips"),
        ("e", "Export session as CSV"),
        ("p", "Export PDF (selected or latest)"),
        ("?", "Show/hide this help"),
        ("q / Ctrl-c", "Quit"),
    ];

    let mut help_lines: Vec<Line> = shortcuts
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("{:<14}", key), Style::default().fg(theme.status_key_color).bold()),
                Span::raw(*desc),
            ])
        })
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_centered_rect_fixed_clamps() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = centered_rect_fixed(50, 16, area);
        assert_eq!(rect, Rect::new(0, 0, 20, 10));

        let rect = centered_rect_fixed(10, 4, area);
        assert_eq!(rect, Rect::new(5, 3, 10, 4));
    }

    #[test]
    fn test_draw_general_result() {
        let mut app = App::new(&Config::default(), ThemeColors::dark());
        app.calculate();

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        let text = buffer_text(&terminal);

        assert!(text.contains("Risk score: 37.1 / 100"));
        assert!(text.contains("Moderate risk"));
        assert!(text.contains("Breakdown"));
    }

    #[test]
    fn test_title_shows_disclaimer_and_counts() {
        let mut app = App::new(&Config::default(), ThemeColors::dark());
        app.calculate();
        app.set_view(View::Qrisk);
        app.calculate();
        app.calculate();

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        let text = buffer_text(&terminal);
        let title = text.lines().next().unwrap();

        assert!(title.contains("Educational demo only. Not for clinical use."));
        assert!(title.contains("1 General / 2 QRISK"));
    }

    #[test]
    fn test_draw_general_tips_toggle() {
        let mut app = App::new(&Config::default(), ThemeColors::dark());
        app.calculate();

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        assert!(!buffer_text(&terminal).contains("18.5-24.9"));

        app.toggle_tips();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Healthy ranges & quick tips"));
        assert!(text.contains("18.5-24.9"));
    }

    #[test]
    fn test_draw_what_if_charts() {
        let mut app = App::new(&Config::default(), ThemeColors::dark());
        app.set_view(View::WhatIf);

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        let text = buffer_text(&terminal);

        assert!(text.contains("Base inputs"));
        assert!(text.contains("Risk vs Age (BMI fixed)"));
        assert!(text.contains("Risk vs BMI (Age fixed)"));
        // 0.5*40 + 0.8*27
        assert!(text.contains("Score at base: 41.6"));
    }

    #[test]
    fn test_draw_info_view() {
        let mut app = App::new(&Config::default(), ThemeColors::dark());
        app.set_view(View::Info);

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        let text = buffer_text(&terminal);

        assert!(text.contains("What is QRISK (in general terms)?"));
        assert!(text.contains("What is Cholesterol/HDL Ratio?"));
        assert!(text.contains("not a medical device"));
    }

    #[test]
    fn test_info_scroll_is_clamped_to_content() {
        let mut app = App::new(&Config::default(), ThemeColors::dark());
        app.set_view(View::Info);
        app.info_scroll = u16::MAX;

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        let max = info_lines(&app.theme).len() as u16 - 1;
        assert_eq!(app.info_scroll, max);
        assert!(buffer_text(&terminal).contains("Educational demo only"));
    }

    #[test]
    fn test_draw_history_and_too_small() {
        let mut app = App::new(&Config::default(), ThemeColors::dark());
        app.calculate();
        app.set_view(View::History);

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        assert!(buffer_text(&terminal).contains("General"));

        let mut small = Terminal::new(TestBackend::new(20, 5)).unwrap();
        small.draw(|frame| draw(frame, &mut app)).unwrap();
        assert!(buffer_text(&small).contains("Terminal too small"));
    }
}
