//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::config::ThemeMode;
use crate::scoring::{RiskBand, MAX_SCORE};

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Band colors (traffic light pattern)
    pub band_high: Color,
    pub band_moderate: Color,
    pub band_low: Color,

    pub bar_empty: Color,

    // Table colors
    pub row_alt_bg: Color,
    pub index_color: Color,

    // Styles
    pub header_style: Style,
    pub row_selected: Style,
    pub field_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub text: Color,

    // Tab colors
    pub tab_active_style: Style,
    pub tab_inactive_style: Style,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
}

impl ThemeColors {
    /// Dark theme palette
    pub fn dark() -> Self {
        Self {
            band_high: Color::Red,
            band_moderate: Color::Yellow,
            band_low: Color::Green,
            bar_empty: Color::DarkGray,
            row_alt_bg: Color::Indexed(235),
            index_color: Color::DarkGray,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            field_selected: Style::new().fg(Color::Cyan).bold(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            text: Color::White,
            tab_active_style: Style::new().fg(Color::Cyan).bold().reversed(),
            tab_inactive_style: Style::new().fg(Color::DarkGray),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
        }
    }

    /// Light theme palette (darker accents for contrast on white)
    pub fn light() -> Self {
        Self {
            band_high: Color::Rgb(180, 0, 0),
            band_moderate: Color::Rgb(160, 110, 0),
            band_low: Color::Rgb(0, 120, 0),
            bar_empty: Color::Indexed(250),
            row_alt_bg: Color::Indexed(254),
            index_color: Color::Indexed(244),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            field_selected: Style::new().fg(Color::Blue).bold(),
            muted: Color::Indexed(242),
            title_color: Color::Blue,
            text: Color::Black,
            tab_active_style: Style::new().fg(Color::Blue).bold().reversed(),
            tab_inactive_style: Style::new().fg(Color::Indexed(244)),
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Blue,
            flash_success: Color::Rgb(0, 120, 0),
            flash_error: Color::Rgb(180, 0, 0),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
            popup_bg: Color::Indexed(255),
        }
    }

    pub fn band_color(&self, band: RiskBand) -> Color {
        match band {
            RiskBand::High => self.band_high,
            RiskBand::Moderate => self.band_moderate,
            RiskBand::Low => self.band_low,
        }
    }

    /// Bar fill ratio for a score on the 0-100 scale
    pub fn bar_ratio(score: f64) -> f64 {
        (score / MAX_SCORE).clamp(0.0, 1.0)
    }
}

/// Pick a palette for the configured mode. `Auto` asks the terminal for
/// its background luminance and falls back to dark when it can't tell.
pub fn resolve_theme(mode: ThemeMode) -> ThemeColors {
    match mode {
        ThemeMode::Dark => ThemeColors::dark(),
        ThemeMode::Light => ThemeColors::light(),
        ThemeMode::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            Ok(_) => ThemeColors::dark(),
            Err(e) => {
                tracing::debug!(error = %e, "could not detect terminal background");
                ThemeColors::dark()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_colors_dark() {
        let theme = ThemeColors::dark();
        assert_eq!(theme.band_color(RiskBand::Low), Color::Green);
        assert_eq!(theme.band_color(RiskBand::Moderate), Color::Yellow);
        assert_eq!(theme.band_color(RiskBand::High), Color::Red);
    }

    #[test]
    fn test_explicit_modes_skip_detection() {
        assert_eq!(resolve_theme(ThemeMode::Dark).text, Color::White);
        assert_eq!(resolve_theme(ThemeMode::Light).text, Color::Black);
    }

    #[test]
    fn test_bar_ratio_clamped() {
        assert_eq!(ThemeColors::bar_ratio(50.0), 0.5);
        assert_eq!(ThemeColors::bar_ratio(150.0), 1.0);
        assert_eq!(ThemeColors::bar_ratio(-1.0), 0.0);
    }
}
