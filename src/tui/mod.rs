pub mod app;
pub mod event;
pub mod form;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};
use form::Step;

/// Run the interactive session until the user quits. Returns the app so
/// the caller can inspect the final session.
pub async fn run_tui(mut app: App) -> anyhow::Result<App> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(250);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(e.into());
        }

        match events.next().await {
            Some(Event::Key(key)) => handle_key_event(&mut app, key),
            Some(Event::Tick) => app.update_flash(),
            None => break Ok(()),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    result.map(|()| app)
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => match key.code {
            // Quit
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true
            }

            // Tabs
            KeyCode::Tab => app.next_view(),
            KeyCode::BackTab => app.previous_view(),

            // Field / row navigation
            KeyCode::Char('j') | KeyCode::Down => app.next_row(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_row(),

            // Field adjustment
            KeyCode::Char('h') | KeyCode::Left => app.adjust_field(Step::Down, false),
            KeyCode::Char('l') | KeyCode::Right => app.adjust_field(Step::Up, false),
            KeyCode::Char('H') => app.adjust_field(Step::Down, true),
            KeyCode::Char('L') => app.adjust_field(Step::Up, true),

            KeyCode::Enter => app.calculate(),
            KeyCode::Char('b') => app.show_breakdown(),
            KeyCode::Char('t') => app.toggle_tips(),
            KeyCode::Char('e') => app.export_csv(),
            KeyCode::Char('p') => app.export_pdf(),
            KeyCode::Char('?') => app.show_help(),

            _ => {}
        },
        app::InputMode::Breakdown => match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('q') => app.dismiss_breakdown(),
            KeyCode::Char('j') | KeyCode::Down if app.current_view == app::View::History => {
                app.next_row()
            }
            KeyCode::Char('k') | KeyCode::Up if app.current_view == app::View::History => {
                app.previous_row()
            }
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    fn test_app() -> App {
        App::new(&Config::default(), ThemeColors::dark())
    }

    #[test]
    fn test_adjust_then_calculate() {
        let mut app = test_app();
        handle_key_event(&mut app, key(KeyCode::Char('L')));
        assert_eq!(app.general_form.input.age, 45);
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.session.len(), 1);
        // 0.5*45 + 0.8*24.5
        assert_eq!(app.session.entries()[0].score(), 42.1);
    }

    #[test]
    fn test_tab_switches_model() {
        let mut app = test_app();
        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.current_view, app::View::Qrisk);
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.session.entries()[0].kind(), crate::session::ModelKind::Qrisk);
        handle_key_event(&mut app, key(KeyCode::BackTab));
        assert_eq!(app.current_view, app::View::General);
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = test_app();
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert_eq!(app.input_mode, app::InputMode::Help);
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert_eq!(app.input_mode, app::InputMode::Normal);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_breakdown_popup_keys() {
        let mut app = test_app();
        handle_key_event(&mut app, key(KeyCode::Enter));
        handle_key_event(&mut app, key(KeyCode::Char('b')));
        assert_eq!(app.input_mode, app::InputMode::Breakdown);
        // Adjustments are ignored while the popup is open
        handle_key_event(&mut app, key(KeyCode::Char('l')));
        assert_eq!(app.general_form.input.age, 35);
        handle_key_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.input_mode, app::InputMode::Normal);
    }

    #[test]
    fn test_tips_and_info_scroll_keys() {
        let mut app = test_app();
        handle_key_event(&mut app, key(KeyCode::Char('t')));
        assert!(app.show_tips);

        app.set_view(app::View::Info);
        handle_key_event(&mut app, key(KeyCode::Char('j')));
        handle_key_event(&mut app, key(KeyCode::Down));
        assert_eq!(app.info_scroll, 2);
        handle_key_event(&mut app, key(KeyCode::Char('k')));
        assert_eq!(app.info_scroll, 1);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }
}
