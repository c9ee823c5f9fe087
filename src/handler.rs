use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, Field, InputMode};
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => {
            app.tick_animation();
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global quit, works in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // App-bar menu takes priority while open
    if app.show_menu {
        handle_menu(app, key);
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_menu(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.show_menu = false;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.menu_nav_down();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.menu_nav_up();
        }
        KeyCode::Enter => {
            // Single "Log Out" item
            if app.menu_state.selected() == Some(0) {
                app.logout();
            }
        }
        _ => {}
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Theme toggle (the app-bar sun/moon icon)
        KeyCode::Char('t') => app.toggle_theme(),

        // App-bar popup menu
        KeyCode::Char('m') => app.open_menu(),

        // Edit the prompt field
        KeyCode::Char('i') | KeyCode::Char('/') | KeyCode::Enter => {
            app.focus = Field::Prompt;
            app.input_mode = InputMode::Editing;
            app.prompt_cursor = app.prompt_input.chars().count();
        }

        // Edit the language-code field
        KeyCode::Char('l') => {
            app.focus = Field::Language;
            app.input_mode = InputMode::Editing;
            app.lang_cursor = app.lang_input.chars().count();
        }

        // Chat scrolling
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),
        KeyCode::Char('g') => app.scroll_to_top(),
        KeyCode::Char('G') => app.scroll_chat_to_bottom(),

        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    // Input is disabled while a submission is processing; this is what keeps
    // submissions serialized. Esc still works so the user isn't trapped.
    if app.submitting() {
        if key.code == KeyCode::Esc {
            app.input_mode = InputMode::Normal;
        }
        return;
    }

    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }

        // Hop between the prompt and the language-code field
        KeyCode::Tab => {
            app.focus = match app.focus {
                Field::Prompt => {
                    app.lang_cursor = app.lang_input.chars().count();
                    Field::Language
                }
                Field::Language => {
                    app.prompt_cursor = app.prompt_input.chars().count();
                    Field::Prompt
                }
            };
        }

        KeyCode::Enter => match app.focus {
            // Committing the language field lowercases it and moves on to
            // the prompt, matching the original's language handler
            Field::Language => {
                app.lang_input = app.lang_input.trim().to_lowercase();
                app.lang_cursor = app.lang_input.chars().count();
                app.focus = Field::Prompt;
                app.prompt_cursor = app.prompt_input.chars().count();
            }
            Field::Prompt => {
                app.begin_submission();
            }
        },

        KeyCode::Backspace => {
            let (input, cursor) = focused_field(app);
            if *cursor > 0 {
                *cursor -= 1;
                let byte_pos = char_to_byte_index(input, *cursor);
                input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let (input, cursor) = focused_field(app);
            if *cursor < input.chars().count() {
                let byte_pos = char_to_byte_index(input, *cursor);
                input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            let (_, cursor) = focused_field(app);
            *cursor = cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let (input, cursor) = focused_field(app);
            *cursor = (*cursor + 1).min(input.chars().count());
        }
        KeyCode::Home => {
            let (_, cursor) = focused_field(app);
            *cursor = 0;
        }
        KeyCode::End => {
            let (input, cursor) = focused_field(app);
            *cursor = input.chars().count();
        }
        KeyCode::Char(c) => {
            let (input, cursor) = focused_field(app);
            let byte_pos = char_to_byte_index(input, *cursor);
            input.insert(byte_pos, c);
            *cursor += 1;
        }
        _ => {}
    }
}

fn focused_field(app: &mut App) -> (&mut String, &mut usize) {
    match app.focus {
        Field::Prompt => (&mut app.prompt_input, &mut app.prompt_cursor),
        Field::Language => (&mut app.lang_input, &mut app.lang_cursor),
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    // The chat panel is the only scrollable region
    match mouse.kind {
        MouseEventKind::ScrollDown => {
            app.scroll_down();
            app.scroll_down();
            app.scroll_down();
        }
        MouseEventKind::ScrollUp => {
            app.scroll_up();
            app.scroll_up();
            app.scroll_up();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn editing_app() -> App {
        let mut app = App::new(&Config::new());
        app.input_mode = InputMode::Editing;
        app
    }

    #[test]
    fn test_char_to_byte_index_handles_multibyte() {
        let s = "día";
        assert_eq!(char_to_byte_index(s, 0), 0);
        assert_eq!(char_to_byte_index(s, 1), 1);
        assert_eq!(char_to_byte_index(s, 2), 3); // 'í' is two bytes
        assert_eq!(char_to_byte_index(s, 3), 4);
        assert_eq!(char_to_byte_index(s, 10), 4); // past the end clamps
    }

    #[test]
    fn test_typed_chars_go_to_focused_field() {
        let mut app = editing_app();
        for c in "hola".chars() {
            handle_key(&mut app, key(KeyCode::Char(c)));
        }
        assert_eq!(app.prompt_input, "hola");

        handle_key(&mut app, key(KeyCode::Tab));
        for c in "es".chars() {
            handle_key(&mut app, key(KeyCode::Char(c)));
        }
        assert_eq!(app.lang_input, "es");
        assert_eq!(app.prompt_input, "hola");
    }

    #[test]
    fn test_language_commit_lowercases_and_refocuses_prompt() {
        let mut app = editing_app();
        app.focus = Field::Language;
        app.lang_input = "ES".to_string();
        app.lang_cursor = 2;

        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.lang_input, "es");
        assert_eq!(app.focus, Field::Prompt);
    }

    #[test]
    fn test_backspace_is_utf8_safe() {
        let mut app = editing_app();
        app.prompt_input = "día".to_string();
        app.prompt_cursor = 2;

        handle_key(&mut app, key(KeyCode::Backspace));

        assert_eq!(app.prompt_input, "da");
        assert_eq!(app.prompt_cursor, 1);
    }

    #[tokio::test]
    async fn test_editing_keys_ignored_while_submitting() {
        let mut app = editing_app();
        app.prompt_input = "hello".to_string();
        app.lang_input = "es".to_string();
        app.begin_submission();
        assert!(app.submitting());

        handle_key(&mut app, key(KeyCode::Char('x')));
        handle_key(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.prompt_input, "hello");

        // Enter must not start a second submission either
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.prompt_input, "hello");

        if let Some(task) = app.submit_task.take() {
            task.abort();
        }
    }

    #[test]
    fn test_menu_enter_triggers_logout_and_closes() {
        let mut app = App::new(&Config::new());
        app.input_mode = InputMode::Normal;

        handle_key(&mut app, key(KeyCode::Char('m')));
        assert!(app.show_menu);

        handle_key(&mut app, key(KeyCode::Enter));
        assert!(!app.show_menu);
    }

    #[test]
    fn test_theme_toggle_key() {
        let mut app = App::new(&Config::new());
        let before = app.theme;

        handle_key(&mut app, key(KeyCode::Char('t')));
        assert_ne!(app.theme, before);

        handle_key(&mut app, key(KeyCode::Char('t')));
        assert_eq!(app.theme, before);
    }

    #[test]
    fn test_ctrl_c_quits_in_editing_mode() {
        let mut app = editing_app();
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }
}
