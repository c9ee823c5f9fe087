use ratatui::widgets::ListState;

use crate::config::Config;
use crate::message::{ChatHistory, ChatMessage, Sender};
use crate::speech::SpeechClient;
use crate::theme::ThemeMode;
use crate::translate::{TranslateClient, TranslationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Which input field receives typed characters while editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Prompt,
    Language,
}

pub const MENU_ITEMS: [&str; 1] = ["Log Out"];

/// What one finished submission produced. The event loop turns this into
/// the two chat rows and clears the inputs.
#[derive(Debug)]
pub struct SubmissionOutcome {
    pub original: String,
    pub language_code: String,
    pub translated: String,
    pub spoken: bool,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub theme: ThemeMode,
    pub input_mode: InputMode,
    pub focus: Field,

    // Chat panel
    pub chat: ChatHistory,
    pub chat_scroll: u16,
    pub chat_height: u16, // inner height of the chat area, set during render
    pub chat_width: u16,  // inner width, for wrap calculations

    // Prompt controller fields
    pub prompt_input: String,
    pub prompt_cursor: usize, // char index, not byte index
    pub lang_input: String,
    pub lang_cursor: usize,

    // In-flight submission; input is disabled while this is live so
    // submissions stay strictly serialized
    pub submit_task: Option<tokio::task::JoinHandle<Result<SubmissionOutcome, TranslationError>>>,
    pub animation_frame: u8, // 0-2 for the ellipsis animation

    // App-bar menu
    pub show_menu: bool,
    pub menu_state: ListState,

    // External services
    pub translator: TranslateClient,
    pub speech: SpeechClient,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let translator = TranslateClient::new(config.translate_url(), config.api_key.clone());
        let speech = SpeechClient::new(config.speech_engine.clone());
        tracing::info!(
            translate_url = config.translate_url(),
            speech_engine = speech.engine(),
            "starting session"
        );

        Self {
            should_quit: false,
            theme: ThemeMode::Light,
            input_mode: InputMode::Normal,
            focus: Field::Prompt,

            chat: ChatHistory::new(),
            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,

            prompt_input: String::new(),
            prompt_cursor: 0,
            lang_input: config.default_language.clone().unwrap_or_default(),
            lang_cursor: 0,

            submit_task: None,
            animation_frame: 0,

            show_menu: false,
            menu_state: ListState::default(),

            translator,
            speech,
        }
    }

    pub fn submitting(&self) -> bool {
        self.submit_task.is_some()
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
    }

    /// Stub: the original app only logs this action.
    pub fn logout(&mut self) {
        tracing::info!("Logout action triggered.");
        self.show_menu = false;
    }

    /// Start the translate -> speak pipeline for the current field values.
    /// No-op while a submission is already in flight or the prompt is empty;
    /// validation and service failures surface later as a `TranslationError`
    /// on the finished task.
    pub fn begin_submission(&mut self) {
        if self.submitting() || self.prompt_input.is_empty() {
            return;
        }

        // The original lowercases the language field on commit.
        let lang = self.lang_input.trim().to_lowercase();
        self.lang_input = lang.clone();
        self.lang_cursor = self.lang_cursor.min(self.lang_input.chars().count());

        let text = self.prompt_input.clone();
        let translator = self.translator.clone();
        let speech = self.speech.clone();

        self.input_mode = InputMode::Normal;
        self.scroll_chat_to_bottom();

        self.submit_task = Some(tokio::spawn(async move {
            let translated = translator.translate(&text, &lang).await?;

            // Best-effort: a speech failure never aborts the submission.
            let spoken = match speech.speak(&translated, &lang).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, "Error speaking text, continuing");
                    false
                }
            };

            Ok(SubmissionOutcome {
                original: text,
                language_code: lang,
                translated,
                spoken,
            })
        }));
    }

    /// Apply the result of a finished submission. Success appends the
    /// original/translated pair and clears both fields; failure leaves the
    /// chat and both fields exactly as they were.
    pub fn finish_submission(&mut self, result: Result<SubmissionOutcome, TranslationError>) {
        match result {
            Ok(outcome) => {
                let original =
                    ChatMessage::new(Sender::You, outcome.original, outcome.language_code.clone());
                let mut translated = ChatMessage::new(
                    Sender::Translation,
                    outcome.translated.clone(),
                    outcome.language_code,
                );
                if outcome.spoken {
                    translated = translated.with_spoken_text(outcome.translated);
                }
                self.chat.push_pair(original, translated);

                self.prompt_input.clear();
                self.prompt_cursor = 0;
                self.lang_input.clear();
                self.lang_cursor = 0;

                self.scroll_chat_to_bottom();
            }
            Err(e) => {
                // Input retained so the user can fix the code and retry.
                tracing::error!(error = %e, "translation failed, submission dropped");
            }
        }
    }

    /// Tick the ellipsis animation while a submission is in flight.
    pub fn tick_animation(&mut self) {
        if self.submitting() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    // Chat scrolling
    pub fn scroll_down(&mut self) {
        let max_scroll = self.chat_total_lines().saturating_sub(self.chat_height);
        if self.chat_scroll < max_scroll {
            self.chat_scroll = self.chat_scroll.saturating_add(1);
        }
    }

    pub fn scroll_up(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    pub fn scroll_to_top(&mut self) {
        self.chat_scroll = 0;
    }

    /// Pin the newest entry into view (auto-scroll on append).
    pub fn scroll_chat_to_bottom(&mut self) {
        let total_lines = self.chat_total_lines();
        let visible_height = if self.chat_height > 0 { self.chat_height } else { 20 };

        if total_lines > visible_height {
            self.chat_scroll = total_lines.saturating_sub(visible_height);
        } else {
            self.chat_scroll = 0;
        }
    }

    /// Rendered line count of the chat, accounting for wrapping. Mirrors the
    /// layout in `ui::render_chat`: label line, wrapped text lines, blank
    /// separator, plus the in-flight indicator.
    fn chat_total_lines(&self) -> u16 {
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total_lines: u16 = 0;

        for msg in self.chat.iter() {
            total_lines += 1; // sender label
            for line in msg.text.lines() {
                // Character count, not byte length, for UTF-8 text
                let char_count = line.chars().count();
                if char_count == 0 {
                    total_lines += 1;
                } else {
                    total_lines += ((char_count / wrap_width) + 1) as u16;
                }
            }
            total_lines += 1; // blank line after message
        }

        if self.submitting() {
            total_lines += 2; // label + "Translating..."
        }

        total_lines
    }

    // Menu navigation
    pub fn open_menu(&mut self) {
        self.show_menu = true;
        self.menu_state.select(Some(0));
    }

    pub fn menu_nav_down(&mut self) {
        let len = MENU_ITEMS.len();
        if len > 0 {
            let i = self.menu_state.selected().unwrap_or(0);
            self.menu_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn menu_nav_up(&mut self) {
        let i = self.menu_state.selected().unwrap_or(0);
        self.menu_state.select(Some(i.saturating_sub(1)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::message_fg;

    fn test_app() -> App {
        App::new(&Config::new())
    }

    fn outcome(original: &str, lang: &str, translated: &str, spoken: bool) -> SubmissionOutcome {
        SubmissionOutcome {
            original: original.to_string(),
            language_code: lang.to_string(),
            translated: translated.to_string(),
            spoken,
        }
    }

    #[test]
    fn test_successful_submission_appends_pair_and_clears_inputs() {
        let mut app = test_app();
        app.prompt_input = "hello".to_string();
        app.prompt_cursor = 5;
        app.lang_input = "es".to_string();
        app.lang_cursor = 2;

        app.finish_submission(Ok(outcome("hello", "es", "hola", true)));

        assert_eq!(app.chat.len(), 2);
        let messages: Vec<_> = app.chat.iter().collect();
        assert_eq!(messages[0].sender, Sender::You);
        assert_eq!(messages[0].text, "hello");
        assert_eq!(messages[1].sender, Sender::Translation);
        assert_eq!(messages[1].text, "hola");
        assert_eq!(messages[1].spoken_text.as_deref(), Some("hola"));

        assert!(app.prompt_input.is_empty());
        assert_eq!(app.prompt_cursor, 0);
        assert!(app.lang_input.is_empty());
        assert_eq!(app.lang_cursor, 0);
    }

    #[test]
    fn test_failed_translation_leaves_chat_and_inputs_untouched() {
        let mut app = test_app();
        app.prompt_input = "hello".to_string();
        app.lang_input = "xx".to_string();

        app.finish_submission(Err(TranslationError::UnsupportedLanguage("xx".to_string())));

        assert_eq!(app.chat.len(), 0);
        assert_eq!(app.prompt_input, "hello");
        assert_eq!(app.lang_input, "xx");
    }

    #[test]
    fn test_speech_failure_still_appends_pair() {
        let mut app = test_app();
        app.prompt_input = "hello".to_string();

        app.finish_submission(Ok(outcome("hello", "fr", "bonjour", false)));

        assert_eq!(app.chat.len(), 2);
        let messages: Vec<_> = app.chat.iter().collect();
        assert_eq!(messages[1].text, "bonjour");
        assert!(messages[1].spoken_text.is_none());
    }

    #[test]
    fn test_theme_toggle_recolors_and_double_toggle_restores() {
        let mut app = test_app();
        app.finish_submission(Ok(outcome("hello", "es", "hola", true)));

        let before = message_fg(app.theme);
        app.toggle_theme();
        assert_ne!(message_fg(app.theme), before);

        // Stored content and order never change with the theme
        let texts: Vec<_> = app.chat.iter().map(|m| m.text.clone()).collect();
        assert_eq!(texts, ["hello", "hola"]);

        app.toggle_theme();
        assert_eq!(message_fg(app.theme), before);
    }

    #[tokio::test]
    async fn test_begin_submission_lowercases_language_field() {
        let mut app = test_app();
        app.prompt_input = "hello".to_string();
        app.lang_input = " ES ".to_string();

        app.begin_submission();

        assert_eq!(app.lang_input, "es");
        assert!(app.submitting());
        if let Some(task) = app.submit_task.take() {
            task.abort();
        }
    }

    #[tokio::test]
    async fn test_second_submission_is_blocked_while_in_flight() {
        let mut app = test_app();
        app.prompt_input = "hello".to_string();
        app.lang_input = "es".to_string();

        app.begin_submission();
        assert!(app.submitting());

        let before = app.chat.len();
        app.prompt_input = "another".to_string();
        app.begin_submission();

        // Still exactly one task, prompt untouched
        assert_eq!(app.prompt_input, "another");
        assert_eq!(app.chat.len(), before);

        if let Some(task) = app.submit_task.take() {
            task.abort();
        }
    }

    #[test]
    fn test_empty_prompt_is_not_submitted() {
        let mut app = test_app();
        app.lang_input = "es".to_string();
        app.begin_submission();
        assert!(!app.submitting());
    }

    #[test]
    fn test_auto_scroll_pins_newest_entry() {
        let mut app = test_app();
        app.chat_height = 4;
        app.chat_width = 40;

        for _ in 0..5 {
            app.finish_submission(Ok(outcome("hello", "es", "hola", true)));
        }

        // 5 pairs of 3 lines each = 30 lines, 4 visible
        assert_eq!(app.chat_scroll, 26);
    }
}
