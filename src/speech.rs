use std::path::Path;
use thiserror::Error;
use tokio::process::Command;

/// Non-fatal: callers log this and carry on as if speech succeeded.
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech engine {0:?} could not be started: {1}")]
    Spawn(String, std::io::Error),
    #[error("speech engine {0:?} exited with {1}")]
    Engine(String, std::process::ExitStatus),
}

fn default_engine() -> &'static str {
    if cfg!(target_os = "macos") {
        "say"
    } else {
        "espeak-ng"
    }
}

/// Drives a system text-to-speech program as a child process. Playback is
/// wait-until-done: `speak` returns only after the engine exits.
#[derive(Debug, Clone)]
pub struct SpeechClient {
    engine: String,
}

impl SpeechClient {
    /// `engine` overrides the platform default speech program.
    pub fn new(engine: Option<String>) -> Self {
        Self {
            engine: engine.unwrap_or_else(|| default_engine().to_string()),
        }
    }

    pub fn engine(&self) -> &str {
        &self.engine
    }

    /// Argument list for one utterance. espeak-style engines take a voice
    /// selector; `say` only takes the text, its voice is chosen by the OS
    /// and the language code is ignored.
    fn build_args(&self, text: &str, language_code: &str) -> Vec<String> {
        let program = Path::new(&self.engine)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.engine);

        match program {
            "say" => vec![text.to_string()],
            _ => vec!["-v".to_string(), language_code.to_string(), text.to_string()],
        }
    }

    /// Speak `text` in the given language, blocking until playback finishes.
    pub async fn speak(&self, text: &str, language_code: &str) -> Result<(), SpeechError> {
        let args = self.build_args(text, language_code);
        tracing::debug!(engine = %self.engine, lang = %language_code, "speaking translation");

        let status = Command::new(&self.engine)
            .args(&args)
            .status()
            .await
            .map_err(|e| SpeechError::Spawn(self.engine.clone(), e))?;

        if status.success() {
            Ok(())
        } else {
            Err(SpeechError::Engine(self.engine.clone(), status))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_espeak_args_carry_voice_selector() {
        let client = SpeechClient::new(Some("espeak-ng".to_string()));
        let args = client.build_args("hola", "es");
        assert_eq!(args, ["-v", "es", "hola"]);
    }

    #[test]
    fn test_say_args_drop_language_code() {
        let client = SpeechClient::new(Some("say".to_string()));
        let args = client.build_args("hola", "es");
        assert_eq!(args, ["hola"]);
    }

    #[test]
    fn test_engine_path_is_reduced_to_program_name() {
        let client = SpeechClient::new(Some("/usr/bin/say".to_string()));
        let args = client.build_args("bonjour", "fr");
        assert_eq!(args, ["bonjour"]);
    }

    #[test]
    fn test_default_engine_is_platform_dependent() {
        let client = SpeechClient::new(None);
        assert!(!client.engine().is_empty());
    }

    #[tokio::test]
    async fn test_missing_engine_reports_spawn_error() {
        let client = SpeechClient::new(Some("definitely-not-a-tts-engine".to_string()));
        let err = client.speak("hello", "en").await.unwrap_err();
        assert!(matches!(err, SpeechError::Spawn(_, _)));
    }
}
