use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal to the current submission: nothing is appended to the chat and the
/// input fields keep their values.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("unrecognized language code: {0:?}")]
    UnsupportedLanguage(String),
    #[error("translation service error: {0}")]
    Service(String),
    #[error("translation request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

#[derive(Deserialize)]
struct TranslateErrorResponse {
    error: String,
}

/// Checks the shape of a language code before any network call: short,
/// lowercase ASCII letters, optionally a region suffix ("pt-br"). The
/// service decides whether the code is actually supported.
pub fn validate_language_code(code: &str) -> Result<(), TranslationError> {
    let valid = !code.is_empty()
        && code.len() <= 8
        && code
            .chars()
            .all(|c| c.is_ascii_lowercase() || c == '-')
        && !code.starts_with('-')
        && !code.ends_with('-');

    if valid {
        Ok(())
    } else {
        Err(TranslationError::UnsupportedLanguage(code.to_string()))
    }
}

/// Client for a LibreTranslate-compatible translation service.
#[derive(Clone)]
pub struct TranslateClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl TranslateClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Translate `text` into `target_language`. Source language is detected
    /// by the service. No retries, no caching.
    pub async fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslationError> {
        validate_language_code(target_language)?;

        let url = format!("{}/translate", self.base_url);
        let request = TranslateRequest {
            q: text,
            source: "auto",
            target: target_language,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();

        if !status.is_success() {
            // The service reports unsupported target codes as 400 with an
            // error body; anything else is a service failure.
            let detail = response
                .json::<TranslateErrorResponse>()
                .await
                .map(|e| e.error)
                .unwrap_or_else(|_| status.to_string());

            if status == StatusCode::BAD_REQUEST {
                return Err(TranslationError::UnsupportedLanguage(format!(
                    "{} ({})",
                    target_language, detail
                )));
            }
            return Err(TranslationError::Service(detail));
        }

        let translated: TranslateResponse = response.json().await?;
        Ok(translated.translated_text)
    }
}
