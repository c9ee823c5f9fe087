use serde::{Deserialize, Serialize};

/// Who a chat line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    You,
    Translation,
}

impl Sender {
    /// Row label shown above the message text.
    pub fn label(&self) -> &'static str {
        match self {
            Sender::You => "You:",
            Sender::Translation => "Translated Text:",
        }
    }
}

/// One chat line. Immutable after creation; display color is derived from
/// the current theme at render time, never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub language_code: String,
    /// Text that was actually handed to the speech engine, if it ran.
    pub spoken_text: Option<String>,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>, language_code: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            language_code: language_code.into(),
            spoken_text: None,
        }
    }

    pub fn with_spoken_text(mut self, spoken: impl Into<String>) -> Self {
        self.spoken_text = Some(spoken.into());
        self
    }
}

/// Append-only, session-lifetime chat history. Insertion order is display
/// order; entries are never reordered or removed.
#[derive(Debug, Default)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a request/response pair: the original text first, the
    /// translation second.
    pub fn push_pair(&mut self, original: ChatMessage, translated: ChatMessage) {
        self.messages.push(original);
        self.messages.push(translated);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_labels() {
        assert_eq!(Sender::You.label(), "You:");
        assert_eq!(Sender::Translation.label(), "Translated Text:");
    }

    #[test]
    fn test_push_pair_preserves_order() {
        let mut history = ChatHistory::new();
        history.push_pair(
            ChatMessage::new(Sender::You, "hello", "es"),
            ChatMessage::new(Sender::Translation, "hola", "es").with_spoken_text("hola"),
        );

        assert_eq!(history.len(), 2);
        let messages: Vec<_> = history.iter().collect();
        assert_eq!(messages[0].sender, Sender::You);
        assert_eq!(messages[0].text, "hello");
        assert_eq!(messages[1].sender, Sender::Translation);
        assert_eq!(messages[1].text, "hola");
        assert_eq!(messages[1].spoken_text.as_deref(), Some("hola"));
    }

    #[test]
    fn test_history_is_append_only_across_pairs() {
        let mut history = ChatHistory::new();
        for (original, translated) in [("one", "uno"), ("two", "dos"), ("three", "tres")] {
            history.push_pair(
                ChatMessage::new(Sender::You, original, "es"),
                ChatMessage::new(Sender::Translation, translated, "es"),
            );
        }

        assert_eq!(history.len(), 6);
        let texts: Vec<_> = history.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["one", "uno", "two", "dos", "three", "tres"]);
    }

    #[test]
    fn test_spoken_text_defaults_to_none() {
        let msg = ChatMessage::new(Sender::You, "hello", "fr");
        assert!(msg.spoken_text.is_none());
    }
}
