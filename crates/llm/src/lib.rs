//! `llm` crate — chat-model-backed classifier and generator capabilities.
//!
//! The model returns raw text; label validation stays with the classify
//! step in the engine, so an off-script model answer is rejected there
//! rather than coerced here.

pub mod chat;

use std::sync::Arc;

use async_trait::async_trait;

use nodes::{Category, Classifier, Generator, NodeError, RawClassification};

pub use chat::{ChatConfig, ChatModel};

const CLASSIFY_SYSTEM_PROMPT: &str = "You label customer support queries. Reply with exactly \
     two words on one line: a category (General, Billing, or Technical) and a sentiment \
     (Positive, Neutral, or Negative), separated by a space.";

// ---------------------------------------------------------------------------
// LlmClassifier
// ---------------------------------------------------------------------------

pub struct LlmClassifier {
    model: Arc<ChatModel>,
}

impl LlmClassifier {
    pub fn new(model: Arc<ChatModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl Classifier for LlmClassifier {
    async fn classify(&self, query: &str) -> Result<RawClassification, NodeError> {
        let reply = self
            .model
            .complete(CLASSIFY_SYSTEM_PROMPT, query)
            .await
            .map_err(NodeError::ClassifierUnavailable)?;
        Ok(parse_labels(&reply))
    }
}

/// Split the model's reply into the two raw labels, shedding stray
/// punctuation. Domain validation happens in the classify step, not here.
fn parse_labels(reply: &str) -> RawClassification {
    let mut words = reply
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()));
    RawClassification {
        category: words.next().unwrap_or_default().to_string(),
        sentiment: words.next().unwrap_or_default().to_string(),
    }
}

// ---------------------------------------------------------------------------
// LlmGenerator
// ---------------------------------------------------------------------------

pub struct LlmGenerator {
    model: Arc<ChatModel>,
}

impl LlmGenerator {
    pub fn new(model: Arc<ChatModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl Generator for LlmGenerator {
    async fn generate(&self, query: &str, category: Category) -> Result<String, NodeError> {
        let system = format!(
            "You are a customer support agent. Write a short, helpful reply to the \
             following {category} support query."
        );
        let reply = self
            .model
            .complete(&system, query)
            .await
            .map_err(NodeError::GeneratorUnavailable)?;
        Ok(reply.trim().to_string())
    }
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_split_on_whitespace() {
        let raw = parse_labels("General Neutral");
        assert_eq!(raw.category, "General");
        assert_eq!(raw.sentiment, "Neutral");
    }

    #[test]
    fn punctuation_and_padding_are_shed() {
        let raw = parse_labels("  Billing, Negative.\n");
        assert_eq!(raw.category, "Billing");
        assert_eq!(raw.sentiment, "Negative");
    }

    #[test]
    fn missing_words_become_empty_labels() {
        // Empty labels fail domain validation downstream instead of
        // panicking here.
        let raw = parse_labels("General");
        assert_eq!(raw.category, "General");
        assert_eq!(raw.sentiment, "");
    }
}
