//! Rule-based capability implementations.
//!
//! Deterministic, dependency-free stand-ins for the chat-model-backed
//! classifier and generator. The CLI uses them when no model endpoint is
//! configured; they also make end-to-end runs reproducible in tests.

use async_trait::async_trait;

use crate::capabilities::{Classifier, Generator, RawClassification};
use crate::state::{Category, Sentiment};
use crate::NodeError;

const BILLING_HINTS: &[&str] = &[
    "bill", "charge", "refund", "invoice", "payment", "price", "subscription",
];
const TECHNICAL_HINTS: &[&str] = &[
    "error", "crash", "bug", "install", "login", "password", "reset", "broken",
];
const NEGATIVE_HINTS: &[&str] = &[
    "terrible", "awful", "angry", "worst", "never again", "unacceptable", "useless",
];
const POSITIVE_HINTS: &[&str] = &["thank", "great", "love", "awesome", "excellent"];

fn contains_any(text: &str, hints: &[&str]) -> bool {
    hints.iter().any(|hint| text.contains(hint))
}

// ---------------------------------------------------------------------------
// RuleClassifier
// ---------------------------------------------------------------------------

/// Keyword-driven classifier. Emits labels through the same raw-string
/// interface as a live model, so the validation path stays identical.
pub struct RuleClassifier;

#[async_trait]
impl Classifier for RuleClassifier {
    async fn classify(&self, query: &str) -> Result<RawClassification, NodeError> {
        let lower = query.to_lowercase();

        let category = if contains_any(&lower, BILLING_HINTS) {
            Category::Billing
        } else if contains_any(&lower, TECHNICAL_HINTS) {
            Category::Technical
        } else {
            Category::General
        };

        // Negative hints win over positive ones: a furious "thanks for
        // nothing" must still escalate.
        let sentiment = if contains_any(&lower, NEGATIVE_HINTS) {
            Sentiment::Negative
        } else if contains_any(&lower, POSITIVE_HINTS) {
            Sentiment::Positive
        } else {
            Sentiment::Neutral
        };

        Ok(RawClassification {
            category: category.to_string(),
            sentiment: sentiment.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// TemplateGenerator
// ---------------------------------------------------------------------------

/// Produces a category-tagged acknowledgement from a fixed template.
pub struct TemplateGenerator;

#[async_trait]
impl Generator for TemplateGenerator {
    async fn generate(&self, query: &str, category: Category) -> Result<String, NodeError> {
        let opening = match category {
            Category::Billing => "Thanks for reaching out about your billing question.",
            Category::Technical => "Thanks for the report; the steps below usually resolve this.",
            Category::General | Category::Unset => "Thanks for getting in touch.",
        };

        Ok(format!(
            "{opening} A support agent has reviewed \"{query}\" and the relevant \
             details for your account are available in the support portal."
        ))
    }
}
