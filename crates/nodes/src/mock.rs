//! Mock capabilities — test doubles for `Classifier`, `Generator`, and
//! `Store`.
//!
//! Each mock records every call it receives so tests can assert which
//! branches of a pipeline actually ran.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::capabilities::{Classifier, Generator, RawClassification, Store, StoreReceipt};
use crate::error::{NodeError, StoreError};
use crate::state::{Category, TicketState};

// ---------------------------------------------------------------------------
// MockClassifier
// ---------------------------------------------------------------------------

/// A classifier that returns a programmed pair of raw labels, or fails.
pub struct MockClassifier {
    outcome: Result<RawClassification, String>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockClassifier {
    /// Always answer with the given labels (raw, unvalidated — out-of-domain
    /// values are deliberately representable).
    pub fn returning(category: impl Into<String>, sentiment: impl Into<String>) -> Self {
        Self {
            outcome: Ok(RawClassification {
                category: category.into(),
                sentiment: sentiment.into(),
            }),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always fail as unavailable.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self {
            outcome: Err(msg.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of times `classify` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All queries seen, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn classify(&self, query: &str) -> Result<RawClassification, NodeError> {
        self.calls.lock().unwrap().push(query.to_owned());
        match &self.outcome {
            Ok(raw) => Ok(raw.clone()),
            Err(msg) => Err(NodeError::ClassifierUnavailable(msg.clone())),
        }
    }
}

// ---------------------------------------------------------------------------
// MockGenerator
// ---------------------------------------------------------------------------

/// A generator that returns a programmed response, or fails.
pub struct MockGenerator {
    outcome: Result<String, String>,
    calls: Arc<Mutex<Vec<(String, Category)>>>,
}

impl MockGenerator {
    pub fn returning(text: impl Into<String>) -> Self {
        Self {
            outcome: Ok(text.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self {
            outcome: Err(msg.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of times `generate` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All `(query, category)` pairs seen, in call order.
    pub fn calls(&self) -> Vec<(String, Category)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, query: &str, category: Category) -> Result<String, NodeError> {
        self.calls.lock().unwrap().push((query.to_owned(), category));
        match &self.outcome {
            Ok(text) => Ok(text.clone()),
            Err(msg) => Err(NodeError::GeneratorUnavailable(msg.clone())),
        }
    }
}

// ---------------------------------------------------------------------------
// MockStore
// ---------------------------------------------------------------------------

/// A store that keeps accepted records in memory, or fails every write.
pub struct MockStore {
    fail_with: Option<String>,
    saved: Arc<Mutex<Vec<TicketState>>>,
}

impl MockStore {
    /// Accept every write.
    pub fn accepting() -> Self {
        Self {
            fail_with: None,
            saved: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Reject every write with the given message.
    pub fn failing(msg: impl Into<String>) -> Self {
        Self {
            fail_with: Some(msg.into()),
            saved: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All successfully saved records, in write order.
    pub fn saved(&self) -> Vec<TicketState> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl Store for MockStore {
    async fn save(&self, state: &TicketState) -> Result<StoreReceipt, StoreError> {
        if let Some(msg) = &self.fail_with {
            return Err(StoreError::Write(msg.clone()));
        }
        self.saved.lock().unwrap().push(state.clone());
        Ok(StoreReceipt {
            record_id: Uuid::new_v4(),
        })
    }
}
