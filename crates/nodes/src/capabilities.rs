//! Capability interfaces — the external collaborators the steps call but do
//! not implement.
//!
//! Implementations live elsewhere: rule-based ones in
//! [`heuristics`](crate::heuristics), chat-model-backed ones in the `llm`
//! crate, persistence in the `store` crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{NodeError, StoreError};
use crate::state::{Category, TicketState};

/// Raw labels as returned by a classifier, before domain validation.
///
/// The classify step parses these against the closed enums; keeping them as
/// strings here is what lets an out-of-domain answer from a live model be
/// rejected instead of silently coerced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawClassification {
    pub category: String,
    pub sentiment: String,
}

/// Acknowledgement of a completed store write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreReceipt {
    pub record_id: Uuid,
}

/// Semantic analysis of an inbound query.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, query: &str) -> Result<RawClassification, NodeError>;
}

/// Response production, parameterized by the query's category.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, query: &str, category: Category) -> Result<String, NodeError>;
}

/// Durable recording of a completed interaction.
///
/// The full final state is accepted as an opaque record; schema and backend
/// are the implementation's business.
#[async_trait]
pub trait Store: Send + Sync {
    async fn save(&self, state: &TicketState) -> Result<StoreReceipt, StoreError>;
}
