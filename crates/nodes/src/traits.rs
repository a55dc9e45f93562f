//! The `Step` trait — the contract every step must fulfil.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::state::{StateUpdate, TicketState};
use crate::NodeError;

/// A non-fatal event observed during a run.
///
/// Warnings are collected on the [`ExecutionContext`] and handed back to the
/// caller with the final state, so contained failures stay observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunWarning {
    /// The persist step could not record the interaction. The response the
    /// run computed is unaffected.
    StoreWrite { message: String },
}

impl std::fmt::Display for RunWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StoreWrite { message } => write!(f, "{message}"),
        }
    }
}

/// Shared context passed to every step during execution.
///
/// Defined here (in the nodes crate) so both the engine and individual step
/// implementations can import it without a circular dependency.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// ID of the current run.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    warnings: Arc<Mutex<Vec<RunWarning>>>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            warnings: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Record a non-fatal event for the caller to inspect.
    pub fn report(&self, warning: RunWarning) {
        self.warnings.lock().unwrap().push(warning);
    }

    /// All warnings reported so far (in report order).
    pub fn warnings(&self) -> Vec<RunWarning> {
        self.warnings.lock().unwrap().clone()
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// The core step trait.
///
/// A step reads the accumulated state and returns a partial update; it never
/// mutates the state directly. The executor owns the merge.
#[async_trait]
pub trait Step: Send + Sync {
    async fn run(
        &self,
        state: &TicketState,
        ctx: &ExecutionContext,
    ) -> Result<StateUpdate, NodeError>;
}
