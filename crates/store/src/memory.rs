//! In-memory `Store` for tests and offline runs.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use nodes::{Store, StoreError, StoreReceipt, TicketState};

/// Keeps every accepted record in memory. Cloning shares the backing
/// storage, so a caller can hold one handle and inspect what a pipeline
/// recorded through the other.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Vec<(Uuid, TicketState)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records accepted so far, in write order.
    pub fn records(&self) -> Vec<(Uuid, TicketState)> {
        self.records.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn save(&self, state: &TicketState) -> Result<StoreReceipt, StoreError> {
        let record_id = Uuid::new_v4();
        self.records.lock().unwrap().push((record_id, state.clone()));
        Ok(StoreReceipt { record_id })
    }
}
