//! Persistence step — terminal. Hands the final state to the `Store`
//! capability; a failed write is reported, never re-raised.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::capabilities::Store;
use crate::state::{StateUpdate, TicketState};
use crate::traits::{ExecutionContext, RunWarning, Step};
use crate::NodeError;

pub struct PersistStep {
    store: Arc<dyn Store>,
}

impl PersistStep {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Step for PersistStep {
    async fn run(
        &self,
        state: &TicketState,
        ctx: &ExecutionContext,
    ) -> Result<StateUpdate, NodeError> {
        match self.store.save(state).await {
            Ok(receipt) => {
                info!(record_id = %receipt.record_id, "interaction recorded");
            }
            // The query is already answered at this point; a storage failure
            // must not invalidate that answer.
            Err(e) => {
                error!("failed to record interaction: {e}");
                ctx.report(RunWarning::StoreWrite {
                    message: e.to_string(),
                });
            }
        }

        Ok(StateUpdate::none())
    }
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockStore;
    use crate::state::{Category, Sentiment};

    fn answered_state() -> TicketState {
        TicketState {
            query: "What are your business hours?".into(),
            category: Category::General,
            sentiment: Sentiment::Neutral,
            response: Some("We are open 9 to 5.".into()),
        }
    }

    #[tokio::test]
    async fn successful_save_records_the_full_state() {
        let store = Arc::new(MockStore::accepting());
        let step = PersistStep::new(store.clone());
        let ctx = ExecutionContext::new();

        let update = step
            .run(&answered_state(), &ctx)
            .await
            .expect("persist never fails the run");

        assert_eq!(update, StateUpdate::none());
        assert_eq!(store.saved(), vec![answered_state()]);
        assert!(ctx.warnings().is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_contained_and_reported() {
        let store = Arc::new(MockStore::failing("connection refused"));
        let step = PersistStep::new(store.clone());
        let ctx = ExecutionContext::new();

        let update = step
            .run(&answered_state(), &ctx)
            .await
            .expect("store failure must not abort the run");

        assert_eq!(update, StateUpdate::none());
        assert!(store.saved().is_empty());

        let warnings = ctx.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            RunWarning::StoreWrite { message } if message.contains("connection refused")
        ));
    }
}
