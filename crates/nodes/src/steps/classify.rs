//! Classification step — delegates semantic analysis to the `Classifier`
//! capability and validates the answer against the closed label domains.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::capabilities::Classifier;
use crate::state::{Category, Sentiment, StateUpdate, TicketState};
use crate::traits::{ExecutionContext, Step};
use crate::NodeError;

pub struct ClassifyStep {
    classifier: Arc<dyn Classifier>,
}

impl ClassifyStep {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }
}

#[async_trait]
impl Step for ClassifyStep {
    async fn run(
        &self,
        state: &TicketState,
        _ctx: &ExecutionContext,
    ) -> Result<StateUpdate, NodeError> {
        let raw = self.classifier.classify(&state.query).await?;

        // An out-of-domain label is rejected, never coerced or defaulted.
        let category: Category =
            raw.category
                .parse()
                .map_err(|_| NodeError::InvalidClassification {
                    field: "category",
                    label: raw.category.clone(),
                })?;
        let sentiment: Sentiment =
            raw.sentiment
                .parse()
                .map_err(|_| NodeError::InvalidClassification {
                    field: "sentiment",
                    label: raw.sentiment.clone(),
                })?;

        info!(%category, %sentiment, "query classified");
        Ok(StateUpdate::classified(category, sentiment))
    }
}
