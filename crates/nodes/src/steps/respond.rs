//! Response-generation step — produces the answer via the `Generator`
//! capability, parameterized by the classified category.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::capabilities::Generator;
use crate::state::{StateUpdate, TicketState};
use crate::traits::{ExecutionContext, Step};
use crate::NodeError;

pub struct RespondStep {
    generator: Arc<dyn Generator>,
}

impl RespondStep {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Step for RespondStep {
    async fn run(
        &self,
        state: &TicketState,
        _ctx: &ExecutionContext,
    ) -> Result<StateUpdate, NodeError> {
        let text = self
            .generator
            .generate(&state.query, state.category)
            .await?;

        // "Non-empty on success" is part of the contract; a blank answer is a
        // generation failure, not a response.
        if text.trim().is_empty() {
            return Err(NodeError::EmptyGeneration);
        }

        info!(chars = text.len(), category = %state.category, "response generated");
        Ok(StateUpdate::responded(text))
    }
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockGenerator;
    use crate::state::Category;

    fn classified_state() -> TicketState {
        let mut state = TicketState::new("What are your business hours?");
        state.category = Category::General;
        state
    }

    #[tokio::test]
    async fn generated_text_becomes_the_response() {
        let generator = Arc::new(MockGenerator::returning("We are open 9 to 5, Monday to Friday."));
        let step = RespondStep::new(generator.clone());

        let update = step
            .run(&classified_state(), &ExecutionContext::new())
            .await
            .expect("generation should succeed");

        assert_eq!(
            update.response.as_deref(),
            Some("We are open 9 to 5, Monday to Friday.")
        );
        assert_eq!(generator.call_count(), 1);
        // The generator saw the classified category, not a default.
        assert_eq!(generator.calls()[0].1, Category::General);
    }

    #[tokio::test]
    async fn blank_generation_is_an_error() {
        let generator = Arc::new(MockGenerator::returning("   \n"));
        let step = RespondStep::new(generator);

        let err = step
            .run(&classified_state(), &ExecutionContext::new())
            .await
            .expect_err("blank output must be rejected");
        assert!(matches!(err, NodeError::EmptyGeneration));
    }

    #[tokio::test]
    async fn generator_outage_propagates() {
        let generator = Arc::new(MockGenerator::unavailable("quota exhausted"));
        let step = RespondStep::new(generator);

        let err = step
            .run(&classified_state(), &ExecutionContext::new())
            .await
            .expect_err("outage must propagate");
        assert!(matches!(err, NodeError::GeneratorUnavailable(_)));
    }
}
