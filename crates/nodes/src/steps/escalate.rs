//! Escalation step — hands the ticket to a human with a fixed message.

use async_trait::async_trait;
use tracing::info;

use crate::state::{StateUpdate, TicketState};
use crate::traits::{ExecutionContext, Step};
use crate::NodeError;

/// The policy-defined message every escalated ticket receives.
pub const ESCALATION_MESSAGE: &str =
    "This ticket has been escalated to a senior support agent, who will contact you shortly.";

/// No capability involved: escalation is deterministic by design of the
/// routing policy.
pub struct EscalateStep;

#[async_trait]
impl Step for EscalateStep {
    async fn run(
        &self,
        _state: &TicketState,
        _ctx: &ExecutionContext,
    ) -> Result<StateUpdate, NodeError> {
        info!("escalating to a human agent");
        Ok(StateUpdate::responded(ESCALATION_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn escalation_sets_the_fixed_message() {
        let state = TicketState::new("Terrible service, never again.");
        let update = EscalateStep
            .run(&state, &ExecutionContext::new())
            .await
            .expect("escalation cannot fail");

        assert_eq!(update.response.as_deref(), Some(ESCALATION_MESSAGE));
        assert!(update.classification.is_none());
    }
}
