//! End-to-end tests for the triage pipeline and the executor walk.
//!
//! These use the mock capabilities from the `nodes` crate, so no model
//! endpoint or database is required.

use std::sync::Arc;

use async_trait::async_trait;

use nodes::mock::{MockClassifier, MockGenerator, MockStore};
use nodes::{
    Category, EscalateStep, ExecutionContext, NodeError, RunWarning, Sentiment, StateUpdate, Step,
    TicketState, ESCALATION_MESSAGE,
};

use crate::graph::{Graph, RouterFn};
use crate::pipeline::triage_graph;
use crate::{EngineError, Executor, ExecutorConfig};

/// A step that updates nothing; handy for wiring-only graphs.
struct Noop;

#[async_trait]
impl Step for Noop {
    async fn run(
        &self,
        _state: &TicketState,
        _ctx: &ExecutionContext,
    ) -> Result<StateUpdate, NodeError> {
        Ok(StateUpdate::none())
    }
}

// ============================================================
// Pipeline scenarios
// ============================================================

#[tokio::test]
async fn neutral_query_is_answered_by_the_generator() {
    let classifier = Arc::new(MockClassifier::returning("General", "Neutral"));
    let generator = Arc::new(MockGenerator::returning("We are open 9 to 5."));
    let store = Arc::new(MockStore::accepting());

    let graph = triage_graph(classifier.clone(), generator.clone(), store.clone())
        .expect("pipeline wires cleanly");
    let result = Executor::default()
        .run(&graph, TicketState::new("What are your business hours?"))
        .await
        .expect("run should complete");

    assert_eq!(result.state.category, Category::General);
    assert_eq!(result.state.sentiment, Sentiment::Neutral);
    assert_eq!(result.state.response.as_deref(), Some("We are open 9 to 5."));
    assert!(result.warnings.is_empty());

    // One classification, one generation, one record. Never escalated.
    assert_eq!(classifier.call_count(), 1);
    assert_eq!(generator.call_count(), 1);
    assert_eq!(store.saved().len(), 1);
    assert_ne!(result.state.response.as_deref(), Some(ESCALATION_MESSAGE));
}

#[tokio::test]
async fn negative_query_escalates_and_never_invokes_the_generator() {
    let classifier = Arc::new(MockClassifier::returning("General", "Negative"));
    let generator = Arc::new(MockGenerator::returning("should never be used"));
    let store = Arc::new(MockStore::accepting());

    let graph = triage_graph(classifier, generator.clone(), store.clone())
        .expect("pipeline wires cleanly");
    let result = Executor::default()
        .run(&graph, TicketState::new("Terrible service, never again."))
        .await
        .expect("run should complete");

    assert_eq!(result.state.response.as_deref(), Some(ESCALATION_MESSAGE));
    assert_eq!(generator.call_count(), 0);

    // The escalated interaction is still recorded in full.
    let saved = store.saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].sentiment, Sentiment::Negative);
    assert_eq!(saved[0].response.as_deref(), Some(ESCALATION_MESSAGE));
}

#[tokio::test]
async fn out_of_domain_category_fails_before_any_routing() {
    let classifier = Arc::new(MockClassifier::returning("Shipping", "Neutral"));
    let generator = Arc::new(MockGenerator::returning("unused"));
    let store = Arc::new(MockStore::accepting());

    let graph = triage_graph(classifier, generator.clone(), store.clone())
        .expect("pipeline wires cleanly");
    let err = Executor::default()
        .run(&graph, TicketState::new("Where is my parcel?"))
        .await
        .expect_err("out-of-domain label must fail the run");

    assert!(matches!(
        err,
        EngineError::Node(NodeError::InvalidClassification { field: "category", .. })
    ));
    assert_eq!(generator.call_count(), 0);
    assert!(store.saved().is_empty());
}

#[tokio::test]
async fn store_failure_does_not_change_the_answer() {
    let classifier = Arc::new(MockClassifier::returning("Billing", "Positive"));
    let generator = Arc::new(MockGenerator::returning("Your refund is on its way."));
    let store = Arc::new(MockStore::failing("disk on fire"));

    let graph = triage_graph(classifier, generator, store).expect("pipeline wires cleanly");
    let result = Executor::default()
        .run(&graph, TicketState::new("Thanks! When does my refund arrive?"))
        .await
        .expect("a storage failure must not fail the run");

    assert_eq!(
        result.state.response.as_deref(),
        Some("Your refund is on its way.")
    );
    assert_eq!(result.warnings.len(), 1);
    assert!(matches!(
        &result.warnings[0],
        RunWarning::StoreWrite { message } if message.contains("disk on fire")
    ));
}

#[tokio::test]
async fn classifier_outage_surfaces_to_the_caller() {
    let classifier = Arc::new(MockClassifier::unavailable("endpoint down"));
    let generator = Arc::new(MockGenerator::returning("unused"));
    let store = Arc::new(MockStore::accepting());

    let graph = triage_graph(classifier, generator, store).expect("pipeline wires cleanly");
    let err = Executor::default()
        .run(&graph, TicketState::new("hello"))
        .await
        .expect_err("outage must surface, not fall back");

    assert!(matches!(
        err,
        EngineError::Node(NodeError::ClassifierUnavailable(_))
    ));
}

#[tokio::test]
async fn completed_runs_always_classify_and_answer() {
    for (sentiment, expect_escalation) in
        [("Positive", false), ("Neutral", false), ("Negative", true)]
    {
        let classifier = Arc::new(MockClassifier::returning("Technical", sentiment));
        let generator = Arc::new(MockGenerator::returning("Try turning it off and on."));
        let store = Arc::new(MockStore::accepting());

        let graph =
            triage_graph(classifier, generator, store).expect("pipeline wires cleanly");
        let result = Executor::default()
            .run(&graph, TicketState::new("The app crashes on startup"))
            .await
            .expect("run should complete");

        assert!(result.state.is_classified());
        let response = result.state.response.expect("terminal runs carry a response");
        assert_eq!(response == ESCALATION_MESSAGE, expect_escalation);
    }
}

// ============================================================
// Walk mechanics
// ============================================================

#[tokio::test]
async fn empty_query_is_rejected_at_entry() {
    let classifier = Arc::new(MockClassifier::returning("General", "Neutral"));
    let generator = Arc::new(MockGenerator::returning("unused"));
    let store = Arc::new(MockStore::accepting());

    let graph = triage_graph(classifier.clone(), generator, store)
        .expect("pipeline wires cleanly");
    let err = Executor::default()
        .run(&graph, TicketState::new("   "))
        .await
        .expect_err("blank query must be rejected");

    assert!(matches!(err, EngineError::EmptyQuery));
    assert_eq!(classifier.call_count(), 0);
}

#[tokio::test]
async fn cycle_guard_trips_on_a_miswired_graph() {
    let graph = Graph::builder()
        .entry("a")
        .step("a", Arc::new(Noop))
        .step("b", Arc::new(Noop))
        .edge("a", "b")
        .edge("b", "a")
        .build()
        .expect("structure itself is well-formed");

    let executor = Executor::new(ExecutorConfig { max_steps: 8 });
    let err = executor
        .run(&graph, TicketState::new("loop"))
        .await
        .expect_err("cycle must trip the step budget");

    assert!(matches!(err, EngineError::StepLimitExceeded { limit: 8 }));
}

#[tokio::test]
async fn router_answer_outside_the_candidate_set_is_a_routing_error() {
    let rogue: RouterFn = Arc::new(|_| "ghost".to_owned());
    let graph = Graph::builder()
        .entry("a")
        .step("a", Arc::new(Noop))
        .step("b", Arc::new(Noop))
        .step("ghost", Arc::new(Noop))
        .conditional_edge("a", rogue, &["b"])
        .build()
        .expect("'ghost' is declared, just not a candidate");

    let err = Executor::default()
        .run(&graph, TicketState::new("q"))
        .await
        .expect_err("non-candidate answer must fail");

    assert!(matches!(
        err,
        EngineError::InvalidRoute { step_id, target } if step_id == "a" && target == "ghost"
    ));
}

#[tokio::test]
async fn second_writer_of_a_field_is_rejected() {
    // Two escalation steps in a row: the second write to `response` must be
    // refused, not silently overwrite the first.
    let graph = Graph::builder()
        .entry("first")
        .step("first", Arc::new(EscalateStep))
        .step("second", Arc::new(EscalateStep))
        .edge("first", "second")
        .build()
        .expect("wiring is valid");

    let err = Executor::default()
        .run(&graph, TicketState::new("q"))
        .await
        .expect_err("double write must fail");

    assert!(matches!(
        err,
        EngineError::FieldAlreadyWritten { step_id, field: "response" } if step_id == "second"
    ));
}

#[tokio::test]
async fn graph_is_shared_across_concurrent_runs() {
    let classifier = Arc::new(MockClassifier::returning("General", "Neutral"));
    let generator = Arc::new(MockGenerator::returning("answer"));
    let store = Arc::new(MockStore::accepting());

    let graph = Arc::new(
        triage_graph(classifier, generator, store.clone()).expect("pipeline wires cleanly"),
    );
    let executor = Arc::new(Executor::default());

    let mut handles = Vec::new();
    for i in 0..8 {
        let graph = graph.clone();
        let executor = executor.clone();
        handles.push(tokio::spawn(async move {
            executor
                .run(&graph, TicketState::new(format!("query {i}")))
                .await
        }));
    }

    for handle in handles {
        let result = handle.await.expect("task join").expect("run should complete");
        assert!(result.state.has_response());
    }
    assert_eq!(store.saved().len(), 8);
}
