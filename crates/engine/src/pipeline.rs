//! The preassembled support-triage pipeline.
//!
//! ```text
//! classify --(sentiment router)--> escalate ---> persist
//!                             \--> respond ----/
//! ```

use std::sync::Arc;

use nodes::{
    Classifier, ClassifyStep, EscalateStep, Generator, PersistStep, RespondStep, Sentiment, Store,
    TicketState,
};

use crate::graph::{Graph, RouterFn};
use crate::EngineError;

pub const CLASSIFY: &str = "classify";
pub const ESCALATE: &str = "escalate";
pub const RESPOND: &str = "respond";
pub const PERSIST: &str = "persist";

/// Route on sentiment alone: a negative ticket goes to a human; everything
/// else — by policy, any value that is not `Negative` — is answered normally.
pub fn sentiment_router() -> RouterFn {
    Arc::new(|state: &TicketState| {
        if state.sentiment == Sentiment::Negative {
            ESCALATE.to_owned()
        } else {
            RESPOND.to_owned()
        }
    })
}

/// Wire the triage topology around the given capabilities.
pub fn triage_graph(
    classifier: Arc<dyn Classifier>,
    generator: Arc<dyn Generator>,
    store: Arc<dyn Store>,
) -> Result<Graph, EngineError> {
    Graph::builder()
        .entry(CLASSIFY)
        .step(CLASSIFY, Arc::new(ClassifyStep::new(classifier)))
        .step(ESCALATE, Arc::new(EscalateStep))
        .step(RESPOND, Arc::new(RespondStep::new(generator)))
        .step(PERSIST, Arc::new(PersistStep::new(store)))
        .conditional_edge(CLASSIFY, sentiment_router(), &[ESCALATE, RESPOND])
        .edge(ESCALATE, PERSIST)
        .edge(RESPOND, PERSIST)
        .build()
}
