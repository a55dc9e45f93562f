//! Sequential graph walk over a single ticket's state.
//!
//! The executor:
//! 1. Rejects an empty query at entry.
//! 2. Runs the current step and merges its partial update, enforcing one
//!    writer per field per run.
//! 3. Follows the step's outgoing edge — direct, or router-selected with the
//!    post-update state — until a terminal step ends the walk.
//! 4. Defends against a miswired cyclic graph with a bounded step budget.
//!
//! Steps within one run are strictly sequential: later steps depend on
//! fields written by earlier ones. Independent runs may proceed in parallel
//! over the same shared `Graph`.

use tracing::{debug, info, instrument};
use uuid::Uuid;

use nodes::{ExecutionContext, RunWarning, StateUpdate, TicketState};

use crate::graph::{Graph, Outgoing};
use crate::EngineError;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tuning knobs for the executor.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Upper bound on steps executed in one walk. The triage topology is a
    /// small DAG; hitting this bound means the graph wires a cycle.
    pub max_steps: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self { max_steps: 32 }
    }
}

// ---------------------------------------------------------------------------
// Output of a completed run
// ---------------------------------------------------------------------------

/// The result of walking a graph to its terminal step.
#[derive(Debug)]
pub struct ExecutionResult {
    pub run_id: Uuid,
    /// The final accumulated state.
    pub state: TicketState,
    /// Non-fatal events observed during the walk (e.g. a failed store write).
    pub warnings: Vec<RunWarning>,
}

// ---------------------------------------------------------------------------
// Executor
// ---------------------------------------------------------------------------

/// Stateless walker; construct once and reuse across runs.
pub struct Executor {
    config: ExecutorConfig,
}

impl Executor {
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// Walk `graph` from its entry step until a terminal step, threading
    /// `state` through every step.
    ///
    /// # Errors
    /// Returns `EngineError` for an empty query, a single-writer violation,
    /// a router answer outside its candidate set, an exhausted step budget,
    /// or a failed step.
    #[instrument(skip_all)]
    pub async fn run(
        &self,
        graph: &Graph,
        state: TicketState,
    ) -> Result<ExecutionResult, EngineError> {
        if state.query.trim().is_empty() {
            return Err(EngineError::EmptyQuery);
        }

        let ctx = ExecutionContext::new();
        let mut state = state;
        let mut current: &str = graph.entry();
        let mut steps_taken = 0usize;

        info!(run_id = %ctx.run_id, entry = current, "starting walk");

        loop {
            steps_taken += 1;
            if steps_taken > self.config.max_steps {
                return Err(EngineError::StepLimitExceeded {
                    limit: self.config.max_steps,
                });
            }

            let entry = graph
                .step(current)
                .ok_or_else(|| EngineError::UndeclaredStep(current.to_owned()))?;

            let update = entry.step.run(&state, &ctx).await?;
            apply_update(current, &mut state, update)?;

            match &entry.outgoing {
                None => {
                    info!(run_id = %ctx.run_id, step = current, steps_taken, "walk reached terminal step");
                    break;
                }
                Some(Outgoing::Direct(target)) => {
                    debug!(step = current, target = target.as_str(), "direct edge");
                    current = target;
                }
                Some(Outgoing::Conditional { router, candidates }) => {
                    // The router sees the state *after* this step's update.
                    let chosen = router(&state);
                    match candidates.iter().find(|candidate| **candidate == chosen) {
                        Some(target) => {
                            debug!(step = current, target = target.as_str(), "router selected edge");
                            current = target;
                        }
                        None => {
                            return Err(EngineError::InvalidRoute {
                                step_id: current.to_owned(),
                                target: chosen,
                            });
                        }
                    }
                }
            }
        }

        Ok(ExecutionResult {
            run_id: ctx.run_id,
            state,
            warnings: ctx.warnings(),
        })
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(ExecutorConfig::default())
    }
}

/// Merge a step's partial update, enforcing one writer per field per run.
fn apply_update(
    step_id: &str,
    state: &mut TicketState,
    update: StateUpdate,
) -> Result<(), EngineError> {
    if let Some(classification) = update.classification {
        if state.is_classified() {
            return Err(EngineError::FieldAlreadyWritten {
                step_id: step_id.to_owned(),
                field: "category/sentiment",
            });
        }
        state.category = classification.category;
        state.sentiment = classification.sentiment;
    }

    if let Some(response) = update.response {
        if state.response.is_some() {
            return Err(EngineError::FieldAlreadyWritten {
                step_id: step_id.to_owned(),
                field: "response",
            });
        }
        state.response = Some(response);
    }

    Ok(())
}
