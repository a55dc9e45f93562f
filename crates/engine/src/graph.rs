//! The immutable step graph and its validating builder.
//!
//! A graph is a table of named steps, one designated entry, and at most one
//! outgoing edge per step: either a fixed target or a router bound to an
//! explicit finite candidate set. Structural rules are enforced when the
//! builder's `build()` runs, not during the walk:
//! 1. Step IDs must be unique.
//! 2. Every edge endpoint (source, target, each candidate) must name a
//!    declared step.
//! 3. An entry step must be declared and exist.
//!
//! A step with no outgoing edge is terminal; reaching one ends the walk.

use std::collections::HashMap;
use std::sync::Arc;

use nodes::{Step, TicketState};

use crate::EngineError;

/// Identifier of a step within a graph.
pub type StepId = String;

/// Pure routing function bound to a conditional edge. Invoked with the
/// post-update state; must name one of the edge's declared candidates.
pub type RouterFn = Arc<dyn Fn(&TicketState) -> StepId + Send + Sync>;

/// Outgoing edge of a step.
#[derive(Clone)]
pub enum Outgoing {
    /// Unconditional transition to a single step.
    Direct(StepId),
    /// Router-selected transition to one of the declared candidates.
    Conditional {
        router: RouterFn,
        candidates: Vec<StepId>,
    },
}

pub(crate) struct StepEntry {
    pub(crate) step: Arc<dyn Step>,
    pub(crate) outgoing: Option<Outgoing>,
}

/// An immutable, validated graph. Safely shared read-only across concurrent
/// runs.
pub struct Graph {
    entry: StepId,
    steps: HashMap<StepId, StepEntry>,
}

impl Graph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// ID of the step the walk starts at.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub(crate) fn step(&self, id: &str) -> Option<&StepEntry> {
        self.steps.get(id)
    }

    /// One line per step describing its outgoing wiring, sorted by step ID.
    pub fn describe(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .steps
            .iter()
            .map(|(id, entry)| match &entry.outgoing {
                None => format!("{id} (terminal)"),
                Some(Outgoing::Direct(target)) => format!("{id} -> {target}"),
                Some(Outgoing::Conditional { candidates, .. }) => {
                    format!("{id} -> ({})", candidates.join(" | "))
                }
            })
            .collect();
        lines.sort();
        lines
    }
}

// ---------------------------------------------------------------------------
// GraphBuilder
// ---------------------------------------------------------------------------

/// Collects steps and edges, then validates the whole structure in `build()`.
#[derive(Default)]
pub struct GraphBuilder {
    entry: Option<StepId>,
    steps: Vec<(StepId, Arc<dyn Step>)>,
    edges: Vec<(StepId, Outgoing)>,
}

impl GraphBuilder {
    /// Designate the step the walk starts at.
    pub fn entry(mut self, id: impl Into<StepId>) -> Self {
        self.entry = Some(id.into());
        self
    }

    /// Declare a named step.
    pub fn step(mut self, id: impl Into<StepId>, step: Arc<dyn Step>) -> Self {
        self.steps.push((id.into(), step));
        self
    }

    /// Unconditional edge `from -> to`.
    pub fn edge(mut self, from: impl Into<StepId>, to: impl Into<StepId>) -> Self {
        self.edges.push((from.into(), Outgoing::Direct(to.into())));
        self
    }

    /// Conditional edge: `router` picks the successor among `candidates`.
    pub fn conditional_edge(
        mut self,
        from: impl Into<StepId>,
        router: RouterFn,
        candidates: &[&str],
    ) -> Self {
        self.edges.push((
            from.into(),
            Outgoing::Conditional {
                router,
                candidates: candidates.iter().map(|c| (*c).to_owned()).collect(),
            },
        ));
        self
    }

    /// Validate the collected structure and freeze it into a [`Graph`].
    pub fn build(self) -> Result<Graph, EngineError> {
        let mut steps: HashMap<StepId, StepEntry> = HashMap::new();
        for (id, step) in self.steps {
            if steps.contains_key(&id) {
                return Err(EngineError::DuplicateStepId(id));
            }
            steps.insert(
                id,
                StepEntry {
                    step,
                    outgoing: None,
                },
            );
        }

        // Every edge target must name a declared step.
        for (_, outgoing) in &self.edges {
            let targets: Vec<&StepId> = match outgoing {
                Outgoing::Direct(target) => vec![target],
                Outgoing::Conditional { candidates, .. } => candidates.iter().collect(),
            };
            for target in targets {
                if !steps.contains_key(target) {
                    return Err(EngineError::UnknownStepReference {
                        step_id: target.clone(),
                        side: "to",
                    });
                }
            }
        }

        // Attach edges to their source steps — at most one outgoing each.
        for (from, outgoing) in self.edges {
            match steps.get_mut(&from) {
                Some(entry) if entry.outgoing.is_some() => {
                    return Err(EngineError::ConflictingEdge(from));
                }
                Some(entry) => entry.outgoing = Some(outgoing),
                None => {
                    return Err(EngineError::UnknownStepReference {
                        step_id: from,
                        side: "from",
                    });
                }
            }
        }

        let entry = self.entry.ok_or(EngineError::MissingEntry)?;
        if !steps.contains_key(&entry) {
            return Err(EngineError::UndeclaredEntry(entry));
        }

        Ok(Graph { entry, steps })
    }
}
