//! Engine-level error types.

use thiserror::Error;

/// Errors produced by graph construction and the executor walk.
#[derive(Debug, Error)]
pub enum EngineError {
    // ------ Construction errors ------

    /// Two or more steps share the same ID.
    #[error("duplicate step id: '{0}'")]
    DuplicateStepId(String),

    /// An edge references a step ID that isn't declared in the graph.
    #[error("edge references unknown step '{step_id}' ({side} side)")]
    UnknownStepReference {
        step_id: String,
        side: &'static str,
    },

    /// No entry step was declared.
    #[error("graph has no entry step")]
    MissingEntry,

    /// The declared entry step doesn't exist.
    #[error("entry step '{0}' is not declared")]
    UndeclaredEntry(String),

    /// A step was given more than one outgoing edge.
    #[error("step '{0}' already has an outgoing edge")]
    ConflictingEdge(String),

    // ------ Walk errors ------

    /// The inbound query is empty or blank.
    #[error("query must not be empty")]
    EmptyQuery,

    /// The walk reached a step ID with no definition. A built graph cannot
    /// produce this; it guards against hand-assembled ones.
    #[error("walk reached undeclared step '{0}'")]
    UndeclaredStep(String),

    /// A step tried to write a field an earlier step already finalized.
    #[error("step '{step_id}' attempted to overwrite '{field}'")]
    FieldAlreadyWritten {
        step_id: String,
        field: &'static str,
    },

    /// A router answered with a step outside its declared candidate set.
    /// This is a graph/router bug, not a data problem.
    #[error("router at '{step_id}' chose '{target}', which is not a declared candidate")]
    InvalidRoute { step_id: String, target: String },

    /// The walk ran past its step budget — the graph wires a cycle.
    #[error("walk exceeded {limit} steps; the graph likely contains a cycle")]
    StepLimitExceeded { limit: usize },

    /// A step (or the capability behind it) failed.
    #[error("step failed: {0}")]
    Node(#[from] nodes::NodeError),
}
