//! `engine` crate — the step graph, its validating builder, and the
//! sequential executor.

pub mod error;
pub mod executor;
pub mod graph;
pub mod pipeline;

pub use error::EngineError;
pub use executor::{ExecutionResult, Executor, ExecutorConfig};
pub use graph::{Graph, GraphBuilder, Outgoing, RouterFn, StepId};
pub use pipeline::{sentiment_router, triage_graph};

#[cfg(test)]
mod executor_tests;
