//! Step-level error types.

use thiserror::Error;

/// Errors returned by a step's `run` method.
///
/// Every variant aborts the run: the engine never substitutes a fallback
/// answer for a failed classification or generation.
#[derive(Debug, Error, Clone)]
pub enum NodeError {
    /// The classifier capability could not be reached or failed outright.
    #[error("classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    /// The classifier answered with a label outside the closed domain.
    #[error("classifier returned out-of-domain {field} label '{label}'")]
    InvalidClassification {
        field: &'static str,
        label: String,
    },

    /// The generator capability could not be reached or failed outright.
    #[error("generator unavailable: {0}")]
    GeneratorUnavailable(String),

    /// The generator answered, but with nothing usable.
    #[error("generator produced an empty response")]
    EmptyGeneration,
}

/// Errors returned by a [`Store`](crate::Store) write.
///
/// Unlike [`NodeError`], a store failure never aborts the run: the persist
/// step reports it as a [`RunWarning`](crate::RunWarning) and the caller
/// still receives the computed response.
#[derive(Debug, Error, Clone)]
pub enum StoreError {
    /// The backend could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The write itself failed.
    #[error("store write failed: {0}")]
    Write(String),
}
