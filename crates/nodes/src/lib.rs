//! `nodes` crate — the `Step` trait, the ticket state record, capability
//! interfaces, and the built-in step implementations.
//!
//! Every step — built-in and external alike — must implement [`Step`].
//! The engine crate dispatches execution through this trait object.

pub mod capabilities;
pub mod error;
pub mod heuristics;
pub mod mock;
pub mod state;
pub mod steps;
pub mod traits;

pub use capabilities::{Classifier, Generator, RawClassification, Store, StoreReceipt};
pub use error::{NodeError, StoreError};
pub use state::{Category, Classification, Sentiment, StateUpdate, TicketState};
pub use steps::{ClassifyStep, EscalateStep, PersistStep, RespondStep, ESCALATION_MESSAGE};
pub use traits::{ExecutionContext, RunWarning, Step};
