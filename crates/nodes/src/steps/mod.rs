//! Built-in step implementations — one file per pipeline stage.

pub mod classify;
pub mod escalate;
pub mod persist;
pub mod respond;

pub use classify::ClassifyStep;
pub use escalate::{EscalateStep, ESCALATION_MESSAGE};
pub use persist::PersistStep;
pub use respond::RespondStep;
