//! Row structs that map 1-to-1 onto database tables.
//!
//! These are persistence models — they carry no domain behaviour. Domain
//! types live in the `nodes` crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A recorded support interaction.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InteractionRow {
    pub id: Uuid,
    pub query: String,
    pub category: String,
    pub sentiment: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}
