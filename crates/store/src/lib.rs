//! `store` crate — persistence behind the `Store` capability.
//!
//! Two implementations: [`MemoryStore`] for tests and offline runs, and
//! [`PgStore`] writing one row per completed interaction to Postgres.
//! No business logic lives here.

pub mod memory;
pub mod models;
pub mod pool;
pub mod postgres;

pub use memory::MemoryStore;
pub use models::InteractionRow;
pub use pool::{create_pool, run_migrations, DbPool};
pub use postgres::{list_recent, PgStore};
