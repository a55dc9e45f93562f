//! Postgres-backed `Store`.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use nodes::{Store, StoreError, StoreReceipt, TicketState};

use crate::models::InteractionRow;

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn save(&self, state: &TicketState) -> Result<StoreReceipt, StoreError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO interactions (id, query, category, sentiment, response, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id)
        .bind(&state.query)
        .bind(state.category.to_string())
        .bind(state.sentiment.to_string())
        .bind(state.response.clone().unwrap_or_default())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Write(e.to_string()))?;

        debug!(%id, "interaction row inserted");
        Ok(StoreReceipt { record_id: id })
    }
}

/// Return the most recently recorded interactions (newest first).
pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<InteractionRow>, StoreError> {
    sqlx::query_as::<_, InteractionRow>(
        r#"
        SELECT id, query, category, sentiment, response, created_at
        FROM interactions
        ORDER BY created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
    .map_err(|e| StoreError::Write(e.to_string()))
}
