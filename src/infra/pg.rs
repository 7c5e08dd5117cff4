use anyhow::{anyhow, Result};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;

use crate::config::AppConfig;
use crate::infra::store::{Store, UpdateOutcome};

/// Postgres-backed document store.
///
/// All collections share one `documents` table keyed by (collection, id),
/// with the record itself in a JSONB column. The conditional update is a
/// single `UPDATE ... WHERE record->>'status' = $n`, so the status check and
/// the write cannot interleave with a concurrent moderator.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        let database_url = config
            .database_url
            .as_deref()
            .ok_or_else(|| anyhow!("DATABASE_URL is required for the postgres store backend"))?;
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.db_idle_timeout_seconds))
            .max_lifetime(Duration::from_secs(config.db_max_lifetime_seconds))
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[axum::async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let row = sqlx::query("SELECT record FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|row| row.get("record")))
    }

    async fn put(&self, collection: &str, id: &str, record: Value) -> Result<()> {
        let result = sqlx::query(
            "INSERT INTO documents (collection, id, record) VALUES ($1, $2, $3) \
             ON CONFLICT DO NOTHING",
        )
        .bind(collection)
        .bind(id)
        .bind(&record)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(anyhow!("key collision in {}: {}", collection, id));
        }
        Ok(())
    }

    async fn query_by_status(&self, collection: &str, status: &str) -> Result<Vec<(String, Value)>> {
        let rows = sqlx::query(
            "SELECT id, record FROM documents \
             WHERE collection = $1 AND record->>'status' = $2",
        )
        .bind(collection)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| (row.get("id"), row.get("record")))
            .collect())
    }

    async fn update_if_status(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
        expected_status: &str,
    ) -> Result<UpdateOutcome> {
        let result = sqlx::query(
            "UPDATE documents SET record = record || $3 \
             WHERE collection = $1 AND id = $2 AND record->>'status' = $4",
        )
        .bind(collection)
        .bind(id)
        .bind(&patch)
        .bind(expected_status)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 1 {
            return Ok(UpdateOutcome::Updated);
        }

        let current: Option<String> = sqlx::query_scalar(
            "SELECT COALESCE(record->>'status', '') FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match current {
            Some(status) => Ok(UpdateOutcome::StatusMismatch(status)),
            None => Ok(UpdateOutcome::NotFound),
        }
    }
}
