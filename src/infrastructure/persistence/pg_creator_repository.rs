//! PostgreSQL implementation of creator repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Creator;
use crate::domain::repositories::CreatorRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct CreatorRow {
    id: i64,
    ip_address: String,
    disabled: bool,
    disabled_reason: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<CreatorRow> for Creator {
    fn from(row: CreatorRow) -> Self {
        Creator {
            id: row.id,
            ip_address: row.ip_address,
            disabled: row.disabled,
            disabled_reason: row.disabled_reason,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for creators.
///
/// Upserts rely on the unique index on `creators.ip_address`, so concurrent first
/// requests from one address converge on a single row.
pub struct PgCreatorRepository {
    pool: Arc<PgPool>,
}

impl PgCreatorRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CreatorRepository for PgCreatorRepository {
    async fn find_or_create(&self, ip_address: &str) -> Result<Creator, AppError> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        let row = sqlx::query_as::<_, CreatorRow>(
            r#"
            INSERT INTO creators (ip_address)
            VALUES ($1)
            ON CONFLICT (ip_address) DO UPDATE SET ip_address = EXCLUDED.ip_address
            RETURNING id, ip_address, disabled, disabled_reason, created_at
            "#,
        )
        .bind(ip_address)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_ip(&self, ip_address: &str) -> Result<Option<Creator>, AppError> {
        let row = sqlx::query_as::<_, CreatorRow>(
            r#"
            SELECT id, ip_address, disabled, disabled_reason, created_at
            FROM creators
            WHERE ip_address = $1
            "#,
        )
        .bind(ip_address)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Creator::from))
    }

    async fn set_disabled(
        &self,
        ip_address: &str,
        disabled: bool,
        reason: Option<String>,
    ) -> Result<Creator, AppError> {
        let reason = if disabled { reason } else { None };

        let row = sqlx::query_as::<_, CreatorRow>(
            r#"
            INSERT INTO creators (ip_address, disabled, disabled_reason)
            VALUES ($1, $2, $3)
            ON CONFLICT (ip_address) DO UPDATE
            SET disabled = EXCLUDED.disabled, disabled_reason = EXCLUDED.disabled_reason
            RETURNING id, ip_address, disabled, disabled_reason, created_at
            "#,
        )
        .bind(ip_address)
        .bind(disabled)
        .bind(reason)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }
}
