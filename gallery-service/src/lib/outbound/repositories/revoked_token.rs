use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::session::models::TokenId;
use crate::session::errors::SessionError;
use crate::session::ports::RevokedTokenRepository;

/// PostgreSQL-backed revocation store.
///
/// `token_id` is the primary key, so row-level atomicity of the upsert and
/// the single-row lookup is all the coordination the store needs.
pub struct PostgresRevokedTokenRepository {
    pool: PgPool,
}

impl PostgresRevokedTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn store_error(e: sqlx::Error) -> SessionError {
    SessionError::StoreUnavailable(e.to_string())
}

#[async_trait]
impl RevokedTokenRepository for PostgresRevokedTokenRepository {
    async fn record(
        &self,
        token_id: &TokenId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        // Re-recording an already-revoked token is a no-op, not a conflict.
        sqlx::query(
            r#"
            INSERT INTO revoked_tokens (token_id, expires_at)
            VALUES ($1, $2)
            ON CONFLICT (token_id) DO NOTHING
            "#,
        )
        .bind(token_id.0)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(())
    }

    async fn is_revoked(&self, token_id: &TokenId) -> Result<bool, SessionError> {
        let row = sqlx::query(
            r#"
            SELECT token_id
            FROM revoked_tokens
            WHERE token_id = $1
            "#,
        )
        .bind(token_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.is_some())
    }

    async fn purge_expired(&self) -> Result<u64, SessionError> {
        let result = sqlx::query(
            r#"
            DELETE FROM revoked_tokens
            WHERE expires_at < $1
            "#,
        )
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(result.rows_affected())
    }
}
