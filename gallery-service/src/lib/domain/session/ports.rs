use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::session::models::Session;
use crate::domain::session::models::TokenId;
use crate::session::errors::SessionError;

/// Port for session verification and invalidation.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Answer "is this bearer token currently valid, and for whom".
    ///
    /// Signature and expiry are checked before the revocation lookup, so
    /// malformed or expired input is rejected without a store round-trip.
    ///
    /// # Arguments
    /// * `token` - Raw bearer token string
    ///
    /// # Returns
    /// The verified session
    ///
    /// # Errors
    /// * `InvalidCredential` - Signature, expiry, or structure check failed
    /// * `RevokedCredential` - Token was explicitly logged out
    /// * `StoreUnavailable` - Revocation store unreachable (fail closed)
    async fn verify(&self, token: &str) -> Result<Session, SessionError>;

    /// Record a verified token as invalid for the rest of its lifetime.
    ///
    /// Callers must pass ids taken from claims that already passed `verify`
    /// in the current request. Idempotent: logging the same token out twice
    /// is a no-op on the second call.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Revocation store unreachable
    async fn logout(
        &self,
        token_id: &TokenId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), SessionError>;

    /// Delete revocation records for tokens that have expired on their own.
    ///
    /// Maintenance only; an un-purged expired record is harmless.
    ///
    /// # Returns
    /// Number of records removed
    async fn purge_expired(&self) -> Result<u64, SessionError>;
}

/// Durable set of "invalidated token id -> expiry" records.
///
/// A denylist, not an allowlist: absence of a record means "not revoked".
#[async_trait]
pub trait RevokedTokenRepository: Send + Sync + 'static {
    /// Upsert a revocation record.
    ///
    /// Recording the same token id twice must not error and must not
    /// duplicate storage.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Storage operation failed
    async fn record(
        &self,
        token_id: &TokenId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), SessionError>;

    /// Point lookup: has this token id been revoked?
    ///
    /// # Errors
    /// * `StoreUnavailable` - Storage operation failed
    async fn is_revoked(&self, token_id: &TokenId) -> Result<bool, SessionError>;

    /// Delete all records whose expiry has passed.
    ///
    /// Safe to run concurrently with lookups and inserts.
    ///
    /// # Returns
    /// Number of records removed
    ///
    /// # Errors
    /// * `StoreUnavailable` - Storage operation failed
    async fn purge_expired(&self) -> Result<u64, SessionError>;
}
