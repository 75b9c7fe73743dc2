use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::DateTime;
use chrono::Utc;
use tokio::time::timeout;

use crate::domain::session::models::Session;
use crate::domain::session::models::TokenId;
use crate::domain::user::models::UserId;
use crate::session::errors::SessionError;
use crate::session::ports::RevokedTokenRepository;
use crate::session::ports::SessionServicePort;

/// Bound on any single revocation-store call made while a trust decision is
/// pending.
const STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Session verifier and logout service.
///
/// Composes the token codec with the revocation store. The system is not a
/// pure stateless-token design: a signature-valid, unexpired token is still
/// rejected if its id appears in the store, and an unreachable store fails
/// the check rather than passing it.
pub struct SessionService<RT>
where
    RT: RevokedTokenRepository,
{
    authenticator: Arc<Authenticator>,
    revoked_tokens: Arc<RT>,
}

impl<RT> SessionService<RT>
where
    RT: RevokedTokenRepository,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `authenticator` - Token verification
    /// * `revoked_tokens` - Revocation store implementation
    pub fn new(authenticator: Arc<Authenticator>, revoked_tokens: Arc<RT>) -> Self {
        Self {
            authenticator,
            revoked_tokens,
        }
    }
}

#[async_trait]
impl<RT> SessionServicePort for SessionService<RT>
where
    RT: RevokedTokenRepository,
{
    async fn verify(&self, token: &str) -> Result<Session, SessionError> {
        // Cheap, stateless checks first; only a structurally sound token
        // with a live signature pays for the store round-trip.
        let claims = self.authenticator.verify_token(token).map_err(|e| {
            tracing::warn!(kind = %e, "Bearer token rejected");
            SessionError::InvalidCredential
        })?;

        let user_id =
            UserId::from_string(&claims.sub).map_err(|_| SessionError::InvalidCredential)?;
        let token_id =
            TokenId::from_string(&claims.jti).map_err(|_| SessionError::InvalidCredential)?;
        let expires_at =
            DateTime::from_timestamp(claims.exp, 0).ok_or(SessionError::InvalidCredential)?;

        let revoked = timeout(STORE_TIMEOUT, self.revoked_tokens.is_revoked(&token_id))
            .await
            .map_err(|_| {
                SessionError::StoreUnavailable("revocation check timed out".to_string())
            })??;

        if revoked {
            return Err(SessionError::RevokedCredential);
        }

        Ok(Session {
            user_id,
            token_id,
            expires_at,
        })
    }

    async fn logout(
        &self,
        token_id: &TokenId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        timeout(STORE_TIMEOUT, self.revoked_tokens.record(token_id, expires_at))
            .await
            .map_err(|_| {
                SessionError::StoreUnavailable("revocation write timed out".to_string())
            })??;

        tracing::info!(%token_id, "Token revoked");

        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, SessionError> {
        self.revoked_tokens.purge_expired().await
    }
}
