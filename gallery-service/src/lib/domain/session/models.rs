use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::models::UserId;
use crate::session::errors::TokenIdError;

/// Token unique identifier (the `jti` claim).
///
/// Minted fresh at issuance; serves as the revocation lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenId(pub Uuid);

impl TokenId {
    /// Generate a new random token ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a token ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TokenIdError> {
        Uuid::parse_str(s)
            .map(TokenId)
            .map_err(|e| TokenIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for TokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A verified bearer session.
///
/// Produced only by the session verifier; the token id and expiry are kept
/// so a logout later in the same request can use them without re-decoding.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: UserId,
    pub token_id: TokenId,
    pub expires_at: DateTime<Utc>,
}
