use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Fixed token lifetime: 60 minutes from issuance. There is no renewal or
/// refresh path; a token lives out its hour unless revoked first.
pub const TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// Bearer-token claims.
///
/// Every field is required; a token missing any of them fails
/// deserialization and therefore verification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Token identifier, fresh random value per issuance.
    /// The revocation lookup key.
    pub jti: String,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject, stamped now and expiring in 60 minutes.
    ///
    /// # Arguments
    /// * `subject` - Subject (user) identifier
    ///
    /// # Returns
    /// Claims with a fresh random `jti`
    pub fn for_subject(subject: impl ToString) -> Self {
        let now = Utc::now().timestamp();

        Self {
            sub: subject.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + TOKEN_TTL_SECONDS,
        }
    }

    /// Check whether the claims are expired at the given timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
