use thiserror::Error;

/// Error for TokenId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for session verification and logout.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// No bearer token was presented.
    #[error("Authorization header missing")]
    MissingCredential,

    /// Token malformed, expired, or carrying a bad signature. The specific
    /// kind is logged but collapsed here so the caller cannot learn which
    /// check failed.
    #[error("Invalid or expired token")]
    InvalidCredential,

    /// Token was explicitly logged out before its natural expiry.
    #[error("Token has been invalidated")]
    RevokedCredential,

    /// Revocation store unreachable or timed out while a trust decision was
    /// pending. Never downgraded to "not revoked".
    #[error("Session store unavailable: {0}")]
    StoreUnavailable(String),
}
