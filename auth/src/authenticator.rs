use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::Claims;
use crate::token::TokenCodec;
use crate::token::TokenError;

/// Authentication coordinator combining password verification and token
/// issuance.
///
/// Holds the only copies of the hashing parameters and the signing secret;
/// constructed once at startup and injected where needed.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct IssuedToken {
    /// Signed bearer token
    pub access_token: String,
    /// The claims that were minted into the token
    pub claims: Claims,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Secret key for token signing
    pub fn new(secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and mint a signed token for the subject.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Subject (user) identifier to encode
    ///
    /// # Returns
    /// IssuedToken with the access token and its minted claims
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match the stored hash
    /// * `Token` - Token issuance failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: impl ToString,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let claims = Claims::for_subject(subject);
        let access_token = self.token_codec.issue(&claims)?;

        Ok(IssuedToken {
            access_token,
            claims,
        })
    }

    /// Validate a token's signature and expiry and return its claims.
    ///
    /// # Errors
    /// * `TokenError` - Signature, expiry, or structure check failed
    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_codec.verify(token)
    }

    /// Decode a token without validation (for inspection only).
    pub fn decode_unverified(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_codec.decode_unverified(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_success() {
        let authenticator = Authenticator::new(b"test_secret_key_at_least_32_bytes!");

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let issued = authenticator
            .authenticate(password, &hash, "user123")
            .expect("Authentication failed");

        assert!(!issued.access_token.is_empty());
        assert_eq!(issued.claims.sub, "user123");

        let claims = authenticator
            .verify_token(&issued.access_token)
            .expect("Token validation failed");
        assert_eq!(claims, issued.claims);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = Authenticator::new(b"test_secret_key_at_least_32_bytes!");

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong_password", &hash, "user123");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_malformed_stored_hash() {
        let authenticator = Authenticator::new(b"test_secret_key_at_least_32_bytes!");

        // A corrupt digest is indistinguishable from a wrong password.
        let result = authenticator.authenticate("my_password", "corrupt-hash", "user123");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_decode_unverified_returns_minted_claims() {
        let authenticator = Authenticator::new(b"test_secret_key_at_least_32_bytes!");

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");
        let issued = authenticator
            .authenticate("my_password", &hash, "user123")
            .expect("Authentication failed");

        let claims = authenticator
            .decode_unverified(&issued.access_token)
            .expect("Failed to decode token");
        assert_eq!(claims, issued.claims);
    }

    #[test]
    fn test_verify_invalid_token() {
        let authenticator = Authenticator::new(b"test_secret_key_at_least_32_bytes!");

        let result = authenticator.verify_token("invalid.token.here");
        assert!(result.is_err());
    }
}
