use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Signed bearer-token codec.
///
/// Issues and verifies compact JWTs (three dot-separated base64url segments)
/// signed with HS256 and a server-held secret.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a new codec with a signing secret.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    /// - The secret must never appear in a token or in logs
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode claims into a signed token.
    ///
    /// # Arguments
    /// * `claims` - Claims to encode
    ///
    /// # Returns
    /// Compact token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Decode and fully validate a token: signature first, then expiry.
    ///
    /// Expiry is checked with zero leeway so the 60-minute lifetime is exact.
    ///
    /// # Arguments
    /// * `token` - Token string to verify
    ///
    /// # Returns
    /// Verified claims
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not match
    /// * `Expired` - Token lifetime has passed
    /// * `Malformed` - Token structure or claims are invalid
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Decode token without signature or expiry validation (inspection only).
    ///
    /// # Arguments
    /// * `token` - Token string to decode
    ///
    /// # Returns
    /// Decoded claims without verification
    ///
    /// # Errors
    /// * `Malformed` - Token format is invalid
    ///
    /// # Security Warning
    /// This does NOT validate the token. Never trust claims from this method
    /// for authorization decisions.
    pub fn decode_unverified(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| TokenError::Malformed(e.to_string()))?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::super::claims::TOKEN_TTL_SECONDS;
    use super::*;

    fn claims_with_exp(exp: i64) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: "user123".to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp,
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let codec = TokenCodec::new(b"my_secret_key_at_least_32_bytes_long!");

        let claims = Claims::for_subject("user123");
        let token = codec.issue(&claims).expect("Failed to issue token");

        assert_eq!(token.split('.').count(), 3);

        let verified = codec.verify(&token).expect("Failed to verify token");
        assert_eq!(verified, claims);
        assert_eq!(verified.exp - verified.iat, TOKEN_TTL_SECONDS);
    }

    #[test]
    fn test_verify_garbage_is_malformed() {
        let codec = TokenCodec::new(b"my_secret_key_at_least_32_bytes_long!");

        let result = codec.verify("not.a.token");
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_verify_with_wrong_secret_is_invalid_signature() {
        let codec1 = TokenCodec::new(b"secret1_at_least_32_bytes_long_key!");
        let codec2 = TokenCodec::new(b"secret2_at_least_32_bytes_long_key!");

        let token = codec1
            .issue(&Claims::for_subject("user123"))
            .expect("Failed to issue token");

        let result = codec2.verify(&token);
        assert!(matches!(result, Err(TokenError::InvalidSignature)));
    }

    #[test]
    fn test_verify_past_expiry_is_expired() {
        let codec = TokenCodec::new(b"my_secret_key_at_least_32_bytes_long!");

        // One minute past the lifetime boundary
        let claims = claims_with_exp(Utc::now().timestamp() - 60);
        let token = codec.issue(&claims).expect("Failed to issue token");

        let result = codec.verify(&token);
        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn test_verify_before_expiry_succeeds() {
        let codec = TokenCodec::new(b"my_secret_key_at_least_32_bytes_long!");

        // One minute before the lifetime boundary
        let claims = claims_with_exp(Utc::now().timestamp() + 60);
        let token = codec.issue(&claims).expect("Failed to issue token");

        assert!(codec.verify(&token).is_ok());
    }

    #[test]
    fn test_decode_unverified_ignores_signature_and_expiry() {
        let codec1 = TokenCodec::new(b"secret1_at_least_32_bytes_long_key!");
        let codec2 = TokenCodec::new(b"secret2_at_least_32_bytes_long_key!");

        let claims = claims_with_exp(Utc::now().timestamp() - 60);
        let token = codec1.issue(&claims).expect("Failed to issue token");

        let decoded = codec2
            .decode_unverified(&token)
            .expect("Failed to decode unverified");
        assert_eq!(decoded, claims);
    }
}
