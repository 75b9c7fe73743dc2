//! Authentication utilities library
//!
//! Provides the authentication infrastructure for the gallery backend:
//! - Password hashing (Argon2id)
//! - Signed bearer-token issuance and verification
//! - Authentication coordination
//!
//! The service defines its own domain traits and adapts these implementations,
//! keeping the cryptographic machinery out of business logic.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth::{Claims, TokenCodec};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_subject("user123");
//! let token = codec.issue(&claims).unwrap();
//! let verified = codec.verify(&token).unwrap();
//! assert_eq!(verified.sub, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and mint a token
//! let issued = auth.authenticate("password123", &hash, "user123").unwrap();
//! println!("Token: {}", issued.access_token);
//!
//! // Validate token
//! let claims = auth.verify_token(&issued.access_token).unwrap();
//! assert_eq!(claims.jti, issued.claims.jti);
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::IssuedToken;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::TOKEN_TTL_SECONDS;
