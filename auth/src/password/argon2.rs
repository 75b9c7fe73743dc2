use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;
use argon2::Params;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Argon2id with the OWASP reference cost parameters. The PHC output string
/// embeds algorithm, parameters, and salt, so old digests stay verifiable
/// when the parameters change.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Memory cost in KiB (OWASP minimum: 19 MiB).
    const MEMORY_COST_KIB: u32 = 19_456;
    /// Number of passes over memory.
    const TIME_COST: u32 = 2;
    const PARALLELISM: u32 = 1;

    /// Create a new password hasher with the default cost parameters.
    pub fn new() -> Self {
        Self::with_params(Self::MEMORY_COST_KIB, Self::TIME_COST, Self::PARALLELISM)
    }

    /// Create a hasher with explicit cost parameters.
    ///
    /// # Arguments
    /// * `memory_cost_kib` - Memory cost in KiB
    /// * `time_cost` - Number of passes
    /// * `parallelism` - Degree of parallelism
    pub fn with_params(memory_cost_kib: u32, time_cost: u32, parallelism: u32) -> Self {
        let params = Params::new(memory_cost_kib, time_cost, parallelism, None)
            .expect("Argon2 cost parameters are within the allowed ranges");

        Self {
            argon2: Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params),
        }
    }

    /// Hash a plaintext password securely.
    ///
    /// Uses Argon2id with a fresh random salt per call.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Comparison happens inside the algorithm in constant time. A hash that
    /// does not parse verifies as `false`; malformed digests are not
    /// distinguishable from a wrong password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
