//! One-way password hashing.
//!
//! Entities and facades only see the [`PasswordHasher`] trait. Production code injects
//! [`BcryptHasher`]; tests can swap in something fast.

use std::fmt::Debug;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
#[error("Password hashing failed: {0}")]
pub struct HashError(pub String);

pub trait PasswordHasher: Debug + Send + Sync {
    /// Produces a one-way hash of `plaintext`.
    fn hash(&self, plaintext: &str) -> Result<String, HashError>;

    /// Whether `plaintext` hashes to `hash`. A malformed hash never verifies.
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}

/// bcrypt with a configurable work factor.
#[derive(Debug, Clone)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| HashError(e.to_string()))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        bcrypt::verify(plaintext, hash).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcrypt_round_trip() {
        let hasher = BcryptHasher::new(4);
        let hash = hasher.hash("s3cret").unwrap();

        assert_ne!(hash, "s3cret");
        assert!(hasher.verify("s3cret", &hash));
        assert!(!hasher.verify("other", &hash));
        assert!(!hasher.verify("s3cret", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_invalid_cost_is_an_error() {
        let hasher = BcryptHasher::new(99);
        assert!(hasher.hash("s3cret").is_err());
    }
}
