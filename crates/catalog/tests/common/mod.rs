use catalog::config::CatalogConfig;
use catalog::hashing::{HashError, PasswordHasher};
use catalog::lifecycle::CatalogSystem;
use std::sync::Arc;

/// Reversible stand-in for bcrypt so tests stay fast.
#[derive(Debug)]
pub struct PrefixHasher;

impl PasswordHasher for PrefixHasher {
    fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        Ok(format!("hashed:{plaintext}"))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        hash.strip_prefix("hashed:") == Some(plaintext)
    }
}

pub fn start_system() -> CatalogSystem {
    CatalogSystem::with_hasher(&CatalogConfig::default(), Arc::new(PrefixHasher))
}
