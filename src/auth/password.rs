//! Password hashing.
//!
//! Wraps bcrypt: a fresh random salt per hash, and verification that
//! reports a mismatch (or a malformed stored digest) as `false` rather
//! than an error.

use anyhow::{Context, Result};
use bcrypt::DEFAULT_COST;
use tracing::warn;

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with a reduced work factor, for tests.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password with a random salt.
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        bcrypt::hash(plaintext, self.cost).context("Failed to hash password")
    }

    /// Check a plaintext password against a stored digest.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        match bcrypt::verify(plaintext, digest) {
            Ok(matches) => matches,
            Err(e) => {
                warn!("Stored password digest is malformed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4; // minimum bcrypt cost, keeps tests fast

    #[test]
    fn test_hash_then_verify() {
        let hasher = PasswordHasher::with_cost(TEST_COST);
        let digest = hasher.hash("secret123").unwrap();

        assert!(hasher.verify("secret123", &digest));
        assert!(!hasher.verify("wrongpassword", &digest));
    }

    #[test]
    fn test_repeated_hashes_are_salted() {
        let hasher = PasswordHasher::with_cost(TEST_COST);
        let first = hasher.hash("secret123").unwrap();
        let second = hasher.hash("secret123").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("secret123", &first));
        assert!(hasher.verify("secret123", &second));
    }

    #[test]
    fn test_malformed_digest_is_a_mismatch() {
        let hasher = PasswordHasher::with_cost(TEST_COST);
        assert!(!hasher.verify("secret123", "not-a-bcrypt-digest"));
        assert!(!hasher.verify("secret123", ""));
    }
}
