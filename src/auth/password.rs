//! SHA-256 secret hashing with constant-time verification.

use super::PasswordHasher;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// SHA-256 password hasher with constant-time verification.
///
/// The salt is fed to the digest before the secret; verification compares digests
/// with `subtle::ConstantTimeEq`.
#[derive(Debug, Copy, Clone, Default)]
pub struct Sha256Hasher;

impl Sha256Hasher {
    /// Create a new SHA-256 hasher.
    pub const fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Sha256Hasher {
    fn hash(&self, password: &str, salt: &[u8]) -> [u8; 32] {
        let mut digest = Sha256::new();
        digest.update(salt);
        digest.update(password.as_bytes());

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&digest.finalize());
        hash
    }

    fn verify(&self, password: &str, salt: &[u8], hash: &[u8; 32]) -> bool {
        self.hash(password, salt).ct_eq(hash).into()
    }
}
