//! Salted-digest admin secret.
//!
//! The salt and digest are normally produced by `sprig-shell-secretgen` and pasted
//! into the firmware as constants:
//!
//! ```rust,ignore
//! const ADMIN_SALT: [u8; 16] = [/* generated */];
//! const ADMIN_HASH: [u8; 32] = [/* generated */];
//! static SECRET: HashedSecret<Sha256Hasher> =
//!     HashedSecret::new(ADMIN_HASH, ADMIN_SALT, Sha256Hasher::new());
//! ```

use super::{PasswordHasher, SecretVerifier};

/// Admin secret stored as salt and hash only.
#[derive(Debug, Clone)]
pub struct HashedSecret<H: PasswordHasher> {
    hash: [u8; 32],
    salt: [u8; 16],
    hasher: H,
}

impl<H: PasswordHasher> HashedSecret<H> {
    /// Create a verifier from a precomputed hash and its salt.
    pub const fn new(hash: [u8; 32], salt: [u8; 16], hasher: H) -> Self {
        Self { hash, salt, hasher }
    }

    /// Hash `secret` with `salt` at runtime.
    pub fn from_secret(secret: &str, salt: [u8; 16], hasher: H) -> Self {
        let hash = hasher.hash(secret, &salt);
        Self { hash, salt, hasher }
    }
}

impl<H: PasswordHasher> SecretVerifier for HashedSecret<H> {
    fn verify(&self, secret: &str) -> bool {
        self.hasher.verify(secret, &self.salt, &self.hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Sha256Hasher;

    #[test]
    fn test_from_secret_verifies() {
        let secret = HashedSecret::from_secret("s3cret", [9u8; 16], Sha256Hasher::new());
        assert!(secret.verify("s3cret"));
        assert!(!secret.verify("S3cret"));
    }

    #[test]
    fn test_const_construction_matches_runtime_hash() {
        let salt = [5u8; 16];
        let hash = Sha256Hasher::new().hash("pin", &salt);
        let secret = HashedSecret::new(hash, salt, Sha256Hasher::new());
        assert!(secret.verify("pin"));
        assert!(!secret.verify("pine"));
    }
}
