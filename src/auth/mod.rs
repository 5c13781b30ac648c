//! Privilege levels and admin secret verification.
//!
//! A shell session runs at [`Privilege::None`] until a correct secret is submitted
//! through the built-in `auth` command, which raises it to [`Privilege::Admin`].
//! Commands and menu items flagged as admin-only are refused below that level.
//!
//! [`PlainSecret`] compares against a compiled-in string and is always available.
//! With the `authentication` feature, [`HashedSecret`] verifies against a salted
//! SHA-256 digest generated by the `sprig-shell-secretgen` binary.

#[cfg(feature = "authentication")]
pub mod hashed;
#[cfg(feature = "authentication")]
pub mod password;

#[cfg(feature = "authentication")]
pub use hashed::HashedSecret;
#[cfg(feature = "authentication")]
pub use password::Sha256Hasher;

/// Session privilege level.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Privilege {
    /// Not authenticated
    #[default]
    None,

    /// Admin privileges granted by a correct secret
    Admin,
}

impl Privilege {
    /// Check whether this level satisfies a command's admin requirement.
    pub fn permits(self, admin_required: bool) -> bool {
        !admin_required || self >= Privilege::Admin
    }
}

/// Verifies a secret submitted by the user.
pub trait SecretVerifier {
    /// Returns `true` if `secret` grants admin privileges.
    fn verify(&self, secret: &str) -> bool;
}

/// Compiled-in plain text secret.
///
/// Exact string equality, not timing-safe. Use [`HashedSecret`] (feature
/// `authentication`) when the secret must not be readable from the firmware image.
#[derive(Debug, Copy, Clone)]
pub struct PlainSecret(&'static str);

impl PlainSecret {
    /// Create a verifier accepting exactly `secret`.
    pub const fn new(secret: &'static str) -> Self {
        Self(secret)
    }
}

impl SecretVerifier for PlainSecret {
    fn verify(&self, secret: &str) -> bool {
        secret == self.0
    }
}

/// Password hashing trait.
///
/// Hashes are 32 bytes; verification MUST use constant-time comparison.
#[cfg(feature = "authentication")]
pub trait PasswordHasher {
    /// Hash password with salt.
    fn hash(&self, password: &str, salt: &[u8]) -> [u8; 32];

    /// Verify password against hash using constant-time comparison.
    fn verify(&self, password: &str, salt: &[u8], hash: &[u8; 32]) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privilege_ordering() {
        assert!(Privilege::Admin > Privilege::None);
        assert_eq!(Privilege::default(), Privilege::None);
    }

    #[test]
    fn test_privilege_permits() {
        assert!(Privilege::None.permits(false));
        assert!(!Privilege::None.permits(true));
        assert!(Privilege::Admin.permits(true));
    }

    #[test]
    fn test_plain_secret_exact_match() {
        let secret = PlainSecret::new("admin123");
        assert!(secret.verify("admin123"));
        assert!(!secret.verify("admin12"));
        assert!(!secret.verify("admin1234"));
        assert!(!secret.verify(""));
    }
}
