//! Security Utilities
//!
//! Password hashing and the device-hash and token helpers shared by the
//! services.

use bcrypt::{hash, verify, DEFAULT_COST};
use rand::{distributions::Alphanumeric, Rng};
use sha2::{Digest, Sha256};

/// Default bcrypt cost for password hashing
pub const DEFAULT_BCRYPT_COST: u32 = DEFAULT_COST;

/// Hash a password using bcrypt
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash_password_with_cost(password, DEFAULT_BCRYPT_COST)
}

/// Hash a password with custom bcrypt cost
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

/// Verify a password against its hash
pub fn verify_password(password: &str, hashed: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hashed)
}

/// Derive the lookup hash for a raw device identifier (sha256 hex)
///
/// The mobile client sends this same derivation, so the admin side never
/// sees raw device IDs on the wire.
pub fn hash_device_id(device_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(device_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Generate a random alphanumeric string, used for transaction references
/// in test fixtures and seed data
pub fn generate_reference(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_roundtrip() {
        let hashed = hash_password_with_cost("Admin@123", 4).unwrap();
        assert!(verify_password("Admin@123", &hashed).unwrap());
        assert!(!verify_password("wrong-password", &hashed).unwrap());
    }

    #[test]
    fn device_hash_is_deterministic_hex() {
        let a = hash_device_id("device-abc");
        let b = hash_device_id("device-abc");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, hash_device_id("device-abd"));
    }

    #[test]
    fn reference_has_requested_length() {
        let reference = generate_reference(16);
        assert_eq!(reference.len(), 16);
        assert!(reference.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
