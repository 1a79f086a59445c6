//! Password hashing for all three principal kinds.
//!
//! Passwords are hashed with Argon2id and a fresh random salt on every call,
//! so hashing the same password twice yields two different digests that both
//! verify. Only the first 72 bytes of a password are significant: input is
//! truncated to that limit before hashing and before verification.

use crate::error::MaternaResult;
use argon2::password_hash::{rand_core::OsRng as SaltRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;
use rand::Rng;

/// Maximum number of password bytes fed into the hash function.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Default length of a generated onboarding password.
pub const ONBOARDING_PASSWORD_LENGTH: usize = 10;

/// Characters an onboarding password is drawn from.
const ONBOARDING_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%&*+-_?";

fn truncated(password: &str) -> &[u8] {
    let bytes = password.as_bytes();
    &bytes[..bytes.len().min(MAX_PASSWORD_BYTES)]
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> MaternaResult<String> {
    let salt = SaltString::generate(&mut SaltRng);
    let digest = Argon2::default().hash_password(truncated(password), &salt)?;
    Ok(digest.to_string())
}

/// Verify a plaintext password against a stored digest.
///
/// An unparseable digest verifies as false rather than erroring; a corrupt
/// stored hash must read as "wrong password", not a server fault.
pub fn verify_password(password: &str, digest: &str) -> bool {
    match PasswordHash::new(digest) {
        Ok(parsed) => Argon2::default()
            .verify_password(truncated(password), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Generate a random onboarding password for an Officer-registered Caregiver.
///
/// Drawn uniformly from letters, digits and a fixed punctuation set using the
/// operating system's secure random source. Delivered to the Caregiver
/// out-of-band; only the hash is persisted.
pub fn generate_onboarding_password(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..ONBOARDING_CHARSET.len());
            ONBOARDING_CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let digest = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &digest));
        assert!(!verify_password("correct horse battery!", &digest));
        assert!(!verify_password("", &digest));
    }

    #[test]
    fn same_password_hashes_differently() {
        let first = hash_password("midwife-pass-1").unwrap();
        let second = hash_password("midwife-pass-1").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("midwife-pass-1", &first));
        assert!(verify_password("midwife-pass-1", &second));
    }

    #[test]
    fn long_passwords_truncate_at_limit() {
        let long: String = "a".repeat(200);
        let digest = hash_password(&long).unwrap();
        // Anything matching the first 72 bytes verifies.
        assert!(verify_password(&"a".repeat(72), &digest));
        assert!(verify_password(&"a".repeat(150), &digest));
        assert!(!verify_password(&"a".repeat(71), &digest));
    }

    #[test]
    fn corrupt_digest_verifies_false() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn onboarding_password_shape() {
        let password = generate_onboarding_password(ONBOARDING_PASSWORD_LENGTH);
        assert_eq!(password.len(), ONBOARDING_PASSWORD_LENGTH);
        assert!(password
            .bytes()
            .all(|b| ONBOARDING_CHARSET.contains(&b)));

        // Two draws colliding would be a broken random source.
        let other = generate_onboarding_password(ONBOARDING_PASSWORD_LENGTH);
        assert_ne!(password, other);
    }
}
