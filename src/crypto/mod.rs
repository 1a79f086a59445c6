//! Credential hashing and onboarding password generation.

pub mod password;

pub use password::{generate_onboarding_password, hash_password, verify_password};
