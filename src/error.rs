//! Unified error type for the materna backend.

use thiserror::Error;

/// Result type alias for operations that can result in a [`MaternaError`].
pub type MaternaResult<T> = Result<T, MaternaError>;

/// Errors that can occur while servicing a request.
///
/// The first five variants form the domain taxonomy surfaced to API callers;
/// the remaining variants cover infrastructure faults. All are terminal and
/// non-retryable from the caller's point of view.
#[derive(Error, Debug)]
pub enum MaternaError {
    /// A registration collided with an existing login identifier,
    /// national-ID, email or phone number.
    #[error("Duplicate identity: {0}")]
    DuplicateIdentity(String),

    /// Bad credentials or an unverifiable/expired/unresolvable token.
    /// Deliberately carries no detail about which check failed.
    #[error("Could not validate credentials")]
    AuthFailure,

    /// A referenced Patient or record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The authenticated principal does not own the referenced entity.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Wrong old password on a password change; stored state is unchanged.
    #[error("Incorrect old password")]
    InvalidCredential,

    /// Errors from the persistent store.
    #[error("Database error: {0}")]
    Database(String),

    /// Errors during serialization/deserialization.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Errors related to configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors from password hashing or token signing.
    #[error("Crypto error: {0}")]
    Crypto(String),
}

impl From<sled::Error> for MaternaError {
    fn from(error: sled::Error) -> Self {
        MaternaError::Database(error.to_string())
    }
}

impl From<serde_json::Error> for MaternaError {
    fn from(error: serde_json::Error) -> Self {
        MaternaError::Serialization(error.to_string())
    }
}

impl From<argon2::password_hash::Error> for MaternaError {
    fn from(error: argon2::password_hash::Error) -> Self {
        MaternaError::Crypto(error.to_string())
    }
}
