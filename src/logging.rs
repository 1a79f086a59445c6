//! Logging initialization for the materna backend.

/// Initialize the logger from the `RUST_LOG` environment variable,
/// defaulting to `info`.
///
/// Returns an error if a logger was already installed, so callers can
/// `init().ok()` in tests and binaries alike.
pub fn init() -> Result<(), log::SetLoggerError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init()
}
