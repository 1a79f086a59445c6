//! Outbound credential notification.
//!
//! The notifier is an external collaborator with a narrow contract: deliver a
//! newly generated login and password to a caregiver's email address,
//! best-effort. Delivery is decoupled from registration through a persistent
//! outbox drained by a background task, so a slow or unreachable relay never
//! stalls or rolls back a registration.

mod outbox;

pub use outbox::{Outbox, OutboxEntry};

use async_trait::async_trait;
use log::warn;
use serde_json::json;
use std::time::Duration;

/// Narrow delivery contract. Returns `true` on accepted delivery; all
/// failures are logged by the implementation and reported as `false`.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_credentials(
        &self,
        to_address: &str,
        login: &str,
        password: &str,
        display_name: &str,
    ) -> bool;
}

/// Notifier that posts a JSON message to an HTTP mail relay.
pub struct HttpRelayNotifier {
    client: reqwest::Client,
    relay_url: String,
    from_address: String,
}

impl HttpRelayNotifier {
    /// Build a notifier with an explicit per-request timeout so a stalled
    /// relay cannot hold an outbox worker indefinitely.
    pub fn new(relay_url: &str, from_address: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            relay_url: relay_url.to_string(),
            from_address: from_address.to_string(),
        }
    }
}

#[async_trait]
impl Notifier for HttpRelayNotifier {
    async fn send_credentials(
        &self,
        to_address: &str,
        login: &str,
        password: &str,
        display_name: &str,
    ) -> bool {
        let body = json!({
            "from": self.from_address,
            "to": to_address,
            "subject": "Your caregiver account",
            "text": format!(
                "Hello {},\n\nAn account has been created for you.\n\
                 Login: {}\nTemporary password: {}\n\n\
                 Please change your password after first login.",
                display_name, login, password
            ),
        });

        match self.client.post(&self.relay_url).json(&body).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!(
                    "Mail relay rejected credentials notification for {}: {}",
                    to_address,
                    response.status()
                );
                false
            }
            Err(e) => {
                warn!(
                    "Failed to reach mail relay for {}: {}",
                    to_address, e
                );
                false
            }
        }
    }
}

/// Notifier used when no mail relay is configured: logs the delivery that
/// would have happened and reports success so the outbox does not grow
/// without bound.
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn send_credentials(
        &self,
        to_address: &str,
        login: &str,
        _password: &str,
        _display_name: &str,
    ) -> bool {
        warn!(
            "Mail relay disabled; dropping credentials notification for {} (login {})",
            to_address, login
        );
        true
    }
}

/// In-memory notifier for tests and local development.
#[cfg(any(test, feature = "mock"))]
pub struct MockNotifier {
    pub sent: std::sync::Mutex<Vec<(String, String, String)>>,
    pub fail: std::sync::atomic::AtomicBool,
}

#[cfg(any(test, feature = "mock"))]
impl Default for MockNotifier {
    fn default() -> Self {
        Self {
            sent: std::sync::Mutex::new(Vec::new()),
            fail: std::sync::atomic::AtomicBool::new(false),
        }
    }
}

#[cfg(any(test, feature = "mock"))]
#[async_trait]
impl Notifier for MockNotifier {
    async fn send_credentials(
        &self,
        to_address: &str,
        login: &str,
        password: &str,
        _display_name: &str,
    ) -> bool {
        if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
            return false;
        }
        self.sent.lock().unwrap().push((
            to_address.to_string(),
            login.to_string(),
            password.to_string(),
        ));
        true
    }
}
