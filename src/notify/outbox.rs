//! Persistent outbox for credential notifications.
//!
//! Registration enqueues after its own writes have committed; a background
//! task drains the queue with bounded retry. A registration therefore exists
//! whether or not the email ever arrives (at-least-once, fire-and-forget for
//! the side channel).

use super::Notifier;
use crate::db_operations::DbOperations;
use crate::error::MaternaResult;
use chrono::{DateTime, Utc};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// One queued credentials notification.
///
/// Carries the plaintext onboarding password until delivery; entries are
/// removed on success and after the retry limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxEntry {
    pub id: Uuid,
    pub to_address: String,
    pub login: String,
    pub password: String,
    pub display_name: String,
    pub attempts: u32,
    pub created_at: DateTime<Utc>,
}

/// Outbox over the `notification_outbox` tree.
#[derive(Clone)]
pub struct Outbox {
    ops: DbOperations,
    max_attempts: u32,
}

impl Outbox {
    pub fn new(ops: DbOperations, max_attempts: u32) -> Self {
        Self { ops, max_attempts }
    }

    /// Queue a notification. Called only after the registration row is
    /// durably committed.
    pub fn enqueue(
        &self,
        to_address: &str,
        login: &str,
        password: &str,
        display_name: &str,
    ) -> MaternaResult<()> {
        let entry = OutboxEntry {
            id: Uuid::new_v4(),
            to_address: to_address.to_string(),
            login: login.to_string(),
            password: password.to_string(),
            display_name: display_name.to_string(),
            attempts: 0,
            created_at: Utc::now(),
        };
        self.ops
            .store_item(&self.ops.outbox_tree, &entry.id.to_string(), &entry)
    }

    /// Number of entries awaiting delivery.
    pub fn pending(&self) -> usize {
        self.ops.outbox_tree.len()
    }

    /// Attempt delivery of every queued entry once.
    ///
    /// Successful entries are removed; failed entries have their attempt
    /// count bumped and are dropped with an error log once the limit is hit.
    pub async fn drain_once(&self, notifier: &dyn Notifier) -> MaternaResult<()> {
        let entries: Vec<OutboxEntry> = self.ops.scan_items(&self.ops.outbox_tree)?;
        for mut entry in entries {
            let delivered = notifier
                .send_credentials(
                    &entry.to_address,
                    &entry.login,
                    &entry.password,
                    &entry.display_name,
                )
                .await;

            if delivered {
                info!("Delivered credentials notification to {}", entry.to_address);
                self.ops
                    .remove_item(&self.ops.outbox_tree, &entry.id.to_string())?;
                continue;
            }

            entry.attempts += 1;
            if entry.attempts >= self.max_attempts {
                error!(
                    "Dropping credentials notification to {} after {} attempts",
                    entry.to_address, entry.attempts
                );
                self.ops
                    .remove_item(&self.ops.outbox_tree, &entry.id.to_string())?;
            } else {
                self.ops
                    .store_item(&self.ops.outbox_tree, &entry.id.to_string(), &entry)?;
            }
        }
        Ok(())
    }

    /// Spawn the background delivery loop.
    pub fn spawn_worker(
        self,
        notifier: Arc<dyn Notifier>,
        poll_interval: Duration,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                if let Err(e) = self.drain_once(notifier.as_ref()).await {
                    error!("Outbox drain failed: {}", e);
                }
                tokio::time::sleep(poll_interval).await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MockNotifier;
    use std::sync::atomic::Ordering;

    fn test_outbox(max_attempts: u32) -> (Outbox, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let ops = DbOperations::open(dir.path()).unwrap();
        (Outbox::new(ops, max_attempts), dir)
    }

    #[tokio::test]
    async fn delivers_and_clears_entries() {
        let (outbox, _dir) = test_outbox(3);
        let notifier = MockNotifier::default();

        outbox
            .enqueue("mw@example.org", "851234567V", "s3cretPass!", "A. Fernando")
            .unwrap();
        assert_eq!(outbox.pending(), 1);

        outbox.drain_once(&notifier).await.unwrap();
        assert_eq!(outbox.pending(), 0);

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "mw@example.org");
        assert_eq!(sent[0].1, "851234567V");
    }

    #[tokio::test]
    async fn retries_then_drops_after_limit() {
        let (outbox, _dir) = test_outbox(2);
        let notifier = MockNotifier::default();
        notifier.fail.store(true, Ordering::SeqCst);

        outbox
            .enqueue("mw@example.org", "851234567V", "s3cretPass!", "A. Fernando")
            .unwrap();

        // First failure: retained with a bumped attempt count.
        outbox.drain_once(&notifier).await.unwrap();
        assert_eq!(outbox.pending(), 1);

        // Second failure hits the limit: dropped.
        outbox.drain_once(&notifier).await.unwrap();
        assert_eq!(outbox.pending(), 0);

        // Nothing was ever delivered.
        notifier.fail.store(false, Ordering::SeqCst);
        assert!(notifier.sent.lock().unwrap().is_empty());
    }
}
