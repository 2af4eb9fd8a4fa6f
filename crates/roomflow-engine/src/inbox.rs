/*
[INPUT]:  Notifications delivered over the realtime channel + read actions.
[OUTPUT]: Session-local notification list with unread tracking and server acks.
[POS]:    State layer - notification inbox.
[UPDATE]: When merge rules or the read-acknowledgement protocol change.
*/

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use roomflow_adapter::{Notification, RoomflowClient};
use tracing::{debug, warn};

/// Seam over the read-acknowledgement endpoints so the inbox can be tested
/// without a server.
#[async_trait]
pub trait ReadAck: Send + Sync {
    async fn ack_read(&self, notification_id: i64) -> roomflow_adapter::Result<()>;
    async fn ack_all_read(&self) -> roomflow_adapter::Result<()>;
}

#[async_trait]
impl ReadAck for RoomflowClient {
    async fn ack_read(&self, notification_id: i64) -> roomflow_adapter::Result<()> {
        self.ack_notification_read(notification_id).await
    }

    async fn ack_all_read(&self) -> roomflow_adapter::Result<()> {
        self.ack_all_notifications_read().await
    }
}

/// In-memory notification store for one session.
///
/// Local read state is authoritative for the UI; server acknowledgements are
/// fire-and-forget, and an ack failure is logged but never rolls the local
/// flag back. The read flag is monotonic: once read, a notification never
/// reverts to unread, not even when a duplicate arrives over the channel.
pub struct NotificationInbox {
    entries: Mutex<Vec<Notification>>,
    ack: Option<Arc<dyn ReadAck>>,
}

impl NotificationInbox {
    /// Inbox without a server ack sink; read actions stay local.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            ack: None,
        }
    }

    pub fn with_ack(ack: Arc<dyn ReadAck>) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            ack: Some(ack),
        }
    }

    /// Add a notification from the realtime channel.
    ///
    /// Duplicate ids update title/body in place; the local read flag wins
    /// over an unread duplicate.
    pub fn receive(&self, incoming: Notification) {
        let mut entries = self.store();
        if let Some(existing) = entries.iter_mut().find(|entry| entry.id == incoming.id) {
            let was_read = existing.is_read;
            *existing = incoming;
            existing.is_read = existing.is_read || was_read;
            debug!(notification_id = existing.id, "notification updated");
        } else {
            debug!(notification_id = incoming.id, "notification received");
            entries.push(incoming);
        }
    }

    /// Mark one notification read. Returns whether local state changed;
    /// marking an already-read or unknown notification is a no-op and sends
    /// no acknowledgement.
    pub fn mark_one_read(&self, notification_id: i64) -> bool {
        let changed = {
            let mut entries = self.store();
            match entries.iter_mut().find(|entry| entry.id == notification_id) {
                Some(entry) if !entry.is_read => {
                    entry.is_read = true;
                    true
                }
                _ => false,
            }
        };

        if changed && let Some(ack) = self.ack.clone() {
            spawn_ack(async move {
                if let Err(err) = ack.ack_read(notification_id).await {
                    warn!(notification_id, error = %err, "read ack failed");
                }
            });
        }
        changed
    }

    /// Mark every notification read. Returns how many flipped; sends a single
    /// bulk acknowledgement only when at least one did.
    pub fn mark_all_read(&self) -> usize {
        let flipped = {
            let mut entries = self.store();
            let mut flipped = 0;
            for entry in entries.iter_mut() {
                if !entry.is_read {
                    entry.is_read = true;
                    flipped += 1;
                }
            }
            flipped
        };

        if flipped > 0 && let Some(ack) = self.ack.clone() {
            spawn_ack(async move {
                if let Err(err) = ack.ack_all_read().await {
                    warn!(error = %err, "bulk read ack failed");
                }
            });
        }
        flipped
    }

    pub fn all(&self) -> Vec<Notification> {
        self.store().clone()
    }

    pub fn unread(&self) -> Vec<Notification> {
        self.store()
            .iter()
            .filter(|entry| !entry.is_read)
            .cloned()
            .collect()
    }

    pub fn unread_count(&self) -> usize {
        self.store().iter().filter(|entry| !entry.is_read).count()
    }

    fn store(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for NotificationInbox {
    fn default() -> Self {
        Self::new()
    }
}

// Acks run detached so read actions stay synchronous for the caller. Outside
// a runtime (plain unit tests) the ack is skipped, not panicked on.
fn spawn_ack<F>(fut: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    if tokio::runtime::Handle::try_current().is_ok() {
        tokio::spawn(fut);
    } else {
        warn!("no async runtime; read ack skipped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn notification(id: i64, is_read: bool) -> Notification {
        Notification {
            id,
            title: format!("title-{id}"),
            body: format!("body-{id}"),
            created_at: Utc::now(),
            is_read,
        }
    }

    #[derive(Default)]
    struct CountingAck {
        single: AtomicUsize,
        bulk: AtomicUsize,
    }

    #[async_trait]
    impl ReadAck for CountingAck {
        async fn ack_read(&self, _notification_id: i64) -> roomflow_adapter::Result<()> {
            self.single.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn ack_all_read(&self) -> roomflow_adapter::Result<()> {
            self.bulk.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn receive_appends_and_counts_unread() {
        let inbox = NotificationInbox::new();
        inbox.receive(notification(1, false));
        inbox.receive(notification(2, true));

        assert_eq!(inbox.all().len(), 2);
        assert_eq!(inbox.unread_count(), 1);
        assert_eq!(inbox.unread()[0].id, 1);
    }

    #[test]
    fn duplicate_delivery_never_reverts_read_flag() {
        let inbox = NotificationInbox::new();
        inbox.receive(notification(1, false));
        assert!(inbox.mark_one_read(1));

        inbox.receive(notification(1, false));

        assert_eq!(inbox.all().len(), 1);
        assert_eq!(inbox.unread_count(), 0);
    }

    #[test]
    fn mark_one_read_is_idempotent() {
        let inbox = NotificationInbox::new();
        inbox.receive(notification(1, false));

        assert!(inbox.mark_one_read(1));
        assert!(!inbox.mark_one_read(1));
        assert!(!inbox.mark_one_read(99));
        assert_eq!(inbox.unread_count(), 0);
    }

    #[test]
    fn mark_all_read_counts_only_flips() {
        let inbox = NotificationInbox::new();
        inbox.receive(notification(1, false));
        inbox.receive(notification(2, true));
        inbox.receive(notification(3, false));

        assert_eq!(inbox.mark_all_read(), 2);
        assert_eq!(inbox.mark_all_read(), 0);
        assert_eq!(inbox.unread_count(), 0);
    }

    #[tokio::test]
    async fn read_actions_send_acks_once() {
        let ack = Arc::new(CountingAck::default());
        let inbox = NotificationInbox::with_ack(ack.clone());
        inbox.receive(notification(1, false));
        inbox.receive(notification(2, false));

        inbox.mark_one_read(1);
        inbox.mark_one_read(1);
        inbox.mark_all_read();
        inbox.mark_all_read();

        // Acks are detached tasks; give them a beat to run.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(ack.single.load(Ordering::SeqCst), 1);
        assert_eq!(ack.bulk.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn read_action_without_runtime_still_updates_locally() {
        let ack = Arc::new(CountingAck::default());
        let inbox = NotificationInbox::with_ack(ack);
        inbox.receive(notification(1, false));

        assert!(inbox.mark_one_read(1));
        assert_eq!(inbox.unread_count(), 0);
    }
}
