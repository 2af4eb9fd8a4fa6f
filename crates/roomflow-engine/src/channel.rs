/*
[INPUT]:  WS endpoint, session credentials, and the notification inbox.
[OUTPUT]: Broadcast channel state + notifications drained into the inbox.
[POS]:    Connection layer - realtime channel lifecycle and reconnection.
[UPDATE]: When the retry policy or state transitions change.
*/

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use roomflow_adapter::{AdapterError, Notification, NotificationSocket};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::inbox::NotificationInbox;

const DEFAULT_MAX_ATTEMPTS: u32 = 5;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(2000);

/// Observable connection state for the notification channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelState {
    Disconnected { retry_count: u32 },
    Connecting,
    Connected,
}

/// Reconnection policy: a fixed delay between attempts and a hard ceiling.
/// No backoff; the delay is constant by design of the channel contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

/// Owns the background worker that keeps the notification stream alive.
///
/// Opening with missing credentials yields a permanently disconnected
/// manager that never attempts a connection. Otherwise the worker connects,
/// drains notifications into the inbox, and on loss retries with the fixed
/// delay until the attempt ceiling is reached. The attempt counter resets
/// every time a connection is established.
pub struct ChannelManager {
    state_tx: watch::Sender<ChannelState>,
    shutdown: CancellationToken,
    worker: Option<JoinHandle<()>>,
    attempts: Arc<AtomicU32>,
}

impl ChannelManager {
    pub fn open(
        ws_url: &str,
        user_id: Option<i64>,
        token: Option<&str>,
        policy: RetryPolicy,
        inbox: Arc<NotificationInbox>,
    ) -> Self {
        let (state_tx, _) = watch::channel(ChannelState::Disconnected { retry_count: 0 });
        let shutdown = CancellationToken::new();
        let attempts = Arc::new(AtomicU32::new(0));

        let (Some(user_id), Some(token)) = (user_id, token) else {
            info!("notification channel disabled: missing session credentials");
            return Self {
                state_tx,
                shutdown,
                worker: None,
                attempts,
            };
        };
        if token.trim().is_empty() {
            info!("notification channel disabled: empty token");
            return Self {
                state_tx,
                shutdown,
                worker: None,
                attempts,
            };
        }
        if tokio::runtime::Handle::try_current().is_err() {
            warn!("notification channel disabled: no async runtime");
            return Self {
                state_tx,
                shutdown,
                worker: None,
                attempts,
            };
        }

        let worker = ChannelWorker {
            ws_url: ws_url.to_string(),
            user_id,
            token: token.to_string(),
            policy,
            inbox,
            state_tx: state_tx.clone(),
            shutdown: shutdown.clone(),
            attempts: attempts.clone(),
        };
        let handle = tokio::spawn(worker.run());

        Self {
            state_tx,
            shutdown,
            worker: Some(handle),
            attempts,
        }
    }

    pub fn subscribe_state(&self) -> watch::Receiver<ChannelState> {
        self.state_tx.subscribe()
    }

    pub fn state(&self) -> ChannelState {
        self.state_tx.borrow().clone()
    }

    /// Total connection attempts made since open.
    pub fn connect_attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Tear the channel down and wait for the worker to exit.
    pub async fn close(mut self) {
        self.shutdown.cancel();
        if let Some(handle) = self.worker.take() {
            let _ = handle.await;
        }
        debug!("notification channel closed");
    }
}

impl Drop for ChannelManager {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

enum StreamExit {
    Closed,
    Shutdown,
}

struct ChannelWorker {
    ws_url: String,
    user_id: i64,
    token: String,
    policy: RetryPolicy,
    inbox: Arc<NotificationInbox>,
    state_tx: watch::Sender<ChannelState>,
    shutdown: CancellationToken,
    attempts: Arc<AtomicU32>,
}

impl ChannelWorker {
    async fn run(self) {
        let mut retry_count: u32 = 0;

        loop {
            let _ = self.state_tx.send(ChannelState::Connecting);
            self.attempts.fetch_add(1, Ordering::SeqCst);

            let connected = tokio::select! {
                _ = self.shutdown.cancelled() => {
                    let _ = self.state_tx.send(ChannelState::Disconnected { retry_count });
                    return;
                }
                result = self.connect_once() => result,
            };

            match connected {
                Ok(mut stream) => {
                    // A successful connection restores the full retry budget.
                    retry_count = 0;
                    let _ = self.state_tx.send(ChannelState::Connected);
                    info!(user_id = self.user_id, "notification channel connected");

                    if let StreamExit::Shutdown = self.drain(&mut stream).await {
                        let _ = self.state_tx.send(ChannelState::Disconnected { retry_count });
                        return;
                    }
                    warn!(user_id = self.user_id, "notification stream lost");
                    let _ = self.state_tx.send(ChannelState::Disconnected { retry_count });
                }
                Err(err) => {
                    retry_count = retry_count.saturating_add(1);
                    warn!(
                        user_id = self.user_id,
                        retry_count,
                        error = %err,
                        "notification channel connect failed"
                    );
                    let _ = self.state_tx.send(ChannelState::Disconnected { retry_count });

                    if retry_count >= self.policy.max_attempts {
                        warn!(
                            user_id = self.user_id,
                            attempts = retry_count,
                            "notification channel retry ceiling reached; giving up"
                        );
                        return;
                    }
                }
            }

            tokio::select! {
                _ = self.shutdown.cancelled() => return,
                _ = tokio::time::sleep(self.policy.retry_delay) => {}
            }
        }
    }

    async fn connect_once(&self) -> roomflow_adapter::Result<mpsc::Receiver<Notification>> {
        let mut socket = NotificationSocket::new();
        socket.connect(&self.ws_url, &self.token).await?;
        socket
            .take_receiver()
            .ok_or_else(|| AdapterError::WebSocket("notification receiver already taken".to_string()))
    }

    async fn drain(&self, stream: &mut mpsc::Receiver<Notification>) -> StreamExit {
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => return StreamExit::Shutdown,
                message = stream.recv() => match message {
                    Some(notification) => {
                        debug!(notification_id = notification.id, "notification delivered");
                        self.inbox.receive(notification);
                    }
                    // Pump task dropped its sender: the socket is gone.
                    None => return StreamExit::Closed,
                },
            }
        }
    }
}
