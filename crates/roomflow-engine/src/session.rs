/*
[INPUT]:  Session configuration + authenticated staff identity.
[OUTPUT]: Wired client, inbox, notification channel, and task actioner.
[POS]:    Composition layer - one object per signed-in operator.
[UPDATE]: When session wiring or teardown order changes.
*/

use std::sync::Arc;

use roomflow_adapter::{Credentials, RoomflowClient, StaffRef};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::channel::{ChannelManager, ChannelState};
use crate::config::SessionConfig;
use crate::inbox::NotificationInbox;
use crate::lifecycle::{Notice, Refetch, TaskActioner};

/// Everything one signed-in operator needs: an authenticated client, the
/// notification inbox fed by the realtime channel, and the task actioner.
///
/// `close` tears the session down in order: the actioner scope first so
/// in-flight results are dropped, then the channel worker.
pub struct Session {
    client: Arc<RoomflowClient>,
    inbox: Arc<NotificationInbox>,
    channel: Option<ChannelManager>,
    actioner: Arc<TaskActioner<RoomflowClient>>,
    scope: CancellationToken,
    notices: Option<mpsc::UnboundedReceiver<Notice>>,
    refetches: Option<mpsc::UnboundedReceiver<Refetch>>,
}

impl Session {
    pub fn open(config: &SessionConfig, user: StaffRef, token: &str) -> anyhow::Result<Self> {
        let mut client =
            RoomflowClient::with_config_and_base_url(config.client_config(), &config.api_base_url)?;
        client.set_credentials(Credentials {
            token: token.to_string(),
            user_id: user.id,
        });
        let client = Arc::new(client);

        let inbox = Arc::new(NotificationInbox::with_ack(client.clone()));
        let channel = ChannelManager::open(
            &config.ws_url,
            Some(user.id),
            Some(token),
            config.retry_policy(),
            inbox.clone(),
        );

        let scope = CancellationToken::new();
        let (notice_tx, notice_rx) = mpsc::unbounded_channel();
        let (refetch_tx, refetch_rx) = mpsc::unbounded_channel();
        let actioner = Arc::new(TaskActioner::new(
            client.clone(),
            user.clone(),
            notice_tx,
            refetch_tx,
            scope.child_token(),
        ));

        info!(user_id = user.id, role = ?user.role, "session opened");

        Ok(Self {
            client,
            inbox,
            channel: Some(channel),
            actioner,
            scope,
            notices: Some(notice_rx),
            refetches: Some(refetch_rx),
        })
    }

    pub fn client(&self) -> &Arc<RoomflowClient> {
        &self.client
    }

    pub fn inbox(&self) -> &Arc<NotificationInbox> {
        &self.inbox
    }

    pub fn actioner(&self) -> &Arc<TaskActioner<RoomflowClient>> {
        &self.actioner
    }

    /// Live view of the notification channel state.
    pub fn channel_state(&self) -> Option<watch::Receiver<ChannelState>> {
        self.channel.as_ref().map(ChannelManager::subscribe_state)
    }

    /// Notice stream for the owning view. Single consumer; first caller wins.
    pub fn take_notices(&mut self) -> Option<mpsc::UnboundedReceiver<Notice>> {
        self.notices.take()
    }

    /// Refetch hints for the owning view. Single consumer; first caller wins.
    pub fn take_refetch_requests(&mut self) -> Option<mpsc::UnboundedReceiver<Refetch>> {
        self.refetches.take()
    }

    pub async fn close(mut self) {
        self.scope.cancel();
        if let Some(channel) = self.channel.take() {
            channel.close().await;
        }
        info!("session closed");
    }
}
