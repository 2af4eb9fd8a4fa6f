/*
[INPUT]:  WebSocket URL and bearer token for authentication
[OUTPUT]: Parsed notification payloads via an mpsc channel
[POS]:    WebSocket layer - realtime notification stream handling
[UPDATE]: When the frame format or connection logic changes
*/

use crate::http::{AdapterError, Result};
use crate::types::Notification;
use futures_util::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, info};
use url::Url;

const PARSE_FAIL_LOG_LIMIT: usize = 3;
const RAW_LOG_MAX_BYTES: usize = 1024;

static PARSE_FAIL_LOG_COUNT: AtomicUsize = AtomicUsize::new(0);

/// WebSocket client for the notification stream.
///
/// One socket per authenticated session. The socket only consumes frames;
/// the single outbound message it ever sends is the close handshake reply.
/// When the connection drops for any reason the pump task ends and the
/// receiver observes channel closure - reconnection policy lives with the
/// engine's channel manager, not here.
#[derive(Debug)]
pub struct NotificationSocket {
    event_tx: mpsc::Sender<Notification>,
    event_rx: Option<mpsc::Receiver<Notification>>,
}

impl NotificationSocket {
    /// Create a new notification socket
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(100);
        Self {
            event_tx: tx,
            event_rx: Some(rx),
        }
    }

    /// Get the notification receiver
    pub fn take_receiver(&mut self) -> Option<mpsc::Receiver<Notification>> {
        self.event_rx.take()
    }

    /// Connect to the notification stream.
    ///
    /// The token rides as a query parameter per the backend contract.
    pub async fn connect(&self, ws_url: &str, token: &str) -> Result<()> {
        let url = Url::parse_with_params(ws_url, &[("token", token)])?;

        let (ws_stream, _response) = connect_async(url.as_str())
            .await
            .map_err(|err| AdapterError::WebSocket(err.to_string()))?;
        let (mut write, mut read) = ws_stream.split();

        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            while let Some(frame) = read.next().await {
                match frame {
                    Ok(WsMessage::Close(_)) => {
                        let _ = write.send(WsMessage::Close(None)).await;
                        break;
                    }
                    Ok(WsMessage::Ping(_)) | Ok(WsMessage::Pong(_)) => {}
                    Ok(message) => {
                        if let Some(notification) = parse_frame(message)
                            && event_tx.send(notification).await.is_err()
                        {
                            break;
                        }
                    }
                    Err(_) => {
                        break;
                    }
                }
            }
            // Dropping event_tx here closes the channel; the owner sees
            // `recv() == None` as the disconnect signal.
        });

        Ok(())
    }
}

impl Default for NotificationSocket {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse one inbound frame into a notification payload.
///
/// A malformed frame is logged and dropped; it must never be treated as a
/// connection error.
fn parse_frame(message: WsMessage) -> Option<Notification> {
    let text: String = match message {
        WsMessage::Text(text) => text.to_string(),
        WsMessage::Binary(bytes) => String::from_utf8(bytes.to_vec()).ok()?,
        _ => return None,
    };

    match serde_json::from_str::<Notification>(&text) {
        Ok(notification) => Some(notification),
        Err(err) => {
            log_parse_fail_once(&err, &text);
            None
        }
    }
}

fn log_parse_fail_once(err: &serde_json::Error, raw: &str) {
    let count = PARSE_FAIL_LOG_COUNT.fetch_add(1, Ordering::Relaxed);
    if count < PARSE_FAIL_LOG_LIMIT {
        info!(
            sample_index = count + 1,
            sample_limit = PARSE_FAIL_LOG_LIMIT,
            error = %err,
            bytes = raw.len(),
            "ws notification parse failed"
        );
        let preview = truncate_for_log(raw, RAW_LOG_MAX_BYTES);
        debug!(
            sample_index = count + 1,
            sample_limit = PARSE_FAIL_LOG_LIMIT,
            error = %err,
            bytes = raw.len(),
            message = %preview,
            "ws notification parse failed"
        );
    }
}

fn truncate_for_log(value: &str, max_len: usize) -> String {
    if value.len() <= max_len {
        return value.to_string();
    }
    let mut out = String::with_capacity(max_len + 3);
    out.push_str(&value[..max_len]);
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_frame_accepts_notification_payload() {
        let raw = r#"{
            "id": 5,
            "title": "New rush task",
            "body": "Room 310 flagged as rush",
            "created_at": "2026-08-24T10:00:00Z",
            "is_read": false
        }"#;

        let parsed = parse_frame(WsMessage::Text(raw.into()));
        let notification = parsed.expect("payload should parse");
        assert_eq!(notification.id, 5);
        assert_eq!(notification.title, "New rush task");
    }

    #[test]
    fn parse_frame_drops_malformed_payload() {
        assert!(parse_frame(WsMessage::Text("not json".into())).is_none());
        assert!(parse_frame(WsMessage::Text(r#"{"id": "nope"}"#.into())).is_none());
    }
}
