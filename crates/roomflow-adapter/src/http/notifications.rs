/*
[INPUT]:  Notification ids from the inbox
[OUTPUT]: Read-state acknowledgements (response bodies ignored)
[POS]:    HTTP layer - notification read acks (require auth)
[UPDATE]: When the notification service contract changes
*/

use crate::http::{Result, RoomflowClient};
use reqwest::Method;

impl RoomflowClient {
    /// Acknowledge a single notification as read
    ///
    /// POST /api/notifications/{id}/read
    pub async fn ack_notification_read(&self, notification_id: i64) -> Result<()> {
        let endpoint = format!("/api/notifications/{notification_id}/read");
        let builder = self.request_with_auth(Method::POST, &endpoint)?;
        self.send_ok(builder).await
    }

    /// Acknowledge every notification as read
    ///
    /// POST /api/notifications/read-all
    pub async fn ack_all_notifications_read(&self) -> Result<()> {
        let builder = self.request_with_auth(Method::POST, "/api/notifications/read-all")?;
        self.send_ok(builder).await
    }
}
