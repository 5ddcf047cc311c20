//! Email and WhatsApp confirmation webhooks.

use async_trait::async_trait;

use super::client::WebhookClient;
use crate::domain::gateways::NotificationGateway;
use crate::domain::notification::BookingNotification;
use crate::error::AppError;

/// Posts the notification as-is to `<NOTIFICATION_API_URL>/email` and `/whatsapp`.
pub struct HttpNotificationGateway {
    client: WebhookClient,
}

impl HttpNotificationGateway {
    pub fn new(client: WebhookClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationGateway for HttpNotificationGateway {
    async fn send_email(&self, notification: &BookingNotification) -> Result<(), AppError> {
        self.client.post_json("email", notification).await?;
        Ok(())
    }

    async fn send_whatsapp(&self, notification: &BookingNotification) -> Result<(), AppError> {
        self.client.post_json("whatsapp", notification).await?;
        Ok(())
    }
}
