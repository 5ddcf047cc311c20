use crate::domain::notification::BookingNotification;
use crate::error::AppError;
use async_trait::async_trait;

/// Booking confirmation delivery.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn send_email(&self, notification: &BookingNotification) -> Result<(), AppError>;

    async fn send_whatsapp(&self, notification: &BookingNotification) -> Result<(), AppError>;
}
