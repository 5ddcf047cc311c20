use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::gateways::NotificationGateway;
use crate::domain::notification::{BookingNotification, Channel};

/// Attempts per channel, first try included.
const MAX_ATTEMPTS: usize = 3;
/// Backoff grows 200ms, 400ms, 800ms...
const BACKOFF_BASE: u64 = 2;
const BACKOFF_FACTOR: u64 = 100;
const MAX_DELAY: Duration = Duration::from_secs(5);

/// Delivers queued booking confirmations by email and WhatsApp.
///
/// Each channel is retried with exponential backoff. Failures are logged and
/// counted, never reported back to the booking flow. Runs until every sender
/// is dropped.
pub async fn run_notification_worker(
    mut rx: mpsc::Receiver<BookingNotification>,
    gateway: Arc<dyn NotificationGateway>,
) {
    while let Some(notification) = rx.recv().await {
        for channel in [Channel::Email, Channel::WhatsApp] {
            deliver(gateway.as_ref(), &notification, channel).await;
        }
    }

    tracing::info!("Notification queue closed, worker stopping");
}

async fn deliver(
    gateway: &dyn NotificationGateway,
    notification: &BookingNotification,
    channel: Channel,
) {
    let strategy = ExponentialBackoff::from_millis(BACKOFF_BASE)
        .factor(BACKOFF_FACTOR)
        .max_delay(MAX_DELAY)
        .map(jitter)
        .take(MAX_ATTEMPTS - 1);

    let result = Retry::start(strategy, || async {
        let sent = match channel {
            Channel::Email => gateway.send_email(notification).await,
            Channel::WhatsApp => gateway.send_whatsapp(notification).await,
        };
        if let Err(e) = &sent {
            tracing::debug!(
                booking_id = notification.booking_id,
                channel = %channel,
                error = %e,
                "Notification attempt failed"
            );
        }
        sent
    })
    .await;

    match result {
        Ok(()) => {
            metrics::counter!("notifications_sent_total", "channel" => channel.as_str(), "result" => "ok")
                .increment(1);
            tracing::info!(
                booking_id = notification.booking_id,
                reference = %notification.booking_reference,
                channel = %channel,
                "Booking confirmation sent"
            );
        }
        Err(e) => {
            metrics::counter!("notifications_sent_total", "channel" => channel.as_str(), "result" => "failed")
                .increment(1);
            tracing::warn!(
                booking_id = notification.booking_id,
                reference = %notification.booking_reference,
                channel = %channel,
                attempts = MAX_ATTEMPTS,
                error = %e,
                "Giving up on booking confirmation"
            );
        }
    }
}
