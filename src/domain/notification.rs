//! Booking confirmation message queued for delivery.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Everything the notification service needs to confirm a booking.
///
/// Sent from booking handlers to the background worker
/// ([`crate::domain::notification_worker::run_notification_worker`]) so the
/// HTTP response never waits on email or WhatsApp delivery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingNotification {
    pub booking_id: i64,
    pub booking_reference: String,
    pub parent_name: String,
    pub parent_email: String,
    pub parent_phone: String,
    pub child_name: String,
    pub event_title: String,
    pub event_date: NaiveDate,
    pub event_venue: String,
    pub event_city: String,
    pub games: Vec<String>,
    pub add_ons: Vec<String>,
    pub total_amount: f64,
    pub payment_method: String,
    pub payment_status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Email,
    WhatsApp,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::WhatsApp => "whatsapp",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
