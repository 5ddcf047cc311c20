//! Booking records exchanged with the booking webhook.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::child::{ChildProfile, GuardianProfile};
use crate::domain::table::{CellValue, Column, TableRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    Refunded,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Completed => "Completed",
            BookingStatus::Refunded => "Refunded",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Cash payment")]
    Cash,
    #[serde(rename = "Online")]
    Online,
    #[serde(rename = "PhonePe")]
    PhonePe,
}

impl PaymentMethod {
    /// Wire name, as the booking and payment services expect it.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash payment",
            PaymentMethod::Online => "Online",
            PaymentMethod::PhonePe => "PhonePe",
        }
    }

    /// Cash is collected on the spot by an admin; everything else settles later.
    pub fn initial_payment_status(self) -> PaymentStatus {
        match self {
            PaymentMethod::Cash => PaymentStatus::Completed,
            PaymentMethod::Online | PaymentMethod::PhonePe => PaymentStatus::Pending,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One booked game: which slot, which game, and the price charged for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingGameLine {
    pub game_id: i64,
    pub slot_id: Option<i64>,
    pub game_price: f64,
}

/// One add-on line attached to a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingAddOnLine {
    pub add_on_id: i64,
    pub variant_id: Option<i64>,
    pub quantity: u32,
}

/// A confirmed booking to be created upstream (admin flow).
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub reference: String,
    pub user_id: Option<i64>,
    pub guardian: GuardianProfile,
    pub child: ChildProfile,
    pub event_id: i64,
    pub status: BookingStatus,
    pub total_amount: f64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub games: Vec<BookingGameLine>,
    pub add_ons: Vec<BookingAddOnLine>,
    pub promo_code: Option<String>,
    pub terms_accepted: bool,
}

/// A booking parked upstream until the payment gateway confirms payment
/// (public flow).
#[derive(Debug, Clone, PartialEq)]
pub struct PendingBooking {
    pub user_id: Option<i64>,
    pub guardian: GuardianProfile,
    pub child: ChildProfile,
    pub event_id: i64,
    pub games: Vec<BookingGameLine>,
    pub add_ons: Vec<BookingAddOnLine>,
    pub total_amount: f64,
    pub payment_method: PaymentMethod,
    pub promo_code: Option<String>,
    pub terms_accepted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingBookingReceipt {
    pub transaction_id: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// One row of the admin booking list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingSummary {
    pub id: i64,
    pub reference: String,
    pub parent_name: String,
    pub child_name: String,
    pub event_title: String,
    pub event_date: Option<NaiveDate>,
    pub city: String,
    pub status: String,
    pub payment_status: String,
    pub total_amount: f64,
    pub created_at: Option<DateTime<Utc>>,
}

impl BookingSummary {
    /// Column layout of the admin booking table.
    pub fn columns() -> Vec<Column> {
        vec![
            Column::new("reference", "Booking Ref").priority(1),
            Column::new("parent_name", "Parent").priority(2),
            Column::new("child_name", "Child").priority(4).hide_on_compact(),
            Column::new("event_title", "Event").priority(3).hide_on_compact(),
            Column::new("event_date", "Event Date").hide_on_compact(),
            Column::new("city", "City").hide_on_compact(),
            Column::new("status", "Status"),
            Column::new("payment_status", "Payment").hide_on_compact(),
            Column::new("total_amount", "Amount").priority(5).hide_on_compact(),
            Column::new("created_at", "Created").hide_on_compact(),
            Column::new("id", "ID").hidden(),
        ]
    }
}

impl TableRow for BookingSummary {
    fn row_id(&self) -> String {
        self.id.to_string()
    }

    fn cells(&self) -> Vec<(&'static str, CellValue)> {
        vec![
            ("id", CellValue::Number(self.id as f64)),
            ("reference", CellValue::from(self.reference.as_str())),
            ("parent_name", CellValue::from(self.parent_name.as_str())),
            ("child_name", CellValue::from(self.child_name.as_str())),
            ("event_title", CellValue::from(self.event_title.as_str())),
            ("event_date", CellValue::from(self.event_date)),
            ("city", CellValue::from(self.city.as_str())),
            ("status", CellValue::from(self.status.as_str())),
            ("payment_status", CellValue::from(self.payment_status.as_str())),
            ("total_amount", CellValue::Number(self.total_amount)),
            ("created_at", CellValue::from(self.created_at)),
        ]
    }
}
