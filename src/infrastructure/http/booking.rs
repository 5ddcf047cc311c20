//! Booking webhooks: pending (pay-first) bookings, confirmed admin bookings,
//! the booking list and status updates.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use super::client::WebhookClient;
use super::coerce;
use super::error::GatewayError;
use crate::domain::entities::{
    BookingAddOnLine, BookingStatus, BookingSummary, NewBooking, PendingBooking,
    PendingBookingReceipt,
};
use crate::domain::gateways::BookingGateway;
use crate::error::AppError;

pub struct HttpBookingGateway {
    client: WebhookClient,
}

impl HttpBookingGateway {
    pub fn new(client: WebhookClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PendingPayload<'a> {
    user_id: Option<i64>,
    parent_name: &'a str,
    email: &'a str,
    phone: &'a str,
    child_name: &'a str,
    child_dob: String,
    school_name: &'a str,
    gender: String,
    event_id: i64,
    game_id: Vec<i64>,
    slot_id: Vec<Option<i64>>,
    game_price: Vec<f64>,
    total_amount: f64,
    payment_method: &'a str,
    terms_accepted: bool,
    add_ons: Vec<PendingAddOn>,
    promo_code: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PendingAddOn {
    add_on_id: i64,
    quantity: u32,
    variant_id: Option<String>,
}

impl<'a> From<&'a PendingBooking> for PendingPayload<'a> {
    fn from(b: &'a PendingBooking) -> Self {
        Self {
            user_id: b.user_id,
            parent_name: &b.guardian.full_name,
            email: &b.guardian.email,
            phone: &b.guardian.phone,
            child_name: &b.child.full_name,
            child_dob: b.child.date_of_birth.format("%Y-%m-%d").to_string(),
            school_name: b.child.school_or_default(),
            gender: b.child.gender.to_string(),
            event_id: b.event_id,
            game_id: b.games.iter().map(|g| g.game_id).collect(),
            slot_id: b.games.iter().map(|g| g.slot_id).collect(),
            game_price: b.games.iter().map(|g| g.game_price).collect(),
            total_amount: b.total_amount,
            payment_method: b.payment_method.as_str(),
            terms_accepted: b.terms_accepted,
            add_ons: b
                .add_ons
                .iter()
                .map(|a| PendingAddOn {
                    add_on_id: a.add_on_id,
                    quantity: a.quantity,
                    variant_id: a.variant_id.map(|v| v.to_string()),
                })
                .collect(),
            promo_code: b.promo_code.as_deref(),
        }
    }
}

/// Body of the confirmed-booking webhook.
fn new_booking_payload(b: &NewBooking) -> Value {
    json!({
        "parent": {
            "user_id": b.user_id,
            "parent_name": b.guardian.full_name,
            "email": b.guardian.email,
            "additional_phone": b.guardian.phone,
        },
        "child": {
            "full_name": b.child.full_name,
            "date_of_birth": b.child.date_of_birth.format("%Y-%m-%d").to_string(),
            "school_name": b.child.school_or_default(),
            "gender": b.child.gender.to_string(),
        },
        "booking": {
            "booking_ref": b.reference,
            "event_id": b.event_id,
            "user_id": b.user_id,
            "status": b.status.to_string(),
            "total_amount": b.total_amount,
            "payment_method": b.payment_method.as_str(),
            "payment_status": b.payment_status.to_string(),
            "terms_accepted": b.terms_accepted,
            "promo_code": b.promo_code,
        },
        "booking_games": b.games.iter().map(|g| json!({
            "game_id": g.game_id,
            "slot_id": g.slot_id,
            "game_price": g.game_price,
        })).collect::<Vec<_>>(),
        "booking_addons": group_add_ons(&b.add_ons),
    })
}

/// Lines of the same add-on travel together, with their variants nested.
fn group_add_ons(lines: &[BookingAddOnLine]) -> Vec<Value> {
    let mut grouped: BTreeMap<i64, Vec<&BookingAddOnLine>> = BTreeMap::new();
    for line in lines {
        grouped.entry(line.add_on_id).or_default().push(line);
    }

    grouped
        .into_iter()
        .map(|(add_on_id, lines)| {
            let variants: Vec<Value> = lines
                .iter()
                .filter_map(|l| {
                    l.variant_id
                        .map(|v| json!({ "variant_id": v, "quantity": l.quantity }))
                })
                .collect();

            if variants.is_empty() {
                let quantity: u32 = lines.iter().map(|l| l.quantity).sum();
                json!({ "addon_id": add_on_id, "quantity": quantity })
            } else {
                json!({ "addon_id": add_on_id, "variants": variants })
            }
        })
        .collect()
}

fn parse_summary(v: &Value) -> Option<BookingSummary> {
    Some(BookingSummary {
        id: coerce::integer(v, &["booking_id", "id"])?,
        reference: coerce::text(v, &["booking_ref", "reference"]).unwrap_or_default(),
        parent_name: coerce::text(v, &["parent_name"]).unwrap_or_default(),
        child_name: coerce::text(v, &["child_full_name", "child_name"]).unwrap_or_default(),
        event_title: coerce::text(v, &["event_title"]).unwrap_or_default(),
        event_date: coerce::date(v, &["event_event_date", "event_date"]),
        city: coerce::text(v, &["city_name", "city"]).unwrap_or_default(),
        status: coerce::text(v, &["booking_status", "status"]).unwrap_or_default(),
        payment_status: coerce::text(v, &["payment_status"]).unwrap_or_default(),
        total_amount: coerce::number(v, &["total_amount"]).unwrap_or(0.0),
        created_at: coerce::datetime(v, &["booking_created_at", "created_at"]),
    })
}

#[async_trait]
impl BookingGateway for HttpBookingGateway {
    async fn create_pending(
        &self,
        booking: PendingBooking,
    ) -> Result<PendingBookingReceipt, AppError> {
        let payload = PendingPayload::from(&booking);
        let body = self
            .client
            .post_json("pending-bookings/create", &payload)
            .await?;
        let record = coerce::first(body).unwrap_or(Value::Null);

        let transaction_id = coerce::text(&record, &["transactionId", "transaction_id"])
            .ok_or_else(|| GatewayError::decode("pending booking response has no transactionId"))?;

        info!(%transaction_id, event_id = booking.event_id, "Pending booking created");
        Ok(PendingBookingReceipt {
            transaction_id,
            expires_at: coerce::datetime(&record, &["expiresAt", "expires_at"]),
        })
    }

    async fn create_booking(&self, booking: NewBooking) -> Result<i64, AppError> {
        let body = self
            .client
            .post_json("bookingsevents/create", &new_booking_payload(&booking))
            .await?;

        let booking_id = coerce::first(body)
            .and_then(|record| coerce::integer(&record, &["booking_id", "id"]))
            .ok_or_else(|| GatewayError::decode("booking response has no booking_id"))?;

        info!(booking_id, reference = %booking.reference, "Booking created");
        Ok(booking_id)
    }

    async fn list_bookings(&self) -> Result<Vec<BookingSummary>, AppError> {
        let body = self.client.get_json("bookingsevents/get-all").await?;
        let items = coerce::list(body);
        let total = items.len();
        let rows: Vec<BookingSummary> = items.iter().filter_map(parse_summary).collect();
        if rows.len() < total {
            warn!(skipped = total - rows.len(), "Dropped booking rows without an id");
        }
        Ok(rows)
    }

    async fn update_status(&self, booking_id: i64, status: BookingStatus) -> Result<(), AppError> {
        match self
            .client
            .post_json(
                "bookingsevents/update-status",
                &json!({ "booking_id": booking_id, "status": status.to_string() }),
            )
            .await
        {
            Ok(_) => Ok(()),
            Err(GatewayError::Status { status, .. }) if status.as_u16() == 404 => Err(
                AppError::not_found("Booking not found", json!({ "booking_id": booking_id })),
            ),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        BookingGameLine, ChildProfile, Gender, GuardianProfile, PaymentMethod, PaymentStatus,
    };
    use chrono::NaiveDate;

    fn guardian() -> GuardianProfile {
        GuardianProfile {
            full_name: "Ravi Kumar".to_string(),
            email: "ravi@example.com".to_string(),
            phone: "9876543210".to_string(),
        }
    }

    fn child() -> ChildProfile {
        ChildProfile {
            full_name: "Asha".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
            gender: Gender::Female,
            school_name: None,
        }
    }

    #[test]
    fn test_pending_payload_field_names() {
        let booking = PendingBooking {
            user_id: Some(5),
            guardian: guardian(),
            child: child(),
            event_id: 7,
            games: vec![BookingGameLine {
                game_id: 4,
                slot_id: Some(31),
                game_price: 1800.0,
            }],
            add_ons: vec![BookingAddOnLine {
                add_on_id: 3,
                variant_id: Some(9),
                quantity: 2,
            }],
            total_amount: 2400.0,
            payment_method: PaymentMethod::PhonePe,
            promo_code: None,
            terms_accepted: true,
        };

        let value = serde_json::to_value(PendingPayload::from(&booking)).unwrap();
        assert_eq!(value["childDob"], "2025-03-02");
        assert_eq!(value["schoolName"], "Not Specified");
        assert_eq!(value["gameId"], json!([4]));
        assert_eq!(value["paymentMethod"], "PhonePe");
        assert_eq!(value["addOns"][0]["variantId"], "9");
    }

    #[test]
    fn test_new_booking_payload_groups_variants() {
        let booking = NewBooking {
            reference: "MAN261018336".to_string(),
            user_id: None,
            guardian: guardian(),
            child: child(),
            event_id: 7,
            status: BookingStatus::Confirmed,
            total_amount: 2400.0,
            payment_method: PaymentMethod::Cash,
            payment_status: PaymentStatus::Completed,
            games: vec![],
            add_ons: vec![
                BookingAddOnLine { add_on_id: 3, variant_id: Some(9), quantity: 2 },
                BookingAddOnLine { add_on_id: 3, variant_id: Some(10), quantity: 1 },
                BookingAddOnLine { add_on_id: 5, variant_id: None, quantity: 4 },
            ],
            promo_code: None,
            terms_accepted: true,
        };

        let value = new_booking_payload(&booking);
        assert_eq!(value["booking"]["booking_ref"], "MAN261018336");
        assert_eq!(value["booking"]["payment_method"], "Cash payment");
        assert_eq!(value["booking"]["payment_status"], "completed");

        let add_ons = value["booking_addons"].as_array().unwrap();
        assert_eq!(add_ons.len(), 2);
        assert_eq!(add_ons[0]["variants"].as_array().unwrap().len(), 2);
        assert_eq!(add_ons[1]["quantity"], 4);
    }

    #[test]
    fn test_parse_summary_row() {
        let row = parse_summary(&json!({
            "booking_id": "12",
            "booking_ref": "PPT261018123",
            "parent_name": "Ravi",
            "child_full_name": "Asha",
            "event_title": "Baby Olympics",
            "event_event_date": "2026-11-23",
            "city_name": "Hyderabad",
            "booking_status": "Confirmed",
            "payment_status": "completed",
            "total_amount": "1924.00",
            "booking_created_at": "2026-10-18T09:30:00Z"
        }))
        .unwrap();

        assert_eq!(row.id, 12);
        assert_eq!(row.total_amount, 1924.0);
        assert!(row.created_at.is_some());
        assert!(parse_summary(&json!({ "booking_ref": "X" })).is_none());
    }
}
