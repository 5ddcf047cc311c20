//! Booking creation (public and admin flows) and the admin booking list.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::json;
use tokio::sync::mpsc;

use super::quote_service::{QuoteOutcome, QuoteRequest, QuoteService};
use crate::domain::entities::{
    BookingAddOnLine, BookingGameLine, BookingStatus, BookingSummary, ChildProfile,
    GuardianProfile, NewBooking, PaymentMethod, PendingBooking,
};
use crate::domain::gateways::{BookingGateway, ManualPayment, PaymentGateway, PaymentRequest};
use crate::domain::notification::BookingNotification;
use crate::domain::rules::{
    AddOnLine, BookingReference, LineKind, PriceQuote, generate_transaction_id,
    validate_game_lines,
};
use crate::domain::table::{
    Column, ColumnVisibility, TablePage, TableQuery, TableSelection, Viewport, to_csv,
};
use crate::error::AppError;

const MANUAL_TRANSACTION_PREFIX: &str = "MAN_TXN";

/// Public registration: one child, one game slot, paid online.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationRequest {
    pub user_id: Option<i64>,
    pub guardian: GuardianProfile,
    pub child: ChildProfile,
    pub event_id: i64,
    pub slot_ids: Vec<i64>,
    pub add_ons: Vec<AddOnLine>,
    pub promo_code: Option<String>,
    pub terms_accepted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrationOutcome {
    pub transaction_id: String,
    pub booking_reference: String,
    pub payment_url: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub quote: PriceQuote,
}

/// Booking entered by an admin on behalf of a parent.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminBookingRequest {
    pub guardian: GuardianProfile,
    pub child: ChildProfile,
    pub event_id: i64,
    pub slot_ids: Vec<i64>,
    pub add_ons: Vec<AddOnLine>,
    pub promo_code: Option<String>,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminBookingOutcome {
    pub booking_id: i64,
    pub reference: String,
    pub transaction_id: String,
    pub quote: PriceQuote,
}

/// One page of the admin booking table plus the columns to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingTable {
    pub columns: Vec<Column>,
    pub page: TablePage<BookingSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkStatusFailure {
    pub booking_id: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkStatusOutcome {
    pub status: BookingStatus,
    pub updated: Vec<i64>,
    pub failed: Vec<BulkStatusFailure>,
}

pub struct BookingService {
    quotes: Arc<QuoteService>,
    bookings: Arc<dyn BookingGateway>,
    payments: Arc<dyn PaymentGateway>,
    notifications: mpsc::Sender<BookingNotification>,
}

impl BookingService {
    pub fn new(
        quotes: Arc<QuoteService>,
        bookings: Arc<dyn BookingGateway>,
        payments: Arc<dyn PaymentGateway>,
        notifications: mpsc::Sender<BookingNotification>,
    ) -> Self {
        Self {
            quotes,
            bookings,
            payments,
            notifications,
        }
    }

    /// Public flow: validates and prices the selection, parks a pending
    /// booking upstream and starts the online payment.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] unless exactly one slot is chosen and terms are accepted
    /// - [`AppError::Unprocessable`] for ineligible/full slots or a refused promo code
    /// - [`AppError::Upstream`] if the booking or payment service fails
    pub async fn register(
        &self,
        request: RegistrationRequest,
        today: NaiveDate,
    ) -> Result<RegistrationOutcome, AppError> {
        if !request.terms_accepted {
            return Err(AppError::bad_request(
                "Terms and conditions must be accepted",
                json!({ "field": "terms_accepted" }),
            ));
        }
        if request.slot_ids.len() != 1 {
            return Err(AppError::bad_request(
                "Exactly one game slot must be selected",
                json!({ "selected": request.slot_ids.len() }),
            ));
        }

        let outcome = self
            .quotes
            .quote(
                &QuoteRequest {
                    event_id: request.event_id,
                    slot_ids: request.slot_ids.clone(),
                    add_ons: request.add_ons.clone(),
                    promo_code: request.promo_code.clone(),
                    child_date_of_birth: Some(request.child.date_of_birth),
                },
                today,
            )
            .await?;
        outcome.require_promo_applied()?;

        let games = game_lines(&outcome)?;
        let pending = PendingBooking {
            user_id: request.user_id,
            guardian: request.guardian.clone(),
            child: request.child,
            event_id: outcome.event.id,
            games,
            add_ons: add_on_lines(&outcome),
            total_amount: outcome.quote.total,
            payment_method: PaymentMethod::PhonePe,
            promo_code: applied_promo(&outcome),
            terms_accepted: true,
        };

        let receipt = self.bookings.create_pending(pending).await?;
        let payment_url = self
            .payments
            .initiate(PaymentRequest {
                transaction_id: receipt.transaction_id.clone(),
                user_id: request.user_id,
                amount: outcome.quote.total,
                mobile_number: request.guardian.phone,
            })
            .await?;

        let booking_reference = BookingReference::online(&receipt.transaction_id, today);

        metrics::counter!("bookings_created_total", "flow" => "online").increment(1);
        tracing::info!(
            event_id = outcome.event.id,
            transaction_id = %receipt.transaction_id,
            total = outcome.quote.total,
            "Pending booking created, payment initiated"
        );

        Ok(RegistrationOutcome {
            transaction_id: receipt.transaction_id,
            booking_reference: booking_reference.into_string(),
            payment_url,
            expires_at: receipt.expires_at,
            quote: outcome.quote,
        })
    }

    /// Admin flow: creates a confirmed booking with a `MAN` reference, records
    /// the offline payment and queues confirmation messages.
    ///
    /// A failed payment record or a full notification queue is logged; the
    /// booking itself already exists at that point and is returned.
    pub async fn create_admin_booking(
        &self,
        request: AdminBookingRequest,
        today: NaiveDate,
    ) -> Result<AdminBookingOutcome, AppError> {
        if request.slot_ids.is_empty() {
            return Err(AppError::bad_request(
                "At least one game slot must be selected",
                json!({ "selected": 0 }),
            ));
        }

        let outcome = self
            .quotes
            .quote(
                &QuoteRequest {
                    event_id: request.event_id,
                    slot_ids: request.slot_ids.clone(),
                    add_ons: request.add_ons.clone(),
                    promo_code: request.promo_code.clone(),
                    child_date_of_birth: Some(request.child.date_of_birth),
                },
                today,
            )
            .await?;
        outcome.require_promo_applied()?;

        let now = Utc::now();
        let seed = format!("{}-{}", now.timestamp_millis(), outcome.event.id);
        let reference = BookingReference::manual(&seed, today).into_string();
        let payment_status = request.payment_method.initial_payment_status();

        let booking = NewBooking {
            reference: reference.clone(),
            user_id: None,
            guardian: request.guardian.clone(),
            child: request.child.clone(),
            event_id: outcome.event.id,
            status: BookingStatus::Confirmed,
            total_amount: outcome.quote.total,
            payment_method: request.payment_method,
            payment_status,
            games: game_lines(&outcome)?,
            add_ons: add_on_lines(&outcome),
            promo_code: applied_promo(&outcome),
            terms_accepted: true,
        };

        let booking_id = self.bookings.create_booking(booking).await?;
        metrics::counter!("bookings_created_total", "flow" => "admin").increment(1);
        tracing::info!(booking_id, reference = %reference, "Manual booking created");

        let transaction_id = generate_transaction_id(MANUAL_TRANSACTION_PREFIX);
        let notes = request.notes.clone().or_else(|| {
            Some(match request.payment_method {
                PaymentMethod::Cash => "Manual booking - Cash payment received by admin".to_string(),
                _ => "Manual booking - Online payment pending".to_string(),
            })
        });
        if let Err(e) = self
            .payments
            .record_manual(ManualPayment {
                booking_id,
                transaction_id: transaction_id.clone(),
                amount: outcome.quote.total,
                payment_method: request.payment_method,
                payment_status,
                notes,
            })
            .await
        {
            tracing::warn!(booking_id, error = %e, "Failed to record manual payment");
        }

        self.enqueue_confirmation(BookingNotification {
            booking_id,
            booking_reference: reference.clone(),
            parent_name: request.guardian.full_name,
            parent_email: request.guardian.email,
            parent_phone: request.guardian.phone,
            child_name: request.child.full_name,
            event_title: outcome.event.title.clone(),
            event_date: outcome.event.date,
            event_venue: outcome.event.venue.clone(),
            event_city: outcome.event.city.clone(),
            games: line_labels(&outcome.quote, LineKind::Game),
            add_ons: line_labels(&outcome.quote, LineKind::AddOn),
            total_amount: outcome.quote.total,
            payment_method: request.payment_method.to_string(),
            payment_status: payment_status.to_string(),
        });

        Ok(AdminBookingOutcome {
            booking_id,
            reference,
            transaction_id,
            quote: outcome.quote,
        })
    }

    fn enqueue_confirmation(&self, notification: BookingNotification) {
        let booking_id = notification.booking_id;
        if let Err(e) = self.notifications.try_send(notification) {
            tracing::warn!(booking_id, error = %e, "Notification queue rejected confirmation");
        }
    }

    /// Capacity left in the notification queue.
    pub fn notification_capacity(&self) -> usize {
        self.notifications.capacity()
    }

    /// True once the notification worker has stopped.
    pub fn notifications_closed(&self) -> bool {
        self.notifications.is_closed()
    }

    /// Admin booking table: search, filters, sort and pagination over every booking.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for unknown filter or sort columns.
    pub async fn list_bookings(
        &self,
        query: &TableQuery,
        visibility: &ColumnVisibility,
        viewport: Viewport,
    ) -> Result<BookingTable, AppError> {
        let columns = BookingSummary::columns();
        query.validate(&columns)?;

        let rows = self.bookings.list_bookings().await?;
        let page = query.apply(&rows);
        let columns = visibility
            .visible_columns(&columns, viewport)
            .into_iter()
            .cloned()
            .collect();

        Ok(BookingTable { columns, page })
    }

    /// CSV of every booking matching the query, all pages, visible columns only.
    pub async fn export_bookings(
        &self,
        query: &TableQuery,
        visibility: &ColumnVisibility,
    ) -> Result<String, AppError> {
        let columns = BookingSummary::columns();
        query.validate(&columns)?;

        let rows = self.bookings.list_bookings().await?;
        let matched = query.filter_and_sort(&rows);
        let visible = visibility.visible_columns(&columns, Viewport::Wide);

        to_csv(&visible, &matched)
    }

    /// Sets `status` on every selected booking. Per-booking failures are
    /// collected, not fatal.
    pub async fn bulk_update_status(
        &self,
        selection: &TableSelection,
        status: BookingStatus,
    ) -> Result<BulkStatusOutcome, AppError> {
        if selection.is_empty() {
            return Err(AppError::bad_request(
                "No bookings selected",
                json!({ "booking_ids": [] }),
            ));
        }

        let rows = self.bookings.list_bookings().await?;
        let targets: Vec<i64> = selection.dispatch(&rows, |selected| {
            selected.iter().map(|b| b.id).collect()
        });

        let mut failed: Vec<BulkStatusFailure> = selection
            .unmatched_ids(&rows)
            .into_iter()
            .map(|id| BulkStatusFailure {
                booking_id: id,
                message: "Booking not found".to_string(),
            })
            .collect();

        let mut updated = Vec::with_capacity(targets.len());
        for booking_id in targets {
            match self.bookings.update_status(booking_id, status).await {
                Ok(()) => updated.push(booking_id),
                Err(e) => {
                    tracing::warn!(booking_id, error = %e, "Booking status update failed");
                    failed.push(BulkStatusFailure {
                        booking_id: booking_id.to_string(),
                        message: e.to_error_info().message,
                    });
                }
            }
        }

        tracing::info!(
            status = %status,
            updated = updated.len(),
            failed = failed.len(),
            "Bulk booking status update"
        );

        Ok(BulkStatusOutcome {
            status,
            updated,
            failed,
        })
    }
}

fn game_lines(outcome: &QuoteOutcome) -> Result<Vec<BookingGameLine>, AppError> {
    let game_ids: Vec<i64> = outcome.selection.games().iter().map(|g| g.game_id).collect();
    let slot_ids = outcome.selection.slot_ids();
    let prices: Vec<Option<f64>> = outcome.quote.game_prices().into_iter().map(Some).collect();

    let validation =
        validate_game_lines(&game_ids, &prices, outcome.quote.games_total, Some(&slot_ids));
    if !validation.is_valid {
        return Err(AppError::bad_request(
            "No valid games selected",
            json!({ "errors": validation.errors }),
        ));
    }
    Ok(validation.lines)
}

fn add_on_lines(outcome: &QuoteOutcome) -> Vec<BookingAddOnLine> {
    outcome
        .selection
        .add_ons()
        .iter()
        .copied()
        .map(BookingAddOnLine::from)
        .collect()
}

fn applied_promo(outcome: &QuoteOutcome) -> Option<String> {
    outcome
        .promo
        .as_ref()
        .filter(|p| p.applied)
        .map(|p| p.code.clone())
}

fn line_labels(quote: &PriceQuote, kind: LineKind) -> Vec<String> {
    quote
        .lines
        .iter()
        .filter(|l| l.kind == kind)
        .map(|l| match kind {
            LineKind::Game => l.label.clone(),
            LineKind::AddOn => format!("{} x{}", l.label, l.quantity),
        })
        .collect()
}
