//! Handler for public registration.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use validator::Validate;

use crate::api::dto::booking::RegistrationRequestDto;
use crate::application::services::{RegistrationOutcome, RegistrationRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a child for one game slot and starts the online payment.
///
/// # Endpoint
///
/// `POST /api/bookings`
///
/// # Response
///
/// `201 Created` with the pending transaction id, the booking reference the
/// parent will see, and the payment redirect URL:
///
/// ```json
/// {
///   "transaction_id": "TXN_1760780000000_a1B2c3",
///   "booking_reference": "PPT261018042",
///   "payment_url": "https://pay.example.com/redirect/abc",
///   "expires_at": "2026-10-18T10:00:00Z",
///   "quote": { "subtotal": 1800.0, "discount": 0.0, "total": 1800.0, "...": "..." }
/// }
/// ```
///
/// # Errors
///
/// - 400 on invalid contact details, unaccepted terms, or not exactly one slot
/// - 422 if the slot is full, the child is out of its age range, or the promo code is refused
/// - 502 if the booking or payment service fails
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegistrationRequestDto>,
) -> Result<(StatusCode, Json<RegistrationOutcome>), AppError> {
    payload.validate()?;

    let outcome = state
        .booking_service
        .register(RegistrationRequest::from(&payload), Utc::now().date_naive())
        .await?;

    Ok((StatusCode::CREATED, Json(outcome)))
}
