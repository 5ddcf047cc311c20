//! Handlers for pricing and promo code preview.

use axum::{Json, extract::State};
use chrono::Utc;
use validator::Validate;

use crate::api::dto::quote::{
    PromoValidateRequest, PromoValidateResponse, QuoteRequestDto, QuoteResponse,
};
use crate::application::services::QuoteRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Prices a selection of game slots and add-ons.
///
/// # Endpoint
///
/// `POST /api/quote`
///
/// # Request Body
///
/// ```json
/// {
///   "event_id": 7,
///   "slot_ids": [31],
///   "add_ons": [{ "add_on_id": 3, "variant_id": 9, "quantity": 2 }],
///   "promo_code": "WELCOME10",
///   "child_date_of_birth": "2025-03-02"
/// }
/// ```
///
/// A promo code that does not apply is reported under `promo` with
/// `applied: false`; the quote is then undiscounted.
///
/// # Errors
///
/// - 400 for unknown slots or add-ons, or two slots of the same game
/// - 404 if the event does not exist
/// - 422 for full slots or slots outside the child's age range
/// - 502 if an upstream service fails
pub async fn quote_handler(
    State(state): State<AppState>,
    Json(payload): Json<QuoteRequestDto>,
) -> Result<Json<QuoteResponse>, AppError> {
    payload.validate()?;

    let request = QuoteRequest::from(&payload);
    let outcome = state
        .quote_service
        .quote(&request, Utc::now().date_naive())
        .await?;

    Ok(Json(QuoteResponse::from(outcome)))
}

/// `POST /api/promo-codes/validate`
///
/// Previews a promo code against a subtotal without creating anything.
pub async fn validate_promo_handler(
    State(state): State<AppState>,
    Json(payload): Json<PromoValidateRequest>,
) -> Result<Json<PromoValidateResponse>, AppError> {
    payload.validate()?;

    let validation = state
        .quote_service
        .validate_promo(
            payload.code.trim(),
            payload.event_id,
            payload.game_ids,
            payload.subtotal,
        )
        .await?;

    Ok(Json(PromoValidateResponse::from(validation)))
}
