//! Handlers for cities, events, add-ons and age eligibility.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;

use crate::api::dto::catalog::{EligibilityRequest, PromoCodesParams};
use crate::application::services::EligibilityReport;
use crate::domain::entities::{AddOn, City, Event, PromoCode};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/cities`
pub async fn list_cities_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<City>>, AppError> {
    Ok(Json(state.catalog_service.list_cities().await?))
}

/// `GET /api/cities/{id}/events`
pub async fn city_events_handler(
    State(state): State<AppState>,
    Path(city_id): Path<i64>,
) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(state.catalog_service.events_for_city(city_id).await?))
}

/// `GET /api/add-ons`
pub async fn add_ons_handler(State(state): State<AppState>) -> Result<Json<Vec<AddOn>>, AppError> {
    Ok(Json(state.catalog_service.list_add_ons().await?))
}

/// Lists the slots of an event a child may enter.
///
/// # Endpoint
///
/// `POST /api/events/{id}/eligibility`
///
/// # Request Body
///
/// ```json
/// { "date_of_birth": "2025-03-02" }
/// ```
///
/// # Response
///
/// The child's age in months at the event date, a readable label, and each
/// eligible slot with its unit price and remaining capacity. Full slots are
/// listed with `is_full: true` so the client can show them disabled.
///
/// # Errors
///
/// - 404 if the event does not exist
/// - 502 if the catalog service fails
pub async fn eligibility_handler(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    Json(payload): Json<EligibilityRequest>,
) -> Result<Json<EligibilityReport>, AppError> {
    let today = Utc::now().date_naive();
    let report = state
        .catalog_service
        .eligibility(event_id, payload.date_of_birth, today)
        .await?;
    Ok(Json(report))
}

/// Promo codes currently usable for an event, optionally narrowed to games.
///
/// `GET /api/events/{id}/promo-codes?game_ids=4,5`
pub async fn event_promo_codes_handler(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    Query(params): Query<PromoCodesParams>,
) -> Result<Json<Vec<PromoCode>>, AppError> {
    let codes = state
        .catalog_service
        .promo_codes_for(event_id, &params.game_ids(), Utc::now())
        .await?;
    Ok(Json(codes))
}
