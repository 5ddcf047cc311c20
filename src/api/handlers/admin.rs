//! Handlers for admin booking creation and the booking table.

use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;
use validator::Validate;

use crate::api::dto::admin::{AdminBookingRequestDto, BookingTableResponse, BulkStatusRequest};
use crate::api::dto::pagination::TableParams;
use crate::application::services::{AdminBookingOutcome, AdminBookingRequest, BulkStatusOutcome};
use crate::domain::entities::BookingSummary;
use crate::domain::table::TableSelection;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a confirmed booking on behalf of a parent.
///
/// # Endpoint
///
/// `POST /admin/bookings`
///
/// # Request Body
///
/// ```json
/// {
///   "parent": { "full_name": "Ravi Kumar", "email": "ravi@example.com", "phone": "9876543210" },
///   "child": { "full_name": "Asha", "date_of_birth": "2025-03-02", "gender": "female" },
///   "event_id": 7,
///   "slot_ids": [31, 45],
///   "payment_method": "Cash payment",
///   "notes": "Paid at the venue desk"
/// }
/// ```
///
/// # Response
///
/// `201 Created` with the booking id, its `MAN` reference, the manual
/// payment transaction id and the applied quote. Confirmation email and
/// WhatsApp messages are sent in the background.
pub async fn create_admin_booking_handler(
    State(state): State<AppState>,
    Json(payload): Json<AdminBookingRequestDto>,
) -> Result<(StatusCode, Json<AdminBookingOutcome>), AppError> {
    payload.validate()?;

    let outcome = state
        .booking_service
        .create_admin_booking(AdminBookingRequest::from(&payload), Utc::now().date_naive())
        .await?;

    Ok((StatusCode::CREATED, Json(outcome)))
}

/// Searchable, sortable, paginated booking list.
///
/// # Endpoint
///
/// `GET /admin/bookings`
///
/// # Query Parameters
///
/// - `search` (optional): Case-insensitive match on any column
/// - `filter.<column>` (optional): Case-insensitive match on one column
/// - `sort`, `order` (optional): Column key and `asc` / `desc`
/// - `page`, `page_size` (optional): Default 1 and 10, max page size 100
/// - `hidden` (optional): Comma-separated columns to leave out
/// - `viewport` (optional): `wide` (default) or `compact`
///
/// # Response
///
/// ```json
/// {
///   "columns": [{ "key": "reference", "label": "Booking Ref", "...": "..." }],
///   "pagination": { "page": 1, "page_size": 10, "total_pages": 3, "total_items": 27 },
///   "items": [{ "id": 12, "reference": "MAN261018336", "...": "..." }]
/// }
/// ```
pub async fn admin_bookings_handler(
    State(state): State<AppState>,
    Query(params): Query<TableParams>,
) -> Result<Json<BookingTableResponse>, AppError> {
    let query = params.to_query()?;
    let visibility = params.visibility(&BookingSummary::columns())?;

    let table = state
        .booking_service
        .list_bookings(&query, &visibility, params.viewport())
        .await?;

    Ok(Json(BookingTableResponse::from(table)))
}

/// `GET /admin/bookings/export`
///
/// Same query parameters as the list, minus pagination: every matching row
/// is exported as CSV with the visible columns.
pub async fn export_bookings_handler(
    State(state): State<AppState>,
    Query(params): Query<TableParams>,
) -> Result<impl IntoResponse, AppError> {
    let query = params.to_query()?;
    let visibility = params.visibility(&BookingSummary::columns())?;

    let csv = state
        .booking_service
        .export_bookings(&query, &visibility)
        .await?;

    let filename = format!("bookings-{}.csv", Utc::now().format("%Y%m%d"));
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    ))
}

/// `POST /admin/bookings/status`
///
/// Applies one status to every selected booking. Ids that do not exist, or
/// whose update fails upstream, are listed under `failed`.
pub async fn bulk_status_handler(
    State(state): State<AppState>,
    Json(payload): Json<BulkStatusRequest>,
) -> Result<Json<BulkStatusOutcome>, AppError> {
    payload.validate()?;

    let selection = TableSelection::from_ids(payload.booking_ids.iter().map(i64::to_string));
    let outcome = state
        .booking_service
        .bulk_update_status(&selection, payload.status)
        .await?;

    Ok(Json(outcome))
}
