//! API route configuration.
//!
//! Authentication is handled upstream of this service; admin routes only
//! get a stricter rate limit.

use crate::api::handlers::{
    add_ons_handler, admin_bookings_handler, admin_certificates_handler, bulk_status_handler,
    city_events_handler, create_admin_booking_handler, create_draft_handler,
    delete_draft_handler, eligibility_handler, event_promo_codes_handler,
    export_bookings_handler, export_certificates_handler, get_draft_handler,
    list_cities_handler, quote_handler, register_handler, update_draft_handler,
    validate_promo_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public booking routes, nested under `/api`.
///
/// # Endpoints
///
/// - `GET    /cities`                    - Active cities
/// - `GET    /cities/{id}/events`        - Events of a city with their game slots
/// - `GET    /add-ons`                   - Add-ons with variants and bundle discounts
/// - `POST   /events/{id}/eligibility`   - Slots open to a child of a given birth date
/// - `GET    /events/{id}/promo-codes`   - Promo codes usable for an event
/// - `POST   /quote`                     - Price a selection
/// - `POST   /promo-codes/validate`      - Preview a promo code
/// - `POST   /bookings`                  - Register and start payment
/// - `POST   /drafts`                    - Save a new draft
/// - `GET|PUT|DELETE /drafts/{token}`    - Resume, update or discard a draft
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/cities", get(list_cities_handler))
        .route("/cities/{id}/events", get(city_events_handler))
        .route("/add-ons", get(add_ons_handler))
        .route("/events/{id}/eligibility", post(eligibility_handler))
        .route("/events/{id}/promo-codes", get(event_promo_codes_handler))
        .route("/quote", post(quote_handler))
        .route("/promo-codes/validate", post(validate_promo_handler))
        .route("/bookings", post(register_handler))
        .route("/drafts", post(create_draft_handler))
        .route(
            "/drafts/{token}",
            get(get_draft_handler)
                .put(update_draft_handler)
                .delete(delete_draft_handler),
        )
}

/// Admin routes, nested under `/admin`.
///
/// # Endpoints
///
/// - `GET    /bookings`          - Booking table
/// - `POST   /bookings`          - Manual booking
/// - `GET    /bookings/export`   - CSV export of the booking table
/// - `POST   /bookings/status`   - Bulk status update
/// - `GET    /certificates`      - Certificate table
/// - `GET    /certificates/export` - CSV export of the certificate table
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/bookings",
            get(admin_bookings_handler).post(create_admin_booking_handler),
        )
        .route("/bookings/export", get(export_bookings_handler))
        .route("/bookings/status", post(bulk_status_handler))
        .route("/certificates", get(admin_certificates_handler))
        .route("/certificates/export", get(export_certificates_handler))
}
