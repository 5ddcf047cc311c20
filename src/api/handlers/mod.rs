//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod admin;
pub mod bookings;
pub mod catalog;
pub mod certificates;
pub mod drafts;
pub mod health;
pub mod quote;

pub use admin::{
    admin_bookings_handler, bulk_status_handler, create_admin_booking_handler,
    export_bookings_handler,
};
pub use bookings::register_handler;
pub use catalog::{
    add_ons_handler, city_events_handler, eligibility_handler, event_promo_codes_handler,
    list_cities_handler,
};
pub use certificates::{admin_certificates_handler, export_certificates_handler};
pub use drafts::{create_draft_handler, delete_draft_handler, get_draft_handler, update_draft_handler};
pub use health::health_handler;
pub use quote::{quote_handler, validate_promo_handler};
