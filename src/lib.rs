//! # Event Booking
//!
//! Booking rules service for children's events, built with Axum.
//!
//! The service owns the rules (age eligibility, one slot per game, pricing
//! with add-ons, bundle and promo discounts, booking references) and
//! delegates all durable state to webhook services.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, pure booking rules, the data table, gateway traits
//! - **Application Layer** ([`application`]) - Services orchestrating rules and gateways
//! - **Infrastructure Layer** ([`infrastructure`]) - Webhook gateways and draft stores
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Age-in-months eligibility against each game slot's bounds
//! - Quotes with add-on variants, bundle discounts and server-validated promo codes
//! - Public registration with online payment, admin bookings with `MAN` references
//! - Searchable, sortable, paginated admin booking and certificate tables with CSV export
//! - Resumable registration drafts (Redis or in-memory)
//! - Background email/WhatsApp confirmations with retry
//!
//! ## Quick Start
//!
//! ```bash
//! export BOOKING_API_BASE_URL="https://api.example.com/webhook/v1"
//! export REDIS_URL="redis://localhost:6379"  # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        BookingService, CatalogService, CertificateService, DraftService, QuoteService,
    };
    pub use crate::domain::entities::{
        AddOn, BookingSummary, CertificateListItem, City, Event, GameSlot, PromoCode,
    };
    pub use crate::domain::rules::{PriceQuote, SelectionSet};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
