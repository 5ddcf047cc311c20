//! Application layer services implementing the booking workflows.
//!
//! Services coordinate the gateway and storage traits with the pure rules in
//! [`crate::domain::rules`] and give HTTP handlers a narrow API.
//!
//! # Available Services
//!
//! - [`services::CatalogService`] - Cities, events, add-ons and age eligibility
//! - [`services::QuoteService`] - Selection validation, pricing and promo application
//! - [`services::BookingService`] - Public registration, admin bookings and the booking table
//! - [`services::DraftService`] - Resumable registration drafts

pub mod services;
