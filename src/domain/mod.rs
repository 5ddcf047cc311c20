//! Domain layer: booking entities, rules and the contracts of external services.
//!
//! # Architecture
//!
//! - [`entities`] - Catalog, child and booking data structures
//! - [`rules`] - Age, eligibility, selection, pricing and reference rules
//! - [`table`] - Generic searchable, sortable, paginated data table
//! - [`draft`] - Resumable registration drafts
//! - [`gateways`] - Traits for the external webhook services
//! - [`repositories`] - Traits for locally owned storage
//! - [`notification`] / [`notification_worker`] - Asynchronous booking confirmations
//!
//! The domain layer has no dependency on HTTP clients or storage backends;
//! implementations live in [`crate::infrastructure`].
//!
//! # Notification Flow
//!
//! 1. A booking is created by [`crate::application::services::BookingService`]
//! 2. A [`notification::BookingNotification`] is pushed on a bounded channel
//! 3. [`notification_worker::run_notification_worker`] sends email and WhatsApp with retries

pub mod draft;
pub mod entities;
pub mod gateways;
pub mod notification;
pub mod notification_worker;
pub mod repositories;
pub mod rules;
pub mod table;
