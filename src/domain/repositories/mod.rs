//! Storage traits owned by this service.
//!
//! Bookings and the catalog live in external services (see
//! [`crate::domain::gateways`]); the only state kept here is registration
//! drafts.
//!
//! - [`DraftStore`] - resumable registration drafts

pub mod draft_store;

pub use draft_store::{DraftStore, DraftStoreError, DraftStoreResult};

#[cfg(test)]
pub use draft_store::MockDraftStore;
