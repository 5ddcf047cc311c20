//! Business logic services for the application layer.

pub mod booking_service;
pub mod catalog_service;
pub mod certificate_service;
pub mod draft_service;
pub mod quote_service;

pub use booking_service::{
    AdminBookingOutcome, AdminBookingRequest, BookingService, BookingTable, BulkStatusFailure,
    BulkStatusOutcome, RegistrationOutcome, RegistrationRequest,
};
pub use catalog_service::{CatalogService, EligibilityReport, EligibleSlot};
pub use certificate_service::{CertificateService, CertificateTable};
pub use draft_service::DraftService;
pub use quote_service::{PromoOutcome, QuoteOutcome, QuoteRequest, QuoteService};
