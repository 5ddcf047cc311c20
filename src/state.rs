//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::{
    BookingService, CatalogService, CertificateService, DraftService, QuoteService,
};

#[derive(Clone)]
pub struct AppState {
    pub catalog_service: Arc<CatalogService>,
    pub quote_service: Arc<QuoteService>,
    pub booking_service: Arc<BookingService>,
    pub draft_service: Arc<DraftService>,
    pub certificate_service: Arc<CertificateService>,
}

impl AppState {
    pub fn new(
        catalog_service: Arc<CatalogService>,
        quote_service: Arc<QuoteService>,
        booking_service: Arc<BookingService>,
        draft_service: Arc<DraftService>,
        certificate_service: Arc<CertificateService>,
    ) -> Self {
        Self {
            catalog_service,
            quote_service,
            booking_service,
            draft_service,
            certificate_service,
        }
    }
}
