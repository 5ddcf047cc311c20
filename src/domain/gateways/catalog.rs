//! Read access to the event catalog.

use crate::domain::entities::{AddOn, City, Event, PromoCode};
use crate::error::AppError;
use async_trait::async_trait;

/// Catalog of cities, events, add-ons and promo codes.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpCatalogGateway`] - booking webhook client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    async fn list_cities(&self) -> Result<Vec<City>, AppError>;

    /// Events held in a city, each with its slots.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] when the catalog service fails.
    async fn events_for_city(&self, city_id: i64) -> Result<Vec<Event>, AppError>;

    /// Finds an event with its slots.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Event))` if found
    /// - `Ok(None)` if the catalog does not know the event
    async fn get_event(&self, event_id: i64) -> Result<Option<Event>, AppError>;

    async fn list_add_ons(&self) -> Result<Vec<AddOn>, AppError>;

    /// Every promo code, usable or not. Filtering happens in the rules layer.
    async fn list_promo_codes(&self) -> Result<Vec<PromoCode>, AppError>;
}
