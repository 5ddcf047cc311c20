use crate::domain::entities::PromoValidation;
use crate::error::AppError;
use async_trait::async_trait;

/// Authoritative promo code validation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PromoGateway: Send + Sync {
    /// Asks the promo service what `code` is worth for this event, games and subtotal.
    ///
    /// A refused code is `Ok` with `is_valid == false`; `Err` means the service failed.
    async fn validate_preview(
        &self,
        code: &str,
        event_id: i64,
        game_ids: Vec<i64>,
        subtotal: f64,
    ) -> Result<PromoValidation, AppError>;
}
