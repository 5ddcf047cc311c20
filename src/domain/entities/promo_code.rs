//! Promo code entity and the result of an external validation call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

/// A discount code as listed by the promo service.
///
/// The discount amount for a booking is never computed locally; it comes back
/// from [`crate::domain::gateways::PromoGateway::validate_preview`]. The fields
/// here are used to pre-filter which codes to offer for an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromoCode {
    pub id: i64,
    pub code: String,
    pub discount_type: DiscountType,
    pub value: f64,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_to: DateTime<Utc>,
    pub is_active: bool,
    pub minimum_purchase: f64,
    pub maximum_discount: Option<f64>,
    /// Events the code is restricted to; empty means any event.
    pub event_ids: Vec<i64>,
    /// Games the code is restricted to; empty means any game.
    pub game_ids: Vec<i64>,
    pub usage_limit: Option<u32>,
    pub usage_count: u32,
}

impl PromoCode {
    /// Whether the code can be offered at `now`.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        if !self.is_active || self.valid_to < now {
            return false;
        }
        if self.valid_from.is_some_and(|from| from > now) {
            return false;
        }
        !self
            .usage_limit
            .is_some_and(|limit| self.usage_count >= limit)
    }

    /// Whether the code is scoped to the given event and at least one of the games.
    pub fn applies_to(&self, event_id: i64, game_ids: &[i64]) -> bool {
        let event_ok = self.event_ids.is_empty() || self.event_ids.contains(&event_id);
        let games_ok =
            self.game_ids.is_empty() || game_ids.iter().any(|g| self.game_ids.contains(g));
        event_ok && games_ok
    }
}

/// Outcome of a promo preview validation by the promo service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromoValidation {
    pub is_valid: bool,
    pub discount_amount: f64,
    pub message: Option<String>,
}

impl PromoValidation {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            discount_amount: 0.0,
            message: Some(message.into()),
        }
    }

    /// A validation is only worth applying if it is valid and discounts something.
    pub fn is_applicable(&self) -> bool {
        self.is_valid && self.discount_amount > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn promo(now: DateTime<Utc>) -> PromoCode {
        PromoCode {
            id: 1,
            code: "WELCOME10".to_string(),
            discount_type: DiscountType::Percentage,
            value: 10.0,
            valid_from: Some(now - Duration::days(10)),
            valid_to: now + Duration::days(10),
            is_active: true,
            minimum_purchase: 0.0,
            maximum_discount: None,
            event_ids: vec![],
            game_ids: vec![],
            usage_limit: None,
            usage_count: 0,
        }
    }

    #[test]
    fn test_usable_window() {
        let now = Utc::now();
        assert!(promo(now).is_usable_at(now));

        let mut expired = promo(now);
        expired.valid_to = now - Duration::seconds(1);
        assert!(!expired.is_usable_at(now));

        let mut not_started = promo(now);
        not_started.valid_from = Some(now + Duration::days(1));
        assert!(!not_started.is_usable_at(now));
    }

    #[test]
    fn test_inactive_and_exhausted() {
        let now = Utc::now();
        let mut inactive = promo(now);
        inactive.is_active = false;
        assert!(!inactive.is_usable_at(now));

        let mut exhausted = promo(now);
        exhausted.usage_limit = Some(5);
        exhausted.usage_count = 5;
        assert!(!exhausted.is_usable_at(now));
    }

    #[test]
    fn test_scope() {
        let now = Utc::now();
        let mut scoped = promo(now);
        assert!(scoped.applies_to(1, &[5]));

        scoped.event_ids = vec![2];
        scoped.game_ids = vec![5, 6];
        assert!(scoped.applies_to(2, &[6]));
        assert!(!scoped.applies_to(1, &[6]));
        assert!(!scoped.applies_to(2, &[7]));
    }

    #[test]
    fn test_validation_applicability() {
        assert!(!PromoValidation::rejected("Expired").is_applicable());
        let zero = PromoValidation {
            is_valid: true,
            discount_amount: 0.0,
            message: None,
        };
        assert!(!zero.is_applicable());
    }
}
