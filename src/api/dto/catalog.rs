//! DTOs for catalog and eligibility endpoints.

use chrono::NaiveDate;
use serde::Deserialize;

/// Body of `POST /api/events/{id}/eligibility`.
#[derive(Debug, Deserialize)]
pub struct EligibilityRequest {
    pub date_of_birth: NaiveDate,
}

/// Query of `GET /api/events/{id}/promo-codes`.
#[derive(Debug, Default, Deserialize)]
pub struct PromoCodesParams {
    /// Comma-separated game ids, e.g. `4,5`.
    #[serde(default)]
    pub game_ids: Option<String>,
}

impl PromoCodesParams {
    /// Parsed game ids; blanks and non-numbers are ignored.
    pub fn game_ids(&self) -> Vec<i64> {
        self.game_ids
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect()
    }
}
