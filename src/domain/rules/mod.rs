//! Booking rules: age, eligibility, selection, pricing and reference formats.
//!
//! Everything here is pure and synchronous.

pub mod age;
pub mod eligibility;
pub mod game_lines;
pub mod pricing;
pub mod reference;
pub mod selection;

pub use age::{age_in_months, format_age, reference_date};
pub use eligibility::{AgeBoundUnit, eligible_slots, is_eligible};
pub use game_lines::{GameLineValidation, validate_game_lines};
pub use pricing::{LineKind, PriceQuote, QuoteLine, add_on_unit_price, quote, round2};
pub use reference::{
    BookingReference, generate_transaction_id, is_manual_booking, is_valid_manual_reference,
};
pub use selection::{AddOnLine, SelectionSet, SlotChange, SlotSelection};

use chrono::{DateTime, Utc};

use crate::domain::entities::PromoCode;

/// Promo codes that can be offered for an event and a set of games at `now`.
pub fn applicable_promo_codes(
    codes: &[PromoCode],
    event_id: i64,
    game_ids: &[i64],
    now: DateTime<Utc>,
) -> Vec<PromoCode> {
    codes
        .iter()
        .filter(|c| c.is_usable_at(now) && c.applies_to(event_id, game_ids))
        .cloned()
        .collect()
}
