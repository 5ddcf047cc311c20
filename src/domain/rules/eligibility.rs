//! Age-based slot eligibility.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::entities::GameSlot;

/// How slot age bounds are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeBoundUnit {
    /// Bounds are months.
    #[default]
    Months,
    /// Bounds are months, but a slot also matches if the bounds read as years do.
    ///
    /// Some upstream catalogs store years in the months fields.
    Lenient,
}

impl FromStr for AgeBoundUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "months" => Ok(AgeBoundUnit::Months),
            "lenient" => Ok(AgeBoundUnit::Lenient),
            other => Err(format!("unknown age bound unit '{}'", other)),
        }
    }
}

impl fmt::Display for AgeBoundUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeBoundUnit::Months => f.write_str("months"),
            AgeBoundUnit::Lenient => f.write_str("lenient"),
        }
    }
}

/// Whether a child aged `age_months` may book `slot`.
///
/// Missing bounds are open. Negative ages are never eligible.
pub fn is_eligible(slot: &GameSlot, age_months: i32, unit: AgeBoundUnit) -> bool {
    if age_months < 0 {
        return false;
    }

    let min = slot.min_age_months.unwrap_or(0);
    let max = slot.max_age_months.unwrap_or(i32::MAX);

    if within(age_months, min, max) {
        return true;
    }

    match unit {
        AgeBoundUnit::Months => false,
        AgeBoundUnit::Lenient => within(
            age_months,
            min.saturating_mul(12),
            max.saturating_mul(12),
        ),
    }
}

/// Slots of an event open to a child of the given age, in input order.
///
/// Full slots are kept; callers flag them and selection rejects them.
pub fn eligible_slots(slots: &[GameSlot], age_months: i32, unit: AgeBoundUnit) -> Vec<&GameSlot> {
    slots
        .iter()
        .filter(|slot| is_eligible(slot, age_months, unit))
        .collect()
}

fn within(age: i32, min: i32, max: i32) -> bool {
    age >= min && age <= max
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(id: i64, min: Option<i32>, max: Option<i32>) -> GameSlot {
        GameSlot {
            id,
            game_id: id * 10,
            game_title: format!("Game {}", id),
            start_time: "09:00".to_string(),
            end_time: "09:30".to_string(),
            capacity: 10,
            booked_count: 0,
            price: Some(500.0),
            listed_price: None,
            min_age_months: min,
            max_age_months: max,
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let s = slot(1, Some(6), Some(12));
        assert!(!is_eligible(&s, 5, AgeBoundUnit::Months));
        assert!(is_eligible(&s, 6, AgeBoundUnit::Months));
        assert!(is_eligible(&s, 12, AgeBoundUnit::Months));
        assert!(!is_eligible(&s, 13, AgeBoundUnit::Months));
    }

    #[test]
    fn test_open_bounds_accept_any_non_negative_age() {
        let s = slot(1, None, None);
        assert!(is_eligible(&s, 0, AgeBoundUnit::Months));
        assert!(is_eligible(&s, 600, AgeBoundUnit::Months));
        assert!(!is_eligible(&s, -1, AgeBoundUnit::Months));
    }

    #[test]
    fn test_six_to_eighteen_month_boundaries() {
        let s = slot(1, Some(6), Some(18));
        assert!(!is_eligible(&s, 5, AgeBoundUnit::Months));
        assert!(is_eligible(&s, 6, AgeBoundUnit::Months));
        assert!(is_eligible(&s, 18, AgeBoundUnit::Months));
        assert!(!is_eligible(&s, 19, AgeBoundUnit::Months));
    }

    #[test]
    fn test_child_born_days_after_event_is_never_eligible() {
        use crate::domain::rules::age_in_months;
        use chrono::NaiveDate;

        let birth = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        let event = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let age = age_in_months(birth, event);
        assert!(age < 0);

        let slots = vec![slot(1, None, Some(12)), slot(2, Some(0), None), slot(3, None, None)];
        assert!(eligible_slots(&slots, age, AgeBoundUnit::Months).is_empty());
        assert!(eligible_slots(&slots, age, AgeBoundUnit::Lenient).is_empty());
    }

    #[test]
    fn test_lenient_reads_bounds_as_years() {
        let s = slot(1, Some(1), Some(2));
        assert!(!is_eligible(&s, 18, AgeBoundUnit::Months));
        assert!(is_eligible(&s, 18, AgeBoundUnit::Lenient));
        assert!(is_eligible(&s, 2, AgeBoundUnit::Lenient));
        assert!(!is_eligible(&s, 25, AgeBoundUnit::Lenient));
        assert!(!is_eligible(&s, -3, AgeBoundUnit::Lenient));
    }

    #[test]
    fn test_eligible_slots_keeps_order_and_full_slots() {
        let mut full = slot(2, Some(0), Some(24));
        full.booked_count = full.capacity;
        let slots = vec![slot(1, Some(0), Some(12)), full, slot(3, Some(30), None)];

        let ids: Vec<i64> = eligible_slots(&slots, 10, AgeBoundUnit::Months)
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!("Months".parse::<AgeBoundUnit>(), Ok(AgeBoundUnit::Months));
        assert_eq!(" lenient ".parse::<AgeBoundUnit>(), Ok(AgeBoundUnit::Lenient));
        assert!("years".parse::<AgeBoundUnit>().is_err());
    }
}
