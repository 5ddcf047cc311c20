//! Catalog entities: cities, events and the bookable game slots inside them.

use chrono::NaiveDate;
use serde::Serialize;

/// A city hosting events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub state: Option<String>,
    pub venue_count: Option<u32>,
}

/// An event on a given date at a venue, with its bookable slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub venue: String,
    pub city: String,
    pub city_id: Option<i64>,
    pub slots: Vec<GameSlot>,
}

impl Event {
    /// Finds a slot of this event by id.
    pub fn slot(&self, slot_id: i64) -> Option<&GameSlot> {
        self.slots.iter().find(|s| s.id == slot_id)
    }
}

/// A bookable time window for one game within one event.
///
/// Age bounds are in months; `None` means unbounded on that side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSlot {
    pub id: i64,
    pub game_id: i64,
    pub game_title: String,
    pub start_time: String,
    pub end_time: String,
    pub capacity: u32,
    pub booked_count: u32,
    /// Slot-specific price.
    pub price: Option<f64>,
    /// Game's listed price, used when the slot carries none.
    pub listed_price: Option<f64>,
    pub min_age_months: Option<i32>,
    pub max_age_months: Option<i32>,
}

impl GameSlot {
    /// Seats left in this slot.
    pub fn remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.booked_count)
    }

    pub fn is_full(&self) -> bool {
        self.remaining() == 0
    }

    /// Price charged for this slot: the slot price when set and non-zero,
    /// else the game's listed price, else zero.
    pub fn unit_price(&self) -> f64 {
        match (self.price, self.listed_price) {
            (Some(price), _) if price != 0.0 => price,
            (_, Some(listed)) => listed,
            _ => 0.0,
        }
    }
}
