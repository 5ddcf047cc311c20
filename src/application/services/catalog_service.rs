//! Catalog browsing and age eligibility.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::json;

use crate::domain::entities::{AddOn, City, Event, GameSlot, PromoCode};
use crate::domain::gateways::CatalogGateway;
use crate::domain::rules::{
    AgeBoundUnit, age_in_months, applicable_promo_codes, eligible_slots, format_age,
    reference_date,
};
use crate::error::AppError;

/// A slot as offered to a specific child.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibleSlot {
    #[serde(flatten)]
    pub slot: GameSlot,
    pub unit_price: f64,
    pub remaining: u32,
    pub is_full: bool,
}

impl From<&GameSlot> for EligibleSlot {
    fn from(slot: &GameSlot) -> Self {
        Self {
            slot: slot.clone(),
            unit_price: slot.unit_price(),
            remaining: slot.remaining(),
            is_full: slot.is_full(),
        }
    }
}

/// Which slots of an event a child may book, and the age that decided it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityReport {
    pub event_id: i64,
    pub reference_date: NaiveDate,
    pub age_months: i32,
    pub age_label: String,
    pub slots: Vec<EligibleSlot>,
}

pub struct CatalogService {
    catalog: Arc<dyn CatalogGateway>,
    age_unit: AgeBoundUnit,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn CatalogGateway>, age_unit: AgeBoundUnit) -> Self {
        Self { catalog, age_unit }
    }

    pub fn age_unit(&self) -> AgeBoundUnit {
        self.age_unit
    }

    pub async fn list_cities(&self) -> Result<Vec<City>, AppError> {
        self.catalog.list_cities().await
    }

    pub async fn events_for_city(&self, city_id: i64) -> Result<Vec<Event>, AppError> {
        self.catalog.events_for_city(city_id).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the catalog does not know the event.
    pub async fn get_event(&self, event_id: i64) -> Result<Event, AppError> {
        self.catalog
            .get_event(event_id)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found", json!({ "event_id": event_id })))
    }

    pub async fn list_add_ons(&self) -> Result<Vec<AddOn>, AppError> {
        self.catalog.list_add_ons().await
    }

    /// Slots of `event_id` open to a child born on `date_of_birth`.
    ///
    /// Age is measured at the event date. A child born after the event gets an
    /// empty slot list.
    pub async fn eligibility(
        &self,
        event_id: i64,
        date_of_birth: NaiveDate,
        today: NaiveDate,
    ) -> Result<EligibilityReport, AppError> {
        let event = self.get_event(event_id).await?;
        let at = reference_date(Some(event.date), today);
        let age_months = age_in_months(date_of_birth, at);

        let slots = eligible_slots(&event.slots, age_months, self.age_unit)
            .into_iter()
            .map(EligibleSlot::from)
            .collect::<Vec<_>>();

        tracing::debug!(
            event_id,
            age_months,
            eligible = slots.len(),
            total = event.slots.len(),
            "Computed slot eligibility"
        );

        Ok(EligibilityReport {
            event_id,
            reference_date: at,
            age_months,
            age_label: format_age(age_months),
            slots,
        })
    }

    /// Promo codes worth offering for an event and the chosen games.
    pub async fn promo_codes_for(
        &self,
        event_id: i64,
        game_ids: &[i64],
        now: DateTime<Utc>,
    ) -> Result<Vec<PromoCode>, AppError> {
        let codes = self.catalog.list_promo_codes().await?;
        Ok(applicable_promo_codes(&codes, event_id, game_ids, now))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn slot(id: i64, game_id: i64, min: Option<i32>, max: Option<i32>) -> GameSlot {
        GameSlot {
            id,
            game_id,
            game_title: format!("Game {}", game_id),
            start_time: "10:00".to_string(),
            end_time: "10:30".to_string(),
            capacity: 10,
            booked_count: 0,
            price: Some(1000.0),
            listed_price: None,
            min_age_months: min,
            max_age_months: max,
        }
    }

    pub fn event(id: i64, slots: Vec<GameSlot>) -> Event {
        Event {
            id,
            title: "Baby Olympics".to_string(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2026, 11, 23).unwrap(),
            venue: "Indoor Stadium".to_string(),
            city: "Hyderabad".to_string(),
            city_id: Some(1),
            slots,
        }
    }
}
