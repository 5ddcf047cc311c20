//! Turning requested slots and add-ons into a priced, validated selection.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;

use crate::domain::entities::{Event, PromoValidation};
use crate::domain::gateways::{CatalogGateway, PromoGateway};
use crate::domain::rules::{
    AddOnLine, AgeBoundUnit, PriceQuote, SelectionSet, age_in_months, is_eligible, quote,
    reference_date,
};
use crate::error::AppError;

/// What the client asks to price.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuoteRequest {
    pub event_id: i64,
    pub slot_ids: Vec<i64>,
    pub add_ons: Vec<AddOnLine>,
    pub promo_code: Option<String>,
    /// When present, every slot must be open to a child of this age.
    pub child_date_of_birth: Option<NaiveDate>,
}

/// Result of validating the promo code attached to a quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromoOutcome {
    pub code: String,
    pub applied: bool,
    pub discount_amount: f64,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct QuoteOutcome {
    pub event: Event,
    pub selection: SelectionSet,
    pub quote: PriceQuote,
    pub promo: Option<PromoOutcome>,
}

impl QuoteOutcome {
    /// Fails if a promo code was supplied but not applied.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unprocessable`] carrying the promo service message.
    pub fn require_promo_applied(&self) -> Result<(), AppError> {
        match &self.promo {
            Some(promo) if !promo.applied => Err(AppError::unprocessable(
                promo
                    .message
                    .clone()
                    .unwrap_or_else(|| "Promo code is not valid".to_string()),
                json!({ "promo_code": promo.code }),
            )),
            _ => Ok(()),
        }
    }
}

pub struct QuoteService {
    catalog: Arc<dyn CatalogGateway>,
    promos: Arc<dyn PromoGateway>,
    age_unit: AgeBoundUnit,
}

impl QuoteService {
    pub fn new(
        catalog: Arc<dyn CatalogGateway>,
        promos: Arc<dyn PromoGateway>,
        age_unit: AgeBoundUnit,
    ) -> Self {
        Self {
            catalog,
            promos,
            age_unit,
        }
    }

    /// Prices a request against the live catalog.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the event is unknown
    /// - [`AppError::Validation`] for unknown slots or add-ons, or two slots of one game
    /// - [`AppError::Unprocessable`] for full slots or slots the child is not eligible for
    /// - [`AppError::Upstream`] if the catalog or promo service fails
    pub async fn quote(
        &self,
        request: &QuoteRequest,
        today: NaiveDate,
    ) -> Result<QuoteOutcome, AppError> {
        let event = self.catalog.get_event(request.event_id).await?.ok_or_else(|| {
            AppError::not_found("Event not found", json!({ "event_id": request.event_id }))
        })?;

        let age_months = request
            .child_date_of_birth
            .map(|dob| age_in_months(dob, reference_date(Some(event.date), today)));

        let mut selection = build_selection(&event, &request.slot_ids, age_months, self.age_unit)?;
        for line in &request.add_ons {
            selection.set_add_on(line.add_on_id, line.variant_id, line.quantity);
        }

        let add_ons = if selection.add_ons().is_empty() {
            Vec::new()
        } else {
            self.catalog.list_add_ons().await?
        };

        let undiscounted = quote(&selection, &event.slots, &add_ons, 0.0)?;

        let promo = match request
            .promo_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            Some(code) => {
                let validation = self
                    .validate_promo(code, event.id, selection.game_ids(), undiscounted.subtotal)
                    .await?;
                Some(PromoOutcome {
                    code: code.to_string(),
                    applied: validation.is_applicable(),
                    discount_amount: validation.discount_amount,
                    message: validation.message,
                })
            }
            None => None,
        };

        let price = match &promo {
            Some(p) if p.applied => quote(&selection, &event.slots, &add_ons, p.discount_amount)?,
            _ => undiscounted,
        };

        metrics::counter!("quotes_computed_total").increment(1);

        Ok(QuoteOutcome {
            event,
            selection,
            quote: price,
            promo,
        })
    }

    /// Asks the promo service what a code is worth. Non-positive subtotals are
    /// refused without a call.
    pub async fn validate_promo(
        &self,
        code: &str,
        event_id: i64,
        game_ids: Vec<i64>,
        subtotal: f64,
    ) -> Result<PromoValidation, AppError> {
        if subtotal <= 0.0 {
            metrics::counter!("promo_validations_total", "result" => "invalid").increment(1);
            return Ok(PromoValidation::rejected(
                "Subtotal must be greater than zero",
            ));
        }

        let result = self
            .promos
            .validate_preview(code, event_id, game_ids, subtotal)
            .await;

        let label = match &result {
            Ok(v) if v.is_valid => "valid",
            Ok(_) => "invalid",
            Err(_) => "error",
        };
        metrics::counter!("promo_validations_total", "result" => label).increment(1);

        result
    }
}

/// Applies requested slot ids to an empty selection.
///
/// Repeated ids are ignored rather than toggled off.
fn build_selection(
    event: &Event,
    slot_ids: &[i64],
    age_months: Option<i32>,
    age_unit: AgeBoundUnit,
) -> Result<SelectionSet, AppError> {
    let mut selection = SelectionSet::new();

    for &slot_id in slot_ids {
        if selection.contains_slot(slot_id) {
            continue;
        }

        let slot = event.slot(slot_id).ok_or_else(|| {
            AppError::bad_request(
                "Slot does not belong to this event",
                json!({ "event_id": event.id, "slot_id": slot_id }),
            )
        })?;

        if selection.game_ids().contains(&slot.game_id) {
            return Err(AppError::bad_request(
                "Only one slot per game can be booked",
                json!({ "game_id": slot.game_id, "slot_id": slot_id }),
            ));
        }

        if let Some(age) = age_months {
            if !is_eligible(slot, age, age_unit) {
                return Err(AppError::unprocessable(
                    format!("Child is not eligible for '{}'", slot.game_title),
                    json!({
                        "slot_id": slot_id,
                        "age_months": age,
                        "min_age_months": slot.min_age_months,
                        "max_age_months": slot.max_age_months,
                    }),
                ));
            }
        }

        selection.select_slot(slot)?;
    }

    Ok(selection)
}
