//! Booking price computation.

use serde::Serialize;
use serde_json::json;

use super::selection::{AddOnLine, SelectionSet};
use crate::domain::entities::{AddOn, GameSlot};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Game,
    AddOn,
}

/// One priced line of a quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteLine {
    pub kind: LineKind,
    /// Slot id for games, add-on id for add-ons.
    pub item_id: i64,
    pub variant_id: Option<i64>,
    pub label: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    pub games_total: f64,
    pub add_ons_total: f64,
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
    pub lines: Vec<QuoteLine>,
}

impl PriceQuote {
    /// Price charged per selected game, in selection order.
    pub fn game_prices(&self) -> Vec<f64> {
        self.lines
            .iter()
            .filter(|l| l.kind == LineKind::Game)
            .map(|l| l.total)
            .collect()
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Unit price of an add-on line after variant and bundle adjustments.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the line names a variant the add-on does not have.
pub fn add_on_unit_price(add_on: &AddOn, line: &AddOnLine) -> Result<f64, AppError> {
    let mut unit = add_on.price;

    if let Some(variant_id) = line.variant_id {
        let variant = add_on.variant(variant_id).ok_or_else(|| {
            AppError::bad_request(
                format!("Unknown variant for add-on '{}'", add_on.name),
                json!({ "add_on_id": add_on.id, "variant_id": variant_id }),
            )
        })?;
        unit = match (variant.price, variant.price_modifier) {
            (Some(price), _) => price,
            (None, Some(delta)) => add_on.price + delta,
            (None, None) => add_on.price,
        };
    }

    if let Some(bundle) = add_on.bundle_discount.filter(|b| b.applies_to(line.quantity)) {
        unit *= 1.0 - bundle.discount_percent / 100.0;
    }

    Ok(unit)
}

/// Prices a selection.
///
/// `discount` is the amount granted by an accepted promo validation; it is
/// clamped so the total never goes below zero.
///
/// # Errors
///
/// Returns [`AppError::Validation`] when the selection references a slot or
/// add-on missing from `slots` / `add_ons`.
pub fn quote(
    selection: &SelectionSet,
    slots: &[GameSlot],
    add_ons: &[AddOn],
    discount: f64,
) -> Result<PriceQuote, AppError> {
    let mut lines = Vec::with_capacity(selection.games().len() + selection.add_ons().len());

    let mut games_total = 0.0;
    for chosen in selection.games() {
        let slot = slots.iter().find(|s| s.id == chosen.slot_id).ok_or_else(|| {
            AppError::bad_request(
                "Selected slot does not belong to this event",
                json!({ "slot_id": chosen.slot_id }),
            )
        })?;
        let price = slot.unit_price();
        games_total += price;
        lines.push(QuoteLine {
            kind: LineKind::Game,
            item_id: slot.id,
            variant_id: None,
            label: slot.game_title.clone(),
            unit_price: price,
            quantity: 1,
            total: price,
        });
    }

    let mut add_ons_total = 0.0;
    for line in selection.add_ons() {
        let add_on = add_ons
            .iter()
            .find(|a| a.id == line.add_on_id)
            .ok_or_else(|| {
                AppError::bad_request(
                    "Unknown add-on",
                    json!({ "add_on_id": line.add_on_id }),
                )
            })?;
        let unit = add_on_unit_price(add_on, line)?;
        let total = round2(unit * f64::from(line.quantity));
        add_ons_total += total;

        let label = match line.variant_id.and_then(|id| add_on.variant(id)) {
            Some(variant) => format!("{} ({})", add_on.name, variant.name),
            None => add_on.name.clone(),
        };
        lines.push(QuoteLine {
            kind: LineKind::AddOn,
            item_id: add_on.id,
            variant_id: line.variant_id,
            label,
            unit_price: round2(unit),
            quantity: line.quantity,
            total,
        });
    }

    let games_total = round2(games_total);
    let add_ons_total = round2(add_ons_total);
    let subtotal = round2(games_total + add_ons_total);
    let discount = round2(discount.clamp(0.0, subtotal.max(0.0)));
    let total = round2(subtotal - discount);

    Ok(PriceQuote {
        games_total,
        add_ons_total,
        subtotal,
        discount,
        total,
        lines,
    })
}
