//! DTOs for quoting and promo code preview.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::{PromoOutcome, QuoteOutcome, QuoteRequest};
use crate::domain::entities::PromoValidation;
use crate::domain::rules::{AddOnLine, PriceQuote, SelectionSet};

/// Add-on line as sent by clients.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddOnLineDto {
    pub add_on_id: i64,
    pub variant_id: Option<i64>,
    #[validate(range(min = 1, max = 50))]
    pub quantity: u32,
}

impl From<&AddOnLineDto> for AddOnLine {
    fn from(dto: &AddOnLineDto) -> Self {
        AddOnLine {
            add_on_id: dto.add_on_id,
            variant_id: dto.variant_id,
            quantity: dto.quantity,
        }
    }
}

pub fn add_on_lines(dtos: &[AddOnLineDto]) -> Vec<AddOnLine> {
    dtos.iter().map(AddOnLine::from).collect()
}

/// Body of `POST /api/quote`.
#[derive(Debug, Deserialize, Validate)]
pub struct QuoteRequestDto {
    pub event_id: i64,

    #[validate(length(min = 1, max = 20, message = "Select between 1 and 20 game slots"))]
    pub slot_ids: Vec<i64>,

    #[serde(default)]
    #[validate(nested)]
    pub add_ons: Vec<AddOnLineDto>,

    #[validate(length(max = 50))]
    pub promo_code: Option<String>,

    pub child_date_of_birth: Option<NaiveDate>,
}

impl From<&QuoteRequestDto> for QuoteRequest {
    fn from(dto: &QuoteRequestDto) -> Self {
        QuoteRequest {
            event_id: dto.event_id,
            slot_ids: dto.slot_ids.clone(),
            add_ons: add_on_lines(&dto.add_ons),
            promo_code: dto.promo_code.clone(),
            child_date_of_birth: dto.child_date_of_birth,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub event_id: i64,
    pub event_title: String,
    pub selection: SelectionSet,
    pub quote: PriceQuote,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo: Option<PromoOutcome>,
}

impl From<QuoteOutcome> for QuoteResponse {
    fn from(outcome: QuoteOutcome) -> Self {
        Self {
            event_id: outcome.event.id,
            event_title: outcome.event.title,
            selection: outcome.selection,
            quote: outcome.quote,
            promo: outcome.promo,
        }
    }
}

/// Body of `POST /api/promo-codes/validate`.
#[derive(Debug, Deserialize, Validate)]
pub struct PromoValidateRequest {
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    pub event_id: i64,
    #[serde(default)]
    pub game_ids: Vec<i64>,
    #[validate(range(min = 0.0))]
    pub subtotal: f64,
}

#[derive(Debug, Serialize)]
pub struct PromoValidateResponse {
    pub is_valid: bool,
    pub discount_amount: f64,
    pub message: Option<String>,
}

impl From<PromoValidation> for PromoValidateResponse {
    fn from(v: PromoValidation) -> Self {
        Self {
            is_valid: v.is_valid,
            discount_amount: v.discount_amount,
            message: v.message,
        }
    }
}
