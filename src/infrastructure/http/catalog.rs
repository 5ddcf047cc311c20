//! Catalog webhooks: cities, events with their game slots, add-ons, promo codes.

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::client::WebhookClient;
use super::coerce;
use super::error::GatewayError;
use crate::domain::entities::{
    AddOn, AddOnVariant, BundleDiscount, City, DiscountType, Event, GameSlot, PromoCode,
};
use crate::domain::gateways::CatalogGateway;
use crate::error::AppError;

/// Slots without a declared capacity take the admin form's default.
const DEFAULT_SLOT_CAPACITY: u32 = 10;

pub struct HttpCatalogGateway {
    client: WebhookClient,
}

impl HttpCatalogGateway {
    pub fn new(client: WebhookClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogGateway for HttpCatalogGateway {
    async fn list_cities(&self) -> Result<Vec<City>, AppError> {
        let body = self.client.get_json("city/get-all").await?;
        Ok(parse_all(body, "city", parse_city))
    }

    async fn events_for_city(&self, city_id: i64) -> Result<Vec<Event>, AppError> {
        let body = self
            .client
            .post_json("event-registration/getbycityid", &json!({ "city_id": city_id }))
            .await?;
        Ok(parse_all(body, "event", parse_event))
    }

    async fn get_event(&self, event_id: i64) -> Result<Option<Event>, AppError> {
        let body = match self
            .client
            .post_json("event-registration/get", &json!({ "id": event_id }))
            .await
        {
            Ok(body) => body,
            Err(GatewayError::Status { status, .. }) if status.as_u16() == 404 => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(coerce::list(body)
            .iter()
            .filter_map(parse_event)
            .find(|e| e.id == event_id))
    }

    async fn list_add_ons(&self) -> Result<Vec<AddOn>, AppError> {
        let body = self.client.get_json("add-ons/get-all").await?;
        Ok(parse_all(body, "add-on", parse_add_on))
    }

    async fn list_promo_codes(&self) -> Result<Vec<PromoCode>, AppError> {
        let body = self.client.get_json("promocode/get-all").await?;
        Ok(parse_all(body, "promo code", parse_promo_code))
    }
}

fn parse_all<T>(body: Value, kind: &str, parse: fn(&Value) -> Option<T>) -> Vec<T> {
    let items = coerce::list(body);
    let total = items.len();
    let parsed: Vec<T> = items.iter().filter_map(parse).collect();
    if parsed.len() < total {
        warn!(kind, skipped = total - parsed.len(), "Dropped unparseable upstream records");
    }
    debug!(kind, count = parsed.len(), "Parsed upstream records");
    parsed
}

fn parse_city(v: &Value) -> Option<City> {
    if coerce::flag(v, &["is_active"]) == Some(false) {
        return None;
    }
    Some(City {
        id: coerce::integer(v, &["id", "city_id"])?,
        name: coerce::text(v, &["city_name", "name"])?,
        state: coerce::text(v, &["state"]),
        venue_count: coerce::count(v, &["venues", "venue_count", "total_venues"]),
    })
}

pub fn parse_event(v: &Value) -> Option<Event> {
    let slots = coerce::field(v, &["games", "event_games", "slots"])
        .and_then(Value::as_array)
        .map(|games| games.iter().filter_map(parse_slot).collect())
        .unwrap_or_default();

    Some(Event {
        id: coerce::integer(v, &["event_id", "id"])?,
        title: coerce::text(v, &["event_title", "title"])?,
        description: coerce::text(v, &["event_description", "description"]).unwrap_or_default(),
        date: coerce::date(v, &["event_date", "date"])?,
        venue: coerce::text(v, &["venue_name", "venue"]).unwrap_or_default(),
        city: coerce::text(v, &["city_name", "city"]).unwrap_or_default(),
        city_id: coerce::integer(v, &["city_id"]),
        slots,
    })
}

fn parse_slot(v: &Value) -> Option<GameSlot> {
    let game_id = coerce::integer(v, &["game_id"])?;
    Some(GameSlot {
        id: coerce::integer(v, &["slot_id", "id"])?,
        game_id,
        game_title: coerce::text(v, &["custom_title", "game_title", "title"])
            .unwrap_or_else(|| format!("Game {game_id}")),
        start_time: coerce::text(v, &["start_time"]).unwrap_or_default(),
        end_time: coerce::text(v, &["end_time"]).unwrap_or_default(),
        capacity: coerce::count(v, &["max_participants", "capacity"])
            .unwrap_or(DEFAULT_SLOT_CAPACITY),
        booked_count: coerce::count(v, &["booked_count", "booking_count", "participants_count"])
            .unwrap_or(0),
        price: coerce::number(v, &["slot_price", "custom_price"]),
        listed_price: coerce::number(v, &["listed_price", "game_price", "price"]),
        min_age_months: coerce::integer(v, &["min_age", "min_age_months"]).map(clamp_i32),
        max_age_months: coerce::integer(v, &["max_age", "max_age_months"]).map(clamp_i32),
    })
}

fn clamp_i32(n: i64) -> i32 {
    n.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

pub fn parse_add_on(v: &Value) -> Option<AddOn> {
    if coerce::flag(v, &["is_active"]) == Some(false) {
        return None;
    }

    let variants = coerce::field(v, &["variants"])
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(parse_variant).collect())
        .unwrap_or_default();

    let bundle_discount = match coerce::flag(v, &["has_bundle_discount"]) {
        Some(false) => None,
        _ => parse_bundle(v),
    };

    Some(AddOn {
        id: coerce::integer(v, &["id", "addon_id"])?,
        name: coerce::text(v, &["name", "addon_name"])?,
        price: coerce::number(v, &["price"]).unwrap_or(0.0),
        variants,
        bundle_discount,
    })
}

fn parse_variant(v: &Value) -> Option<AddOnVariant> {
    Some(AddOnVariant {
        id: coerce::integer(v, &["id", "variant_id"])?,
        name: coerce::text(v, &["name", "variant_name"]).unwrap_or_default(),
        price: coerce::number(v, &["price"]),
        price_modifier: coerce::number(v, &["price_modifier"]),
    })
}

fn parse_bundle(v: &Value) -> Option<BundleDiscount> {
    let source = coerce::field(v, &["bundle_discount"])
        .filter(|b| b.is_object())
        .unwrap_or(v);

    let min_quantity = coerce::count(source, &["min_quantity", "bundle_min_quantity"])?;
    let discount_percent = coerce::number(
        source,
        &["discount_percentage", "discount_percent", "bundle_discount_percentage"],
    )?;

    Some(BundleDiscount {
        min_quantity,
        discount_percent,
    })
}

fn parse_promo_code(v: &Value) -> Option<PromoCode> {
    let discount_type = match coerce::text(v, &["type", "discount_type"])?
        .to_ascii_lowercase()
        .as_str()
    {
        t if t.starts_with("percent") => DiscountType::Percentage,
        "fixed" | "flat" | "amount" => DiscountType::Fixed,
        _ => return None,
    };

    Some(PromoCode {
        id: coerce::integer(v, &["id", "promo_code_id"])?,
        code: coerce::text(v, &["promo_code", "code"])?,
        discount_type,
        value: coerce::number(v, &["value", "discount_value"])?,
        valid_from: coerce::datetime(v, &["valid_from"]),
        valid_to: coerce::datetime(v, &["valid_to"])?,
        is_active: coerce::flag(v, &["is_active"]).unwrap_or(true),
        minimum_purchase: coerce::number(v, &["minimum_purchase_amount", "minimum_purchase"])
            .unwrap_or(0.0),
        maximum_discount: coerce::number(v, &["maximum_discount_amount", "maximum_discount"]),
        event_ids: coerce::id_list(v, &["events", "event_ids"]),
        game_ids: coerce::id_list(v, &["games", "game_ids"]),
        usage_limit: coerce::count(v, &["usage_limit"]),
        usage_count: coerce::count(v, &["usage_count", "usage_used"]).unwrap_or(0),
    })
}
