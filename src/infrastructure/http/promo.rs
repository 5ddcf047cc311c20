//! Server-side promo code preview.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::client::WebhookClient;
use super::coerce;
use super::error::GatewayError;
use crate::domain::entities::PromoValidation;
use crate::domain::gateways::PromoGateway;
use crate::error::AppError;

pub struct HttpPromoGateway {
    client: WebhookClient,
}

impl HttpPromoGateway {
    pub fn new(client: WebhookClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PreviewRequest<'a> {
    #[serde(rename = "promocode")]
    code: &'a str,
    event_id: i64,
    game_ids: Vec<i64>,
    subtotal: f64,
}

fn parse_validation(v: &Value) -> PromoValidation {
    let is_valid = coerce::flag(v, &["isValid", "is_valid", "valid"]).unwrap_or(false);
    PromoValidation {
        is_valid,
        discount_amount: if is_valid {
            coerce::number(v, &["discountAmount", "discount_amount"])
                .unwrap_or(0.0)
                .max(0.0)
        } else {
            0.0
        },
        message: coerce::text(v, &["message", "error"]),
    }
}

#[async_trait]
impl PromoGateway for HttpPromoGateway {
    async fn validate_preview(
        &self,
        code: &str,
        event_id: i64,
        game_ids: Vec<i64>,
        subtotal: f64,
    ) -> Result<PromoValidation, AppError> {
        let request = PreviewRequest {
            code,
            event_id,
            game_ids,
            subtotal,
        };

        match self
            .client
            .post_json("promocode/validate-preview", &request)
            .await
        {
            Ok(body) => Ok(parse_validation(
                &coerce::first(body).unwrap_or(Value::Null),
            )),
            // The preview webhook answers unknown or expired codes with a 4xx
            // and a JSON reason.
            Err(GatewayError::Status { status, body }) if status.is_client_error() => {
                debug!(code, status = status.as_u16(), "Promo preview rejected");
                let reason = serde_json::from_str::<Value>(&body)
                    .ok()
                    .and_then(coerce::first)
                    .and_then(|v| coerce::text(&v, &["message", "error"]))
                    .unwrap_or_else(|| "Invalid promo code".to_string());
                Ok(PromoValidation::rejected(reason))
            }
            Err(e) => Err(e.into()),
        }
    }
}
